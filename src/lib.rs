// ==========================================
// 商品数据 ETL 管道 - 核心库
// ==========================================
// 流程: 抽取 (CSV) → 转换 (定价 / 重分类 / 区间) → 加载 (CSV)
// 运行模型: 单线程批处理,整份输入读入内存
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 抽取层 - 读取与校验输入
pub mod extractor;

// 引擎层 - 业务规则与编排
pub mod engine;

// 加载层 - 输出序列化
pub mod loader;

// 配置层 - 运行配置
pub mod config;

// 错误类型
pub mod error;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::EtlConfig;
pub use domain::{Delimiter, PriceRange, Product};
pub use engine::{
    CategoryRule, EtlOrchestrator, PricingRule, ProductTransformer, RunSummary,
    StandardCategoryRule, StandardPricingRule, StandardProductTransformer,
};
pub use error::{EtlError, EtlResult, RowRejection};
pub use extractor::{CsvProductExtractor, Extraction, ProductExtractor, RowDiagnostic};
pub use loader::{CsvProductLoader, ProductLoader};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "商品数据 ETL 管道";
