// ==========================================
// 商品数据 ETL 管道 - 配置层
// ==========================================
// 职责: 输入/输出路径与业务规则参数
// 存储: JSON 配置文件 + 环境变量
// ==========================================

pub mod etl_config;

// 重导出核心配置类型
pub use etl_config::{
    config_keys, CategorizationConfig, EtlConfig, PricingConfig, DEFAULT_DESTINATION_PATH,
    DEFAULT_SOURCE_PATH,
};
