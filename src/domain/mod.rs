// ==========================================
// 商品数据 ETL 管道 - 领域模型层
// ==========================================
// 职责: 定义商品实体与值类型
// 红线: 不含文件读写逻辑,不含业务规则编排
// ==========================================

pub mod product;
pub mod types;

// 重导出核心类型
pub use product::{format_price, round_price, Product, PRICE_SCALE};
pub use types::{Delimiter, PriceRange};
