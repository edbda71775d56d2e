// ==========================================
// 商品数据 ETL 管道 - 引擎层
// ==========================================
// 职责: 业务规则（定价 / 重分类 / 区间划分）与流程编排
// 红线: 规则只处理内存中的记录,不做文件读写
// ==========================================

pub mod categorization;
pub mod orchestrator;
pub mod pricing;
pub mod strategy;
pub mod transformer;

// 重导出核心引擎
pub use categorization::{CategoryRule, PassthroughCategoryRule, StandardCategoryRule};
pub use orchestrator::{EtlOrchestrator, RunSummary};
pub use pricing::{NoDiscountPricingRule, PricingRule, StandardPricingRule};
pub use strategy::{CategoryProfile, PricingProfile};
pub use transformer::{ProductTransformer, StandardProductTransformer};
