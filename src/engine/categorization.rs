// ==========================================
// 商品数据 ETL 管道 - 品类重分类规则
// ==========================================
// 规则: Electronics（忽略大小写）且折后价格 > 500.00
//       → 品类改写为 "Premium Electronics"
// 顺序: 必须在定价规则之后执行（检查的是折后价格）
// ==========================================

use crate::domain::Product;
use rust_decimal::Decimal;

// ==========================================
// CategoryRule Trait
// ==========================================
// 实现者: StandardCategoryRule, PassthroughCategoryRule
pub trait CategoryRule: Send + Sync {
    /// 对商品应用重分类规则,返回调整后的商品
    fn categorize(&self, product: Product) -> Product;

    /// 规则名称（用于日志）
    fn name(&self) -> &'static str;
}

// ==========================================
// StandardCategoryRule - 高价电子产品升级
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardCategoryRule {
    source_category: String,
    threshold: Decimal,
    premium_label: String,
}

impl StandardCategoryRule {
    pub const DEFAULT_SOURCE_CATEGORY: &'static str = "Electronics";
    pub const DEFAULT_PREMIUM_LABEL: &'static str = "Premium Electronics";
    /// 500.00（严格大于才升级）
    pub const DEFAULT_THRESHOLD: Decimal = Decimal::from_parts(50000, 0, 0, false, 2);

    pub fn new(
        source_category: impl Into<String>,
        threshold: Decimal,
        premium_label: impl Into<String>,
    ) -> Self {
        Self {
            source_category: source_category.into(),
            threshold,
            premium_label: premium_label.into(),
        }
    }

    pub fn threshold(&self) -> Decimal {
        self.threshold
    }
}

impl Default for StandardCategoryRule {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_SOURCE_CATEGORY,
            Self::DEFAULT_THRESHOLD,
            Self::DEFAULT_PREMIUM_LABEL,
        )
    }
}

impl CategoryRule for StandardCategoryRule {
    fn categorize(&self, mut product: Product) -> Product {
        if product.is_category(&self.source_category) && product.price() > self.threshold {
            product.category = self.premium_label.clone();
        }
        product
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}

// ==========================================
// PassthroughCategoryRule - 保持原品类
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughCategoryRule;

impl CategoryRule for PassthroughCategoryRule {
    fn categorize(&self, product: Product) -> Product {
        product
    }

    fn name(&self) -> &'static str {
        "passthrough"
    }
}
