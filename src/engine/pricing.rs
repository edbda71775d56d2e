// ==========================================
// 商品数据 ETL 管道 - 定价规则
// ==========================================
// 规则: 指定品类（默认 Electronics,忽略大小写）价格 × 0.9
//       按十进制 half-up 保留两位小数
// 红线: 不使用二进制浮点,保证 0.125 → 0.13
// ==========================================

use crate::domain::{round_price, Product};
use rust_decimal::Decimal;

// ==========================================
// PricingRule Trait
// ==========================================
// 实现者: StandardPricingRule, NoDiscountPricingRule
pub trait PricingRule: Send + Sync {
    /// 对商品应用定价规则,返回调整后的商品
    fn apply_pricing(&self, product: Product) -> Product;

    /// 规则名称（用于日志）
    fn name(&self) -> &'static str;
}

// ==========================================
// StandardPricingRule - 品类折扣
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardPricingRule {
    discount_category: String,
    multiplier: Decimal,
}

impl StandardPricingRule {
    pub const DEFAULT_CATEGORY: &'static str = "Electronics";
    /// 0.9（九折）
    pub const DEFAULT_MULTIPLIER: Decimal = Decimal::from_parts(9, 0, 0, false, 1);

    pub fn new(discount_category: impl Into<String>, multiplier: Decimal) -> Self {
        Self {
            discount_category: discount_category.into(),
            multiplier,
        }
    }

    pub fn multiplier(&self) -> Decimal {
        self.multiplier
    }
}

impl Default for StandardPricingRule {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CATEGORY, Self::DEFAULT_MULTIPLIER)
    }
}

impl PricingRule for StandardPricingRule {
    fn apply_pricing(&self, mut product: Product) -> Product {
        if product.is_category(&self.discount_category) {
            let discounted = round_price(product.price() * self.multiplier);
            product.set_price(discounted);
        }
        product
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}

// ==========================================
// NoDiscountPricingRule - 原价
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiscountPricingRule;

impl PricingRule for NoDiscountPricingRule {
    fn apply_pricing(&self, product: Product) -> Product {
        product
    }

    fn name(&self) -> &'static str {
        "no_discount"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn product(price: &str, category: &str) -> Product {
        Product::new(1, "item", d(price), category)
    }

    #[test]
    fn test_electronics_discount() {
        let rule = StandardPricingRule::default();
        assert_eq!(rule.apply_pricing(product("50.00", "Electronics")).price(), d("45.00"));
        assert_eq!(rule.apply_pricing(product("600.00", "electronics")).price(), d("540.00"));
    }

    #[test]
    fn test_other_category_unchanged() {
        let rule = StandardPricingRule::default();
        assert_eq!(rule.apply_pricing(product("10.00", "Media")).price(), d("10.00"));
        // 未折扣的价格不做舍入
        assert_eq!(rule.apply_pricing(product("10.005", "Media")).price(), d("10.005"));
    }

    #[test]
    fn test_half_up_rounding_at_midpoint() {
        let rule = StandardPricingRule::default();
        // 0.15 × 0.9 = 0.135 → 0.14
        assert_eq!(rule.apply_pricing(product("0.15", "Electronics")).price(), d("0.14"));
        // 0.25 × 0.9 = 0.225 → 0.23（银行家舍入会得到 0.22）
        assert_eq!(rule.apply_pricing(product("0.25", "Electronics")).price(), d("0.23"));
        // 1.05 × 0.9 = 0.945 → 0.95（二进制浮点会得到 0.94）
        assert_eq!(rule.apply_pricing(product("1.05", "Electronics")).price(), d("0.95"));
    }

    #[test]
    fn test_custom_parameters() {
        let rule = StandardPricingRule::new("Books", d("0.5"));
        assert_eq!(rule.apply_pricing(product("20.00", "BOOKS")).price(), d("10.00"));
        assert_eq!(rule.apply_pricing(product("20.00", "Electronics")).price(), d("20.00"));
    }

    #[test]
    fn test_no_discount_rule() {
        let rule = NoDiscountPricingRule;
        assert_eq!(rule.apply_pricing(product("50.00", "Electronics")).price(), d("50.00"));
        assert_eq!(rule.name(), "no_discount");
    }
}
