// ==========================================
// 商品数据 ETL 管道 - 转换器
// ==========================================
// 流程（固定顺序,前一步输出作为后一步输入）:
//   1. 复制记录（不改写抽取结果）
//   2. 名称转大写
//   3. 定价规则,价格按 half-up 落到两位小数
//   4. 重分类规则
//   5. 按最终价格划分价格区间
// ==========================================

use crate::domain::{round_price, PriceRange, Product};
use crate::engine::categorization::{CategoryRule, StandardCategoryRule};
use crate::engine::pricing::{PricingRule, StandardPricingRule};
use tracing::debug;

// ==========================================
// ProductTransformer Trait
// ==========================================
// 实现者: StandardProductTransformer
pub trait ProductTransformer: Send + Sync {
    /// 批量转换,一条输入对应一条输出,保持输入顺序
    fn transform(&self, records: &[Product]) -> Vec<Product>;
}

// ==========================================
// StandardProductTransformer
// ==========================================
pub struct StandardProductTransformer {
    pricing: Box<dyn PricingRule>,
    categorization: Box<dyn CategoryRule>,
}

impl StandardProductTransformer {
    /// 使用指定的定价规则与重分类规则创建转换器
    pub fn new(pricing: Box<dyn PricingRule>, categorization: Box<dyn CategoryRule>) -> Self {
        Self {
            pricing,
            categorization,
        }
    }

    /// 转换单条记录
    pub fn transform_product(&self, product: &Product) -> Product {
        let mut transformed = product.clone();
        transformed.name = transformed.name.to_uppercase();

        let mut transformed = self.pricing.apply_pricing(transformed);
        // 定价后价格落到两位小数,重分类与区间划分都基于写出的价格
        let settled = round_price(transformed.price());
        transformed.set_price(settled);

        let mut transformed = self.categorization.categorize(transformed);

        transformed.price_range = Some(PriceRange::from_price(transformed.price()));
        transformed
    }
}

impl Default for StandardProductTransformer {
    fn default() -> Self {
        Self::new(
            Box::new(StandardPricingRule::default()),
            Box::new(StandardCategoryRule::default()),
        )
    }
}

impl ProductTransformer for StandardProductTransformer {
    fn transform(&self, records: &[Product]) -> Vec<Product> {
        debug!(
            records = records.len(),
            pricing = self.pricing.name(),
            categorization = self.categorization.name(),
            "开始转换"
        );
        records.iter().map(|p| self.transform_product(p)).collect()
    }
}
