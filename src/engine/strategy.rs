// ==========================================
// 商品数据 ETL 管道 - 规则组合定义
// ==========================================
// 用途：
// - 定价规则与重分类规则各自独立可替换；
// - 配置文件按名称选择规则,由此处构造对应实现。

use crate::config::{CategorizationConfig, PricingConfig};
use crate::engine::categorization::{CategoryRule, PassthroughCategoryRule, StandardCategoryRule};
use crate::engine::pricing::{NoDiscountPricingRule, PricingRule, StandardPricingRule};
use crate::error::EtlResult;
use serde::{Deserialize, Serialize};

/// 定价规则选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingProfile {
    Standard,
    NoDiscount,
}

impl PricingProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingProfile::Standard => "standard",
            PricingProfile::NoDiscount => "no_discount",
        }
    }

    /// 按配置构造定价规则
    pub fn build(&self, config: &PricingConfig) -> EtlResult<Box<dyn PricingRule>> {
        Ok(match self {
            PricingProfile::Standard => Box::new(StandardPricingRule::new(
                config.discount_category.clone(),
                config.multiplier()?,
            )),
            PricingProfile::NoDiscount => Box::new(NoDiscountPricingRule),
        })
    }
}

impl Default for PricingProfile {
    fn default() -> Self {
        PricingProfile::Standard
    }
}

impl std::str::FromStr for PricingProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(PricingProfile::Standard),
            "no_discount" | "no-discount" | "none" => Ok(PricingProfile::NoDiscount),
            other => Err(format!("未知定价规则: {}", other)),
        }
    }
}

/// 重分类规则选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryProfile {
    Standard,
    Passthrough,
}

impl CategoryProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryProfile::Standard => "standard",
            CategoryProfile::Passthrough => "passthrough",
        }
    }

    /// 按配置构造重分类规则
    pub fn build(&self, config: &CategorizationConfig) -> EtlResult<Box<dyn CategoryRule>> {
        Ok(match self {
            CategoryProfile::Standard => Box::new(StandardCategoryRule::new(
                config.source_category.clone(),
                config.threshold()?,
                config.premium_label.clone(),
            )),
            CategoryProfile::Passthrough => Box::new(PassthroughCategoryRule),
        })
    }
}

impl Default for CategoryProfile {
    fn default() -> Self {
        CategoryProfile::Standard
    }
}

impl std::str::FromStr for CategoryProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(CategoryProfile::Standard),
            "passthrough" | "none" => Ok(CategoryProfile::Passthrough),
            other => Err(format!("未知重分类规则: {}", other)),
        }
    }
}
