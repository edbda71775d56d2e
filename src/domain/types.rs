// ==========================================
// 商品数据 ETL 管道 - 领域类型定义
// ==========================================
// 职责: 价格区间枚举 / 字段分隔符枚举
// ==========================================

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 价格区间 (Price Range)
// ==========================================
// 红线: 仅由最终价格决定,与品类无关
// 区间上界闭合: 10.00 → Low, 500.00 → High
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriceRange {
    Low,     // p <= 10.00
    Medium,  // 10.00 < p <= 100.00
    High,    // 100.00 < p <= 500.00
    Premium, // p > 500.00
}

impl PriceRange {
    /// Low 区间上界（含）
    pub const LOW_MAX: Decimal = Decimal::from_parts(1000, 0, 0, false, 2);
    /// Medium 区间上界（含）
    pub const MEDIUM_MAX: Decimal = Decimal::from_parts(10000, 0, 0, false, 2);
    /// High 区间上界（含）
    pub const HIGH_MAX: Decimal = Decimal::from_parts(50000, 0, 0, false, 2);

    /// 根据价格划分区间
    ///
    /// # 参数
    /// - price: 经过定价/重分类后的最终价格
    ///
    /// # 返回
    /// 唯一的价格区间标签
    pub fn from_price(price: Decimal) -> Self {
        if price <= Self::LOW_MAX {
            PriceRange::Low
        } else if price <= Self::MEDIUM_MAX {
            PriceRange::Medium
        } else if price <= Self::HIGH_MAX {
            PriceRange::High
        } else {
            PriceRange::Premium
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceRange::Low => "Low",
            PriceRange::Medium => "Medium",
            PriceRange::High => "High",
            PriceRange::Premium => "Premium",
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// 字段分隔符 (Delimiter)
// ==========================================
// 仅根据表头判定一次,后续所有数据行沿用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    /// 从表头判定分隔符: 含制表符且不含逗号 → Tab,否则 Comma
    pub fn detect(header: &str) -> Self {
        if header.contains('\t') && !header.contains(',') {
            Delimiter::Tab
        } else {
            Delimiter::Comma
        }
    }

    pub fn as_byte(&self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
        }
    }

    pub fn as_char(&self) -> char {
        self.as_byte() as char
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Delimiter::Comma
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Comma => write!(f, "comma"),
            Delimiter::Tab => write!(f, "tab"),
        }
    }
}
