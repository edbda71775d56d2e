// ==========================================
// 商品数据 ETL 管道 - 商品领域模型
// ==========================================
// 红线: 价格永不为负（构造/赋值时截断为 0）
// 红线: 转换阶段先复制再修改,抽取结果不被原地改写
// ==========================================

use crate::domain::types::PriceRange;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// 金额保留的小数位数
pub const PRICE_SCALE: u32 = 2;

// ==========================================
// Product - 商品记录
// ==========================================
// 用途: 抽取层生成,转换层复制后派生,加载层只读
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,               // 商品编号（同一批次内唯一,不做全局校验）
    pub name: String,          // 名称（转换时转大写）
    price: Decimal,            // 价格（非负,精确十进制）
    pub category: String,      // 品类（可能被重分类改写）
    pub price_range: Option<PriceRange>, // 价格区间（转换前为空）
}

impl Product {
    /// 创建商品记录,负价格截断为 0
    pub fn new(id: i64, name: impl Into<String>, price: Decimal, category: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            price: clamp_non_negative(price),
            category: category.into(),
            price_range: None,
        }
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    /// 设置价格,负价格截断为 0
    pub fn set_price(&mut self, price: Decimal) {
        self.price = clamp_non_negative(price);
    }

    /// 价格区间标签（未分配时为空串）
    pub fn price_range_label(&self) -> &'static str {
        self.price_range.map(|r| r.as_str()).unwrap_or("")
    }

    /// 定点格式的价格（恰好两位小数）
    pub fn formatted_price(&self) -> String {
        format_price(self.price)
    }

    /// 品类是否与给定名称相同（忽略大小写）
    pub fn is_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category)
    }
}

fn clamp_non_negative(price: Decimal) -> Decimal {
    if price.is_sign_negative() {
        Decimal::ZERO
    } else {
        price
    }
}

/// 四舍五入（half-up）到两位小数
pub fn round_price(price: Decimal) -> Decimal {
    price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// 格式化为恰好两位小数的定点字符串（不使用科学计数法）
pub fn format_price(price: Decimal) -> String {
    let mut rounded = round_price(price);
    rounded.rescale(PRICE_SCALE);
    rounded.to_string()
}
