// ==========================================
// 商品数据 ETL 管道 - 行解析器
// ==========================================
// 阶段 0: 表头校验 / 分隔符判定 / 单行拆分与类型转换
// 单行解析为纯函数: 成功 → Product, 失败 → RowRejection
// ==========================================

use crate::domain::{Delimiter, Product};
use crate::error::RowRejection;
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use std::str::FromStr;

/// 期望的表头列名（按位置）
pub const EXPECTED_COLUMNS: [&str; 4] = ["ProductID", "Name", "Price", "Category"];

/// 一行数据至少需要的列数
pub const MIN_FIELDS: usize = EXPECTED_COLUMNS.len();

/// 表头是否与期望一致（去首尾空白、忽略大小写、按判定出的分隔符拼接）
pub fn header_matches(header: &str, delimiter: Delimiter) -> bool {
    let expected = EXPECTED_COLUMNS.join(&delimiter.as_char().to_string());
    header.trim().eq_ignore_ascii_case(&expected)
}

/// 按分隔符拆分一行
///
/// # 说明
/// - 使用 csv 读取器按分隔符逐字拆分,引号按普通字符保留
/// - 末尾的空字段被丢弃（"1,a,5," 视为 3 列）
/// - 不做 trim,由调用方决定
pub fn split_fields(line: &str, delimiter: Delimiter) -> Vec<String> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .delimiter(delimiter.as_byte())
        .from_reader(line.as_bytes());

    let mut fields: Vec<String> = match reader.records().next() {
        Some(Ok(record)) => record.iter().map(str::to_string).collect(),
        // 解析失败时退回到朴素拆分
        _ => line.split(delimiter.as_char()).map(str::to_string).collect(),
    };

    while fields.last().map_or(false, |f| f.is_empty()) {
        fields.pop();
    }

    fields
}

/// 将一行数据解析为商品记录
///
/// # 参数
/// - line: 原始行文本（非空白行）
/// - delimiter: 表头判定出的分隔符
///
/// # 返回
/// - Ok(Product): 解析成功,name/category 已 trim,price_range 为空
/// - Err(RowRejection): 列数不足 / 编号非整数 / 价格非数字
pub fn parse_product_line(line: &str, delimiter: Delimiter) -> Result<Product, RowRejection> {
    let fields = split_fields(line, delimiter);
    if fields.len() < MIN_FIELDS {
        return Err(RowRejection::InsufficientColumns {
            found: fields.len(),
        });
    }

    let raw_id = fields[0].trim();
    let id = raw_id.parse::<i64>().map_err(|_| RowRejection::InvalidId {
        value: raw_id.to_string(),
    })?;

    let raw_price = fields[2].trim();
    let price = parse_price(raw_price).ok_or_else(|| RowRejection::InvalidPrice {
        value: raw_price.to_string(),
    })?;

    Ok(Product::new(id, fields[1].trim(), price, fields[3].trim()))
}

/// 解析价格: 先按普通十进制,再兼容科学计数法（如 1.5e2）
///
/// 数字分隔符 `_` 不是合法价格写法（Decimal::from_str 会忽略它）
fn parse_price(value: &str) -> Option<Decimal> {
    if value.is_empty() || value.contains('_') {
        return None;
    }
    Decimal::from_str(value)
        .ok()
        .or_else(|| Decimal::from_scientific(value).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_header_matches() {
        assert!(header_matches("ProductID,Name,Price,Category", Delimiter::Comma));
        assert!(header_matches("  productid,name,price,category  ", Delimiter::Comma));
        assert!(header_matches("ProductID\tName\tPrice\tCategory", Delimiter::Tab));
        assert!(!header_matches("ProductID\tName\tPrice\tCategory", Delimiter::Comma));
        assert!(!header_matches("id,name,price,category", Delimiter::Comma));
    }

    #[test]
    fn test_split_fields_drops_trailing_empty() {
        assert_eq!(split_fields("1,a,5,", Delimiter::Comma), vec!["1", "a", "5"]);
        assert_eq!(split_fields("1,,5,X", Delimiter::Comma), vec!["1", "", "5", "X"]);
    }

    #[test]
    fn test_split_fields_quotes_are_literal() {
        assert_eq!(
            split_fields("7,\"Desk, oak\",120.00,Furniture", Delimiter::Comma),
            vec!["7", "\"Desk", " oak\"", "120.00", "Furniture"]
        );
        // 未闭合的引号不会吞掉后续字段
        assert_eq!(
            split_fields("1,\"widget,5.00,Toys", Delimiter::Comma),
            vec!["1", "\"widget", "5.00", "Toys"]
        );
    }

    #[test]
    fn test_parse_product_line_keeps_quote_characters() {
        let p = parse_product_line("5,\"Bob\" lamp,20.00,Home", Delimiter::Comma).unwrap();
        assert_eq!(p.name, "\"Bob\" lamp");
        assert_eq!(p.category, "Home");

        let p = parse_product_line("1,\"widget,5.00,Toys", Delimiter::Comma).unwrap();
        assert_eq!(p.id, 1);
        assert_eq!(p.name, "\"widget");
        assert_eq!(p.price(), d("5.00"));
    }

    #[test]
    fn test_split_fields_tab() {
        assert_eq!(
            split_fields("1\twidget\t50.00\tElectronics", Delimiter::Tab),
            vec!["1", "widget", "50.00", "Electronics"]
        );
        // 制表符文件中逗号不拆分
        assert_eq!(split_fields("1\ta,b\t5\tX", Delimiter::Tab).len(), 4);
    }

    #[test]
    fn test_parse_product_line_ok() {
        let p = parse_product_line(" 1 , widget , 50.00 , Electronics ", Delimiter::Comma).unwrap();
        assert_eq!(p.id, 1);
        assert_eq!(p.name, "widget");
        assert_eq!(p.price(), d("50.00"));
        assert_eq!(p.category, "Electronics");
        assert!(p.price_range.is_none());
    }

    #[test]
    fn test_parse_product_line_extra_columns_ignored() {
        let p = parse_product_line("3,book,10.00,Media,extra", Delimiter::Comma).unwrap();
        assert_eq!(p.category, "Media");
    }

    #[test]
    fn test_parse_product_line_insufficient_columns() {
        assert_eq!(
            parse_product_line("1,widget,50.00", Delimiter::Comma),
            Err(RowRejection::InsufficientColumns { found: 3 })
        );
        // 逗号文件按制表符判定时整行只算 1 列
        assert_eq!(
            parse_product_line("1,widget,50.00,X", Delimiter::Tab),
            Err(RowRejection::InsufficientColumns { found: 1 })
        );
    }

    #[test]
    fn test_parse_product_line_invalid_numbers() {
        assert_eq!(
            parse_product_line("abc,widget,50.00,X", Delimiter::Comma),
            Err(RowRejection::InvalidId { value: "abc".into() })
        );
        assert_eq!(
            parse_product_line("1.5,widget,50.00,X", Delimiter::Comma),
            Err(RowRejection::InvalidId { value: "1.5".into() })
        );
        assert_eq!(
            parse_product_line("1,widget,cheap,X", Delimiter::Comma),
            Err(RowRejection::InvalidPrice { value: "cheap".into() })
        );
        assert_eq!(
            parse_product_line("1,widget, ,X", Delimiter::Comma),
            Err(RowRejection::InvalidPrice { value: "".into() })
        );
    }

    #[test]
    fn test_parse_price_variants() {
        assert_eq!(parse_price("19.99"), Some(d("19.99")));
        assert_eq!(parse_price("1.5e2"), Some(d("150")));
        assert_eq!(parse_price("NaN"), None);
        assert_eq!(parse_price("1_000.00"), None);
        assert_eq!(parse_price("1e_2"), None);
    }

    #[test]
    fn test_negative_price_is_clamped() {
        let p = parse_product_line("4,refund,-2.00,Misc", Delimiter::Comma).unwrap();
        assert_eq!(p.price(), Decimal::ZERO);
    }
}
