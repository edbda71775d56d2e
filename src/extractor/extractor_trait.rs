// ==========================================
// 商品数据 ETL 管道 - 抽取器 Trait
// ==========================================
// 职责: 定义抽取接口与抽取结果（不包含实现）
// ==========================================

use crate::domain::{Delimiter, Product};
use crate::error::{EtlResult, RowRejection};
use serde::Serialize;
use std::path::Path;

// ==========================================
// ProductExtractor Trait
// ==========================================
// 用途: 从数据源读取商品记录
// 实现者: CsvProductExtractor
pub trait ProductExtractor: Send + Sync {
    /// 从数据源抽取商品记录
    ///
    /// # 参数
    /// - source: 数据源路径
    ///
    /// # 返回
    /// - Ok(Extraction): 有效记录（保持输入顺序）+ 跳过行统计
    /// - Err(SourceNotFound): 路径不存在
    /// - Err(SourceEmpty): 文件 0 字节或没有表头
    fn extract(&self, source: &Path) -> EtlResult<Extraction>;
}

// ==========================================
// Extraction - 抽取结果
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub records: Vec<Product>,           // 有效记录（输入顺序）
    pub skipped_rows: usize,             // 无效行数（列数不足/数字格式错误）
    pub blank_lines: usize,              // 空白行数（单独统计,不计入无效行）
    pub header_matched: bool,            // 表头是否符合期望
    pub delimiter: Delimiter,            // 表头判定出的分隔符
    pub diagnostics: Vec<RowDiagnostic>, // 无效行明细
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ==========================================
// RowDiagnostic - 无效行明细
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowDiagnostic {
    pub line_number: usize, // 行号（表头为第 1 行）
    pub raw: String,        // 原始行文本
    pub reason: String,     // 拒收原因
    pub reason_code: &'static str,
}

impl RowDiagnostic {
    pub fn new(line_number: usize, raw: &str, rejection: &RowRejection) -> Self {
        Self {
            line_number,
            raw: raw.to_string(),
            reason: rejection.to_string(),
            reason_code: rejection.reason_code(),
        }
    }
}
