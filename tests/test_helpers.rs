// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 临时输入文件 / 输出目录 / 标准编排器
// ==========================================

#![allow(dead_code)]

use product_etl::{EtlConfig, EtlOrchestrator};
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

pub const HEADER: &str = "ProductID,Name,Price,Category";

/// 创建临时输入文件
///
/// # 返回
/// - NamedTempFile: 临时文件（需要保持存活）
pub fn create_source(content: &str) -> Result<NamedTempFile, Box<dyn Error>> {
    create_source_bytes(content.as_bytes())
}

/// 以原始字节创建临时输入文件（可含非法 UTF-8）
pub fn create_source_bytes(bytes: &[u8]) -> Result<NamedTempFile, Box<dyn Error>> {
    let mut temp_file = NamedTempFile::new()?;
    temp_file.write_all(bytes)?;
    temp_file.flush()?;
    Ok(temp_file)
}

/// 由表头和数据行拼出输入文本（每行以 \n 结尾）
pub fn csv_text(rows: &[&str]) -> String {
    let mut text = String::from(HEADER);
    text.push('\n');
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    text
}

/// 创建临时输出目录,返回目录与其中的输出文件路径
pub fn create_destination() -> Result<(TempDir, PathBuf), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let path = dir.path().join("data").join("transformed_products.csv");
    Ok((dir, path))
}

/// 使用默认配置组装的编排器
pub fn standard_orchestrator() -> EtlOrchestrator {
    EtlOrchestrator::standard(&EtlConfig::default()).expect("默认配置必须合法")
}
