// ==========================================
// 商品数据 ETL 管道 - CSV 抽取器实现
// ==========================================
// 支持: 逗号 / 制表符分隔（仅由表头判定）
// 红线: 单行错误不中断运行,只计数并记录明细
// ==========================================

use crate::domain::Delimiter;
use crate::error::{EtlError, EtlResult};
use crate::extractor::extractor_trait::{Extraction, ProductExtractor, RowDiagnostic};
use crate::extractor::line_parser::{header_matches, parse_product_line, EXPECTED_COLUMNS};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

// ==========================================
// CsvProductExtractor
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvProductExtractor;

impl CsvProductExtractor {
    pub fn new() -> Self {
        Self
    }

    /// 校验数据源存在且非空
    fn validate_source(&self, source: &Path) -> EtlResult<()> {
        if !source.exists() {
            return Err(EtlError::SourceNotFound(source.display().to_string()));
        }

        let metadata = std::fs::metadata(source)?;
        if metadata.len() == 0 {
            return Err(EtlError::SourceEmpty(source.display().to_string()));
        }

        Ok(())
    }

    /// 读取整个文件（文件句柄在本函数内关闭）
    ///
    /// 非法 UTF-8 字节替换为 U+FFFD,不中断整批处理
    fn read_source(&self, source: &Path) -> EtlResult<String> {
        let file = File::open(source)?;
        let mut reader = BufReader::new(file);
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;

        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    valid_up_to = e.utf8_error().valid_up_to(),
                    "输入文件包含非法 UTF-8 字节,已替换为 U+FFFD"
                );
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        Ok(content)
    }

    /// 解析已读入内存的文本
    ///
    /// # 返回
    /// - Some(Extraction): 解析完成
    /// - None: 文本中没有表头行
    pub fn parse_content(&self, content: &str) -> Option<Extraction> {
        let mut lines = content.lines();
        let header = lines.next()?;

        let delimiter = Delimiter::detect(header);
        let header_matched = header_matches(header, delimiter);
        if !header_matched {
            warn!(
                header = %header.trim(),
                expected = %EXPECTED_COLUMNS.join(","),
                "表头格式不符合预期,按列位置继续处理"
            );
        }
        debug!(delimiter = %delimiter, "分隔符判定完成");

        let init = Extraction {
            header_matched,
            delimiter,
            ..Extraction::default()
        };

        // 表头为第 1 行,数据从第 2 行开始
        let extraction = lines
            .enumerate()
            .map(|(idx, line)| (idx + 2, line))
            .fold(init, |mut acc, (line_number, line)| {
                if line.trim().is_empty() {
                    warn!(line_number, "跳过空白行");
                    acc.blank_lines += 1;
                    return acc;
                }

                match parse_product_line(line, delimiter) {
                    Ok(product) => acc.records.push(product),
                    Err(rejection) => {
                        warn!(
                            line_number,
                            raw = %line,
                            reason = %rejection,
                            "跳过无效行"
                        );
                        acc.skipped_rows += 1;
                        acc.diagnostics
                            .push(RowDiagnostic::new(line_number, line, &rejection));
                    }
                }
                acc
            });

        Some(extraction)
    }
}

impl ProductExtractor for CsvProductExtractor {
    fn extract(&self, source: &Path) -> EtlResult<Extraction> {
        self.validate_source(source)?;

        let absolute = std::fs::canonicalize(source).unwrap_or_else(|_| source.to_path_buf());
        info!(source = %absolute.display(), "开始读取输入文件");

        let content = self.read_source(source)?;
        let extraction = self
            .parse_content(&content)
            .ok_or_else(|| EtlError::SourceEmpty(source.display().to_string()))?;

        if extraction.skipped_rows > 0 {
            info!(
                skipped_rows = extraction.skipped_rows,
                "抽取阶段跳过了无效行"
            );
        }
        info!(
            records = extraction.records.len(),
            skipped_rows = extraction.skipped_rows,
            blank_lines = extraction.blank_lines,
            "抽取完成"
        );

        Ok(extraction)
    }
}
