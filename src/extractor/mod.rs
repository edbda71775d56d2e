// ==========================================
// 商品数据 ETL 管道 - 抽取层
// ==========================================
// 职责: 读取原始表格数据,生成商品记录
// 支持: CSV（逗号 / 制表符）
// ==========================================

// 模块声明
pub mod csv_extractor;
pub mod extractor_trait;
pub mod line_parser;

// 重导出核心类型
pub use csv_extractor::CsvProductExtractor;
pub use extractor_trait::{Extraction, ProductExtractor, RowDiagnostic};
pub use line_parser::{header_matches, parse_product_line, split_fields};
