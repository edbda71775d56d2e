// ==========================================
// 商品数据 ETL 管道 - 加载层
// ==========================================
// 职责: 将转换结果序列化为 CSV 文件
// ==========================================

pub mod csv_loader;

pub use csv_loader::{CsvProductLoader, ProductLoader, OUTPUT_HEADER};
