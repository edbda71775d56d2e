// ==========================================
// 商品数据 ETL 管道 - CSV 加载器实现
// ==========================================
// 输出: 逗号分隔,表头 ProductID,Name,Price,Category,PriceRange
//       价格固定两位小数,"\n" 行尾,最后一行同样换行
// 红线: 覆盖写（不追加）,父目录不存在时自动创建
// ==========================================

use crate::domain::Product;
use crate::error::{EtlError, EtlResult};
use csv::{Terminator, WriterBuilder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// 输出表头（按列顺序）
pub const OUTPUT_HEADER: [&str; 5] = ["ProductID", "Name", "Price", "Category", "PriceRange"];

// ==========================================
// ProductLoader Trait
// ==========================================
// 实现者: CsvProductLoader
pub trait ProductLoader: Send + Sync {
    /// 将商品记录写入目标位置
    ///
    /// # 参数
    /// - records: 已转换的商品记录
    /// - destination: 目标文件路径
    ///
    /// # 返回
    /// - Ok(()): 写入成功
    /// - Err(DestinationUnwritable): 目录无法创建 / 文件无法打开或写入
    fn load(&self, records: &[Product], destination: &Path) -> EtlResult<()>;
}

// ==========================================
// CsvProductLoader
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvProductLoader;

impl CsvProductLoader {
    pub fn new() -> Self {
        Self
    }

    /// 将记录序列化到任意写出端
    pub fn write_records<W: Write>(&self, writer: W, records: &[Product]) -> csv::Result<()> {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(writer);

        writer.write_record(OUTPUT_HEADER)?;
        for product in records {
            let id = product.id.to_string();
            let price = product.formatted_price();
            writer.write_record([
                id.as_str(),
                product.name.as_str(),
                price.as_str(),
                product.category.as_str(),
                product.price_range_label(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }

    /// 确保父目录存在
    fn ensure_parent_dir(&self, destination: &Path) -> EtlResult<()> {
        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!(dir = %parent.display(), "创建输出目录");
                std::fs::create_dir_all(parent)
                    .map_err(|e| EtlError::destination(destination.display().to_string(), e))?;
            }
        }
        Ok(())
    }
}

impl ProductLoader for CsvProductLoader {
    fn load(&self, records: &[Product], destination: &Path) -> EtlResult<()> {
        self.ensure_parent_dir(destination)?;

        let path_str = destination.display().to_string();
        let file = File::create(destination).map_err(|e| EtlError::destination(&path_str, e))?;

        let mut buffered = BufWriter::new(file);
        self.write_records(&mut buffered, records)
            .map_err(|e| EtlError::destination(&path_str, e))?;
        buffered
            .flush()
            .map_err(|e| EtlError::destination(&path_str, e))?;

        let absolute = std::fs::canonicalize(destination).unwrap_or_else(|_| destination.to_path_buf());
        info!(
            destination = %absolute.display(),
            rows = records.len(),
            "转换结果已写入"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceRange;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tempfile::TempDir;

    fn transformed(id: i64, name: &str, price: &str, category: &str, range: PriceRange) -> Product {
        let mut p = Product::new(id, name, Decimal::from_str(price).unwrap(), category);
        p.price_range = Some(range);
        p
    }

    fn render(records: &[Product]) -> String {
        let mut buf = Vec::new();
        CsvProductLoader::new().write_records(&mut buf, records).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_records_format() {
        let records = vec![
            transformed(1, "WIDGET", "45", "Electronics", PriceRange::Medium),
            transformed(2, "GIZMO", "540.00", "Premium Electronics", PriceRange::Premium),
        ];
        assert_eq!(
            render(&records),
            "ProductID,Name,Price,Category,PriceRange\n\
             1,WIDGET,45.00,Electronics,Medium\n\
             2,GIZMO,540.00,Premium Electronics,Premium\n"
        );
    }

    #[test]
    fn test_write_header_only() {
        assert_eq!(render(&[]), "ProductID,Name,Price,Category,PriceRange\n");
    }

    #[test]
    fn test_field_with_comma_is_quoted() {
        let records = vec![transformed(7, "DESK, OAK", "120", "Furniture", PriceRange::High)];
        assert!(render(&records).contains("7,\"DESK, OAK\",120.00,Furniture,High\n"));
    }

    #[test]
    fn test_load_creates_parent_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("nested").join("out.csv");
        let loader = CsvProductLoader::new();

        let first = vec![
            transformed(1, "A", "1", "X", PriceRange::Low),
            transformed(2, "B", "2", "X", PriceRange::Low),
        ];
        loader.load(&first, &dest).unwrap();

        let second = vec![transformed(3, "C", "3", "X", PriceRange::Low)];
        loader.load(&second, &dest).unwrap();

        let content = std::fs::read_to_string(&dest).unwrap();
        assert_eq!(content, "ProductID,Name,Price,Category,PriceRange\n3,C,3.00,X,Low\n");
    }

    #[test]
    fn test_load_unwritable_destination() {
        let dir = TempDir::new().unwrap();
        // 目标路径本身是目录,无法作为文件打开
        let err = CsvProductLoader::new().load(&[], dir.path()).unwrap_err();
        assert!(matches!(err, EtlError::DestinationUnwritable { .. }));
    }
}
