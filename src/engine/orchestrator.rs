// ==========================================
// 商品数据 ETL 管道 - 流程编排器
// ==========================================
// 状态机: START → EXTRACT → EMPTY-CHECK → TRANSFORM → LOAD → SUMMARY → END
// 失败出口: EXTRACT / LOAD 出错直接终止,不重试
// 空数据: 抽取结果为 0 条时跳过转换与加载,不写输出文件
// ==========================================

use crate::config::EtlConfig;
use crate::engine::transformer::{ProductTransformer, StandardProductTransformer};
use crate::error::EtlResult;
use crate::extractor::{CsvProductExtractor, ProductExtractor};
use crate::loader::{CsvProductLoader, ProductLoader};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// RunSummary - 运行汇总
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: String,
    pub source_path: String,
    pub destination_path: String,

    // 行数统计
    pub rows_read: usize,        // 有效记录数
    pub rows_transformed: usize, // 转换后记录数
    pub rows_skipped: usize,     // 无效行数
    pub blank_lines: usize,      // 空白行数

    pub header_matched: bool,
    pub output_written: bool, // 空数据时为 false

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    /// 通过 tracing 输出汇总
    pub fn log(&self) {
        info!(
            run_id = %self.run_id,
            rows_read = self.rows_read,
            rows_transformed = self.rows_transformed,
            rows_skipped = self.rows_skipped,
            blank_lines = self.blank_lines,
            destination = %self.destination_path,
            output_written = self.output_written,
            "ETL 运行汇总"
        );
        if self.rows_read == 0 {
            warn!("输入文件只有表头,或所有数据行均无效");
        }
    }
}

// ==========================================
// EtlOrchestrator - 流程编排器
// ==========================================
pub struct EtlOrchestrator {
    extractor: Box<dyn ProductExtractor>,
    transformer: Box<dyn ProductTransformer>,
    loader: Box<dyn ProductLoader>,
}

impl EtlOrchestrator {
    /// 创建编排器（依赖注入）
    ///
    /// # 参数
    /// - extractor: 抽取器
    /// - transformer: 转换器
    /// - loader: 加载器
    pub fn new(
        extractor: Box<dyn ProductExtractor>,
        transformer: Box<dyn ProductTransformer>,
        loader: Box<dyn ProductLoader>,
    ) -> Self {
        Self {
            extractor,
            transformer,
            loader,
        }
    }

    /// 按配置组装标准实现（CSV 抽取 + 配置指定的规则 + CSV 加载）
    pub fn standard(config: &EtlConfig) -> EtlResult<Self> {
        let pricing = config.pricing.profile.build(&config.pricing)?;
        let categorization = config
            .categorization
            .profile
            .build(&config.categorization)?;

        info!(
            pricing = pricing.name(),
            categorization = categorization.name(),
            "组装标准 ETL 流程"
        );

        Ok(Self::new(
            Box::new(CsvProductExtractor::new()),
            Box::new(StandardProductTransformer::new(pricing, categorization)),
            Box::new(CsvProductLoader::new()),
        ))
    }

    /// 执行一次完整的 ETL 流程
    ///
    /// # 参数
    /// - source: 输入文件路径
    /// - destination: 输出文件路径
    ///
    /// # 返回
    /// - Ok(RunSummary): 运行成功（包括 0 条数据的情况）
    /// - Err: 抽取或加载失败
    #[instrument(skip(self, source, destination), fields(run_id))]
    pub fn run(&self, source: &Path, destination: &Path) -> EtlResult<RunSummary> {
        let started_at = Utc::now();
        let run_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("run_id", run_id.as_str());

        info!(
            source = %source.display(),
            destination = %destination.display(),
            "开始执行 ETL 流程"
        );

        // ==========================================
        // 步骤1: 抽取
        // ==========================================
        debug!("步骤1: 抽取");
        let extraction = self.extractor.extract(source).map_err(|e| {
            error!(error = %e, code = e.error_code(), "抽取失败");
            e
        })?;

        let mut summary = RunSummary {
            run_id,
            source_path: source.display().to_string(),
            destination_path: destination.display().to_string(),
            rows_read: extraction.records.len(),
            rows_transformed: 0,
            rows_skipped: extraction.skipped_rows,
            blank_lines: extraction.blank_lines,
            header_matched: extraction.header_matched,
            output_written: false,
            started_at,
            finished_at: started_at,
        };

        // ==========================================
        // 空数据检查
        // ==========================================
        if extraction.is_empty() {
            warn!("输入文件没有有效数据行,跳过转换与加载");
            summary.finished_at = Utc::now();
            return Ok(summary);
        }

        // ==========================================
        // 步骤2: 转换
        // ==========================================
        debug!("步骤2: 转换");
        let transformed = self.transformer.transform(&extraction.records);
        summary.rows_transformed = transformed.len();

        // ==========================================
        // 步骤3: 加载
        // ==========================================
        debug!("步骤3: 加载");
        self.loader.load(&transformed, destination).map_err(|e| {
            error!(error = %e, code = e.error_code(), "加载失败");
            e
        })?;
        summary.output_written = true;

        summary.finished_at = Utc::now();
        info!(
            rows_read = summary.rows_read,
            rows_transformed = summary.rows_transformed,
            "ETL 流程完成"
        );
        Ok(summary)
    }
}
