// ==========================================
// 商品数据 ETL 管道 - 命令行入口
// ==========================================
// 职责: 解析参数 → 加载配置 → 执行 ETL → 输出汇总 / 退出码
// ==========================================

use anyhow::{Context, Result};
use clap::Parser;
use product_etl::config::EtlConfig;
use product_etl::engine::{CategoryProfile, EtlOrchestrator, PricingProfile};
use product_etl::logging;
use std::path::PathBuf;

/// 商品数据 ETL: 读取商品 CSV,应用业务规则后写出新的 CSV
#[derive(Parser, Debug)]
#[command(name = "product-etl", version, about)]
struct Cli {
    /// 输入文件路径（默认 data/products.csv）
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// 输出文件路径（默认 data/transformed_products.csv）
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON 配置文件路径
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 定价规则: standard | no_discount（覆盖配置文件）
    #[arg(long)]
    pricing: Option<PricingProfile>,

    /// 重分类规则: standard | passthrough（覆盖配置文件）
    #[arg(long)]
    categorization: Option<CategoryProfile>,

    /// 以 JSON 格式输出日志
    #[arg(long)]
    json_logs: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.json_logs);

    tracing::info!("==================================================");
    tracing::info!("{} v{}", product_etl::APP_NAME, product_etl::VERSION);
    tracing::info!("==================================================");

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "ETL 运行失败");
        eprintln!("ERROR: {:#}", e);
        eprintln!("请确认输入文件存在,且表头为: ProductID,Name,Price,Category");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => EtlConfig::load(path).context("加载配置失败")?,
        None => EtlConfig::default(),
    }
    .with_env_overrides();

    // 命令行参数优先级最高
    if let Some(input) = cli.input {
        config.source_path = input;
    }
    if let Some(output) = cli.output {
        config.destination_path = output;
    }
    if let Some(pricing) = cli.pricing {
        config.pricing.profile = pricing;
    }
    if let Some(categorization) = cli.categorization {
        config.categorization.profile = categorization;
    }
    tracing::info!(
        pricing = config.pricing.profile.as_str(),
        categorization = config.categorization.profile.as_str(),
        "规则组合"
    );
    config.validate().context("配置校验失败")?;

    let orchestrator = EtlOrchestrator::standard(&config).context("组装 ETL 流程失败")?;
    let summary = orchestrator
        .run(&config.source_path, &config.destination_path)
        .with_context(|| format!("处理 {} 失败", config.source_path.display()))?;

    summary.log();
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
