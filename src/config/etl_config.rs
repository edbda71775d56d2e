// ==========================================
// 商品数据 ETL 管道 - 运行配置
// ==========================================
// 存储: JSON 文件（可选）+ 环境变量覆写
// 默认值: 与标准业务规则一致,无配置文件也可运行
// ==========================================

use crate::engine::strategy::{CategoryProfile, PricingProfile};
use crate::engine::{StandardCategoryRule, StandardPricingRule};
use crate::error::{EtlError, EtlResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 配置键（用于错误提示与环境变量）
pub mod config_keys {
    pub const SOURCE_PATH: &str = "source_path";
    pub const DESTINATION_PATH: &str = "destination_path";
    pub const DISCOUNT_CATEGORY: &str = "pricing.discount_category";
    pub const DISCOUNT_MULTIPLIER: &str = "pricing.discount_multiplier";
    pub const SOURCE_CATEGORY: &str = "categorization.source_category";
    pub const PREMIUM_THRESHOLD: &str = "categorization.premium_threshold";
    pub const PREMIUM_LABEL: &str = "categorization.premium_label";

    pub const ENV_SOURCE: &str = "PRODUCT_ETL_SOURCE";
    pub const ENV_DESTINATION: &str = "PRODUCT_ETL_DESTINATION";
}

pub const DEFAULT_SOURCE_PATH: &str = "data/products.csv";
pub const DEFAULT_DESTINATION_PATH: &str = "data/transformed_products.csv";

// ==========================================
// EtlConfig - 运行配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtlConfig {
    /// 输入文件路径
    #[serde(default = "default_source_path")]
    pub source_path: PathBuf,

    /// 输出文件路径
    #[serde(default = "default_destination_path")]
    pub destination_path: PathBuf,

    /// 定价规则配置
    #[serde(default)]
    pub pricing: PricingConfig,

    /// 重分类规则配置
    #[serde(default)]
    pub categorization: CategorizationConfig,
}

fn default_source_path() -> PathBuf {
    PathBuf::from(DEFAULT_SOURCE_PATH)
}

fn default_destination_path() -> PathBuf {
    PathBuf::from(DEFAULT_DESTINATION_PATH)
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            source_path: default_source_path(),
            destination_path: default_destination_path(),
            pricing: PricingConfig::default(),
            categorization: CategorizationConfig::default(),
        }
    }
}

impl EtlConfig {
    /// 从 JSON 文件加载配置并校验
    ///
    /// # 参数
    /// - path: 配置文件路径
    ///
    /// # 返回
    /// - Ok(EtlConfig): 缺省字段使用默认值
    /// - Err(ConfigReadError): 文件读取/解析失败
    /// - Err(ConfigValueError): 取值非法
    pub fn load<P: AsRef<Path>>(path: P) -> EtlResult<Self> {
        let path = path.as_ref();
        info!(config_path = %path.display(), "加载配置文件");

        let content = std::fs::read_to_string(path).map_err(|e| EtlError::ConfigReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: EtlConfig =
            serde_json::from_str(&content).map_err(|e| EtlError::ConfigReadError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        config.validate()?;
        debug!(?config, "配置加载完成");
        Ok(config)
    }

    /// 应用环境变量覆写（PRODUCT_ETL_SOURCE / PRODUCT_ETL_DESTINATION）
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// 按变量名查找覆写值,空白值忽略
    ///
    /// # 参数
    /// - lookup: 变量名 → 取值（进程环境或测试用映射）
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(source) = lookup(config_keys::ENV_SOURCE) {
            if !source.trim().is_empty() {
                debug!(source = %source, "环境变量覆写输入路径");
                self.source_path = PathBuf::from(source);
            }
        }
        if let Some(destination) = lookup(config_keys::ENV_DESTINATION) {
            if !destination.trim().is_empty() {
                debug!(destination = %destination, "环境变量覆写输出路径");
                self.destination_path = PathBuf::from(destination);
            }
        }
        self
    }

    /// 校验配置取值
    pub fn validate(&self) -> EtlResult<()> {
        if self.source_path.as_os_str().is_empty() {
            return Err(value_error(config_keys::SOURCE_PATH, "", "路径不能为空"));
        }
        if self.destination_path.as_os_str().is_empty() {
            return Err(value_error(config_keys::DESTINATION_PATH, "", "路径不能为空"));
        }
        self.pricing.validate()?;
        self.categorization.validate()?;
        Ok(())
    }
}

// ==========================================
// PricingConfig - 定价规则配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default)]
    pub profile: PricingProfile,

    /// 享受折扣的品类（忽略大小写）
    #[serde(default = "default_discount_category")]
    pub discount_category: String,

    /// 折扣系数（JSON 中写为十进制字符串,如 "0.9"）
    #[serde(
        default = "default_discount_multiplier",
        with = "rust_decimal::serde::str"
    )]
    pub discount_multiplier: Decimal,
}

fn default_discount_category() -> String {
    StandardPricingRule::DEFAULT_CATEGORY.to_string()
}

fn default_discount_multiplier() -> Decimal {
    StandardPricingRule::DEFAULT_MULTIPLIER
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            profile: PricingProfile::default(),
            discount_category: default_discount_category(),
            discount_multiplier: default_discount_multiplier(),
        }
    }
}

impl PricingConfig {
    /// 折扣系数,取值范围 (0, 1]
    pub fn multiplier(&self) -> EtlResult<Decimal> {
        let value = self.discount_multiplier;
        if value <= Decimal::ZERO || value > Decimal::ONE {
            return Err(value_error(
                config_keys::DISCOUNT_MULTIPLIER,
                value,
                "折扣系数必须在 (0, 1] 范围内",
            ));
        }
        Ok(value)
    }

    pub fn validate(&self) -> EtlResult<()> {
        if self.discount_category.trim().is_empty() {
            return Err(value_error(config_keys::DISCOUNT_CATEGORY, "", "品类不能为空"));
        }
        self.multiplier().map(|_| ())
    }
}

// ==========================================
// CategorizationConfig - 重分类规则配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizationConfig {
    #[serde(default)]
    pub profile: CategoryProfile,

    /// 参与升级的原品类（忽略大小写）
    #[serde(default = "default_source_category")]
    pub source_category: String,

    /// 升级阈值（严格大于,JSON 中写为十进制字符串）
    #[serde(
        default = "default_premium_threshold",
        with = "rust_decimal::serde::str"
    )]
    pub premium_threshold: Decimal,

    /// 升级后的品类名称
    #[serde(default = "default_premium_label")]
    pub premium_label: String,
}

fn default_source_category() -> String {
    StandardCategoryRule::DEFAULT_SOURCE_CATEGORY.to_string()
}

fn default_premium_threshold() -> Decimal {
    StandardCategoryRule::DEFAULT_THRESHOLD
}

fn default_premium_label() -> String {
    StandardCategoryRule::DEFAULT_PREMIUM_LABEL.to_string()
}

impl Default for CategorizationConfig {
    fn default() -> Self {
        Self {
            profile: CategoryProfile::default(),
            source_category: default_source_category(),
            premium_threshold: default_premium_threshold(),
            premium_label: default_premium_label(),
        }
    }
}

impl CategorizationConfig {
    /// 升级阈值,不能为负
    pub fn threshold(&self) -> EtlResult<Decimal> {
        let value = self.premium_threshold;
        if value.is_sign_negative() {
            return Err(value_error(
                config_keys::PREMIUM_THRESHOLD,
                value,
                "阈值不能为负",
            ));
        }
        Ok(value)
    }

    pub fn validate(&self) -> EtlResult<()> {
        if self.source_category.trim().is_empty() {
            return Err(value_error(config_keys::SOURCE_CATEGORY, "", "品类不能为空"));
        }
        if self.premium_label.trim().is_empty() {
            return Err(value_error(config_keys::PREMIUM_LABEL, "", "品类不能为空"));
        }
        self.threshold().map(|_| ())
    }
}

fn value_error(key: &str, value: impl ToString, message: impl ToString) -> EtlError {
    EtlError::ConfigValueError {
        key: key.to_string(),
        value: value.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = EtlConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.source_path, PathBuf::from("data/products.csv"));
        assert_eq!(config.pricing.multiplier().unwrap(), Decimal::new(9, 1));
        assert_eq!(config.categorization.threshold().unwrap(), Decimal::new(50000, 2));
    }

    #[test]
    fn test_load_partial_json_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"source_path": "in.csv", "pricing": {{"discount_multiplier": "0.8"}}}}"#
        )
        .unwrap();

        let config = EtlConfig::load(file.path()).unwrap();
        assert_eq!(config.source_path, PathBuf::from("in.csv"));
        assert_eq!(config.destination_path, PathBuf::from(DEFAULT_DESTINATION_PATH));
        assert_eq!(config.pricing.discount_category, "Electronics");
        assert_eq!(config.pricing.multiplier().unwrap(), Decimal::new(8, 1));
        assert_eq!(config.categorization.profile, CategoryProfile::Standard);
    }

    #[test]
    fn test_non_numeric_decimal_setting_is_read_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"pricing": {{"discount_multiplier": "abc"}}}}"#).unwrap();
        let err = EtlConfig::load(file.path()).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_READ_ERROR");
    }

    #[test]
    fn test_decimal_settings_serialize_as_strings() {
        let json = serde_json::to_value(EtlConfig::default()).unwrap();
        assert_eq!(json["pricing"]["discount_multiplier"], "0.9");
        assert_eq!(json["categorization"]["premium_threshold"], "500.00");
    }

    #[test]
    fn test_load_missing_file() {
        let err = EtlConfig::load("/no/such/config.json").unwrap_err();
        assert!(matches!(err, EtlError::ConfigReadError { .. }));
    }

    #[test]
    fn test_load_malformed_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        let err = EtlConfig::load(file.path()).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_READ_ERROR");
    }

    #[test]
    fn test_invalid_multiplier_rejected() {
        let mut config = EtlConfig::default();
        config.pricing.discount_multiplier = Decimal::new(15, 1);
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            EtlError::ConfigValueError { ref key, ref value, .. }
                if key == config_keys::DISCOUNT_MULTIPLIER && value == "1.5"
        ));

        config.pricing.discount_multiplier = Decimal::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let mut config = EtlConfig::default();
        config.categorization.premium_threshold = Decimal::new(-1, 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_category_rejected() {
        let mut config = EtlConfig::default();
        config.categorization.premium_label = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
