// ==========================================
// 商品数据 ETL 管道 - 错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分层: EtlError 终止本次运行; RowRejection 仅丢弃单行
// ==========================================

use thiserror::Error;

/// ETL 运行级错误类型（致命,向调用方传播）
#[derive(Error, Debug)]
pub enum EtlError {
    // ===== 数据源错误 =====
    #[error("输入文件不存在: {0}")]
    SourceNotFound(String),

    #[error("输入文件为空: {0}")]
    SourceEmpty(String),

    #[error("输入文件读取失败: {0}")]
    SourceReadError(String),

    // ===== 输出错误 =====
    #[error("输出文件不可写 ({path}): {message}")]
    DestinationUnwritable { path: String, message: String },

    // ===== 配置错误 =====
    #[error("配置读取失败 ({path}): {message}")]
    ConfigReadError { path: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EtlError {
    /// 稳定的错误码（供日志/退出码映射使用）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SourceNotFound(_) => "SOURCE_NOT_FOUND",
            Self::SourceEmpty(_) => "SOURCE_EMPTY",
            Self::SourceReadError(_) => "SOURCE_READ_ERROR",
            Self::DestinationUnwritable { .. } => "DESTINATION_UNWRITABLE",
            Self::ConfigReadError { .. } => "CONFIG_READ_ERROR",
            Self::ConfigValueError { .. } => "CONFIG_VALUE_ERROR",
            Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// 构造输出不可写错误
    pub fn destination(path: impl Into<String>, message: impl ToString) -> Self {
        EtlError::DestinationUnwritable {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

// 实现 From<std::io::Error>（读取阶段的兜底映射）
impl From<std::io::Error> for EtlError {
    fn from(err: std::io::Error) -> Self {
        EtlError::SourceReadError(err.to_string())
    }
}

/// 单行拒收原因（非致命,计入 skipped_rows）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowRejection {
    #[error("列数不足: 期望至少 4 列,实际 {found} 列")]
    InsufficientColumns { found: usize },

    #[error("商品编号不是整数: {value:?}")]
    InvalidId { value: String },

    #[error("价格不是合法数字: {value:?}")]
    InvalidPrice { value: String },
}

impl RowRejection {
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::InsufficientColumns { .. } => "INSUFFICIENT_COLUMNS",
            Self::InvalidId { .. } => "INVALID_ID",
            Self::InvalidPrice { .. } => "INVALID_PRICE",
        }
    }
}

/// Result 类型别名
pub type EtlResult<T> = Result<T, EtlError>;
