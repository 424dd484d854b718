//! 统一错误处理模块
//!
//! 定义生成器、配置加载和存储客户端共用的错误类型，使用 thiserror 提供良好的错误信息。

use std::path::PathBuf;

use thiserror::Error;

/// 系统错误类型
#[derive(Debug, Error)]
pub enum MooseError {
    // ==================== 配置错误 ====================
    #[error("配置加载失败: {0}")]
    Config(#[from] config::ConfigError),

    #[error("无效的参数: {field} - {message}")]
    InvalidArgument { field: String, message: String },

    #[error("读取文件失败: {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ==================== 生成错误 ====================
    #[error(
        "名字池已耗尽: 需要 {requested} 个以 '{letter}' 开头的名字, 尝试 {attempts} 次后仅找到 {found} 个"
    )]
    NameSpaceExhausted {
        letter: char,
        requested: usize,
        found: usize,
        attempts: u64,
    },

    #[error("分布参数无效: {0}")]
    Distribution(String),

    #[error("序列化失败: {0}")]
    Serialization(#[from] serde_json::Error),

    // ==================== 存储客户端错误 ====================
    #[error("HTTP 请求失败: {0}")]
    Http(#[from] reqwest::Error),

    #[error("资源已存在: {kind} name={name}")]
    AlreadyExists { kind: String, name: String },

    #[error("资源未找到: {resource}")]
    NotFound { resource: String },

    #[error("未授权访问")]
    Unauthorized,

    #[error("权限不足: {operation}")]
    Forbidden { operation: String },

    #[error("资源校验失败: {0}")]
    Validation(String),

    #[error("外部服务错误: HTTP {status} - {message}")]
    ExternalService { status: u16, message: String },

    // ==================== 批量提交错误 ====================
    #[error("提交中止: 已创建 {created}/{total}, 在 {name} 处失败: {source}")]
    Aborted {
        created: usize,
        total: usize,
        name: String,
        #[source]
        source: Box<MooseError>,
    },
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, MooseError>;

impl MooseError {
    /// 获取错误码
    ///
    /// `Aborted` 透传导致中止的底层错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::InvalidArgument { .. } => "INVALID_ARGUMENT",
            Self::Io { .. } => "IO_ERROR",
            Self::NameSpaceExhausted { .. } => "NAME_SPACE_EXHAUSTED",
            Self::Distribution(_) => "DISTRIBUTION_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Http(_) => "HTTP_ERROR",
            Self::AlreadyExists { .. } => "ALREADY_EXISTS",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::ExternalService { .. } => "EXTERNAL_SERVICE_ERROR",
            Self::Aborted { source, .. } => source.code(),
        }
    }

    /// 是否为可重试错误
    ///
    /// 只有瞬时故障（超时、连接失败、429 限流、服务端 5xx）才值得重新执行。
    /// 本工具本身不做重试，分类结果仅用于提示操作者。
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::ExternalService { status, .. } => *status == 429 || *status >= 500,
            Self::Aborted { source, .. } => source.is_retryable(),
            _ => false,
        }
    }

    /// 中止前已成功创建的记录数
    pub fn created_before_failure(&self) -> Option<usize> {
        match self {
            Self::Aborted { created, .. } => Some(*created),
            _ => None,
        }
    }
}
