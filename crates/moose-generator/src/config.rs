//! 配置管理模块
//!
//! 支持多层配置文件加载与环境变量覆盖。集群连接信息通过显式的 `ClusterConfig`
//! 传给存储客户端，不依赖运行环境中隐式解析的凭据。

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

use crate::error::{MooseError, Result};

/// 集群连接配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// API Server 地址，如 https://127.0.0.1:6443
    pub endpoint: String,
    /// Bearer token，优先于 token_file
    pub token: Option<String>,
    /// 存放 Bearer token 的文件（如 ServiceAccount token）
    pub token_file: Option<PathBuf>,
    /// 额外信任的 CA 证书（PEM）
    pub ca_cert_file: Option<PathBuf>,
    pub insecure_skip_tls_verify: bool,
    /// 资源创建所在的命名空间
    pub namespace: String,
    pub timeout_seconds: u64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://127.0.0.1:6443".to_string(),
            token: None,
            token_file: None,
            ca_cert_file: None,
            insecure_skip_tls_verify: false,
            namespace: "default".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl ClusterConfig {
    /// 解析最终使用的 Bearer token
    ///
    /// `token` 与 `token_file` 都未配置时返回 None，请求将不携带认证头
    pub fn resolve_token(&self) -> Result<Option<String>> {
        if let Some(token) = &self.token {
            return Ok(Some(token.trim().to_string()));
        }

        match &self.token_file {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|source| MooseError::Io {
                    path: path.clone(),
                    source,
                })?;
                Ok(Some(content.trim().to_string()))
            }
            None => Ok(None),
        }
    }
}

/// 目标资源类型配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    pub group: String,
    pub version: String,
    pub plural: String,
    pub kind: String,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            group: "animals.com".to_string(),
            version: "v1".to_string(),
            plural: "mooses".to_string(),
            kind: "Moose".to_string(),
        }
    }
}

impl ResourceConfig {
    /// 文档中的 apiVersion 字段，如 animals.com/v1
    pub fn api_version(&self) -> String {
        format!("{}/{}", self.group, self.version)
    }
}

/// 生成器配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// 名字首字母（单个字母，大小写不敏感）
    pub letter: String,
    /// 抽取名字的最大总次数
    pub max_name_attempts: u64,
    /// 固定随机种子，便于复现
    pub seed: Option<u64>,
    /// `nps.gov/park` 标签的取值
    pub park: String,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            letter: "M".to_string(),
            max_name_attempts: 100_000,
            seed: None,
            park: "glacier".to_string(),
        }
    }
}

impl GeneratorSettings {
    /// 校验并返回名字首字母
    pub fn designated_letter(&self) -> Result<char> {
        let mut chars = self.letter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_alphabetic() => Ok(c),
            _ => Err(MooseError::InvalidArgument {
                field: "generator.letter".to_string(),
                message: format!("必须是单个字母, 实际为 '{}'", self.letter),
            }),
        }
    }
}

/// 可观测性配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_level: String,
    /// 日志输出格式：json（结构化）或 pretty（人类可读）
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub cluster: ClusterConfig,
    pub resource: ResourceConfig,
    pub generator: GeneratorSettings,
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. 内置默认值
    /// 2. {config_dir}/default.toml
    /// 3. {config_dir}/{MOOSE_ENV}.toml（MOOSE_ENV 默认为 development）
    /// 4. 环境变量（MOOSE_ 前缀，层级用双下划线分隔，如 MOOSE_CLUSTER__ENDPOINT -> cluster.endpoint）
    pub fn load(config_dir: &Path) -> Result<Self> {
        let env = std::env::var("MOOSE_ENV").unwrap_or_else(|_| "development".to_string());

        let builder = Config::builder()
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join(format!("{}.toml", env))).required(false))
            .add_source(
                Environment::with_prefix("MOOSE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::from_builder(builder)
    }

    /// 从已组装的配置源构建并校验
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.generator.designated_letter()?;

        if self.generator.max_name_attempts == 0 {
            return Err(MooseError::InvalidArgument {
                field: "generator.max_name_attempts".to_string(),
                message: "必须大于 0".to_string(),
            });
        }

        if self.cluster.endpoint.trim().is_empty() {
            return Err(MooseError::InvalidArgument {
                field: "cluster.endpoint".to_string(),
                message: "不能为空".to_string(),
            });
        }

        if self.cluster.namespace.trim().is_empty() {
            return Err(MooseError::InvalidArgument {
                field: "cluster.namespace".to_string(),
                message: "不能为空".to_string(),
            });
        }

        match self.observability.log_format.as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(MooseError::InvalidArgument {
                field: "observability.log_format".to_string(),
                message: format!("仅支持 pretty 或 json, 实际为 '{}'", other),
            }),
        }
    }
}
