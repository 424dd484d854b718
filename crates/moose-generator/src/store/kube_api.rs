//! Kubernetes REST API 存储客户端
//!
//! 直接调用 API Server 的自定义资源集合端点创建对象：
//! `POST {endpoint}/apis/{group}/{version}/namespaces/{namespace}/{plural}`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{ObjectStore, ResourceTarget};
use crate::config::ClusterConfig;
use crate::error::{MooseError, Result};

/// API Server 失败时返回的 Status 对象（只取用到的字段）
#[derive(Debug, Default, Deserialize)]
struct ApiStatus {
    message: Option<String>,
    reason: Option<String>,
}

/// 基于 reqwest 的 Kubernetes 存储客户端
///
/// 连接池在构造时创建，所有请求复用同一个 Client
pub struct KubeApiStore {
    client: reqwest::Client,
    endpoint: String,
}

impl KubeApiStore {
    /// 根据显式集群配置创建客户端
    pub fn new(config: &ClusterConfig) -> Result<Self> {
        let mut builder =
            reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_seconds));

        if let Some(path) = &config.ca_cert_file {
            let pem = std::fs::read(path).map_err(|source| MooseError::Io {
                path: path.clone(),
                source,
            })?;
            builder = builder.add_root_certificate(reqwest::Certificate::from_pem(&pem)?);
        }

        if config.insecure_skip_tls_verify {
            warn!(endpoint = %config.endpoint, "已关闭 TLS 证书校验");
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(token) = config.resolve_token()? {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
                MooseError::InvalidArgument {
                    field: "cluster.token".to_string(),
                    message: e.to_string(),
                }
            })?;
            value.set_sensitive(true);

            let mut headers = HeaderMap::new();
            headers.insert(AUTHORIZATION, value);
            builder = builder.default_headers(headers);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// 目标资源集合的完整 URL
    pub fn collection_url(&self, target: &ResourceTarget) -> String {
        format!("{}{}", self.endpoint, target.collection_path())
    }
}

#[async_trait]
impl ObjectStore for KubeApiStore {
    async fn create(&self, target: &ResourceTarget, document: &Value) -> Result<Value> {
        let url = self.collection_url(target);
        let name = document_name(document);

        let response = self.client.post(&url).json(document).send().await?;
        let status = response.status();

        if status.is_success() {
            debug!(url = %url, name, status = status.as_u16(), "资源已创建");
            return Ok(response.json().await?);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(url = %url, name, status = status.as_u16(), error = %e, "读取错误响应体失败");
                String::new()
            }
        };
        Err(error_for_status(status, &body, target, name))
    }
}

/// 从文档中取出 metadata.name
fn document_name(document: &Value) -> &str {
    document
        .pointer("/metadata/name")
        .and_then(Value::as_str)
        .unwrap_or("<unnamed>")
}

/// 将失败的 HTTP 状态映射为错误类型
fn error_for_status(
    status: StatusCode,
    body: &str,
    target: &ResourceTarget,
    name: &str,
) -> MooseError {
    let api_status: ApiStatus = serde_json::from_str(body).unwrap_or_default();
    let message = api_status
        .message
        .or(api_status.reason)
        .unwrap_or_else(|| body.trim().to_string());

    match status {
        StatusCode::CONFLICT => MooseError::AlreadyExists {
            kind: format!("{}.{}", target.plural, target.group),
            name: name.to_string(),
        },
        StatusCode::UNAUTHORIZED => MooseError::Unauthorized,
        StatusCode::FORBIDDEN => MooseError::Forbidden {
            operation: format!(
                "create {}.{} in namespace {}: {}",
                target.plural, target.group, target.namespace, message
            ),
        },
        StatusCode::NOT_FOUND => MooseError::NotFound {
            resource: format!(
                "{}.{}/{} in namespace {}",
                target.plural, target.group, target.version, target.namespace
            ),
        },
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            MooseError::Validation(message)
        }
        _ => MooseError::ExternalService {
            status: status.as_u16(),
            message,
        },
    }
}
