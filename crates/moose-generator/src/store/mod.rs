//! 对象存储客户端模块
//!
//! 定义按 namespace/group/version/plural 寻址的对象存储接口，以及两种实现：
//!
//! - `kube_api`: 通过 Kubernetes REST API 创建自定义资源
//! - `memory_store`: 内存实现，用于 dry-run 和测试

mod kube_api;
mod memory_store;

pub use kube_api::KubeApiStore;
pub use memory_store::MemoryObjectStore;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::Result;

/// 资源寻址信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTarget {
    pub namespace: String,
    pub group: String,
    pub version: String,
    pub plural: String,
}

impl Default for ResourceTarget {
    fn default() -> Self {
        Self {
            namespace: "default".to_string(),
            group: "animals.com".to_string(),
            version: "v1".to_string(),
            plural: "mooses".to_string(),
        }
    }
}

impl ResourceTarget {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            namespace: config.cluster.namespace.clone(),
            group: config.resource.group.clone(),
            version: config.resource.version.clone(),
            plural: config.resource.plural.clone(),
        }
    }

    /// 命名空间级集合路径，如 /apis/animals.com/v1/namespaces/default/mooses
    pub fn collection_path(&self) -> String {
        format!(
            "/apis/{}/{}/namespaces/{}/{}",
            self.group, self.version, self.namespace, self.plural
        )
    }
}

/// 对象存储接口
///
/// 创建成功时返回存储端回写的完整文档（包含 uid、resourceVersion 等）
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn create(&self, target: &ResourceTarget, document: &Value) -> Result<Value>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_target() {
        let target = ResourceTarget::default();
        assert_eq!(target.namespace, "default");
        assert_eq!(target.group, "animals.com");
        assert_eq!(target.version, "v1");
        assert_eq!(target.plural, "mooses");
    }

    #[test]
    fn test_collection_path() {
        let target = ResourceTarget::default();
        assert_eq!(
            target.collection_path(),
            "/apis/animals.com/v1/namespaces/default/mooses"
        );
    }

    #[test]
    fn test_from_config() {
        let mut config = AppConfig::default();
        config.cluster.namespace = "wildlife".to_string();

        let target = ResourceTarget::from_config(&config);
        assert_eq!(target.namespace, "wildlife");
        assert_eq!(target.plural, "mooses");

        let expected = ResourceTarget {
            namespace: "wildlife".to_string(),
            ..Default::default()
        };
        assert_eq!(target, expected);
    }
}
