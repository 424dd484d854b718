//! 内存对象存储
//!
//! 使用 DashMap 模拟 API Server 的创建语义，用于 dry-run 和测试。

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::Value;
use uuid::Uuid;

use super::{ObjectStore, ResourceTarget};
use crate::error::{MooseError, Result};

/// 内存对象存储
///
/// 按 namespace/group/version/plural/name 作为 key 存放文档。
/// 重复创建同名对象时返回 `AlreadyExists`，与 API Server 行为一致。
#[derive(Debug, Clone, Default)]
pub struct MemoryObjectStore {
    data: Arc<DashMap<String, Value>>,
    resource_version: Arc<AtomicU64>,
}

impl MemoryObjectStore {
    /// 创建空存储
    pub fn new() -> Self {
        Self::default()
    }

    fn key(target: &ResourceTarget, name: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            target.namespace, target.group, target.version, target.plural, name
        )
    }

    /// 获取已存储的文档
    pub fn get(&self, target: &ResourceTarget, name: &str) -> Option<Value> {
        self.data
            .get(&Self::key(target, name))
            .map(|v| v.value().clone())
    }

    /// 检查是否存在同名对象
    pub fn contains(&self, target: &ResourceTarget, name: &str) -> bool {
        self.data.contains_key(&Self::key(target, name))
    }

    /// 列出指定资源集合下的所有文档，按名字排序
    pub fn list(&self, target: &ResourceTarget) -> Vec<Value> {
        let prefix = Self::key(target, "");
        let mut entries: Vec<(String, Value)> = self
            .data
            .iter()
            .filter(|entry| entry.key().starts_with(&prefix))
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries.into_iter().map(|(_, v)| v).collect()
    }

    /// 获取文档总数
    pub fn count(&self) -> usize {
        self.data.len()
    }

    /// 补全 API Server 在创建时回写的元数据字段
    fn stamp(&self, target: &ResourceTarget, document: &Value) -> Result<Value> {
        let mut stored = document.clone();
        let metadata = stored
            .get_mut("metadata")
            .and_then(Value::as_object_mut)
            .ok_or_else(|| MooseError::Validation("缺少 metadata 字段".to_string()))?;

        let version = self.resource_version.fetch_add(1, Ordering::SeqCst) + 1;
        metadata.insert("namespace".to_string(), Value::from(target.namespace.clone()));
        metadata.insert("uid".to_string(), Value::from(Uuid::new_v4().to_string()));
        metadata.insert("resourceVersion".to_string(), Value::from(version.to_string()));
        metadata.insert(
            "creationTimestamp".to_string(),
            Value::from(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
        );

        Ok(stored)
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn create(&self, target: &ResourceTarget, document: &Value) -> Result<Value> {
        let name = document
            .pointer("/metadata/name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| MooseError::Validation("metadata.name 不能为空".to_string()))?;

        match self.data.entry(Self::key(target, name)) {
            Entry::Occupied(_) => Err(MooseError::AlreadyExists {
                kind: format!("{}.{}", target.plural, target.group),
                name: name.to_string(),
            }),
            Entry::Vacant(slot) => {
                let stored = self.stamp(target, document)?;
                slot.insert(stored.clone());
                Ok(stored)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn moose(name: &str) -> Value {
        json!({
            "apiVersion": "animals.com/v1",
            "kind": "Moose",
            "metadata": { "name": name, "labels": { "nps.gov/park": "glacier" } },
            "spec": { "height": 1.7, "weight": 400.0, "antlers": false }
        })
    }

    #[tokio::test]
    async fn test_create_stamps_metadata() {
        let store = MemoryObjectStore::new();
        let target = ResourceTarget::default();

        let stored = store.create(&target, &moose("maggie")).await.unwrap();

        assert_eq!(stored["metadata"]["name"], "maggie");
        assert_eq!(stored["metadata"]["namespace"], "default");
        assert_eq!(stored["metadata"]["resourceVersion"], "1");
        assert!(stored["metadata"]["uid"].as_str().is_some());
        assert!(stored["metadata"]["creationTimestamp"].as_str().unwrap().ends_with('Z'));
        assert_eq!(stored["spec"], moose("maggie")["spec"]);

        assert!(store.contains(&target, "maggie"));
        assert_eq!(store.get(&target, "maggie"), Some(stored));
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let store = MemoryObjectStore::new();
        let target = ResourceTarget::default();

        store.create(&target, &moose("milo")).await.unwrap();
        let err = store.create(&target, &moose("milo")).await.unwrap_err();

        assert_eq!(err.code(), "ALREADY_EXISTS");
        assert_eq!(store.count(), 1);
    }

    #[tokio::test]
    async fn test_same_name_in_other_namespace() {
        let store = MemoryObjectStore::new();
        let default_ns = ResourceTarget::default();
        let other_ns = ResourceTarget {
            namespace: "wildlife".to_string(),
            ..Default::default()
        };

        store.create(&default_ns, &moose("milo")).await.unwrap();
        store.create(&other_ns, &moose("milo")).await.unwrap();

        assert_eq!(store.count(), 2);
        assert_eq!(store.list(&default_ns).len(), 1);
        assert_eq!(store.list(&other_ns).len(), 1);
    }

    #[tokio::test]
    async fn test_list_sorted_by_name() {
        let store = MemoryObjectStore::new();
        let target = ResourceTarget::default();

        for name in ["morgan", "mabel", "mika"] {
            store.create(&target, &moose(name)).await.unwrap();
        }

        let names: Vec<_> = store
            .list(&target)
            .iter()
            .map(|v| v["metadata"]["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["mabel", "mika", "morgan"]);
    }

    #[tokio::test]
    async fn test_missing_name_rejected() {
        let store = MemoryObjectStore::new();
        let target = ResourceTarget::default();

        let err = store
            .create(&target, &json!({ "metadata": {} }))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(store.count(), 0);
    }
}
