//! Moose 资源模型
//!
//! 与 `animals.com/v1` 的 Moose CRD 对应的文档结构，序列化后即为提交给 API Server 的请求体。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 所有记录共享的公园标签键
pub const PARK_LABEL: &str = "nps.gov/park";

/// Moose 资源文档
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MooseManifest {
    pub api_version: String,
    pub kind: String,
    pub metadata: MooseMetadata,
    pub spec: MooseSpec,
}

/// 资源元数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MooseMetadata {
    /// 小写名字，同一批次内唯一
    pub name: String,
    pub labels: BTreeMap<String, String>,
}

/// Moose 的体征数据
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MooseSpec {
    /// 身高（米）
    pub height: f64,
    /// 体重（千克）
    pub weight: f64,
    /// 是否长有鹿角
    pub antlers: bool,
}

impl MooseManifest {
    /// 组装资源文档
    ///
    /// 名字在此统一转为小写，符合 Kubernetes 对象名的约束
    pub fn new(
        api_version: impl Into<String>,
        kind: impl Into<String>,
        name: &str,
        park: &str,
        spec: MooseSpec,
    ) -> Self {
        let mut labels = BTreeMap::new();
        labels.insert(PARK_LABEL.to_string(), park.to_string());

        Self {
            api_version: api_version.into(),
            kind: kind.into(),
            metadata: MooseMetadata {
                name: name.to_lowercase(),
                labels,
            },
            spec,
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// 转换为通用 JSON 文档，供存储客户端提交
    pub fn to_document(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
