//! 批量提交
//!
//! 按生成顺序逐条把 Moose 文档提交到对象存储。
//! 任一条失败即停止，不做重试，返回的错误携带已成功创建的数量。

use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info};

use crate::error::{MooseError, Result};
use crate::models::MooseManifest;
use crate::store::{ObjectStore, ResourceTarget};

/// 逐条提交器
pub struct Populator {
    store: Arc<dyn ObjectStore>,
    target: ResourceTarget,
}

impl Populator {
    pub fn new(store: Arc<dyn ObjectStore>, target: ResourceTarget) -> Self {
        Self { store, target }
    }

    pub fn target(&self) -> &ResourceTarget {
        &self.target
    }

    /// 提交单个文档，返回存储端回写的文档
    pub async fn submit(&self, moose: &MooseManifest) -> Result<Value> {
        let document = moose.to_document()?;
        self.store.create(&self.target, &document).await
    }

    /// 顺序提交全部文档
    ///
    /// 每成功一条即调用 `on_created`，便于调用方实时输出。
    /// 遇到第一条失败立即返回 `MooseError::Aborted`。
    pub async fn populate<F>(
        &self,
        mooses: &[MooseManifest],
        mut on_created: F,
    ) -> Result<PopulateReport>
    where
        F: FnMut(&Value),
    {
        let total = mooses.len();
        let mut stored = Vec::with_capacity(total);

        for moose in mooses {
            match self.submit(moose).await {
                Ok(document) => {
                    info!(
                        name = moose.name(),
                        namespace = %self.target.namespace,
                        created = stored.len() + 1,
                        total,
                        "Moose 已创建"
                    );
                    on_created(&document);
                    stored.push(document);
                }
                Err(e) => {
                    error!(
                        name = moose.name(),
                        code = e.code(),
                        retryable = e.is_retryable(),
                        created = stored.len(),
                        total,
                        "Moose 创建失败，停止提交: {}",
                        e
                    );
                    return Err(MooseError::Aborted {
                        created: stored.len(),
                        total,
                        name: moose.name().to_string(),
                        source: Box::new(e),
                    });
                }
            }
        }

        Ok(PopulateReport {
            requested: total,
            created: stored.len(),
            stored,
        })
    }
}

/// 提交结果
#[derive(Debug, Clone)]
pub struct PopulateReport {
    /// 请求创建的数量
    pub requested: usize,
    /// 成功创建的数量
    pub created: usize,
    /// 存储端回写的文档
    pub stored: Vec<Value>,
}

impl PopulateReport {
    /// 是否全部创建成功
    pub fn is_complete(&self) -> bool {
        self.created == self.requested
    }
}
