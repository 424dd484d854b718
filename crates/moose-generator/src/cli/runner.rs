//! 命令执行器
//!
//! 把配置、存储客户端、生成器和提交器串联起来执行一次完整的生成任务。

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::generators::{GeneratorConfig, MooseGenerator};
use crate::populate::{PopulateReport, Populator};
use crate::store::{KubeApiStore, MemoryObjectStore, ObjectStore, ResourceTarget};

/// 命令执行器
pub struct CommandRunner {
    config: AppConfig,
    dry_run: bool,
}

impl CommandRunner {
    /// 创建命令执行器
    pub fn new(config: AppConfig, dry_run: bool) -> Self {
        Self { config, dry_run }
    }

    /// 根据运行模式创建存储客户端
    ///
    /// dry-run 时使用内存存储，否则连接配置中的 API Server
    pub fn build_store(&self) -> Result<Arc<dyn ObjectStore>> {
        if self.dry_run {
            info!("dry-run 模式，资源只写入内存存储");
            return Ok(Arc::new(MemoryObjectStore::new()));
        }

        let store = KubeApiStore::new(&self.config.cluster).context("创建集群客户端失败")?;
        info!(endpoint = %self.config.cluster.endpoint, "已创建集群客户端");
        Ok(Arc::new(store))
    }

    /// 生成并创建 count 头 Moose
    pub async fn run(&self, count: usize) -> Result<PopulateReport> {
        let store = self.build_store()?;
        self.run_with_store(store, count).await
    }

    /// 使用指定的存储客户端执行
    ///
    /// 每条资源创建成功后立即把回写的文档打印到 stdout
    pub async fn run_with_store(
        &self,
        store: Arc<dyn ObjectStore>,
        count: usize,
    ) -> Result<PopulateReport> {
        let target = ResourceTarget::from_config(&self.config);
        info!(
            count,
            namespace = %target.namespace,
            group = %target.group,
            version = %target.version,
            plural = %target.plural,
            "开始生成 Moose"
        );

        let generator_config =
            GeneratorConfig::from_app_config(&self.config).context("生成器配置无效")?;
        let mut generator = MooseGenerator::new(generator_config)?;
        let mooses = generator.generate(count).context("生成 Moose 失败")?;

        let populator = Populator::new(store, target);
        let result = populator
            .populate(&mooses, |document| println!("{:#}", document))
            .await;

        let report = match result {
            Ok(report) => report,
            Err(e) => {
                if e.is_retryable() {
                    warn!(code = e.code(), "失败原因为瞬时故障，可稍后重新执行");
                }
                return Err(e).context("创建 Moose 失败");
            }
        };

        println!("\nMoose 创建完成:");
        println!("{}", "-".repeat(30));
        println!("请求数量: {}", report.requested);
        println!("创建数量: {}", report.created);
        println!("命名空间: {}", populator.target().namespace);
        println!("{}", "-".repeat(30));

        Ok(report)
    }
}

// ============================================================================
// 单元测试
// ============================================================================
