//! Moose Generator
//!
//! 向 Kubernetes 集群批量创建随机 Moose 自定义资源（animals.com/v1），
//! 为 operator 示例准备测试数据。
//!
//! # 主要模块
//!
//! - `generators`: 唯一名字生成与体征采样
//! - `models`: Moose 资源文档
//! - `store`: 对象存储接口及其 Kubernetes / 内存实现
//! - `populate`: 顺序提交与部分进度报告
//!
//! # 使用示例
//!
//! ```rust
//! use moose_generator::generators::{GeneratorConfig, MooseGenerator};
//!
//! let config = GeneratorConfig {
//!     seed: Some(42),
//!     ..Default::default()
//! };
//! let mut generator = MooseGenerator::new(config).unwrap();
//! let mooses = generator.generate(3).unwrap();
//!
//! assert_eq!(mooses.len(), 3);
//! assert!(mooses.iter().all(|m| m.name().starts_with('m')));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod generators;
pub mod models;
pub mod observability;
pub mod populate;
pub mod store;
