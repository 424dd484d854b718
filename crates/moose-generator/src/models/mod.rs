//! 数据模型模块
//!
//! 定义提交到集群的 Moose 资源文档。

pub mod moose;

pub use moose::{MooseManifest, MooseMetadata, MooseSpec, PARK_LABEL};
