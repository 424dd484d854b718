//! 生成器模块
//!
//! 提供唯一名字生成、体征采样以及 Moose 文档的批量组装。

pub mod attributes;
pub mod moose_generator;
pub mod names;

pub use attributes::{AttributeSampler, GaussianParams, weight_params};
pub use moose_generator::{GeneratorConfig, MooseGenerator};
pub use names::{FakerFirstNames, NameGenerator, NamePool, NameSource};
