//! CLI 模块
//!
//! # 使用示例
//!
//! ```bash
//! # 向集群创建 3 头 Moose
//! generate-random-meese 3
//!
//! # 固定种子、只写内存存储
//! generate-random-meese --seed 42 --dry-run 10
//! ```

pub mod commands;
pub mod runner;

pub use commands::Cli;
pub use runner::CommandRunner;
