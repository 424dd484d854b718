//! Moose Generator CLI
//!
//! 生成指定数量的随机 Moose 并逐个创建到集群中。

use anyhow::Context;
use clap::Parser;
use moose_generator::cli::{Cli, CommandRunner};
use moose_generator::config::AppConfig;
use moose_generator::observability;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config_dir)
        .with_context(|| format!("加载配置失败: {}", cli.config_dir.display()))?;
    cli.apply_overrides(&mut config);

    // 初始化 tracing 日志
    // 优先使用环境变量 RUST_LOG，否则使用配置或命令行参数指定的级别
    observability::init(&config.observability)?;

    let runner = CommandRunner::new(config, cli.dry_run);
    runner.run(cli.count as usize).await?;

    Ok(())
}
