//! CLI 命令定义
//!
//! 使用 clap derive 宏定义命令行接口结构。唯一的位置参数是要生成的数量，
//! 其余均为可选的全局参数。

use std::path::PathBuf;

use clap::Parser;

use crate::config::AppConfig;

/// 随机 Moose 生成工具
///
/// 生成指定数量、名字以 M 开头的 Moose 资源并逐个创建到集群中。
#[derive(Parser, Debug)]
#[command(name = "generate-random-meese")]
#[command(version, about = "向集群批量创建随机 Moose 资源")]
pub struct Cli {
    /// 要生成的 Moose 数量
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub count: u32,

    /// 日志级别 (trace, debug, info, warn, error)，覆盖配置文件
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// 配置文件目录
    #[arg(short, long, default_value = "config")]
    pub config_dir: PathBuf,

    /// 随机种子，相同种子生成相同的批次
    #[arg(long)]
    pub seed: Option<u64>,

    /// 只写入内存存储，不连接集群
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// 用命令行参数覆盖配置
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
        if let Some(seed) = self.seed {
            config.generator.seed = Some(seed);
        }
    }
}

// ============================================================================
// 单元测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_count_only() {
        let cli = Cli::parse_from(["generate-random-meese", "3"]);

        assert_eq!(cli.count, 3);
        assert!(cli.log_level.is_none());
        assert_eq!(cli.config_dir, PathBuf::from("config"));
        assert!(cli.seed.is_none());
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_cli_parse_all_options() {
        let cli = Cli::parse_from([
            "generate-random-meese",
            "--log-level",
            "debug",
            "-c",
            "/etc/moose",
            "--seed",
            "42",
            "--dry-run",
            "10",
        ]);

        assert_eq!(cli.count, 10);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.config_dir, PathBuf::from("/etc/moose"));
        assert_eq!(cli.seed, Some(42));
        assert!(cli.dry_run);
    }

    #[test]
    fn test_cli_rejects_missing_or_invalid_count() {
        assert!(Cli::try_parse_from(["generate-random-meese"]).is_err());
        assert!(Cli::try_parse_from(["generate-random-meese", "0"]).is_err());
        assert!(Cli::try_parse_from(["generate-random-meese", "-1"]).is_err());
        assert!(Cli::try_parse_from(["generate-random-meese", "many"]).is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let cli = Cli::parse_from(["generate-random-meese", "-l", "warn", "--seed", "7", "5"]);
        let mut config = AppConfig::default();

        cli.apply_overrides(&mut config);

        assert_eq!(config.observability.log_level, "warn");
        assert_eq!(config.generator.seed, Some(7));
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let cli = Cli::parse_from(["generate-random-meese", "5"]);
        let mut config = AppConfig::default();
        config.generator.seed = Some(99);

        cli.apply_overrides(&mut config);

        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.generator.seed, Some(99));
    }
}
