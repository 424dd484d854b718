//! Moose 生成器
//!
//! 批量生成名字唯一、体征随机的 Moose 资源文档。

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::{MooseError, Result};
use crate::generators::attributes::AttributeSampler;
use crate::generators::names::{FakerFirstNames, NameGenerator, NameSource};
use crate::models::MooseManifest;

/// 生成器配置
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// 名字首字母
    pub letter: char,
    /// 名字抽取次数上限
    pub max_name_attempts: u64,
    /// 随机种子，None 时从操作系统获取
    pub seed: Option<u64>,
    pub api_version: String,
    pub kind: String,
    /// `nps.gov/park` 标签值
    pub park: String,
}

impl Default for GeneratorConfig {
    /// 默认配置：首字母 M，冰川国家公园
    fn default() -> Self {
        Self {
            letter: 'M',
            max_name_attempts: 100_000,
            seed: None,
            api_version: "animals.com/v1".to_string(),
            kind: "Moose".to_string(),
            park: "glacier".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// 从应用配置构建
    pub fn from_app_config(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            letter: config.generator.designated_letter()?,
            max_name_attempts: config.generator.max_name_attempts,
            seed: config.generator.seed,
            api_version: config.resource.api_version(),
            kind: config.resource.kind.clone(),
            park: config.generator.park.clone(),
        })
    }
}

/// Moose 批量生成器
///
/// 持有自己的随机数生成器，相同种子产生完全相同的批次
pub struct MooseGenerator<S = FakerFirstNames> {
    config: GeneratorConfig,
    rng: StdRng,
    names: NameGenerator<S>,
    attributes: AttributeSampler,
}

impl MooseGenerator<FakerFirstNames> {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        Self::with_name_source(config, FakerFirstNames)
    }
}

impl<S: NameSource> MooseGenerator<S> {
    /// 使用自定义名字来源创建生成器
    pub fn with_name_source(config: GeneratorConfig, source: S) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let names = NameGenerator::with_source(source, config.letter, config.max_name_attempts);

        Ok(Self {
            rng,
            names,
            attributes: AttributeSampler::new()?,
            config,
        })
    }

    /// 生成 count 头 Moose
    ///
    /// 先凑齐唯一名字，再逐个采样体征并组装文档
    pub fn generate(&mut self, count: usize) -> Result<Vec<MooseManifest>> {
        if count == 0 {
            return Err(MooseError::InvalidArgument {
                field: "count".to_string(),
                message: "必须大于 0".to_string(),
            });
        }

        let names = self.names.generate(&mut self.rng, count)?;

        let mooses: Vec<MooseManifest> = names
            .iter()
            .map(|name| {
                let spec = self.attributes.sample(&mut self.rng);
                debug!(
                    name = %name,
                    height = spec.height,
                    weight = spec.weight,
                    antlers = spec.antlers,
                    "生成 Moose"
                );
                MooseManifest::new(
                    self.config.api_version.as_str(),
                    self.config.kind.as_str(),
                    name,
                    &self.config.park,
                    spec,
                )
            })
            .collect();

        info!(count = mooses.len(), letter = %self.config.letter, "Moose 批次生成完成");
        Ok(mooses)
    }
}
