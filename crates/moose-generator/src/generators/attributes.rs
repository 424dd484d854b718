//! 体征属性采样
//!
//! 身高服从 N(1.7, 0.1)；体重的分布参数取决于是否长有鹿角。

use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal};

use crate::error::{MooseError, Result};
use crate::models::MooseSpec;

/// 正态分布参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianParams {
    pub mean: f64,
    pub std_dev: f64,
}

impl GaussianParams {
    pub const fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    /// 构造正态分布
    ///
    /// 均值必须有限，标准差必须为正的有限值
    fn distribution(&self) -> Result<Normal<f64>> {
        let valid = self.mean.is_finite() && self.std_dev.is_finite() && self.std_dev > 0.0;
        if !valid {
            return Err(MooseError::Distribution(format!(
                "N({}, {}) 无效: 均值须有限且标准差须为正数",
                self.mean, self.std_dev
            )));
        }
        Normal::new(self.mean, self.std_dev).map_err(|e| {
            MooseError::Distribution(format!(
                "N({}, {}) 无效: {}",
                self.mean, self.std_dev, e
            ))
        })
    }
}

/// 身高（米）
pub const HEIGHT: GaussianParams = GaussianParams::new(1.7, 0.1);
/// 有鹿角个体的体重（千克）
pub const ANTLERED_WEIGHT: GaussianParams = GaussianParams::new(540.0, 53.0);
/// 无鹿角个体的体重（千克）
pub const ANTLERLESS_WEIGHT: GaussianParams = GaussianParams::new(345.0, 48.0);

/// 根据是否长有鹿角选择体重分布
pub fn weight_params(antlers: bool) -> GaussianParams {
    if antlers {
        ANTLERED_WEIGHT
    } else {
        ANTLERLESS_WEIGHT
    }
}

/// 属性采样器
#[derive(Debug, Clone)]
pub struct AttributeSampler {
    height: Normal<f64>,
    antlered_weight: Normal<f64>,
    antlerless_weight: Normal<f64>,
}

impl AttributeSampler {
    pub fn new() -> Result<Self> {
        Ok(Self {
            height: HEIGHT.distribution()?,
            antlered_weight: ANTLERED_WEIGHT.distribution()?,
            antlerless_weight: ANTLERLESS_WEIGHT.distribution()?,
        })
    }

    /// 采样一头 Moose 的体征
    ///
    /// 先抛硬币决定鹿角，再按鹿角选择体重分布
    pub fn sample(&self, rng: &mut dyn RngCore) -> MooseSpec {
        let antlers = rng.random_bool(0.5);
        let height = self.height.sample(rng);
        let weight = self.sample_weight(rng, antlers);

        MooseSpec {
            height,
            weight,
            antlers,
        }
    }

    pub fn sample_height(&self, rng: &mut dyn RngCore) -> f64 {
        self.height.sample(rng)
    }

    pub fn sample_weight(&self, rng: &mut dyn RngCore, antlers: bool) -> f64 {
        if antlers {
            self.antlered_weight.sample(rng)
        } else {
            self.antlerless_weight.sample(rng)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const DRAWS: usize = 20_000;

    fn mean_and_std(values: &[f64]) -> (f64, f64) {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        (mean, variance.sqrt())
    }

    #[test]
    fn test_weight_params_follow_antlers() {
        assert_eq!(weight_params(true), GaussianParams::new(540.0, 53.0));
        assert_eq!(weight_params(false), GaussianParams::new(345.0, 48.0));
    }

    #[test]
    fn test_invalid_params_rejected() {
        for std_dev in [-1.0, 0.0, f64::NAN, f64::INFINITY] {
            let err = GaussianParams::new(1.0, std_dev).distribution().unwrap_err();
            assert_eq!(err.code(), "DISTRIBUTION_ERROR", "std_dev = {}", std_dev);
        }

        let err = GaussianParams::new(f64::NAN, 1.0).distribution().unwrap_err();
        assert_eq!(err.code(), "DISTRIBUTION_ERROR");
    }

    #[test]
    fn test_builtin_params_are_valid() {
        for params in [HEIGHT, ANTLERED_WEIGHT, ANTLERLESS_WEIGHT] {
            assert!(params.distribution().is_ok(), "{:?}", params);
        }
    }

    #[test]
    fn test_height_distribution() {
        let sampler = AttributeSampler::new().unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        let heights: Vec<f64> = (0..DRAWS).map(|_| sampler.sample_height(&mut rng)).collect();
        let (mean, std_dev) = mean_and_std(&heights);

        assert!((mean - 1.7).abs() < 0.01, "mean = {}", mean);
        assert!((std_dev - 0.1).abs() < 0.01, "std_dev = {}", std_dev);
    }

    #[test]
    fn test_antlered_weight_distribution() {
        let sampler = AttributeSampler::new().unwrap();
        let mut rng = StdRng::seed_from_u64(12);

        let weights: Vec<f64> = (0..DRAWS)
            .map(|_| sampler.sample_weight(&mut rng, true))
            .collect();
        let (mean, std_dev) = mean_and_std(&weights);

        assert!((mean - 540.0).abs() < 3.0, "mean = {}", mean);
        assert!((std_dev - 53.0).abs() < 3.0, "std_dev = {}", std_dev);
    }

    #[test]
    fn test_antlerless_weight_distribution() {
        let sampler = AttributeSampler::new().unwrap();
        let mut rng = StdRng::seed_from_u64(13);

        let weights: Vec<f64> = (0..DRAWS)
            .map(|_| sampler.sample_weight(&mut rng, false))
            .collect();
        let (mean, std_dev) = mean_and_std(&weights);

        assert!((mean - 345.0).abs() < 3.0, "mean = {}", mean);
        assert!((std_dev - 48.0).abs() < 3.0, "std_dev = {}", std_dev);
    }

    #[test]
    fn test_sample_keys_weight_on_antlers() {
        let sampler = AttributeSampler::new().unwrap();
        let mut rng = StdRng::seed_from_u64(14);

        let specs: Vec<MooseSpec> = (0..DRAWS).map(|_| sampler.sample(&mut rng)).collect();
        let antlered: Vec<f64> = specs.iter().filter(|s| s.antlers).map(|s| s.weight).collect();
        let antlerless: Vec<f64> = specs.iter().filter(|s| !s.antlers).map(|s| s.weight).collect();

        // 公平硬币：两组数量接近一半
        let ratio = antlered.len() as f64 / DRAWS as f64;
        assert!((ratio - 0.5).abs() < 0.02, "ratio = {}", ratio);

        let (antlered_mean, _) = mean_and_std(&antlered);
        let (antlerless_mean, _) = mean_and_std(&antlerless);
        assert!((antlered_mean - 540.0).abs() < 4.0);
        assert!((antlerless_mean - 345.0).abs() < 4.0);
    }
}
