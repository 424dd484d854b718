//! 名字生成
//!
//! 反复抽取随机人名，保留首字母匹配的名字直到凑满所需数量。
//! 抽取总次数有上限，名字池不足时返回明确的耗尽错误而不是无限循环。

use std::collections::BTreeMap;

use fake::Fake;
use fake::faker::name::en::FirstName;
use rand::{Rng, RngCore};
use tracing::debug;

use crate::error::{MooseError, Result};

/// 名字来源
///
/// 每次调用返回一个候选名字，是否满足首字母条件由调用方判断。
pub trait NameSource: Send + Sync {
    fn draw(&self, rng: &mut dyn RngCore) -> String;
}

/// 基于 fake 的英文名字来源
#[derive(Debug, Clone, Copy, Default)]
pub struct FakerFirstNames;

impl NameSource for FakerFirstNames {
    fn draw(&self, rng: &mut dyn RngCore) -> String {
        FirstName().fake_with_rng(rng)
    }
}

/// 固定名字池
///
/// 主要用于测试名字池耗尽的情况
#[derive(Debug, Clone, Default)]
pub struct NamePool {
    names: Vec<String>,
}

impl NamePool {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl NameSource for NamePool {
    fn draw(&self, rng: &mut dyn RngCore) -> String {
        if self.names.is_empty() {
            return String::new();
        }
        let index = rng.random_range(0..self.names.len());
        self.names[index].clone()
    }
}

/// 唯一名字生成器
///
/// 默认来源是 fake 的英文名字表，名字池有限：以 M 开头且小写后互不相同的名字
/// 大约只有 270 个。请求数量超过所选字母的名字池时，抽满 `max_attempts` 次后
/// 返回 `NameSpaceExhausted`。
pub struct NameGenerator<S = FakerFirstNames> {
    source: S,
    letter: char,
    max_attempts: u64,
}

impl NameGenerator<FakerFirstNames> {
    /// 使用 fake 名字来源创建生成器
    pub fn new(letter: char, max_attempts: u64) -> Self {
        Self::with_source(FakerFirstNames, letter, max_attempts)
    }
}

impl<S: NameSource> NameGenerator<S> {
    pub fn with_source(source: S, letter: char, max_attempts: u64) -> Self {
        Self {
            source,
            letter,
            max_attempts,
        }
    }

    /// 名字首字母是否匹配（大小写不敏感）
    pub fn matches(&self, name: &str) -> bool {
        name.chars()
            .next()
            .is_some_and(|first| first.to_lowercase().eq(self.letter.to_lowercase()))
    }

    /// 生成 count 个互不相同的名字
    ///
    /// 以小写形式去重，保证最终写入集群的名字两两不同。
    /// 返回的是原始大小写形式，按小写名排序。
    pub fn generate(&self, rng: &mut dyn RngCore, count: usize) -> Result<Vec<String>> {
        let mut names: BTreeMap<String, String> = BTreeMap::new();
        let mut attempts: u64 = 0;

        while names.len() < count {
            if attempts >= self.max_attempts {
                return Err(MooseError::NameSpaceExhausted {
                    letter: self.letter,
                    requested: count,
                    found: names.len(),
                    attempts,
                });
            }
            attempts += 1;

            let candidate = self.source.draw(rng);
            if self.matches(&candidate) {
                names.entry(candidate.to_lowercase()).or_insert(candidate);
            }
        }

        debug!(count, attempts, letter = %self.letter, "名字生成完成");
        Ok(names.into_values().collect())
    }
}
