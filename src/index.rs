//! 变体索引：变体 -> 官方省名
//!
//! 每个官方名称和每个变体都以原样和小写两种形式插入。键相同的插入会覆盖先前的值，
//! 即按数据顺序后出现的省份生效；覆盖了不同省份时记录为 [`VariantConflict`]。

use crate::data::GroundTruth;
use crate::normalize::fold;
use std::collections::HashMap;
use tracing::{info, warn};

/// 索引条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantEntry {
    key: String,
    official: String,
    folded: String,
    char_len: usize,
}

impl VariantEntry {
    fn new(key: &str, official: &str) -> Self {
        Self {
            key: key.to_string(),
            official: official.to_string(),
            folded: fold(key),
            char_len: key.chars().count(),
        }
    }

    /// 插入时的原始键
    pub fn key(&self) -> &str {
        &self.key
    }

    /// 对应的官方名称
    pub fn official(&self) -> &str {
        &self.official
    }

    /// 规范化并小写后的键，用于在地址中查找
    pub fn folded(&self) -> &str {
        &self.folded
    }

    /// 原始键的字符数
    pub fn char_len(&self) -> usize {
        self.char_len
    }
}

/// 同一个键先后被两个省份认领
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantConflict {
    pub key: String,
    /// 被覆盖的省份
    pub previous: String,
    /// 最终生效的省份
    pub replacement: String,
}

/// 变体索引
#[derive(Debug, Clone, Default)]
pub struct VariantIndex {
    /// 按首次插入顺序排列
    entries: Vec<VariantEntry>,
    /// 键 -> entries 下标
    positions: HashMap<String, usize>,
    provinces: Vec<String>,
    conflicts: Vec<VariantConflict>,
}

impl VariantIndex {
    /// 从基准数据构建索引
    pub fn build(truth: &GroundTruth) -> Self {
        let mut index = Self::default();

        for entry in truth.iter() {
            if !index.provinces.contains(&entry.official) {
                index.provinces.push(entry.official.clone());
            }

            index.insert_both_cases(&entry.official, &entry.official);

            for variant in &entry.variants {
                if variant.trim().is_empty() {
                    warn!("Skipping empty variant of {:?}", entry.official);
                    continue;
                }
                index.insert_both_cases(variant, &entry.official);
            }
        }

        info!(
            "Built variant index: {} provinces, {} variants, {} conflicts",
            index.provinces.len(),
            index.entries.len(),
            index.conflicts.len()
        );

        index
    }

    fn insert_both_cases(&mut self, key: &str, official: &str) {
        self.insert(key, official);
        self.insert(&key.to_lowercase(), official);
    }

    fn insert(&mut self, key: &str, official: &str) {
        match self.positions.get(key) {
            Some(&pos) => {
                let entry = &mut self.entries[pos];
                if entry.official != official {
                    warn!(
                        "Variant {:?} claimed by both {:?} and {:?}, keeping {:?}",
                        key, entry.official, official, official
                    );
                    self.conflicts.push(VariantConflict {
                        key: key.to_string(),
                        previous: entry.official.clone(),
                        replacement: official.to_string(),
                    });
                    entry.official = official.to_string();
                }
            }
            None => {
                self.positions.insert(key.to_string(), self.entries.len());
                self.entries.push(VariantEntry::new(key, official));
            }
        }
    }

    /// 查找变体对应的官方名称（先原样，再小写）
    pub fn resolve(&self, variant: &str) -> Option<&str> {
        self.positions
            .get(variant)
            .or_else(|| self.positions.get(&variant.to_lowercase()))
            .map(|&pos| self.entries[pos].official.as_str())
    }

    /// 全部条目，按首次插入顺序
    pub fn entries(&self) -> &[VariantEntry] {
        &self.entries
    }

    /// 条目数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 官方名称，按数据顺序
    pub fn provinces(&self) -> &[String] {
        &self.provinces
    }

    /// 构建过程中发现的冲突
    pub fn conflicts(&self) -> &[VariantConflict] {
        &self.conflicts
    }
}
