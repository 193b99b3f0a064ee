//! 合并关系：旧省份 -> 现省份
//!
//! 只有带旧行政单位标记（"Tỉnh"、"Thành phố"、"TP"）的变体才被视为旧省份全称，
//! 缩写和无声调写法不参与。

use crate::config::MatcherConfig;
use crate::data::GroundTruth;
use crate::index::VariantIndex;
use crate::matcher::find_delimited;
use crate::normalize::fold;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// 旧省份 -> 合并后的省份
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeRelation {
    merged: BTreeMap<String, String>,
}

impl MergeRelation {
    /// 从基准数据构建合并关系
    ///
    /// 对省份 `P` 的每个旧名称 `L`，按以下顺序确定被合并的旧省份：
    /// 1. `L` 中含有 `P` 自己的官方名称：这是 `P` 的全称，不记录；
    /// 2. 索引把 `L` 解析到别的省份：取该省份；
    /// 3. `L` 中出现的最长的其他省份官方名称；
    /// 4. 以上都不成立时直接用 `L` 本身。
    pub fn build(truth: &GroundTruth, index: &VariantIndex, config: &MatcherConfig) -> Self {
        let mut merged = BTreeMap::new();

        for entry in truth.iter() {
            let new = entry.official.as_str();
            for legacy in entry.variants.iter().filter(|v| config.is_legacy_name(v)) {
                let Some(old) = resolve_legacy(legacy, new, index) else {
                    continue;
                };
                if old == new {
                    continue;
                }
                if let Some(previous) = merged.insert(old.to_string(), new.to_string()) {
                    if previous != new {
                        warn!(
                            "{:?} listed as merged into both {:?} and {:?}, keeping {:?}",
                            old, previous, new, new
                        );
                    }
                }
            }
        }

        info!("Built merge relation: {} absorbed provinces", merged.len());
        Self { merged }
    }

    /// 旧省份被合并到哪里
    pub fn merged_into(&self, old: &str) -> Option<&str> {
        self.merged.get(old).map(String::as_str)
    }

    /// 被合并到 `new` 的所有旧省份
    pub fn absorbed_by(&self, new: &str) -> Vec<&str> {
        self.merged
            .iter()
            .filter(|(_, target)| *target == new)
            .map(|(old, _)| old.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.merged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.merged.is_empty()
    }

    /// 按旧省份名排序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.merged.iter().map(|(old, new)| (old.as_str(), new.as_str()))
    }
}

/// 确定旧名称指向哪个省份，`None` 表示它就是 `claimant` 自己的全称
fn resolve_legacy<'a>(legacy: &'a str, claimant: &str, index: &'a VariantIndex) -> Option<&'a str> {
    let folded = fold(legacy);

    if find_delimited(&folded, &fold(claimant)).is_some() {
        return None;
    }

    if let Some(official) = index.resolve(legacy) {
        if official != claimant {
            return Some(official);
        }
    }

    // 只看官方名称；非正式变体（如城市 "Vinh"）会把 "Tỉnh Trà Vinh" 解析错
    let named = index
        .provinces()
        .iter()
        .rev()
        .filter(|p| p.as_str() != claimant)
        .filter(|p| find_delimited(&folded, &fold(p)).is_some())
        .max_by_key(|p| p.chars().count());

    Some(named.map_or(legacy, |p| p.as_str()))
}
