//! 地址比对入口
//!
//! [`AddressComparator`] 在启动时构建一次，之后只读，显式传给需要它的调用方。

use crate::comparator::{ComparisonResult, ProvinceComparator};
use crate::config::MatcherConfig;
use crate::data::GroundTruth;
use crate::error::ConfigurationError;
use crate::index::VariantIndex;
use crate::matcher::ProvinceMatcher;
use crate::merge::MergeRelation;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 未能确定省份时的占位文本
pub const UNRESOLVED: &str = "N/A";

/// 一对地址的比对记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairRecord {
    pub index: String,
    pub address1: String,
    pub address2: String,
    /// 未确定时为 `"N/A"`
    pub province1: String,
    /// 未确定时为 `"N/A"`
    pub province2: String,
    #[serde(rename = "match")]
    pub is_match: bool,
    pub reason: String,
}

/// 地址比对器：省份提取 + 合并感知的比较
///
/// ```rust
/// use tinhthanh::AddressComparator;
///
/// let comparator = AddressComparator::embedded().unwrap();
///
/// assert_eq!(comparator.extract_province("123 Lê Lợi, TPHCM"), Some("Hồ Chí Minh"));
///
/// let result = comparator.compare_addresses("Phường 1, TP. Vũng Tàu", "Q.1, TPHCM");
/// assert!(result.is_match);
/// ```
#[derive(Debug, Clone)]
pub struct AddressComparator {
    matcher: ProvinceMatcher,
    comparator: ProvinceComparator,
}

impl AddressComparator {
    /// 使用默认参数构建
    pub fn new(truth: &GroundTruth) -> Self {
        Self::with_config(truth, MatcherConfig::default())
    }

    /// 使用自定义参数构建
    pub fn with_config(truth: &GroundTruth, config: MatcherConfig) -> Self {
        let index = VariantIndex::build(truth);
        let merges = MergeRelation::build(truth, &index, &config);
        Self {
            matcher: ProvinceMatcher::with_config(index, config),
            comparator: ProvinceComparator::new(merges),
        }
    }

    /// 从 JSON 文件加载基准数据并构建
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        Ok(Self::new(&GroundTruth::from_path(path)?))
    }

    /// 使用内嵌数据集构建
    pub fn embedded() -> Result<Self, ConfigurationError> {
        Ok(Self::new(&GroundTruth::embedded()?))
    }

    pub fn matcher(&self) -> &ProvinceMatcher {
        &self.matcher
    }

    pub fn comparator(&self) -> &ProvinceComparator {
        &self.comparator
    }

    pub fn index(&self) -> &VariantIndex {
        self.matcher.index()
    }

    pub fn merges(&self) -> &MergeRelation {
        self.comparator.merges()
    }

    /// 从地址中提取省份
    pub fn extract_province(&self, address: &str) -> Option<&str> {
        self.matcher.extract_province(address)
    }

    /// 比较两个省份
    pub fn compare_provinces(&self, prov1: Option<&str>, prov2: Option<&str>) -> ComparisonResult {
        self.comparator.compare_provinces(prov1, prov2)
    }

    /// 分别提取两个地址的省份并比较
    pub fn compare_addresses(&self, address1: &str, address2: &str) -> ComparisonResult {
        self.compare_provinces(
            self.extract_province(address1),
            self.extract_province(address2),
        )
    }

    /// 比对一对地址，生成可序列化的记录
    pub fn compare_address_pair(
        &self,
        address1: &str,
        address2: &str,
        index: impl ToString,
    ) -> PairRecord {
        let prov1 = self.extract_province(address1);
        let prov2 = self.extract_province(address2);
        let (is_match, reason) = self.compare_provinces(prov1, prov2).into_parts();

        PairRecord {
            index: index.to_string(),
            address1: address1.to_string(),
            address2: address2.to_string(),
            province1: prov1.unwrap_or(UNRESOLVED).to_string(),
            province2: prov2.unwrap_or(UNRESOLVED).to_string(),
            is_match,
            reason,
        }
    }
}
