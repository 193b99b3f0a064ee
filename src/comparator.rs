//! 省份比对，考虑行政区划合并

use crate::merge::MergeRelation;
use std::fmt;

/// 比对结论
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MatchReason {
    /// 至少一方没有确定省份
    Undetermined,
    /// 名称完全相同
    ExactMatch,
    /// 一方是已被合并到另一方的旧省份
    MergedInto { old: String, new: String },
    /// 双方都是被合并到同一省份的旧省份
    BothMergedInto { new: String },
    /// 不同省份
    Mismatch { left: String, right: String },
}

impl MatchReason {
    /// 是否视为同一省份
    pub fn is_match(&self) -> bool {
        !matches!(self, MatchReason::Undetermined | MatchReason::Mismatch { .. })
    }
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchReason::Undetermined => write!(f, "undetermined"),
            MatchReason::ExactMatch => write!(f, "exact match"),
            MatchReason::MergedInto { old, new } => write!(f, "{} merged into {}", old, new),
            MatchReason::BothMergedInto { new } => write!(f, "both merged into {}", new),
            MatchReason::Mismatch { left, right } => write!(f, "mismatch: {} ≠ {}", left, right),
        }
    }
}

/// 比对结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonResult {
    pub is_match: bool,
    pub reason: MatchReason,
}

impl ComparisonResult {
    fn new(reason: MatchReason) -> Self {
        Self {
            is_match: reason.is_match(),
            reason,
        }
    }

    /// 拆成 (是否匹配, 原因文本)
    pub fn into_parts(self) -> (bool, String) {
        (self.is_match, self.reason.to_string())
    }
}

/// 省份比对器
#[derive(Debug, Clone, Default)]
pub struct ProvinceComparator {
    merges: MergeRelation,
}

impl ProvinceComparator {
    pub fn new(merges: MergeRelation) -> Self {
        Self { merges }
    }

    pub fn merges(&self) -> &MergeRelation {
        &self.merges
    }

    /// 比较两个省份
    ///
    /// 依次检查：是否缺失、是否相同、一方是否合并到另一方、双方是否合并到同一省份。
    /// 空字符串与 `None` 同样视为缺失。
    pub fn compare_provinces(&self, prov1: Option<&str>, prov2: Option<&str>) -> ComparisonResult {
        let (left, right) = match (present(prov1), present(prov2)) {
            (Some(left), Some(right)) => (left, right),
            _ => return ComparisonResult::new(MatchReason::Undetermined),
        };

        if left == right {
            return ComparisonResult::new(MatchReason::ExactMatch);
        }

        let left_target = self.merges.merged_into(left);
        let right_target = self.merges.merged_into(right);

        if left_target == Some(right) {
            return ComparisonResult::new(MatchReason::MergedInto {
                old: left.to_string(),
                new: right.to_string(),
            });
        }

        if right_target == Some(left) {
            return ComparisonResult::new(MatchReason::MergedInto {
                old: right.to_string(),
                new: left.to_string(),
            });
        }

        if let (Some(a), Some(b)) = (left_target, right_target) {
            if a == b {
                return ComparisonResult::new(MatchReason::BothMergedInto { new: a.to_string() });
            }
        }

        ComparisonResult::new(MatchReason::Mismatch {
            left: left.to_string(),
            right: right.to_string(),
        })
    }
}

fn present(province: Option<&str>) -> Option<&str> {
    province.filter(|p| !p.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatcherConfig;
    use crate::data::GroundTruth;
    use crate::index::VariantIndex;

    fn comparator() -> ProvinceComparator {
        let truth = GroundTruth::from_entries([
            ("Bến Tre", vec!["Ben Tre"]),
            ("Trà Vinh", vec!["Tra Vinh"]),
            ("Vĩnh Long", vec!["Vinh Long", "Tỉnh Bến Tre cũ", "Tỉnh Trà Vinh cũ"]),
            ("Khánh Hòa", vec!["KH"]),
        ])
        .unwrap();
        let index = VariantIndex::build(&truth);
        ProvinceComparator::new(MergeRelation::build(&truth, &index, &MatcherConfig::default()))
    }

    #[test]
    fn test_undetermined() {
        let c = comparator();
        for (a, b) in [
            (None, Some("Vĩnh Long")),
            (Some("Vĩnh Long"), None),
            (None, None),
            (Some(""), Some("Vĩnh Long")),
        ] {
            let result = c.compare_provinces(a, b);
            assert!(!result.is_match);
            assert_eq!(result.reason, MatchReason::Undetermined);
            assert_eq!(result.reason.to_string(), "undetermined");
        }
    }

    #[test]
    fn test_exact_match() {
        let c = comparator();
        let result = c.compare_provinces(Some("Khánh Hòa"), Some("Khánh Hòa"));
        assert_eq!(result.into_parts(), (true, "exact match".to_string()));
    }

    #[test]
    fn test_merged_into_either_direction() {
        let c = comparator();

        let result = c.compare_provinces(Some("Bến Tre"), Some("Vĩnh Long"));
        assert!(result.is_match);
        assert_eq!(result.reason.to_string(), "Bến Tre merged into Vĩnh Long");

        let result = c.compare_provinces(Some("Vĩnh Long"), Some("Trà Vinh"));
        assert!(result.is_match);
        assert_eq!(
            result.reason,
            MatchReason::MergedInto {
                old: "Trà Vinh".to_string(),
                new: "Vĩnh Long".to_string(),
            }
        );
    }

    #[test]
    fn test_both_merged_into_same_province() {
        let c = comparator();
        let result = c.compare_provinces(Some("Bến Tre"), Some("Trà Vinh"));
        assert!(result.is_match);
        assert_eq!(result.reason.to_string(), "both merged into Vĩnh Long");
    }

    #[test]
    fn test_mismatch() {
        let c = comparator();

        let result = c.compare_provinces(Some("Khánh Hòa"), Some("Vĩnh Long"));
        assert_eq!(
            result.into_parts(),
            (false, "mismatch: Khánh Hòa ≠ Vĩnh Long".to_string())
        );

        // 只有一方被合并且目标不同
        let result = c.compare_provinces(Some("Bến Tre"), Some("Khánh Hòa"));
        assert!(!result.is_match);
    }

    #[test]
    fn test_unknown_names_compare_as_strings() {
        let c = ProvinceComparator::default();
        assert!(c.compare_provinces(Some("X"), Some("X")).is_match);
        assert!(!c.compare_provinces(Some("X"), Some("Y")).is_match);
    }

    #[test]
    fn test_reason_is_match() {
        assert!(MatchReason::ExactMatch.is_match());
        assert!(MatchReason::BothMergedInto { new: "A".into() }.is_match());
        assert!(!MatchReason::Undetermined.is_match());
        assert!(!MatchReason::Mismatch {
            left: "A".into(),
            right: "B".into()
        }
        .is_match());
    }
}
