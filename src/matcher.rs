//! 省份匹配核心实现
//!
//! 对每个地址遍历整个变体索引（不做前缀/后缀索引），每个变体最多产生一个候选：
//! 先找词边界上的出现，找不到且变体足够长时再退回到子串匹配。
//! 所有候选按"最具体者优先"打分，取最高分。

use crate::config::MatcherConfig;
use crate::index::{VariantEntry, VariantIndex};
use crate::normalize::fold;
use tracing::{debug, trace};

/// 每个字符的长度分
const LENGTH_WEIGHT: f64 = 100.0;
/// 词边界匹配加分
const BOUNDARY_BONUS: f64 = 1000.0;
/// 多词变体（"Tra Vinh" 相对 "Vinh"）加分
const MULTI_WORD_BONUS: f64 = 500.0;
/// 位置分上限，越靠后越高
const POSITION_WEIGHT: f64 = 50.0;

/// 地址中一次变体出现
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<'a> {
    /// 变体对应的官方名称
    pub official: &'a str,
    /// 命中的变体（索引中的原始键）
    pub variant: &'a str,
    /// 在规范化地址中的字符偏移
    pub position: usize,
    /// 是否在词边界上
    pub is_word_boundary: bool,
    /// 变体字符数
    pub length: usize,
}

impl Candidate<'_> {
    /// 候选得分
    ///
    /// `长度 * 100`，词边界 `+1000`，多词 `+500`，再加 `位置 / 地址长度 * 50`。
    pub fn score(&self, address_chars: usize) -> f64 {
        let mut score = self.length as f64 * LENGTH_WEIGHT;
        if self.is_word_boundary {
            score += BOUNDARY_BONUS;
        }
        if self.variant.contains(' ') {
            score += MULTI_WORD_BONUS;
        }
        if address_chars > 0 {
            score += self.position as f64 / address_chars as f64 * POSITION_WEIGHT;
        }
        score
    }
}

/// 省份匹配器
///
/// 构建后只读，可在多个线程间共享。
#[derive(Debug, Clone)]
pub struct ProvinceMatcher {
    index: VariantIndex,
    config: MatcherConfig,
}

impl ProvinceMatcher {
    /// 使用默认参数
    pub fn new(index: VariantIndex) -> Self {
        Self::with_config(index, MatcherConfig::default())
    }

    /// 使用自定义参数
    pub fn with_config(index: VariantIndex, config: MatcherConfig) -> Self {
        Self { index, config }
    }

    pub fn index(&self) -> &VariantIndex {
        &self.index
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// 从地址中提取省份
    ///
    /// 地址为空或没有任何变体出现时返回 `None`。
    ///
    /// ```rust
    /// use tinhthanh::{GroundTruth, ProvinceMatcher, VariantIndex};
    ///
    /// let truth = GroundTruth::from_entries([
    ///     ("Khánh Hòa", vec!["Khánh Hòa", "KH", "Nha Trang"]),
    ///     ("Hồ Chí Minh", vec!["Hồ Chí Minh", "TPHCM", "TP.HCM", "Sài Gòn"]),
    /// ])
    /// .unwrap();
    /// let matcher = ProvinceMatcher::new(VariantIndex::build(&truth));
    ///
    /// assert_eq!(matcher.extract_province("15 Trần Quý Cáp, P. Ninh Hiệp, KH"), Some("Khánh Hòa"));
    /// assert_eq!(matcher.extract_province("123 Lê Lợi, TPHCM"), Some("Hồ Chí Minh"));
    /// assert_eq!(matcher.extract_province(""), None);
    /// ```
    pub fn extract_province(&self, address: &str) -> Option<&str> {
        let winner = self.best_candidate(address)?;
        debug!(
            "Extracted {:?} from {:?} via {:?}",
            winner.official, address, winner.variant
        );
        Some(winner.official)
    }

    /// 得分最高的候选；同分时取先产生的
    pub fn best_candidate(&self, address: &str) -> Option<Candidate<'_>> {
        let (candidates, address_chars) = self.scan(address);
        trace!("{} candidates for {:?}", candidates.len(), address);

        let mut best: Option<(f64, Candidate<'_>)> = None;
        for candidate in candidates {
            let score = candidate.score(address_chars);
            if best.as_ref().map_or(true, |(top, _)| score > *top) {
                best = Some((score, candidate));
            }
        }
        best.map(|(_, candidate)| candidate)
    }

    /// 地址中所有候选，按索引顺序
    pub fn candidates(&self, address: &str) -> Vec<Candidate<'_>> {
        self.scan(address).0
    }

    /// 返回候选和规范化地址的字符数
    fn scan(&self, address: &str) -> (Vec<Candidate<'_>>, usize) {
        if address.trim().is_empty() {
            return (Vec::new(), 0);
        }

        let haystack = fold(address);
        let candidates = self
            .index
            .entries()
            .iter()
            .filter_map(|entry| self.probe(entry, &haystack))
            .collect();

        (candidates, haystack.chars().count())
    }

    fn probe<'a>(&'a self, entry: &'a VariantEntry, haystack: &str) -> Option<Candidate<'a>> {
        let needle = entry.folded();

        let (byte_pos, is_word_boundary) = match find_delimited(haystack, needle) {
            Some(pos) => (pos, true),
            // 短变体（如 "An"、"KH"）只允许词边界匹配
            None if entry.char_len() >= self.config.min_substring_chars && !needle.is_empty() => {
                (haystack.find(needle)?, false)
            }
            None => return None,
        };

        Some(Candidate {
            official: entry.official(),
            variant: entry.key(),
            position: haystack[..byte_pos].chars().count(),
            is_word_boundary,
            length: entry.char_len(),
        })
    }
}

/// 查找 `needle` 第一次作为独立词出现的字节偏移
///
/// 两侧必须是字符串首尾、空白或 `,` `;` `.` `-` `/` 之一。
pub(crate) fn find_delimited(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }

    let mut from = 0;
    while let Some(offset) = haystack[from..].find(needle) {
        let start = from + offset;
        let end = start + needle.len();

        let before = haystack[..start].chars().next_back().map_or(true, is_delimiter);
        let after = haystack[end..].chars().next().map_or(true, is_delimiter);
        if before && after {
            return Some(start);
        }

        from = start + haystack[start..].chars().next().map_or(1, char::len_utf8);
    }

    None
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | ';' | '.' | '-' | '/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GroundTruth;

    fn sample() -> ProvinceMatcher {
        let truth = GroundTruth::from_entries([
            ("Khánh Hòa", vec!["Khánh Hòa", "KH", "Nha Trang"]),
            (
                "Hồ Chí Minh",
                vec!["Hồ Chí Minh", "TPHCM", "TP.HCM", "Sài Gòn"],
            ),
        ])
        .unwrap();
        ProvinceMatcher::new(VariantIndex::build(&truth))
    }

    fn embedded() -> ProvinceMatcher {
        ProvinceMatcher::new(VariantIndex::build(&GroundTruth::embedded().unwrap()))
    }

    // ==================== 基本功能测试 ====================

    #[test]
    fn test_extract_abbreviation() {
        let m = sample();
        assert_eq!(
            m.extract_province("15 Trần Quý Cáp, P. Ninh Hiệp, KH"),
            Some("Khánh Hòa")
        );
        assert_eq!(m.extract_province("123 Lê Lợi, TPHCM"), Some("Hồ Chí Minh"));
        assert_eq!(m.extract_province("45 Nguyễn Huệ, Q.1, TP.HCM"), Some("Hồ Chí Minh"));
    }

    #[test]
    fn test_extract_empty_address() {
        let m = sample();
        assert_eq!(m.extract_province(""), None);
        assert_eq!(m.extract_province("   "), None);
        assert!(m.candidates("").is_empty());
    }

    #[test]
    fn test_extract_no_match() {
        let m = sample();
        assert_eq!(m.extract_province("42 Wallaby Way, Sydney"), None);
    }

    #[test]
    fn test_case_insensitive() {
        let m = sample();
        assert_eq!(m.extract_province("123 LÊ LỢI, tphcm"), Some("Hồ Chí Minh"));
        assert_eq!(
            m.extract_province("15 trần quý cáp, p. ninh hiệp, kh"),
            Some("Khánh Hòa")
        );
        assert_eq!(m.extract_province("NHA TRANG"), Some("Khánh Hòa"));
    }

    #[test]
    fn test_idempotent() {
        let m = embedded();
        let address = "170 Hùng Vương, Tra Vinh";
        assert_eq!(m.extract_province(address), m.extract_province(address));
        assert_eq!(m.candidates(address), m.candidates(address));
    }

    #[test]
    fn test_old_style_accents_and_decomposed_input() {
        let m = sample();
        assert_eq!(m.extract_province("Lộc Thọ, Khánh Hoà"), Some("Khánh Hòa"));
        assert_eq!(
            m.extract_province("Lộc Thọ, Kha\u{301}nh Ho\u{300}a"),
            Some("Khánh Hòa")
        );
    }

    // ==================== 短变体保护 ====================

    #[test]
    fn test_short_variant_needs_word_boundary() {
        let m = sample();
        // "kh" 出现在 "khu" 里，但两个字符的变体不做子串匹配
        assert_eq!(m.extract_province("Khu dân cư Hồng Hà"), None);
        assert_eq!(m.extract_province("Khu dân cư Hồng Hà, KH"), Some("Khánh Hòa"));
    }

    #[test]
    fn test_long_variant_substring_match() {
        let m = sample();
        let candidates = m.candidates("Khu đô thị NhaTrang-Nha Trangxanh");
        let hit = candidates
            .iter()
            .find(|c| c.variant == "Nha Trang")
            .unwrap();
        assert!(!hit.is_word_boundary);
        assert_eq!(hit.official, "Khánh Hòa");
        assert_eq!(
            m.extract_province("Khu đô thị Nha Trangxanh"),
            Some("Khánh Hòa")
        );
    }

    #[test]
    fn test_min_substring_chars_configurable() {
        let truth = GroundTruth::from_entries([("Khánh Hòa", vec!["Nha Trang"])]).unwrap();
        let m = ProvinceMatcher::with_config(
            VariantIndex::build(&truth),
            MatcherConfig::default().with_min_substring_chars(20),
        );
        assert_eq!(m.extract_province("Nha Trangxanh"), None);
        assert_eq!(m.extract_province("Nha Trang"), Some("Khánh Hòa"));
    }

    // ==================== 候选细节 ====================

    #[test]
    fn test_candidate_fields() {
        let m = sample();
        let candidates = m.candidates("123 Lê Lợi, TPHCM");

        assert_eq!(candidates.len(), 2); // "TPHCM" 和 "tphcm"
        for c in &candidates {
            assert_eq!(c.official, "Hồ Chí Minh");
            assert_eq!(c.position, 12);
            assert!(c.is_word_boundary);
            assert_eq!(c.length, 5);
        }
    }

    #[test]
    fn test_boundary_position_is_variant_offset() {
        // 词边界匹配的位置指向变体本身，不含前面的分隔符
        let m = sample();
        assert_eq!(m.best_candidate("KH").unwrap().position, 0);
        assert_eq!(m.best_candidate(",KH").unwrap().position, 1);
        assert_eq!(m.best_candidate("Q1, KH").unwrap().position, 4);
    }

    #[test]
    fn test_score() {
        let c = Candidate {
            official: "Vĩnh Long",
            variant: "Tra Vinh",
            position: 10,
            is_word_boundary: true,
            length: 8,
        };
        assert_eq!(c.score(20), 800.0 + 1000.0 + 500.0 + 25.0);

        let c = Candidate {
            is_word_boundary: false,
            variant: "Vinh",
            length: 4,
            position: 0,
            ..c
        };
        assert_eq!(c.score(20), 400.0);
    }

    // ==================== 排序策略 ====================

    #[test]
    fn test_multi_word_beats_single_word() {
        let m = embedded();
        assert_eq!(m.extract_province("170 Hùng Vương, Tra Vinh"), Some("Vĩnh Long"));
        assert_eq!(m.extract_province("170 Hùng Vương, Vinh"), Some("Nghệ An"));
    }

    #[test]
    fn test_specific_name_beats_later_shorter_name() {
        // 最具体者优先，而不是最后出现者优先
        let m = embedded();
        assert_eq!(
            m.extract_province("12 Thừa Thiên Huế, Q. Ba Đình, Hà Nội"),
            Some("Huế")
        );
    }

    #[test]
    fn test_position_breaks_ties_toward_later() {
        let truth =
            GroundTruth::from_entries([("Alpha", vec!["Alfa"]), ("Bravo", vec!["Brav"])])
                .unwrap();
        let m = ProvinceMatcher::new(VariantIndex::build(&truth));

        assert_eq!(m.extract_province("Alfa, Brav"), Some("Bravo"));
        assert_eq!(m.extract_province("Brav, Alfa"), Some("Alpha"));
    }

    #[test]
    fn test_boundary_beats_longer_substring() {
        let truth = GroundTruth::from_entries([
            ("Short", vec!["Lam"]),
            ("Long", vec!["Xlamx"]),
        ])
        .unwrap();
        let m = ProvinceMatcher::new(VariantIndex::build(&truth));

        // "lam"：300 + 1000；"xlamx" 子串：500 + 位置分
        assert_eq!(m.extract_province("axlamxb, lam"), Some("Short"));
    }

    #[test]
    fn test_embedded_examples() {
        let m = embedded();
        assert_eq!(
            m.extract_province("123 Lê Lợi, P. Bến Thành, Q.1, Hồ Chí Minh"),
            Some("Hồ Chí Minh")
        );
        assert_eq!(
            m.extract_province("45 P. Hàng Bông, Q. Hoàn Kiếm, Hanoi"),
            Some("Hà Nội")
        );
        assert_eq!(
            m.extract_province("200 Nguyễn Văn Linh, Q. Hải Châu, Da Nang"),
            Some("Đà Nẵng")
        );
        assert_eq!(m.extract_province("170 Hùng Vương, Bến Tre"), Some("Vĩnh Long"));
        assert_eq!(m.extract_province("Phường 1, TP. Vũng Tàu"), Some("Hồ Chí Minh"));
    }

    // ==================== 词边界 ====================

    #[test]
    fn test_find_delimited() {
        assert_eq!(find_delimited("kh", "kh"), Some(0));
        assert_eq!(find_delimited("p.kh", "kh"), Some(2));
        assert_eq!(find_delimited("a-kh-b", "kh"), Some(2));
        assert_eq!(find_delimited("x/kh;", "kh"), Some(2));
        assert_eq!(find_delimited("kha kh", "kh"), Some(4));
        assert_eq!(find_delimited("akh", "kh"), None);
        assert_eq!(find_delimited("kha", "kh"), None);
        assert_eq!(find_delimited("anything", ""), None);
        // 多字节字符
        assert_eq!(find_delimited("hà nội, kh", "kh"), Some("hà nội, ".len()));
        assert_eq!(find_delimited("ắkh", "kh"), None);
    }
}
