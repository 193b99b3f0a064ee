//! 匹配参数

/// 默认的旧行政单位标记（"省"、"市"）
///
/// 按原始字符串做子串判断，因此 "TPHCM"、"TP.HCM" 这类以 "TP" 开头的缩写也会被当作旧名称。
pub const DEFAULT_LEGACY_DESIGNATORS: [&str; 3] = ["Tỉnh", "Thành phố", "TP"];

/// 子串匹配所需的最小变体长度（字符数）
pub const DEFAULT_MIN_SUBSTRING_CHARS: usize = 4;

/// 索引构建与匹配参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatcherConfig {
    /// 出现这些子串（区分大小写）的变体被视为被合并的旧省份全称
    pub legacy_designators: Vec<String>,
    /// 变体不在词边界上时，至少要有这么多字符才允许按子串匹配
    pub min_substring_chars: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            legacy_designators: DEFAULT_LEGACY_DESIGNATORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            min_substring_chars: DEFAULT_MIN_SUBSTRING_CHARS,
        }
    }
}

impl MatcherConfig {
    /// 替换旧行政单位标记
    pub fn with_legacy_designators<I, S>(mut self, designators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.legacy_designators = designators.into_iter().map(Into::into).collect();
        self
    }

    /// 设置子串匹配的最小长度
    pub fn with_min_substring_chars(mut self, chars: usize) -> Self {
        self.min_substring_chars = chars;
        self
    }

    /// 变体是否带有旧行政单位标记
    pub fn is_legacy_name(&self, variant: &str) -> bool {
        self.legacy_designators
            .iter()
            .any(|marker| variant.contains(marker.as_str()))
    }
}
