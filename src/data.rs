//! 基准数据（ground truth）加载
//!
//! 格式为 JSON 对象：官方省名 -> 变体列表。变体包括现行写法、无声调写法、缩写，
//! 以及被合并的旧省份全称。对象的键顺序会被保留，冲突时后出现的省份生效。

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// 内嵌的 34 个省级行政单位数据（2025 年合并后，编译时包含）
const EMBEDDED_DATA: &str = include_str!("../data/tinh_thanh.json");

/// 一个省份及其变体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvinceEntry {
    /// 官方名称
    pub official: String,
    /// 变体，按数据中的顺序
    pub variants: Vec<String>,
}

/// 基准数据，加载一次后只读
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroundTruth {
    entries: Vec<ProvinceEntry>,
}

impl GroundTruth {
    /// 内嵌数据集
    pub fn embedded() -> Result<Self, ConfigurationError> {
        Self::from_json_str(EMBEDDED_DATA)
    }

    /// 从 JSON 文件加载
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigurationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let truth = Self::from_reader(BufReader::new(file))?;
        tracing::info!(
            "Loaded {} provinces from {}",
            truth.len(),
            path.display()
        );
        Ok(truth)
    }

    /// 从任意读取器加载 JSON
    pub fn from_reader(reader: impl Read) -> Result<Self, ConfigurationError> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(value)
    }

    /// 从 JSON 字符串加载
    pub fn from_json_str(json: &str) -> Result<Self, ConfigurationError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// 从 (官方名称, 变体列表) 序列构建
    ///
    /// ```rust
    /// use tinhthanh::GroundTruth;
    ///
    /// let truth = GroundTruth::from_entries([
    ///     ("Khánh Hòa", vec!["Khánh Hòa", "KH", "Nha Trang"]),
    ///     ("Hồ Chí Minh", vec!["TPHCM", "Sài Gòn"]),
    /// ])
    /// .unwrap();
    /// assert_eq!(truth.len(), 2);
    /// ```
    pub fn from_entries<I, S, V>(entries: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(official, variants)| ProvinceEntry {
                official: official.into(),
                variants: variants.into_iter().map(Into::into).collect(),
            })
            .collect();
        Self::validated(entries)
    }

    fn from_value(value: Value) -> Result<Self, ConfigurationError> {
        let map = match value {
            Value::Object(map) => map,
            other => return Err(ConfigurationError::NotAMapping(json_kind(&other))),
        };

        let mut entries = Vec::with_capacity(map.len());
        for (official, variants) in map {
            let items = match variants {
                Value::Array(items) => items,
                other => {
                    return Err(ConfigurationError::Malformed {
                        reason: format!("expected a list of variants, found {}", json_kind(&other)),
                        province: official,
                    })
                }
            };

            let mut list = Vec::with_capacity(items.len());
            for (i, item) in items.into_iter().enumerate() {
                match item {
                    Value::String(s) => list.push(s),
                    other => {
                        return Err(ConfigurationError::Malformed {
                            reason: format!("variant #{} is {}, not a string", i, json_kind(&other)),
                            province: official,
                        })
                    }
                }
            }

            entries.push(ProvinceEntry {
                official,
                variants: list,
            });
        }

        Self::validated(entries)
    }

    fn validated(entries: Vec<ProvinceEntry>) -> Result<Self, ConfigurationError> {
        if entries.is_empty() {
            return Err(ConfigurationError::Empty);
        }
        if let Some(entry) = entries.iter().find(|e| e.official.trim().is_empty()) {
            return Err(ConfigurationError::Malformed {
                province: entry.official.clone(),
                reason: "official name is empty".to_string(),
            });
        }
        Ok(Self { entries })
    }

    /// 省份数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按数据顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = &ProvinceEntry> {
        self.entries.iter()
    }

    /// 所有官方名称
    pub fn provinces(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.official.as_str()).collect()
    }

    /// 某省份的变体列表
    pub fn variants_of(&self, official: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.official == official)
            .map(|e| e.variants.as_slice())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
