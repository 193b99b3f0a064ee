//! # tinhthanh - 越南省份提取与比对
//!
//! 从越南自由文本地址中提取所属省份（2025 年合并后的 34 个省级单位），
//! 并在比较两个省份时考虑行政区划合并。
//!
//! ## 功能特性
//!
//! - 变体索引：官方名称、无声调写法、缩写（"HCM"、"KH"）、旧省份全称
//! - 统一 Unicode 规范化（NFC + 声调位置），"Hoà" 与 "Hòa" 视为相同
//! - 候选按"最具体者优先"打分，"Thừa Thiên Huế" 优先于 "Huế"
//! - 从基准数据推导合并关系，"Bến Tre" 与 "Vĩnh Long" 视为匹配
//! - 批量比对 CSV 中的地址对并输出 JSON
//! - 内置基准数据，也可从 JSON 文件加载
//!
//! ## 快速开始
//!
//! ```rust
//! use tinhthanh::AddressComparator;
//!
//! let comparator = AddressComparator::embedded().unwrap();
//!
//! // 提取省份
//! assert_eq!(
//!     comparator.extract_province("123 Lê Lợi, P. Bến Thành, Q.1, TPHCM"),
//!     Some("Hồ Chí Minh")
//! );
//! assert_eq!(comparator.extract_province("42 Wallaby Way"), None);
//!
//! // 考虑合并的比较
//! let result = comparator.compare_addresses("170 Hùng Vương, Bến Tre", "Vĩnh Long");
//! assert!(result.is_match);
//!
//! // 生成可序列化的比对记录
//! let record = comparator.compare_address_pair("15 Trần Quý Cáp, KH", "Hà Nội", 1);
//! assert_eq!(record.province1, "Khánh Hòa");
//! assert!(!record.is_match);
//! ```

mod address;
pub mod batch;
mod comparator;
mod config;
mod data;
mod error;
mod index;
mod matcher;
mod merge;
mod normalize;

pub use address::{AddressComparator, PairRecord, UNRESOLVED};
pub use comparator::{ComparisonResult, MatchReason, ProvinceComparator};
pub use config::{MatcherConfig, DEFAULT_LEGACY_DESIGNATORS, DEFAULT_MIN_SUBSTRING_CHARS};
pub use data::{GroundTruth, ProvinceEntry};
pub use error::{BatchError, ConfigurationError};
pub use index::{VariantConflict, VariantEntry, VariantIndex};
pub use matcher::{Candidate, ProvinceMatcher};
pub use merge::MergeRelation;
pub use normalize::{fold, normalize};
