//! 错误类型定义

use std::path::PathBuf;
use thiserror::Error;

/// 基准数据（ground truth）加载错误
///
/// 均为致命错误：加载失败时不会构建任何索引。
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// 文件读取失败
    #[error("Failed to read ground truth {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 不是合法的 JSON
    #[error("Invalid ground truth JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// 顶层不是 JSON 对象
    #[error("Ground truth must be a JSON object mapping province names to variant lists, found {0}")]
    NotAMapping(&'static str),

    /// 某个条目不是 "名称 -> 名称列表"
    #[error("Malformed ground truth entry {province:?}: {reason}")]
    Malformed { province: String, reason: String },

    /// 没有任何省份
    #[error("Ground truth contains no provinces")]
    Empty,
}

/// 批量比对错误
#[derive(Debug, Error)]
pub enum BatchError {
    /// CSV 读取失败
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON 输出失败
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
