//! 批量比对
//!
//! 输入为无表头 CSV：`序号,地址1,地址2[,标签]`。少于 3 列的行、标签为
//! `MISMATCH` / `Ambiguity` 的行以及地址为空的行都会被跳过，不影响其余行。

use crate::address::{AddressComparator, PairRecord};
use crate::error::BatchError;
use serde::Serialize;
use std::io::{Read, Write};
use tracing::{debug, info, warn};

/// 第 4 列出现这些标签时跳过该行
pub const EXCLUDED_LABELS: [&str; 2] = ["MISMATCH", "Ambiguity"];

/// 待比对的一对地址
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressPair {
    pub index: String,
    pub address1: String,
    pub address2: String,
}

/// 统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub matched: usize,
    pub mismatched: usize,
}

impl BatchSummary {
    /// 匹配比例（百分比），没有数据时为 `None`
    pub fn match_rate(&self) -> Option<f64> {
        (self.total > 0).then(|| self.matched as f64 / self.total as f64 * 100.0)
    }
}

/// 批量比对结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub records: Vec<PairRecord>,
    pub summary: BatchSummary,
}

/// 读取 CSV 中的地址对
pub fn read_pairs(reader: impl Read) -> Result<Vec<AddressPair>, BatchError> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut pairs = Vec::new();
    for (row, record) in csv.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(err) if matches!(err.kind(), csv::ErrorKind::Utf8 { .. }) => {
                warn!("Skipping row {}: {}", row + 1, err);
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        if record.len() < 3 {
            debug!("Skipping row {}: only {} fields", row + 1, record.len());
            continue;
        }
        if record
            .get(3)
            .is_some_and(|label| EXCLUDED_LABELS.contains(&label))
        {
            debug!("Skipping row {}: labelled {:?}", row + 1, &record[3]);
            continue;
        }

        let address1 = record[1].trim();
        let address2 = record[2].trim();
        if address1.is_empty() || address2.is_empty() {
            debug!("Skipping row {}: empty address", row + 1);
            continue;
        }

        pairs.push(AddressPair {
            index: record[0].trim().to_string(),
            address1: address1.to_string(),
            address2: address2.to_string(),
        });
    }

    Ok(pairs)
}

/// 逐对比对并统计
pub fn run_batch(comparator: &AddressComparator, pairs: &[AddressPair]) -> BatchReport {
    let records: Vec<PairRecord> = pairs
        .iter()
        .map(|pair| comparator.compare_address_pair(&pair.address1, &pair.address2, &pair.index))
        .collect();

    let matched = records.iter().filter(|r| r.is_match).count();
    let summary = BatchSummary {
        total: records.len(),
        matched,
        mismatched: records.len() - matched,
    };

    match summary.match_rate() {
        Some(rate) => info!(
            "Compared {} pairs: {} matched ({:.1}%), {} mismatched",
            summary.total, summary.matched, rate, summary.mismatched
        ),
        None => warn!("No address pairs to compare"),
    }

    BatchReport { records, summary }
}

/// 以格式化 JSON 数组输出记录
pub fn write_json(writer: impl Write, records: &[PairRecord]) -> Result<(), BatchError> {
    serde_json::to_writer_pretty(writer, records)?;
    Ok(())
}
