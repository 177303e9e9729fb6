//! Bill enrichment contract.
//!
//! Bills carry cached display fields that, for ProPublica-sourced rows, are
//! stale by default and refreshed on demand from the external data source.
//! This module defines the source tag, the field-mapping from a raw external
//! record to the stored columns, and the lookup trait the HTTP client
//! implements.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// Where a bill row originally came from.
///
/// The source fully determines whether enrichment applies: only
/// `Propublica` rows are ever fetched for or written by the updater. The
/// `Sunlight` arm is a deliberate no-op strategy, kept explicit so the
/// behavior is intentional and testable rather than an absent branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillSource {
    Sunlight,
    Propublica,
}

impl BillSource {
    pub fn as_str(self) -> &'static str {
        match self {
            BillSource::Sunlight => "sunlight",
            BillSource::Propublica => "propublica",
        }
    }
}

impl Default for BillSource {
    fn default() -> Self {
        BillSource::Propublica
    }
}

impl fmt::Display for BillSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillSource {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sunlight" => Ok(BillSource::Sunlight),
            "propublica" => Ok(BillSource::Propublica),
            other => Err(CoreError::Validation(format!(
                "unknown bill source '{other}'"
            ))),
        }
    }
}

/// The display fields a bill refresh overwrites, extracted from a raw
/// external record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillDetails {
    pub title: String,
    pub short_title: String,
    pub short_summary: String,
    pub number: i32,
    pub b_type: String,
    pub congress_url: Option<String>,
    pub govtrack_url: Option<String>,
}

impl BillDetails {
    /// Extract the display fields from a fetched record.
    ///
    /// Key mapping: `title`, `short_title`, `summary_short` → short_summary,
    /// `number`, `bill_type` → b_type, `congress_url`, `govtrack_url`.
    ///
    /// Every key must be present; a missing (or wrongly typed) key fails
    /// with [`CoreError::MalformedExternalRecord`] so a partial record never
    /// half-updates a row. The two URL keys must exist but may be null.
    pub fn from_record(record: &Value) -> Result<Self, CoreError> {
        Ok(BillDetails {
            title: required_str(record, "title")?,
            short_title: required_str(record, "short_title")?,
            short_summary: required_str(record, "summary_short")?,
            number: required_int(record, "number")?,
            b_type: required_str(record, "bill_type")?,
            congress_url: nullable_str(record, "congress_url")?,
            govtrack_url: nullable_str(record, "govtrack_url")?,
        })
    }
}

fn required_str(record: &Value, field: &'static str) -> Result<String, CoreError> {
    record
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(CoreError::MalformedExternalRecord { field })
}

fn required_int(record: &Value, field: &'static str) -> Result<i32, CoreError> {
    record
        .get(field)
        .and_then(Value::as_i64)
        .and_then(|n| i32::try_from(n).ok())
        .ok_or(CoreError::MalformedExternalRecord { field })
}

fn nullable_str(record: &Value, field: &'static str) -> Result<Option<String>, CoreError> {
    match record.get(field) {
        Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        _ => Err(CoreError::MalformedExternalRecord { field }),
    }
}

/// Black-box lookup service for bill records, keyed by the externally
/// assigned bill identifier.
///
/// The production implementation lives in `agora-propublica`; tests install
/// mocks. Every call is a live, uncached fetch.
#[async_trait::async_trait]
pub trait BillDataSource: Send + Sync {
    async fn get_by_id(&self, bill_id: &str) -> Result<Value, CoreError>;
}
