use serde::{Deserialize, Serialize};

use crate::evaluate::outcome::Status;

/// Legacy tier boundary: up to this many missing fields is "incomplete".
pub const DEFAULT_TIER_THRESHOLD: usize = 2;

/// How a record's status is derived from its missing items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatusPolicy {
    /// Complete iff no field and no document is missing.
    #[default]
    Binary,
    /// Fields only: none missing is complete, up to `threshold` is
    /// incomplete, more is missing data. Documents are not considered.
    Tiered { threshold: usize },
}

impl StatusPolicy {
    pub fn tiered() -> Self {
        StatusPolicy::Tiered {
            threshold: DEFAULT_TIER_THRESHOLD,
        }
    }

    pub fn derive(&self, missing_fields: usize, missing_documents: usize) -> Status {
        match *self {
            StatusPolicy::Binary => {
                if missing_fields == 0 && missing_documents == 0 {
                    Status::Complete
                } else {
                    Status::Incomplete
                }
            }
            StatusPolicy::Tiered { threshold } => {
                if missing_fields == 0 {
                    Status::Complete
                } else if missing_fields <= threshold {
                    Status::Incomplete
                } else {
                    Status::MissingData
                }
            }
        }
    }
}

/// Treatment of records whose report type has no rule set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownTypePolicy {
    /// Evaluate against an empty rule set, which is always complete.
    #[default]
    Permissive,
    /// Skip checks and mark the record as an unrecognized type.
    Flag,
}
