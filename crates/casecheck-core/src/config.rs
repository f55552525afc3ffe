use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::CasecheckError;
use crate::evaluate::status::{StatusPolicy, UnknownTypePolicy};
use crate::rules::builtin::CompilerConfig;

pub const DEFAULT_CLIENT_COLUMN: &str = "client name";
pub const DEFAULT_REPORT_TYPE_COLUMN: &str = "report type";

/// Options controlling record evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckOptions {
    pub status_policy: StatusPolicy,
    pub unknown_type: UnknownTypePolicy,
    /// Column holding the client name.
    pub client_column: String,
    /// Column holding the report type.
    pub report_type_column: String,
}

impl Default for CheckOptions {
    fn default() -> Self {
        CheckOptions {
            status_policy: StatusPolicy::default(),
            unknown_type: UnknownTypePolicy::default(),
            client_column: DEFAULT_CLIENT_COLUMN.to_string(),
            report_type_column: DEFAULT_REPORT_TYPE_COLUMN.to_string(),
        }
    }
}

/// Everything configurable about a run, as stored in a JSON config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    pub rules: CompilerConfig,
    pub check: CheckOptions,
}

impl CheckConfig {
    /// Reject configurations that could never match anything.
    pub fn validate(&self) -> Result<(), CasecheckError> {
        if self.rules.report_types.iter().all(|t| t.trim().is_empty()) {
            return Err(CasecheckError::Config(
                "at least one report type label is required".into(),
            ));
        }
        if self.rules.fields_marker.trim().is_empty()
            || self.rules.documents_marker.trim().is_empty()
        {
            return Err(CasecheckError::Config("section markers must not be empty".into()));
        }
        if self.check.client_column.trim().is_empty()
            || self.check.report_type_column.trim().is_empty()
        {
            return Err(CasecheckError::Config("column names must not be empty".into()));
        }
        Ok(())
    }
}

/// Load and validate a JSON config file. Missing keys take their defaults.
pub fn load_config(path: &Path) -> Result<CheckConfig, CasecheckError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn parse_config(json: &str) -> Result<CheckConfig, CasecheckError> {
    let config: CheckConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}
