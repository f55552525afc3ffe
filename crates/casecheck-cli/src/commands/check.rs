use casecheck_core::config::{load_config, CheckConfig};
use casecheck_core::error::CasecheckError;
use casecheck_core::evaluate::status::{StatusPolicy, UnknownTypePolicy, DEFAULT_TIER_THRESHOLD};
use casecheck_core::CheckInputs;
use std::path::PathBuf;

use crate::output;

pub struct CheckArgs {
    pub records: PathBuf,
    pub rules: PathBuf,
    pub documents: Vec<PathBuf>,
    pub config: Option<PathBuf>,
    pub status_policy: Option<String>,
    pub tier_threshold: Option<usize>,
    pub unknown_type: Option<String>,
    pub output: String,
    pub problems_only: bool,
}

pub fn run(args: CheckArgs) -> Result<(), CasecheckError> {
    let config = resolve_config(&args)?;

    let inputs = CheckInputs {
        records: args.records,
        rules: args.rules,
        documents: args.documents,
    };
    let report = casecheck_core::check_files(&inputs, &config)?;

    match args.output.as_str() {
        "json" => output::json::print(&report)?,
        _ => output::table::print_report(&report, args.problems_only),
    }

    Ok(())
}

/// Config file (if any) with command-line overrides applied on top.
fn resolve_config(args: &CheckArgs) -> Result<CheckConfig, CasecheckError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => CheckConfig::default(),
    };

    if let Some(ref policy) = args.status_policy {
        config.check.status_policy = parse_status_policy(policy, args.tier_threshold)?;
    } else if let Some(threshold) = args.tier_threshold {
        match config.check.status_policy {
            StatusPolicy::Tiered { .. } => {
                config.check.status_policy = StatusPolicy::Tiered { threshold };
            }
            StatusPolicy::Binary => {
                return Err(CasecheckError::Config(
                    "--tier-threshold only applies to the tiered status policy".into(),
                ));
            }
        }
    }

    if let Some(ref policy) = args.unknown_type {
        config.check.unknown_type = parse_unknown_type(policy)?;
    }

    config.validate()?;
    Ok(config)
}

fn parse_status_policy(
    name: &str,
    threshold: Option<usize>,
) -> Result<StatusPolicy, CasecheckError> {
    match name.trim().to_lowercase().as_str() {
        "binary" => Ok(StatusPolicy::Binary),
        "tiered" => Ok(StatusPolicy::Tiered {
            threshold: threshold.unwrap_or(DEFAULT_TIER_THRESHOLD),
        }),
        other => Err(CasecheckError::Config(format!(
            "unknown status policy '{other}'. Available: binary, tiered"
        ))),
    }
}

fn parse_unknown_type(name: &str) -> Result<UnknownTypePolicy, CasecheckError> {
    match name.trim().to_lowercase().as_str() {
        "permissive" => Ok(UnknownTypePolicy::Permissive),
        "flag" => Ok(UnknownTypePolicy::Flag),
        other => Err(CasecheckError::Config(format!(
            "unknown report-type policy '{other}'. Available: permissive, flag"
        ))),
    }
}
