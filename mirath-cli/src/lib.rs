//! Input, config and output handling for the `mirath` binary.

use anyhow::{Context, Result};
use mirath_engine::registry::{self, Portion};
use mirath_engine::{EngineConfig, ErrorBody, calculate_json};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Reads the request body from `path`, or from stdin when `None`.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request from {}", path.display())),
        None => {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("Failed to read request from stdin")?;
            Ok(body)
        }
    }
}

/// Loads engine config from `path`, or the defaults when `None`.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

/// Outcome of one `calculate` run: the body to print and whether it is an
/// error body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub body: String,
    pub is_error: bool,
}

/// Runs a JSON request through the engine. Engine errors become a JSON
/// error body rather than an `Err`.
pub fn calculate_body(request: &str, config: &EngineConfig, pretty: bool) -> Result<Output> {
    match calculate_json(request, config, pretty) {
        Ok(body) => Ok(Output {
            body,
            is_error: false,
        }),
        Err(err) => {
            debug!(kind = err.kind(), internal = err.is_internal(), "Calculation failed");
            let error = ErrorBody::from(&err);
            let body = if pretty {
                serde_json::to_string_pretty(&error)
            } else {
                serde_json::to_string(&error)
            }
            .context("Failed to encode error body")?;
            Ok(Output {
                body,
                is_error: true,
            })
        }
    }
}

fn describe(portion: Portion) -> String {
    match portion {
        Portion::Share(fraction) => fraction.to_string(),
        Portion::SharedByCategory(fraction, _) => format!("{fraction} shared"),
        Portion::Uterine(_) => "1/6 or 1/3 per head".to_string(),
        Portion::ThirdOfRemainderAfterSpouse => "1/3 of remainder".to_string(),
    }
}

/// Renders the registry as a plain-text table.
#[must_use]
pub fn heirs_table() -> String {
    let mut out = format!(
        "{:<24} {:<18} {:>6}  {}\n",
        "CATEGORY", "CLASS", "WEIGHT", "FIXED SHARES"
    );
    for rule in registry::all() {
        let shares = if rule.has_fixed_share() {
            let mut portions: Vec<String> =
                rule.shares.iter().map(|row| describe(row.portion)).collect();
            portions.dedup();
            portions.join(", ")
        } else {
            "residue".to_string()
        };
        out.push_str(&format!(
            "{:<24} {:<18} {:>6}  {}\n",
            rule.heir.label(),
            rule.class.to_string(),
            rule.residuary_weight,
            shares
        ));
    }
    out
}
