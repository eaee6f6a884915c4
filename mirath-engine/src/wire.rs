//! JSON request and response contract.
//!
//! Requests carry plain numbers and free-text heir labels; this module turns
//! them into a typed [`EstateInput`] and turns a [`CalculationResult`] back
//! into numbers. Exact fractions are kept alongside as strings.

use mirath_types::{
    CalculationResult, Classification, EstateInput, Fraction, Gender, HeirEntry, Reconciliation,
    ShareRecord, ShareStatus,
};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::registry;

/// One `{ name, count }` entry of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestHeir {
    pub name: String,
    pub count: i64,
}

/// Request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    pub deceased: Gender,
    pub assets: f64,
    pub liabilities: f64,
    #[serde(default)]
    pub funeral_expenses: f64,
    #[serde(default)]
    pub bequests: f64,
    #[serde(default)]
    pub heirs: Vec<RequestHeir>,
}

impl CalculationRequest {
    /// Parses a JSON request body.
    pub fn from_json(body: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Converts to a typed input, resolving labels against the registry.
    pub fn to_input(&self) -> EngineResult<EstateInput> {
        let heirs = self
            .heirs
            .iter()
            .map(|entry| {
                let heir = registry::lookup_label(&entry.name, self.deceased)?.heir;
                let count = u32::try_from(entry.count).map_err(|_| EngineError::InvalidCount {
                    heir,
                    count: entry.count,
                    reason: "count must be a positive integer".into(),
                })?;
                Ok(HeirEntry::new(heir, count))
            })
            .collect::<EngineResult<Vec<_>>>()?;

        Ok(EstateInput {
            deceased: self.deceased,
            assets: money("assets", self.assets)?,
            liabilities: money("liabilities", self.liabilities)?,
            funeral_expenses: money("funeralExpenses", self.funeral_expenses)?,
            bequests: money("bequests", self.bequests)?,
            heirs,
        })
    }
}

fn money(field: &'static str, value: f64) -> EngineResult<Decimal> {
    if !value.is_finite() {
        return Err(EngineError::InvalidEstate {
            field,
            reason: format!("must be a finite number, got {value}"),
        });
    }
    Decimal::from_f64(value).ok_or_else(|| EngineError::InvalidEstate {
        field,
        reason: format!("{value} is out of range"),
    })
}

fn number(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// One row of the response's share table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseShare {
    pub heir: String,
    pub count: u32,
    pub classification: Classification,
    pub status: ShareStatus,
    pub share_fraction_of_total: f64,
    pub share_amount: f64,
    /// Exact fraction, e.g. "3/8".
    pub fraction: Fraction,
    #[serde(rename = "perHeadFraction")]
    pub per_head_fraction: f64,
    #[serde(rename = "perHeadAmount")]
    pub per_head_amount: f64,
}

impl From<&ShareRecord> for ResponseShare {
    fn from(record: &ShareRecord) -> Self {
        Self {
            heir: record.heir.label().to_string(),
            count: record.count,
            classification: record.classification,
            status: record.status,
            share_fraction_of_total: record.fraction.to_f64(),
            share_amount: number(record.amount),
            fraction: record.fraction,
            per_head_fraction: record.per_head_fraction.to_f64(),
            per_head_amount: number(record.per_head_amount),
        }
    }
}

/// Response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResponse {
    pub net_estate: f64,
    pub total_fraction_allocated: f64,
    pub reconciliation: Reconciliation,
    pub shares: Vec<ResponseShare>,
    pub bequest_applied: f64,
    pub unabsorbed_fraction: f64,
    pub rounding_drift: f64,
}

impl From<&CalculationResult> for CalculationResponse {
    fn from(result: &CalculationResult) -> Self {
        Self {
            net_estate: number(result.net_estate),
            total_fraction_allocated: result.total_fraction.to_f64(),
            reconciliation: result.reconciliation,
            shares: result.shares.iter().map(ResponseShare::from).collect(),
            bequest_applied: number(result.bequest_applied),
            unabsorbed_fraction: result.unabsorbed_fraction.to_f64(),
            rounding_drift: number(result.rounding_drift),
        }
    }
}

impl CalculationResponse {
    /// Allocated rows.
    pub fn allocated(&self) -> impl Iterator<Item = &ResponseShare> {
        self.shares
            .iter()
            .filter(|share| share.status == ShareStatus::Allocated)
    }

    /// Whether the allocated fractions sum to one within `tolerance`, or the
    /// allocated set is empty and the total is zero.
    #[must_use]
    pub fn fractions_balance(&self, tolerance: f64) -> bool {
        let sum: f64 = self.allocated().map(|s| s.share_fraction_of_total).sum();
        if self.allocated().next().is_none() {
            return sum == 0.0;
        }
        (sum - 1.0).abs() <= tolerance
    }

    pub fn to_json(&self, pretty: bool) -> EngineResult<String> {
        let body = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(body)
    }
}

/// Error body returned in place of a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Set for rule-table defects, which are not the caller's fault.
    #[serde(default)]
    pub internal: bool,
}

impl From<&EngineError> for ErrorBody {
    fn from(err: &EngineError) -> Self {
        Self {
            error: err.kind().to_string(),
            message: err.to_string(),
            field: err.field().map(str::to_string),
            internal: err.is_internal(),
        }
    }
}
