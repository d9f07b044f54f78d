use serde::{Deserialize, Serialize};

use crate::fmt;

/// One row of the expense form. The row index comes from the position the
/// backend rendered the row at and is only meaningful within a single
/// validation pass. The amount is kept raw: empty and non-numeric values
/// are legal input, they just contribute nothing to the total.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub row: u32,
    pub amount: String,
    pub account: String,
    pub description: String,
}

impl LineItem {
    pub fn new(row: u32, amount: &str, account: &str, description: &str) -> Self {
        Self {
            row,
            amount: amount.to_string(),
            account: account.to_string(),
            description: description.to_string(),
        }
    }

    /// The amount as a number, or None if it is empty, unparseable, or
    /// non-finite. Callers treat None as a zero contribution.
    pub fn parsed_amount(&self) -> Option<f64> {
        self.amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequiredField {
    Account,
    Description,
}

impl RequiredField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequiredField::Account => "account",
            RequiredField::Description => "description",
        }
    }
}

/// A positive-amount row missing one or more required fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub row: u32,
    pub missing: Vec<RequiredField>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Disabled,
    Enabled,
}

impl SubmitState {
    pub fn is_enabled(&self) -> bool {
        matches!(self, SubmitState::Enabled)
    }
}

/// The derived state of the whole form at one point in time. Recomputed in
/// full on every pass, never patched incrementally.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSnapshot {
    pub total: f64,
    pub violations: Vec<Violation>,
    pub submit: SubmitState,
}

impl FormSnapshot {
    /// The text for the total display element.
    pub fn total_text(&self) -> String {
        fmt::amount(self.total)
    }
}
