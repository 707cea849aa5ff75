use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

use crate::config::PartyType;
use crate::error::Result;
use crate::store::{GeneralLedger, PaymentLedger};

/// Per-party figures queried independently of the receivable rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlays {
    pub advance: HashMap<String, f64>,
    /// Present only when the GL cross-check was requested
    pub gl_balance: Option<HashMap<String, f64>>,
}

impl Overlays {
    pub fn advance_for(&self, party: &str) -> f64 {
        self.advance.get(party).copied().unwrap_or(0.0)
    }

    /// `(gl_balance, diff)` for a party with the given outstanding amount.
    ///
    /// A party missing from the GL map keeps `gl_balance = None` while its
    /// difference is computed against zero.
    pub fn gl_for(&self, party: &str, outstanding: f64) -> (Option<f64>, Option<f64>) {
        match &self.gl_balance {
            Some(balances) => {
                let balance = balances.get(party).copied();
                (balance, Some(outstanding - balance.unwrap_or(0.0)))
            }
            None => (None, None),
        }
    }
}

/// Unallocated advance payments per party.
///
/// Only customers receive advances here; any other party type gets an empty
/// map without touching the payment ledger.
pub fn advance_amounts(
    payments: &dyn PaymentLedger,
    party_type: PartyType,
    company: Option<&str>,
    report_date: NaiveDate,
    show_future_payments: bool,
) -> Result<HashMap<String, f64>> {
    if party_type != PartyType::Customer {
        return Ok(HashMap::new());
    }

    let mut amounts =
        payments.sum_unallocated(party_type, company, report_date, show_future_payments)?;
    amounts.retain(|_, amount| *amount > 0.0);

    debug!(parties = amounts.len(), "resolved advance payments");
    Ok(amounts)
}

/// General-ledger balance per party, zero balances omitted
pub fn gl_balances(gl: &dyn GeneralLedger, report_date: NaiveDate) -> Result<HashMap<String, f64>> {
    let mut balances = gl.sum_debit_credit(report_date)?;
    balances.retain(|_, balance| *balance != 0.0);

    debug!(parties = balances.len(), "resolved gl balances");
    Ok(balances)
}
