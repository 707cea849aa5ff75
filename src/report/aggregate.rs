use serde::Serialize;
use std::collections::HashMap;

use crate::store::{Amounts, LedgerRow};

/// Running totals of one party across its receivable rows
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PartyTotal {
    #[serde(flatten)]
    pub amounts: Amounts,
    pub currency: Option<String>,
    pub territory: Option<String>,
    pub customer_group: Option<String>,
    pub supplier_group: Option<String>,
    pub sales_person: Vec<String>,
}

impl PartyTotal {
    /// Fold one ledger row of this party into the totals
    pub fn absorb(&mut self, row: &LedgerRow) {
        self.amounts += &row.amounts;

        self.currency = row.currency.clone();

        keep_non_empty(&mut self.territory, &row.territory);
        keep_non_empty(&mut self.customer_group, &row.customer_group);
        keep_non_empty(&mut self.supplier_group, &row.supplier_group);

        if let Some(person) = row.sales_person.as_ref().filter(|p| !p.is_empty()) {
            self.sales_person.push(person.clone());
        }
    }
}

fn keep_non_empty(slot: &mut Option<String>, value: &Option<String>) {
    if let Some(v) = value.as_ref().filter(|v| !v.is_empty()) {
        *slot = Some(v.clone());
    }
}

/// Group ledger rows by party, one [`PartyTotal`] per distinct party
pub fn aggregate(rows: &[LedgerRow]) -> HashMap<String, PartyTotal> {
    let mut totals: HashMap<String, PartyTotal> = HashMap::new();

    for row in rows {
        totals.entry(row.party.clone()).or_default().absorb(row);
    }

    totals
}
