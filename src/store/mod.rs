//! Data-source seams of the report.
//!
//! The report core never reads storage directly. It asks a [`LedgerSource`]
//! for receivable rows, a [`LookupService`] for batched master-data
//! projections, and the [`PaymentLedger`] / [`GeneralLedger`] for the two
//! per-party overlays. [`DataStore`] implements all four over in-memory
//! records loaded from TOML.

mod data;

pub use data::{CreditLimit, CustomerRecord, DataStore, GlEntry, PatientRecord, PaymentEntry};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::ops::AddAssign;

use crate::config::PartyType;
use crate::error::Result;

/// Monetary columns of a receivable row, summed per party
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq)]
pub struct Amounts {
    #[serde(default)]
    pub invoiced: f64,
    #[serde(default)]
    pub paid: f64,
    #[serde(default)]
    pub credit_note: f64,
    #[serde(default)]
    pub outstanding: f64,
    #[serde(default)]
    pub range1: f64,
    #[serde(default)]
    pub range2: f64,
    #[serde(default)]
    pub range3: f64,
    #[serde(default)]
    pub range4: f64,
    #[serde(default)]
    pub range5: f64,
    #[serde(default)]
    pub total_due: f64,
}

impl AddAssign<&Amounts> for Amounts {
    fn add_assign(&mut self, rhs: &Amounts) {
        self.invoiced += rhs.invoiced;
        self.paid += rhs.paid;
        self.credit_note += rhs.credit_note;
        self.outstanding += rhs.outstanding;
        self.range1 += rhs.range1;
        self.range2 += rhs.range2;
        self.range3 += rhs.range3;
        self.range4 += rhs.range4;
        self.range5 += rhs.range5;
        self.total_due += rhs.total_due;
    }
}

/// A single receivable transaction row
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct LedgerRow {
    pub party: String,
    #[serde(default)]
    pub party_type: PartyType,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub posting_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub amounts: Amounts,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub territory: Option<String>,
    #[serde(default)]
    pub customer_group: Option<String>,
    #[serde(default)]
    pub supplier_group: Option<String>,
    #[serde(default)]
    pub sales_person: Option<String>,
}

/// Row selection passed to [`LedgerSource::fetch`]
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerFilter {
    pub company: Option<String>,
    pub report_date: NaiveDate,
    pub customer: Option<String>,
    pub customer_group: Option<String>,
}

/// Master-data collections reachable through [`LookupService`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Customer,
    CreditLimit,
    Patient,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Customer => "Customer",
            EntityKind::CreditLimit => "Customer Credit Limit",
            EntityKind::Patient => "Patient",
        };
        f.write_str(name)
    }
}

/// `select <fields> from <entity> where <key_field> in (<keys>)`
#[derive(Debug, Clone)]
pub struct LookupQuery<'a> {
    pub entity: EntityKind,
    pub key_field: &'static str,
    pub keys: &'a [String],
    pub fields: &'static [&'static str],
}

/// One projected master-data record. Empty values are not stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record(BTreeMap<String, String>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: &str, value: Option<String>) {
        match value {
            Some(v) if !v.is_empty() => {
                self.0.insert(field.to_string(), v);
            }
            _ => {
                self.0.remove(field);
            }
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            let field: String = k.into();
            record.set(&field, Some(v.into()));
        }
        record
    }
}

pub trait LedgerSource {
    /// All receivable rows of `party_type` matching `filter`
    fn fetch(&self, party_type: PartyType, filter: &LedgerFilter) -> Result<Vec<LedgerRow>>;
}

pub trait LookupService {
    /// Answer one batched lookup in a single round trip
    fn batch_fetch(&self, query: &LookupQuery<'_>) -> Result<Vec<Record>>;
}

pub trait PaymentLedger {
    /// Per-party sum of positive unallocated amounts of submitted payment
    /// entries. Parties with a non-positive sum are absent.
    fn sum_unallocated(
        &self,
        party_type: PartyType,
        company: Option<&str>,
        report_date: NaiveDate,
        include_future: bool,
    ) -> Result<HashMap<String, f64>>;
}

pub trait GeneralLedger {
    /// Per-party `debit - credit` over non-cancelled entries up to
    /// `report_date`. Parties with an exactly zero balance are absent.
    fn sum_debit_credit(&self, report_date: NaiveDate) -> Result<HashMap<String, f64>>;
}

/// The collaborators one report run talks to
#[derive(Clone, Copy)]
pub struct Sources<'a> {
    pub ledger: &'a dyn LedgerSource,
    pub lookup: &'a dyn LookupService,
    pub payments: &'a dyn PaymentLedger,
    pub gl: &'a dyn GeneralLedger,
}

impl<'a> Sources<'a> {
    /// Use a single backend for every collaborator
    pub fn from_store<S>(store: &'a S) -> Self
    where
        S: LedgerSource + LookupService + PaymentLedger + GeneralLedger,
    {
        Self {
            ledger: store,
            lookup: store,
            payments: store,
            gl: store,
        }
    }
}
