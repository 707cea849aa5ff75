use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::{
    EntityKind, GeneralLedger, LedgerFilter, LedgerRow, LedgerSource, LookupQuery, LookupService,
    PaymentLedger, Record,
};
use crate::config::PartyType;
use crate::error::{ReportError, Result};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CustomerRecord {
    pub name: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_group: Option<String>,
}

/// Credit limit row of a customer; `parent` is the customer id
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CreditLimit {
    pub parent: String,
    #[serde(default)]
    pub responsible: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PatientRecord {
    pub name: String,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub mobile_no: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PaymentEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub party_type: PartyType,
    pub party: String,
    #[serde(default)]
    pub company: Option<String>,
    pub posting_date: NaiveDate,
    /// Date the entry was recorded, which can precede its posting date
    #[serde(default)]
    pub creation: Option<NaiveDate>,
    /// 0 = draft, 1 = submitted, 2 = cancelled
    #[serde(default)]
    pub docstatus: u8,
    #[serde(default)]
    pub unallocated_amount: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GlEntry {
    #[serde(default)]
    pub party: Option<String>,
    pub posting_date: NaiveDate,
    #[serde(default)]
    pub debit: f64,
    #[serde(default)]
    pub credit: f64,
    #[serde(default)]
    pub is_cancelled: bool,
}

/// In-memory backend for every report collaborator
#[derive(Debug, Clone, Default)]
pub struct DataStore {
    pub receivables: Vec<LedgerRow>,
    pub customers: Vec<CustomerRecord>,
    pub credit_limits: Vec<CreditLimit>,
    pub patients: Vec<PatientRecord>,
    pub payment_entries: Vec<PaymentEntry>,
    pub gl_entries: Vec<GlEntry>,
}

/// Field access used to answer generic lookups
trait Lookupable {
    const FIELDS: &'static [&'static str];

    fn field(&self, name: &str) -> Option<String>;
}

impl Lookupable for CustomerRecord {
    const FIELDS: &'static [&'static str] = &["name", "customer_name", "customer_group"];

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            "customer_name" => self.customer_name.clone(),
            "customer_group" => self.customer_group.clone(),
            _ => None,
        }
    }
}

impl Lookupable for CreditLimit {
    const FIELDS: &'static [&'static str] = &["parent", "responsible", "date"];

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "parent" => Some(self.parent.clone()),
            "responsible" => self.responsible.clone(),
            "date" => self.date.map(|d| d.to_string()),
            _ => None,
        }
    }
}

impl Lookupable for PatientRecord {
    const FIELDS: &'static [&'static str] = &["name", "customer", "mobile_no"];

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            "customer" => self.customer.clone(),
            "mobile_no" => self.mobile_no.clone(),
            _ => None,
        }
    }
}

fn project<T: Lookupable>(records: &[T], query: &LookupQuery<'_>) -> Result<Vec<Record>> {
    let unknown = std::iter::once(query.key_field)
        .chain(query.fields.iter().copied())
        .find(|f| !T::FIELDS.contains(f));
    if let Some(field) = unknown {
        return Err(ReportError::UnknownLookupField {
            entity: query.entity.to_string(),
            field: field.to_string(),
        });
    }

    let keys: HashSet<&str> = query.keys.iter().map(String::as_str).collect();

    let rows = records
        .iter()
        .filter(|r| {
            r.field(query.key_field)
                .is_some_and(|k| keys.contains(k.as_str()))
        })
        .map(|r| {
            let mut record = Record::new();
            record.set(query.key_field, r.field(query.key_field));
            for field in query.fields {
                record.set(field, r.field(field));
            }
            record
        })
        .collect();

    Ok(rows)
}

impl LedgerSource for DataStore {
    fn fetch(&self, party_type: PartyType, filter: &LedgerFilter) -> Result<Vec<LedgerRow>> {
        let rows = self
            .receivables
            .iter()
            .filter(|r| r.party_type == party_type)
            .filter(|r| match (&filter.company, &r.company) {
                (Some(wanted), Some(company)) => wanted == company,
                _ => true,
            })
            .filter(|r| r.posting_date.map_or(true, |d| d <= filter.report_date))
            .filter(|r| filter.customer.as_ref().map_or(true, |c| &r.party == c))
            .filter(|r| {
                filter
                    .customer_group
                    .as_ref()
                    .map_or(true, |g| r.customer_group.as_ref() == Some(g))
            })
            .cloned()
            .collect();

        Ok(rows)
    }
}

impl LookupService for DataStore {
    fn batch_fetch(&self, query: &LookupQuery<'_>) -> Result<Vec<Record>> {
        match query.entity {
            EntityKind::Customer => project(&self.customers, query),
            EntityKind::CreditLimit => project(&self.credit_limits, query),
            EntityKind::Patient => project(&self.patients, query),
        }
    }
}

impl PaymentLedger for DataStore {
    fn sum_unallocated(
        &self,
        party_type: PartyType,
        company: Option<&str>,
        report_date: NaiveDate,
        include_future: bool,
    ) -> Result<HashMap<String, f64>> {
        let mut sums: HashMap<String, f64> = HashMap::new();

        for entry in &self.payment_entries {
            let dated = entry.posting_date <= report_date
                || (include_future && entry.creation.is_some_and(|c| c <= report_date));

            if entry.party_type != party_type
                || entry.docstatus != 1
                || company.is_some_and(|c| entry.company.as_deref() != Some(c))
                || !dated
                || entry.unallocated_amount <= 0.0
            {
                continue;
            }

            *sums.entry(entry.party.clone()).or_insert(0.0) += entry.unallocated_amount;
        }

        sums.retain(|_, amount| *amount > 0.0);
        Ok(sums)
    }
}

impl GeneralLedger for DataStore {
    fn sum_debit_credit(&self, report_date: NaiveDate) -> Result<HashMap<String, f64>> {
        let mut balances: HashMap<String, f64> = HashMap::new();

        for entry in &self.gl_entries {
            let Some(party) = entry.party.as_deref().filter(|p| !p.is_empty()) else {
                continue;
            };
            if entry.is_cancelled || entry.posting_date > report_date {
                continue;
            }
            *balances.entry(party.to_string()).or_insert(0.0) += entry.debit - entry.credit;
        }

        balances.retain(|_, balance| *balance != 0.0);
        Ok(balances)
    }
}
