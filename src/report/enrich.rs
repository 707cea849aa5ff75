use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use super::aggregate::PartyTotal;
use super::overlay::Overlays;
use crate::config::NamingBy;
use crate::error::Result;
use crate::store::{EntityKind, LookupQuery, LookupService, Record};

/// A follow-up action the report viewer can offer for a row.
///
/// Only identifiers are carried; turning them into buttons or text is the
/// renderer's job.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionRef {
    Receipt { party: String, outstanding: f64 },
    Statement { party: String },
    GroupReceipt { customer_group: String },
}

/// One party row of the summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRow {
    pub party: String,
    pub party_name: Option<String>,
    pub responsible: Option<String>,
    pub mobile_no: Option<String>,
    pub patient: Option<String>,
    pub advance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gl_balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<f64>,
    #[serde(flatten)]
    pub totals: PartyTotal,
    pub receipt: ActionRef,
    pub statement: ActionRef,
}

/// Run one batched lookup and index the records by their key field.
/// Later records win over earlier ones with the same key.
fn lookup_map(
    lookup: &dyn LookupService,
    entity: EntityKind,
    key_field: &'static str,
    keys: &[String],
    fields: &'static [&'static str],
) -> Result<HashMap<String, Record>> {
    let records = lookup.batch_fetch(&LookupQuery {
        entity,
        key_field,
        keys,
        fields,
    })?;

    let mut map = HashMap::with_capacity(records.len());
    for record in records {
        if let Some(key) = record.get(key_field) {
            map.insert(key.to_string(), record);
        }
    }
    Ok(map)
}

fn field(map: &HashMap<String, Record>, party: &str, name: &str) -> Option<String> {
    map.get(party)
        .and_then(|r| r.get(name))
        .map(str::to_string)
}

/// Join master data and overlays into output rows.
///
/// Issues one lookup per dataset for the whole slice and none at all when
/// `parties` is empty.
pub fn enrich(
    lookup: &dyn LookupService,
    parties: Vec<(String, PartyTotal)>,
    overlays: &Overlays,
    naming_by: NamingBy,
) -> Result<Vec<OutputRow>> {
    if parties.is_empty() {
        return Ok(Vec::new());
    }

    let keys: Vec<String> = parties.iter().map(|(party, _)| party.clone()).collect();

    let responsible = lookup_map(
        lookup,
        EntityKind::CreditLimit,
        "parent",
        &keys,
        &["responsible"],
    )?;
    let patients = lookup_map(
        lookup,
        EntityKind::Patient,
        "customer",
        &keys,
        &["mobile_no", "name"],
    )?;
    let names = match naming_by {
        NamingBy::NamingSeries => {
            lookup_map(lookup, EntityKind::Customer, "name", &keys, &["customer_name"])?
        }
        NamingBy::CustomerName => HashMap::new(),
    };

    debug!(
        parties = keys.len(),
        responsible = responsible.len(),
        patients = patients.len(),
        names = names.len(),
        "joined party details"
    );

    let rows = parties
        .into_iter()
        .map(|(party, totals)| {
            let outstanding = totals.amounts.outstanding;
            let (gl_balance, diff) = overlays.gl_for(&party, outstanding);

            OutputRow {
                party_name: field(&names, &party, "customer_name"),
                responsible: field(&responsible, &party, "responsible"),
                mobile_no: field(&patients, &party, "mobile_no"),
                patient: field(&patients, &party, "name"),
                advance: overlays.advance_for(&party),
                gl_balance,
                diff,
                receipt: ActionRef::Receipt {
                    party: party.clone(),
                    outstanding,
                },
                statement: ActionRef::Statement {
                    party: party.clone(),
                },
                totals,
                party,
            }
        })
        .collect();

    Ok(rows)
}
