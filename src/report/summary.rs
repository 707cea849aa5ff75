use serde::Serialize;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use super::aggregate::{aggregate, PartyTotal};
use super::columns::{build_columns, Column};
use super::enrich::{enrich, ActionRef, OutputRow};
use super::overlay::{advance_amounts, gl_balances, Overlays};
use super::pager::{eligible_parties, paginate, Page, PageWindow};
use crate::config::{BasedBy, Config, ReportFilters};
use crate::error::Result;
use crate::store::{LedgerFilter, Sources};

/// Runs slower than this are logged as warnings
const SLOW_RUN: Duration = Duration::from_secs(1);

/// Outstanding balance of one customer group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRow {
    pub customer_group: String,
    pub outstanding: f64,
    pub receipt: ActionRef,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportRows {
    Parties(Vec<OutputRow>),
    Groups(Vec<GroupRow>),
}

impl ReportRows {
    pub fn len(&self) -> usize {
        match self {
            ReportRows::Parties(rows) => rows.len(),
            ReportRows::Groups(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything the viewer needs to render one page of the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub columns: Vec<Column>,
    pub rows: ReportRows,
    pub total_count: usize,
    pub page_count: usize,
}

/// Sum outstanding per customer group, sorted by group name.
/// Parties without a group do not contribute.
pub fn group_by_customer_group(parties: &[(String, PartyTotal)]) -> Vec<GroupRow> {
    let mut groups: BTreeMap<&str, f64> = BTreeMap::new();

    for (_, total) in parties {
        let Some(group) = total.customer_group.as_deref().filter(|g| !g.is_empty()) else {
            continue;
        };
        *groups.entry(group).or_insert(0.0) += total.amounts.outstanding;
    }

    groups
        .into_iter()
        .map(|(group, outstanding)| GroupRow {
            customer_group: group.to_string(),
            outstanding,
            receipt: ActionRef::GroupReceipt {
                customer_group: group.to_string(),
            },
        })
        .collect()
}

fn resolve_overlays(
    sources: Sources<'_>,
    config: &Config,
    filters: &ReportFilters,
) -> Result<Overlays> {
    let company = filters
        .company
        .as_deref()
        .or(config.report.company.as_deref());

    let advance = advance_amounts(
        sources.payments,
        config.report.party_type,
        company,
        filters.report_date,
        filters.show_future_payments,
    )?;

    let gl_balance = if filters.show_gl_balance {
        Some(gl_balances(sources.gl, filters.report_date)?)
    } else {
        None
    };

    Ok(Overlays {
        advance,
        gl_balance,
    })
}

/// Materialize output rows for `parties`, skipping every query when empty
fn materialize(
    sources: Sources<'_>,
    config: &Config,
    filters: &ReportFilters,
    parties: Vec<(String, PartyTotal)>,
) -> Result<Vec<OutputRow>> {
    if parties.is_empty() {
        return Ok(Vec::new());
    }
    let overlays = resolve_overlays(sources, config, filters)?;
    enrich(sources.lookup, parties, &overlays, config.report.naming_by)
}

/// Build one page of the accounts receivable summary.
///
/// Every call recomputes from the ledger; nothing is cached between runs.
pub fn run_summary(
    sources: Sources<'_>,
    config: &Config,
    filters: &ReportFilters,
) -> Result<SummaryReport> {
    let started = Instant::now();

    let columns = build_columns(config, filters);
    let window = PageWindow::from(filters);

    let ledger_filter = LedgerFilter {
        company: filters
            .company
            .clone()
            .or_else(|| config.report.company.clone()),
        report_date: filters.report_date,
        customer: filters.customer.clone(),
        customer_group: filters.customer_group.clone(),
    };
    let ledger_rows = sources
        .ledger
        .fetch(config.report.party_type, &ledger_filter)?;

    let totals = aggregate(&ledger_rows);
    let party_count = totals.len();
    let eligible = eligible_parties(totals);

    debug!(
        rows = ledger_rows.len(),
        parties = party_count,
        eligible = eligible.len(),
        "aggregated receivables"
    );

    let (rows, total_count, page_count) = match filters.based_by {
        BasedBy::Patient => {
            let page = paginate(eligible, window);
            let rows = materialize(sources, config, filters, page.items)?;
            (ReportRows::Parties(rows), page.total_count, page.page_count)
        }
        // Group rows only need the aggregated totals: no lookups or overlays
        BasedBy::Debtor => {
            let Page {
                items,
                total_count,
                page_count,
            } = paginate(group_by_customer_group(&eligible), window);
            (ReportRows::Groups(items), total_count, page_count)
        }
    };

    let elapsed = started.elapsed();
    if elapsed > SLOW_RUN {
        warn!(
            elapsed_ms = elapsed.as_millis() as u64,
            "receivable summary took {:.2}s",
            elapsed.as_secs_f64()
        );
    }

    Ok(SummaryReport {
        columns,
        rows,
        total_count,
        page_count,
    })
}
