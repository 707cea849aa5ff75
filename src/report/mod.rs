//! Accounts receivable summary pipeline.
//!
//! Ledger rows are folded into one [`PartyTotal`] per party, parties with a
//! zero balance are dropped, the rest are sorted and paged, and only the
//! paged slice is joined with master data and the advance / GL overlays.
//! In debtor mode the party totals are summed per customer group instead,
//! without any master-data or overlay queries.

mod aggregate;
mod columns;
mod enrich;
mod overlay;
mod pager;
mod summary;

pub use aggregate::{aggregate, PartyTotal};
pub use columns::{build_columns, Column, FieldType};
pub use enrich::{enrich, ActionRef, OutputRow};
pub use overlay::{advance_amounts, gl_balances, Overlays};
pub use pager::{eligible_parties, is_zero_balance, paginate, round_to, Page, PageWindow};
pub use summary::{group_by_customer_group, run_summary, GroupRow, ReportRows, SummaryReport};
