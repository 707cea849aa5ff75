pub mod config;
pub mod error;
pub mod render;
pub mod report;
pub mod store;

pub use config::{BasedBy, Config, NamingBy, PartyType, ReportFilters};
pub use error::{ReportError, Result};
pub use report::{run_summary, ActionRef, GroupRow, OutputRow, ReportRows, SummaryReport};
pub use store::{DataStore, LedgerRow, Sources};
