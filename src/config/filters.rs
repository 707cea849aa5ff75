use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_LENGTH: usize = 20;

/// Output mode of a summary run
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum BasedBy {
    /// One row per party
    #[default]
    Patient,
    /// One row per customer group
    Debtor,
}

/// Invocation parameters for a single report run.
///
/// Every optional field has a defined default, so callers resolve this once
/// at the entry point and the pipeline never checks for presence again.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReportFilters {
    #[serde(default = "default_page_length")]
    pub page_length: usize,
    #[serde(default)]
    pub start: usize,
    #[serde(default)]
    pub based_by: BasedBy,
    #[serde(default)]
    pub show_gl_balance: bool,
    #[serde(default)]
    pub show_sales_person: bool,
    #[serde(default)]
    pub show_future_payments: bool,
    #[serde(default)]
    pub show_ageing: bool,
    #[serde(default = "today")]
    pub report_date: NaiveDate,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub customer_group: Option<String>,
}

fn default_page_length() -> usize {
    DEFAULT_PAGE_LENGTH
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

impl Default for ReportFilters {
    fn default() -> Self {
        Self::as_of(today())
    }
}

impl ReportFilters {
    /// Default filters for a report dated `report_date`
    pub fn as_of(report_date: NaiveDate) -> Self {
        Self {
            page_length: DEFAULT_PAGE_LENGTH,
            start: 0,
            based_by: BasedBy::default(),
            show_gl_balance: false,
            show_sales_person: false,
            show_future_payments: false,
            show_ageing: false,
            report_date,
            company: None,
            customer: None,
            customer_group: None,
        }
    }

    /// Page length with zero treated as unset
    pub fn page_length(&self) -> usize {
        if self.page_length == 0 {
            DEFAULT_PAGE_LENGTH
        } else {
            self.page_length
        }
    }
}
