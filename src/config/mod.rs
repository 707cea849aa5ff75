mod filters;
mod settings;

pub use filters::{BasedBy, ReportFilters, DEFAULT_PAGE_LENGTH};
pub use settings::{AgeingRanges, Config, NamingBy, PartyType, ReportSettings};

use crate::error::{ReportError, Result};
use crate::store::{
    CreditLimit, CustomerRecord, DataStore, GlEntry, LedgerRow, PatientRecord, PaymentEntry,
};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding the report config and data files.
///
/// The platform config dir when one can be resolved, `$HOME/.ar-summary`
/// otherwise.
pub fn config_dir() -> Result<PathBuf> {
    if let Some(dirs) = ProjectDirs::from("", "", "ar-summary") {
        return Ok(dirs.config_dir().to_path_buf());
    }

    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".ar-summary"))
        .ok_or_else(|| {
            ReportError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no home directory to hold .ar-summary",
            ))
        })
}

fn load_toml<T: DeserializeOwned>(config_dir: &Path, file: &str) -> Result<T> {
    let path = config_dir.join(file);
    if !path.exists() {
        return Err(ReportError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| ReportError::ConfigParse { path, source: e })
}

/// Load the main config.toml
pub fn load_config(config_dir: &Path) -> Result<Config> {
    load_toml(config_dir, "config.toml")
}

#[derive(Debug, Deserialize)]
struct ReceivablesFile {
    #[serde(default)]
    rows: Vec<LedgerRow>,
}

#[derive(Debug, Deserialize)]
struct DirectoryFile {
    #[serde(default)]
    customers: Vec<CustomerRecord>,
    #[serde(default)]
    credit_limits: Vec<CreditLimit>,
    #[serde(default)]
    patients: Vec<PatientRecord>,
}

#[derive(Debug, Deserialize)]
struct AccountsFile {
    #[serde(default)]
    payment_entries: Vec<PaymentEntry>,
    #[serde(default)]
    gl_entries: Vec<GlEntry>,
}

/// Load receivables.toml, directory.toml and accounts.toml into one store
pub fn load_store(config_dir: &Path) -> Result<DataStore> {
    let receivables: ReceivablesFile = load_toml(config_dir, "receivables.toml")?;
    let directory: DirectoryFile = load_toml(config_dir, "directory.toml")?;
    let accounts: AccountsFile = load_toml(config_dir, "accounts.toml")?;

    Ok(DataStore {
        receivables: receivables.rows,
        customers: directory.customers,
        credit_limits: directory.credit_limits,
        patients: directory.patients,
        payment_entries: accounts.payment_entries,
        gl_entries: accounts.gl_entries,
    })
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[report]
party_type = "Customer"          # or "Supplier"
naming_by = "Naming Series"      # or "Customer Name"
company = "Example Hospital"     # default company for advance payments
currency_symbol = "$"

[ageing]
range1 = 30
range2 = 60
range3 = 90
range4 = 120
"#;

/// Template content for receivables.toml
pub const RECEIVABLES_TEMPLATE: &str = r#"# Receivable ledger rows, one per open invoice. Rows of the same party are
# summed in the report. Dates are quoted: "YYYY-MM-DD".

[[rows]]
party = "CUST-0001"
company = "Example Hospital"
posting_date = "2026-01-10"
invoiced = 200.0
paid = 50.0
outstanding = 150.0
range1 = 150.0
total_due = 150.0
currency = "USD"
territory = "North"
customer_group = "Insurance"
sales_person = "Alice"

[[rows]]
party = "CUST-0001"
company = "Example Hospital"
posting_date = "2026-02-03"
invoiced = 50.0
outstanding = 50.0
range2 = 50.0
total_due = 50.0
currency = "USD"
customer_group = "Insurance"

[[rows]]
party = "CUST-0002"
company = "Example Hospital"
posting_date = "2026-01-22"
invoiced = 320.5
outstanding = 320.5
range1 = 320.5
total_due = 320.5
currency = "USD"
customer_group = "Insurance"

[[rows]]
party = "CUST-0003"
company = "Example Hospital"
posting_date = "2026-01-05"
invoiced = 80.0
outstanding = 80.0
currency = "USD"
customer_group = "Self Pay"

[[rows]]
party = "CUST-0003"
company = "Example Hospital"
posting_date = "2026-01-06"
credit_note = 80.0
outstanding = -80.0
currency = "USD"
customer_group = "Self Pay"

[[rows]]
party = "CUST-0004"
company = "Example Hospital"
posting_date = "2026-02-14"
invoiced = 45.25
outstanding = 45.25
range3 = 45.25
total_due = 45.25
currency = "USD"
customer_group = "Self Pay"
"#;

/// Template content for directory.toml
pub const DIRECTORY_TEMPLATE: &str = r#"# Master data joined into the report.

[[customers]]
name = "CUST-0001"
customer_name = "Jane Doe"

[[customers]]
name = "CUST-0002"
customer_name = "Acme Health Plan"

[[customers]]
name = "CUST-0004"
customer_name = "John Roe"

[[credit_limits]]
parent = "CUST-0001"
responsible = "Dr. Smith"

[[patients]]
name = "PAT-0001"
customer = "CUST-0001"
mobile_no = "+1-555-0101"

[[patients]]
name = "PAT-0004"
customer = "CUST-0004"
"#;

/// Template content for accounts.toml
pub const ACCOUNTS_TEMPLATE: &str = r#"# Payment entries (advance payments) and general ledger entries.
# docstatus: 0 = draft, 1 = submitted, 2 = cancelled

[[payment_entries]]
party = "CUST-0002"
company = "Example Hospital"
posting_date = "2026-01-25"
docstatus = 1
unallocated_amount = 25.0

[[gl_entries]]
party = "CUST-0001"
posting_date = "2026-01-10"
debit = 200.0

[[gl_entries]]
party = "CUST-0002"
posting_date = "2026-01-22"
debit = 320.5
"#;
