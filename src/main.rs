use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing_subscriber::EnvFilter;

use ar_summary::config::{
    config_dir, load_config, load_store, ACCOUNTS_TEMPLATE, CONFIG_TEMPLATE, DIRECTORY_TEMPLATE,
    RECEIVABLES_TEMPLATE,
};
use ar_summary::render::{format_amount, render_table};
use ar_summary::report::{build_columns, FieldType};
use ar_summary::{run_summary, BasedBy, ReportError, ReportFilters, ReportRows, Result, Sources};

#[derive(Parser)]
#[command(name = "ar-summary")]
#[command(version, about = "Accounts receivable summary reports", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.ar-summary or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with template files
    Init,

    /// Show one page of the receivable summary
    Summary(SummaryArgs),

    /// Show the columns a summary with these options would have
    Columns(SummaryArgs),
}

#[derive(Clone, Copy, ValueEnum)]
enum By {
    /// One row per party
    Patient,
    /// One row per customer group
    Debtor,
}

#[derive(Args)]
struct SummaryArgs {
    /// Rows per page (0 means the default of 20)
    #[arg(long, default_value_t = 20)]
    page_length: usize,

    /// Zero-based index of the first row to show
    #[arg(long, default_value_t = 0)]
    start: usize,

    /// Group rows by party or by customer group
    #[arg(long, value_enum, default_value_t = By::Patient)]
    by: By,

    /// Add GL balance and difference columns
    #[arg(long)]
    gl_balance: bool,

    /// Add the sales person column
    #[arg(long)]
    sales_person: bool,

    /// Count advance payments recorded by the report date but posted later
    #[arg(long)]
    future_payments: bool,

    /// Add ageing bucket columns
    #[arg(long)]
    ageing: bool,

    /// Report date (YYYY-MM-DD, default: today)
    #[arg(long)]
    date: Option<String>,

    /// Company (default: company from config.toml)
    #[arg(long)]
    company: Option<String>,

    /// Only this customer
    #[arg(long)]
    customer: Option<String>,

    /// Only this customer group
    #[arg(long)]
    customer_group: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl SummaryArgs {
    fn filters(&self) -> Result<ReportFilters> {
        let report_date = match &self.date {
            Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|_| ReportError::InvalidDate(s.clone()))?,
            None => chrono::Local::now().date_naive(),
        };

        let mut filters = ReportFilters::as_of(report_date);
        filters.page_length = self.page_length;
        filters.start = self.start;
        filters.based_by = match self.by {
            By::Patient => BasedBy::Patient,
            By::Debtor => BasedBy::Debtor,
        };
        filters.show_gl_balance = self.gl_balance;
        filters.show_sales_person = self.sales_person;
        filters.show_future_payments = self.future_payments;
        filters.show_ageing = self.ageing;
        filters.company = self.company.clone();
        filters.customer = self.customer.clone();
        filters.customer_group = self.customer_group.clone();
        Ok(filters)
    }
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Summary(args) => cmd_summary(&cfg_dir, &args),
        Commands::Columns(args) => cmd_columns(&cfg_dir, &args),
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(ReportError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;

    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(cfg_dir.join("receivables.toml"), RECEIVABLES_TEMPLATE)?;
    fs::write(cfg_dir.join("directory.toml"), DIRECTORY_TEMPLATE)?;
    fs::write(cfg_dir.join("accounts.toml"), ACCOUNTS_TEMPLATE)?;

    println!("Initialized ar-summary config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Set company and naming:     $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!(
        "  2. Load receivable rows:       $EDITOR {}/receivables.toml",
        cfg_dir.display()
    );
    println!(
        "  3. Add customers and patients: $EDITOR {}/directory.toml",
        cfg_dir.display()
    );
    println!(
        "  4. Add payments and GL:        $EDITOR {}/accounts.toml",
        cfg_dir.display()
    );
    println!();
    println!("Then run the report:");
    println!("  ar-summary summary --date <YYYY-MM-DD>");

    Ok(())
}

/// Show one page of the receivable summary
fn cmd_summary(cfg_dir: &Path, args: &SummaryArgs) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(ReportError::ConfigNotFound(cfg_dir.to_path_buf()));
    }

    let config = load_config(cfg_dir)?;
    let store = load_store(cfg_dir)?;
    let filters = args.filters()?;

    let report = run_summary(Sources::from_store(&store), &config, &filters)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let noun = match report.rows {
        ReportRows::Parties(_) => "parties",
        ReportRows::Groups(_) => "groups",
    };

    if report.rows.is_empty() {
        println!("No outstanding receivables found.");
        println!("  Total: {} {}", report.total_count, noun);
        return Ok(());
    }

    println!("{}", render_table(&report));

    let page_length = filters.page_length();
    println!(
        "Page {} of {} ({} {})",
        filters.start / page_length + 1,
        report.page_count,
        report.total_count,
        noun
    );

    if let ReportRows::Parties(rows) = &report.rows {
        let outstanding: f64 = rows.iter().map(|r| r.totals.amounts.outstanding).sum();
        println!(
            "  Page outstanding: {}{}",
            config.report.currency_symbol,
            format_amount(outstanding)
        );
    }

    Ok(())
}

#[derive(Tabled)]
struct ColumnRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "LABEL")]
    label: String,
    #[tabled(rename = "FIELD")]
    fieldname: String,
    #[tabled(rename = "TYPE")]
    fieldtype: String,
    #[tabled(rename = "OPTIONS")]
    options: String,
    #[tabled(rename = "WIDTH")]
    width: u32,
}

/// Show the column schema for the given options
fn cmd_columns(cfg_dir: &Path, args: &SummaryArgs) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(ReportError::ConfigNotFound(cfg_dir.to_path_buf()));
    }

    let config = load_config(cfg_dir)?;
    let filters = args.filters()?;
    let columns = build_columns(&config, &filters);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&columns)?);
        return Ok(());
    }

    let rows: Vec<ColumnRow> = columns
        .into_iter()
        .enumerate()
        .map(|(idx, c)| ColumnRow {
            index: idx + 1,
            label: c.label,
            fieldname: c.fieldname,
            fieldtype: match c.fieldtype {
                FieldType::Link => "Link",
                FieldType::Data => "Data",
                FieldType::Currency => "Currency",
            }
            .to_string(),
            options: c.options.unwrap_or_default(),
            width: c.width,
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}
