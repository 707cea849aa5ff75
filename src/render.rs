//! Plain-text rendering of a [`SummaryReport`] for the terminal.

use tabled::{builder::Builder, settings::Style};

use crate::report::{ActionRef, Column, GroupRow, OutputRow, ReportRows, SummaryReport};

/// Fields a customer-group row can fill
const GROUP_FIELDS: [&str; 3] = ["customer_group", "outstanding", "receipt"];

/// Insert a comma every three digits, counting from the right
fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}

/// Format a money amount with two decimal places and thousands separators
pub fn format_amount(value: f64) -> String {
    let rounded = format!("{:.2}", value);
    let (whole, frac) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let negative = whole.starts_with('-');
    let digits = whole.trim_start_matches('-');
    let grouped = group_digits(digits);

    if negative {
        format!("-{}.{}", grouped, frac)
    } else {
        format!("{}.{}", grouped, frac)
    }
}

pub fn format_action(action: &ActionRef) -> String {
    match action {
        ActionRef::Receipt { party, outstanding } => {
            format!("receipt {} {}", party, format_amount(*outstanding))
        }
        ActionRef::Statement { party } => format!("statement {}", party),
        ActionRef::GroupReceipt { customer_group } => format!("receipt {}", customer_group),
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn amount(value: Option<f64>) -> String {
    value.map(format_amount).unwrap_or_default()
}

/// Display value of `fieldname` for a party row
pub fn party_cell(row: &OutputRow, fieldname: &str) -> String {
    let totals = &row.totals;
    let amounts = &totals.amounts;

    match fieldname {
        "party" => row.party.clone(),
        "party_name" => text(&row.party_name),
        "patient" => text(&row.patient),
        "mobile_no" => text(&row.mobile_no),
        "responsible" => text(&row.responsible),
        "customer_group" => text(&totals.customer_group),
        "supplier_group" => text(&totals.supplier_group),
        "territory" => text(&totals.territory),
        "currency" => text(&totals.currency),
        "sales_person" => totals.sales_person.join(", "),
        "advance" => format_amount(row.advance),
        "gl_balance" => amount(row.gl_balance),
        "diff" => amount(row.diff),
        "invoiced" => format_amount(amounts.invoiced),
        "paid" => format_amount(amounts.paid),
        "credit_note" => format_amount(amounts.credit_note),
        "outstanding" => format_amount(amounts.outstanding),
        "range1" => format_amount(amounts.range1),
        "range2" => format_amount(amounts.range2),
        "range3" => format_amount(amounts.range3),
        "range4" => format_amount(amounts.range4),
        "range5" => format_amount(amounts.range5),
        "total_due" => format_amount(amounts.total_due),
        "receipt" => format_action(&row.receipt),
        "statement" => format_action(&row.statement),
        _ => String::new(),
    }
}

/// Display value of `fieldname` for a customer-group row
pub fn group_cell(row: &GroupRow, fieldname: &str) -> String {
    match fieldname {
        "customer_group" => row.customer_group.clone(),
        "outstanding" => format_amount(row.outstanding),
        "receipt" => format_action(&row.receipt),
        _ => String::new(),
    }
}

fn table<T>(columns: &[&Column], rows: &[T], cell: impl Fn(&T, &str) -> String) -> String {
    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|c| c.label.clone()));
    for row in rows {
        builder.push_record(columns.iter().map(|c| cell(row, &c.fieldname)));
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// Render the report rows under their column labels
pub fn render_table(report: &SummaryReport) -> String {
    match &report.rows {
        ReportRows::Parties(rows) => {
            let columns: Vec<&Column> = report.columns.iter().collect();
            table(&columns, rows.as_slice(), party_cell)
        }
        ReportRows::Groups(rows) => {
            let columns: Vec<&Column> = report
                .columns
                .iter()
                .filter(|c| GROUP_FIELDS.contains(&c.fieldname.as_str()))
                .collect();
            table(&columns, rows.as_slice(), group_cell)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_groups_thousands() {
        assert_eq!(format_amount(1234567.891), "1,234,567.89");
        assert_eq!(format_amount(-1500.0), "-1,500.00");
        assert_eq!(format_amount(0.5), "0.50");
    }

    #[test]
    fn test_format_amount_beyond_i64() {
        assert_eq!(format_amount(1e20), "100,000,000,000,000,000,000.00");
        assert_eq!(format_amount(-2.5e19), "-25,000,000,000,000,000,000.00");
    }

    #[test]
    fn test_format_action() {
        let receipt = ActionRef::Receipt {
            party: "CUST-0001".to_string(),
            outstanding: 1200.0,
        };
        assert_eq!(format_action(&receipt), "receipt CUST-0001 1,200.00");

        let group = ActionRef::GroupReceipt {
            customer_group: "Insurance".to_string(),
        };
        assert_eq!(format_action(&group), "receipt Insurance");
    }
}
