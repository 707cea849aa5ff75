use serde::Serialize;

use crate::config::{Config, NamingBy, PartyType, ReportFilters};

const DEFAULT_WIDTH: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldType {
    Link,
    Data,
    Currency,
}

/// Display-schema entry for one report column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub label: String,
    pub fieldname: String,
    pub fieldtype: FieldType,
    pub options: Option<String>,
    pub width: u32,
}

impl Column {
    fn new(label: impl Into<String>, fieldname: &str, fieldtype: FieldType) -> Self {
        Self {
            label: label.into(),
            fieldname: fieldname.to_string(),
            fieldtype,
            options: None,
            width: DEFAULT_WIDTH,
        }
    }

    fn currency(label: impl Into<String>, fieldname: &str) -> Self {
        Self::new(label, fieldname, FieldType::Currency).options("currency")
    }

    fn data(label: impl Into<String>, fieldname: &str) -> Self {
        Self::new(label, fieldname, FieldType::Data)
    }

    fn link(label: impl Into<String>, fieldname: &str, options: &str) -> Self {
        Self::new(label, fieldname, FieldType::Link).options(options)
    }

    fn options(mut self, options: &str) -> Self {
        self.options = Some(options.to_string());
        self
    }

    fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }
}

/// Column list for a run, in display order. Depends only on configuration.
pub fn build_columns(config: &Config, filters: &ReportFilters) -> Vec<Column> {
    let party_type = config.report.party_type;
    let mut columns = vec![Column::link("Customer ID", "party", party_type.as_str()).width(180)];

    if config.report.naming_by == NamingBy::NamingSeries {
        columns.push(Column::data(format!("{party_type} Name"), "party_name").width(200));
    }

    columns.extend([
        Column::data("Patient ID", "patient"),
        Column::data("Mobile No", "mobile_no"),
        Column::link("Customer Group", "customer_group", "Customer Group").width(150),
        Column::data("Responsible", "responsible"),
        Column::currency("Balance", "outstanding"),
        Column::data("Receipt", "receipt"),
        Column::data("Print Statement", "statement"),
    ]);

    if filters.show_gl_balance {
        columns.push(Column::currency("GL Balance", "gl_balance"));
        columns.push(Column::currency("Difference", "diff"));
    }

    if filters.show_ageing {
        let labels = config.ageing.labels();
        for (i, label) in labels.into_iter().enumerate() {
            columns.push(Column::currency(label, &format!("range{}", i + 1)));
        }
        columns.push(Column::currency("Total Amount Due", "total_due"));
    }

    match party_type {
        PartyType::Customer => {
            if filters.show_sales_person {
                columns.push(Column::data("Sales Person", "sales_person"));
            }
        }
        _ => columns.push(Column::link(
            "Supplier Group",
            "supplier_group",
            "Supplier Group",
        )),
    }

    columns
}
