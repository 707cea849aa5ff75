use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    pub report: ReportSettings,
    #[serde(default)]
    pub ageing: AgeingRanges,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReportSettings {
    #[serde(default)]
    pub party_type: PartyType,
    #[serde(default)]
    pub naming_by: NamingBy,
    /// Company used when the invocation does not name one
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            party_type: PartyType::default(),
            naming_by: NamingBy::default(),
            company: None,
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// The counterpart kind a receivable is owed by
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartyType {
    #[default]
    Customer,
    Supplier,
}

impl PartyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartyType::Customer => "Customer",
            PartyType::Supplier => "Supplier",
        }
    }
}

impl fmt::Display for PartyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How parties are named in the master data.
///
/// With `Naming Series` the party id is a generated code, so the report
/// looks up and shows the human-readable name next to it.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamingBy {
    #[default]
    #[serde(rename = "Customer Name")]
    CustomerName,
    #[serde(rename = "Naming Series")]
    NamingSeries,
}

/// Upper bounds (in days) of the first four ageing buckets
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct AgeingRanges {
    pub range1: u32,
    pub range2: u32,
    pub range3: u32,
    pub range4: u32,
}

impl Default for AgeingRanges {
    fn default() -> Self {
        Self {
            range1: 30,
            range2: 60,
            range3: 90,
            range4: 120,
        }
    }
}

impl AgeingRanges {
    /// Column labels for the five buckets, e.g. "0-30" .. "121-Above"
    pub fn labels(&self) -> [String; 5] {
        [
            format!("0-{}", self.range1),
            format!("{}-{}", self.range1.saturating_add(1), self.range2),
            format!("{}-{}", self.range2.saturating_add(1), self.range3),
            format!("{}-{}", self.range3.saturating_add(1), self.range4),
            format!("{}-Above", self.range4.saturating_add(1)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ageing_labels() {
        assert_eq!(
            AgeingRanges::default().labels(),
            ["0-30", "31-60", "61-90", "91-120", "121-Above"].map(String::from)
        );
    }

    #[test]
    fn test_ageing_labels_saturate_at_max_range() {
        let ranges = AgeingRanges {
            range1: 30,
            range2: 60,
            range3: 90,
            range4: u32::MAX,
        };
        assert_eq!(ranges.labels()[4], format!("{}-Above", u32::MAX));
    }
}
