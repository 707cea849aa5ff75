use std::collections::HashMap;

use super::aggregate::PartyTotal;
use crate::config::{ReportFilters, DEFAULT_PAGE_LENGTH};

/// Decimal places used to decide whether an outstanding balance is zero
const ZERO_PLACES: i32 = 10;

/// Round `value` half away from zero to `places` decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// True when `value` is zero once summation noise is rounded away
pub fn is_zero_balance(value: f64) -> bool {
    round_to(value, ZERO_PLACES) == 0.0
}

/// The `[start, start + page_length)` slice requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: usize,
    pub page_length: usize,
}

impl PageWindow {
    pub fn new(start: usize, page_length: usize) -> Self {
        let page_length = if page_length == 0 {
            DEFAULT_PAGE_LENGTH
        } else {
            page_length
        };
        Self { start, page_length }
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_LENGTH)
    }
}

impl From<&ReportFilters> for PageWindow {
    fn from(filters: &ReportFilters) -> Self {
        Self::new(filters.start, filters.page_length())
    }
}

/// One page of items plus the counters describing the full list
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub page_count: usize,
}

/// Slice `items` to `window`. Items must already be in their final order.
pub fn paginate<T>(items: Vec<T>, window: PageWindow) -> Page<T> {
    let total_count = items.len();
    let page_count = total_count.div_ceil(window.page_length);

    let items = items
        .into_iter()
        .skip(window.start)
        .take(window.page_length)
        .collect();

    Page {
        items,
        total_count,
        page_count,
    }
}

/// Parties with a non-zero outstanding balance, sorted by party id
pub fn eligible_parties(totals: HashMap<String, PartyTotal>) -> Vec<(String, PartyTotal)> {
    let mut eligible: Vec<(String, PartyTotal)> = totals
        .into_iter()
        .filter(|(_, total)| !is_zero_balance(total.amounts.outstanding))
        .collect();

    eligible.sort_by(|(a, _), (b, _)| a.cmp(b));
    eligible
}
