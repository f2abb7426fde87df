//! Reconciliation: noisy extraction -> consistent billable breakdown
//!
//! The vision model is asked for mathematically consistent output, but
//! that instruction is not trusted: this pass re-derives per-unit
//! prices, fans line items out into sub-items, and cross-checks the
//! item sum against the stated subtotal and grand total server-side.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::extract::extract_receipt_json;
use super::merge::merge_modifier_lines;
use super::money::{format_amount, parse_amount, parse_quantity};
use super::raw::{RawLineItem, RawReceipt};
use super::NOT_AVAILABLE;

/// Tolerance for subtotal/item-sum agreement (one cent).
const CENT: f64 = 0.01;

/// One individually billable unit derived from a line item's quantity.
///
/// Sub-items are what make per-person billing possible when one printed
/// row ("2 Burgers") is split between two people.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubItem {
    /// `"{item name} ({index})"` when quantity > 1, else the item name
    pub name: String,
    /// Per-unit price, 2-decimal string
    pub price: String,
    /// Per-unit tax contribution, 2-decimal string
    pub tax_price: String,
}

/// One priced row of the receipt after reconciliation.
///
/// `total_line_price` is the as-printed, quantity-inclusive line total;
/// `price` is the derived per-unit price. They are deliberately distinct
/// fields so no stage of the pipeline repurposes the other's meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: u32,
    /// As-printed line total (quantity-inclusive), 2-decimal string
    pub total_line_price: String,
    /// Derived per-unit price (`total_line_price / quantity`)
    pub price: String,
    /// Derived per-unit tax contribution (`price * tax_rate`)
    pub tax_price: String,
    pub subitems: Vec<SubItem>,
}

/// A reconciled receipt ready for per-member assignment.
///
/// Monetary fields are 2-decimal strings, `"N/A"` when not extractable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptAnalysis {
    pub store_name: String,
    pub date: String,
    pub total_amount: String,
    pub subtotal: String,
    pub tax_amount: String,
    pub tax_rate: String,
    pub gratuity: String,
    pub gratuity_rate: String,
    pub items: Vec<LineItem>,
    /// Original completion text, preserved for audit when extraction
    /// failed entirely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
    /// Set when stated and derived amounts disagree and the conflict
    /// could not be resolved from trustworthy fields
    #[serde(default)]
    pub needs_review: bool,
}

impl ReceiptAnalysis {
    /// Sentinel analysis for completions with no extractable JSON.
    ///
    /// Well-formed, all-`"N/A"`, empty items, original text preserved.
    /// A recoverable, reportable condition for the caller — never a crash.
    pub fn sentinel(raw_text: &str) -> Self {
        Self {
            store_name: NOT_AVAILABLE.to_string(),
            date: NOT_AVAILABLE.to_string(),
            total_amount: NOT_AVAILABLE.to_string(),
            subtotal: NOT_AVAILABLE.to_string(),
            tax_amount: NOT_AVAILABLE.to_string(),
            tax_rate: NOT_AVAILABLE.to_string(),
            gratuity: NOT_AVAILABLE.to_string(),
            gratuity_rate: NOT_AVAILABLE.to_string(),
            items: vec![],
            raw_response: Some(raw_text.to_string()),
            needs_review: false,
        }
    }
}

/// Resolve the effective tax rate from inconsistently reported fields.
///
/// Receipts report tax rate as literal percentage text ("9.875%"), a
/// fraction, or not at all. Percentage-looking magnitudes (>1) are
/// normalized to fractions; a missing or zero rate falls back to the
/// `tax_amount / subtotal` ratio, the only robust cross-check.
pub fn resolve_tax_rate(tax_amount: &str, subtotal: &str, tax_rate: &str) -> f64 {
    let mut rate = parse_amount(tax_rate);
    if rate > 1.0 {
        rate /= 100.0;
    }

    if rate == 0.0 || rate.is_nan() {
        let tax = parse_amount(tax_amount);
        let sub = parse_amount(subtotal);
        rate = if sub == 0.0 { 0.0 } else { tax / sub };
    }

    rate
}

/// Reconcile one raw line item against the resolved tax rate.
///
/// Quantity defaults to 1, so per-unit division is always defined. The
/// raw `price` is the printed line total per the extraction contract.
pub fn reconcile_line_item(raw: &RawLineItem, tax_rate: f64) -> LineItem {
    let name = raw
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string();

    let quantity = raw.quantity.as_deref().map(parse_quantity).unwrap_or(1);
    let line_total = raw.price.as_deref().map(parse_amount).unwrap_or(0.0);

    let per_unit = line_total / quantity as f64;
    let per_unit_tax = per_unit * tax_rate;

    let subitems = (1..=quantity)
        .map(|i| SubItem {
            name: if quantity == 1 {
                name.clone()
            } else {
                format!("{} ({})", name, i)
            },
            price: format_amount(per_unit),
            tax_price: format_amount(per_unit_tax),
        })
        .collect();

    LineItem {
        name,
        quantity,
        total_line_price: format_amount(line_total),
        price: format_amount(per_unit),
        tax_price: format_amount(per_unit_tax),
        subitems,
    }
}

/// Reconcile a raw extraction into a billable analysis.
///
/// Runs the modifier merge, cross-checks the item sum against the
/// stated subtotal, then derives per-unit prices and sub-items. When
/// subtotal and item sum diverge by more than one cent the item sum
/// wins (it is literal receipt data); tax is recomputed as
/// `total - item_sum - gratuity` when the grand total is present and
/// trustworthy — and the effective rate with it, so the per-unit
/// `tax_price` fields sum back to the receipt-level amount — otherwise
/// the analysis is flagged `needs_review` rather than silently guessed.
pub fn reconcile(raw: RawReceipt) -> ReceiptAnalysis {
    let mut tax_rate = resolve_tax_rate(
        raw.tax_amount.as_deref().unwrap_or(NOT_AVAILABLE),
        raw.subtotal.as_deref().unwrap_or(NOT_AVAILABLE),
        raw.tax_rate.as_deref().unwrap_or(NOT_AVAILABLE),
    );

    let merged = merge_modifier_lines(raw.items);

    let item_sum: f64 = merged
        .iter()
        .map(|i| i.price.as_deref().map(parse_amount).unwrap_or(0.0))
        .sum();

    let stated_subtotal = raw.subtotal.as_deref().map(parse_amount);
    let stated_tax = raw.tax_amount.as_deref().map(parse_amount);
    let stated_total = raw.total_amount.as_deref().map(parse_amount);
    // Absent gratuity reads as "no tip charged"
    let gratuity = raw.gratuity.as_deref().map(parse_amount).unwrap_or(0.0);

    let mut subtotal = stated_subtotal;
    let mut tax_amount = stated_tax;
    let mut needs_review = false;

    if !merged.is_empty() {
        match stated_subtotal {
            Some(stated) if (item_sum - stated).abs() > CENT => {
                // Item sum is literal receipt data; prefer it
                debug!(
                    stated = stated,
                    item_sum = item_sum,
                    "stated subtotal disagrees with item sum"
                );
                subtotal = Some(item_sum);
                match stated_total {
                    Some(total) if total > 0.0 => {
                        let recomputed = total - item_sum - gratuity;
                        if recomputed >= 0.0 {
                            tax_amount = Some(recomputed);
                            // The rate was resolved against the stated
                            // amounts; follow the recomputed tax so
                            // per-unit tax agrees with the receipt level
                            if item_sum > 0.0 {
                                tax_rate = recomputed / item_sum;
                            }
                        } else {
                            warn!(
                                recomputed = recomputed,
                                "recomputed tax is negative, flagging for manual review"
                            );
                            needs_review = true;
                        }
                    }
                    _ => {
                        warn!("no trustworthy grand total, flagging for manual review");
                        needs_review = true;
                    }
                }
            }
            None => subtotal = Some(item_sum),
            _ => {}
        }
    }

    let items: Vec<LineItem> = merged
        .iter()
        .map(|item| reconcile_line_item(item, tax_rate))
        .collect();

    ReceiptAnalysis {
        store_name: text_or_na(raw.store_name),
        date: text_or_na(raw.date),
        total_amount: amount_or_na(stated_total),
        subtotal: amount_or_na(subtotal),
        tax_amount: amount_or_na(tax_amount),
        tax_rate: rate_or_na(tax_rate, raw.tax_rate.as_deref()),
        gratuity: amount_or_na(raw.gratuity.as_deref().map(parse_amount)),
        gratuity_rate: rate_or_na(
            normalize_rate(raw.gratuity_rate.as_deref()),
            raw.gratuity_rate.as_deref(),
        ),
        items,
        raw_response: None,
        needs_review,
    }
}

/// Run the full engine over a raw completion.
///
/// The only hard failure mode — total absence of extractable JSON — is
/// recovered here by substituting the sentinel analysis.
pub fn analyze_response(raw_text: &str) -> ReceiptAnalysis {
    match extract_receipt_json(raw_text) {
        Ok(raw) => reconcile(raw),
        Err(e) => {
            warn!(error = %e, "vision response not parseable, returning sentinel analysis");
            ReceiptAnalysis::sentinel(raw_text)
        }
    }
}

fn text_or_na(value: Option<String>) -> String {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn amount_or_na(value: Option<f64>) -> String {
    value.map(format_amount).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// A zero rate is only the sentinel when nothing numeric was reported:
/// a literal `"0"` is a genuinely tax-free receipt, not a gap.
fn rate_or_na(rate: f64, raw: Option<&str>) -> String {
    if rate > 0.0 {
        rate.to_string()
    } else if raw.is_some_and(|s| s.chars().any(|c| c.is_ascii_digit())) {
        "0".to_string()
    } else {
        NOT_AVAILABLE.to_string()
    }
}

fn normalize_rate(raw: Option<&str>) -> f64 {
    let mut rate = raw.map(parse_amount).unwrap_or(0.0);
    if rate > 1.0 {
        rate /= 100.0;
    }
    rate
}
