//! Per-member amount splitting
//!
//! Once a reconciled receipt's sub-items have been assigned to party
//! members, this module computes what each member owes: the sum of their
//! assigned per-unit prices and tax, plus a gratuity share proportional
//! to their pre-tax share of the assigned value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::receipt::money::{format_amount, parse_amount};
use crate::receipt::ReceiptAnalysis;

/// Reference to one sub-item of a reconciled receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubItemRef {
    pub item_index: usize,
    pub subitem_index: usize,
}

/// What one member owes for their assigned sub-items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberAmount {
    pub name: String,
    /// Pre-tax sum of assigned per-unit prices, 2-decimal string
    pub item_total: String,
    /// Sum of assigned per-unit tax contributions, 2-decimal string
    pub tax_total: String,
    /// Gratuity share proportional to `item_total`, 2-decimal string
    pub gratuity_share: String,
    /// `item_total + tax_total + gratuity_share`, 2-decimal string
    pub total: String,
}

/// Split a reconciled receipt across members by sub-item assignment.
///
/// `assignments` maps member name to the sub-items they claimed.
/// References that point outside the receipt are skipped with a warning
/// rather than failing the whole split. The receipt's gratuity is
/// distributed proportionally to each member's pre-tax assigned value;
/// when nothing priced was assigned, nobody carries gratuity.
///
/// Output order follows member name, so repeated calls are stable.
pub fn split_amounts(
    analysis: &ReceiptAnalysis,
    assignments: &BTreeMap<String, Vec<SubItemRef>>,
) -> Vec<MemberAmount> {
    let gratuity = parse_amount(&analysis.gratuity);

    // First pass: pre-tax and tax totals per member
    let mut totals: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for (name, refs) in assignments {
        let entry = totals.entry(name.as_str()).or_insert((0.0, 0.0));
        for r in refs {
            let Some(subitem) = analysis
                .items
                .get(r.item_index)
                .and_then(|item| item.subitems.get(r.subitem_index))
            else {
                warn!(
                    member = name.as_str(),
                    item_index = r.item_index,
                    subitem_index = r.subitem_index,
                    "assignment references a sub-item the receipt does not have, skipping"
                );
                continue;
            };
            entry.0 += parse_amount(&subitem.price);
            entry.1 += parse_amount(&subitem.tax_price);
        }
    }

    let assigned_value: f64 = totals.values().map(|(items, _)| items).sum();

    totals
        .into_iter()
        .map(|(name, (item_total, tax_total))| {
            let gratuity_share = if assigned_value > 0.0 {
                gratuity * item_total / assigned_value
            } else {
                0.0
            };
            MemberAmount {
                name: name.to_string(),
                item_total: format_amount(item_total),
                tax_total: format_amount(tax_total),
                gratuity_share: format_amount(gratuity_share),
                total: format_amount(item_total + tax_total + gratuity_share),
            }
        })
        .collect()
}
