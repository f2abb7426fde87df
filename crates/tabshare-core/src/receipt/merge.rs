//! Modifier line merging
//!
//! Receipts print modifiers ("+ Onion", "+ Extra Cheese") as their own
//! rows under the item they modify. Merging used to be delegated to the
//! model prompt; it is deterministic code here so it can be tested.
//! Downstream reconciliation treats the merged name as opaque text.

use super::money;
use super::raw::RawLineItem;

/// Fold modifier rows into the preceding item.
///
/// A row whose name starts with `+` is appended to the previous item's
/// name (`"Cheeseburger + Onion"`); a priced modifier adds its amount to
/// the previous line total. A modifier with no preceding item keeps its
/// own row with the `+` stripped.
pub fn merge_modifier_lines(items: Vec<RawLineItem>) -> Vec<RawLineItem> {
    let mut merged: Vec<RawLineItem> = Vec::with_capacity(items.len());

    for item in items {
        let name = item.name.as_deref().unwrap_or("").trim().to_string();

        let Some(modifier) = name.strip_prefix('+').map(|m| m.trim().to_string()) else {
            merged.push(item);
            continue;
        };

        match merged.last_mut() {
            Some(prev) => {
                let prev_name = prev.name.as_deref().unwrap_or("").trim();
                prev.name = Some(format!("{} + {}", prev_name, modifier));

                let extra = item.price.as_deref().map(money::parse_amount).unwrap_or(0.0);
                if extra != 0.0 {
                    let base = prev.price.as_deref().map(money::parse_amount).unwrap_or(0.0);
                    prev.price = Some(money::format_amount(base + extra));
                }
            }
            None => {
                merged.push(RawLineItem {
                    name: Some(modifier),
                    ..item
                });
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, price: Option<&str>, quantity: Option<&str>) -> RawLineItem {
        RawLineItem {
            name: Some(name.to_string()),
            price: price.map(str::to_string),
            quantity: quantity.map(str::to_string),
        }
    }

    #[test]
    fn unpriced_modifier_extends_previous_name() {
        let merged = merge_modifier_lines(vec![
            item("Cheeseburger", Some("3.85"), Some("1")),
            item("+ Onion", None, None),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name.as_deref(), Some("Cheeseburger + Onion"));
        assert_eq!(merged[0].price.as_deref(), Some("3.85"));
    }

    #[test]
    fn priced_modifier_adds_to_previous_line_total() {
        let merged = merge_modifier_lines(vec![
            item("Cheeseburger", Some("3.85"), Some("1")),
            item("+ Bacon", Some("1.50"), None),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name.as_deref(), Some("Cheeseburger + Bacon"));
        assert_eq!(merged[0].price.as_deref(), Some("5.35"));
    }

    #[test]
    fn chained_modifiers_all_fold_in() {
        let merged = merge_modifier_lines(vec![
            item("Burrito", Some("9.00"), Some("1")),
            item("+ Guac", Some("2.00"), None),
            item("+Salsa", None, None),
            item("Soda", Some("2.50"), Some("1")),
        ]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].name.as_deref(), Some("Burrito + Guac + Salsa"));
        assert_eq!(merged[0].price.as_deref(), Some("11.00"));
        assert_eq!(merged[1].name.as_deref(), Some("Soda"));
    }

    #[test]
    fn orphan_modifier_keeps_its_own_row() {
        let merged = merge_modifier_lines(vec![item("+ Onion", Some("0.50"), None)]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name.as_deref(), Some("Onion"));
        assert_eq!(merged[0].price.as_deref(), Some("0.50"));
    }
}
