//! Wire types for vision model receipt extractions
//!
//! The model is instructed to return a single JSON object, but real
//! completions are noisy: fields go missing, and monetary values arrive
//! as strings ("$3.85"), bare numbers (3.85), or sentinels ("N/A").
//! Every field here is optional and numeric-ish fields accept either
//! JSON strings or numbers.

use serde::{Deserialize, Deserializer, Serialize};

/// Raw receipt object as emitted by the vision model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawReceipt {
    #[serde(default)]
    pub store_name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "stringly")]
    pub total_amount: Option<String>,
    #[serde(default)]
    pub items: Vec<RawLineItem>,
    #[serde(default, deserialize_with = "stringly")]
    pub tax_amount: Option<String>,
    #[serde(default, deserialize_with = "stringly")]
    pub gratuity: Option<String>,
    #[serde(default, deserialize_with = "stringly")]
    pub tax_rate: Option<String>,
    #[serde(default, deserialize_with = "stringly")]
    pub gratuity_rate: Option<String>,
    #[serde(default, deserialize_with = "stringly")]
    pub subtotal: Option<String>,
}

/// One priced row as printed on the receipt.
///
/// Per the extraction contract, `price` is the printed *line total*
/// (quantity-inclusive), not a per-unit price.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLineItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "stringly")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "stringly")]
    pub quantity: Option<String>,
}

/// Accept a JSON string or number and normalize to `String`.
fn stringly<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Stringly {
        Text(String),
        Number(f64),
        Integer(i64),
    }

    Ok(Option::<Stringly>::deserialize(deserializer)?.map(|v| match v {
        Stringly::Text(s) => s,
        Stringly::Number(n) => n.to_string(),
        Stringly::Integer(n) => n.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_string_and_numeric_fields() {
        let json = r#"{
            "store_name": "Corner Deli",
            "total_amount": 12.69,
            "subtotal": "11.55",
            "items": [{"name": "Fries", "price": 3.85, "quantity": 1}]
        }"#;
        let raw: RawReceipt = serde_json::from_str(json).unwrap();
        assert_eq!(raw.total_amount.as_deref(), Some("12.69"));
        assert_eq!(raw.subtotal.as_deref(), Some("11.55"));
        assert_eq!(raw.items[0].price.as_deref(), Some("3.85"));
        assert_eq!(raw.items[0].quantity.as_deref(), Some("1"));
    }

    #[test]
    fn tolerates_missing_fields() {
        let raw: RawReceipt = serde_json::from_str("{}").unwrap();
        assert!(raw.store_name.is_none());
        assert!(raw.items.is_empty());
        assert!(raw.tax_rate.is_none());
    }
}
