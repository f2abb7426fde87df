//! Reconciliation command over saved vision model responses

use std::path::Path;

use anyhow::{Context, Result};
use tabshare_core::receipt::{analyze_response, ReceiptAnalysis};

/// Run the reconciliation engine over a saved model completion
pub fn cmd_reconcile(file: &Path, json: bool) -> Result<()> {
    let raw_text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let analysis = analyze_response(&raw_text);

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    print_analysis(&analysis);
    Ok(())
}

/// Human-readable summary of a reconciled receipt
pub(crate) fn print_analysis(analysis: &ReceiptAnalysis) {
    println!("{} ({})", analysis.store_name, analysis.date);
    println!("{}", "-".repeat(50));

    for item in &analysis.items {
        println!(
            "{:<32} x{:<3} {:>8}",
            item.name, item.quantity, item.total_line_price
        );
        if item.quantity > 1 {
            for subitem in &item.subitems {
                println!("  {:<30} {:>8} (+{} tax)", subitem.name, subitem.price, subitem.tax_price);
            }
        }
    }

    println!("{}", "-".repeat(50));
    println!("{:<37} {:>8}", "Subtotal", analysis.subtotal);
    println!("{:<37} {:>8}", "Tax", analysis.tax_amount);
    println!("{:<37} {:>8}", "Gratuity", analysis.gratuity);
    println!("{:<37} {:>8}", "Total", analysis.total_amount);

    if analysis.needs_review {
        println!();
        println!("⚠️  Amounts disagree and could not be resolved - review manually");
    }

    if analysis.raw_response.is_some() {
        println!();
        println!("⚠️  No receipt JSON found in the model response");
    }
}
