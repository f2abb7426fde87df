//! Vision analysis command

use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;

use tabshare_core::receipt::analyze_response;
use tabshare_core::vision::{VisionBackend, VisionClient};

use super::reconcile::print_analysis;

/// Send a receipt image to the configured vision backend and reconcile
pub async fn cmd_analyze(file: &Path, model: Option<&str>, json: bool) -> Result<()> {
    let image = std::fs::read(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    if image.is_empty() {
        bail!("{} is empty", file.display());
    }

    let Some(vision) = VisionClient::from_env() else {
        bail!("Vision backend not configured (set VISION_HOST, or VISION_BACKEND=mock for testing)");
    };

    info!(
        host = vision.host(),
        model = model.unwrap_or(vision.model()),
        bytes = image.len(),
        "sending receipt image to vision backend"
    );

    let raw_text = vision
        .extract_receipt(&image, model)
        .await
        .context("Vision backend request failed")?;

    let analysis = analyze_response(&raw_text);

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    print_analysis(&analysis);
    Ok(())
}
