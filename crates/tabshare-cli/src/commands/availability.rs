//! Availability resolution command

use std::path::Path;

use anyhow::{bail, Context, Result};
use tabshare_core::availability::{find_common_availability, MemberProfile, UpcomingEvent};

/// Resolve common availability from a JSON input file
///
/// Input shape: `{"members": [...], "events": [...]}` matching the
/// `/api/availability/common` request body.
pub fn cmd_availability(file: &Path, json: bool) -> Result<()> {
    let input = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&input).context("Input is not valid JSON")?;

    let members: Vec<MemberProfile> = serde_json::from_value(
        value.get("members").cloned().unwrap_or_default(),
    )
    .context("Invalid members array")?;
    let events: Vec<UpcomingEvent> =
        serde_json::from_value(value.get("events").cloned().unwrap_or_else(|| {
            serde_json::Value::Array(vec![])
        }))
        .context("Invalid events array")?;

    if members.is_empty() {
        bail!("members must not be empty");
    }

    let availability = find_common_availability(&members, &events);

    if json {
        println!("{}", serde_json::to_string_pretty(&availability)?);
        return Ok(());
    }

    if availability.is_empty() {
        println!("No common availability found for {} member(s)", members.len());
        return Ok(());
    }

    println!("Common availability for {} member(s):\n", members.len());
    for day in &availability {
        println!(
            "{:<10} {} ({} hour{})",
            day.day,
            day.time_ranges.join(", "),
            day.hour_count,
            if day.hour_count == 1 { "" } else { "s" }
        );
    }

    Ok(())
}
