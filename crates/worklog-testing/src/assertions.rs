//! Custom assertions over report JSON.

use anyhow::{Context, Result};
use serde_json::Value;

/// Records of `category` in a serialized source report
pub fn category<'a>(report: &'a Value, category: &str) -> Result<&'a Vec<Value>> {
    report["activity"][category]
        .as_array()
        .with_context(|| format!("Expected 'activity.{}' array in report", category))
}

/// Assert that `category` holds exactly `expected` records.
pub fn assert_record_count(report: &Value, category_name: &str, expected: usize) -> Result<()> {
    let records = category(report, category_name)?;
    if records.len() != expected {
        anyhow::bail!(
            "Expected {} {} records, got {}",
            expected,
            category_name,
            records.len()
        );
    }
    Ok(())
}

/// Assert that `category` ids are exactly `expected`, in order.
pub fn assert_record_ids(report: &Value, category_name: &str, expected: &[Value]) -> Result<()> {
    let ids: Vec<Value> = category(report, category_name)?
        .iter()
        .map(|record| record["id"].clone())
        .collect();
    if ids != expected {
        anyhow::bail!("Expected {} ids {:?}, got {:?}", category_name, expected, ids);
    }
    Ok(())
}

/// Assert that every date field of every record is null or `DD-MM-YYYY HH:MM`.
pub fn assert_dates_formatted(report: &Value) -> Result<()> {
    let activity = report["activity"]
        .as_object()
        .context("Expected 'activity' object in report")?;

    for (name, records) in activity {
        for record in records.as_array().into_iter().flatten() {
            for field in ["created_at", "updated_at", "closed_at", "merged_at", "date"] {
                let Some(value) = record.get(field) else {
                    continue;
                };
                if value.is_null() {
                    continue;
                }
                let text = value
                    .as_str()
                    .with_context(|| format!("{}.{} is not a string", name, field))?;
                if !is_report_date(text) {
                    anyhow::bail!("{}.{} has unexpected format: {}", name, field, text);
                }
            }
        }
    }
    Ok(())
}

fn is_report_date(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 16
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'-',
            10 => *b == b' ',
            13 => *b == b':',
            _ => b.is_ascii_digit(),
        })
}

/// Assert that the outcome is the `{"error": ...}` payload with `message`.
pub fn assert_failed_with(outcome: &Value, message: &str) -> Result<()> {
    let error = outcome["error"]
        .as_str()
        .context("Expected an 'error' payload")?;
    if error != message {
        anyhow::bail!("Expected error {:?}, got {:?}", message, error);
    }
    if outcome.get("activity").is_some() {
        anyhow::bail!("Failed outcome unexpectedly carries activity");
    }
    Ok(())
}
