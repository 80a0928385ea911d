use std::time::Duration;

use anyhow::{anyhow, bail};

/// Parses a human duration such as `10s`, `250ms`, `2min` or `1h` into a [Duration].
///
/// Whitespace between the number and the unit is tolerated. A bare number is rejected so
/// that `"10"` is never silently read as seconds or milliseconds.
pub fn parse_duration(s: &str) -> anyhow::Result<Duration> {
    let s = s.trim();
    let unit_start = s.find(|c: char| !c.is_ascii_digit()).ok_or_else(|| anyhow!("Missing duration unit: {s}"))?;
    if unit_start == 0 {
        bail!("Missing duration value: {s}");
    }

    let (amount, unit) = s.split_at(unit_start);
    let amount: u64 = amount.parse().map_err(|_| anyhow!("Invalid duration value: {amount}"))?;

    let duration = match unit.trim() {
        "ms" => Duration::from_millis(amount),
        "s" => Duration::from_secs(amount),
        "min" => Duration::from_secs(amount.saturating_mul(60)),
        "h" => Duration::from_secs(amount.saturating_mul(60 * 60)),
        other => bail!("Invalid duration unit: {other}. Expected 'ms', 's', 'min' or 'h'."),
    };
    Ok(duration)
}
