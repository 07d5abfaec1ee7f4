//! README marker-region patching.
//!
//! Three independent regions are located by marker comments and rewritten
//! in place. A region whose markers are missing is skipped with a warning;
//! the patch step never fails because of README content.

use std::path::Path;

use regex::{Captures, Regex};

use crate::foundation::error::{DinoError, DinoResult};
use crate::readme::stats::LanguageStats;

/// Languages shown individually in the chart and map; the rest fold into
/// `Others`.
const CHART_TOP: usize = 5;
/// Bar width in characters.
const BAR_WIDTH: usize = 24;

const TOTAL_PATTERN: &str = r"(?s)(<!-- langs:total -->).*?(<!-- /langs:total -->)";
const MAP_PATTERN: &str = r"(?s)(<!-- langs:map -->).*?(<!-- /langs:map -->)";
const CHART_PATTERN: &str = r"(?s)(<!-- langs:chart -->).*?(<!-- /langs:chart -->)";

/// Apply all three regions to `content`. Returns the patched content and the
/// names of regions whose markers were not found.
pub fn apply(content: &str, stats: &LanguageStats) -> DinoResult<(String, Vec<&'static str>)> {
    let regions: [(&str, &str, String); 3] = [
        ("total", TOTAL_PATTERN, render_total(stats)),
        ("map", MAP_PATTERN, render_map(stats)),
        ("chart", CHART_PATTERN, render_chart(stats)),
    ];

    let mut patched = content.to_owned();
    let mut missing = Vec::new();
    for (name, pattern, payload) in regions {
        let re = Regex::new(pattern)
            .map_err(|e| DinoError::patch(format!("bad marker pattern for {name}: {e}")))?;
        if re.is_match(&patched) {
            patched = re
                .replace(&patched, |caps: &Captures| {
                    format!("{}{}{}", &caps[1], payload, &caps[2])
                })
                .into_owned();
        } else {
            missing.push(name);
        }
    }
    Ok((patched, missing))
}

/// Patch the README at `path` in place. Returns whether the file changed.
#[tracing::instrument(skip(stats))]
pub fn patch_file(path: &Path, stats: &LanguageStats) -> DinoResult<bool> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| DinoError::patch(format!("failed to read '{}': {e}", path.display())))?;

    let (patched, missing) = apply(&content, stats)?;
    for region in &missing {
        tracing::warn!(region, "README markers not found, section skipped");
    }

    if patched == content {
        tracing::debug!("README already up to date");
        return Ok(false);
    }
    std::fs::write(path, &patched)
        .map_err(|e| DinoError::patch(format!("failed to write '{}': {e}", path.display())))?;
    Ok(true)
}

/// Inline total: megabytes to one decimal place.
fn render_total(stats: &LanguageStats) -> String {
    format!("`{:.1} MB`", stats.total_bytes() as f64 / 1_000_000.0)
}

/// Fenced JSON block mapping language names to byte sizes.
fn render_map(stats: &LanguageStats) -> String {
    let mut block = String::from("\n```json\n{\n");
    let segments = stats.segments(CHART_TOP);
    for (i, segment) in segments.iter().enumerate() {
        let comma = if i + 1 < segments.len() { "," } else { "" };
        block.push_str(&format!("  \"{}\": {}{comma}\n", segment.name, segment.bytes));
    }
    block.push_str("}\n```\n");
    block
}

/// Fenced text block: percentage bar chart for the top languages.
fn render_chart(stats: &LanguageStats) -> String {
    let mut block = String::from("\n```text\n");
    for segment in stats.segments(CHART_TOP) {
        let filled = ((segment.percent / 100.0 * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
        block.push_str(&format!(
            "{:<12} {}{} {:>5.1}%\n",
            segment.name,
            "█".repeat(filled),
            "░".repeat(BAR_WIDTH - filled),
            segment.percent
        ));
    }
    block.push_str("```\n");
    block
}
