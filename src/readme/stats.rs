//! Repository language statistics via the `gh` CLI.

use std::collections::BTreeMap;
use std::process::Command;

use crate::foundation::error::{DinoError, DinoResult};

/// How many repositories to ask `gh` for.
const REPO_LIMIT: &str = "200";

#[derive(Debug, serde::Deserialize)]
struct RepoLanguages {
    #[allow(dead_code)]
    name: String,
    #[serde(default)]
    languages: Vec<LanguageEdge>,
}

#[derive(Debug, serde::Deserialize)]
struct LanguageEdge {
    size: u64,
    node: LanguageNode,
}

#[derive(Debug, serde::Deserialize)]
struct LanguageNode {
    name: String,
}

/// Aggregated per-language byte sizes, sorted by size descending then name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageStats {
    entries: Vec<(String, u64)>,
}

/// One chart segment: a language (or the `Others` aggregate) with its share.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub name: String,
    pub bytes: u64,
    pub percent: f64,
}

impl LanguageStats {
    /// Build stats from raw `(language, bytes)` pairs, imposing the canonical
    /// size-descending order. Zero-byte entries are dropped.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, u64)>) -> Self {
        let mut entries: Vec<(String, u64)> =
            entries.into_iter().filter(|(_, bytes)| *bytes > 0).collect();
        entries.sort_by(|(an, ab), (bn, bb)| bb.cmp(ab).then_with(|| an.cmp(bn)));
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, u64)] {
        &self.entries
    }

    pub fn total_bytes(&self) -> u64 {
        self.entries.iter().map(|(_, bytes)| bytes).sum()
    }

    /// The top `top` languages plus an `Others` aggregate for the rest.
    /// `Others` is omitted when nothing remains.
    pub fn segments(&self, top: usize) -> Vec<Segment> {
        let total = self.total_bytes();
        if total == 0 {
            return Vec::new();
        }
        let percent = |bytes: u64| bytes as f64 / total as f64 * 100.0;

        let mut segments: Vec<Segment> = self
            .entries
            .iter()
            .take(top)
            .map(|(name, bytes)| Segment {
                name: name.clone(),
                bytes: *bytes,
                percent: percent(*bytes),
            })
            .collect();

        let rest: u64 = self.entries.iter().skip(top).map(|(_, b)| b).sum();
        if rest > 0 {
            segments.push(Segment {
                name: "Others".to_owned(),
                bytes: rest,
                percent: percent(rest),
            });
        }
        segments
    }
}

/// List the user's repositories through `gh` and aggregate language sizes.
///
/// A missing `gh` binary or a non-zero exit is fatal for the README pipeline,
/// per the external-command contract.
#[tracing::instrument]
pub fn collect_language_stats(login: &str) -> DinoResult<LanguageStats> {
    let output = Command::new("gh")
        .args(["repo", "list", login, "--limit", REPO_LIMIT, "--json", "name,languages"])
        .output()
        .map_err(|e| DinoError::patch(format!("failed to run gh: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DinoError::patch(format!(
            "gh repo list exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    let repos: Vec<RepoLanguages> = serde_json::from_slice(&output.stdout)
        .map_err(|e| DinoError::patch(format!("malformed gh repo list output: {e}")))?;
    tracing::debug!(repos = repos.len(), "listed repositories");
    Ok(aggregate(repos))
}

fn aggregate(repos: Vec<RepoLanguages>) -> LanguageStats {
    let mut totals: BTreeMap<String, u64> = BTreeMap::new();
    for repo in repos {
        for edge in repo.languages {
            *totals.entry(edge.node.name).or_default() += edge.size;
        }
    }
    LanguageStats::from_entries(totals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_from_json(json: &str) -> LanguageStats {
        aggregate(serde_json::from_str(json).unwrap())
    }

    const SAMPLE: &str = r#"[
        {"name":"alpha","languages":[
            {"size":600,"node":{"name":"Rust"}},
            {"size":200,"node":{"name":"Shell"}}]},
        {"name":"beta","languages":[
            {"size":400,"node":{"name":"Rust"}},
            {"size":300,"node":{"name":"Python"}},
            {"size":100,"node":{"name":"Lua"}}]},
        {"name":"gamma","languages":[]}
    ]"#;

    #[test]
    fn aggregates_across_repos_and_sorts_descending() {
        let stats = stats_from_json(SAMPLE);
        assert_eq!(
            stats.entries(),
            &[
                ("Rust".to_owned(), 1000),
                ("Python".to_owned(), 300),
                ("Shell".to_owned(), 200),
                ("Lua".to_owned(), 100),
            ]
        );
        assert_eq!(stats.total_bytes(), 1600);
    }

    #[test]
    fn equal_sizes_break_ties_by_name() {
        let stats = stats_from_json(
            r#"[{"name":"r","languages":[
                {"size":50,"node":{"name":"Zig"}},
                {"size":50,"node":{"name":"C"}}]}]"#,
        );
        assert_eq!(
            stats.entries(),
            &[("C".to_owned(), 50), ("Zig".to_owned(), 50)]
        );
    }

    #[test]
    fn segments_take_top_n_plus_others() {
        let stats = stats_from_json(SAMPLE);
        let segments = stats.segments(2);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].name, "Rust");
        assert_eq!(segments[1].name, "Python");
        assert_eq!(segments[2].name, "Others");
        assert_eq!(segments[2].bytes, 300);
        let percent_sum: f64 = segments.iter().map(|s| s.percent).sum();
        assert!((percent_sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn segments_omit_others_when_everything_fits() {
        let stats = stats_from_json(SAMPLE);
        assert_eq!(stats.segments(10).len(), 4);
    }

    #[test]
    fn empty_stats_have_no_segments() {
        let stats = stats_from_json("[]");
        assert_eq!(stats.total_bytes(), 0);
        assert!(stats.segments(5).is_empty());
    }
}
