use std::time::Duration;

use crate::fetch::identity::Identity;
use crate::foundation::error::{DinoError, DinoResult};
use crate::foundation::grid::Grid;

const GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("dinograph/", env!("CARGO_PKG_VERSION"));

const CONTRIBUTIONS_QUERY: &str = "\
query($login: String!) {
  user(login: $login) {
    contributionsCollection {
      contributionCalendar {
        weeks { contributionDays { contributionCount } }
      }
    }
  }
}";

#[derive(Debug, serde::Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<ResponseData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, serde::Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, serde::Deserialize)]
struct ResponseData {
    user: Option<User>,
}

#[derive(Debug, serde::Deserialize)]
struct User {
    #[serde(rename = "contributionsCollection")]
    contributions_collection: ContributionsCollection,
}

#[derive(Debug, serde::Deserialize)]
struct ContributionsCollection {
    #[serde(rename = "contributionCalendar")]
    contribution_calendar: ContributionCalendar,
}

#[derive(Debug, serde::Deserialize)]
struct ContributionCalendar {
    weeks: Vec<Week>,
}

#[derive(Debug, serde::Deserialize)]
struct Week {
    #[serde(rename = "contributionDays")]
    contribution_days: Vec<Day>,
}

#[derive(Debug, serde::Deserialize)]
struct Day {
    #[serde(rename = "contributionCount")]
    contribution_count: u32,
}

/// Fetch the contribution grid for `identity`, degrading to the synthetic
/// fallback on any failure. Never errors: the render pipeline always gets a
/// grid to draw.
#[tracing::instrument(skip(identity), fields(login = %identity.login))]
pub fn fetch_or_fallback(identity: &Identity) -> Grid {
    if !identity.has_token() {
        tracing::warn!("no credential available, using synthetic contribution data");
        return Grid::synthetic(chrono::Utc::now().date_naive());
    }

    match fetch(identity) {
        Ok(grid) => grid,
        Err(err) => {
            tracing::warn!(error = %err, "contribution fetch failed, using synthetic data");
            Grid::synthetic(chrono::Utc::now().date_naive())
        }
    }
}

/// One GraphQL POST for the contribution calendar. Single attempt, no retries.
fn fetch(identity: &Identity) -> DinoResult<Grid> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| DinoError::fetch(format!("failed to build HTTP client: {e}")))?;

    let body = serde_json::json!({
        "query": CONTRIBUTIONS_QUERY,
        "variables": { "login": identity.login },
    });

    let response = client
        .post(GRAPHQL_ENDPOINT)
        .bearer_auth(&identity.token)
        .json(&body)
        .send()
        .map_err(|e| DinoError::fetch(format!("request failed: {e}")))?
        .error_for_status()
        .map_err(|e| DinoError::fetch(format!("non-success status: {e}")))?;

    let parsed: GraphQlResponse = response
        .json()
        .map_err(|e| DinoError::fetch(format!("malformed response body: {e}")))?;

    grid_from_response(parsed)
}

fn grid_from_response(parsed: GraphQlResponse) -> DinoResult<Grid> {
    if let Some(first) = parsed.errors.first() {
        return Err(DinoError::fetch(format!(
            "GraphQL error: {}",
            first.message
        )));
    }
    let user = parsed
        .data
        .and_then(|d| d.user)
        .ok_or_else(|| DinoError::fetch("response is missing data.user"))?;

    let weeks: Vec<Vec<u32>> = user
        .contributions_collection
        .contribution_calendar
        .weeks
        .into_iter()
        .map(|w| {
            w.contribution_days
                .into_iter()
                .map(|d| d.contribution_count)
                .collect()
        })
        .collect();

    tracing::debug!(weeks = weeks.len(), "parsed contribution calendar");
    Grid::from_weeks(&weeks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::grid::{Cell, GRID_COLS};

    fn parse(json: &str) -> GraphQlResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn grid_from_well_formed_response() {
        let parsed = parse(
            r#"{"data":{"user":{"contributionsCollection":{"contributionCalendar":{
                "weeks":[{"contributionDays":[{"contributionCount":3},{"contributionCount":0}]}]
            }}}}}"#,
        );
        let grid = grid_from_response(parsed).unwrap();
        assert_eq!(grid.get(Cell::new(0, GRID_COLS - 1)), 3);
        assert_eq!(grid.get(Cell::new(1, GRID_COLS - 1)), 0);
    }

    #[test]
    fn error_array_is_a_fetch_failure() {
        let parsed = parse(r#"{"data":null,"errors":[{"message":"bad credentials"}]}"#);
        let err = grid_from_response(parsed).unwrap_err();
        assert!(err.to_string().contains("bad credentials"));
    }

    #[test]
    fn missing_user_is_a_fetch_failure() {
        let parsed = parse(r#"{"data":{"user":null}}"#);
        assert!(grid_from_response(parsed).is_err());
    }

    #[test]
    fn credential_less_identity_always_falls_back() {
        let identity = Identity {
            login: "nobody".into(),
            token: String::new(),
        };
        // Must not panic and must not touch the network.
        let _grid = fetch_or_fallback(&identity);
    }
}
