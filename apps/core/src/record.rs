use std::collections::HashSet;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ApiError;

/// One player's statistics row as delivered by the API.
///
/// Every field is optional upstream. Text fields fall back to an empty
/// string, numeric fields stay `None` and are shown as `0` by the views.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerRecord {
    #[serde(deserialize_with = "loose_text")]
    pub name: String,
    #[serde(deserialize_with = "loose_text")]
    pub team: String,
    #[serde(rename = "playingRole", deserialize_with = "loose_text")]
    pub playing_role: String,
    #[serde(rename = "battingStyle", deserialize_with = "loose_text")]
    pub batting_style: String,
    #[serde(rename = "bowlingStyle", deserialize_with = "loose_text")]
    pub bowling_style: String,
    #[serde(deserialize_with = "loose_text", skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(deserialize_with = "loose_number", skip_serializing_if = "Option::is_none")]
    pub runs: Option<f64>,
    #[serde(deserialize_with = "loose_number", skip_serializing_if = "Option::is_none")]
    pub bat_avg: Option<f64>,
    #[serde(deserialize_with = "loose_number", skip_serializing_if = "Option::is_none")]
    pub strike_rate: Option<f64>,
    #[serde(deserialize_with = "loose_number", skip_serializing_if = "Option::is_none")]
    pub innings: Option<f64>,
    #[serde(deserialize_with = "loose_number", skip_serializing_if = "Option::is_none")]
    pub balls: Option<f64>,
    #[serde(deserialize_with = "loose_number", skip_serializing_if = "Option::is_none")]
    pub batting_position: Option<f64>,
    #[serde(deserialize_with = "loose_number", skip_serializing_if = "Option::is_none")]
    pub boundary_pct: Option<f64>,
    #[serde(deserialize_with = "loose_number", skip_serializing_if = "Option::is_none")]
    pub avg_ball_faced: Option<f64>,
    #[serde(
        rename = "4s",
        deserialize_with = "loose_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub fours: Option<f64>,
    #[serde(
        rename = "6s",
        deserialize_with = "loose_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub sixes: Option<f64>,

    #[serde(deserialize_with = "loose_number", skip_serializing_if = "Option::is_none")]
    pub wickets: Option<f64>,
    #[serde(deserialize_with = "loose_number", skip_serializing_if = "Option::is_none")]
    pub economy: Option<f64>,
    #[serde(deserialize_with = "loose_number", skip_serializing_if = "Option::is_none")]
    pub bowling_avg: Option<f64>,
    #[serde(deserialize_with = "loose_number", skip_serializing_if = "Option::is_none")]
    pub bowling_sr: Option<f64>,
    #[serde(deserialize_with = "loose_number", skip_serializing_if = "Option::is_none")]
    pub dot_balls: Option<f64>,
    #[serde(deserialize_with = "loose_number", skip_serializing_if = "Option::is_none")]
    pub dot_pct: Option<f64>,
    #[serde(deserialize_with = "loose_number", skip_serializing_if = "Option::is_none")]
    pub maiden: Option<f64>,
    #[serde(deserialize_with = "loose_number", skip_serializing_if = "Option::is_none")]
    pub overs: Option<f64>,
    #[serde(deserialize_with = "loose_number", skip_serializing_if = "Option::is_none")]
    pub runs_conceded: Option<f64>,
    #[serde(deserialize_with = "loose_number", skip_serializing_if = "Option::is_none")]
    pub innings_bowled: Option<f64>,
    #[serde(deserialize_with = "loose_number", skip_serializing_if = "Option::is_none")]
    pub balls_bowled: Option<f64>,
}

/// Numeric columns a view or chart can pull out of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Runs,
    BatAvg,
    StrikeRate,
    Innings,
    Balls,
    BattingPosition,
    BoundaryPct,
    AvgBallsFaced,
    Wickets,
    Economy,
    BowlingAvg,
    BowlingSr,
    DotBalls,
    Maidens,
    RunsConceded,
    InningsBowled,
    BallsBowled,
}

impl Metric {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Runs => "Runs",
            Self::BatAvg => "Bat Avg",
            Self::StrikeRate => "SR",
            Self::Innings => "Innings",
            Self::Balls => "Balls",
            Self::BattingPosition => "Position",
            Self::BoundaryPct => "Boundary %",
            Self::AvgBallsFaced => "Avg Balls Faced",
            Self::Wickets => "Wickets",
            Self::Economy => "Economy",
            Self::BowlingAvg => "Bowling Avg",
            Self::BowlingSr => "Bowling SR",
            Self::DotBalls => "Dot Balls",
            Self::Maidens => "Maidens",
            Self::RunsConceded => "Runs Conceded",
            Self::InningsBowled => "Innings Bowled",
            Self::BallsBowled => "Balls Bowled",
        }
    }
}

impl PlayerRecord {
    pub const fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Runs => self.runs,
            Metric::BatAvg => self.bat_avg,
            Metric::StrikeRate => self.strike_rate,
            Metric::Innings => self.innings,
            Metric::Balls => self.balls,
            Metric::BattingPosition => self.batting_position,
            Metric::BoundaryPct => self.boundary_pct,
            Metric::AvgBallsFaced => self.avg_ball_faced,
            Metric::Wickets => self.wickets,
            Metric::Economy => self.economy,
            Metric::BowlingAvg => self.bowling_avg,
            Metric::BowlingSr => self.bowling_sr,
            Metric::DotBalls => self.dot_balls,
            Metric::Maidens => self.maiden,
            Metric::RunsConceded => self.runs_conceded,
            Metric::InningsBowled => self.innings_bowled,
            Metric::BallsBowled => self.balls_bowled,
        }
    }

    /// Value used for display and charting: missing reads as `0`.
    pub fn metric(&self, metric: Metric) -> f64 {
        self.value(metric).unwrap_or(0.0)
    }

    pub fn role_or_default(&self) -> &str {
        if self.playing_role.is_empty() {
            "Player"
        } else {
            &self.playing_role
        }
    }
}

/// Renders a stat the way the dashboard shows it: `45`, `132.5`, `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // also folds -0.0
        return "0".to_string();
    }
    format!("{value}")
}

pub fn format_metric(record: &PlayerRecord, metric: Metric) -> String {
    format_number(record.metric(metric))
}

/// Decodes a JSON array of player records fetched from `path`.
pub fn parse_records(path: &str, body: &str) -> Result<Vec<PlayerRecord>, ApiError> {
    let records: Vec<PlayerRecord> =
        serde_json::from_str(body).map_err(|error| ApiError::parse(path, error.to_string()))?;

    let duplicates = duplicate_names(&records);
    if !duplicates.is_empty() {
        log::warn!(
            "{path} returned {} duplicated player names: {}",
            duplicates.len(),
            duplicates.join(", ")
        );
    }

    Ok(records)
}

/// Names that occur more than once, in first-seen order.
pub fn duplicate_names(records: &[PlayerRecord]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    records
        .iter()
        .map(|record| record.name.as_str())
        .filter(|name| !seen.insert(*name) && reported.insert(*name))
        .collect()
}

/// Any JSON value a stat field may hold. Shapes other than numbers and
/// strings are skipped so one odd field never loses the whole payload.
#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

fn loose_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Loose>::deserialize(deserializer)?;
    Ok(match value {
        Some(Loose::Number(number)) if number.is_finite() => Some(number),
        Some(Loose::Text(text)) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    })
}

fn loose_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Loose>::deserialize(deserializer)?;
    Ok(match value {
        Some(Loose::Text(text)) => text.trim().to_string(),
        Some(Loose::Number(number)) => format_number(number),
        Some(Loose::Other(_)) | None => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::{duplicate_names, format_metric, format_number, parse_records, Metric};
    use crate::error::ApiError;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let records = parse_records("/api/players", r#"[{"name": "Virat Kohli"}]"#).unwrap();

        let record = &records[0];
        assert_eq!(record.name, "Virat Kohli");
        assert_eq!(record.team, "");
        assert_eq!(record.role_or_default(), "Player");
        assert_eq!(record.value(Metric::Runs), None);
        assert_eq!(format_metric(record, Metric::Runs), "0");
        assert_eq!(format_metric(record, Metric::Economy), "0");
    }

    #[test]
    fn upstream_quirks_decode_leniently() {
        let body = r#"[{
            "name": " Jasprit Bumrah ",
            "team": "India",
            "playingRole": null,
            "bowlingStyle": "Right-arm fast",
            "economy": "",
            "bowling_sr": "12.5",
            "bowling_avg": null,
            "wickets": 15,
            "batting_position": "n/a",
            "4s": 2
        }]"#;

        let record = &parse_records("/api/category/fast", body).unwrap()[0];
        assert_eq!(record.name, "Jasprit Bumrah");
        assert_eq!(record.playing_role, "");
        assert_eq!(record.economy, None);
        assert_eq!(record.bowling_sr, Some(12.5));
        assert_eq!(record.bowling_avg, None);
        assert_eq!(record.wickets, Some(15.0));
        assert_eq!(record.batting_position, None);
        assert_eq!(record.fours, Some(2.0));
    }

    #[test]
    fn odd_field_shapes_are_skipped_not_fatal() {
        let body = r#"[
            {"name": "Virat Kohli", "runs": 10, "team": ["India"], "wickets": {"t20": 4}},
            {"name": "Babar Azam", "economy": true}
        ]"#;

        let records = parse_records("/api/players", body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].team, "");
        assert_eq!(records[0].runs, Some(10.0));
        assert_eq!(records[0].wickets, None);
        assert_eq!(records[1].name, "Babar Azam");
        assert_eq!(records[1].economy, None);
    }

    #[test]
    fn non_array_payload_is_a_parse_error() {
        let error = parse_records("/api/team/India", r#"{"error": "nope"}"#).unwrap_err();
        assert!(matches!(error, ApiError::Parse { ref path, .. } if path == "/api/team/India"));
    }

    #[test]
    fn numbers_render_like_the_page_does() {
        assert_eq!(format_number(45.0), "45");
        assert_eq!(format_number(132.53), "132.53");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn duplicate_names_are_reported_once() {
        let body = r#"[{"name": "A"}, {"name": "B"}, {"name": "A"}, {"name": "A"}]"#;
        let records = parse_records("/api/players", body).unwrap();
        assert_eq!(duplicate_names(&records), vec!["A"]);
    }
}
