use crate::image::image_src;
use crate::page::Page;
use crate::record::{format_metric, format_number, Metric, PlayerRecord};

/// Where a table cell takes its text from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellSource {
    Name,
    Team,
    BattingStyle,
    BowlingStyle,
    /// Missing reads as `0`.
    Metric(Metric),
    /// Missing reads as an empty cell.
    OptionalMetric(Metric),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    pub source: CellSource,
}

const fn column(header: &'static str, source: CellSource) -> Column {
    Column { header, source }
}

pub const BATTING_COLUMNS: [Column; 10] = [
    column("Player", CellSource::Name),
    column("Team", CellSource::Team),
    column("Batting Style", CellSource::BattingStyle),
    column("Innings", CellSource::Metric(Metric::Innings)),
    column("Runs", CellSource::Metric(Metric::Runs)),
    column("Balls", CellSource::Metric(Metric::Balls)),
    column("SR", CellSource::Metric(Metric::StrikeRate)),
    column("Bat Avg", CellSource::Metric(Metric::BatAvg)),
    column("Position", CellSource::OptionalMetric(Metric::BattingPosition)),
    column("Boundary %", CellSource::Metric(Metric::BoundaryPct)),
];

pub const BOWLING_COLUMNS: [Column; 11] = [
    column("Player", CellSource::Name),
    column("Team", CellSource::Team),
    column("Bowling Style", CellSource::BowlingStyle),
    column("Runs Conceded", CellSource::Metric(Metric::RunsConceded)),
    column("Innings", CellSource::Metric(Metric::InningsBowled)),
    column("Balls", CellSource::Metric(Metric::BallsBowled)),
    column("Wickets", CellSource::Metric(Metric::Wickets)),
    column("Economy", CellSource::Metric(Metric::Economy)),
    column("Bowling SR", CellSource::Metric(Metric::BowlingSr)),
    column("Dot Balls", CellSource::Metric(Metric::DotBalls)),
    column("Maidens", CellSource::Metric(Metric::Maidens)),
];

impl Column {
    pub fn cell(&self, record: &PlayerRecord) -> String {
        match self.source {
            CellSource::Name => record.name.clone(),
            CellSource::Team => record.team.clone(),
            CellSource::BattingStyle => record.batting_style.clone(),
            CellSource::BowlingStyle => record.bowling_style.clone(),
            CellSource::Metric(metric) => format_metric(record, metric),
            CellSource::OptionalMetric(metric) => {
                record.value(metric).map(format_number).unwrap_or_default()
            }
        }
    }
}

/// Table columns for a category page; team pages render cards instead.
pub const fn columns_for(page: &Page) -> Option<&'static [Column]> {
    match page {
        Page::Team { .. } => None,
        Page::Batting { .. } => Some(&BATTING_COLUMNS),
        Page::Bowling { .. } => Some(&BOWLING_COLUMNS),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Identity carried by the name cell for hover lookups.
    pub player_name: String,
    pub cells: Vec<String>,
}

pub fn table_rows(columns: &[Column], records: &[PlayerRecord]) -> Vec<TableRow> {
    records
        .iter()
        .map(|record| TableRow {
            player_name: record.name.clone(),
            cells: columns.iter().map(|column| column.cell(record)).collect(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatTile {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCard {
    pub name: String,
    pub image_src: String,
    pub role_line: String,
    pub tiles: [StatTile; 4],
}

const CARD_TILES: [(&str, Metric); 4] = [
    ("Runs", Metric::Runs),
    ("Wickets", Metric::Wickets),
    ("Bat Avg", Metric::BatAvg),
    ("Economy", Metric::Economy),
];

impl PlayerCard {
    pub fn from_record(record: &PlayerRecord) -> Self {
        Self {
            name: record.name.clone(),
            image_src: image_src(&record.name),
            role_line: format!("{} | {}", record.role_or_default(), record.batting_style),
            tiles: CARD_TILES.map(|(label, metric)| StatTile {
                label,
                value: format_metric(record, metric),
            }),
        }
    }
}

pub fn team_cards(records: &[PlayerRecord]) -> Vec<PlayerCard> {
    records.iter().map(PlayerCard::from_record).collect()
}

#[cfg(test)]
mod tests {
    use super::{table_rows, team_cards, BATTING_COLUMNS, BOWLING_COLUMNS};
    use crate::record::PlayerRecord;

    fn batter(name: &str, runs: Option<f64>) -> PlayerRecord {
        PlayerRecord {
            name: name.to_string(),
            team: "India".to_string(),
            batting_style: "Right hand Bat".to_string(),
            runs,
            strike_rate: Some(138.5),
            batting_position: Some(3.0),
            ..PlayerRecord::default()
        }
    }

    #[test]
    fn batting_rows_follow_column_order() {
        let rows = table_rows(&BATTING_COLUMNS, &[batter("Virat Kohli", Some(296.0))]);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].player_name, "Virat Kohli");
        assert_eq!(
            rows[0].cells,
            vec![
                "Virat Kohli",
                "India",
                "Right hand Bat",
                "0",
                "296",
                "0",
                "138.5",
                "0",
                "3",
                "0"
            ]
        );
    }

    #[test]
    fn missing_position_is_blank_not_zero() {
        let mut record = batter("Suryakumar Yadav", None);
        record.batting_position = None;

        let rows = table_rows(&BATTING_COLUMNS, &[record]);
        assert_eq!(rows[0].cells[4], "0");
        assert_eq!(rows[0].cells[8], "");
    }

    #[test]
    fn bowling_rows_default_missing_numbers_to_zero() {
        let record = PlayerRecord {
            name: "Jasprit Bumrah".to_string(),
            bowling_style: "Right-arm fast".to_string(),
            wickets: Some(15.0),
            economy: Some(4.17),
            ..PlayerRecord::default()
        };

        let rows = table_rows(&BOWLING_COLUMNS, &[record]);
        assert_eq!(rows[0].cells.len(), BOWLING_COLUMNS.len());
        assert_eq!(rows[0].cells[1], "");
        assert_eq!(rows[0].cells[3], "0");
        assert_eq!(rows[0].cells[6], "15");
        assert_eq!(rows[0].cells[7], "4.17");
    }

    #[test]
    fn rows_keep_api_order() {
        let records = [
            batter("Rohit Sharma", Some(257.0)),
            batter("Axar Patel", Some(92.0)),
            batter("Rishabh Pant", Some(171.0)),
        ];
        let names: Vec<_> = table_rows(&BATTING_COLUMNS, &records)
            .into_iter()
            .map(|row| row.player_name)
            .collect();
        assert_eq!(names, ["Rohit Sharma", "Axar Patel", "Rishabh Pant"]);
    }

    #[test]
    fn cards_fill_role_and_tiles() {
        let cards = team_cards(&[batter("MS Dhoni", Some(0.0))]);
        let card = &cards[0];

        assert_eq!(card.image_src, "/static/images/ms_dhoni.jpg");
        assert_eq!(card.role_line, "Player | Right hand Bat");
        let tiles: Vec<_> = card
            .tiles
            .iter()
            .map(|tile| (tile.label, tile.value.as_str()))
            .collect();
        assert_eq!(
            tiles,
            [("Runs", "0"), ("Wickets", "0"), ("Bat Avg", "0"), ("Economy", "0")]
        );
    }
}
