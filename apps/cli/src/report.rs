use t20_core::record::format_metric;
use t20_core::view::{columns_for, table_rows};
use t20_core::{Metric, Page, PlayerRecord};

const TEAM_HEADERS: [&str; 6] = ["Player", "Role", "Runs", "Wickets", "Bat Avg", "Economy"];
const TEAM_METRICS: [Metric; 4] = [Metric::Runs, Metric::Wickets, Metric::BatAvg, Metric::Economy];

pub fn team_report(team: &str, records: &[PlayerRecord]) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            let mut row = vec![record.name.clone(), record.role_or_default().to_string()];
            row.extend(TEAM_METRICS.iter().map(|metric| format_metric(record, *metric)));
            row
        })
        .collect();

    let mut out = heading(&format!("{team} ({} players)", records.len()));
    out.push_str(&render_table(&TEAM_HEADERS, &rows));
    out
}

pub fn category_report(page: &Page, records: &[PlayerRecord]) -> String {
    let kind = match page {
        Page::Bowling { .. } => "bowling",
        _ => "batting",
    };
    let title = format!(
        "Category {} ({kind}, {} players)",
        page.category_id().unwrap_or_default(),
        records.len()
    );
    let mut out = heading(&title);

    if let Some(columns) = columns_for(page) {
        let headers: Vec<&str> = columns.iter().map(|column| column.header).collect();
        let rows: Vec<Vec<String>> = table_rows(columns, records)
            .into_iter()
            .map(|row| row.cells)
            .collect();
        out.push_str(&render_table(&headers, &rows));
    }
    out
}

fn heading(title: &str) -> String {
    format!("{title}\n{}\n", "=".repeat(title.chars().count()))
}

/// Left-aligned text table sized to its widest cells.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|header| header.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = table_line(headers.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');
    for row in rows {
        out.push_str(&table_line(row.iter().map(String::as_str), &widths));
    }
    out
}

fn table_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    format!("{}\n", padded.join(" | ").trim_end())
}

#[cfg(test)]
mod tests {
    use super::{category_report, render_table, team_report};
    use t20_core::{Page, PlayerRecord};

    fn record(name: &str, team: &str) -> PlayerRecord {
        PlayerRecord {
            name: name.to_string(),
            team: team.to_string(),
            ..PlayerRecord::default()
        }
    }

    #[test]
    fn pads_columns_to_the_widest_cell() {
        let table = render_table(
            &["Player", "Runs"],
            &[
                vec!["Jos Buttler".to_string(), "191".to_string()],
                vec!["Ali".to_string(), "7".to_string()],
            ],
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Player      | Runs");
        assert_eq!(lines[1], "------------+-----");
        assert_eq!(lines[2], "Jos Buttler | 191");
        assert_eq!(lines[3], "Ali         | 7");
    }

    #[test]
    fn team_report_uses_role_fallback_and_zero_stats() {
        let mut kohli = record("Virat Kohli", "India");
        kohli.playing_role = "Top order Batter".to_string();
        kohli.runs = Some(151.0);
        let out = team_report("India", &[kohli, record("Kuldeep Yadav", "India")]);

        assert!(out.starts_with("India (2 players)\n================="));
        assert!(out.contains("Virat Kohli   | Top order Batter | 151"));
        assert!(out.contains("Kuldeep Yadav | Player           | 0"));
    }

    #[test]
    fn bowling_category_uses_bowling_headers() {
        let mut bumrah = record("Jasprit Bumrah", "India");
        bumrah.wickets = Some(15.0);
        let page = Page::category("fast".to_string());
        let out = category_report(&page, &[bumrah]);

        assert!(out.starts_with("Category fast (bowling, 1 players)"));
        assert!(out.contains("Bowling Style"));
        assert!(out.contains("Jasprit Bumrah"));
        assert!(!out.contains("Boundary %"));
    }

    #[test]
    fn batting_category_shows_blank_position() {
        let page = Page::category("power".to_string());
        let out = category_report(&page, &[record("Phil Salt", "England")]);
        let row = out.lines().last().unwrap();
        assert!(row.starts_with("Phil Salt | England"));
        // missing position is blank, boundary % falls back to 0
        assert!(row.ends_with(&format!("|{}| 0", " ".repeat(10))));
    }
}
