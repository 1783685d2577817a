use std::collections::BTreeSet;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::Serialize;
use t20_core::endpoint::encode_component;
use t20_core::nav::category_href;
use t20_core::page::CATEGORIES;
use t20_core::PlayerRecord;

const PLAYER_LIMIT: usize = 5;
const TEAM_LIMIT: usize = 3;
const CATEGORY_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hit {
    pub label: String,
    pub detail: String,
    pub score: i64,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub players: Vec<Hit>,
    pub teams: Vec<Hit>,
    pub categories: Vec<Hit>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.players.is_empty() && self.teams.is_empty() && self.categories.is_empty()
    }
}

pub fn search(query: &str, records: &[PlayerRecord]) -> SearchResults {
    let query = query.trim();
    if query.is_empty() {
        return SearchResults::default();
    }
    let matcher = SkimMatcherV2::default().ignore_case();

    let players = best(
        &matcher,
        query,
        records
            .iter()
            .filter(|record| !record.name.trim().is_empty())
            .map(|record| (record.name.clone(), record.team.clone())),
        PLAYER_LIMIT,
    );

    let teams: BTreeSet<&str> = records
        .iter()
        .map(|record| record.team.trim())
        .filter(|team| !team.is_empty())
        .collect();
    let teams = best(
        &matcher,
        query,
        teams
            .into_iter()
            .map(|team| (team.to_string(), format!("/team/{}", encode_component(team)))),
        TEAM_LIMIT,
    );

    let categories = best(
        &matcher,
        query,
        CATEGORIES
            .iter()
            .map(|category| ((*category).to_string(), category_href(category))),
        CATEGORY_LIMIT,
    );

    SearchResults {
        players,
        teams,
        categories,
    }
}

/// Highest-scoring candidates, ties kept in input order.
fn best(
    matcher: &SkimMatcherV2,
    query: &str,
    candidates: impl Iterator<Item = (String, String)>,
    limit: usize,
) -> Vec<Hit> {
    let mut hits: Vec<Hit> = candidates
        .filter_map(|(label, detail)| {
            matcher.fuzzy_match(&label, query).map(|score| Hit {
                label,
                detail,
                score,
            })
        })
        .collect();
    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits.truncate(limit);
    hits
}

pub fn render(results: &SearchResults) -> String {
    if results.is_empty() {
        return "No matches\n".to_string();
    }
    let mut out = String::new();
    for (title, hits) in [
        ("Players", &results.players),
        ("Teams", &results.teams),
        ("Categories", &results.categories),
    ] {
        if hits.is_empty() {
            continue;
        }
        out.push_str(title);
        out.push_str(":\n");
        for hit in hits {
            out.push_str(&format!("- {} | {}\n", hit.label, hit.detail));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{render, search};
    use t20_core::PlayerRecord;

    fn players() -> Vec<PlayerRecord> {
        [
            ("Virat Kohli", "India"),
            ("Rohit Sharma", "India"),
            ("Rashid Khan", "Afghanistan"),
            ("Travis Head", "Australia"),
            ("Adam Zampa", "Australia"),
            ("", "Ireland"),
        ]
        .into_iter()
        .map(|(name, team)| PlayerRecord {
            name: name.to_string(),
            team: team.to_string(),
            ..PlayerRecord::default()
        })
        .collect()
    }

    #[test]
    fn finds_players_by_partial_name() {
        let results = search("kohli", &players());
        assert_eq!(results.players[0].label, "Virat Kohli");
        assert_eq!(results.players[0].detail, "India");
    }

    #[test]
    fn teams_are_deduplicated() {
        let results = search("india", &players());
        assert_eq!(results.teams.len(), 1);
        assert_eq!(results.teams[0].detail, "/team/India");
    }

    #[test]
    fn categories_are_searched_too() {
        let results = search("fin", &players());
        assert_eq!(results.categories[0].label, "finisher");
        assert_eq!(results.categories[0].detail, "/category/finisher");
    }

    #[test]
    fn results_serialize_by_group() {
        let value = serde_json::to_value(search("kohli", &players())).unwrap();
        assert_eq!(value["players"][0]["label"], "Virat Kohli");
        assert_eq!(value["players"][0]["detail"], "India");
        assert!(value["teams"].is_array());
        assert!(value["categories"].is_array());
    }

    #[test]
    fn empty_query_matches_nothing() {
        let results = search("   ", &players());
        assert!(results.is_empty());
        assert_eq!(render(&results), "No matches\n");
    }

    #[test]
    fn player_hits_are_capped() {
        let results = search("a", &players());
        assert!(results.players.len() <= 5);
        assert!(results.teams.len() <= 3);
        assert!(results.players.iter().all(|hit| !hit.label.is_empty()));
    }
}
