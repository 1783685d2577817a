use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use t20_core::image::{image_file_name, image_id, IMAGE_EXTENSIONS};
use t20_core::PlayerRecord;
use thiserror::Error;

const DEFAULT_TEAM_COLOR: &str = "#5a00b8";

const TEAM_COLORS: [(&str, &str); 16] = [
    ("Afghanistan", "#5a00b8"),
    ("Australia", "#e4007a"),
    ("Bangladesh", "#2b0066"),
    ("England", "#5a00b8"),
    ("India", "#2b0066"),
    ("Ireland", "#5a00b8"),
    ("Namibia", "#e4007a"),
    ("Netherlands", "#5a00b8"),
    ("New Zealand", "#2b0066"),
    ("Pakistan", "#5a00b8"),
    ("Scotland", "#e4007a"),
    ("South Africa", "#2b0066"),
    ("Sri Lanka", "#5a00b8"),
    ("U.A.E.", "#e4007a"),
    ("West Indies", "#2b0066"),
    ("Zimbabwe", "#5a00b8"),
];

#[derive(Debug, Error)]
pub enum ImageToolError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write CSV {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

impl ImageToolError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.display().to_string(),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingImage {
    pub name: String,
    pub team: String,
    pub expected_filename: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub checked: usize,
    pub missing: Vec<MissingImage>,
    pub generated_at: DateTime<Utc>,
}

/// `(name, expected file name)` for every named player, in API order.
pub fn expected_names(records: &[PlayerRecord]) -> Vec<(String, String)> {
    named(records)
        .map(|record| {
            let name = record.name.trim();
            (name.to_string(), image_file_name(name, IMAGE_EXTENSIONS[0]))
        })
        .collect()
}

/// First existing photo for `name`, trying each known extension.
pub fn find_image(dir: &Path, name: &str) -> Option<PathBuf> {
    let id = image_id(name);
    IMAGE_EXTENSIONS
        .iter()
        .map(|extension| dir.join(format!("{id}.{extension}")))
        .find(|path| path.is_file())
}

pub fn audit(dir: &Path, records: &[PlayerRecord]) -> AuditReport {
    let mut checked = 0;
    let mut missing = Vec::new();

    for record in named(records) {
        checked += 1;
        let name = record.name.trim();
        if find_image(dir, name).is_none() {
            missing.push(MissingImage {
                name: name.to_string(),
                team: record.team.clone(),
                expected_filename: image_file_name(name, IMAGE_EXTENSIONS[0]),
            });
        }
    }

    tracing::debug!("checked {checked} players in {}", dir.display());
    AuditReport {
        checked,
        missing,
        generated_at: Utc::now(),
    }
}

fn named(records: &[PlayerRecord]) -> impl Iterator<Item = &PlayerRecord> {
    records
        .iter()
        .filter(|record| !record.name.trim().is_empty())
}

pub fn render_audit(report: &AuditReport) -> String {
    let mut out = format!(
        "Image audit ({})\nTotal players checked: {}\nMissing images: {}\n",
        report.generated_at.format("%Y-%m-%d %H:%M UTC"),
        report.checked,
        report.missing.len()
    );
    for missing in &report.missing {
        out.push_str(&format!("{} -> {}\n", missing.name, missing.expected_filename));
    }
    out
}

/// Writes `name,expected_filename` rows for the missing players.
pub fn write_missing_csv(path: &Path, missing: &[MissingImage]) -> Result<(), ImageToolError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|error| ImageToolError::io(parent, error))?;
    }

    let mut writer = csv::Writer::from_path(path).map_err(|error| ImageToolError::csv(path, error))?;
    writer
        .write_record(["name", "expected_filename"])
        .map_err(|error| ImageToolError::csv(path, error))?;
    for row in missing {
        writer
            .write_record([row.name.as_str(), row.expected_filename.as_str()])
            .map_err(|error| ImageToolError::csv(path, error))?;
    }
    writer
        .flush()
        .map_err(|error| ImageToolError::io(path, error))
}

pub fn team_color(team: &str) -> &'static str {
    TEAM_COLORS
        .iter()
        .find(|(known, _)| *known == team.trim())
        .map_or(DEFAULT_TEAM_COLOR, |(_, color)| color)
}

fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Names of more than two words wrap after the second word.
fn name_lines(name: &str) -> (String, String) {
    let words: Vec<&str> = name.split_whitespace().collect();
    if words.len() > 2 {
        (words[..2].join(" "), words[2..].join(" "))
    } else {
        (words.join(" "), String::new())
    }
}

/// 512x512 silhouette tinted with the team colour and captioned with the name.
pub fn placeholder_svg(name: &str, color: &str) -> String {
    let (first, second) = name_lines(name);
    let first = xml_escape(&first);
    let second = xml_escape(&second);
    format!(
        r##"<?xml version="1.0" encoding="UTF-8"?>
<svg width="512" height="512" version="1.1" viewBox="0 0 512 512" xmlns="http://www.w3.org/2000/svg">
 <defs>
  <linearGradient id="grad" x1="0%" y1="0%" x2="100%" y2="100%">
   <stop offset="0%" style="stop-color:{color};stop-opacity:0.9"/>
   <stop offset="100%" style="stop-color:{color};stop-opacity:0.7"/>
  </linearGradient>
 </defs>
 <rect width="512" height="512" fill="url(#grad)"/>
 <circle cx="256" cy="180" r="100" fill="#ffffff" fill-opacity="0.2"/>
 <path d="m256 130c-30 0-50 25-50 50 0 30 20 50 50 50s50-20 50-50c0-25-20-50-50-50zm0 120c-60 0-100 40-100 60v20h200v-20c0-20-40-60-100-60z" fill="#ffffff" fill-opacity="0.2"/>
 <g fill="#ffffff" font-family="Arial" text-anchor="middle">
  <text x="256" y="400" font-size="40">{first}</text>
  <text x="256" y="450" font-size="40">{second}</text>
 </g>
</svg>
"##
    )
}

/// Writes `{id}.svg` for each missing player and returns the paths. With
/// `dry_run` nothing touches the disk.
pub fn write_placeholders(
    dir: &Path,
    missing: &[MissingImage],
    dry_run: bool,
) -> Result<Vec<PathBuf>, ImageToolError> {
    if !dry_run && !missing.is_empty() {
        fs::create_dir_all(dir).map_err(|error| ImageToolError::io(dir, error))?;
    }

    let mut written = Vec::with_capacity(missing.len());
    for player in missing {
        let path = dir.join(image_file_name(&player.name, "svg"));
        if dry_run {
            tracing::info!("would write {}", path.display());
        } else {
            let svg = placeholder_svg(&player.name, team_color(&player.team));
            fs::write(&path, svg).map_err(|error| ImageToolError::io(&path, error))?;
            tracing::debug!("wrote {}", path.display());
        }
        written.push(path);
    }
    Ok(written)
}
