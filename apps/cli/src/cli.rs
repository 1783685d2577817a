use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "t20", version, about = "T20 analytics reports and image tooling")]
pub struct CliArgs {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Override the stats API base URL
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Override the player image directory
    #[arg(long = "images-dir", value_name = "PATH", global = true)]
    pub images_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print a team roster
    Team {
        name: String,
        /// Print the raw records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a batting or bowling category table
    Category {
        id: String,
        /// Print the raw records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fuzzy-search players, teams and categories
    Search {
        query: String,
        /// Print the matches as JSON
        #[arg(long)]
        json: bool,
    },
    /// Player image maintenance
    Images {
        #[command(subcommand)]
        action: ImagesCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum ImagesCommand {
    /// Print the expected image file name for every player
    Names,
    /// List players without an image on disk
    Audit {
        /// Also write `name,expected_filename` rows to this CSV file
        #[arg(long, value_name = "PATH")]
        csv: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write SVG placeholders for players without an image
    Placeholders {
        /// Report what would be written without touching the disk
        #[arg(long)]
        dry_run: bool,
    },
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.api_url {
            std::env::set_var("T20_API_URL", url);
        }
        if let Some(dir) = &self.images_dir {
            std::env::set_var("T20_IMAGES_DIR", dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CliArgs, Command, ImagesCommand};
    use clap::Parser;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let args = CliArgs::parse_from([
            "t20",
            "images",
            "audit",
            "--csv",
            "missing.csv",
            "--images-dir",
            "assets/img",
        ]);

        assert_eq!(
            args.images_dir.as_deref(),
            Some(std::path::Path::new("assets/img"))
        );
        match args.command {
            Command::Images {
                action: ImagesCommand::Audit { csv, json },
            } => {
                assert_eq!(csv.as_deref(), Some(std::path::Path::new("missing.csv")));
                assert!(!json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn search_and_audit_accept_json() {
        let search = CliArgs::parse_from(["t20", "search", "kohli", "--json"]);
        assert!(matches!(
            search.command,
            Command::Search { ref query, json: true } if query == "kohli"
        ));

        let audit = CliArgs::parse_from(["t20", "images", "audit", "--json"]);
        assert!(matches!(
            audit.command,
            Command::Images {
                action: ImagesCommand::Audit { csv: None, json: true }
            }
        ));
    }

    #[test]
    fn parses_category_json_flag() {
        let args = CliArgs::parse_from(["t20", "--debug", "category", "fast", "--json"]);
        assert!(args.debug);
        assert!(matches!(
            args.command,
            Command::Category { ref id, json: true } if id == "fast"
        ));
    }
}
