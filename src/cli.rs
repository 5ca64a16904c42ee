use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::models::{NewTarget, Page, TargetUpdate, DEFAULT_LIMIT};

#[derive(Parser, Debug)]
#[command(name = "spy-cat-agency")]
#[command(version, about = "Manage spy cats, their missions and targets")]
pub struct Cli {
    /// SQLite database path
    #[arg(long, global = true, env = "SPY_CATS_DB")]
    pub db: Option<PathBuf>,

    /// Breed list endpoint
    #[arg(long, global = true, env = "SPY_CATS_BREEDS_URL")]
    pub breeds_url: Option<String>,

    /// API key sent to the breed list endpoint
    #[arg(long, global = true, env = "SPY_CATS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Validate breeds against this list instead of the live endpoint (comma-separated)
    #[arg(long, global = true, value_delimiter = ',')]
    pub offline_breeds: Option<Vec<String>>,

    /// HTTP timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage spy cats
    Cats {
        #[command(subcommand)]
        command: CatCommands,
    },

    /// Manage missions and their targets
    Missions {
        #[command(subcommand)]
        command: MissionCommands,
    },

    /// List recognized cat breeds
    Breeds,
}

#[derive(Subcommand, Debug)]
pub enum CatCommands {
    /// Recruit a new spy cat
    Create {
        #[arg(long)]
        name: String,

        /// Years of experience
        #[arg(long)]
        years: i64,

        #[arg(long)]
        breed: String,

        #[arg(long)]
        salary: i64,
    },

    /// List spy cats
    List(PageArgs),

    /// Show a spy cat and its mission
    Get { id: i64 },

    /// Change a spy cat's salary
    Salary {
        id: i64,
        #[arg(allow_negative_numbers = true)]
        salary: i64,
    },

    /// Delete a spy cat
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum MissionCommands {
    /// Create a mission with its targets
    Create {
        /// Target as NAME:COUNTRY[:NOTES], repeatable
        #[arg(
            short,
            long = "target",
            value_parser = parse_target_spec,
            required_unless_present = "file"
        )]
        targets: Vec<NewTarget>,

        /// JSON file with a mission body: {"targets": [...]}
        #[arg(short, long, conflicts_with = "targets")]
        file: Option<PathBuf>,
    },

    /// List missions
    List(PageArgs),

    /// Show a mission with its targets
    Get { id: i64 },

    /// Delete an incomplete mission
    Delete { id: i64 },

    /// Assign a spy cat to a mission
    Assign { mission_id: i64, cat_id: i64 },

    /// Update fields of a target
    UpdateTarget {
        mission_id: i64,
        target_id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        country: Option<String>,

        #[arg(long, conflicts_with = "clear_notes")]
        notes: Option<String>,

        /// Set notes to null
        #[arg(long)]
        clear_notes: bool,

        /// Mark the target complete (true) or not (false)
        #[arg(long)]
        complete: Option<bool>,
    },
}

#[derive(Args, Debug, Clone, Copy)]
pub struct PageArgs {
    #[arg(long, default_value_t = 0)]
    pub skip: u32,

    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: u32,
}

impl From<PageArgs> for Page {
    fn from(args: PageArgs) -> Self {
        Page::new(args.skip, args.limit)
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

/// Build a partial update from the `update-target` flags
pub fn target_update(
    name: Option<String>,
    country: Option<String>,
    notes: Option<String>,
    clear_notes: bool,
    complete: Option<bool>,
) -> TargetUpdate {
    let notes = if clear_notes { Some(None) } else { notes.map(Some) };
    TargetUpdate {
        name,
        country,
        notes,
        complete,
    }
}

/// Parse `NAME:COUNTRY[:NOTES]`; notes may contain further colons
pub fn parse_target_spec(spec: &str) -> Result<NewTarget, String> {
    let mut parts = spec.splitn(3, ':');
    let name = parts.next().unwrap_or_default().trim();
    let country = parts.next().map(str::trim).unwrap_or_default();

    if name.is_empty() || country.is_empty() {
        return Err(format!("expected NAME:COUNTRY[:NOTES], got '{}'", spec));
    }

    let target = NewTarget::new(name, country);
    Ok(match parts.next() {
        Some(notes) => target.with_notes(notes),
        None => target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target_spec() {
        let target = parse_target_spec("Dr. Mew:FR").unwrap();
        assert_eq!(target.name, "Dr. Mew");
        assert_eq!(target.country, "FR");
        assert_eq!(target.notes, None);

        let target = parse_target_spec("Boss:UA:meets at 10:30").unwrap();
        assert_eq!(target.notes.as_deref(), Some("meets at 10:30"));

        assert!(parse_target_spec("lonely").is_err());
        assert!(parse_target_spec(":FR").is_err());
    }

    #[test]
    fn test_mission_create_args() {
        let cli = Cli::parse_from([
            "spy-cat-agency",
            "missions",
            "create",
            "-t",
            "A:X",
            "--target",
            "B:Y:hides",
        ]);
        match cli.command {
            Commands::Missions {
                command: MissionCommands::Create { targets, file },
            } => {
                assert_eq!(targets.len(), 2);
                assert_eq!(targets[1].notes.as_deref(), Some("hides"));
                assert!(file.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_target_update_flags() {
        let update = target_update(None, None, None, true, None);
        assert_eq!(update.notes, Some(None));

        let update = target_update(Some("N".into()), None, Some("x".into()), false, Some(true));
        assert_eq!(update.name.as_deref(), Some("N"));
        assert_eq!(update.notes, Some(Some("x".to_string())));
        assert_eq!(update.complete, Some(true));
        assert!(update.country.is_none());
    }

    #[test]
    fn test_page_defaults() {
        let cli = Cli::parse_from(["spy-cat-agency", "cats", "list", "--skip", "5"]);
        match cli.command {
            Commands::Cats {
                command: CatCommands::List(page),
            } => assert_eq!(Page::from(page), Page::new(5, DEFAULT_LIMIT)),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
