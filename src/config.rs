use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;
use std::time::Duration;

use crate::agency::Agency;
use crate::breeds::{BreedCatalog, CatApiClient, StaticBreeds, DEFAULT_BREEDS_URL};
use crate::cli::Cli;
use crate::store::Store;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where valid breed names come from
#[derive(Debug, Clone, PartialEq)]
pub enum BreedSource {
    Live {
        url: String,
        api_key: Option<String>,
    },
    Offline(Vec<String>),
}

/// Runtime settings, resolved from flags, environment and defaults
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub breeds: BreedSource,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let db_path = match &cli.db {
            Some(path) => path.clone(),
            None => default_db_path()?,
        };

        let breeds = match &cli.offline_breeds {
            Some(names) => BreedSource::Offline(names.clone()),
            None => BreedSource::Live {
                url: cli
                    .breeds_url
                    .clone()
                    .unwrap_or_else(|| DEFAULT_BREEDS_URL.to_string()),
                api_key: cli.api_key.clone(),
            },
        };

        Ok(Self {
            db_path,
            breeds,
            http_timeout: Duration::from_secs(cli.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }

    pub fn breed_catalog(&self) -> Result<Box<dyn BreedCatalog>> {
        match &self.breeds {
            BreedSource::Live { url, api_key } => {
                let client = CatApiClient::new(url.clone(), api_key.clone(), self.http_timeout)
                    .context("Failed to set up breed catalog")?;
                Ok(Box::new(client))
            }
            BreedSource::Offline(names) => Ok(Box::new(StaticBreeds::new(names.iter().cloned()))),
        }
    }

    pub fn open_agency(&self) -> Result<Agency<Box<dyn BreedCatalog>>> {
        let store = Store::open(&self.db_path)
            .with_context(|| format!("Failed to open database {:?}", self.db_path))?;
        Ok(Agency::new(store, self.breed_catalog()?))
    }
}

/// `<data dir>/agency.db` for this user
pub fn default_db_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("", "", "spy-cat-agency")
        .context("Could not determine data directory")?;
    Ok(proj_dirs.data_dir().join("agency.db"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "spy-cat-agency",
            "--db",
            "/tmp/agency-test.db",
            "--timeout",
            "3",
            "--api-key",
            "k",
            "breeds",
        ]);
        let config = Config::from_cli(&cli).unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/agency-test.db"));
        assert_eq!(config.http_timeout, Duration::from_secs(3));
        assert_eq!(
            config.breeds,
            BreedSource::Live {
                url: DEFAULT_BREEDS_URL.to_string(),
                api_key: Some("k".to_string()),
            }
        );
    }

    #[test]
    fn test_offline_breeds() {
        let cli = Cli::parse_from([
            "spy-cat-agency",
            "--db",
            "x.db",
            "--offline-breeds",
            "Bengal,Siamese",
            "breeds",
        ]);
        let config = Config::from_cli(&cli).unwrap();
        let catalog = config.breed_catalog().unwrap();

        assert!(catalog.is_valid_breed("Siamese").unwrap());
        assert!(!catalog.is_valid_breed("Poodle").unwrap());
    }
}
