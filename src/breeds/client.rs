use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::BreedCatalog;
use crate::error::{AgencyError, Result};

pub const DEFAULT_BREEDS_URL: &str = "https://api.thecatapi.com/v1/breeds";

#[derive(Debug, Deserialize)]
struct BreedInfo {
    name: String,
}

/// Live breed catalog backed by TheCatAPI. Every lookup fetches the list;
/// nothing is cached between calls.
pub struct CatApiClient {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl CatApiClient {
    pub fn new(url: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent("spy-cat-agency")
            .timeout(timeout)
            .build()
            .map_err(|e| AgencyError::Breeds(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
            api_key,
        })
    }

    /// Fetch the current breed names
    pub fn fetch_breeds(&self) -> Result<Vec<String>> {
        let mut request = self.client.get(&self.url);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| AgencyError::Breeds(format!("Failed to fetch breeds: {}", e)))?;

        let text = response
            .text()
            .map_err(|e| AgencyError::Breeds(format!("Failed to read response: {}", e)))?;

        let names = parse_breed_names(&text)?;
        debug!(count = names.len(), url = %self.url, "fetched breed list");
        Ok(names)
    }
}

impl BreedCatalog for CatApiClient {
    fn is_valid_breed(&self, name: &str) -> Result<bool> {
        Ok(self.fetch_breeds()?.iter().any(|breed| breed == name))
    }

    fn breeds(&self) -> Result<Vec<String>> {
        let mut names = self.fetch_breeds()?;
        names.sort();
        names.dedup();
        Ok(names)
    }
}

/// Extract the `name` of every breed object in a TheCatAPI response body
pub fn parse_breed_names(body: &str) -> Result<Vec<String>> {
    let breeds: Vec<BreedInfo> = serde_json::from_str(body)
        .map_err(|e| AgencyError::Breeds(format!("Failed to parse breed list: {}", e)))?;
    Ok(breeds.into_iter().map(|b| b.name).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_breed_names_ignores_extra_fields() {
        let body = r#"[
            {"id": "abys", "name": "Abyssinian", "origin": "Egypt", "weight": {"metric": "3 - 5"}},
            {"id": "beng", "name": "Bengal", "temperament": "Alert, Agile"}
        ]"#;
        assert_eq!(parse_breed_names(body).unwrap(), vec!["Abyssinian", "Bengal"]);
    }

    #[test]
    fn test_parse_breed_names_rejects_non_list() {
        let err = parse_breed_names(r#"{"message": "rate limited"}"#).unwrap_err();
        assert!(matches!(err, AgencyError::Breeds(_)));
    }
}
