//! Collaborator bundle handed to the front-ends.

use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::api::{
    self, AuthClient, HttpAuthClient, HttpSavedItemsClient, NewsApiClient, NewsClient,
    SavedItemsClient,
};
use crate::config::Config;
use crate::token::{FileTokenStore, TokenStore};

/// Everything the shell talks to. Cloning shares the same clients.
#[derive(Clone)]
pub struct Services {
    pub auth: Arc<dyn AuthClient>,
    pub news: Arc<dyn NewsClient>,
    pub saved: Arc<dyn SavedItemsClient>,
    pub tokens: Arc<dyn TokenStore>,
}

impl Services {
    /// Builds the HTTP clients and the file token store from configuration.
    ///
    /// # Errors
    /// Returns an error if a base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = api::http_client(&config.http)?;
        let backend = api::parse_base_url(&config.backend.base_url)
            .context("Invalid [backend] base_url")?;
        let news = api::parse_base_url(&config.news.base_url).context("Invalid [news] base_url")?;

        Ok(Self {
            auth: Arc::new(HttpAuthClient::new(client.clone(), backend.clone())),
            news: Arc::new(NewsApiClient::new(client.clone(), news, &config.news)),
            saved: Arc::new(HttpSavedItemsClient::new(client, backend)),
            tokens: Arc::new(FileTokenStore::default_location()),
        })
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_rejects_bad_backend_url() {
        let mut config = Config::default();
        config.backend.base_url = "not a url".into();
        let err = Services::from_config(&config).unwrap_err();
        assert!(format!("{err:#}").contains("[backend] base_url"));
    }

    #[test]
    fn test_from_config_with_defaults() {
        assert!(Services::from_config(&Config::default()).is_ok());
    }
}
