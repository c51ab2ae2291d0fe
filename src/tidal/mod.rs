mod api_types;
mod client;

use anyhow::{Context, Result, ensure};

use crate::catalog::{SearchCandidate, TargetCatalog};

pub use client::Client;

pub fn validate_country_code(code: &str) -> bool {
    code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic())
}

impl api_types::search_results::Root {
    /// Track resources in the order the service ranked them
    fn into_candidates(self) -> Vec<SearchCandidate> {
        self.included
            .into_iter()
            .filter(|resource| resource.kind == "tracks")
            .filter_map(|resource| {
                Some(SearchCandidate {
                    id: resource.id?,
                    title: resource
                        .attributes
                        .and_then(|attributes| attributes.title)
                        .unwrap_or_default(),
                })
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl TargetCatalog for Client {
    async fn region(&self) -> Result<String> {
        let country = self
            .get_me()
            .await?
            .data
            .attributes
            .country
            .context("user profile has no country")?;
        ensure!(
            validate_country_code(&country),
            "invalid country code: {country}",
        );
        Ok(country.to_ascii_uppercase())
    }

    async fn search(&self, query: &str, region: &str) -> Result<Vec<SearchCandidate>> {
        Ok(self.search_tracks(query, region).await?.into_candidates())
    }

    async fn create_playlist(&self, name: &str, region: &str) -> Result<String> {
        let created = self.post_playlist(name, region).await?;
        created.data.id.context("created playlist has no ID")
    }

    async fn append_tracks(
        &self,
        playlist_id: &str,
        track_ids: &[String],
        region: &str,
    ) -> Result<()> {
        self.add_playlist_items(playlist_id, track_ids, region).await
    }
}
