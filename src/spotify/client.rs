use anyhow::Result;
use tracing::debug;

use crate::catalog::{SourceCatalog, SourcePage};
use crate::spotify::api_types;

const API_BASE: &str = "https://api.spotify.com/v1";

pub struct Client {
    client: reqwest::Client,
    page_size: u32,
}

impl Client {
    pub fn new(access_token: &str, page_size: u32) -> Result<Self> {
        let headers = {
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert(
                "Authorization",
                format!("Bearer {}", access_token).try_into()?,
            );
            headers
        };
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        Ok(Self { client, page_size })
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url, "GET");
        Ok(self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn get_playlist(&self, playlist_id: &str) -> Result<api_types::playlist::Root> {
        self.get(&format!("{API_BASE}/playlists/{playlist_id}?fields=name"))
            .await
    }

    /// `url` is either the first page or a `next` link from a previous page
    pub async fn get_playlist_tracks(
        &self,
        url: &str,
    ) -> Result<api_types::playlist_tracks::Root> {
        self.get(url).await
    }

    pub async fn get_my_playlists(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<api_types::playlists::Root> {
        self.get(&format!(
            "{API_BASE}/me/playlists?limit={limit}&offset={offset}",
        ))
        .await
    }

    fn first_tracks_page(&self, playlist_id: &str) -> String {
        format!(
            "{API_BASE}/playlists/{playlist_id}/tracks?limit={}",
            self.page_size,
        )
    }
}

#[async_trait::async_trait]
impl SourceCatalog for Client {
    async fn playlist_page(&self, playlist_id: &str, cursor: Option<&str>) -> Result<SourcePage> {
        let url = match cursor {
            Some(next) => next.to_owned(),
            None => self.first_tracks_page(playlist_id),
        };
        Ok(self.get_playlist_tracks(&url).await?.into())
    }
}
