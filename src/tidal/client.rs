use anyhow::{Context, Result, anyhow};
use reqwest::Url;
use tracing::debug;

use crate::tidal::api_types;

const API_BASE: &str = "https://openapi.tidal.com/v2";
const CONTENT_TYPE: &str = "application/vnd.api+json";

pub struct Client {
    client: reqwest::Client,
}

impl Client {
    pub fn new(access_token: &str) -> Result<Self> {
        let headers = {
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert(
                "Authorization",
                format!("Bearer {}", access_token).try_into()?,
            );
            headers.insert("Accept", CONTENT_TYPE.try_into()?);
            headers
        };
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        Ok(Self { client })
    }

    pub async fn get_me(&self) -> Result<api_types::user::Root> {
        Ok(self
            .client
            .get(format!("{API_BASE}/users/me"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn search_tracks(
        &self,
        query: &str,
        country_code: &str,
    ) -> Result<api_types::search_results::Root> {
        let url = search_url(query, country_code)?;
        debug!(%url, "GET");
        Ok(self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn post_playlist(
        &self,
        name: &str,
        country_code: &str,
    ) -> Result<api_types::playlist::Root> {
        let body = api_types::playlist::CreateRequest {
            data: api_types::playlist::CreateRequestData {
                kind: "playlists",
                attributes: api_types::playlist::CreateRequestAttributes {
                    access_type: "PUBLIC",
                    description: "Imported from Spotify",
                    name,
                },
            },
        };
        Ok(self
            .client
            .post(format!("{API_BASE}/playlists?countryCode={country_code}"))
            .header("Content-Type", CONTENT_TYPE)
            .body(serde_json::to_vec(&body)?)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn add_playlist_items(
        &self,
        playlist_id: &str,
        track_ids: &[String],
        country_code: &str,
    ) -> Result<()> {
        let body = api_types::playlist::ItemsRequest {
            data: track_ids
                .iter()
                .map(|id| api_types::playlist::ResourceIdentifier {
                    id,
                    kind: "tracks",
                })
                .collect(),
        };
        self.client
            .post(format!(
                "{API_BASE}/playlists/{playlist_id}/relationships/items?countryCode={country_code}",
            ))
            .header("Content-Type", CONTENT_TYPE)
            .body(serde_json::to_vec(&body)?)
            .send()
            .await?
            .error_for_status()
            .with_context(|| format!("adding {} tracks", track_ids.len()))?;
        Ok(())
    }
}

/// The query travels as one percent-encoded path segment
pub(in crate::tidal) fn search_url(query: &str, country_code: &str) -> Result<Url> {
    let mut url = Url::parse(&format!("{API_BASE}/searchResults"))?;
    url.path_segments_mut()
        .map_err(|()| anyhow!("search URL cannot have path segments"))?
        .push(query)
        .push("relationships")
        .push("tracks");
    url.query_pairs_mut()
        .append_pair("countryCode", country_code)
        .append_pair("explicitFilter", "include")
        .append_pair("include", "tracks");
    Ok(url)
}
