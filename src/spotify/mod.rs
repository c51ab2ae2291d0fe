mod api_types;
mod client;

use anyhow::{Result, ensure};

use crate::catalog::{SourcePage, Track};

pub use client::Client;

/// Separator between a track's artists
pub const ARTIST_SEPARATOR: &str = ", ";

/// A playlist belonging to the current user
#[derive(Debug, PartialEq, Eq)]
pub struct PlaylistEntry {
    pub id: String,
    pub name: String,
}

pub fn validate_playlist_id(id: &str) -> bool {
    id.len() == 22 && id.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Accepts a bare ID, a `spotify:playlist:` URI or an `open.spotify.com` link
pub fn parse_playlist_id(input: &str) -> Option<&str> {
    let input = input.trim();
    let id = if let Some(id) = input.strip_prefix("spotify:playlist:") {
        id
    } else if let Some((_, rest)) = input.split_once("open.spotify.com/") {
        let rest = rest.split(['?', '#']).next().unwrap_or_default();
        let mut segments = rest.split('/').filter(|s| !s.is_empty());
        // Localized links carry a leading `intl-xx` segment
        let mut kind = segments.next()?;
        if kind.starts_with("intl-") {
            kind = segments.next()?;
        }
        if kind != "playlist" {
            return None;
        }
        segments.next()?
    } else {
        input
    };
    validate_playlist_id(id).then_some(id)
}

impl From<api_types::playlist_tracks::Root> for SourcePage {
    fn from(value: api_types::playlist_tracks::Root) -> Self {
        SourcePage {
            items: value
                .items
                .into_iter()
                .map(|item| {
                    item.track.map(|track| Track {
                        name: track.name,
                        artist: track
                            .artists
                            .into_iter()
                            .map(|artist| artist.name)
                            .collect::<Vec<_>>()
                            .join(ARTIST_SEPARATOR),
                    })
                })
                .collect(),
            next: value.next,
        }
    }
}

impl api_types::playlists::Root {
    fn into_entries(self) -> impl Iterator<Item = PlaylistEntry> {
        self.items.into_iter().flatten().map(|playlist| PlaylistEntry {
            id: playlist.id,
            name: playlist.name,
        })
    }
}

impl Client {
    /// Every playlist of the current user, following pages by offset
    pub async fn all_playlists(&self, page_size: u32) -> Result<Vec<PlaylistEntry>> {
        ensure!(page_size > 0, "page size must be positive");
        let mut playlists = Vec::new();
        let mut offset = 0;
        loop {
            let page = self.get_my_playlists(page_size, offset).await?;
            let count = page.items.len();
            let last = page.next.is_none();
            playlists.extend(page.into_entries());
            if last || count == 0 {
                break;
            }
            offset += page_size;
        }
        Ok(playlists)
    }

    pub async fn playlist_name(&self, playlist_id: &str) -> Result<String> {
        Ok(self.get_playlist(playlist_id).await?.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_playlist_id() {
        let id = "37i9dQZF1DXcBWIGoYBM5M";
        assert_eq!(parse_playlist_id(id), Some(id));
        assert_eq!(parse_playlist_id(&format!("spotify:playlist:{id}")), Some(id));
        assert_eq!(
            parse_playlist_id(&format!("https://open.spotify.com/playlist/{id}?si=abc123")),
            Some(id),
        );
        assert_eq!(
            parse_playlist_id(&format!("https://open.spotify.com/intl-de/playlist/{id}")),
            Some(id),
        );
        assert_eq!(
            parse_playlist_id(&format!("https://open.spotify.com/album/{id}")),
            None,
        );
        assert_eq!(parse_playlist_id("too-short"), None);
    }

    #[test]
    fn test_page_from_api_response() {
        let body = r#"{
            "items": [
                {"track": {"name": "Under Pressure", "artists": [{"name": "Queen"}, {"name": "David Bowie"}]}},
                {"track": null},
                {"track": {"name": "Episode 1"}}
            ],
            "next": "https://api.spotify.com/v1/playlists/x/tracks?offset=100&limit=100"
        }"#;
        let root: api_types::playlist_tracks::Root = serde_json::from_str(body).unwrap();
        let page = SourcePage::from(root);

        assert_eq!(
            page.items,
            [
                Some(Track {
                    name: "Under Pressure".to_owned(),
                    artist: "Queen, David Bowie".to_owned(),
                }),
                None,
                Some(Track {
                    name: "Episode 1".to_owned(),
                    artist: String::new(),
                }),
            ],
        );
        assert_eq!(
            page.next.as_deref(),
            Some("https://api.spotify.com/v1/playlists/x/tracks?offset=100&limit=100"),
        );
    }

    #[test]
    fn test_playlists_skip_null_entries() {
        let body = r#"{
            "items": [
                {"id": "37i9dQZF1DXcBWIGoYBM5M", "name": "Today's Top Hits"},
                null,
                {"id": "5ABHKGoOzxkaa28ttQV9sE", "name": "Road Trip"}
            ],
            "next": null
        }"#;
        let root: api_types::playlists::Root = serde_json::from_str(body).unwrap();

        assert_eq!(
            root.into_entries().collect::<Vec<_>>(),
            [
                PlaylistEntry {
                    id: "37i9dQZF1DXcBWIGoYBM5M".to_owned(),
                    name: "Today's Top Hits".to_owned(),
                },
                PlaylistEntry {
                    id: "5ABHKGoOzxkaa28ttQV9sE".to_owned(),
                    name: "Road Trip".to_owned(),
                },
            ],
        );
    }

    #[test]
    fn test_last_page_has_no_next() {
        let root: api_types::playlist_tracks::Root =
            serde_json::from_str(r#"{"items": [], "next": null}"#).unwrap();
        let page = SourcePage::from(root);
        assert!(page.items.is_empty());
        assert!(page.next.is_none());
    }
}
