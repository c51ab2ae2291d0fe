use anyhow::Result;

/// A track as known to the source service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    /// All of the track's artists, joined with `", "`
    pub artist: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCandidate {
    pub id: String,
    pub title: String,
}

/// One page of a source playlist listing
#[derive(Debug, Default)]
pub struct SourcePage {
    /// `None` entries are items whose track is unavailable
    pub items: Vec<Option<Track>>,
    /// Opaque cursor for the following page
    pub next: Option<String>,
}

#[async_trait::async_trait]
pub trait SourceCatalog: Send + Sync {
    /// Fetch one page of a playlist's tracks, starting at the first page when `cursor` is `None`
    async fn playlist_page(&self, playlist_id: &str, cursor: Option<&str>) -> Result<SourcePage>;
}

#[async_trait::async_trait]
pub trait TargetCatalog: Send + Sync {
    /// Country code of the authenticated account
    async fn region(&self) -> Result<String>;

    /// Candidates in the order the service ranked them
    async fn search(&self, query: &str, region: &str) -> Result<Vec<SearchCandidate>>;

    /// Returns the new playlist's ID
    async fn create_playlist(&self, name: &str, region: &str) -> Result<String>;

    async fn append_tracks(&self, playlist_id: &str, track_ids: &[String], region: &str)
    -> Result<()>;
}
