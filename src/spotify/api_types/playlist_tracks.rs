use serde::Deserialize;

#[derive(Deserialize)]
pub struct Root {
    pub(in crate::spotify) items: Vec<PlaylistItem>,
    /// Full URL of the following page
    pub(in crate::spotify) next: Option<String>,
}

#[derive(Deserialize)]
pub struct PlaylistItem {
    /// `null` for tracks that are no longer available
    pub(in crate::spotify) track: Option<Track>,
}

#[derive(Deserialize)]
pub struct Track {
    pub(in crate::spotify) name: String,
    /// Absent for podcast episodes
    #[serde(default)]
    pub(in crate::spotify) artists: Vec<Artist>,
}

#[derive(Deserialize)]
pub struct Artist {
    pub(in crate::spotify) name: String,
}
