use serde::Deserialize;

/// `GET /playlists/{id}?fields=name`
#[derive(Deserialize)]
pub struct Root {
    pub(in crate::spotify) name: String,
}
