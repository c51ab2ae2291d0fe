use serde::Deserialize;

#[derive(Deserialize)]
pub struct Root {
    /// Entries can be `null`
    pub(in crate::spotify) items: Vec<Option<SimplifiedPlaylist>>,
    pub(in crate::spotify) next: Option<String>,
}

#[derive(Deserialize)]
pub struct SimplifiedPlaylist {
    pub(in crate::spotify) id: String,
    pub(in crate::spotify) name: String,
}
