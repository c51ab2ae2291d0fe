use serde::Deserialize;

#[derive(Deserialize)]
pub struct Root {
    /// Missing when nothing matched the query
    #[serde(default)]
    pub(in crate::tidal) included: Vec<Resource>,
}

#[derive(Deserialize)]
pub struct Resource {
    pub(in crate::tidal) id: Option<String>,
    #[serde(rename = "type")]
    pub(in crate::tidal) kind: String,
    pub(in crate::tidal) attributes: Option<ResourceAttributes>,
}

#[derive(Deserialize)]
pub struct ResourceAttributes {
    pub(in crate::tidal) title: Option<String>,
}
