use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct Root {
    pub(in crate::tidal) data: Playlist,
}

#[derive(Deserialize)]
pub struct Playlist {
    pub(in crate::tidal) id: Option<String>,
}

#[derive(Serialize)]
pub struct CreateRequest<'a> {
    pub(in crate::tidal) data: CreateRequestData<'a>,
}

#[derive(Serialize)]
pub struct CreateRequestData<'a> {
    #[serde(rename = "type")]
    pub(in crate::tidal) kind: &'static str,
    pub(in crate::tidal) attributes: CreateRequestAttributes<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestAttributes<'a> {
    pub(in crate::tidal) access_type: &'static str,
    pub(in crate::tidal) description: &'static str,
    pub(in crate::tidal) name: &'a str,
}

#[derive(Serialize)]
pub struct ItemsRequest<'a> {
    pub(in crate::tidal) data: Vec<ResourceIdentifier<'a>>,
}

#[derive(Serialize)]
pub struct ResourceIdentifier<'a> {
    pub(in crate::tidal) id: &'a str,
    #[serde(rename = "type")]
    pub(in crate::tidal) kind: &'static str,
}
