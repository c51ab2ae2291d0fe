use serde::Deserialize;

#[derive(Deserialize)]
pub struct Root {
    pub(in crate::tidal) data: User,
}

#[derive(Deserialize)]
pub struct User {
    pub(in crate::tidal) attributes: UserAttributes,
}

#[derive(Deserialize)]
pub struct UserAttributes {
    /// ISO 3166-1 alpha-2
    pub(in crate::tidal) country: Option<String>,
}
