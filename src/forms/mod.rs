pub mod auth;
pub mod city;
pub mod profile;
pub mod venue;

use serde::Deserialize;

/// Bare form carrying only the anti-forgery token, for state-changing POSTs
/// with no other fields (logout, delete).
#[derive(Debug, Default, Deserialize)]
pub struct CsrfForm {
    #[serde(default)]
    pub csrf_token: String,
}
