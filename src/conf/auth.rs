use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Bearer token required on every media request. `None` leaves the gate open.
    #[serde(default)]
    pub admin_token: Option<String>,
}
