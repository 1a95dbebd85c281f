use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Role granted by the identity provider, carried in the token's `role` claim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}
