//! Provider Model

use serde::{Deserialize, Serialize};

use super::ProviderType;

/// Food provider (restaurant, grocery store, NGO, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Provider {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub provider_type: ProviderType,
    pub address: String,
    pub city: String,
    pub contact: String,
}

/// Create/replace provider payload
///
/// Updates overwrite every field, so the same payload serves both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderCreate {
    pub name: String,
    #[serde(rename = "type")]
    pub provider_type: ProviderType,
    pub address: String,
    pub city: String,
    pub contact: String,
}

impl From<Provider> for ProviderCreate {
    fn from(p: Provider) -> Self {
        Self {
            name: p.name,
            provider_type: p.provider_type,
            address: p.address,
            city: p.city,
            contact: p.contact,
        }
    }
}
