//! Receiver Model

use serde::{Deserialize, Serialize};

use super::ReceiverType;

/// Receiver of donations (shelter, charity, individual, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Receiver {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub receiver_type: ReceiverType,
    pub city: String,
    pub contact: String,
}

/// Create/replace receiver payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiverCreate {
    pub name: String,
    #[serde(rename = "type")]
    pub receiver_type: ReceiverType,
    pub city: String,
    pub contact: String,
}

impl From<Receiver> for ReceiverCreate {
    fn from(r: Receiver) -> Self {
        Self {
            name: r.name,
            receiver_type: r.receiver_type,
            city: r.city,
            contact: r.contact,
        }
    }
}
