use serde::{Deserialize, Serialize};

use super::{id_from_string_or_number, Product};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Liked,
    Disliked,
}

/// Body of `POST /api/matches`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatch {
    pub product_id: String,
    pub status: MatchStatus,
}

/// A bookmarked product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default)]
    pub status: Option<MatchStatus>,
    #[serde(default)]
    pub product: Option<Product>,
}
