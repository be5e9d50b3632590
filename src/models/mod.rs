pub mod auth;
pub mod cart;
pub mod matches;
pub mod order;
pub mod product;
pub mod profile;

pub use auth::*;
pub use cart::*;
pub use matches::*;
pub use order::*;
pub use product::*;
pub use profile::*;

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Str(String),
    Int(i64),
    Uint(u64),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Str(s) => s,
            RawId::Int(n) => n.to_string(),
            RawId::Uint(n) => n.to_string(),
        }
    }
}

/// Accept either a JSON string or a JSON number for identifier fields.
///
/// The backend sends ids as strings on most endpoints but as integers in
/// order history.
pub(crate) fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(RawId::into_string)
}

/// [`id_from_string_or_number`] for optional fields; `null` maps to `None`.
pub(crate) fn opt_id_from_string_or_number<'de, D>(
    deserializer: D,
) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawId>::deserialize(deserializer).map(|id| id.map(RawId::into_string))
}
