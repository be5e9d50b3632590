use crate::config;
use crate::connection::Connection;
use crate::error::Result;
use crate::models::{PreferencesUpdate, Profile, ProfileUpdate};
use crate::request::{Method, RequestBuilder};

pub struct ProfileApi<'a> {
    conn: &'a Connection,
}

impl<'a> ProfileApi<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn get(&self) -> Result<Profile> {
        let req = RequestBuilder::new(Method::Get, config::PROFILE_PATH).build();
        self.conn.execute_as(req)
    }

    /// `PUT /api/profile/update`. The reply body is returned untouched.
    pub fn update(&self, update: &ProfileUpdate) -> Result<serde_json::Value> {
        let req = RequestBuilder::new(Method::Put, config::PROFILE_UPDATE_PATH)
            .json(update)?
            .build();
        self.conn.execute(req)
    }

    pub fn update_preferences(&self, prefs: &PreferencesUpdate) -> Result<serde_json::Value> {
        let req = RequestBuilder::new(Method::Put, config::PROFILE_PREFERENCES_PATH)
            .json(prefs)?
            .build();
        self.conn.execute(req)
    }
}
