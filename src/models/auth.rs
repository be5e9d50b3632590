use serde::{Deserialize, Serialize};

use crate::config;

// ---------------------------------------------------------------------------
// SignupRequest
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub gender: String,
    pub birth_date: String,
}

impl SignupRequest {
    /// Signup with the placeholder gender and birth date; onboarding fills in
    /// the real values later.
    pub fn new(email: &str, password: &str, name: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
            gender: config::SIGNUP_DEFAULT_GENDER.to_string(),
            birth_date: config::SIGNUP_DEFAULT_BIRTH_DATE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

// ---------------------------------------------------------------------------
// AuthResponse
// ---------------------------------------------------------------------------

/// Reply to signup, OTP verification and login.
///
/// Signup carries only a message; the other two carry the session token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
