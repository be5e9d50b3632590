//! Signup, OTP verification and login.
//!
//! Successful verification or login stores the issued token in the
//! connection's session store.

use crate::config;
use crate::connection::Connection;
use crate::error::{DrobbError, Result};
use crate::models::{AuthResponse, LoginRequest, SignupRequest, VerifyOtpRequest};
use crate::request::{AuthPolicy, Method, RequestBuilder};

pub struct AuthApi<'a> {
    conn: &'a Connection,
}

impl<'a> AuthApi<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Register an account. The backend replies with a message and sends an OTP.
    pub fn signup(&self, request: &SignupRequest) -> Result<AuthResponse> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(DrobbError::Validation(
                "Email and password are required".into(),
            ));
        }
        let req = RequestBuilder::new(Method::Post, config::SIGNUP_PATH)
            .auth(AuthPolicy::None)
            .json(request)?
            .build();
        self.conn.execute_as(req)
    }

    /// Confirm the OTP and store the returned token.
    pub fn verify_otp(&self, email: &str, otp: &str) -> Result<AuthResponse> {
        if otp.trim().is_empty() {
            return Err(DrobbError::Validation("Verification code is required".into()));
        }
        let body = VerifyOtpRequest {
            email: email.to_string(),
            otp: otp.trim().to_string(),
        };
        let req = RequestBuilder::new(Method::Post, config::VERIFY_OTP_PATH)
            .auth(AuthPolicy::None)
            .json(&body)?
            .build();
        let resp: AuthResponse = self.conn.execute_as(req)?;
        self.store_token(&resp)?;
        Ok(resp)
    }

    /// Log in and store the returned token.
    pub fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(DrobbError::Validation(
                "Email and password are required".into(),
            ));
        }
        let body = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let req = RequestBuilder::new(Method::Post, config::LOGIN_PATH)
            .auth(AuthPolicy::None)
            .json(&body)?
            .build();
        let resp: AuthResponse = self.conn.execute_as(req)?;
        self.store_token(&resp)?;
        tracing::info!("logged in");
        Ok(resp)
    }

    /// Forget the stored token. Purely local.
    pub fn logout(&self) -> Result<()> {
        self.conn.session().clear()
    }

    fn store_token(&self, resp: &AuthResponse) -> Result<()> {
        match resp.token.as_deref().filter(|t| !t.trim().is_empty()) {
            Some(token) => self.conn.session().set_token(token),
            None => Err(DrobbError::Decode("auth response carried no token".into())),
        }
    }
}
