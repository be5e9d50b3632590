//! User-visible notices and navigation outcomes.
//!
//! Flows never render anything. They hand back [`Notice`] values for the
//! caller's toast layer and [`Destination`] values for its router.

use serde::Serialize;

use crate::error::DrobbError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// A transient message: a short title and a detail line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn success(title: &str, message: &str) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    pub fn error(title: &str, message: &str) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    pub fn info(title: &str, message: &str) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    /// Error notice for a failed call.
    ///
    /// Auth failures always get the "Authentication Error" title so the
    /// caller can route the user back to sign-in.
    pub fn from_error(title: &str, err: &DrobbError) -> Self {
        match err {
            DrobbError::Auth(msg) => Self::error("Authentication Error", msg),
            other => Self::error(title, &other.user_message()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Where the caller should navigate after a flow ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    /// Main application (home deck).
    Home,
    /// Previous screen.
    Back,
    /// Remain on the current screen.
    Stay,
}
