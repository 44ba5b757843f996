//! Bearer-token supply for gateway calls.
//!
//! Session mechanics (login, refresh, storage) live in the surrounding
//! application; the gateway only asks its [`TokenSource`] for the current
//! bearer value right before each request. A `None` answer is a
//! precondition failure — no request is made.

/// Supplies the current bearer authorization value, if any.
pub trait TokenSource: Send + Sync {
    /// The full `Authorization` header value, e.g. `Bearer eyJ...`.
    fn bearer(&self) -> Option<String>;
}

/// A fixed token, useful for tools and tests.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        if token.starts_with("Bearer ") {
            Self(token)
        } else {
            Self(format!("Bearer {token}"))
        }
    }
}

impl TokenSource for StaticToken {
    fn bearer(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Always answers `None`; every call fails its auth precondition.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl TokenSource for Anonymous {
    fn bearer(&self) -> Option<String> {
        None
    }
}
