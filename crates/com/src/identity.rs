/// Header carrying the signed-in user's email on authenticated calls.
pub const IDENTITY_HEADER: &str = "X-User-Email";

/// Source of the current user's identity.
pub trait IdentityProvider: Send + Sync {
    /// Email of the signed-in user, if any.
    fn email(&self) -> Option<String>;
}

/// Nobody is signed in.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl IdentityProvider for Anonymous {
    fn email(&self) -> Option<String> {
        None
    }
}

/// A fixed identity, for tools and tests.
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    email: String,
}

impl StaticIdentity {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

impl IdentityProvider for StaticIdentity {
    fn email(&self) -> Option<String> {
        Some(self.email.clone())
    }
}
