//! Identity provider port.
//!
//! Services never consult this port themselves. Callers resolve the acting
//! user once per request and pass the profile explicitly into each
//! operation.

use crate::bounty::domain::SignedInIdentity;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity provider operations.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Sign-in session contract.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the signed-in identity, or `None` when signed out.
    async fn current(&self) -> IdentityResult<Option<SignedInIdentity>>;

    /// Signs a user in and returns their identity.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] when the provider rejects the sign-in.
    async fn sign_in(&self) -> IdentityResult<SignedInIdentity>;

    /// Ends the current session. Signing out twice is not an error.
    async fn sign_out(&self) -> IdentityResult<()>;
}

/// Errors returned by identity providers.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// The provider refused to sign the user in.
    #[error("sign-in rejected: {0}")]
    SignInRejected(String),

    /// Provider failure.
    #[error("identity provider error: {0}")]
    Provider(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityError {
    /// Wraps a provider error.
    pub fn provider(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Provider(Arc::new(err))
    }
}
