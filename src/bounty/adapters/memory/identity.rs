//! Identity provider backed by a fixed account.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::bounty::{
    domain::SignedInIdentity,
    ports::{IdentityError, IdentityProvider, IdentityResult},
};

/// Identity provider that signs in one preconfigured account.
///
/// Passing `None` as the account models a provider that rejects every
/// sign-in attempt.
#[derive(Debug, Clone)]
pub struct StaticIdentityProvider {
    account: Option<SignedInIdentity>,
    session: Arc<RwLock<Option<SignedInIdentity>>>,
}

impl StaticIdentityProvider {
    /// Creates a signed-out provider for `account`.
    #[must_use]
    pub fn new(account: Option<SignedInIdentity>) -> Self {
        Self {
            account,
            session: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a provider already signed in as `account`.
    #[must_use]
    pub fn signed_in(account: SignedInIdentity) -> Self {
        Self {
            account: Some(account.clone()),
            session: Arc::new(RwLock::new(Some(account))),
        }
    }
}

fn poisoned(err: &impl ToString) -> IdentityError {
    IdentityError::provider(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn current(&self) -> IdentityResult<Option<SignedInIdentity>> {
        let session = self.session.read().map_err(|err| poisoned(&err))?;
        Ok(session.clone())
    }

    async fn sign_in(&self) -> IdentityResult<SignedInIdentity> {
        let account = self
            .account
            .clone()
            .ok_or_else(|| IdentityError::SignInRejected("no account configured".to_owned()))?;
        let mut session = self.session.write().map_err(|err| poisoned(&err))?;
        *session = Some(account.clone());
        Ok(account)
    }

    async fn sign_out(&self) -> IdentityResult<()> {
        let mut session = self.session.write().map_err(|err| poisoned(&err))?;
        *session = None;
        Ok(())
    }
}
