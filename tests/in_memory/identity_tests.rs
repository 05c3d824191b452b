//! Session handling for [`StaticIdentityProvider`].

use super::helpers::user;
use bountyboard::bounty::{
    adapters::memory::StaticIdentityProvider,
    domain::SignedInIdentity,
    ports::{IdentityError, IdentityProvider},
    services::{BountyLifecycleError, require_actor},
};
use eyre::ensure;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sign_in_and_out_round_trip() -> eyre::Result<()> {
    let account = SignedInIdentity::new(user("uid-1", "Ada")?, Some("ada@example.org".to_owned()));
    let provider = StaticIdentityProvider::new(Some(account.clone()));
    ensure!(provider.current().await?.is_none());

    let signed_in = provider.sign_in().await?;
    ensure!(signed_in == account);
    ensure!(require_actor(&provider).await?.id().as_str() == "uid-1");

    provider.sign_out().await?;
    provider.sign_out().await?;
    ensure!(matches!(
        require_actor(&provider).await,
        Err(BountyLifecycleError::NotSignedIn)
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn provider_without_account_rejects_sign_in() {
    let provider = StaticIdentityProvider::new(None);
    assert!(matches!(
        provider.sign_in().await,
        Err(IdentityError::SignInRejected(_))
    ));
}
