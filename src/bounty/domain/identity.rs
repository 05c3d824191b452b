//! User identity snapshots carried by tasks and pledges.

use super::UserId;
use serde::{Deserialize, Serialize};

/// Display name stored when the identity provider has none.
pub const ANONYMOUS_DISPLAY_NAME: &str = "Anonymous";

/// Denormalized identity snapshot captured at the time of an action.
///
/// Tasks and pledges keep their own copy, so statistics derived from them
/// show the name and avatar the user had when they acted, not the current
/// profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserProfile {
    id: UserId,
    display_name: String,
    avatar_url: Option<String>,
}

impl UserProfile {
    /// Creates a snapshot, substituting [`ANONYMOUS_DISPLAY_NAME`] for a
    /// blank display name.
    #[must_use]
    pub fn new(id: UserId, display_name: impl Into<String>) -> Self {
        let name = display_name.into();
        let trimmed = name.trim();
        let display_name = if trimmed.is_empty() {
            ANONYMOUS_DISPLAY_NAME.to_owned()
        } else {
            trimmed.to_owned()
        };
        Self {
            id,
            display_name,
            avatar_url: None,
        }
    }

    /// Sets the avatar URL. Blank values are ignored.
    #[must_use]
    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        let url = avatar_url.into();
        if !url.trim().is_empty() {
            self.avatar_url = Some(url.trim().to_owned());
        }
        self
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the display name captured in this snapshot.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the avatar URL captured in this snapshot, if any.
    #[must_use]
    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }
}

/// Identity yielded by the identity provider for a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedInIdentity {
    profile: UserProfile,
    email: Option<String>,
}

impl SignedInIdentity {
    /// Creates a signed-in identity.
    #[must_use]
    pub const fn new(profile: UserProfile, email: Option<String>) -> Self {
        Self { profile, email }
    }

    /// Returns the profile used as the acting identity.
    #[must_use]
    pub const fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Returns the email address, if the provider shared one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Consumes the identity, returning the profile.
    #[must_use]
    pub fn into_profile(self) -> UserProfile {
        self.profile
    }
}
