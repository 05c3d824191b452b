//! Proof of completion submitted by a doer.

use super::BountyDomainError;
use serde::{Deserialize, Serialize};

/// Evidence that a claimed task was done: a link, images, or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    url: Option<String>,
    images: Vec<String>,
}

impl Proof {
    /// Creates proof from an optional URL and resolved image URLs.
    ///
    /// A blank URL counts as absent.
    ///
    /// # Errors
    ///
    /// Returns [`BountyDomainError::MissingProof`] when neither a URL nor an
    /// image is present.
    pub fn new(url: Option<String>, images: Vec<String>) -> Result<Self, BountyDomainError> {
        let normalized_url = url
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());
        if normalized_url.is_none() && images.is_empty() {
            return Err(BountyDomainError::MissingProof);
        }
        Ok(Self {
            url: normalized_url,
            images,
        })
    }

    /// Returns the proof URL, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Returns the proof image URLs.
    #[must_use]
    pub fn images(&self) -> &[String] {
        &self.images
    }
}
