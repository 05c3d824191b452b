//! Bounty task aggregate root and its lifecycle transitions.

use super::{
    BountyDomainError, Pledge, Points, Proof, TaskCategory, TaskId, TaskLimits, TaskStatus,
    UserId, UserProfile,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated content for a task that has not been posted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: String,
    bounty: Points,
    category: TaskCategory,
    location: Option<String>,
    image_url: Option<String>,
}

impl TaskDraft {
    /// Creates a draft, trimming and validating title and description.
    ///
    /// # Errors
    ///
    /// Returns [`BountyDomainError`] when the title or description is empty
    /// or longer than `limits` allow.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        bounty: Points,
        limits: &TaskLimits,
    ) -> Result<Self, BountyDomainError> {
        let title = normalize_required(title.into(), BountyDomainError::EmptyTitle)?;
        if title.chars().count() > limits.max_title_length {
            return Err(BountyDomainError::TitleTooLong {
                max: limits.max_title_length,
            });
        }
        let description =
            normalize_required(description.into(), BountyDomainError::EmptyDescription)?;
        if description.chars().count() > limits.max_description_length {
            return Err(BountyDomainError::DescriptionTooLong {
                max: limits.max_description_length,
            });
        }

        Ok(Self {
            title,
            description,
            bounty,
            category: TaskCategory::default(),
            location: None,
            image_url: None,
        })
    }

    /// Sets the task category.
    #[must_use]
    pub const fn with_category(mut self, category: TaskCategory) -> Self {
        self.category = category;
        self
    }

    /// Sets a free-text location. Blank values are ignored.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = normalize_optional(location.into());
        self
    }

    /// Sets the resolved URL of the task image. Blank values are ignored.
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = normalize_optional(image_url.into());
        self
    }
}

/// Bounty task aggregate root.
///
/// Deserialization goes through [`PersistedTaskData`], so a decoded task
/// satisfies the same bounty checks as [`BountyTask::from_persisted`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PersistedTaskData")]
pub struct BountyTask {
    id: TaskId,
    title: String,
    description: String,
    category: TaskCategory,
    location: Option<String>,
    image_url: Option<String>,
    poster: UserProfile,
    doer: Option<UserProfile>,
    validator: Option<UserId>,
    bounty: u64,
    original_bounty: Option<u64>,
    pledges: Vec<Pledge>,
    proof: Option<Proof>,
    status: TaskStatus,
    revision: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted category.
    pub category: TaskCategory,
    /// Persisted location, if any.
    pub location: Option<String>,
    /// Persisted image URL, if any.
    pub image_url: Option<String>,
    /// Poster snapshot.
    pub poster: UserProfile,
    /// Doer snapshot, if claimed.
    pub doer: Option<UserProfile>,
    /// Validator identifier, if validated.
    pub validator: Option<UserId>,
    /// Current bounty.
    pub bounty: u64,
    /// Bounty before the first pledge, if any pledge exists.
    pub original_bounty: Option<u64>,
    /// Recorded pledges in insertion order.
    pub pledges: Vec<Pledge>,
    /// Submitted proof, if any.
    pub proof: Option<Proof>,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Write counter used for conditional updates.
    pub revision: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<PersistedTaskData> for BountyTask {
    type Error = BountyDomainError;

    fn try_from(data: PersistedTaskData) -> Result<Self, Self::Error> {
        Self::from_persisted(data)
    }
}

/// Checks `bounty == original + sum(pledges)`, with a missing original
/// standing for the bounty itself.
fn check_persisted_bounty(data: &PersistedTaskData) -> Result<(), BountyDomainError> {
    let original = data.original_bounty.unwrap_or(data.bounty);
    if original == 0 {
        return Err(BountyDomainError::NonPositiveAmount(0));
    }
    let expected = data
        .pledges
        .iter()
        .try_fold(original, |total, pledge| total.checked_add(pledge.amount().value()))
        .ok_or(BountyDomainError::BountyOverflow(data.id))?;
    if expected != data.bounty {
        return Err(BountyDomainError::InconsistentBounty {
            task_id: data.id,
            bounty: data.bounty,
            expected,
        });
    }
    Ok(())
}

impl BountyTask {
    /// Posts a new open task on behalf of `poster`.
    #[must_use]
    pub fn post(poster: UserProfile, draft: TaskDraft, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title: draft.title,
            description: draft.description,
            category: draft.category,
            location: draft.location,
            image_url: draft.image_url,
            poster,
            doer: None,
            validator: None,
            bounty: draft.bounty.value(),
            original_bounty: None,
            pledges: Vec::new(),
            proof: None,
            status: TaskStatus::Open,
            revision: 0,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns [`BountyDomainError::NonPositiveAmount`] for a zero bounty or
    /// original bounty, [`BountyDomainError::InconsistentBounty`] when the
    /// bounty is not the original amount plus every pledge, and
    /// [`BountyDomainError::BountyOverflow`] when that sum overflows.
    pub fn from_persisted(data: PersistedTaskData) -> Result<Self, BountyDomainError> {
        check_persisted_bounty(&data)?;
        Ok(Self {
            id: data.id,
            title: data.title,
            description: data.description,
            category: data.category,
            location: data.location,
            image_url: data.image_url,
            poster: data.poster,
            doer: data.doer,
            validator: data.validator,
            bounty: data.bounty,
            original_bounty: data.original_bounty,
            pledges: data.pledges,
            proof: data.proof,
            status: data.status,
            revision: data.revision,
            created_at: data.created_at,
            updated_at: data.updated_at,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the category.
    #[must_use]
    pub const fn category(&self) -> TaskCategory {
        self.category
    }

    /// Returns the location, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Returns the task image URL, if any.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Returns the poster snapshot.
    #[must_use]
    pub const fn poster(&self) -> &UserProfile {
        &self.poster
    }

    /// Returns the doer snapshot once the task has been claimed.
    #[must_use]
    pub const fn doer(&self) -> Option<&UserProfile> {
        self.doer.as_ref()
    }

    /// Returns the validator identifier once the task has been validated.
    #[must_use]
    pub const fn validator(&self) -> Option<&UserId> {
        self.validator.as_ref()
    }

    /// Returns the current bounty in points.
    #[must_use]
    pub const fn bounty(&self) -> u64 {
        self.bounty
    }

    /// Returns the bounty as it was before the first pledge.
    #[must_use]
    pub const fn original_bounty(&self) -> Option<u64> {
        self.original_bounty
    }

    /// Returns the points added by pledges on top of the original bounty.
    #[must_use]
    pub fn stacked_amount(&self) -> u64 {
        self.original_bounty
            .map_or(0, |original| self.bounty.saturating_sub(original))
    }

    /// Returns the pledges in the order they were recorded.
    #[must_use]
    pub fn pledges(&self) -> &[Pledge] {
        &self.pledges
    }

    /// Returns the submitted proof, if any.
    #[must_use]
    pub const fn proof(&self) -> Option<&Proof> {
        self.proof.as_ref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the write counter.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether `user` posted this task.
    #[must_use]
    pub fn is_posted_by(&self, user: &UserId) -> bool {
        self.poster.id() == user
    }

    /// Returns whether `user` is the doer of this task.
    #[must_use]
    pub fn is_claimed_by(&self, user: &UserId) -> bool {
        self.doer.as_ref().is_some_and(|doer| doer.id() == user)
    }

    /// Stacks a pledge onto the bounty.
    ///
    /// The first pledge snapshots the bounty as the original bounty.
    ///
    /// # Errors
    ///
    /// Returns [`BountyDomainError::NotOpenForPledges`] unless the task is
    /// open, or [`BountyDomainError::BountyOverflow`] when the sum does not
    /// fit. The task is unchanged on error.
    pub fn pledge(
        &mut self,
        contributor: UserProfile,
        amount: Points,
        clock: &impl Clock,
    ) -> Result<(), BountyDomainError> {
        if self.status != TaskStatus::Open {
            return Err(BountyDomainError::NotOpenForPledges {
                task_id: self.id,
                status: self.status,
            });
        }
        let new_bounty = self
            .bounty
            .checked_add(amount.value())
            .ok_or(BountyDomainError::BountyOverflow(self.id))?;

        if self.original_bounty.is_none() {
            self.original_bounty = Some(self.bounty);
        }
        self.bounty = new_bounty;
        self.pledges
            .push(Pledge::new(contributor, amount, clock.utc()));
        self.touch(clock);
        Ok(())
    }

    /// Claims the task for `doer`.
    ///
    /// # Errors
    ///
    /// Returns [`BountyDomainError::InvalidStateTransition`] unless the task
    /// is open, or [`BountyDomainError::SelfClaim`] when `doer` posted it.
    pub fn claim(&mut self, doer: UserProfile, clock: &impl Clock) -> Result<(), BountyDomainError> {
        self.ensure_transition(TaskStatus::Claimed)?;
        if self.is_posted_by(doer.id()) {
            return Err(BountyDomainError::SelfClaim(self.id));
        }
        self.doer = Some(doer);
        self.status = TaskStatus::Claimed;
        self.touch(clock);
        Ok(())
    }

    /// Records proof of completion submitted by the doer.
    ///
    /// # Errors
    ///
    /// Returns [`BountyDomainError::InvalidStateTransition`] unless the task
    /// is claimed, or [`BountyDomainError::NotDoer`] when `actor` is not the
    /// doer.
    pub fn submit_proof(
        &mut self,
        actor: &UserId,
        proof: Proof,
        clock: &impl Clock,
    ) -> Result<(), BountyDomainError> {
        self.ensure_proof_accepted_from(actor)?;
        self.proof = Some(proof);
        self.status = TaskStatus::Completed;
        self.touch(clock);
        Ok(())
    }

    /// Checks that `actor` may submit proof now, without changing the task.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Self::submit_proof`].
    pub fn ensure_proof_accepted_from(&self, actor: &UserId) -> Result<(), BountyDomainError> {
        self.ensure_transition(TaskStatus::Completed)?;
        if !self.is_claimed_by(actor) {
            return Err(BountyDomainError::NotDoer(self.id));
        }
        Ok(())
    }

    /// Confirms the submitted proof, attributing the bounty to the doer.
    ///
    /// # Errors
    ///
    /// Returns [`BountyDomainError::InvalidStateTransition`] unless the task
    /// is completed, or [`BountyDomainError::NotPoster`] when `actor` did not
    /// post it.
    pub fn validate(&mut self, actor: &UserId, clock: &impl Clock) -> Result<(), BountyDomainError> {
        self.ensure_transition(TaskStatus::Validated)?;
        if !self.is_posted_by(actor) {
            return Err(BountyDomainError::NotPoster(self.id));
        }
        self.validator = Some(actor.clone());
        self.status = TaskStatus::Validated;
        self.touch(clock);
        Ok(())
    }

    /// Withdraws an open task.
    ///
    /// # Errors
    ///
    /// Returns [`BountyDomainError::InvalidStateTransition`] unless the task
    /// is open, or [`BountyDomainError::NotPoster`] when `actor` did not post
    /// it.
    pub fn cancel(&mut self, actor: &UserId, clock: &impl Clock) -> Result<(), BountyDomainError> {
        self.ensure_transition(TaskStatus::Cancelled)?;
        if !self.is_posted_by(actor) {
            return Err(BountyDomainError::NotPoster(self.id));
        }
        self.status = TaskStatus::Cancelled;
        self.touch(clock);
        Ok(())
    }

    const fn ensure_transition(&self, target: TaskStatus) -> Result<(), BountyDomainError> {
        if self.status.can_transition_to(target) {
            Ok(())
        } else {
            Err(BountyDomainError::InvalidStateTransition {
                task_id: self.id,
                from: self.status,
                to: target,
            })
        }
    }

    /// Records a successful mutation.
    fn touch(&mut self, clock: &impl Clock) {
        self.revision = self.revision.saturating_add(1);
        self.updated_at = clock.utc();
    }
}

fn normalize_required(
    value: String,
    empty_error: BountyDomainError,
) -> Result<String, BountyDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(empty_error);
    }
    Ok(trimmed.to_owned())
}

fn normalize_optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
