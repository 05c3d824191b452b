//! Service layer for posting, funding and progressing bounty tasks.

use crate::bounty::{
    domain::{
        BountyDomainError, BountyTask, ParseTaskCategoryError, Points, Proof, TaskCategory,
        TaskDraft, TaskId, TaskLimits, TaskStatus, UserDashboard, UserId, UserProfile,
    },
    ports::{
        BlobPath, BlobRef, BlobStore, BlobStoreError, BlobStoreResult, BlobUpload, IdentityError,
        IdentityProvider, PROOF_IMAGE_PREFIX, TASK_IMAGE_PREFIX, TaskFilter, TaskRepository,
        TaskRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for posting a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTaskRequest {
    title: String,
    description: String,
    bounty: u64,
    category: Option<String>,
    location: Option<String>,
    image: Option<BlobUpload>,
}

impl PostTaskRequest {
    /// Creates a request with the required task fields.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>, bounty: u64) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            bounty,
            category: None,
            location: None,
            image: None,
        }
    }

    /// Sets the category by name, for example `"data-entry"`.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets a free-text location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Attaches an image to upload alongside the task.
    #[must_use]
    pub fn with_image(mut self, image: BlobUpload) -> Self {
        self.image = Some(image);
        self
    }
}

/// Request payload for submitting proof of completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitProofRequest {
    task_id: TaskId,
    proof_url: Option<String>,
    images: Vec<BlobUpload>,
}

impl SubmitProofRequest {
    /// Creates an empty proof submission for `task_id`.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            proof_url: None,
            images: Vec::new(),
        }
    }

    /// Sets the proof link.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.proof_url = Some(url.into());
        self
    }

    /// Adds one proof image.
    #[must_use]
    pub fn with_image(mut self, image: BlobUpload) -> Self {
        self.images.push(image);
        self
    }

    fn has_url(&self) -> bool {
        self.proof_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }
}

/// Board listing filter. Empty filters list every task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardFilter {
    status: Option<TaskStatus>,
    category: Option<TaskCategory>,
}

impl BoardFilter {
    /// Restricts the board to one status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts the board to one category.
    #[must_use]
    pub const fn with_category(mut self, category: TaskCategory) -> Self {
        self.category = Some(category);
        self
    }

    fn admits(&self, task: &BountyTask) -> bool {
        self.status.is_none_or(|status| task.status() == status)
            && self
                .category
                .is_none_or(|category| task.category() == category)
    }
}

/// Service-level errors for bounty lifecycle operations.
#[derive(Debug, Error)]
pub enum BountyLifecycleError {
    /// Domain validation or transition rule failed.
    #[error(transparent)]
    Domain(#[from] BountyDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Blob upload or resolution failed.
    #[error(transparent)]
    Blob(#[from] BlobStoreError),
    /// Identity provider failed.
    #[error(transparent)]
    Identity(#[from] IdentityError),
    /// Category name was not recognised.
    #[error(transparent)]
    InvalidCategory(#[from] ParseTaskCategoryError),
    /// The operation needs a signed-in user.
    #[error("no user is signed in")]
    NotSignedIn,
}

/// Result type for bounty lifecycle service operations.
pub type BountyLifecycleResult<T> = Result<T, BountyLifecycleError>;

/// Resolves the acting user from an identity provider.
///
/// # Errors
///
/// Returns [`BountyLifecycleError::NotSignedIn`] when no session exists, or
/// [`BountyLifecycleError::Identity`] when the provider fails.
pub async fn require_actor(
    identity: &impl IdentityProvider,
) -> BountyLifecycleResult<UserProfile> {
    identity
        .current()
        .await?
        .map(|signed_in| signed_in.into_profile())
        .ok_or(BountyLifecycleError::NotSignedIn)
}

/// Bounty task orchestration service.
///
/// Every mutation loads the task, applies the domain transition and writes
/// it back conditioned on the revision it was loaded at.
#[derive(Clone)]
pub struct BountyLifecycleService<R, B, C>
where
    R: TaskRepository,
    B: BlobStore,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    blobs: Arc<B>,
    clock: Arc<C>,
    limits: TaskLimits,
}

impl<R, B, C> BountyLifecycleService<R, B, C>
where
    R: TaskRepository,
    B: BlobStore,
    C: Clock + Send + Sync,
{
    /// Creates a service with default limits.
    #[must_use]
    pub fn new(repository: Arc<R>, blobs: Arc<B>, clock: Arc<C>) -> Self {
        Self {
            repository,
            blobs,
            clock,
            limits: TaskLimits::default(),
        }
    }

    /// Replaces the validation limits.
    #[must_use]
    pub const fn with_limits(mut self, limits: TaskLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Returns the active validation limits.
    #[must_use]
    pub const fn limits(&self) -> &TaskLimits {
        &self.limits
    }

    /// Posts a new open task owned by `poster`.
    ///
    /// The image, if any, is uploaded under `task-images/` once the text
    /// fields have been validated.
    ///
    /// # Errors
    ///
    /// Returns [`BountyLifecycleError`] when validation fails, the image
    /// cannot be stored or the repository rejects the task.
    pub async fn post_task(
        &self,
        poster: &UserProfile,
        request: PostTaskRequest,
    ) -> BountyLifecycleResult<BountyTask> {
        let bounty = Points::new(request.bounty)?;
        let category = match request.category.as_deref() {
            Some(name) => TaskCategory::try_from(name)?,
            None => TaskCategory::default(),
        };
        let mut draft = TaskDraft::new(request.title, request.description, bounty, &self.limits)?
            .with_category(category);
        if let Some(location) = request.location {
            draft = draft.with_location(location);
        }
        let mut uploaded = Vec::new();
        if let Some(image) = request.image {
            let (reference, url) = self.upload_resolved(TASK_IMAGE_PREFIX, image).await?;
            uploaded.push(reference);
            draft = draft.with_image_url(url);
        }

        let task = BountyTask::post(poster.clone(), draft, &*self.clock);
        if let Err(err) = self.repository.store(&task).await {
            warn!(task_id = %task.id(), error = %err, "failed to store posted task");
            self.discard(&uploaded).await;
            return Err(err.into());
        }
        info!(
            task_id = %task.id(),
            poster = %poster.id(),
            bounty = task.bounty(),
            "task posted"
        );
        Ok(task)
    }

    /// Stacks `amount` points from `contributor` onto an open task.
    ///
    /// # Errors
    ///
    /// Returns [`BountyLifecycleError::Domain`] when the amount is out of
    /// range or the task is not open, and
    /// [`BountyLifecycleError::Repository`] when the task is missing or was
    /// changed concurrently.
    pub async fn pledge(
        &self,
        contributor: &UserProfile,
        task_id: TaskId,
        amount: u64,
    ) -> BountyLifecycleResult<BountyTask> {
        let amount = Points::new(amount)?;
        self.limits.check_pledge(amount)?;
        let task = self
            .mutate(task_id, |task, clock| {
                task.pledge(contributor.clone(), amount, clock)
            })
            .await?;
        info!(
            task_id = %task_id,
            contributor = %contributor.id(),
            amount = amount.value(),
            bounty = task.bounty(),
            "pledge stacked"
        );
        Ok(task)
    }

    /// Claims an open task for `doer`.
    ///
    /// # Errors
    ///
    /// Returns [`BountyLifecycleError::Domain`] when the task is not open or
    /// was posted by `doer`, and [`BountyLifecycleError::Repository`] when a
    /// concurrent claim won.
    pub async fn claim(
        &self,
        doer: &UserProfile,
        task_id: TaskId,
    ) -> BountyLifecycleResult<BountyTask> {
        let task = self
            .mutate(task_id, |task, clock| task.claim(doer.clone(), clock))
            .await?;
        info!(task_id = %task_id, doer = %doer.id(), status = %task.status(), "task claimed");
        Ok(task)
    }

    /// Records proof of completion from the doer.
    ///
    /// Nothing is uploaded unless the actor may submit proof and the
    /// submission carries a link or at least one image within limits.
    /// Images already uploaded are removed again when the submission fails.
    ///
    /// # Errors
    ///
    /// Returns [`BountyLifecycleError::Domain`] for missing proof, too many
    /// images or an actor who is not the doer, plus blob and repository
    /// failures.
    pub async fn submit_proof(
        &self,
        doer: &UserProfile,
        request: SubmitProofRequest,
    ) -> BountyLifecycleResult<BountyTask> {
        let task_id = request.task_id;
        let mut task = self.load(task_id).await?;
        task.ensure_proof_accepted_from(doer.id())?;
        if !request.has_url() && request.images.is_empty() {
            return Err(BountyDomainError::MissingProof.into());
        }
        self.limits.check_proof_images(request.images.len())?;

        let mut uploaded = Vec::with_capacity(request.images.len());
        let mut image_urls = Vec::with_capacity(request.images.len());
        for image in request.images {
            match self.upload_resolved(PROOF_IMAGE_PREFIX, image).await {
                Ok((reference, url)) => {
                    uploaded.push(reference);
                    image_urls.push(url);
                }
                Err(err) => {
                    self.discard(&uploaded).await;
                    return Err(err);
                }
            }
        }

        let recorded = self
            .record_proof(&mut task, doer, request.proof_url, image_urls)
            .await;
        if recorded.is_err() {
            self.discard(&uploaded).await;
        }
        recorded?;
        info!(task_id = %task_id, doer = %doer.id(), status = %task.status(), "proof submitted");
        Ok(task)
    }

    /// Confirms a completed task, crediting the doer with the bounty.
    ///
    /// # Errors
    ///
    /// Returns [`BountyLifecycleError::Domain`] unless the task is completed
    /// and `poster` posted it.
    pub async fn validate(
        &self,
        poster: &UserProfile,
        task_id: TaskId,
    ) -> BountyLifecycleResult<BountyTask> {
        let task = self
            .mutate(task_id, |task, clock| task.validate(poster.id(), clock))
            .await?;
        info!(
            task_id = %task_id,
            validator = %poster.id(),
            bounty = task.bounty(),
            status = %task.status(),
            "task validated"
        );
        Ok(task)
    }

    /// Withdraws an open task.
    ///
    /// # Errors
    ///
    /// Returns [`BountyLifecycleError::Domain`] unless the task is open and
    /// `poster` posted it.
    pub async fn cancel(
        &self,
        poster: &UserProfile,
        task_id: TaskId,
    ) -> BountyLifecycleResult<BountyTask> {
        let task = self
            .mutate(task_id, |task, clock| task.cancel(poster.id(), clock))
            .await?;
        info!(task_id = %task_id, poster = %poster.id(), status = %task.status(), "task cancelled");
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BountyLifecycleError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, task_id: TaskId) -> BountyLifecycleResult<Option<BountyTask>> {
        Ok(self.repository.find_by_id(task_id).await?)
    }

    /// Lists the board, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`BountyLifecycleError::Repository`] when listing fails.
    pub async fn list_board(&self, filter: BoardFilter) -> BountyLifecycleResult<Vec<BountyTask>> {
        let tasks = match filter.status {
            Some(status) => {
                self.repository
                    .find_where(&TaskFilter::Status(status))
                    .await?
            }
            None => self.repository.list_all().await?,
        };
        Ok(tasks
            .into_iter()
            .filter(|task| filter.admits(task))
            .collect())
    }

    /// Builds the dashboard for one user.
    ///
    /// # Errors
    ///
    /// Returns [`BountyLifecycleError::Repository`] when any lookup fails.
    pub async fn dashboard(&self, user_id: &UserId) -> BountyLifecycleResult<UserDashboard> {
        let posted = self
            .repository
            .find_where(&TaskFilter::PostedBy(user_id.clone()))
            .await?;
        let claimed = self
            .repository
            .find_where(&TaskFilter::ClaimedBy(user_id.clone()))
            .await?;
        let validated = self
            .repository
            .find_where(&TaskFilter::ValidatedBy(user_id.clone()))
            .await?;
        Ok(UserDashboard::build(
            user_id.clone(),
            posted,
            claimed,
            &validated,
        ))
    }

    async fn record_proof(
        &self,
        task: &mut BountyTask,
        doer: &UserProfile,
        proof_url: Option<String>,
        image_urls: Vec<String>,
    ) -> BountyLifecycleResult<()> {
        let proof = Proof::new(proof_url, image_urls)?;
        let expected = task.revision();
        task.submit_proof(doer.id(), proof, &*self.clock)?;
        self.save(task, expected).await
    }

    async fn upload_resolved(
        &self,
        prefix: &str,
        upload: BlobUpload,
    ) -> BountyLifecycleResult<(BlobRef, String)> {
        let path = BlobPath::for_upload(prefix, &upload.file_name, self.clock.utc())?;
        let reference = self.blobs.upload(&path, upload.bytes).await.map_err(|err| {
            warn!(path = %path, error = %err, "blob upload failed");
            BountyLifecycleError::from(err)
        })?;
        let resolved: BlobStoreResult<String> = self.blobs.resolve(&reference).await;
        match resolved {
            Ok(url) => Ok((reference, url)),
            Err(err) => {
                warn!(path = %path, error = %err, "uploaded blob could not be resolved");
                self.discard(std::slice::from_ref(&reference)).await;
                Err(err.into())
            }
        }
    }

    /// Best-effort removal of blobs no task refers to.
    async fn discard(&self, references: &[BlobRef]) {
        for reference in references {
            if let Err(err) = self.blobs.delete(reference).await {
                warn!(reference = %reference, error = %err, "orphaned blob left in storage");
            }
        }
    }

    async fn load(&self, task_id: TaskId) -> BountyLifecycleResult<BountyTask> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(BountyLifecycleError::Repository(
                TaskRepositoryError::NotFound(task_id),
            ))
    }

    async fn save(&self, task: &BountyTask, expected_revision: u64) -> BountyLifecycleResult<()> {
        self.repository
            .update(task, expected_revision)
            .await
            .map_err(|err| {
                warn!(task_id = %task.id(), expected_revision, error = %err, "task write rejected");
                err.into()
            })
    }

    async fn mutate<F>(&self, task_id: TaskId, apply: F) -> BountyLifecycleResult<BountyTask>
    where
        F: FnOnce(&mut BountyTask, &C) -> Result<(), BountyDomainError>,
    {
        let mut task = self.load(task_id).await?;
        let expected = task.revision();
        apply(&mut task, &*self.clock)?;
        self.save(&task, expected).await?;
        Ok(task)
    }
}
