//! Diesel row models for bounty task persistence.

use super::schema::bounty_tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for bounty tasks.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bounty_tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Task category.
    pub category: String,
    /// Optional location.
    pub location: Option<String>,
    /// Optional image URL.
    pub image_url: Option<String>,
    /// Poster identifier.
    pub poster_id: String,
    /// Poster snapshot JSON.
    pub poster: Value,
    /// Doer identifier.
    pub doer_id: Option<String>,
    /// Doer snapshot JSON.
    pub doer: Option<Value>,
    /// Validator identifier.
    pub validator_id: Option<String>,
    /// Current bounty.
    pub bounty: i64,
    /// Bounty before the first pledge.
    pub original_bounty: Option<i64>,
    /// Pledge list JSON.
    pub pledges: Value,
    /// Proof JSON.
    pub proof: Option<Value>,
    /// Lifecycle status.
    pub status: String,
    /// Write counter.
    pub revision: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert and update model for bounty tasks.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = bounty_tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskRecord {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Task category.
    pub category: String,
    /// Optional location.
    pub location: Option<String>,
    /// Optional image URL.
    pub image_url: Option<String>,
    /// Poster identifier.
    pub poster_id: String,
    /// Poster snapshot JSON.
    pub poster: Value,
    /// Doer identifier.
    pub doer_id: Option<String>,
    /// Doer snapshot JSON.
    pub doer: Option<Value>,
    /// Validator identifier.
    pub validator_id: Option<String>,
    /// Current bounty.
    pub bounty: i64,
    /// Bounty before the first pledge.
    pub original_bounty: Option<i64>,
    /// Pledge list JSON.
    pub pledges: Value,
    /// Proof JSON.
    pub proof: Option<Value>,
    /// Lifecycle status.
    pub status: String,
    /// Write counter.
    pub revision: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
