//! Diesel schema for bounty task persistence.

diesel::table! {
    /// Bounty tasks with embedded pledges and proof.
    bounty_tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        title -> Text,
        /// Task description.
        description -> Text,
        /// Task category.
        #[max_length = 32]
        category -> Varchar,
        /// Optional free-text location.
        location -> Nullable<Text>,
        /// Optional task image URL.
        image_url -> Nullable<Text>,
        /// Poster identifier, indexed for dashboard lookups.
        #[max_length = 255]
        poster_id -> Varchar,
        /// Poster identity snapshot.
        poster -> Jsonb,
        /// Doer identifier, indexed for dashboard lookups.
        #[max_length = 255]
        doer_id -> Nullable<Varchar>,
        /// Doer identity snapshot.
        doer -> Nullable<Jsonb>,
        /// Validator identifier.
        #[max_length = 255]
        validator_id -> Nullable<Varchar>,
        /// Current bounty.
        bounty -> Int8,
        /// Bounty before the first pledge.
        original_bounty -> Nullable<Int8>,
        /// Pledge list.
        pledges -> Jsonb,
        /// Submitted proof.
        proof -> Nullable<Jsonb>,
        /// Lifecycle status.
        #[max_length = 32]
        status -> Varchar,
        /// Write counter for conditional updates.
        revision -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Insertion sequence, breaking ties between equal creation times.
        insert_seq -> Int8,
    }
}
