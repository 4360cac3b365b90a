//! Diesel schema for workflow persistence.

diesel::table! {
    /// Workflow definitions with their ordered stage names.
    workflows (id) {
        /// Workflow identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Ordered stage names as a JSON array of strings.
        steps -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
