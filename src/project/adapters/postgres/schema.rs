//! Diesel schema for project persistence.

diesel::table! {
    /// Project records with their optional workflow binding.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Owning workspace identifier.
        workspace_id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Bound workflow, if any.
        workflow_id -> Nullable<Uuid>,
        /// Lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
