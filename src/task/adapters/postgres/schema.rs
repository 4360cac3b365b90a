//! Diesel schema for task persistence.

diesel::table! {
    /// Task records bound to a project and a board stage.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Insertion sequence used to keep fetch order stable.
        seq -> Int8,
        /// Owning project.
        project_id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Assigned user, if any.
        assignee_id -> Nullable<Uuid>,
        /// Current board stage, compared by exact value.
        #[max_length = 100]
        status -> Varchar,
        /// Task priority.
        #[max_length = 20]
        priority -> Varchar,
        /// Tags as a JSON array of strings.
        tags -> Jsonb,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
