//! Diesel schema for feed persistence.

diesel::table! {
    /// Comments attached to tasks.
    comments (id) {
        /// Comment identifier.
        id -> Uuid,
        /// Insertion sequence used to keep listing order stable.
        seq -> Int8,
        /// Commented task.
        task_id -> Uuid,
        /// Author.
        user_id -> Uuid,
        /// Body text.
        content -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Activity log entries.
    activities (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Insertion sequence used to keep listing order stable.
        seq -> Int8,
        /// Kind of the referenced record (`task` or `project`).
        #[max_length = 20]
        entity_type -> Varchar,
        /// Identifier of the referenced record.
        entity_id -> Uuid,
        /// Acting user.
        user_id -> Uuid,
        /// Action verb.
        action -> Text,
        /// Free-form details.
        details -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
