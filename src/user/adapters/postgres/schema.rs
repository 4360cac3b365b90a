//! Diesel schema for user persistence.

diesel::table! {
    /// User records.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Insertion sequence used to keep listing order stable.
        seq -> Int8,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Unique, lower-cased email address.
        email -> Text,
        /// Role designation.
        role -> Text,
        /// Avatar image URL.
        avatar_url -> Nullable<Text>,
    }
}
