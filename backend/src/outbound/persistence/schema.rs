//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        /// Unique, trimmed account name.
        name -> Varchar,
        /// Argon2id PHC string.
        password_digest -> Text,
        /// Hex bearer token, unique.
        token -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Feed entries. `owner_id` is null for seeded patterns.
    patterns (id) {
        id -> Uuid,
        owner_id -> Nullable<Uuid>,
        post -> Text,
        source -> Text,
        needles -> Nullable<Float8>,
        yarn -> Nullable<Text>,
        likes -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comments, removed together with their pattern.
    pattern_comments (id) {
        id -> Int8,
        pattern_id -> Uuid,
        body -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(pattern_comments -> patterns (pattern_id));

diesel::allow_tables_to_appear_in_same_query!(pattern_comments, patterns, users);
