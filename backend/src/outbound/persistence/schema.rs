//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations`. Uniqueness of the natural keys is
//! enforced by functional indexes on `lower(name)` and `lower(email)`, which
//! Diesel does not model.

diesel::table! {
    products (id) {
        id -> Uuid,
        name -> Text,
        description -> Text,
        kcal -> Int4,
    }
}

diesel::table! {
    recipes (id) {
        id -> Uuid,
        name -> Text,
        description -> Text,
        /// Exposed as `imageURL` on the wire.
        image_url -> Text,
    }
}

diesel::table! {
    users (id) {
        id -> Uuid,
        email -> Text,
        password -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(products, recipes, users);
