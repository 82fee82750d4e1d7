//! Diesel table definitions matching `migrations/`.

diesel::table! {
    /// Registered accounts. `email` carries a unique index.
    users (id) {
        id -> Uuid,
        email -> Text,
        first_name -> Text,
        last_name -> Text,
        password_hash -> Text,
        phone -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    organisations (id) {
        id -> Uuid,
        name -> Text,
        description -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Many-to-many membership link with a composite primary key.
    user_organisations (user_id, organisation_id) {
        user_id -> Uuid,
        organisation_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(user_organisations -> users (user_id));
diesel::joinable!(user_organisations -> organisations (organisation_id));

diesel::allow_tables_to_appear_in_same_query!(users, organisations, user_organisations);
