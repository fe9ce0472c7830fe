diesel::table! {
    bookings (id) {
        id -> Int8,
        name -> Text,
        phone -> Text,
        social -> Text,
        email -> Nullable<Text>,
        date -> Date,
        slot -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    slot_overrides (id) {
        id -> Int8,
        date -> Date,
        slot -> Text,
        is_open -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(bookings, slot_overrides);
