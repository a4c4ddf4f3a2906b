//! Diesel table definitions matching `backend/migrations`.

diesel::table! {
    /// Registered students keyed by laundry bag number.
    students (bag_no) {
        bag_no -> Varchar,
        name -> Varchar,
        /// Lower-cased, unique.
        email -> Varchar,
        /// Unique.
        enrollment_no -> Varchar,
        phone_no -> Varchar,
        residency_no -> Varchar,
        password_hash -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Laundry operator accounts.
    washermen (id) {
        id -> Int4,
        /// Unique.
        username -> Varchar,
        password_hash -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Laundry orders; `bag_no` references `students`.
    orders (id) {
        id -> Int4,
        bag_no -> Varchar,
        number_of_clothes -> Int4,
        /// One of `PENDING`, `INPROGRESS`, `COMPLETE`.
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(orders -> students (bag_no));

diesel::allow_tables_to_appear_in_same_query!(orders, students, washermen);
