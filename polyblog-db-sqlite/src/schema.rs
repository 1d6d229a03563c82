table! {
    comments (rowid) {
        rowid -> BigInt,
        id -> Text,
        thread_root -> Text,
        author -> Text,
        text -> Text,
        // Nested-set interval bounds. "left"/"right" are reserved
        // words in SQL, hence the shortened column names.
        lft -> BigInt,
        rght -> BigInt,
        created_at -> BigInt,
        updated_at -> BigInt,
    }
}
