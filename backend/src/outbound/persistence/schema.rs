//! Diesel table definitions.
//!
//! Must match `backend/migrations`; regenerate with `diesel print-schema`
//! after changing a migration.

diesel::table! {
    /// Bulletin board articles.
    articles (id) {
        id -> Int8,
        title -> Text,
        content -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Marketplace products. `price` carries a `CHECK (price >= 0)`.
    products (id) {
        id -> Int8,
        name -> Text,
        description -> Text,
        price -> Int8,
        tags -> Array<Text>,
        favorite_count -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comments on articles; rows cascade with their article.
    article_comments (id) {
        id -> Int8,
        article_id -> Int8,
        content -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comments on products; rows cascade with their product.
    product_comments (id) {
        id -> Int8,
        product_id -> Int8,
        content -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(article_comments -> articles (article_id));
diesel::joinable!(product_comments -> products (product_id));

diesel::allow_tables_to_appear_in_same_query!(articles, article_comments, products, product_comments);
