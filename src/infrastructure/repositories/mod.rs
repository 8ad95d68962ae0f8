// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_article;

pub use error::{is_connection_lost, map_sqlx};
pub use postgres_article::PostgresArticleStore;
