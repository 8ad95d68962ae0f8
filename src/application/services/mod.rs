// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{ApplicationResult, ports::ClockPort},
    domain::article::ArticleRepository,
};

/// Entry point for the console flows.
///
/// Owns the article store for the lifetime of the process; there is exactly
/// one service per store and it is driven by a single caller.
pub struct ArticleService {
    pub(crate) repo: Box<dyn ArticleRepository>,
    pub(crate) clock: Arc<ClockPort>,
}

impl ArticleService {
    pub fn new(repo: Box<dyn ArticleRepository>, clock: Arc<ClockPort>) -> Self {
        Self { repo, clock }
    }

    /// Releases the store's connection.
    pub async fn shutdown(mut self) -> ApplicationResult<()> {
        self.repo.shutdown().await?;
        Ok(())
    }
}
