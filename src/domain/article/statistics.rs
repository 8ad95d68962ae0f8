use crate::domain::article::status::ArticleStatus;
use serde::Serialize;

/// Row counts over the whole table, total and per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ArticleStatistics {
    pub total: i64,
    pub published: i64,
    pub draft: i64,
    pub pending: i64,
    pub archived: i64,
}

impl ArticleStatistics {
    pub fn count_for(&self, status: ArticleStatus) -> i64 {
        match status {
            ArticleStatus::Draft => self.draft,
            ArticleStatus::Published => self.published,
            ArticleStatus::Pending => self.pending,
            ArticleStatus::Archived => self.archived,
        }
    }
}
