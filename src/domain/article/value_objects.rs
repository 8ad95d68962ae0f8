use crate::domain::errors::{DomainError, DomainResult};
use serde::Serialize;
use std::fmt;

/// Identifier assigned by the store on insert (`SERIAL` column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ArticleId(i32);

impl ArticleId {
    pub fn new(id: i32) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::validation("article id must be positive"))
        } else {
            Ok(Self(id))
        }
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl From<ArticleId> for i32 {
    fn from(value: ArticleId) -> Self {
        value.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_ids() {
        assert!(ArticleId::new(0).is_err());
        assert!(ArticleId::new(-3).is_err());
        assert_eq!(ArticleId::new(7).unwrap().get(), 7);
    }
}
