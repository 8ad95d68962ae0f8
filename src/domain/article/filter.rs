use crate::domain::article::status::ArticleStatus;

/// Columns an article listing can be narrowed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Region,
    Language,
    Status,
}

impl FilterField {
    pub fn column(self) -> &'static str {
        match self {
            FilterField::Region => "region",
            FilterField::Language => "language",
            FilterField::Status => "status",
        }
    }
}

/// Equality filters for article listings. Unset and blank values are ignored;
/// the remaining ones are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    region: Option<String>,
    language: Option<String>,
    status: Option<ArticleStatus>,
}

impl ArticleFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published() -> Self {
        Self::new().with_status(ArticleStatus::Published)
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = non_blank(region.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = non_blank(language.into());
        self
    }

    pub fn with_status(mut self, status: ArticleStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn status(&self) -> Option<ArticleStatus> {
        self.status
    }

    pub fn is_empty(&self) -> bool {
        self.conditions().is_empty()
    }

    /// Active conditions in a fixed order: region, language, status.
    pub fn conditions(&self) -> Vec<(FilterField, &str)> {
        [
            (FilterField::Region, self.region.as_deref()),
            (FilterField::Language, self.language.as_deref()),
            (FilterField::Status, self.status.map(ArticleStatus::as_str)),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_has_no_conditions() {
        assert!(ArticleFilter::new().is_empty());
        assert!(ArticleFilter::new().with_region("  ").with_language("").is_empty());
    }

    #[test]
    fn conditions_follow_fixed_order() {
        let filter = ArticleFilter::new()
            .with_status(ArticleStatus::Pending)
            .with_language("Tamil")
            .with_region("South");

        assert_eq!(
            filter.conditions(),
            vec![
                (FilterField::Region, "South"),
                (FilterField::Language, "Tamil"),
                (FilterField::Status, "pending"),
            ]
        );
    }

    #[test]
    fn published_filter_only_sets_status() {
        let filter = ArticleFilter::published();
        assert_eq!(filter.conditions(), vec![(FilterField::Status, "published")]);
        assert_eq!(filter.region(), None);
    }
}
