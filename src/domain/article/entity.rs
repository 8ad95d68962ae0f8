// src/domain/article/entity.rs
use crate::domain::article::status::ArticleStatus;
use crate::domain::article::value_objects::ArticleId;
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{NaiveDate, NaiveDateTime};
use std::hash::{Hash, Hasher};

const DATE_FORMAT: &str = "%d/%m/%Y";
const DATE_TIME_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Widths of the `articles` VARCHAR columns, in characters.
pub const TITLE_MAX_CHARS: usize = 255;
pub const AUTHOR_MAX_CHARS: usize = 100;
pub const CATEGORY_MAX_CHARS: usize = 50;
pub const REGION_MAX_CHARS: usize = 100;
pub const LANGUAGE_MAX_CHARS: usize = 50;

/// Complete set of editable fields, used when an article is built from known
/// values (row mapping, imports) instead of from defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFields {
    pub title: String,
    pub author: Option<String>,
    pub category: Option<String>,
    pub content: String,
    pub region: Option<String>,
    pub language: Option<String>,
    pub date: Option<NaiveDate>,
    pub status: ArticleStatus,
}

/// A news article.
///
/// The caller owns the in-memory value; the store owns the persisted copy and
/// hands out fresh values on every read. Equality is identifier equality.
///
/// Every field mutator takes the current time and records it as the
/// last-modified timestamp. `set_id`, `set_created_at` and `set_updated_at`
/// are plain assignments.
#[derive(Debug, Clone)]
pub struct Article {
    id: Option<ArticleId>,
    title: String,
    author: Option<String>,
    category: Option<String>,
    content: String,
    region: Option<String>,
    language: Option<String>,
    date: Option<NaiveDate>,
    status: ArticleStatus,
    created_at: Option<NaiveDateTime>,
    updated_at: Option<NaiveDateTime>,
}

impl Article {
    /// Transient draft dated today with both timestamps set to `now`.
    pub fn draft(now: NaiveDateTime) -> Self {
        Self {
            id: None,
            title: String::new(),
            author: None,
            category: None,
            content: String::new(),
            region: None,
            language: None,
            date: Some(now.date()),
            status: ArticleStatus::Draft,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        region: impl Into<String>,
        language: impl Into<String>,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            region: Some(region.into()),
            language: Some(language.into()),
            ..Self::draft(now)
        }
    }

    /// Builds an article from an explicit field set. No defaults are applied
    /// to the fields; only the timestamps are initialised to `now`.
    pub fn with_fields(id: Option<ArticleId>, fields: ArticleFields, now: NaiveDateTime) -> Self {
        let ArticleFields {
            title,
            author,
            category,
            content,
            region,
            language,
            date,
            status,
        } = fields;

        Self {
            id,
            title,
            author,
            category,
            content,
            region,
            language,
            date,
            status,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Rebuilds a stored article exactly as persisted, timestamps included.
    pub fn restore(
        id: ArticleId,
        fields: ArticleFields,
        created_at: Option<NaiveDateTime>,
        updated_at: Option<NaiveDateTime>,
    ) -> Self {
        let mut article = Self::with_fields(Some(id), fields, NaiveDateTime::MIN);
        article.created_at = created_at;
        article.updated_at = updated_at;
        article
    }

    pub fn id(&self) -> Option<ArticleId> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn status(&self) -> ArticleStatus {
        self.status
    }

    pub fn created_at(&self) -> Option<NaiveDateTime> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<NaiveDateTime> {
        self.updated_at
    }

    pub fn set_id(&mut self, id: ArticleId) {
        self.id = Some(id);
    }

    pub fn set_created_at(&mut self, created_at: Option<NaiveDateTime>) {
        self.created_at = created_at;
    }

    pub fn set_updated_at(&mut self, updated_at: Option<NaiveDateTime>) {
        self.updated_at = updated_at;
    }

    pub fn set_title(&mut self, title: impl Into<String>, now: NaiveDateTime) {
        self.title = title.into();
        self.touch(now);
    }

    pub fn set_author(&mut self, author: Option<String>, now: NaiveDateTime) {
        self.author = author;
        self.touch(now);
    }

    pub fn set_category(&mut self, category: Option<String>, now: NaiveDateTime) {
        self.category = category;
        self.touch(now);
    }

    pub fn set_content(&mut self, content: impl Into<String>, now: NaiveDateTime) {
        self.content = content.into();
        self.touch(now);
    }

    pub fn set_region(&mut self, region: Option<String>, now: NaiveDateTime) {
        self.region = region;
        self.touch(now);
    }

    pub fn set_language(&mut self, language: Option<String>, now: NaiveDateTime) {
        self.language = language;
        self.touch(now);
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>, now: NaiveDateTime) {
        self.date = date;
        self.touch(now);
    }

    pub fn set_status(&mut self, status: ArticleStatus, now: NaiveDateTime) {
        self.status = status;
        self.touch(now);
    }

    /// Parses `raw` as a status and applies it. On failure nothing changes,
    /// including the last-modified timestamp.
    pub fn try_set_status(&mut self, raw: &str, now: NaiveDateTime) -> DomainResult<()> {
        let status = raw.parse::<ArticleStatus>()?;
        self.set_status(status, now);
        Ok(())
    }

    fn touch(&mut self, now: NaiveDateTime) {
        self.updated_at = Some(now);
    }

    pub fn is_valid(&self) -> bool {
        self.violations().next().is_none()
    }

    /// Every violated requirement, in a fixed order, joined by single spaces.
    /// Empty when the article is valid.
    pub fn validation_errors(&self) -> String {
        self.violations().collect::<Vec<_>>().join(" ")
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(DomainError::validation(self.validation_errors()))
        }
    }

    /// Rejects values wider than their column, naming each offending field.
    pub fn check_column_limits(&self) -> DomainResult<()> {
        let too_long: Vec<String> = [
            ("Title", Some(self.title.as_str()), TITLE_MAX_CHARS),
            ("Author", self.author.as_deref(), AUTHOR_MAX_CHARS),
            ("Category", self.category.as_deref(), CATEGORY_MAX_CHARS),
            ("Region", self.region.as_deref(), REGION_MAX_CHARS),
            ("Language", self.language.as_deref(), LANGUAGE_MAX_CHARS),
        ]
        .into_iter()
        .filter(|(_, value, max)| value.is_some_and(|v| v.chars().count() > *max))
        .map(|(field, _, max)| format!("{field} must be at most {max} characters."))
        .collect();

        if too_long.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(too_long.join(" ")))
        }
    }

    fn violations(&self) -> impl Iterator<Item = &'static str> {
        [
            (is_blank(Some(&self.title)), "Title is required."),
            (is_blank(Some(&self.content)), "Content is required."),
            (is_blank(self.region.as_deref()), "Region is required."),
            (is_blank(self.language.as_deref()), "Language is required."),
            (self.date.is_none(), "Date is required."),
        ]
        .into_iter()
        .filter_map(|(violated, message)| violated.then_some(message))
    }

    /// `dd/mm/yyyy`, or an empty string when the date is absent.
    pub fn formatted_date(&self) -> String {
        self.date
            .map(|date| date.format(DATE_FORMAT).to_string())
            .unwrap_or_default()
    }

    /// `dd/mm/yyyy hh:mm`, or an empty string when the timestamp is absent.
    pub fn formatted_created_at(&self) -> String {
        self.created_at
            .map(|ts| ts.format(DATE_TIME_FORMAT).to_string())
            .unwrap_or_default()
    }

    /// First `max_chars` characters of the content followed by `...` when the
    /// content is longer than that.
    pub fn truncated_content(&self, max_chars: usize) -> String {
        truncate_chars(&self.content, max_chars)
    }
}

impl PartialEq for Article {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Article {}

impl Hash for Article {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

pub(crate) fn truncate_chars(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &value[..cut]),
        None => value.to_string(),
    }
}
