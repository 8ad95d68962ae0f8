// src/application/commands/articles.rs
use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        services::ArticleService,
    },
    domain::article::{Article, ArticleId},
};
use chrono::NaiveDate;

/// Input date format accepted by the console (`YYYY-MM-DD`).
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw console input for a new article. Text fields are taken as typed;
/// `date` and `status` are parsed here.
#[derive(Debug, Clone, Default)]
pub struct CreateArticleCommand {
    pub title: String,
    pub author: Option<String>,
    pub category: Option<String>,
    pub content: String,
    pub region: String,
    pub language: String,
    pub date: Option<String>,
    pub status: Option<String>,
}

/// Fields to change on an existing article. `None` and blank values keep the
/// stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateArticleCommand {
    pub id: i32,
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub content: Option<String>,
    pub region: Option<String>,
    pub language: Option<String>,
    pub date: Option<String>,
    pub status: Option<String>,
}

pub struct DeleteArticleCommand {
    pub id: i32,
}

/// Result of a write, with any input that was replaced by a fallback.
#[derive(Debug, Clone)]
pub struct ArticleWriteOutcome {
    pub article: Article,
    pub warnings: Vec<String>,
}

pub fn parse_input_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), INPUT_DATE_FORMAT).ok()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn not_found(id: i32) -> ApplicationError {
    ApplicationError::not_found(format!("article {id} not found"))
}

impl ArticleService {
    /// Validates and stores a new article.
    ///
    /// A missing date means today; an unparsable one also means today and is
    /// reported as a warning. A missing status means draft, an unknown one is
    /// rejected. Nothing is written when validation fails.
    pub async fn create_article(
        &mut self,
        command: CreateArticleCommand,
    ) -> ApplicationResult<ArticleWriteOutcome> {
        let now = self.clock.now();
        let mut warnings = Vec::new();

        let mut article = Article::draft(now);
        article.set_title(command.title, now);
        article.set_author(non_blank(command.author), now);
        article.set_category(non_blank(command.category), now);
        article.set_content(command.content, now);
        article.set_region(Some(command.region), now);
        article.set_language(Some(command.language), now);

        if let Some(raw) = non_blank(command.date) {
            match parse_input_date(&raw) {
                Some(date) => article.set_date(Some(date), now),
                None => {
                    tracing::warn!(input = %raw, "unparsable article date, using today");
                    warnings.push(format!("Invalid date format {raw:?}. Using today's date."));
                    article.set_date(Some(now.date()), now);
                }
            }
        }

        if let Some(raw) = non_blank(command.status) {
            article.try_set_status(raw.trim(), now)?;
        }

        article.validate()?;
        article.check_column_limits()?;
        let id = self.repo.create(&mut article).await?;
        tracing::info!(article_id = id.get(), status = %article.status(), "article created");

        Ok(ArticleWriteOutcome { article, warnings })
    }

    /// Applies the given changes to a stored article and writes it back.
    ///
    /// An unparsable date keeps the current one and is reported as a warning;
    /// an unknown status is rejected.
    pub async fn update_article(
        &mut self,
        command: UpdateArticleCommand,
    ) -> ApplicationResult<ArticleWriteOutcome> {
        let id = ArticleId::new(command.id).map_err(|_| not_found(command.id))?;
        let mut article = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(command.id))?;

        let now = self.clock.now();
        let mut warnings = Vec::new();

        if let Some(title) = non_blank(command.title) {
            article.set_title(title, now);
        }
        if let Some(author) = non_blank(command.author) {
            article.set_author(Some(author), now);
        }
        if let Some(category) = non_blank(command.category) {
            article.set_category(Some(category), now);
        }
        if let Some(content) = non_blank(command.content) {
            article.set_content(content, now);
        }
        if let Some(region) = non_blank(command.region) {
            article.set_region(Some(region), now);
        }
        if let Some(language) = non_blank(command.language) {
            article.set_language(Some(language), now);
        }
        if let Some(raw) = non_blank(command.date) {
            match parse_input_date(&raw) {
                Some(date) => article.set_date(Some(date), now),
                None => {
                    tracing::warn!(input = %raw, article_id = id.get(), "unparsable article date, keeping current");
                    warnings.push(format!("Invalid date format {raw:?}. Keeping current date."));
                }
            }
        }
        if let Some(raw) = non_blank(command.status) {
            article.try_set_status(raw.trim(), now)?;
        }

        article.validate()?;
        article.check_column_limits()?;
        if !self.repo.update(&article).await? {
            return Err(not_found(command.id));
        }
        tracing::info!(article_id = id.get(), "article updated");

        // The store stamps updated_at itself; hand back what it now holds.
        let article = self.repo.find_by_id(id).await?.unwrap_or(article);
        Ok(ArticleWriteOutcome { article, warnings })
    }

    /// Removes a stored article and returns the removed value.
    pub async fn delete_article(&mut self, command: DeleteArticleCommand) -> ApplicationResult<Article> {
        let id = ArticleId::new(command.id).map_err(|_| not_found(command.id))?;
        let article = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(command.id))?;

        if !self.repo.delete(id).await? {
            return Err(not_found(command.id));
        }
        tracing::info!(article_id = id.get(), "article deleted");
        Ok(article)
    }
}
