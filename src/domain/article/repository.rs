use crate::domain::article::entity::Article;
use crate::domain::article::filter::ArticleFilter;
use crate::domain::article::statistics::ArticleStatistics;
use crate::domain::article::value_objects::ArticleId;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

/// Gateway to persisted articles.
///
/// Implementations own a single connection and are driven by one caller at a
/// time, hence `&mut self` on every operation. Absence is reported through
/// `Option` / `bool`, never as an error.
#[async_trait]
pub trait ArticleRepository: Send {
    /// Inserts `article`, writes the generated id back onto it and returns it.
    async fn create(&mut self, article: &mut Article) -> DomainResult<ArticleId>;

    async fn find_by_id(&mut self, id: ArticleId) -> DomainResult<Option<Article>>;

    /// Articles matching every condition of `filter`, newest first.
    async fn list(&mut self, filter: &ArticleFilter) -> DomainResult<Vec<Article>>;

    async fn list_published(&mut self) -> DomainResult<Vec<Article>> {
        self.list(&ArticleFilter::published()).await
    }

    /// Overwrites the stored row with the article's fields. Returns `false`
    /// when no row carries the article's id.
    async fn update(&mut self, article: &Article) -> DomainResult<bool>;

    async fn delete(&mut self, id: ArticleId) -> DomainResult<bool>;

    /// Case-insensitive substring match on title or content, newest first.
    async fn search(&mut self, term: &str) -> DomainResult<Vec<Article>>;

    async fn distinct_regions(&mut self) -> DomainResult<Vec<String>>;

    async fn distinct_languages(&mut self) -> DomainResult<Vec<String>>;

    async fn statistics(&mut self) -> DomainResult<ArticleStatistics>;

    /// Releases the underlying connection. Called once at process exit.
    async fn shutdown(&mut self) -> DomainResult<()> {
        Ok(())
    }
}
