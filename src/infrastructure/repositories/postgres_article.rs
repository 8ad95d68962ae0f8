// src/infrastructure/repositories/postgres_article.rs
use super::{is_connection_lost, map_sqlx};
use crate::domain::article::{
    Article, ArticleFields, ArticleFilter, ArticleId, ArticleRepository, ArticleStatistics,
    ArticleStatus,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::infrastructure::database;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::{Connection, FromRow, PgConnection, Postgres, QueryBuilder, postgres::PgConnectOptions};
use std::time::Duration;

const ARTICLE_COLUMNS: &str = "id, title, author, category, content, region, language, date, \
                               status, created_at, updated_at";

/// The article store: one Postgres connection, owned exclusively.
///
/// The connection is opened (and the schema bootstrapped) on first use and
/// re-opened after it has been found dead by [`test_connection`] or closed by
/// [`shutdown`]. Nothing is retried within an operation.
///
/// [`test_connection`]: PostgresArticleStore::test_connection
/// [`shutdown`]: ArticleRepository::shutdown
pub struct PostgresArticleStore {
    options: PgConnectOptions,
    ping_timeout: Duration,
    conn: Option<PgConnection>,
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i32,
    title: String,
    author: Option<String>,
    category: Option<String>,
    content: String,
    region: Option<String>,
    language: Option<String>,
    date: Option<NaiveDate>,
    status: String,
    created_at: Option<NaiveDateTime>,
    updated_at: Option<NaiveDateTime>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = DomainError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<ArticleStatus>().map_err(|_| {
            DomainError::persistence_msg(format!(
                "article {} has unknown status {:?}",
                row.id, row.status
            ))
        })?;

        let fields = ArticleFields {
            title: row.title,
            author: row.author,
            category: row.category,
            content: row.content,
            region: row.region,
            language: row.language,
            date: row.date,
            status,
        };

        Ok(Article::restore(
            ArticleId::new(row.id)?,
            fields,
            row.created_at,
            row.updated_at,
        ))
    }
}

#[derive(Debug, FromRow)]
struct InsertedRow {
    id: i32,
    created_at: Option<NaiveDateTime>,
    updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, FromRow)]
struct StatisticsRow {
    total: i64,
    published: i64,
    draft: i64,
    pending: i64,
    archived: i64,
}

impl From<StatisticsRow> for ArticleStatistics {
    fn from(row: StatisticsRow) -> Self {
        Self {
            total: row.total,
            published: row.published,
            draft: row.draft,
            pending: row.pending,
            archived: row.archived,
        }
    }
}

impl PostgresArticleStore {
    /// Store that connects lazily on its first operation.
    pub fn new(options: PgConnectOptions, ping_timeout: Duration) -> Self {
        Self {
            options,
            ping_timeout,
            conn: None,
        }
    }

    /// Store with the connection already established and the schema in place.
    pub async fn connect(options: PgConnectOptions, ping_timeout: Duration) -> DomainResult<Self> {
        let mut store = Self::new(options, ping_timeout);
        store.connection().await?;
        Ok(store)
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// Pings the server within the configured deadline. A dead connection is
    /// dropped so the next operation opens a fresh one.
    pub async fn test_connection(&mut self) -> bool {
        let Some(conn) = self.conn.as_mut() else {
            return false;
        };

        if database::is_alive(conn, self.ping_timeout).await {
            true
        } else {
            self.conn = None;
            false
        }
    }

    async fn connection(&mut self) -> DomainResult<&mut PgConnection> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => database::establish(&self.options).await?,
        };
        Ok(self.conn.insert(conn))
    }

    /// Maps a driver result. A connection the server has dropped is released
    /// here; the failed operation is not repeated.
    fn settle<T>(&mut self, operation: &str, result: Result<T, sqlx::Error>) -> DomainResult<T> {
        result.map_err(|err| {
            if is_connection_lost(&err) {
                tracing::warn!(error = %err, operation, "database connection lost");
                self.conn = None;
            }
            map_sqlx(operation, err)
        })
    }

    async fn fetch_articles(
        &mut self,
        operation: &str,
        mut builder: QueryBuilder<'_, Postgres>,
    ) -> DomainResult<Vec<Article>> {
        let conn = self.connection().await?;
        let result = builder
            .build_query_as::<ArticleRow>()
            .fetch_all(&mut *conn)
            .await;
        let rows = self.settle(operation, result)?;

        rows.into_iter().map(Article::try_from).collect()
    }

    async fn distinct_values(&mut self, column: &str) -> DomainResult<Vec<String>> {
        let sql = format!(
            "SELECT DISTINCT {column} FROM articles WHERE {column} IS NOT NULL ORDER BY {column}"
        );
        let conn = self.connection().await?;
        let result = sqlx::query_scalar::<_, String>(&sql)
            .fetch_all(&mut *conn)
            .await;
        self.settle(&format!("list distinct {column} values"), result)
    }
}

fn select_articles<'a>() -> QueryBuilder<'a, Postgres> {
    QueryBuilder::new(format!("SELECT {ARTICLE_COLUMNS} FROM articles"))
}

fn push_filter<'a>(builder: &mut QueryBuilder<'a, Postgres>, filter: &'a ArticleFilter) {
    let conditions = filter.conditions();
    if conditions.is_empty() {
        return;
    }

    builder.push(" WHERE ");
    let mut separated = builder.separated(" AND ");
    for (field, value) in conditions {
        separated.push(format!("{} = ", field.column()));
        separated.push_bind_unseparated(value);
    }
}

fn push_newest_first(builder: &mut QueryBuilder<'_, Postgres>) {
    builder.push(" ORDER BY created_at DESC, id DESC");
}

/// `%term%` with LIKE metacharacters escaped so the term matches literally.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl ArticleRepository for PostgresArticleStore {
    async fn create(&mut self, article: &mut Article) -> DomainResult<ArticleId> {
        let conn = self.connection().await?;
        let result = sqlx::query_as::<_, InsertedRow>(
            "INSERT INTO articles (title, author, category, content, region, language, date, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id, created_at, updated_at",
        )
        .bind(article.title())
        .bind(article.author())
        .bind(article.category())
        .bind(article.content())
        .bind(article.region())
        .bind(article.language())
        .bind(article.date())
        .bind(article.status().as_str())
        .fetch_optional(&mut *conn)
        .await;
        let row = self
            .settle("create article", result)?
            .ok_or_else(|| DomainError::persistence_msg("failed to create article, no id obtained"))?;

        let id = ArticleId::new(row.id)?;
        article.set_id(id);
        article.set_created_at(row.created_at);
        article.set_updated_at(row.updated_at);

        tracing::debug!(article_id = id.get(), "article created");
        Ok(id)
    }

    async fn find_by_id(&mut self, id: ArticleId) -> DomainResult<Option<Article>> {
        let sql = format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1");
        let conn = self.connection().await?;
        let result = sqlx::query_as::<_, ArticleRow>(&sql)
            .bind(id.get())
            .fetch_optional(&mut *conn)
            .await;
        let row = self.settle("load article", result)?;

        row.map(Article::try_from).transpose()
    }

    async fn list(&mut self, filter: &ArticleFilter) -> DomainResult<Vec<Article>> {
        let mut builder = select_articles();
        push_filter(&mut builder, filter);
        push_newest_first(&mut builder);

        let articles = self.fetch_articles("list articles", builder).await?;
        tracing::debug!(count = articles.len(), ?filter, "articles listed");
        Ok(articles)
    }

    async fn update(&mut self, article: &Article) -> DomainResult<bool> {
        let Some(id) = article.id() else {
            tracing::debug!("update skipped for an article that was never stored");
            return Ok(false);
        };

        let conn = self.connection().await?;
        let result = sqlx::query(
            "UPDATE articles
             SET title = $1, author = $2, category = $3, content = $4,
                 region = $5, language = $6, date = $7, status = $8,
                 updated_at = CURRENT_TIMESTAMP
             WHERE id = $9",
        )
        .bind(article.title())
        .bind(article.author())
        .bind(article.category())
        .bind(article.content())
        .bind(article.region())
        .bind(article.language())
        .bind(article.date())
        .bind(article.status().as_str())
        .bind(id.get())
        .execute(&mut *conn)
        .await;

        let updated = self.settle("update article", result)?.rows_affected() > 0;
        tracing::debug!(article_id = id.get(), updated, "article update executed");
        Ok(updated)
    }

    async fn delete(&mut self, id: ArticleId) -> DomainResult<bool> {
        let conn = self.connection().await?;
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id.get())
            .execute(&mut *conn)
            .await;

        let deleted = self.settle("delete article", result)?.rows_affected() > 0;
        tracing::debug!(article_id = id.get(), deleted, "article delete executed");
        Ok(deleted)
    }

    async fn search(&mut self, term: &str) -> DomainResult<Vec<Article>> {
        let pattern = contains_pattern(term);

        let mut builder = select_articles();
        builder.push(" WHERE title ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR content ILIKE ");
        builder.push_bind(pattern);
        push_newest_first(&mut builder);

        let articles = self.fetch_articles("search articles", builder).await?;
        tracing::debug!(count = articles.len(), term, "article search finished");
        Ok(articles)
    }

    async fn distinct_regions(&mut self) -> DomainResult<Vec<String>> {
        self.distinct_values("region").await
    }

    async fn distinct_languages(&mut self) -> DomainResult<Vec<String>> {
        self.distinct_values("language").await
    }

    async fn statistics(&mut self) -> DomainResult<ArticleStatistics> {
        let conn = self.connection().await?;
        let result = sqlx::query_as::<_, StatisticsRow>(
            "SELECT
                 COUNT(*) AS total,
                 COUNT(*) FILTER (WHERE status = 'published') AS published,
                 COUNT(*) FILTER (WHERE status = 'draft') AS draft,
                 COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                 COUNT(*) FILTER (WHERE status = 'archived') AS archived
             FROM articles",
        )
        .fetch_one(&mut *conn)
        .await;

        Ok(self.settle("compute article statistics", result)?.into())
    }

    async fn shutdown(&mut self) -> DomainResult<()> {
        if let Some(conn) = self.conn.take() {
            conn.close()
                .await
                .map_err(|e| map_sqlx("close database connection", e))?;
            tracing::info!("database connection closed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filtered_sql(filter: &ArticleFilter) -> String {
        let mut builder = select_articles();
        push_filter(&mut builder, filter);
        push_newest_first(&mut builder);
        builder.sql().to_string()
    }

    #[test]
    fn unfiltered_listing_has_no_where_clause() {
        let sql = filtered_sql(&ArticleFilter::new());
        assert_eq!(
            sql,
            format!("SELECT {ARTICLE_COLUMNS} FROM articles ORDER BY created_at DESC, id DESC")
        );
    }

    #[test]
    fn filters_become_bound_parameters() {
        let filter = ArticleFilter::new()
            .with_region("Europe")
            .with_status(ArticleStatus::Published);
        let sql = filtered_sql(&filter);
        assert!(
            sql.ends_with(
                " FROM articles WHERE region = $1 AND status = $2 ORDER BY created_at DESC, id DESC"
            ),
            "{sql}"
        );
        assert!(!sql.contains("Europe"));
    }

    #[test]
    fn all_three_filters_compose_in_order() {
        let filter = ArticleFilter::new()
            .with_status(ArticleStatus::Draft)
            .with_language("Hindi")
            .with_region("North");
        let sql = filtered_sql(&filter);
        assert!(
            sql.contains("WHERE region = $1 AND language = $2 AND status = $3"),
            "{sql}"
        );
    }

    #[test]
    fn search_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("news"), "%news%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b\\c"), "%a\\_b\\\\c%");
    }

    #[test]
    fn row_mapping_keeps_absent_values_absent() {
        let row = ArticleRow {
            id: 3,
            title: "T".into(),
            author: None,
            category: Some("Politics".into()),
            content: "C".into(),
            region: None,
            language: Some("L".into()),
            date: None,
            status: "pending".into(),
            created_at: None,
            updated_at: None,
        };

        let article = Article::try_from(row).unwrap();
        assert_eq!(article.id(), Some(ArticleId::new(3).unwrap()));
        assert_eq!(article.status(), ArticleStatus::Pending);
        assert_eq!(article.category(), Some("Politics"));
        assert_eq!(article.region(), None);
        assert_eq!(article.date(), None);
        assert_eq!(article.created_at(), None);
        assert_eq!(article.updated_at(), None);
    }

    #[test]
    fn row_with_unknown_status_is_rejected() {
        let row = ArticleRow {
            id: 1,
            title: "T".into(),
            author: None,
            category: None,
            content: "C".into(),
            region: None,
            language: None,
            date: None,
            status: "deleted".into(),
            created_at: None,
            updated_at: None,
        };

        assert!(matches!(
            Article::try_from(row),
            Err(DomainError::Persistence { .. })
        ));
    }

    #[test]
    fn new_store_is_lazy() {
        let store = PostgresArticleStore::new(PgConnectOptions::new_without_pgpass(), Duration::from_secs(1));
        assert!(!store.is_connected());
    }
}
