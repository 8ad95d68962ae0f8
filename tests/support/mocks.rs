// tests/support/mocks.rs
use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use news_agency::application::{ArticleService, ports::time::Clock};
use news_agency::domain::article::{
    Article, ArticleFilter, ArticleId, ArticleRepository, ArticleStatistics, ArticleStatus,
};
use news_agency::domain::errors::{DomainError, DomainResult};
use std::sync::{Arc, Mutex};

pub fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(10, 0, 0))
        .expect("valid fixed timestamp")
}

/// Clock that only moves when told to.
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock");
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().expect("clock lock")
    }
}

#[derive(Default)]
struct Store {
    rows: Vec<Article>,
    next_id: i32,
}

/// In-memory article store. Clones share the same rows so a test can keep a
/// handle for inspection after moving one into a service.
#[derive(Clone, Default)]
pub struct InMemoryArticleRepository {
    inner: Arc<Mutex<Store>>,
}

impl InMemoryArticleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("store lock").rows.len()
    }

    pub fn get(&self, id: i32) -> Option<Article> {
        let store = self.inner.lock().expect("store lock");
        store
            .rows
            .iter()
            .find(|a| a.id().map(i32::from) == Some(id))
            .cloned()
    }

    fn newest_first(mut rows: Vec<Article>) -> Vec<Article> {
        rows.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        rows
    }

    fn distinct(&self, pick: impl Fn(&Article) -> Option<&str>) -> Vec<String> {
        let store = self.inner.lock().expect("store lock");
        let mut values: Vec<String> = store
            .rows
            .iter()
            .filter_map(|a| pick(a).map(str::to_string))
            .collect();
        values.sort();
        values.dedup();
        values
    }
}

fn matches_filter(article: &Article, filter: &ArticleFilter) -> bool {
    filter.region().is_none_or(|r| article.region() == Some(r))
        && filter.language().is_none_or(|l| article.language() == Some(l))
        && filter.status().is_none_or(|s| article.status() == s)
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepository {
    async fn create(&mut self, article: &mut Article) -> DomainResult<ArticleId> {
        let mut store = self.inner.lock().expect("store lock");
        store.next_id += 1;
        let id = ArticleId::new(store.next_id)?;
        article.set_id(id);
        store.rows.push(article.clone());
        Ok(id)
    }

    async fn find_by_id(&mut self, id: ArticleId) -> DomainResult<Option<Article>> {
        Ok(self.get(id.get()))
    }

    async fn list(&mut self, filter: &ArticleFilter) -> DomainResult<Vec<Article>> {
        let rows = {
            let store = self.inner.lock().expect("store lock");
            store
                .rows
                .iter()
                .filter(|a| matches_filter(a, filter))
                .cloned()
                .collect()
        };
        Ok(Self::newest_first(rows))
    }

    async fn update(&mut self, article: &Article) -> DomainResult<bool> {
        let Some(id) = article.id() else {
            return Ok(false);
        };
        let mut store = self.inner.lock().expect("store lock");
        match store.rows.iter_mut().find(|a| a.id() == Some(id)) {
            Some(row) => {
                let created_at = row.created_at();
                *row = article.clone();
                row.set_created_at(created_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&mut self, id: ArticleId) -> DomainResult<bool> {
        let mut store = self.inner.lock().expect("store lock");
        let before = store.rows.len();
        store.rows.retain(|a| a.id() != Some(id));
        Ok(store.rows.len() < before)
    }

    async fn search(&mut self, term: &str) -> DomainResult<Vec<Article>> {
        let needle = term.to_lowercase();
        let rows = {
            let store = self.inner.lock().expect("store lock");
            store
                .rows
                .iter()
                .filter(|a| {
                    a.title().to_lowercase().contains(&needle)
                        || a.content().to_lowercase().contains(&needle)
                })
                .cloned()
                .collect()
        };
        Ok(Self::newest_first(rows))
    }

    async fn distinct_regions(&mut self) -> DomainResult<Vec<String>> {
        Ok(self.distinct(Article::region))
    }

    async fn distinct_languages(&mut self) -> DomainResult<Vec<String>> {
        Ok(self.distinct(Article::language))
    }

    async fn statistics(&mut self) -> DomainResult<ArticleStatistics> {
        let store = self.inner.lock().expect("store lock");
        let count = |status: ArticleStatus| {
            store.rows.iter().filter(|a| a.status() == status).count() as i64
        };
        Ok(ArticleStatistics {
            total: store.rows.len() as i64,
            published: count(ArticleStatus::Published),
            draft: count(ArticleStatus::Draft),
            pending: count(ArticleStatus::Pending),
            archived: count(ArticleStatus::Archived),
        })
    }
}

/// Store whose every operation fails, for error propagation tests.
pub struct FailingArticleRepository;

fn unavailable() -> DomainError {
    DomainError::persistence_msg("database unavailable")
}

#[async_trait]
impl ArticleRepository for FailingArticleRepository {
    async fn create(&mut self, _article: &mut Article) -> DomainResult<ArticleId> {
        Err(unavailable())
    }

    async fn find_by_id(&mut self, _id: ArticleId) -> DomainResult<Option<Article>> {
        Err(unavailable())
    }

    async fn list(&mut self, _filter: &ArticleFilter) -> DomainResult<Vec<Article>> {
        Err(unavailable())
    }

    async fn update(&mut self, _article: &Article) -> DomainResult<bool> {
        Err(unavailable())
    }

    async fn delete(&mut self, _id: ArticleId) -> DomainResult<bool> {
        Err(unavailable())
    }

    async fn search(&mut self, _term: &str) -> DomainResult<Vec<Article>> {
        Err(unavailable())
    }

    async fn distinct_regions(&mut self) -> DomainResult<Vec<String>> {
        Err(unavailable())
    }

    async fn distinct_languages(&mut self) -> DomainResult<Vec<String>> {
        Err(unavailable())
    }

    async fn statistics(&mut self) -> DomainResult<ArticleStatistics> {
        Err(unavailable())
    }
}

/// Service over a fresh in-memory store, plus handles to the store and clock.
pub fn in_memory_service() -> (ArticleService, InMemoryArticleRepository, Arc<FixedClock>) {
    let repo = InMemoryArticleRepository::new();
    let clock = Arc::new(FixedClock::new(fixed_now()));
    let service = ArticleService::new(Box::new(repo.clone()), clock.clone());
    (service, repo, clock)
}
