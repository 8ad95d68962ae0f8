// src/application/queries/articles.rs
use crate::{
    application::{
        dto::{FilterOptionsDto, StatisticsDto},
        error::{ApplicationError, ApplicationResult},
        services::ArticleService,
    },
    domain::article::{Article, ArticleFilter, ArticleId, ArticleStatus},
};

/// Optional listing filters as typed on the console.
#[derive(Debug, Clone, Default)]
pub struct ListArticlesQuery {
    pub region: Option<String>,
    pub language: Option<String>,
    pub status: Option<String>,
}

impl ListArticlesQuery {
    fn into_filter(self) -> ApplicationResult<ArticleFilter> {
        let mut filter = ArticleFilter::new();
        if let Some(region) = self.region {
            filter = filter.with_region(region);
        }
        if let Some(language) = self.language {
            filter = filter.with_language(language);
        }
        if let Some(raw) = self.status.filter(|s| !s.trim().is_empty()) {
            filter = filter.with_status(raw.trim().parse::<ArticleStatus>()?);
        }
        Ok(filter)
    }
}

impl ArticleService {
    /// Looks an article up. Unknown and non-positive ids both yield `None`.
    pub async fn get_article(&mut self, id: i32) -> ApplicationResult<Option<Article>> {
        let Ok(id) = ArticleId::new(id) else {
            return Ok(None);
        };
        Ok(self.repo.find_by_id(id).await?)
    }

    pub async fn list_articles(&mut self, query: ListArticlesQuery) -> ApplicationResult<Vec<Article>> {
        let filter = query.into_filter()?;
        Ok(self.repo.list(&filter).await?)
    }

    pub async fn list_published(&mut self) -> ApplicationResult<Vec<Article>> {
        Ok(self.repo.list_published().await?)
    }

    pub async fn search_articles(&mut self, term: &str) -> ApplicationResult<Vec<Article>> {
        let term = term.trim();
        if term.is_empty() {
            return Err(ApplicationError::validation("search term cannot be empty"));
        }
        Ok(self.repo.search(term).await?)
    }

    pub async fn filter_options(&mut self) -> ApplicationResult<FilterOptionsDto> {
        Ok(FilterOptionsDto {
            regions: self.repo.distinct_regions().await?,
            languages: self.repo.distinct_languages().await?,
        })
    }

    pub async fn statistics(&mut self) -> ApplicationResult<StatisticsDto> {
        let counts = self.repo.statistics().await?;
        let FilterOptionsDto { regions, languages } = self.filter_options().await?;
        Ok(StatisticsDto {
            counts,
            regions,
            languages,
        })
    }
}
