use crate::domain::article::{Article, ArticleStatistics, ArticleStatus};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ArticleDto {
    pub id: Option<i32>,
    pub title: String,
    pub author: Option<String>,
    pub category: Option<String>,
    pub content: String,
    pub region: Option<String>,
    pub language: Option<String>,
    pub date: Option<NaiveDate>,
    pub status: ArticleStatus,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl From<&Article> for ArticleDto {
    fn from(article: &Article) -> Self {
        Self {
            id: article.id().map(i32::from),
            title: article.title().to_string(),
            author: article.author().map(str::to_string),
            category: article.category().map(str::to_string),
            content: article.content().to_string(),
            region: article.region().map(str::to_string),
            language: article.language().map(str::to_string),
            date: article.date(),
            status: article.status(),
            created_at: article.created_at(),
            updated_at: article.updated_at(),
        }
    }
}

/// Distinct non-null regions and languages, sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptionsDto {
    pub regions: Vec<String>,
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatisticsDto {
    #[serde(flatten)]
    pub counts: ArticleStatistics,
    pub regions: Vec<String>,
    pub languages: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::ArticleId;
    use chrono::NaiveDate;

    #[test]
    fn article_dto_serializes_wire_names() {
        let now = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let mut article = Article::new("T", "C", "R", "L", now);
        article.set_id(ArticleId::new(5).unwrap());
        article.set_status(ArticleStatus::Published, now);

        let json = serde_json::to_value(ArticleDto::from(&article)).unwrap();
        assert_eq!(json["id"], 5);
        assert_eq!(json["status"], "published");
        assert_eq!(json["date"], "2024-01-01");
        assert_eq!(json["author"], serde_json::Value::Null);
    }

    #[test]
    fn statistics_dto_flattens_counts() {
        let dto = StatisticsDto {
            counts: ArticleStatistics {
                total: 4,
                published: 2,
                draft: 1,
                pending: 0,
                archived: 1,
            },
            regions: vec!["R".into()],
            languages: vec![],
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["total"], 4);
        assert_eq!(json["archived"], 1);
        assert_eq!(json["regions"][0], "R");
    }
}
