pub mod articles;

pub use articles::{ArticleDto, FilterOptionsDto, StatisticsDto};
