pub mod entity;
pub mod filter;
pub mod repository;
pub mod statistics;
pub mod status;
pub mod value_objects;

pub use entity::{Article, ArticleFields};
pub use filter::{ArticleFilter, FilterField};
pub use repository::ArticleRepository;
pub use statistics::ArticleStatistics;
pub use status::ArticleStatus;
pub use value_objects::ArticleId;
