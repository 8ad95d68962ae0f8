use crate::application::dto::{FilterOptionsDto, StatisticsDto};
use crate::domain::article::{Article, entity::truncate_chars};

const LIST_WIDTH: usize = 120;
const DETAIL_WIDTH: usize = 80;
const TITLE_WIDTH: usize = 30;

fn list_title(title: &str) -> String {
    if title.chars().count() > TITLE_WIDTH {
        truncate_chars(title, TITLE_WIDTH - 3)
    } else {
        title.to_string()
    }
}

fn id_cell(article: &Article) -> String {
    article.id().map(|id| id.to_string()).unwrap_or_else(|| "-".into())
}

fn table_header(show_status: bool) -> String {
    if show_status {
        format!(
            "{:<5} {:<30} {:<15} {:<15} {:<15} {:<15} {}",
            "ID", "Title", "Region", "Language", "Date", "Status", "Author"
        )
    } else {
        format!(
            "{:<5} {:<30} {:<15} {:<15} {:<15} {}",
            "ID", "Title", "Region", "Language", "Date", "Author"
        )
    }
}

fn table_row(article: &Article, show_status: bool) -> String {
    let id = id_cell(article);
    let title = list_title(article.title());
    let region = article.region().unwrap_or_default();
    let language = article.language().unwrap_or_default();
    let date = article.formatted_date();
    let author = article.author().unwrap_or_default();

    if show_status {
        format!(
            "{id:<5} {title:<30} {region:<15} {language:<15} {date:<15} {:<15} {author}",
            article.status().as_str()
        )
    } else {
        format!("{id:<5} {title:<30} {region:<15} {language:<15} {date:<15} {author}")
    }
}

/// Fixed-width table. With `show_status` the status column precedes the
/// author; otherwise only the author is shown.
pub fn article_table(articles: &[Article], show_status: bool) -> String {
    let rule = "-".repeat(LIST_WIDTH);

    let mut lines = vec![rule.clone(), table_header(show_status), rule.clone()];
    lines.extend(articles.iter().map(|article| table_row(article, show_status)));
    lines.push(rule);
    lines.push(format!("Total: {} articles", articles.len()));
    lines.join("\n")
}

pub fn article_details(article: &Article) -> String {
    let heavy = "=".repeat(DETAIL_WIDTH);
    [
        heavy.clone(),
        format!("Article ID: {}", id_cell(article)),
        format!("Title: {}", article.title()),
        format!("Author: {}", article.author().unwrap_or("Not specified")),
        format!("Category: {}", article.category().unwrap_or("Not specified")),
        format!("Region: {}", article.region().unwrap_or_default()),
        format!("Language: {}", article.language().unwrap_or_default()),
        format!("Date: {}", article.formatted_date()),
        format!("Status: {}", article.status()),
        format!("Created: {}", article.formatted_created_at()),
        "-".repeat(DETAIL_WIDTH),
        "Content:".to_string(),
        article.content().to_string(),
        heavy,
    ]
    .join("\n")
}

pub fn statistics(stats: &StatisticsDto) -> String {
    let counts = &stats.counts;
    [
        format!("Total Articles: {}", counts.total),
        format!("Published: {}", counts.published),
        format!("Draft: {}", counts.draft),
        format!("Pending: {}", counts.pending),
        format!("Archived: {}", counts.archived),
        format!("Regions: {}", stats.regions.len()),
        format!("Languages: {}", stats.languages.len()),
        String::new(),
        format!("Regions: {}", stats.regions.join(", ")),
        format!("Languages: {}", stats.languages.join(", ")),
    ]
    .join("\n")
}

fn numbered(heading: &str, values: &[String]) -> Vec<String> {
    let mut lines = vec![format!("{heading} ({}):", values.len())];
    lines.extend(
        values
            .iter()
            .enumerate()
            .map(|(i, value)| format!("{}. {value}", i + 1)),
    );
    lines
}

pub fn filter_options(options: &FilterOptionsDto) -> String {
    let mut lines = numbered("Available Regions", &options.regions);
    lines.push(String::new());
    lines.extend(numbered("Available Languages", &options.languages));
    lines.join("\n")
}
