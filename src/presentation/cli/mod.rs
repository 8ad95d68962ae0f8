// src/presentation/cli/mod.rs
pub mod args;
pub mod render;

pub use args::{Cli, Command};

use crate::application::{
    ApplicationError, ArticleService,
    commands::articles::{ArticleWriteOutcome, DeleteArticleCommand},
    dto::ArticleDto,
};
use crate::domain::article::Article;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{self, BufRead, Write};

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to encode JSON output")?;
    println!("{text}");
    Ok(())
}

fn print_list(articles: &[Article], show_status: bool, empty_message: &str, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let dtos: Vec<ArticleDto> = articles.iter().map(ArticleDto::from).collect();
            print_json(&dtos)
        }
        OutputFormat::Text if articles.is_empty() => {
            println!("{empty_message}");
            Ok(())
        }
        OutputFormat::Text => {
            println!("{}", render::article_table(articles, show_status));
            Ok(())
        }
    }
}

fn print_write(outcome: &ArticleWriteOutcome, success: &str, format: OutputFormat) -> Result<()> {
    for warning in &outcome.warnings {
        eprintln!("warning: {warning}");
    }
    match format {
        OutputFormat::Json => print_json(&ArticleDto::from(&outcome.article)),
        OutputFormat::Text => {
            println!("{success}");
            println!("{}", render::article_details(&outcome.article));
            Ok(())
        }
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Runs one console command against the service.
pub async fn run(command: Command, format: OutputFormat, service: &mut ArticleService) -> Result<()> {
    match command {
        Command::List(args) => {
            let articles = service.list_articles(args.into()).await?;
            print_list(&articles, true, "No articles found.", format)
        }
        Command::Published => {
            let articles = service.list_published().await?;
            print_list(&articles, false, "No published articles found.", format)
        }
        Command::Show { id } => {
            let article = service.get_article(id).await?;
            match (format, article) {
                (OutputFormat::Json, article) => print_json(&article.as_ref().map(ArticleDto::from)),
                (OutputFormat::Text, Some(article)) => {
                    println!("{}", render::article_details(&article));
                    Ok(())
                }
                (OutputFormat::Text, None) => {
                    println!("Article not found with ID: {id}");
                    Ok(())
                }
            }
        }
        Command::Create(args) => {
            let outcome = service.create_article(args.into()).await?;
            let id = outcome.article.id().map(|id| id.to_string()).unwrap_or_default();
            print_write(&outcome, &format!("Article created successfully with ID: {id}"), format)
        }
        Command::Edit(args) => {
            let outcome = service.update_article(args.into()).await?;
            print_write(&outcome, "Article updated successfully!", format)
        }
        Command::Delete { id, yes } => {
            if !yes {
                let Some(article) = service.get_article(id).await? else {
                    return Err(ApplicationError::not_found(format!("article {id} not found")).into());
                };
                println!("Article to delete:");
                println!("{}", render::article_details(&article));
                if !confirm("Are you sure you want to delete this article? (y/N): ")? {
                    println!("Deletion cancelled.");
                    return Ok(());
                }
            }

            let deleted = service.delete_article(DeleteArticleCommand { id }).await?;
            match format {
                OutputFormat::Json => print_json(&ArticleDto::from(&deleted)),
                OutputFormat::Text => {
                    println!("Article deleted successfully!");
                    Ok(())
                }
            }
        }
        Command::Search { term } => {
            let articles = service.search_articles(&term).await?;
            if format == OutputFormat::Text && !articles.is_empty() {
                println!("Found {} article(s) matching: {}", articles.len(), term.trim());
            }
            print_list(
                &articles,
                true,
                &format!("No articles found matching: {}", term.trim()),
                format,
            )
        }
        Command::Stats => {
            let stats = service.statistics().await?;
            match format {
                OutputFormat::Json => print_json(&stats),
                OutputFormat::Text => {
                    println!("{}", render::statistics(&stats));
                    Ok(())
                }
            }
        }
        Command::Filters => {
            let options = service.filter_options().await?;
            match format {
                OutputFormat::Json => print_json(&options),
                OutputFormat::Text => {
                    println!("{}", render::filter_options(&options));
                    Ok(())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_accepts_y_and_yes() {
        for answer in ["y\n", "Y", " yes ", "YES\r\n"] {
            assert!(is_yes(answer), "{answer:?}");
        }
        for answer in ["", "n", "no", "yep", "\n"] {
            assert!(!is_yes(answer), "{answer:?}");
        }
    }

    #[test]
    fn output_format_follows_flag() {
        assert_eq!(OutputFormat::from_flag(true), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flag(false), OutputFormat::Text);
    }
}
