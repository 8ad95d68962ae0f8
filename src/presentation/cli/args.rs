// src/presentation/cli/args.rs
use crate::application::{
    commands::articles::{CreateArticleCommand, UpdateArticleCommand},
    queries::articles::ListArticlesQuery,
};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "news_agency")]
#[command(version)]
#[command(about = "Manage news articles stored in PostgreSQL")]
pub struct Cli {
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging for this crate
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List articles, newest first
    List(ListArgs),

    /// List published articles only
    Published,

    /// Show one article in full
    Show {
        id: i32,
    },

    /// Create a new article
    Create(CreateArgs),

    /// Change fields of an existing article
    Edit(EditArgs),

    /// Delete an article
    Delete {
        id: i32,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Search titles and content (case-insensitive)
    Search {
        term: String,
    },

    /// Article counts per status, regions and languages
    Stats,

    /// Regions and languages in use
    Filters,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub region: Option<String>,

    #[arg(long)]
    pub language: Option<String>,

    /// draft, published, pending or archived
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub content: String,

    #[arg(long)]
    pub region: String,

    #[arg(long)]
    pub language: String,

    #[arg(long)]
    pub author: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    /// YYYY-MM-DD, defaults to today
    #[arg(long)]
    pub date: Option<String>,

    /// draft, published, pending or archived; defaults to draft
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    pub id: i32,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub content: Option<String>,

    #[arg(long)]
    pub region: Option<String>,

    #[arg(long)]
    pub language: Option<String>,

    #[arg(long)]
    pub author: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    /// YYYY-MM-DD
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub status: Option<String>,
}

impl From<ListArgs> for ListArticlesQuery {
    fn from(args: ListArgs) -> Self {
        Self {
            region: args.region,
            language: args.language,
            status: args.status,
        }
    }
}

impl From<CreateArgs> for CreateArticleCommand {
    fn from(args: CreateArgs) -> Self {
        Self {
            title: args.title,
            author: args.author,
            category: args.category,
            content: args.content,
            region: args.region,
            language: args.language,
            date: args.date,
            status: args.status,
        }
    }
}

impl From<EditArgs> for UpdateArticleCommand {
    fn from(args: EditArgs) -> Self {
        Self {
            id: args.id,
            title: args.title,
            author: args.author,
            category: args.category,
            content: args.content,
            region: args.region,
            language: args.language,
            date: args.date,
            status: args.status,
        }
    }
}
