use anyhow::{Result, bail};
use clap::Parser;
use news_agency::application::{ApplicationError, ArticleService, ports::ClockPort};
use news_agency::config::AppConfig;
use news_agency::infrastructure::{
    database, repositories::PostgresArticleStore, time::SystemClock,
};
use news_agency::presentation::cli::{self, Cli, OutputFormat};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = bootstrap().await {
        let user_error = err
            .downcast_ref::<ApplicationError>()
            .is_some_and(ApplicationError::is_user_error);
        if user_error {
            eprintln!("error: {err}");
        } else {
            tracing::error!(error = %err, "fatal error");
            eprintln!("fatal error: {err:#}");
        }
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = AppConfig::from_env()?;
    let options = database::connect_options(config.database());

    let mut store = PostgresArticleStore::connect(options, config.ping_timeout()).await?;
    if !store.test_connection().await {
        bail!(
            "database {} on {}:{} is not reachable",
            config.database().database(),
            config.database().host(),
            config.database().port()
        );
    }

    let clock: Arc<ClockPort> = Arc::new(SystemClock);
    let mut service = ArticleService::new(Box::new(store), clock);

    let outcome = cli::run(cli.command, OutputFormat::from_flag(cli.json), &mut service).await;
    if let Err(err) = service.shutdown().await {
        tracing::warn!(error = %err, "failed to close database connection");
    }
    outcome
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "news_agency=debug,sqlx=warn"
    } else {
        "info,sqlx=warn"
    };
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| default_filter.to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}
