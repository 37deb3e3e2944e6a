use anyhow::anyhow;
use clap::{Parser, Subcommand};
use sqlx::Postgres;
use sqlx::postgres::PgPoolOptions;
use std::process::exit;
use stint::core::application::Application;
use stint::core::config::Config;
use stint::domain::{logbook, timesheet};
use stint::inbound::http::router;
use stint::outbound::db::connection::Db;
use stint::outbound::db::repository::Repository;
use tracing::error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

type ApplicationAlias =
    Application<timesheet::Service<Repository, Repository>, logbook::Service<Repository>>;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(long)]
    config_path: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    Run,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,tower_http=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = start(cli).await {
        error!("Error: {:#?}", e);
        exit(1);
    }
}

async fn start(cli: Cli) -> anyhow::Result<(), anyhow::Error> {
    let config = Config::parse(cli.config_path)?;
    if !config.is_valid() {
        return Err(anyhow!("config is not valid"));
    }

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(config.db.connection_string().as_str())
        .await
        .map_err(|_| anyhow!("could not connect to the database"))?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let application = create_application(pool, config);

    match cli.command {
        None => Ok(()),
        Some(subcommand) => match subcommand {
            Commands::Run => run_server(application).await,
        },
    }
}

fn create_application(pool: sqlx::Pool<Postgres>, config: Config) -> ApplicationAlias {
    let db = Db::new(pool);

    let repo = Repository::new(db.pool());
    let timesheet_service = timesheet::Service::new(repo.clone(), repo.clone());
    let logbook_service = logbook::Service::new(repo);

    Application::new(config, timesheet_service, logbook_service)
}

async fn run_server(app: ApplicationAlias) -> anyhow::Result<()> {
    let router = router(app);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000")
        .await
        .map_err(|_| anyhow!("server failed to bind"))?;

    tracing::debug!(
        "listening on {}",
        listener
            .local_addr()
            .map_err(|_| anyhow!("failed to get local_addr"))?
    );

    axum::serve(listener, router)
        .await
        .map_err(|_| anyhow!("failed to start server"))
}
