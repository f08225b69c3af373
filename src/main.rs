use std::{net::SocketAddr, sync::Arc};

use clap::{
    Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};

use lyssnar::{
    Res,
    config::{self, DatabaseConfig, ServeConfig},
    error, logging,
    management::{CredentialStore, MemoryCredentialStore, PgCredentialStore},
    server::{self, AppState},
    success,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the web service
    Serve(ServeConfig),

    /// Create or update the database schema
    Migrate(DatabaseConfig),

    /// Delete the stored credential of a user
    Forget(ForgetOptions),
}

#[derive(Parser, Debug, Clone)]
pub struct ForgetOptions {
    /// Spotify user id to forget
    pub user_id: String,

    #[command(flatten)]
    pub database: DatabaseConfig,
}

#[tokio::main]
async fn main() {
    config::load_env();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(opt) => {
            logging::init();
            if let Err(e) = serve(opt).await {
                tracing::error!(error = %e, "server stopped");
                error!("Server stopped. Err: {}", e);
            }
        }
        Command::Migrate(opt) => match PgCredentialStore::connect(&opt.database_url).await {
            Ok(_) => success!("Database schema is up to date"),
            Err(e) => error!("Migration failed. Err: {}", e),
        },
        Command::Forget(opt) => {
            let store = match PgCredentialStore::connect(&opt.database.database_url).await {
                Ok(store) => store,
                Err(e) => error!("Cannot connect to database. Err: {}", e),
            };
            match store.remove(&opt.user_id).await {
                Ok(()) => success!("Removed credential for {}", opt.user_id),
                Err(e) => error!("Failed to remove {}. Err: {}", opt.user_id, e),
            }
        }
    }
}

async fn serve(opt: ServeConfig) -> Res<()> {
    let store: Arc<dyn CredentialStore> = match &opt.database_url {
        Some(url) => Arc::new(PgCredentialStore::connect(url).await?),
        None => {
            tracing::warn!("DATABASE_URL not set, credentials are kept in memory");
            Arc::new(MemoryCredentialStore::new())
        }
    };

    let mut http = reqwest::Client::builder();
    if let Some(timeout) = opt.http_timeout() {
        http = http.timeout(timeout);
    }

    let addr = SocketAddr::new(opt.bind_address, opt.port);
    let state = AppState::new(http.build()?, opt.spotify, store);
    server::serve(addr, state).await?;
    Ok(())
}
