use crate::configuration::Configuration;
use clap::Parser;
use tracing::warn;

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, Parser)]
#[command(about = "Appointment booking backend")]
struct Arguments {
    /// Port to listen on. Falls back to the PORT environment variable.
    #[arg(long)]
    port: Option<u16>,
    /// Shared secret for the admin API. Falls back to ADMIN_TOKEN.
    #[arg(long)]
    admin_token: Option<String>,
    /// Postgres connection URL. Falls back to DATABASE_URL; without one
    /// the server runs on an impersistent in-memory store.
    #[arg(long)]
    database_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ConfigurationHandler {
    port: u16,
    admin_token: String,
    database_url: Option<String>,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        dotenvy::dotenv().ok();
        let arguments = Arguments::parse();

        let port = arguments
            .port
            .or_else(|| std::env::var("PORT").ok()?.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let admin_token = arguments
            .admin_token
            .or_else(|| std::env::var("ADMIN_TOKEN").ok())
            .unwrap_or_else(|| {
                warn!("no admin token configured, using the development default");
                "change-me".into()
            });
        let database_url = arguments
            .database_url
            .or_else(|| std::env::var("DATABASE_URL").ok());

        Self {
            port,
            admin_token,
            database_url,
        }
    }
}

impl Configuration for ConfigurationHandler {
    fn port(&self) -> u16 {
        self.port
    }

    fn admin_token(&self) -> String {
        self.admin_token.clone()
    }

    fn database_url(&self) -> Option<String> {
        self.database_url.clone()
    }
}
