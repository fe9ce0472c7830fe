use crate::configuration::Configuration;
use crate::configuration_handler::ConfigurationHandler;
use crate::database_interface::DatabaseInterface;
use crate::http::{create_app, AppState};
use crate::local_store::LocalStore;
use crate::notification::LogNotifier;
use crate::slots::SlotConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod availability;
mod backend;
mod booking_service;
mod configuration;
mod configuration_handler;
mod database_interface;
mod error;
mod http;
mod local_store;
mod notification;
mod schema;
mod slots;
#[cfg(test)]
mod testutils;
mod types;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("#######################");
    println!("# Appointment Manager #");
    println!("#######################");

    let configuration = ConfigurationHandler::parse_arguments();
    let slots = Arc::new(SlotConfig::standard());
    let admin_token = Arc::new(configuration.admin_token());

    let address = format!("0.0.0.0:{}", configuration.port());
    println!("Accessable at:\n{}", address.clone());
    let listener = tokio::net::TcpListener::bind(address).await.unwrap();

    let app = if let Some(database_url) = configuration.database_url() {
        let backend = loop {
            match DatabaseInterface::new(&database_url) {
                Ok(backend) => {
                    info!("Successfully connected to database");
                    break backend;
                }
                Err(err) => {
                    error!(?err, "Failed to establish database connection: {database_url}. Retry in 1 sec. You may want to restart it with database disabled (impersistent bookings).");
                    sleep(Duration::from_secs(1)).await;
                }
            }
        };
        create_app(AppState {
            backend,
            notifier: LogNotifier,
            slots,
            admin_token,
        })
    } else {
        create_app(AppState {
            backend: LocalStore::default(),
            notifier: LogNotifier,
            slots,
            admin_token,
        })
    };

    axum::serve(listener, app).await.unwrap();
}
