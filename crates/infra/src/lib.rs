mod config;
mod repos;
mod services;

use chrono::Utc;
pub use config::Config;
pub use repos::{IEmployeeRepo, IReminderRepo, Repos};
pub use services::{
    BroadcastMessage, Broadcaster, DiscardPushService, FcmPushService, IPushService, PushError,
    PushPayload,
};
use std::sync::Arc;

// Mocking out time so that it is possible to run tests that depend on time.
pub trait ISys: Send + Sync {
    /// The current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

#[derive(Clone)]
pub struct NidoContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub push: Arc<dyn IPushService>,
    pub broadcaster: Broadcaster,
}

struct ContextParams {
    // (connection_string, db_name)
    pub mongodb: (String, String),
}

impl NidoContext {
    fn create_inmemory() -> Self {
        let config = Config::new();
        let push = create_push_service(&config);
        Self {
            repos: Repos::create_inmemory(),
            config,
            sys: Arc::new(RealSys {}),
            push,
            broadcaster: Broadcaster::new(),
        }
    }

    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_mongodb(&params.mongodb.0, &params.mongodb.1)
            .await
            .expect("Mongodb credentials must be set and valid");
        let config = Config::new();
        let push = create_push_service(&config);
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            push,
            broadcaster: Broadcaster::new(),
        }
    }
}

fn create_push_service(config: &Config) -> Arc<dyn IPushService> {
    match &config.fcm_server_key {
        Some(server_key) => Arc::new(FcmPushService::new(server_key.clone())),
        None => Arc::new(DiscardPushService),
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> NidoContext {
    const MONGODB_CONNECTION_STRING: &str = "MONGODB_CONNECTION_STRING";
    const MONGODB_NAME: &str = "MONGODB_NAME";

    let connection_string = std::env::var(MONGODB_CONNECTION_STRING);
    let db_name = std::env::var(MONGODB_NAME);

    match (connection_string, db_name) {
        (Ok(connection_string), Ok(db_name)) => {
            tracing::info!(
                "{} and {} env vars were provided. Going to use mongodb.",
                MONGODB_CONNECTION_STRING,
                MONGODB_NAME
            );
            NidoContext::create(ContextParams {
                mongodb: (connection_string, db_name),
            })
            .await
        }
        _ => {
            tracing::info!(
                "{} and {} env vars were not provided. Going to use inmemory infra.",
                MONGODB_CONNECTION_STRING,
                MONGODB_NAME
            );
            NidoContext::create_inmemory()
        }
    }
}
