use nido_utils::create_random_secret;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Secret used to sign and verify employee session tokens
    pub jwt_signing_secret: String,
    /// Api key that protects the administrative routes
    pub admin_api_key: String,
    /// Server key for the FCM push endpoint. When absent, push deliveries
    /// are skipped and only the in-app broadcast is published.
    pub fcm_server_key: Option<String>,
    /// Minimum time in millis between two deliveries of the same reminder.
    /// The due-check runs every minute, nobody wants a push every minute.
    pub reminder_cooldown: i64,
}

const DEFAULT_COOLDOWN_MINUTES: i64 = 60;

impl Config {
    pub fn new() -> Self {
        let jwt_signing_secret = match std::env::var("JWT_SIGNING_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                info!("Did not find JWT_SIGNING_SECRET environment variable. Going to create one.");
                let secret = create_random_secret(32);
                info!("JWT signing secret was generated, tokens will not survive a restart.");
                secret
            }
        };
        let admin_api_key = match std::env::var("ADMIN_API_KEY") {
            Ok(key) => key,
            Err(_) => {
                info!("Did not find ADMIN_API_KEY environment variable. Going to create one.");
                let key = create_random_secret(30);
                info!("Admin api key was generated and set to: {}", key);
                key
            }
        };
        let fcm_server_key = std::env::var("FCM_SERVER_KEY").ok();
        if fcm_server_key.is_none() {
            warn!("FCM_SERVER_KEY env var not set. Push deliveries will be skipped.");
        }
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or_else(|_| default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };
        let reminder_cooldown = match std::env::var("REMINDER_COOLDOWN_MINUTES") {
            Ok(minutes) => match minutes.parse::<i64>() {
                Ok(minutes) if minutes > 0 => minutes,
                _ => {
                    warn!(
                        "The given REMINDER_COOLDOWN_MINUTES: {} is not valid, falling back to {} minutes.",
                        minutes, DEFAULT_COOLDOWN_MINUTES
                    );
                    DEFAULT_COOLDOWN_MINUTES
                }
            },
            Err(_) => DEFAULT_COOLDOWN_MINUTES,
        };

        Self {
            port,
            jwt_signing_secret,
            admin_api_key,
            fcm_server_key,
            reminder_cooldown: reminder_cooldown * 60 * 1000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
