use super::push::{IPushService, PushError, PushPayload};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::error;

const FCM_SEND_URL: &str = "https://fcm.googleapis.com/fcm/send";

// https://firebase.google.com/docs/cloud-messaging/http-server-ref
pub struct FcmPushService {
    client: Client,
    server_key: String,
}

impl FcmPushService {
    pub fn new(server_key: String) -> Self {
        Self {
            client: Client::new(),
            server_key,
        }
    }
}

#[derive(Debug, Serialize)]
struct FcmRequest<'a> {
    to: &'a str,
    notification: FcmNotification<'a>,
    data: &'a PushPayload,
}

#[derive(Debug, Serialize)]
struct FcmNotification<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct FcmResponse {
    failure: i64,
    results: Option<Vec<FcmResult>>,
}

#[derive(Debug, Deserialize)]
struct FcmResult {
    error: Option<String>,
}

fn is_token_error(error: &str) -> bool {
    matches!(
        error,
        "MissingRegistration" | "InvalidRegistration" | "NotRegistered"
    )
}

#[async_trait::async_trait]
impl IPushService for FcmPushService {
    async fn send(&self, device_token: &str, payload: &PushPayload) -> Result<(), PushError> {
        let request = FcmRequest {
            to: device_token,
            notification: FcmNotification {
                title: &payload.title,
                body: &payload.body,
            },
            data: payload,
        };

        let res = self
            .client
            .post(FCM_SEND_URL)
            .header("authorization", format!("key={}", self.server_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("FCM send request failed: {:?}", e);
                PushError {
                    message: e.to_string(),
                    invalid_token: false,
                }
            })?;

        let status = res.status();
        if !status.is_success() {
            error!("FCM send request was rejected with status: {}", status);
            return Err(PushError {
                message: format!("FCM responded with status: {}", status),
                invalid_token: false,
            });
        }

        let res: FcmResponse = res.json().await.map_err(|e| {
            error!("[Unexpected Response] FCM send response malformed: {:?}", e);
            PushError {
                message: e.to_string(),
                invalid_token: false,
            }
        })?;

        if res.failure > 0 {
            let provider_error = res
                .results
                .unwrap_or_default()
                .into_iter()
                .find_map(|result| result.error)
                .unwrap_or_else(|| "Unknown".into());
            return Err(PushError {
                invalid_token: is_token_error(&provider_error),
                message: provider_error,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn recognizes_token_errors() {
        assert!(is_token_error("NotRegistered"));
        assert!(is_token_error("InvalidRegistration"));
        assert!(is_token_error("MissingRegistration"));
        assert!(!is_token_error("Unavailable"));
        assert!(!is_token_error("InternalServerError"));
    }
}
