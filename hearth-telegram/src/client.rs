use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TelegramError;
use crate::types::{BotCommand, BotUser, SendMessage, SentMessage};

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
    error_code: Option<i64>,
}

/// Parameters of `setWebhook`.
#[derive(Clone, Debug, Serialize)]
pub struct WebhookOptions {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_token: Option<String>,
    pub drop_pending_updates: bool,
    pub allowed_updates: Vec<String>,
}

#[derive(Serialize)]
struct DeleteWebhook {
    drop_pending_updates: bool,
}

#[derive(Serialize)]
struct SetMyCommands<'a> {
    commands: &'a [BotCommand],
}

#[derive(Serialize)]
struct NoParams {}

#[derive(Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

impl fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramClient")
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl TelegramClient {
    pub fn new(token: impl Into<String>, api_url: impl Into<String>) -> Result<Self, TelegramError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(TelegramError::Client)?;

        Ok(Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_owned(),
            token: token.into(),
        })
    }

    pub async fn get_me(&self) -> Result<BotUser, TelegramError> {
        self.call("getMe", &NoParams {}).await
    }

    pub async fn set_my_commands(&self, commands: &[BotCommand]) -> Result<(), TelegramError> {
        self.call::<_, bool>("setMyCommands", &SetMyCommands { commands })
            .await
            .map(|_| ())
    }

    pub async fn set_webhook(&self, options: &WebhookOptions) -> Result<(), TelegramError> {
        self.call::<_, bool>("setWebhook", options).await.map(|_| ())
    }

    pub async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<(), TelegramError> {
        self.call::<_, bool>(
            "deleteWebhook",
            &DeleteWebhook {
                drop_pending_updates,
            },
        )
        .await
        .map(|_| ())
    }

    pub async fn send_message(&self, message: &SendMessage) -> Result<SentMessage, TelegramError> {
        self.call("sendMessage", message).await
    }

    async fn call<P, R>(&self, method: &'static str, params: &P) -> Result<R, TelegramError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/bot{}/{}", self.api_url, self.token, method);

        // reqwest errors embed the URL, which carries the token.
        let response = self
            .http
            .post(url)
            .json(params)
            .send()
            .await
            .map_err(|source| TelegramError::Http {
                method,
                source: source.without_url(),
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|source| TelegramError::Http {
            method,
            source: source.without_url(),
        })?;

        let envelope: ApiResponse<R> =
            serde_json::from_slice(&body).map_err(|source| TelegramError::Decode {
                method,
                status: status.as_u16(),
                source,
            })?;

        debug!(method, status = status.as_u16(), ok = envelope.ok, "telegram api call");

        if !envelope.ok {
            return Err(TelegramError::Api {
                method,
                code: envelope.error_code.unwrap_or_else(|| i64::from(status.as_u16())),
                description: envelope
                    .description
                    .unwrap_or_else(|| "no description".to_owned()),
            });
        }

        envelope
            .result
            .ok_or(TelegramError::MissingResult { method })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::{TelegramClient, WebhookOptions};
    use crate::error::TelegramError;
    use crate::types::{BotCommand, ParseMode, SendMessage};

    const TOKEN: &str = "123:abc";

    async fn client(server: &MockServer) -> TelegramClient {
        TelegramClient::new(TOKEN, format!("{}/", server.uri())).unwrap()
    }

    #[tokio::test]
    async fn registers_webhook_with_options() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/setWebhook"))
            .and(body_json(json!({
                "url": "https://bot.example.com/webhook",
                "secret_token": "s3cret",
                "drop_pending_updates": true,
                "allowed_updates": ["message"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "result": true })))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .await
            .set_webhook(&WebhookOptions {
                url: "https://bot.example.com/webhook".to_owned(),
                secret_token: Some("s3cret".to_owned()),
                drop_pending_updates: true,
                allowed_updates: vec!["message".to_owned()],
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn deletes_webhook() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/deleteWebhook"))
            .and(body_json(json!({ "drop_pending_updates": false })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "result": true })))
            .expect(1)
            .mount(&server)
            .await;

        client(&server).await.delete_webhook(false).await.unwrap();
    }

    #[tokio::test]
    async fn sends_messages_and_reads_bot_identity() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/sendMessage"))
            .and(body_json(json!({ "chat_id": 42, "text": "<b>hi</b>", "parse_mode": "HTML" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "ok": true, "result": { "message_id": 77, "date": 0 } })),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/getMe"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": { "id": 1, "is_bot": true, "first_name": "Hearth", "username": "hearth_bot" }
            })))
            .mount(&server)
            .await;

        let client = client(&server).await;
        let sent = client
            .send_message(&SendMessage::new(42, "<b>hi</b>").parse_mode(ParseMode::Html))
            .await
            .unwrap();
        assert_eq!(sent.message_id, 77);

        let me = client.get_me().await.unwrap();
        assert_eq!(me.username.as_deref(), Some("hearth_bot"));
    }

    #[tokio::test]
    async fn api_errors_carry_code_and_description() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/setMyCommands"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: commands are invalid"
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .await
            .set_my_commands(&[BotCommand {
                command: "start".to_owned(),
                description: "Start".to_owned(),
            }])
            .await
            .unwrap_err();

        match err {
            TelegramError::Api {
                method,
                code,
                description,
            } => {
                assert_eq!(method, "setMyCommands");
                assert_eq!(code, 400);
                assert!(description.contains("commands are invalid"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn non_json_responses_are_decode_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let err = client(&server).await.delete_webhook(true).await.unwrap_err();
        assert!(matches!(err, TelegramError::Decode { status: 502, .. }));
    }

    #[test]
    fn debug_output_hides_the_token() {
        let client = TelegramClient::new(TOKEN, "https://api.telegram.org").unwrap();
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("abc"));
        assert!(rendered.contains("<redacted>"));
    }
}
