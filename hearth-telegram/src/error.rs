#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    #[error("failed to build telegram http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("telegram `{method}` request failed: {source}")]
    Http {
        method: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("telegram `{method}` returned an undecodable response (HTTP {status}): {source}")]
    Decode {
        method: &'static str,
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("telegram `{method}` failed ({code}): {description}")]
    Api {
        method: &'static str,
        code: i64,
        description: String,
    },

    #[error("telegram `{method}` returned ok without a result")]
    MissingResult { method: &'static str },
}
