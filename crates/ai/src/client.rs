//! HTTP client for the generative model endpoint.
//!
//! Sends a prompt (and optional model override) as JSON and hands back
//! the provider's response body as untyped [`serde_json::Value`].
//! Callers normalize the payload themselves; the wire shapes differ
//! between providers and even between API revisions of the same one.

use serde_json::Value;

use crate::token::TokenProvider;

/// Errors from the generative provider layer.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Provider error ({status}): {body}")]
    Provider {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// Obtaining an access token failed.
    #[error("Token exchange failed: {0}")]
    Token(String),
}

/// How requests to the endpoint are authenticated.
enum Credential {
    /// No credential; the endpoint injects its own.
    None,
    /// Static API key sent as a bearer token.
    ApiKey(String),
    /// Short-lived bearer tokens from a service-account exchange.
    Tokens(TokenProvider),
}

/// HTTP client for a single generative model endpoint.
pub struct GenerativeClient {
    client: reqwest::Client,
    api_url: String,
    default_model: String,
    credential: Credential,
}

impl GenerativeClient {
    /// Create a client for an endpoint that needs no authentication
    /// (e.g. a local relay that injects credentials itself).
    pub fn new(api_url: String, default_model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            default_model,
            credential: Credential::None,
        }
    }

    /// Create a client that sends a static API key with each request.
    pub fn with_api_key(api_url: String, default_model: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            default_model,
            credential: Credential::ApiKey(api_key),
        }
    }

    /// Create a client that authenticates each request with a bearer
    /// token obtained from the given provider.
    pub fn with_tokens(api_url: String, default_model: String, tokens: TokenProvider) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            default_model,
            credential: Credential::Tokens(tokens),
        }
    }

    /// Model used when a request does not name one.
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Send a prompt to the provider and return its raw JSON response.
    ///
    /// `model` overrides the client's default when given. The response
    /// body is returned as-is; use `taskdeck_core::normalize` to pull
    /// display text out of it.
    pub async fn generate(&self, prompt: &str, model: Option<&str>) -> Result<Value, AiError> {
        let body = serde_json::json!({
            "prompt": prompt,
            "model": model.unwrap_or(&self.default_model),
        });

        let mut request = self.client.post(&self.api_url).json(&body);
        match &self.credential {
            Credential::None => {}
            Credential::ApiKey(key) => request = request.bearer_auth(key),
            Credential::Tokens(tokens) => {
                let token = tokens.access_token(&self.client).await?;
                request = request.bearer_auth(token);
            }
        }

        let response = request.send().await?;
        Self::parse_response(response).await
    }

    /// Parse a successful JSON response body, or surface the status and
    /// body text of a failed one.
    async fn parse_response(response: reqwest::Response) -> Result<Value, AiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(AiError::Provider {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<Value>().await?)
    }
}
