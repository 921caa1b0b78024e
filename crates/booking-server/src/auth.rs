//! Service-account authentication for the Google Calendar API.
//!
//! The credential blob is the JSON key file Google issues for a service
//! account. Each request signs a short-lived RS256 assertion with the key and
//! exchanges it at the key's `token_uri` for a bearer token. Tokens are not
//! cached between requests.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::error::SourceError;

/// Read-only access to calendar data, which includes free/busy.
pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar.readonly";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_MINUTES: i64 = 60;

/// The fields of a service-account key file this server needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    /// Parse a key blob.
    ///
    /// Keys pasted into environment variables often carry literal `\n`
    /// sequences instead of newlines; those are restored before use.
    pub fn from_json(raw: &str) -> Result<Self, SourceError> {
        let mut key: ServiceAccountKey = serde_json::from_str(raw.trim())
            .map_err(|e| SourceError::Credential(e.to_string()))?;
        key.private_key = key.private_key.replace("\\n", "\n");
        if key.client_email.is_empty() || key.private_key.is_empty() {
            return Err(SourceError::Credential(
                "client_email and private_key must be non-empty".to_string(),
            ));
        }
        Ok(key)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Sign the JWT-bearer assertion for `key`, issued at `now`.
pub fn signed_assertion(key: &ServiceAccountKey, now: DateTime<Utc>) -> Result<String, SourceError> {
    let claims = AssertionClaims {
        iss: key.client_email.clone(),
        scope: CALENDAR_SCOPE.to_string(),
        aud: key.token_uri.clone(),
        iat: now.timestamp(),
        exp: (now + Duration::minutes(ASSERTION_LIFETIME_MINUTES)).timestamp(),
    };
    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
    Ok(jsonwebtoken::encode(
        &Header::new(Algorithm::RS256),
        &claims,
        &encoding_key,
    )?)
}

/// Exchange a fresh assertion for an access token.
pub async fn fetch_access_token(
    client: &reqwest::Client,
    key: &ServiceAccountKey,
) -> Result<String, SourceError> {
    let assertion = signed_assertion(key, Utc::now())?;

    let response = client
        .post(&key.token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SourceError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let token: TokenResponse = response.json().await?;
    Ok(token.access_token)
}
