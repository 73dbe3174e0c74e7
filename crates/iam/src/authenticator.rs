use std::{path::PathBuf, time::Duration};

use highlight_core::{BearerToken, http_client};
use jwt_compact::{AlgorithmExt, Claims, Header, TimeOptions, alg::Rsa};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    error::{IamError, Result},
    key::ServiceAccountKey,
};

/// Exchanges a signed service-account assertion for an IAM token
///
/// The key file is read on every exchange and tokens are never cached, so
/// each pipeline run pays for one round trip to the token endpoint.
pub struct Authenticator {
    client: Client,
    token_url: Url,
    assertion_ttl: Duration,
    key_path: PathBuf,
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    #[serde(rename = "iss")]
    issuer: &'a str,
    #[serde(rename = "aud")]
    audience: &'a str,
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    jwt: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    iam_token: String,
    #[serde(default)]
    expires_at: Option<String>,
}

impl Authenticator {
    pub fn new(token_url: Url, assertion_ttl: Duration, key_path: PathBuf) -> Self {
        Self {
            client: http_client(),
            token_url,
            assertion_ttl,
            key_path,
        }
    }

    pub fn from_config(config: &highlight_config::Config) -> Self {
        Self::new(
            config.iam.token_url.clone(),
            config.iam.assertion_ttl,
            config.cloud.service_account_key.clone(),
        )
    }

    /// Build a PS256 assertion for `key`, addressed to the token endpoint
    pub fn sign_assertion(&self, key: &ServiceAccountKey) -> Result<String> {
        let signing_key = key.signing_key()?;

        let ttl = chrono::Duration::from_std(self.assertion_ttl).map_err(|e| IamError::Signing(e.to_string()))?;

        let claims = Claims::new(AssertionClaims {
            issuer: &key.service_account_id,
            audience: self.token_url.as_str(),
        })
        .set_duration_and_issuance(&TimeOptions::default(), ttl);

        let header = Header::empty().with_key_id(key.id.clone());

        Rsa::ps256()
            .token(&header, &claims, &signing_key)
            .map_err(|e| IamError::Signing(e.to_string()))
    }

    /// Load the key, sign an assertion and exchange it for a bearer token
    pub async fn issue_token(&self) -> Result<BearerToken> {
        let key = ServiceAccountKey::load(&self.key_path).await?;
        let assertion = self.sign_assertion(&key)?;

        tracing::debug!(service_account_id = %key.service_account_id, key_id = %key.id, "requesting IAM token");

        let response = self
            .client
            .post(self.token_url.clone())
            .json(&TokenRequest { jwt: &assertion })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("IAM token request failed: {e}");
                IamError::ConnectionError(format!("Failed to send request to token endpoint: {e}"))
            })?;

        let status = response.status();

        if status != StatusCode::OK {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::warn!("IAM token endpoint error ({status}): {error_text}");

            return Err(IamError::ProviderApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| IamError::InvalidResponse(e.to_string()))?;

        tracing::info!(expires_at = body.expires_at.as_deref().unwrap_or("unknown"), "IAM token obtained");

        Ok(BearerToken::new(body.iam_token))
    }
}
