use crate::pkce::CHALLENGE_METHOD;
use crate::{ClientMetadata, Pkce, SessionError, SessionResult, TokenSet};

use drawat_core::Did;

use log::debug;
use reqwest::{Client as ReqwestClient, Response};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

const RESOLVE_HANDLE: &str = "/xrpc/com.atproto.identity.resolveHandle";
const AUTHORIZE: &str = "/oauth/authorize";
const TOKEN: &str = "/oauth/token";
const REVOKE: &str = "/oauth/revoke";

#[derive(Deserialize)]
struct ResolveHandleResponse {
    did: String,
}

/// OAuth client bound to one provider, which also resolves handles.
pub struct OAuthClient {
    pub provider: String,
    metadata: ClientMetadata,
    client: ReqwestClient,
}

impl OAuthClient {
    pub fn new(provider: &str, metadata: ClientMetadata, client: ReqwestClient) -> Self {
        Self {
            provider: provider.trim_end_matches('/').to_string(),
            metadata,
            client,
        }
    }

    pub fn metadata(&self) -> &ClientMetadata {
        &self.metadata
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.provider, path)
    }

    pub async fn resolve_handle(&self, handle: &str) -> SessionResult<Did> {
        let response = self
            .client
            .get(self.endpoint(RESOLVE_HANDLE))
            .query(&[("handle", handle)])
            .send()
            .await?;
        let body: ResolveHandleResponse = ensure_success(response).await?.json().await?;

        debug!("Resolved handle {} to {}", handle, body.did);
        Ok(Did::new(body.did)?)
    }

    /// Authorization URL the user's browser must visit.
    pub fn authorization_url(&self, handle: &str, pkce: &Pkce, state: &str) -> SessionResult<Url> {
        let url = Url::parse_with_params(
            &self.endpoint(AUTHORIZE),
            &[
                ("response_type", "code"),
                ("client_id", self.metadata.client_id.as_str()),
                ("redirect_uri", self.metadata.redirect_uri()),
                ("scope", self.metadata.scope.as_str()),
                ("state", state),
                ("code_challenge", pkce.challenge.as_str()),
                ("code_challenge_method", CHALLENGE_METHOD),
                ("login_hint", handle),
                ("prompt", "login"),
                ("ui_locales", "ja-JP"),
            ],
        )?;
        Ok(url)
    }

    pub async fn exchange_code(&self, code: &str, verifier: &str) -> SessionResult<TokenSet> {
        self.token_request(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.metadata.redirect_uri()),
            ("client_id", self.metadata.client_id.as_str()),
            ("code_verifier", verifier),
        ])
        .await
    }

    pub async fn refresh(&self, refresh_token: &str) -> SessionResult<TokenSet> {
        self.token_request(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.metadata.client_id.as_str()),
        ])
        .await
    }

    pub async fn revoke(&self, token: &str) -> SessionResult<()> {
        let response = self
            .client
            .post(self.endpoint(REVOKE))
            .form(&[("token", token), ("client_id", self.metadata.client_id.as_str())])
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn token_request(&self, form: &[(&str, &str)]) -> SessionResult<TokenSet> {
        let response = self
            .client
            .post(self.endpoint(TOKEN))
            .form(form)
            .send()
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }
}

/// OAuth endpoints answer `{error, error_description}`; XRPC ones `{error, message}`.
async fn ensure_success(response: Response) -> SessionResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body: Value = response.json().await.unwrap_or(Value::Null);
    let code = body
        .get("error")
        .and_then(|v| v.as_str())
        .unwrap_or("UNKNOWN")
        .to_string();
    let message = body
        .get("error_description")
        .or_else(|| body.get("message"))
        .and_then(|v| v.as_str())
        .or(status.canonical_reason())
        .unwrap_or("Unknown error")
        .to_string();

    Err(SessionError::oauth(status.as_u16(), code, message))
}
