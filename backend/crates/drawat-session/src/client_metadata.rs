use drawat_config::Environment;

use serde::Serialize;
use url::form_urlencoded::byte_serialize;

pub const OAUTH_SCOPE: &str = "atproto transition:generic";
const CALLBACK_PATH: &str = "/api/callback";

/// OAuth client metadata document published at `client_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientMetadata {
    pub client_id: String,
    pub redirect_uris: Vec<String>,
    pub scope: String,
    pub grant_types: Vec<String>,
    pub response_types: Vec<String>,
    pub token_endpoint_auth_method: String,
    pub dpop_bound_access_tokens: bool,
}

impl ClientMetadata {
    /// Production and preview publish a metadata document next to the app;
    /// development uses the loopback client id form.
    pub fn for_environment(environment: Environment, public_url: &str) -> Self {
        let base = public_url.trim_end_matches('/');
        let redirect_uri = format!("{base}{CALLBACK_PATH}");

        let client_id = match environment {
            Environment::Production => format!("{base}/client-metadata.json"),
            Environment::Preview => format!("{base}/client-metadata-preview.json"),
            Environment::Development => format!(
                "http://localhost?redirect_uri={}&scope={}",
                encode_component(&redirect_uri),
                encode_component(OAUTH_SCOPE)
            ),
        };

        Self {
            client_id,
            redirect_uris: vec![redirect_uri],
            scope: OAUTH_SCOPE.to_string(),
            grant_types: vec!["authorization_code".into(), "refresh_token".into()],
            response_types: vec!["code".into()],
            token_endpoint_auth_method: "none".into(),
            dpop_bound_access_tokens: false,
        }
    }

    pub fn redirect_uri(&self) -> &str {
        self.redirect_uris
            .first()
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// Percent-encode a query component, with spaces as `%20`.
fn encode_component(value: &str) -> String {
    byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
