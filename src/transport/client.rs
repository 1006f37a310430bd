//! HTTP client for the form API

use std::time::Duration;

use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;

use crate::schema::Schema;

use super::errors::{SessionError, SubmitError, SubmitResult};

const LOGIN_PATH: &str = "newlogin";
const FORMS_PATH: &str = "forms";

const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";
const NO_TOKEN: &str = "No token received from server";

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// A form created on the server
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedForm {
    /// Server-assigned id, when the response carries one
    pub id: Option<String>,
    pub status: u16,
}

/// Client for the login and form-creation endpoints
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> SubmitResult<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Exchanges credentials for a bearer token
    pub async fn login(&self, email: &str, password: &str) -> SubmitResult<String> {
        let response = self
            .http
            .post(self.url(LOGIN_PATH))
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        let status = response.status();
        let body = read_body(response).await;

        if !status.is_success() {
            let message = server_message(&body).unwrap_or(LOGIN_FAILED);
            return Err(SubmitError::Login(message.to_string()));
        }

        match body.get("access_token").and_then(Value::as_str) {
            Some(token) if !token.is_empty() => Ok(token.to_string()),
            _ => Err(SubmitError::Login(NO_TOKEN.to_string())),
        }
    }

    /// Sends a validated schema to the create endpoint.
    ///
    /// 409 maps to `Conflict`, 401/403 to a session error, any other
    /// non-2xx to `Http` with the server's `message` when present.
    pub async fn create_form(&self, token: &str, schema: &Schema) -> SubmitResult<CreatedForm> {
        if token.trim().is_empty() {
            return Err(SessionError::MissingCredential.into());
        }

        let response = self
            .http
            .post(self.url(FORMS_PATH))
            .bearer_auth(token)
            .json(schema)
            .send()
            .await?;

        let status = response.status();
        let body = read_body(response).await;

        match status.as_u16() {
            code if status.is_success() => Ok(CreatedForm {
                id: created_id(&body),
                status: code,
            }),
            409 => Err(SubmitError::Conflict {
                name: schema.name.clone(),
            }),
            401 | 403 => Err(SessionError::Rejected.into()),
            code => Err(SubmitError::Http {
                status: code,
                message: server_message(&body)
                    .or_else(|| status.canonical_reason())
                    .unwrap_or("Request failed")
                    .to_string(),
            }),
        }
    }
}

/// Reads a JSON body; anything unparseable reads as null
async fn read_body(response: Response) -> Value {
    response.json::<Value>().await.unwrap_or(Value::Null)
}

fn server_message(body: &Value) -> Option<&str> {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
}

/// Looks for the id at `id`, `form_id` or `data.id`
fn created_id(body: &Value) -> Option<String> {
    let candidate = body
        .get("id")
        .or_else(|| body.get("form_id"))
        .or_else(|| body.get("data").and_then(|data| data.get("id")))?;

    match candidate {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
