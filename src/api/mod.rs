pub mod auth;
pub mod likes;
pub mod posts;

use crate::session::Session;
use miette::Diagnostic;
use reqwest::StatusCode;
use reqwest::blocking::{ClientBuilder, RequestBuilder, Response};
use reqwest::header::{COOKIE, SET_COOKIE};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum ApiError {
    #[error("Could not reach {url}")]
    #[diagnostic(
        code(postboard::api::unreachable),
        help("Is the server running? Check 'base_url' in the postboard config.")
    )]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(postboard::api::rejected))]
    Rejected { status: u16, message: String },

    #[error("Unexpected response from server: {0}")]
    #[diagnostic(code(postboard::api::bad_response))]
    BadResponse(String),

    #[error("Invalid server URL: {0}")]
    #[diagnostic(
        code(postboard::api::invalid_url),
        help("Use a full URL such as http://127.0.0.1:5000")
    )]
    InvalidUrl(String),

    #[error("Failed to set up HTTP client")]
    #[diagnostic(code(postboard::api::client))]
    Client(#[source] reqwest::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The `{message}` / `{error}` envelope most endpoints answer with.
#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
pub struct Reply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub post_id: Option<String>,
    #[serde(default)]
    pub likes_count: Option<u64>,
}

impl Reply {
    /// What the user should see: the message, falling back to the error.
    pub fn text(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }
}

pub struct Client {
    http: reqwest::blocking::Client,
    base_url: String,
    session: Session,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration, session: Session) -> Result<Self, ApiError> {
        Self::with_builder(base_url, http_builder(timeout), session)
    }

    fn with_builder(
        base_url: &str,
        builder: ClientBuilder,
        session: Session,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::InvalidUrl(base_url));
        }

        let http = builder.build().map_err(ApiError::Client)?;

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(self.url(path))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http.post(self.url(path))
    }

    fn put(&self, path: &str) -> RequestBuilder {
        self.http.put(self.url(path))
    }

    fn delete(&self, path: &str) -> RequestBuilder {
        self.http.delete(self.url(path))
    }

    /// Sends with the session cookies attached and keeps any cookies the
    /// server hands back.
    fn send(&mut self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = match self.session.cookie_header() {
            Some(cookies) => request.header(COOKIE, cookies),
            None => request,
        };

        let request = request.build().map_err(ApiError::Client)?;
        let method = request.method().clone();
        let url = request.url().to_string();
        log::debug!("{} {}", method, url);

        let response = self.http.execute(request).map_err(|source| {
            log::error!("{} {} failed: {}", method, url, source);
            ApiError::Unreachable {
                url: url.clone(),
                source,
            }
        })?;

        log::debug!("{} {} -> {}", method, url, response.status());

        for value in response.headers().get_all(SET_COOKIE) {
            if let Ok(value) = value.to_str() {
                self.session.absorb_set_cookie(value);
            }
        }

        Ok(response)
    }

    fn send_for_reply(&mut self, request: RequestBuilder) -> Result<Reply, ApiError> {
        let response = self.send(request)?;
        read_reply(response)
    }
}

fn http_builder(timeout: Duration) -> ClientBuilder {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("postboard/", env!("CARGO_PKG_VERSION")))
}

fn read_reply(response: Response) -> Result<Reply, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .map_err(|e| ApiError::BadResponse(e.to_string()))?;

    let reply = parse_reply(status, &body)?;

    if !status.is_success() {
        return Err(rejection(status, reply.text()));
    }

    Ok(reply)
}

/// Passes successful responses through; anything else becomes a rejection
/// carrying the server's own wording when it sent one.
fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    let reply = parse_reply(status, &body).unwrap_or_default();
    Err(rejection(status, reply.text()))
}

fn parse_reply(status: StatusCode, body: &str) -> Result<Reply, ApiError> {
    if body.trim().is_empty() {
        return Ok(Reply::default());
    }

    match serde_json::from_str::<Reply>(body) {
        Ok(reply) => Ok(reply),
        Err(_) if !status.is_success() => Ok(Reply::default()),
        Err(e) => Err(ApiError::BadResponse(e.to_string())),
    }
}

fn rejection(status: StatusCode, message: Option<&str>) -> ApiError {
    let message = message
        .map(str::to_string)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

    ApiError::Rejected {
        status: status.as_u16(),
        message,
    }
}


#[cfg(test)]
mod tests {
    use super::test_server::{client, json, serve};
    use super::*;

    #[test]
    fn test_rejects_non_http_url() {
        let result = Client::new("localhost:5000", Duration::from_secs(1), Session::default());
        assert!(matches!(result, Err(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = client("http://127.0.0.1:5000/", Session::default());
        assert_eq!(client.url("/posts"), "http://127.0.0.1:5000/posts");
    }

    #[test]
    fn test_parse_reply_error_field() {
        let reply = parse_reply(StatusCode::CONFLICT, r#"{"error": "taken"}"#).unwrap();
        assert_eq!(reply.text(), Some("taken"));
    }

    #[test]
    fn test_parse_reply_prefers_message() {
        let reply = parse_reply(StatusCode::OK, r#"{"message": "ok", "error": "no"}"#).unwrap();
        assert_eq!(reply.text(), Some("ok"));
    }

    #[test]
    fn test_parse_reply_html_on_success_is_bad() {
        let result = parse_reply(StatusCode::OK, "<html></html>");
        assert!(matches!(result, Err(ApiError::BadResponse(_))));
    }

    #[test]
    fn test_rejection_falls_back_to_reason() {
        let error = rejection(StatusCode::NOT_FOUND, None);
        assert_eq!(error.to_string(), "Not Found");
        assert_eq!(error.status(), Some(404));
    }

    #[test]
    fn test_cookies_sent_and_absorbed() {
        let (base_url, server) = serve(vec![
            json(200, r#"{"message": "hi"}"#).with_header("Set-Cookie", "session=fresh; Path=/"),
        ]);

        let mut session = Session::default();
        session.absorb_set_cookie("session=stale");
        let mut client = client(&base_url, session);

        let reply = client.send_for_reply(client.get("/ping")).unwrap();
        assert_eq!(reply.text(), Some("hi"));
        assert_eq!(client.session().cookies, vec!["session=fresh".to_string()]);

        let requests = server.join().unwrap();
        let request = requests[0].to_ascii_lowercase();
        assert!(request.starts_with("get /ping http/1.1"));
        assert!(request.contains("cookie: session=stale"));
    }

    #[test]
    fn test_unreachable_server() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let mut client = client(&base_url, Session::default());
        let result = client.send_for_reply(client.get("/posts"));
        assert!(matches!(result, Err(ApiError::Unreachable { .. })));
    }
}
