use crate::config::APP_NAME;
use serde::{Deserialize, Serialize};

const SESSION_NAME: &str = "session";

/// Cookies and identity remembered between invocations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub cookies: Vec<String>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub user_id: Option<String>,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        !self.cookies.is_empty()
    }

    /// Value for a `Cookie` request header, if any cookies are held.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            None
        } else {
            Some(self.cookies.join("; "))
        }
    }

    /// Keeps the `name=value` part of a `Set-Cookie` header, replacing any
    /// cookie with the same name. An empty value or a non-positive
    /// `Max-Age` drops the cookie instead.
    pub fn absorb_set_cookie(&mut self, header: &str) {
        let mut parts = header.split(';').map(str::trim);
        let Some(pair) = parts.next() else {
            return;
        };
        let Some((name, value)) = pair.split_once('=') else {
            return;
        };

        self.cookies
            .retain(|c| c.split_once('=').map(|(n, _)| n) != Some(name));

        let expired = value.is_empty()
            || parts.any(|attr| {
                attr.split_once('=').is_some_and(|(key, age)| {
                    key.trim().eq_ignore_ascii_case("max-age")
                        && age.trim().parse::<i64>().is_ok_and(|age| age <= 0)
                })
            });

        if !expired {
            self.cookies.push(pair.to_string());
        }
    }
}

pub fn load() -> miette::Result<Session> {
    confy::load(APP_NAME, Some(SESSION_NAME))
        .map_err(|e| miette::miette!("Failed to load session: {}", e))
}

pub fn store(session: &Session) -> miette::Result<()> {
    confy::store(APP_NAME, Some(SESSION_NAME), session)
        .map_err(|e| miette::miette!("Failed to save session: {}", e))
}
