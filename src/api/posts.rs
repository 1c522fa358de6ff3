use super::{ApiError, Client, Reply, ensure_success};
use reqwest::blocking::multipart::Form;
use serde::Deserialize;

const TITLE_MAX_CHARS: usize = 80;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author_id: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub liked: bool,
}

#[derive(Debug, Default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// First line of the content, cut to a sensible title length.
pub fn default_title(content: &str) -> String {
    let first_line = content.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let first_line = first_line.trim();

    if first_line.chars().count() > TITLE_MAX_CHARS {
        let cut: String = first_line.chars().take(TITLE_MAX_CHARS - 3).collect();
        format!("{}...", cut)
    } else {
        first_line.to_string()
    }
}

pub fn list(client: &mut Client) -> Result<Vec<Post>, ApiError> {
    let request = client.get("/posts");
    let response = ensure_success(client.send(request)?)?;

    response
        .json::<Vec<Post>>()
        .map_err(|e| ApiError::BadResponse(e.to_string()))
}

pub fn get(client: &mut Client, post_id: &str) -> Result<Post, ApiError> {
    let request = client.get(&format!("/posts/{}", post_id));
    let response = ensure_success(client.send(request)?)?;

    response
        .json::<Post>()
        .map_err(|e| ApiError::BadResponse(e.to_string()))
}

pub fn create(client: &mut Client, content: &str, title: Option<&str>) -> Result<Reply, ApiError> {
    let title = title
        .map(str::to_string)
        .unwrap_or_else(|| default_title(content));

    let mut form = Form::new()
        .text("content", content.to_string())
        .text("title", title);

    if let Some(user_id) = client.session().user_id.clone() {
        form = form.text("user_id", user_id);
    }

    let request = client.post("/posts").multipart(form);
    client.send_for_reply(request)
}

pub fn update(client: &mut Client, post_id: &str, changes: PostUpdate) -> Result<Reply, ApiError> {
    let mut form = Form::new();
    if let Some(title) = changes.title {
        form = form.text("title", title);
    }
    if let Some(content) = changes.content {
        form = form.text("content", content);
    }

    let request = client.put(&format!("/posts/{}", post_id)).multipart(form);
    client.send_for_reply(request)
}

pub fn delete(client: &mut Client, post_id: &str) -> Result<Reply, ApiError> {
    let request = client.delete(&format!("/posts/{}", post_id));
    client.send_for_reply(request)
}
