use crate::api::posts::Post;
use crate::api::{self, ApiError, Reply};
use crate::refresh::{self, TimeLabel};
use chrono::{DateTime, Utc};

/// What the feed needs from the server.
pub trait FeedBackend {
    fn load(&mut self) -> Result<Vec<Post>, ApiError>;
    fn toggle_like(&mut self, post_id: &str) -> Result<u64, ApiError>;
    fn delete(&mut self, post_id: &str) -> Result<Reply, ApiError>;
}

impl FeedBackend for api::Client {
    fn load(&mut self) -> Result<Vec<Post>, ApiError> {
        api::posts::list(self)
    }

    fn toggle_like(&mut self, post_id: &str) -> Result<u64, ApiError> {
        api::likes::toggle(self, post_id)
    }

    fn delete(&mut self, post_id: &str) -> Result<Reply, ApiError> {
        api::posts::delete(self, post_id)
    }
}

#[derive(Debug, Clone)]
pub struct FeedRow {
    pub post: Post,
    pub time_relative: String,
}

impl TimeLabel for FeedRow {
    fn timestamp(&self) -> &str {
        &self.post.created_at
    }

    fn set_label(&mut self, label: String) {
        self.time_relative = label;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Info(String),
    Error(String),
}

pub struct Feed {
    rows: Vec<FeedRow>,
    selected: usize,
    status: Option<Status>,
    date_format: String,
}

impl Feed {
    pub fn new(posts: Vec<Post>, date_format: &str, now: DateTime<Utc>) -> Self {
        let mut feed = Self {
            rows: Vec::new(),
            selected: 0,
            status: None,
            date_format: date_format.to_string(),
        };
        feed.replace(posts, now);
        feed
    }

    pub fn rows(&self) -> &[FeedRow] {
        &self.rows
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&FeedRow> {
        self.rows.get(self.selected)
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = Some(status);
    }

    pub fn refresh_labels(&mut self, now: DateTime<Utc>) -> usize {
        refresh::refresh_labels(&mut self.rows, now, &self.date_format)
    }

    /// Swaps in a fresh post list, keeping the cursor on the same post when
    /// it survived.
    pub fn replace(&mut self, posts: Vec<Post>, now: DateTime<Utc>) {
        let selected_id = self.selected().map(|row| row.post.id.clone());

        self.rows = posts
            .into_iter()
            .map(|post| FeedRow {
                post,
                time_relative: String::new(),
            })
            .collect();

        self.selected = selected_id
            .and_then(|id| self.rows.iter().position(|row| row.post.id == id))
            .unwrap_or(self.selected)
            .min(self.rows.len().saturating_sub(1));

        self.refresh_labels(now);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.rows.len() {
            self.selected += 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.rows.len().saturating_sub(1);
    }

    /// Flips the like on the selected post in place. A failed request is
    /// only logged and the row stays as it was.
    pub fn toggle_like(&mut self, backend: &mut impl FeedBackend) {
        let Some(row) = self.rows.get_mut(self.selected) else {
            return;
        };

        match backend.toggle_like(&row.post.id) {
            Ok(likes_count) => {
                row.post.liked = !row.post.liked;
                row.post.likes_count = likes_count;
            }
            Err(e) => log::error!(
                "like on post {} failed (status {:?}): {}",
                row.post.id,
                e.status(),
                e
            ),
        }
    }

    /// Deletes the selected post, reports the outcome and reloads the feed
    /// whatever the outcome was.
    pub fn delete_selected(&mut self, backend: &mut impl FeedBackend, now: DateTime<Utc>) {
        let Some(post_id) = self.selected().map(|row| row.post.id.clone()) else {
            return;
        };

        let status = match backend.delete(&post_id) {
            Ok(reply) => Status::Info(reply.text().unwrap_or("Post deleted").to_string()),
            Err(e) => {
                log::error!("delete of post {} failed: {}", post_id, e);
                Status::Error(e.to_string())
            }
        };

        self.reload(backend, now);
        self.status = Some(status);
    }

    pub fn reload(&mut self, backend: &mut impl FeedBackend, now: DateTime<Utc>) {
        match backend.load() {
            Ok(posts) => self.replace(posts, now),
            Err(e) => {
                log::error!("feed reload failed: {}", e);
                self.status = Some(Status::Error(e.to_string()));
            }
        }
    }
}
