pub mod delete;
pub mod edit;
pub mod feed;
pub mod like;
pub mod login;
pub mod logout;
pub mod post;
pub mod register;
pub mod show;

use crate::api::{self, posts::Post};
use crate::{config, config::Config, session};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use miette::{Diagnostic, Result};
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum LookupError {
    #[error("No post matches: {query}")]
    #[diagnostic(
        code(postboard::lookup::no_match),
        help(
            "'{query}' matched no post id or title. Run 'pb feed --plain' to list posts with their ids."
        )
    )]
    NoMatch { query: String },

    #[error("'{query}' matches more than one post id")]
    #[diagnostic(
        code(postboard::lookup::ambiguous),
        help("Give more characters of the id.")
    )]
    Ambiguous { query: String },
}

/// Loaded config plus a client carrying the stored session.
pub struct Context {
    pub config: Config,
    pub client: api::Client,
}

impl Context {
    pub fn open(base_url: Option<&str>) -> Result<Self> {
        let config = config::load()?;
        let session = session::load()?;
        let base_url = base_url.unwrap_or(&config.base_url);
        let client = api::Client::new(base_url, config.timeout(), session)?;

        Ok(Self { config, client })
    }

    pub fn save_session(&self) -> Result<()> {
        session::store(self.client.session())
    }

    /// Stores the session whether or not the request went through, since a
    /// rejected response can still carry cookies.
    pub fn keep_session<T>(&self, outcome: std::result::Result<T, api::ApiError>) -> Result<T> {
        settle(outcome, || self.save_session())
    }
}

fn settle<T>(
    outcome: std::result::Result<T, api::ApiError>,
    save: impl FnOnce() -> Result<()>,
) -> Result<T> {
    let saved = save();
    let value = outcome?;
    saved?;
    Ok(value)
}

/// Turns a post id, id prefix or title fragment into a post id.
pub fn resolve_post(client: &mut api::Client, reference: &str) -> Result<String> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(no_match(reference).into());
    }
    if looks_like_id(reference) {
        return Ok(reference.to_string());
    }

    let posts = api::posts::list(client)?;
    let post = match_post(reference, &posts)?;
    Ok(post.id.clone())
}

fn no_match(query: &str) -> LookupError {
    LookupError::NoMatch {
        query: query.to_string(),
    }
}

fn looks_like_id(reference: &str) -> bool {
    reference.len() == 36
        && reference.char_indices().all(|(i, c)| match i {
            8 | 13 | 18 | 23 => c == '-',
            _ => c.is_ascii_hexdigit(),
        })
}

fn match_post<'a>(query: &str, posts: &'a [Post]) -> Result<&'a Post, LookupError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(no_match(query));
    }

    let by_prefix: Vec<&Post> = posts.iter().filter(|p| p.id.starts_with(query)).collect();
    match by_prefix.as_slice() {
        [post] => return Ok(*post),
        [_, _, ..] => {
            return Err(LookupError::Ambiguous {
                query: query.to_string(),
            });
        }
        [] => {}
    }

    let matcher = SkimMatcherV2::default();

    posts
        .iter()
        .filter_map(|post| {
            if post.title.eq_ignore_ascii_case(query) {
                Some((i64::MAX, post)) // exact titles win
            } else {
                matcher.fuzzy_match(&post.title, query).map(|score| (score, post))
            }
        })
        .max_by_key(|(score, _)| *score)
        .map(|(_, post)| post)
        .ok_or_else(|| no_match(query))
}

pub fn read_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush().ok();

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| miette::miette!("Failed to read input: {}", e))?;

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str, title: &str) -> Post {
        Post {
            id: id.to_string(),
            title: title.to_string(),
            content: String::new(),
            author_id: String::new(),
            created_at: String::new(),
            likes_count: 0,
            liked: false,
        }
    }

    fn posts() -> Vec<Post> {
        vec![
            post("3f2a9c1e-0000-4000-8000-000000000001", "Weekend hiking trip"),
            post("3f2b0000-0000-4000-8000-000000000002", "Lunch"),
            post("9d00aa11-0000-4000-8000-000000000003", "Release notes"),
        ]
    }

    #[test]
    fn test_looks_like_id() {
        assert!(looks_like_id("3f2a9c1e-0000-4000-8000-000000000001"));
        assert!(!looks_like_id("3f2a9c1e"));
        assert!(!looks_like_id("3f2a9c1e-0000-4000-8000-00000000000z"));
        assert!(!looks_like_id("3f2a9c1e00000-4000-8000-000000000001"));
    }

    #[test]
    fn test_match_unique_prefix() {
        let posts = posts();
        let post = match_post("9d0", &posts).unwrap();
        assert_eq!(post.title, "Release notes");
    }

    #[test]
    fn test_match_ambiguous_prefix() {
        let posts = posts();
        let result = match_post("3f2", &posts);
        assert!(matches!(result, Err(LookupError::Ambiguous { .. })));
    }

    #[test]
    fn test_match_exact_title_ignores_case() {
        let posts = posts();
        assert_eq!(match_post("LUNCH", &posts).unwrap().title, "Lunch");
    }

    #[test]
    fn test_match_fuzzy_title() {
        let posts = posts();
        assert_eq!(match_post("hiking", &posts).unwrap().title, "Weekend hiking trip");
    }

    #[test]
    fn test_blank_reference_matches_nothing() {
        let one = vec![post("9d00aa11-0000-4000-8000-000000000003", "Release notes")];
        assert!(matches!(match_post("", &one), Err(LookupError::NoMatch { .. })));
        assert!(matches!(match_post("   ", &posts()), Err(LookupError::NoMatch { .. })));
    }

    #[test]
    fn test_settle_saves_after_rejection() {
        let mut saves = 0;
        let outcome: std::result::Result<(), api::ApiError> = Err(api::ApiError::Rejected {
            status: 403,
            message: "Not your post".to_string(),
        });

        let result = settle(outcome, || {
            saves += 1;
            Ok(())
        });

        assert!(result.is_err());
        assert_eq!(saves, 1);
    }

    #[test]
    fn test_settle_reports_save_failure() {
        let result = settle(Ok(7), || Err(miette::miette!("disk full")));
        assert!(result.is_err());
        assert_eq!(settle(Ok(7), || Ok(())).unwrap(), 7);
    }

    #[test]
    fn test_match_nothing() {
        let posts = posts();
        let result = match_post("zzzz", &posts);
        assert!(matches!(result, Err(LookupError::NoMatch { query }) if query == "zzzz"));
    }
}
