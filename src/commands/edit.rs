use super::{Context, resolve_post};
use crate::api::posts::{self, PostUpdate};
use miette::{Diagnostic, Result};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum EditError {
    #[error("Nothing to change")]
    #[diagnostic(
        code(postboard::edit::nothing_to_change),
        help("Pass --title and/or --content")
    )]
    NothingToChange,
}

pub fn run(
    ctx: &mut Context,
    reference: String,
    title: Option<String>,
    content: Option<String>,
) -> Result<()> {
    let changes = PostUpdate { title, content };
    if changes.is_empty() {
        return Err(EditError::NothingToChange.into());
    }

    let post_id = resolve_post(&mut ctx.client, &reference)?;
    let outcome = posts::update(&mut ctx.client, &post_id, changes);
    let reply = ctx.keep_session(outcome)?;

    println!("{}", reply.text().unwrap_or("Post updated"));
    Ok(())
}
