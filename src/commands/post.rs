use super::Context;
use crate::api::posts;
use miette::{Diagnostic, Result};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum PostError {
    #[error("Nothing to post")]
    #[diagnostic(
        code(postboard::post::empty),
        help("Pass the post text as arguments, e.g. pb post \"Hello there\"")
    )]
    Empty,
}

pub fn run(ctx: &mut Context, content: Vec<String>, title: Option<String>) -> Result<()> {
    let content = content.join(" ");
    if content.trim().is_empty() {
        return Err(PostError::Empty.into());
    }

    let outcome = posts::create(&mut ctx.client, &content, title.as_deref());
    let reply = ctx.keep_session(outcome)?;

    println!("{}", reply.text().unwrap_or("Post created"));
    if let Some(post_id) = reply.post_id {
        println!("  id: {}", post_id);
    }

    Ok(())
}
