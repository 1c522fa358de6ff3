use super::{Context, resolve_post};
use crate::api::posts;
use crate::time;
use chrono::Utc;
use miette::Result;

pub fn run(ctx: &mut Context, reference: String) -> Result<()> {
    let post_id = resolve_post(&mut ctx.client, &reference)?;
    let outcome = posts::get(&mut ctx.client, &post_id);
    let post = ctx.keep_session(outcome)?;

    let posted = time::label_for(&post.created_at, Utc::now(), &ctx.config.date_format)
        .unwrap_or_else(|_| post.created_at.clone());

    println!("{}", post.title);
    println!();
    println!("{}", post.content);
    println!();
    println!("author: {}", post.author_id);
    println!("posted: {}", posted);
    println!("likes:  {}", post.likes_count);
    println!("id:     {}", post.id);

    Ok(())
}
