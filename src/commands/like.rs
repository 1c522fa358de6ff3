use super::{Context, resolve_post};
use crate::api::likes;
use miette::Result;

pub fn run(ctx: &mut Context, reference: String) -> Result<()> {
    let post_id = resolve_post(&mut ctx.client, &reference)?;
    let outcome = likes::toggle(&mut ctx.client, &post_id);
    let likes_count = ctx.keep_session(outcome)?;

    println!("{} like(s) on {}", likes_count, post_id);
    Ok(())
}
