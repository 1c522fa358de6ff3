use super::{Context, resolve_post};
use crate::api::posts;
use crate::ui;
use miette::Result;

pub fn run(ctx: &mut Context, reference: String, yes: bool) -> Result<()> {
    let post_id = resolve_post(&mut ctx.client, &reference)?;

    if !yes {
        let confirmed = ui::confirm::run(&format!("Delete post {}?", post_id))?;
        if !confirmed {
            println!("Cancelled");
            return Ok(());
        }
    }

    let outcome = posts::delete(&mut ctx.client, &post_id);
    let reply = ctx.keep_session(outcome)?;

    println!("{}", reply.text().unwrap_or("Post deleted"));
    Ok(())
}
