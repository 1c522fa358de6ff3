use super::Context;
use crate::api::posts;
use crate::feed::Feed;
use crate::ui;
use chrono::Utc;
use miette::Result;

pub fn run(ctx: &mut Context, plain: bool) -> Result<()> {
    let posts = posts::list(&mut ctx.client)?;
    let mut feed = Feed::new(posts, &ctx.config.date_format, Utc::now());

    if plain {
        print_plain(&feed);
        return ctx.save_session();
    }

    let mut terminal = ui::terminal::setup_terminal()?;
    let result = ui::feed_viewer::run(
        &mut terminal,
        &mut feed,
        &mut ctx.client,
        ctx.config.refresh_interval(),
    );
    ui::terminal::restore_terminal(terminal)?;
    result?;

    ctx.save_session()
}

fn print_plain(feed: &Feed) {
    if feed.rows().is_empty() {
        println!("No posts yet.");
        return;
    }

    for row in feed.rows() {
        let heart = if row.post.liked { "♥" } else { " " };
        println!(
            "{} {:>3}  {}  {} ({})",
            heart, row.post.likes_count, row.post.id, row.post.title, row.time_relative
        );
    }
}
