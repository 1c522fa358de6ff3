use super::{Context, read_line};
use crate::api::auth;
use miette::Result;

pub fn run(ctx: &mut Context, username: String, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => read_line("Password: ")?,
    };

    let outcome = auth::login(&mut ctx.client, &username, &password);
    let reply = ctx.keep_session(outcome)?;

    if !ctx.client.session().is_logged_in() {
        log::warn!("login succeeded but the server set no session cookie");
    }

    println!("{}", reply.text().unwrap_or("Logged in"));
    println!("Logged in as {} on {}", username, ctx.client.base_url());

    Ok(())
}
