use super::{Context, read_line};
use crate::api::auth::{self, Registration};
use miette::Result;

pub fn run(ctx: &mut Context, username: String, email: String, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => read_line("Password: ")?,
    };

    let outcome = auth::register(
        &mut ctx.client,
        Registration {
            username: &username,
            email: &email,
            password: &password,
        },
    );
    let reply = ctx.keep_session(outcome)?;

    println!("{}", reply.text().unwrap_or("Registered"));

    Ok(())
}
