use super::Context;
use crate::api::auth;
use miette::Result;

pub fn run(ctx: &mut Context) -> Result<()> {
    if !ctx.client.session().is_logged_in() {
        println!("Not logged in.");
        return Ok(());
    }

    let outcome = auth::logout(&mut ctx.client);
    ctx.keep_session(outcome)?;
    println!("Logged out");

    Ok(())
}
