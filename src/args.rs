use crate::commands::{self, Context};
use clap::{Parser, Subcommand};
use miette::Result;

#[derive(Parser)]
#[command(name = "pb", about = "postboard - the feed in your terminal", version)]
pub struct Cli {
    /// Server to talk to (overrides 'base_url' from the config)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Log requests to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account
    #[command(alias = "reg")]
    Register {
        username: String,
        email: String,

        /// Prompted for if omitted
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Log in and remember the session
    #[command(alias = "in")]
    Login {
        username: String,

        /// Prompted for if omitted
        #[arg(short, long)]
        password: Option<String>,
    },

    /// End the current session
    #[command(alias = "out")]
    Logout,

    /// Publish a new post
    #[command(alias = "p")]
    Post {
        /// Post text
        #[arg(required = true)]
        content: Vec<String>,

        /// Title (defaults to the first line of the text)
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Change the title or text of a post
    Edit {
        /// Post id, id prefix or title
        post: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        content: Option<String>,
    },

    /// Delete a post
    #[command(alias = "rm")]
    Delete {
        /// Post id, id prefix or title
        post: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Like or unlike a post
    #[command(alias = "l")]
    Like {
        /// Post id, id prefix or title
        post: String,
    },

    /// Show a single post
    Show {
        /// Post id, id prefix or title
        post: String,
    },

    /// Browse the feed
    #[command(alias = "f")]
    Feed {
        /// Print the feed once instead of opening the viewer
        #[arg(long)]
        plain: bool,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let mut ctx = Context::open(self.base_url.as_deref())?;

        match self.command {
            Commands::Register {
                username,
                email,
                password,
            } => commands::register::run(&mut ctx, username, email, password),
            Commands::Login { username, password } => {
                commands::login::run(&mut ctx, username, password)
            }
            Commands::Logout => commands::logout::run(&mut ctx),
            Commands::Post { content, title } => commands::post::run(&mut ctx, content, title),
            Commands::Edit {
                post,
                title,
                content,
            } => commands::edit::run(&mut ctx, post, title, content),
            Commands::Delete { post, yes } => commands::delete::run(&mut ctx, post, yes),
            Commands::Like { post } => commands::like::run(&mut ctx, post),
            Commands::Show { post } => commands::show::run(&mut ctx, post),
            Commands::Feed { plain } => commands::feed::run(&mut ctx, plain),
        }
    }
}
