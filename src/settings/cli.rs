use crate::domain_model::{Gender, Role};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "user-directory", about = "Manage users of the user directory")]
pub struct Cli {
    #[arg(long)]
    pub settings: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a user and its login credential
    Create {
        #[arg(long)]
        username: String,
        #[arg(long)]
        role: Role,
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Show an active user
    Read { username: String },
    /// List active users by first name
    List,
    /// Fail unless an active user holds the username
    Check { username: String },
    /// Replace a user's profile; id, username and role are kept
    Update {
        username: String,
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Soft-delete a user that owns no open projects or tasks
    Delete { username: String },
    /// Look up a role by description
    Role { description: String },
}

#[derive(Args, Debug)]
pub struct ProfileArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub gender: Gender,
    #[arg(long, env = "USER_DIRECTORY_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}
