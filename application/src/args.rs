//! [`Args`] definitions.

use clap::{Parser, Subcommand};
use service::domain::user;

/// Command line client of the social feed.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// [`Command`] to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Command to run against the remote API.
#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Shows a user profile with its posts.
    Profile {
        /// Name of the user to show.
        username: user::Username,

        /// Number of post pages to load.
        #[arg(short, long, default_value_t = 1)]
        pages: u32,

        /// Also list the accounts the user follows.
        #[arg(short, long)]
        following: bool,
    },

    /// Lists the accounts a user follows.
    Following {
        /// Name of the user whose subscriptions to list.
        username: user::Username,
    },

    /// Lists the posts liked by the signed-in user.
    Favorites {
        /// Number of pages to load.
        #[arg(short, long, default_value_t = 1)]
        pages: u32,
    },

    /// Follows a user on behalf of the signed-in one.
    Follow {
        /// Name of the user to follow.
        username: user::Username,
    },

    /// Unfollows a user on behalf of the signed-in one.
    Unfollow {
        /// Name of the user to unfollow.
        username: user::Username,
    },
}
