use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(
    name = "rently",
    bin_name = "rently",
    version,
    about = "Browse and manage rental property listings from the terminal",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Viewport width in pixels, for responsive page sizing
    #[arg(short, long, global = true, help_heading = "Options")]
    pub width: Option<i32>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in as a user (the account is created on first login)
    Login {
        email: String,
        /// Display name; defaults to the email's local part
        #[arg(long)]
        name: Option<String>,
    },
    /// Sign out
    Logout,
    /// List property listings
    List {
        /// Filter by a search term (name, description, amenities, type, location)
        #[arg(short, long)]
        search: Option<String>,
        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: i64,
    },
    /// Show the featured listings carousel
    Featured,
    /// Show one listing in full
    View { id: Uuid },
    /// List listings you own
    Mine,
    /// Add a listing from a JSON form file
    Add {
        /// Path to the property form (JSON)
        #[arg(long)]
        file: PathBuf,
        /// Image file to upload; repeat for more
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },
    /// Update a listing you own from a JSON form file
    Update {
        id: Uuid,
        /// Path to the property form (JSON)
        #[arg(long)]
        file: PathBuf,
    },
    /// Delete a listing you own
    Delete { id: Uuid },
    /// Toggle a listing in your favorites
    Favorite { id: Uuid },
    /// List your favorite listings
    Favorites,
    /// Send a message to a listing's owner
    Contact {
        id: Uuid,
        /// Message body
        #[arg(short, long)]
        body: String,
        /// Callback phone number
        #[arg(long)]
        phone: Option<String>,
    },
    /// Your inbox
    Messages {
        #[command(subcommand)]
        action: Option<MessageAction>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MessageAction {
    /// List received messages, unread first
    List,
    /// Show the unread-message count
    Unread,
    /// Toggle a message between read and unread
    Read { id: Uuid },
    /// Delete a message
    Delete { id: Uuid },
}
