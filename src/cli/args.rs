// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to the configuration file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List notes with ID, name, first description line and image URL
    List {
        /// Output notes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a note, optionally with an image
    Create {
        /// Note name
        #[arg(short, long)]
        name: String,

        /// Note description
        #[arg(short, long)]
        description: String,

        /// Image file to upload and attach
        #[arg(short, long, value_name = "PATH")]
        image: Option<PathBuf>,
    },

    /// Delete a note
    Delete {
        /// Note ID to delete
        #[arg(value_name = "NOTE_ID")]
        note_id: String,
    },

    /// Upload an image and print its storage key
    Upload {
        /// Image file
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Render the note board as HTML and open it in the browser
    View {
        /// Write the HTML to this file instead of opening the browser
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Write a default configuration file
    InitConfig {
        /// Target path (defaults to the platform config directory)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },
}
