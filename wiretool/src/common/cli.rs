use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Write one length-prefixed string record
    EncodeString {
        #[arg(long)]
        text: String,

        #[arg(long)]
        out: PathBuf,
    },
    /// Read one length-prefixed string record
    DecodeString {
        #[arg(long)]
        input: PathBuf,
    },
    /// Write one timestamp record (epoch seconds + zone name)
    EncodeTime {
        #[arg(long)]
        epoch: u64,

        /// IANA zone name. Unknown names are written anyway and rejected on decode.
        #[arg(long, default_value = "UTC")]
        zone: String,

        #[arg(long)]
        out: PathBuf,
    },
    /// Read one timestamp record
    DecodeTime {
        #[arg(long)]
        input: PathBuf,

        /// Also print local midnight of the decoded day
        #[arg(long, default_value_t = false)]
        begin_of_day: bool,
    },
}

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Write and inspect big-endian codec records")]
pub struct WireCli {
    #[command(subcommand)]
    pub command: Command,

    /// Default log filter, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
