// Command-line front end for the codec.
// 4 sub-commands
// - encode-string / decode-string
// - encode-time / decode-time (optionally with the decoded day's local midnight)
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use ioutil::trace;
use log::info;
use wiretool::common::cli::{Command, WireCli};
use wiretool::common::{commands, utils};

fn run(args: WireCli) -> Result<()> {
    match args.command {
        Command::EncodeString { text, out } => {
            let size = commands::encode_string(&text, &out)?;
            println!("{} bytes", size);
        }
        Command::DecodeString { input } => {
            let decoded = commands::decode_string(&input)?;
            println!("{:?} ({} bytes)", decoded.value, decoded.consumed);
        }
        Command::EncodeTime { epoch, zone, out } => {
            let size = commands::encode_time(epoch, &zone, &out)?;
            println!("{} bytes", size);
        }
        Command::DecodeTime {
            input,
            begin_of_day,
        } => {
            let decoded = commands::decode_time(&input)?;
            println!(
                "{} [{}] ({} bytes)",
                decoded.value.to_rfc3339(),
                decoded.value.timezone().name(),
                decoded.consumed
            );
            if begin_of_day {
                println!("{}", commands::day_start(&decoded.value)?.to_rfc3339());
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = WireCli::parse();
    utils::init_logging(&args.log_level);
    trace::install_panic_hook();
    info!("Running {:?}", args.command);
    trace::exit_status(run(args))
}
