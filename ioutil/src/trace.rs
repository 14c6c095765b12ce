//! Process-boundary failure reporting.
//!
//! Errors travel up the stack as values; only the entry point turns them into
//! a log line and an exit status. Panics are logged by a hook and then
//! handed to whatever hook was installed before, so nothing is swallowed.

use std::any::Any;
use std::backtrace::Backtrace;
use std::panic;
use std::process::ExitCode;

use log::error;

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}

/// Logs every panic (message, location, backtrace) through `log::error!`
/// before chaining to the previously installed hook.
pub fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "<unknown>".to_string());
        error!(
            "Fatal error at {}: {}\n{}",
            location,
            panic_message(info.payload()),
            Backtrace::force_capture()
        );
        previous(info);
    }));
}

/// Converts the outcome of a whole program run into its exit status,
/// logging the full error chain on failure.
pub fn exit_status(result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
