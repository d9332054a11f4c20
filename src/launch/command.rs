//! Command-line preparation.

use crate::error::LaunchError;

/// Desktop-entry field codes that only make sense when a file manager
/// passes files or URLs along.
const PLACEHOLDERS: [&str; 4] = ["%f", "%F", "%u", "%U"];

/// Remove whitespace-separated placeholder tokens, keeping everything else in order.
pub fn strip_placeholders(command: &str) -> String {
    command
        .split_whitespace()
        .filter(|token| !PLACEHOLDERS.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a command line into program and arguments, honouring shell quoting.
pub fn split_command(command: &str) -> Result<(String, Vec<String>), LaunchError> {
    let Some(args) = shlex::split(command) else {
        return Err(LaunchError::Unparsable(command.to_string()));
    };

    let mut iter = args.into_iter();
    let program = iter.next().ok_or(LaunchError::EmptyCommand)?;
    Ok((program, iter.collect()))
}
