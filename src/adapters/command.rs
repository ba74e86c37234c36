//! Subprocess helpers shared by command-backed adapters.

use std::process::{Command, Output};

/// Run `program` and return its output when it exits successfully.
///
/// The error string carries the command line and trimmed stderr.
pub(crate) fn run_checked(program: &str, args: &[&str]) -> Result<Output, String> {
    let output = run(program, args)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let status = output
            .status
            .code()
            .map(|code| format!("exit status {}", code))
            .unwrap_or_else(|| "terminated by signal".to_string());
        let mut message = format!("command failed ({}): {}", status, command_line(program, args));
        if !stderr.is_empty() {
            message.push_str(&format!("\nstderr:\n{}", stderr));
        }
        return Err(message);
    }

    Ok(output)
}

/// Run `program` and return its output regardless of exit status.
pub(crate) fn run(program: &str, args: &[&str]) -> Result<Output, String> {
    let mut command = Command::new(program);
    command.args(args);

    tracing::debug!(command = %command_line(program, args), "spawning");

    command
        .output()
        .map_err(|err| format!("failed to run {}: {}", command_line(program, args), err))
}

pub(crate) fn command_line(program: &str, args: &[&str]) -> String {
    if args.is_empty() { program.to_string() } else { format!("{} {}", program, args.join(" ")) }
}
