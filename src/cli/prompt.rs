use std::io::{self, BufRead, Write};

/// Hint printed before waiting for the user to end the session
pub const EXIT_HINT: &str = "Type Ctrl-D or press Enter to end";

/// Keep the session open until the user ends it.
///
/// Writes [`EXIT_HINT`] to `hint` and blocks until a line or end-of-input
/// arrives on `input`. The plot preview stays available until this returns.
///
/// # Errors
///
/// Returns an I/O error if writing the hint or reading the input fails.
pub fn wait_for_exit(mut input: impl BufRead, mut hint: impl Write) -> io::Result<()> {
    writeln!(hint, "{EXIT_HINT}")?;
    hint.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}

/// [`wait_for_exit`] on the process's stdin, with the hint on stderr
///
/// # Errors
///
/// Returns an I/O error if stdin or stderr fail.
pub fn wait_on_terminal() -> io::Result<()> {
    wait_for_exit(io::stdin().lock(), io::stderr())
}
