//! Line input for the protocol loop.

use std::io::BufRead;

use tracing::error;

/// Reads one line from a buffered reader, blocking until available.
///
/// The trailing line terminator is stripped; other whitespace is kept for
/// the tokenizer. Bytes that are not valid UTF-8 are replaced rather than
/// rejected so one garbled line cannot end the session.
///
/// # Returns
///
/// * `Some(String)` - The line (may be empty)
/// * `None` - EOF, or a read error (logged at error level)
///
/// # Example
///
/// ```rust,no_run
/// use std::io::{self, BufRead};
/// # use deepgreen_cli::io_utils::read_stdin_line;
///
/// let stdin = io::stdin();
/// let mut handle = stdin.lock();
/// while let Some(line) = read_stdin_line(&mut handle) {
///     println!("got: {}", line);
/// }
/// ```
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut buf = Vec::new();
    match stdin.read_until(b'\n', &mut buf) {
        Ok(0) => None, // EOF
        Ok(_) => {
            let line = String::from_utf8_lossy(&buf);
            Some(line.trim_end_matches(['\n', '\r']).to_string())
        }
        Err(e) => {
            error!(error = %e, "Failed to read input line; stopping");
            None
        }
    }
}
