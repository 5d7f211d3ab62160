//! The consumer's message callback.
//!
//! Every delivered message is written to standard output on its own line,
//! prefixed with [`RECEIVED_PREFIX`].

use std::io::{self, Write};

use anyhow::{Context, Result};

use crate::queue::TextMessage;

/// Label printed in front of every received payload.
pub const RECEIVED_PREFIX: &str = "Received message: ";

/// The line printed for `message`, without the trailing newline.
pub fn format_received(message: &TextMessage) -> String {
    format!("{}{}", RECEIVED_PREFIX, message.payload)
}

/// Write the received line for `message` to `out`.
pub fn write_received<W: Write>(out: &mut W, message: &TextMessage) -> io::Result<()> {
    writeln!(out, "{}", format_received(message))?;
    out.flush()
}

/// Print `message` to standard output.
pub fn print_message(message: &TextMessage) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_received(&mut handle, message).context("Failed to write message to stdout")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_received() {
        let message = TextMessage::new("Hello World!");
        assert_eq!(format_received(&message), "Received message: Hello World!");
    }

    #[test]
    fn test_write_received_is_verbatim() {
        let mut out = Vec::new();
        write_received(&mut out, &TextMessage::new("  spaced\ttext ")).unwrap();
        assert_eq!(out, b"Received message:   spaced\ttext \n");
    }

    #[test]
    fn test_write_received_one_line_per_message() {
        let mut out = Vec::new();
        write_received(&mut out, &TextMessage::new("first")).unwrap();
        write_received(&mut out, &TextMessage::new("first")).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text.lines().collect::<Vec<_>>(),
            vec!["Received message: first", "Received message: first"]
        );
    }

    #[test]
    fn test_print_message() {
        assert!(print_message(&TextMessage::new("")).is_ok());
    }
}
