//! Line-oriented console: prompt on the output stream, read one line of input.

use std::io::{self, BufRead, Stderr, StdinLock, Stdout, Write};

/// Input line that ends either loop.
pub const QUIT: &str = "quit";

/// Input, output and error streams of one interactive session.
pub struct Console<R, W, E> {
    input: R,
    out: W,
    err: E,
}

impl Console<StdinLock<'static>, Stdout, Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout(), io::stderr())
    }
}

impl<R: BufRead, W: Write, E: Write> Console<R, W, E> {
    pub fn new(input: R, out: W, err: E) -> Self {
        Self { input, out, err }
    }

    /// Print `text` (no newline), then read one line without its terminator.
    /// Returns `None` at end of input.
    pub fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn err(&mut self) -> &mut E {
        &mut self.err
    }

    pub fn into_parts(self) -> (R, W, E) {
        (self.input, self.out, self.err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn prompt_strips_line_terminators_and_reports_eof() {
        let mut console = Console::new(Cursor::new("first\r\nsecond\nlast"), Vec::new(), Vec::new());
        assert_eq!(console.prompt("> ").unwrap().as_deref(), Some("first"));
        assert_eq!(console.prompt("> ").unwrap().as_deref(), Some("second"));
        assert_eq!(console.prompt("> ").unwrap().as_deref(), Some("last"));
        assert_eq!(console.prompt("> ").unwrap(), None);
        let (_, out, _) = console.into_parts();
        assert_eq!(String::from_utf8(out).unwrap(), "> > > > ");
    }

    #[test]
    fn empty_line_is_not_eof() {
        let mut console = Console::new(Cursor::new("\n"), Vec::new(), Vec::new());
        assert_eq!(console.prompt("").unwrap().as_deref(), Some(""));
        assert_eq!(console.prompt("").unwrap(), None);
    }
}
