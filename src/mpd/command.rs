//! Command encoding for the MPD wire protocol

use std::fmt;

/// A single protocol command: verb plus ordered string arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub verb: String,
    pub args: Vec<String>,
}

impl Command {
    pub fn new(verb: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(verb: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            verb: verb.into(),
            args,
        }
    }

    /// Render the wire form: `verb "arg one" plain ...` (no trailing newline).
    pub fn to_wire(&self) -> String {
        let mut line = self.verb.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&escape_arg(arg));
        }
        line
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

/// MPD quoting: arguments containing whitespace, quotes, or backslashes are
/// double-quoted with `\` and `"` backslash-escaped; anything else goes bare.
/// Empty arguments must still be quoted to survive tokenization.
fn escape_arg(arg: &str) -> String {
    let needs_quoting =
        arg.is_empty() || arg.chars().any(|c| c.is_whitespace() || c == '"' || c == '\\');
    if !needs_quoting {
        return arg.to_string();
    }

    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for c in arg.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
