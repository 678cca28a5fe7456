//! Best-effort JSON syntax repair for model output.
//!
//! A single left-to-right pass that re-emits the input as compact JSON,
//! fixing the mistakes models actually make:
//!
//! - trailing and duplicated commas, missing commas between members
//! - unquoted keys, single-quoted or curly-quoted strings
//! - unescaped inner quotes, raw newlines and stray backslashes (LaTeX) in strings
//! - `//` and `/* */` comments
//! - Python/JS literals (`True`, `False`, `None`, `undefined`, `NaN`)
//! - unterminated strings, missing values, unbalanced brackets
//!
//! Field names and values are never rewritten beyond quoting and escaping.
//! The pass stops after the first complete top-level value.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepairError {
    #[error("nothing to repair: input is empty")]
    Empty,
    #[error("no JSON value found in input")]
    NoValue,
}

/// Repair `input` into syntactically valid JSON text.
///
/// The output still has to be parsed and validated by the caller; repair
/// guarantees syntax only on a best-effort basis.
pub fn repair_json(input: &str) -> Result<String, RepairError> {
    let text = input.trim();
    if text.is_empty() {
        return Err(RepairError::Empty);
    }

    let mut repairer = Repairer::new(text);
    repairer.run();

    if repairer.out.is_empty() {
        return Err(RepairError::NoValue);
    }
    Ok(repairer.out)
}

// ─────────────────────────────────────────────
// State machine
// ─────────────────────────────────────────────

/// What an open container expects next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Expect {
    /// Object: a key (after `{` or `,`).
    Key,
    /// Object: the `:` after a key.
    Colon,
    /// Object value after `:`, or any array element.
    Value,
    /// A `,` or the closing bracket.
    Comma,
}

#[derive(Debug)]
struct Frame {
    closer: char,
    expect: Expect,
}

impl Frame {
    fn is_object(&self) -> bool {
        self.closer == '}'
    }
}

struct Repairer {
    chars: Vec<char>,
    pos: usize,
    out: String,
    stack: Vec<Frame>,
    done: bool,
}

impl Repairer {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            out: String::with_capacity(text.len() + 16),
            stack: Vec::new(),
            done: false,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn run(&mut self) {
        while !self.done {
            self.skip_whitespace_and_comments();
            let Some(c) = self.peek() else {
                break;
            };

            match c {
                '{' | '[' => {
                    self.pos += 1;
                    self.open(c);
                }
                '}' | ']' => {
                    self.pos += 1;
                    self.close(c);
                }
                ',' => {
                    self.pos += 1;
                    self.comma();
                }
                ':' => {
                    self.pos += 1;
                    self.colon();
                }
                '"' | '\'' | '\u{201C}' | '\u{2018}' => {
                    self.pos += 1;
                    let in_key = self.in_key_position();
                    let text = self.read_string(closing_quote(c), in_key);
                    self.emit_item(&text);
                }
                _ => {
                    let in_key = self.in_key_position();
                    let token = self.read_bare_token(in_key);
                    if token.is_empty() {
                        // A delimiter we don't otherwise handle; drop it.
                        self.pos += 1;
                        continue;
                    }
                    let rendered = if in_key {
                        quote(&token)
                    } else {
                        render_bare_value(&token)
                    };
                    self.emit_item(&rendered);
                }
            }
        }

        while !self.stack.is_empty() {
            self.close_top();
        }
    }

    // ── Structure ──

    /// Whether the next item in the current frame will be an object key.
    fn in_key_position(&self) -> bool {
        matches!(
            self.stack.last(),
            Some(f) if f.is_object() && matches!(f.expect, Expect::Key | Expect::Comma)
        )
    }

    /// Write the separators the current frame is missing before an item and
    /// advance its state.
    fn before_item(&mut self) {
        let Some(frame) = self.stack.last_mut() else {
            return;
        };
        let object = frame.is_object();
        match (object, frame.expect) {
            (true, Expect::Key) => frame.expect = Expect::Colon,
            (true, Expect::Colon) => {
                self.out.push(':');
                frame.expect = Expect::Comma;
            }
            (true, Expect::Comma) => {
                self.out.push(',');
                frame.expect = Expect::Colon;
            }
            (_, Expect::Value) => frame.expect = Expect::Comma,
            (false, Expect::Comma) => {
                self.out.push(',');
            }
            (false, _) => frame.expect = Expect::Comma,
        }
    }

    fn emit_item(&mut self, rendered: &str) {
        self.before_item();
        self.out.push_str(rendered);
        if self.stack.is_empty() {
            self.done = true;
        }
    }

    fn open(&mut self, c: char) {
        // A container can't be a key; treat it as the missing value of an
        // empty key rather than losing its contents.
        if self.in_key_position() {
            self.before_item();
            self.out.push_str("\"\"");
        }
        self.before_item();
        self.out.push(c);
        let (closer, expect) = if c == '{' {
            ('}', Expect::Key)
        } else {
            (']', Expect::Value)
        };
        self.stack.push(Frame { closer, expect });
    }

    fn close(&mut self, c: char) {
        if !self.stack.iter().any(|f| f.closer == c) {
            // Stray closer with no matching opener.
            return;
        }
        while let Some(top) = self.stack.last() {
            let matched = top.closer == c;
            self.close_top();
            if matched {
                break;
            }
        }
    }

    /// Close the innermost frame, patching a dangling key or comma.
    fn close_top(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        match frame.expect {
            Expect::Colon => self.out.push_str(":null"),
            Expect::Value if frame.is_object() => self.out.push_str("null"),
            _ => {
                if self.out.ends_with(',') {
                    self.out.pop();
                }
            }
        }
        self.out.push(frame.closer);
        if self.stack.is_empty() {
            self.done = true;
        }
    }

    fn comma(&mut self) {
        if let Some(frame) = self.stack.last_mut() {
            if frame.expect == Expect::Comma {
                self.out.push(',');
                frame.expect = if frame.is_object() {
                    Expect::Key
                } else {
                    Expect::Value
                };
            }
        }
    }

    fn colon(&mut self) {
        if let Some(frame) = self.stack.last_mut() {
            if frame.is_object() && frame.expect == Expect::Colon {
                self.out.push(':');
                frame.expect = Expect::Value;
            }
        }
    }

    // ── Lexing ──

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match (self.peek(), self.peek_at(1)) {
                (Some(c), _) if c.is_whitespace() => self.pos += 1,
                (Some('/'), Some('/')) => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.pos += 1;
                    }
                }
                (Some('/'), Some('*')) => {
                    self.pos += 2;
                    while let Some(c) = self.peek() {
                        if c == '*' && self.peek_at(1) == Some('/') {
                            self.pos += 2;
                            break;
                        }
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
    }

    /// Read a string body after its opening quote and return it as a
    /// double-quoted JSON string literal.
    fn read_string(&mut self, closer: char, in_key: bool) -> String {
        let mut s = String::from('"');

        while let Some(c) = self.peek() {
            self.pos += 1;

            if c == closer && self.closes_string(in_key) {
                s.push('"');
                return s;
            }

            match c {
                '\\' => self.read_escape(&mut s, closer),
                '"' => s.push_str("\\\""),
                _ => push_escaped(&mut s, c),
            }
        }

        // Unterminated: close at end of input.
        s.push('"');
        s
    }

    /// A quote only closes the string when what follows can come after a
    /// string; otherwise it's an unescaped quote inside the text.
    fn closes_string(&self, in_key: bool) -> bool {
        let mut i = self.pos;
        while let Some(c) = self.chars.get(i) {
            if !c.is_whitespace() {
                return match c {
                    ',' | '}' | ']' | '"' | '\'' => true,
                    ':' => in_key || self.stack.last().is_some_and(Frame::is_object),
                    '/' => matches!(self.chars.get(i + 1), Some('/') | Some('*')),
                    _ => false,
                };
            }
            i += 1;
        }
        true
    }

    fn read_escape(&mut self, s: &mut String, closer: char) {
        let Some(next) = self.peek() else {
            s.push_str("\\\\");
            return;
        };

        match next {
            '"' => {
                self.pos += 1;
                s.push_str("\\\"");
            }
            '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't' => {
                self.pos += 1;
                s.push('\\');
                s.push(next);
            }
            'u' if self.has_hex_escape() => {
                self.pos += 1;
                s.push_str("\\u");
                for _ in 0..4 {
                    if let Some(h) = self.peek() {
                        s.push(h);
                        self.pos += 1;
                    }
                }
            }
            c if c == closer => {
                self.pos += 1;
                push_escaped(s, c);
            }
            // LaTeX and other stray backslashes stay literal.
            _ => s.push_str("\\\\"),
        }
    }

    fn has_hex_escape(&self) -> bool {
        (1..=4).all(|i| self.peek_at(i).is_some_and(|h| h.is_ascii_hexdigit()))
    }

    /// Read an unquoted run up to the next structural delimiter.
    fn read_bare_token(&mut self, in_key: bool) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            let stop = match c {
                ',' | '}' | ']' | '{' | '[' | '\n' | '\r' => true,
                ':' => in_key,
                '"' => true,
                _ => false,
            };
            if stop {
                break;
            }
            self.pos += 1;
        }
        self.chars[start..self.pos]
            .iter()
            .collect::<String>()
            .trim()
            .to_string()
    }
}

// ─────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────

fn closing_quote(open: char) -> char {
    match open {
        '\u{201C}' => '\u{201D}',
        '\u{2018}' => '\u{2019}',
        other => other,
    }
}

fn push_escaped(s: &mut String, c: char) {
    match c {
        '"' => s.push_str("\\\""),
        '\n' => s.push_str("\\n"),
        '\r' => s.push_str("\\r"),
        '\t' => s.push_str("\\t"),
        c if (c as u32) < 0x20 => s.push_str(&format!("\\u{:04x}", c as u32)),
        c => s.push(c),
    }
}

fn quote(token: &str) -> String {
    let mut s = String::from('"');
    for c in token.chars() {
        match c {
            '\\' => s.push_str("\\\\"),
            c => push_escaped(&mut s, c),
        }
    }
    s.push('"');
    s
}

/// Literals and numbers pass through; anything else becomes a string.
fn render_bare_value(token: &str) -> String {
    match token {
        "true" | "false" | "null" => token.to_string(),
        "True" => "true".to_string(),
        "False" => "false".to_string(),
        "None" | "undefined" | "NaN" => "null".to_string(),
        _ if serde_json::from_str::<serde_json::Number>(token).is_ok() => token.to_string(),
        _ => quote(token),
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
