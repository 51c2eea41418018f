//! Block-structured configuration format shared by level and config files
//!
//! ```text
//! # comment
//! stage_length 120
//! keys {
//!     up w 2
//! }
//! ```
//!
//! A directive is a name followed by whitespace separated parameters and an
//! optional `{ ... }` child block. Words are bare atoms or quoted strings.

use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ScfgError {
    #[error("line {line}: unexpected '{ch}' in atom")]
    UnexpectedInAtom { line: usize, ch: char },
    #[error("line {line}: unterminated {kind}-quoted string")]
    UnterminatedString { line: usize, kind: &'static str },
    #[error("line {line}: can't escape newline in double-quoted string")]
    EscapedNewline { line: usize },
    #[error("line {line}: unexpected '}}'")]
    UnexpectedClose { line: usize },
    #[error("line {line}: expected '}}'")]
    MissingClose { line: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A sequence of directives
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    pub name: String,
    pub params: Vec<String>,
    pub children: Block,
    /// 1-based line the directive starts on
    pub line: usize,
}

impl Block {
    /// Directives with the given name, in file order
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Directive> + 'a {
        self.directives.iter().filter(move |d| d.name == name)
    }
}

/// Read and parse a file
pub fn load_file(path: impl AsRef<Path>) -> Result<Block, ScfgError> {
    let text = std::fs::read_to_string(path)?;
    parse(&text)
}

/// Parse a complete document
pub fn parse(text: &str) -> Result<Block, ScfgError> {
    let mut parser = Parser {
        chars: text.chars().peekable(),
        line: 1,
    };
    let (block, closed) = parser.read_block()?;
    if closed {
        return Err(ScfgError::UnexpectedClose { line: parser.line });
    }
    Ok(block)
}

struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl Parser<'_> {
    fn next(&mut self) -> Option<char> {
        let ch = self.chars.next();
        if ch == Some('\n') {
            self.line += 1;
        }
        ch
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\r')) {
            self.next();
        }
    }

    fn skip_line(&mut self) {
        while let Some(ch) = self.next() {
            if ch == '\n' {
                return;
            }
        }
    }

    /// Returns the block and whether it ended on a closing brace
    fn read_block(&mut self) -> Result<(Block, bool), ScfgError> {
        let mut block = Block::default();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Ok((block, false)),
                Some('\n') => {
                    self.next();
                }
                Some('#') => self.skip_line(),
                Some('}') => {
                    self.next();
                    return Ok((block, true));
                }
                Some(_) => block.directives.push(self.read_directive()?),
            }
        }
    }

    fn read_directive(&mut self) -> Result<Directive, ScfgError> {
        let line = self.line;
        let name = self.read_word()?;
        let mut params = Vec::new();
        let mut children = Block::default();
        self.skip_whitespace();

        loop {
            match self.peek() {
                None => break,
                Some('\n') => {
                    self.next();
                    break;
                }
                Some('{') => {
                    self.next();
                    let (block, closed) = self.read_block()?;
                    if !closed {
                        return Err(ScfgError::MissingClose { line: self.line });
                    }
                    children = block;
                    break;
                }
                Some('}') => return Err(ScfgError::UnexpectedClose { line: self.line }),
                Some(_) => {
                    params.push(self.read_word()?);
                    self.skip_whitespace();
                }
            }
        }

        Ok(Directive {
            name,
            params,
            children,
            line,
        })
    }

    fn read_word(&mut self) -> Result<String, ScfgError> {
        match self.peek() {
            Some('"') => {
                self.next();
                self.read_dquote()
            }
            Some('\'') => {
                self.next();
                self.read_squote()
            }
            _ => self.read_atom(),
        }
    }

    fn read_atom(&mut self) -> Result<String, ScfgError> {
        let mut word = String::new();
        while let Some(ch) = self.peek() {
            match ch {
                ' ' | '\t' | '\r' | '\n' => break,
                '"' | '\'' | '{' | '}' => {
                    return Err(ScfgError::UnexpectedInAtom {
                        line: self.line,
                        ch,
                    });
                }
                _ => {
                    word.push(ch);
                    self.next();
                }
            }
        }
        Ok(word)
    }

    fn read_dquote(&mut self) -> Result<String, ScfgError> {
        let mut word = String::new();
        loop {
            match self.next() {
                None | Some('\n') => {
                    return Err(ScfgError::UnterminatedString {
                        line: self.line,
                        kind: "double",
                    });
                }
                Some('"') => return Ok(word),
                Some('\\') => match self.next() {
                    None => {
                        return Err(ScfgError::UnterminatedString {
                            line: self.line,
                            kind: "double",
                        });
                    }
                    Some('\n') => return Err(ScfgError::EscapedNewline { line: self.line }),
                    Some(ch) => word.push(ch),
                },
                Some(ch) => word.push(ch),
            }
        }
    }

    fn read_squote(&mut self) -> Result<String, ScfgError> {
        let mut word = String::new();
        loop {
            match self.next() {
                None | Some('\n') => {
                    return Err(ScfgError::UnterminatedString {
                        line: self.line,
                        kind: "single",
                    });
                }
                Some('\'') => return Ok(word),
                Some(ch) => word.push(ch),
            }
        }
    }
}
