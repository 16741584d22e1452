//! Comment stripping for C-like sources.
//!
//! Removes `//` line comments and `/* */` block comments from a byte
//! stream while leaving string and character literals alone. A line
//! comment keeps its terminating newline; a block comment disappears
//! entirely, including any newlines inside it.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::string::FromUtf8Error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StripError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("UTF8 conversion error")]
    Utf8(#[from] FromUtf8Error),
}

/// Byte counts and comments seen by a [`CommentStripper`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StripStats {
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub comments: u64,
}

impl StripStats {
    pub fn has_comments(&self) -> bool {
        self.comments > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    /// A `/` that may start a comment.
    Slash,
    Quoted { quote: u8, escaped: bool },
    LineComment { escaped: bool },
    BlockComment { star: bool, escaped: bool },
}

/// A push-based comment filter writing to `W`.
///
/// Input can be fed in arbitrary chunks; a comment or literal may span
/// any number of [`feed`](Self::feed) calls.
///
/// ```
/// use contig_strip::CommentStripper;
///
/// let mut stripper = CommentStripper::new(Vec::new());
/// stripper.feed(b"x = 1; /* one ").unwrap();
/// stripper.feed(b"*/ y = 2; // two\n").unwrap();
/// let (out, stats) = stripper.finish().unwrap();
/// assert_eq!(out, b"x = 1;  y = 2; \n");
/// assert_eq!(stats.comments, 2);
/// ```
pub struct CommentStripper<W: Write> {
    out: W,
    state: State,
    pending: Vec<u8>,
    stats: StripStats,
}

impl<W: Write> CommentStripper<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            state: State::Code,
            pending: Vec::new(),
            stats: StripStats::default(),
        }
    }

    pub fn stats(&self) -> StripStats {
        self.stats
    }

    /// Filters `input` and writes what survives.
    pub fn feed(&mut self, input: &[u8]) -> Result<(), StripError> {
        self.pending.clear();
        for &byte in input {
            self.step(byte);
        }
        self.stats.bytes_in += input.len() as u64;
        self.flush_pending()
    }

    /// Ends the stream and returns the writer.
    ///
    /// A trailing lone `/` is written out. An unterminated literal has
    /// already been written as is; an unterminated comment is dropped.
    pub fn finish(mut self) -> Result<(W, StripStats), StripError> {
        self.pending.clear();
        match self.state {
            State::Slash => self.pending.push(b'/'),
            State::LineComment { .. } | State::BlockComment { .. } => {
                tracing::debug!("input ended inside a comment");
            }
            State::Quoted { .. } => {
                tracing::debug!("input ended inside a quoted literal");
            }
            State::Code => {}
        }
        self.state = State::Code;
        self.flush_pending()?;
        self.out.flush()?;
        tracing::debug!(
            bytes_in = self.stats.bytes_in,
            bytes_out = self.stats.bytes_out,
            comments = self.stats.comments,
            "stripped comments"
        );
        Ok((self.out, self.stats))
    }

    fn flush_pending(&mut self) -> Result<(), StripError> {
        if !self.pending.is_empty() {
            self.out.write_all(&self.pending)?;
            self.stats.bytes_out += self.pending.len() as u64;
        }
        Ok(())
    }

    fn step(&mut self, byte: u8) {
        let state = self.state;
        self.state = match state {
            State::Code => self.code(byte),
            State::Slash => match byte {
                b'/' => {
                    self.stats.comments += 1;
                    State::LineComment { escaped: false }
                }
                b'*' => {
                    self.stats.comments += 1;
                    State::BlockComment {
                        star: false,
                        escaped: false,
                    }
                }
                _ => {
                    self.pending.push(b'/');
                    self.code(byte)
                }
            },
            State::Quoted { quote, escaped } => {
                self.pending.push(byte);
                match byte {
                    _ if escaped => State::Quoted {
                        quote,
                        escaped: false,
                    },
                    b'\\' => State::Quoted {
                        quote,
                        escaped: true,
                    },
                    _ if byte == quote => State::Code,
                    _ => State::Quoted {
                        quote,
                        escaped: false,
                    },
                }
            }
            State::LineComment { escaped } => match byte {
                _ if escaped => State::LineComment { escaped: false },
                b'\\' => State::LineComment { escaped: true },
                b'\n' => {
                    self.pending.push(b'\n');
                    State::Code
                }
                _ => State::LineComment { escaped: false },
            },
            State::BlockComment { star, escaped } => match byte {
                _ if escaped => State::BlockComment {
                    star: false,
                    escaped: false,
                },
                b'\\' => State::BlockComment {
                    star: false,
                    escaped: true,
                },
                b'*' => State::BlockComment {
                    star: true,
                    escaped: false,
                },
                b'/' if star => State::Code,
                _ => State::BlockComment {
                    star: false,
                    escaped: false,
                },
            },
        };
    }

    fn code(&mut self, byte: u8) -> State {
        match byte {
            b'/' => State::Slash,
            b'"' | b'\'' => {
                self.pending.push(byte);
                State::Quoted {
                    quote: byte,
                    escaped: false,
                }
            }
            _ => {
                self.pending.push(byte);
                State::Code
            }
        }
    }
}

/// Streams `reader` through a [`CommentStripper`] into `writer`.
pub fn strip_comments<R: Read, W: Write>(reader: R, writer: W) -> Result<StripStats, StripError> {
    let mut reader = BufReader::new(reader);
    let mut stripper = CommentStripper::new(writer);
    loop {
        let chunk = reader.fill_buf()?;
        if chunk.is_empty() {
            break;
        }
        let len = chunk.len();
        stripper.feed(chunk)?;
        reader.consume(len);
    }
    let (_, stats) = stripper.finish()?;
    Ok(stats)
}

/// Strips comments from a string.
///
/// # Examples
///
/// ```
/// # use contig_strip::strip_str;
/// let source = "a\"//not a comment\"b//real comment\nc/*block\nspanning*/d";
/// assert_eq!(strip_str(source).unwrap(), "a\"//not a comment\"b\ncd");
/// ```
pub fn strip_str(input: &str) -> Result<String, StripError> {
    let mut stripper = CommentStripper::new(Vec::with_capacity(input.len()));
    stripper.feed(input.as_bytes())?;
    let (output, _) = stripper.finish()?;
    Ok(String::from_utf8(output)?)
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod lib_test;
