#[cfg(test)]
mod lexer_test;

use std::fmt;
use std::fmt::Display;
use std::io;

use super::error::{Error, Result};

pub const END_LINE: &str = "\r\n";

pub const TIME_KEY: &str = "t=";
pub const REPEAT_TIME_KEY: &str = "r=";

/// Tag is the type prefix of an SDP line, such as `t=` or `r=`.
///
/// The empty tag is produced for whitespace-only padding and marks the end of
/// whatever block is being scanned.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Tag(Vec<u8>);

impl Tag {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&[u8]> for Tag {
    fn from(raw: &[u8]) -> Self {
        Tag(raw.to_vec())
    }
}

impl From<&str> for Tag {
    fn from(raw: &str) -> Self {
        Tag(raw.as_bytes().to_vec())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

/// Tokenizer is the line source shared by every SDP block parser working on
/// the same message.
///
/// A tag returned by `peek_tag` is in the caller's hands: the caller either
/// reads the body of its line with `read_line`, or returns it with `push_back`
/// so the next parser down the chain observes it again. At most one tag can be
/// pushed back at a time.
pub trait Tokenizer {
    /// Consumes the remainder of the current line, without its terminator.
    fn read_line(&mut self) -> Result<String>;

    /// Takes the type prefix of the next unread line, or `None` at end of input.
    fn peek_tag(&mut self) -> Result<Option<Tag>>;

    /// Hands a peeked tag back so the next `peek_tag` returns it again.
    fn push_back(&mut self, tag: Tag) -> Result<()>;
}

impl<T: Tokenizer + ?Sized> Tokenizer for &mut T {
    fn read_line(&mut self) -> Result<String> {
        (**self).read_line()
    }

    fn peek_tag(&mut self) -> Result<Option<Tag>> {
        (**self).peek_tag()
    }

    fn push_back(&mut self, tag: Tag) -> Result<()> {
        (**self).push_back(tag)
    }
}

/// Lexer tokenizes an SDP byte stream line by line with one tag of lookahead.
pub struct Lexer<'a, R: io::BufRead> {
    reader: &'a mut R,
    pending: Option<Tag>,
    // a tag has been taken from the reader but its line body has not
    mid_line: bool,
}

impl<'a, R: io::BufRead> Lexer<'a, R> {
    pub fn new(reader: &'a mut R) -> Self {
        Lexer {
            reader,
            pending: None,
            mid_line: false,
        }
    }

    /// has_pending reports whether a pushed back tag is waiting to be peeked.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<R: io::BufRead> Tokenizer for Lexer<'_, R> {
    fn read_line(&mut self) -> Result<String> {
        if let Some(tag) = self.pending.take() {
            log::trace!("reading line body of pending tag {tag}");
        }

        let (value, num_bytes) = read_value(self.reader)?;
        if num_bytes == 0 && !self.mid_line {
            return Err(Error::StreamExhausted);
        }
        self.mid_line = false;

        Ok(value)
    }

    fn peek_tag(&mut self) -> Result<Option<Tag>> {
        if let Some(tag) = self.pending.take() {
            return Ok(Some(tag));
        }

        if self.mid_line {
            // the previous tag was dropped without its line being read
            let (skipped, _) = read_value(self.reader)?;
            log::trace!("discarding unread line body {skipped:?}");
            self.mid_line = false;
        }

        let tag = read_type(self.reader)?;
        if let Some(tag) = &tag {
            log::trace!("took tag {tag}");
            self.mid_line = !tag.is_empty();
        }

        Ok(tag)
    }

    fn push_back(&mut self, tag: Tag) -> Result<()> {
        if let Some(pending) = &self.pending {
            return Err(Error::PushbackOccupied(pending.to_string()));
        }

        log::trace!("pushing back tag {tag}");
        self.pending = Some(tag);

        Ok(())
    }
}

fn peek_byte<R: io::BufRead>(reader: &mut R) -> Result<Option<u8>> {
    let buf = reader.fill_buf()?;
    Ok(buf.first().copied())
}

/// read_type reads the `<type>=` prefix of the next non-blank line.
pub fn read_type<R: io::BufRead>(reader: &mut R) -> Result<Option<Tag>> {
    loop {
        match peek_byte(reader)? {
            None => return Ok(None),
            Some(b'\n') | Some(b'\r') => reader.consume(1),
            Some(_) => break,
        }
    }

    let mut buf = Vec::with_capacity(2);
    loop {
        match peek_byte(reader)? {
            Some(b'=') => {
                reader.consume(1);
                buf.push(b'=');
                break;
            }
            None | Some(b'\n') | Some(b'\r') => {
                if buf.iter().all(u8::is_ascii_whitespace) {
                    return Ok(Some(Tag::default()));
                }
                return Err(Error::SdpInvalidSyntax(
                    String::from_utf8_lossy(&buf).into_owned(),
                ));
            }
            Some(b) => {
                reader.consume(1);
                buf.push(b);
            }
        }
    }

    match buf.len() {
        2 => Ok(Some(Tag(buf))),
        _ => Err(Error::SdpInvalidSyntax(
            String::from_utf8_lossy(&buf).into_owned(),
        )),
    }
}

/// read_value reads up to the end of the line and strips the terminator.
pub fn read_value<R: io::BufRead>(reader: &mut R) -> Result<(String, usize)> {
    let mut buf = vec![];
    let num_bytes = reader.read_until(b'\n', &mut buf)?;
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }

    Ok((String::from_utf8(buf)?, num_bytes))
}

pub fn write_key_value<W: fmt::Write, V: Display>(
    writer: &mut W,
    key: &str,
    value: Option<V>,
) -> fmt::Result {
    let Some(value) = value else {
        return Ok(());
    };

    write!(writer, "{key}{value}{END_LINE}")
}
