use std::{fmt, io};

use crate::error::{Error, Result};
use crate::lexer::*;

/// TimeDescription describes the "t=" and "r=" fields of the session
/// description, which specify when a session is active and how it repeats.
///
/// Both values are carried as the raw text found on the wire.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TimeDescription {
    /// `t=<start-time> <stop-time>`
    ///
    /// <https://tools.ietf.org/html/rfc4566#section-5.9>
    pub active_time: String,

    /// `r=<repeat interval> <active duration> <offsets from start-time>`
    ///
    /// <https://tools.ietf.org/html/rfc4566#section-5.10>
    pub repeat_times: Vec<String>,
}

impl fmt::Display for TimeDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_key_value(f, TIME_KEY, Some(&self.active_time))?;
        for repeat_time in &self.repeat_times {
            write_key_value(f, REPEAT_TIME_KEY, Some(repeat_time))?;
        }
        Ok(())
    }
}

impl TimeDescription {
    /// parse reads one time description from a tokenizer whose `t=` tag has
    /// already been taken by the caller.
    ///
    /// The active time line is read unconditionally. Every following `r=`
    /// line is appended to `repeat_times`; the first tag of any other type is
    /// pushed back to the tokenizer, so the block that follows can be parsed
    /// by whoever owns it. End of input, or an empty tag, ends the block
    /// without a pushback.
    ///
    /// ```text
    /// +-------------------+         +-----------------+  tag != r=  +------+
    /// | ReadingActiveTime |-------->| ScanningRepeats |------------>| Done |
    /// +-------------------+         +-----------------+  / eof      +------+
    ///                                  ^          |
    ///                                  +----------+ r=
    /// ```
    pub fn parse<T: Tokenizer + ?Sized>(tokenizer: &mut T) -> Result<Self> {
        let active_time = tokenizer.read_line()?;
        let mut repeat_times = vec![];

        while let Some(tag) = tokenizer.peek_tag()? {
            match tag.as_bytes() {
                b"" => break,
                b"r=" => repeat_times.push(tokenizer.read_line()?),
                _ => {
                    tokenizer.push_back(tag)?;
                    break;
                }
            }
        }

        log::debug!(
            "parsed time description `{active_time}` with {} repeat time(s)",
            repeat_times.len()
        );

        Ok(TimeDescription {
            active_time,
            repeat_times,
        })
    }

    /// unmarshal parses a standalone time description that starts with its
    /// `t=` line. Anything after the block is left unread.
    pub fn unmarshal<R: io::BufRead>(reader: &mut R) -> Result<Self> {
        let mut lexer = Lexer::new(reader);

        match lexer.peek_tag()? {
            None => Err(Error::SdpEmptyTimeDescription),
            Some(tag) if tag.is_empty() => Err(Error::SdpEmptyTimeDescription),
            Some(tag) if tag.as_bytes() == TIME_KEY.as_bytes() => Self::parse(&mut lexer),
            Some(tag) => Err(Error::SdpInvalidSyntax(tag.to_string())),
        }
    }

    /// marshal serializes the time description into its `t=` and `r=` lines.
    pub fn marshal(&self) -> String {
        self.to_string()
    }
}

/// unmarshal_time_descriptions parses every consecutive time description at
/// the current position of the tokenizer.
///
/// The loop stops at the first tag that is not `t=`, which is pushed back for
/// the next block parser, or at end of input.
pub fn unmarshal_time_descriptions<T: Tokenizer + ?Sized>(
    tokenizer: &mut T,
) -> Result<Vec<TimeDescription>> {
    let mut time_descriptions = vec![];

    while let Some(tag) = tokenizer.peek_tag()? {
        match tag.as_bytes() {
            b"" => break,
            b"t=" => time_descriptions.push(TimeDescription::parse(tokenizer)?),
            _ => {
                tokenizer.push_back(tag)?;
                break;
            }
        }
    }

    Ok(time_descriptions)
}

pub fn marshal_time_descriptions(time_descriptions: &[TimeDescription]) -> String {
    time_descriptions
        .iter()
        .map(TimeDescription::marshal)
        .collect()
}

impl From<TimeDescription> for String {
    fn from(time_description: TimeDescription) -> String {
        time_description.marshal()
    }
}

impl TryFrom<String> for TimeDescription {
    type Error = Error;
    fn try_from(time_string: String) -> Result<Self> {
        TimeDescription::try_from(time_string.as_str())
    }
}

impl TryFrom<&str> for TimeDescription {
    type Error = Error;
    fn try_from(time_string: &str) -> Result<Self> {
        let mut reader = io::Cursor::new(time_string.as_bytes());
        TimeDescription::unmarshal(&mut reader)
    }
}
