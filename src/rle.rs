use thiserror::Error;
use tracing::debug;

use crate::parse_util;

/// One recognized unit of the pattern body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    /// `b`: a run of dead cells.
    Dead(u32),

    /// `o`: a run of live cells.
    Alive(u32),

    /// `$`: end of the current row.
    RowEnd,

    /// `!`: end of the whole pattern.
    End,
}

#[derive(Debug, Error)]
pub enum RleError {
    #[error("Missing header line")]
    MissingHeader,

    #[error("Malformed header line: {line:?}")]
    MalformedHeader { line: String },

    #[error("Unrecognized byte 0x{got:02X} at offset {offset}")]
    UnrecognizedByte { got: u8, offset: usize },

    #[error("Run length at offset {offset} overflows")]
    RunLengthOverflow { offset: usize },

    #[error("Run length of zero at offset {offset}")]
    ZeroRunLength { offset: usize },

    #[error("Pattern body ended before the '!' terminator")]
    MissingTerminator,
}

/// A parsed RLE pattern: the dimensions declared by the header, plus a
/// tokenizer over the concatenated body.
///
/// See: https://conwaylife.com/wiki/Run_Length_Encoded
#[derive(Debug)]
pub struct Rle {
    /// Declared grid width, in cells.
    pub width: u32,

    /// Declared grid height, in cells.
    pub height: u32,

    /// All non-header lines joined with no separator.
    body: String,

    /// Byte offset of the next unconsumed token in `body`.
    pos: usize,

    /// Set once `!` is seen; the stream is terminal from then on.
    done: bool,
}

impl Rle {
    /// Parses cleaned lines (see [`crate::config`]): the first line must
    /// carry the `x = <int>, y = <int>` dimensions somewhere in it, the rest
    /// form the pattern body.
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Result<Self, RleError> {
        let Some((header, rest)) = lines.split_first() else {
            return Err(RleError::MissingHeader);
        };
        let header = header.as_ref();

        let Some((width, height)) = read_dimensions(header.as_bytes()) else {
            return Err(RleError::MalformedHeader {
                line: header.to_owned(),
            });
        };

        // Joining with no separator rejoins runs split by line wrapping.
        let body: String = rest.iter().map(AsRef::as_ref).collect();

        debug!(width, height, body_len = body.len(), "parsed RLE header");

        Ok(Self {
            width,
            height,
            body,
            pos: 0,
            done: false,
        })
    }

    /// Byte offset of the tokenizer into the body. Advances as tokens are
    /// consumed, and freezes once `!` is reached.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Recognizes the token anchored at the current offset.
    ///
    /// Returns [`Token::End`] on every call after the terminator has been
    /// seen. Any byte outside the grammar, and a body that runs out before
    /// `!`, are hard errors so a pull-loop over this can never spin forever.
    pub fn next_token(&mut self) -> Result<Token, RleError> {
        if self.done {
            return Ok(Token::End);
        }

        let bytes = &self.body.as_bytes()[self.pos..];
        let Some(&b) = bytes.first() else {
            return Err(RleError::MissingTerminator);
        };

        match b {
            b'$' => {
                self.pos += 1;

                Ok(Token::RowEnd)
            }

            b'!' => {
                self.done = true;

                Ok(Token::End)
            }

            b'b' => {
                self.pos += 1;

                Ok(Token::Dead(1))
            }

            b'o' => {
                self.pos += 1;

                Ok(Token::Alive(1))
            }

            b if b.is_ascii_digit() => {
                let Some((run, rest)) = parse_util::digits(bytes) else {
                    return Err(RleError::RunLengthOverflow { offset: self.pos });
                };

                if run == 0 {
                    return Err(RleError::ZeroRunLength { offset: self.pos });
                }

                // Digits plus the one-byte cell symbol after them.
                let consumed = bytes.len() - rest.len() + 1;

                match rest.first() {
                    Some(b'b') => {
                        self.pos += consumed;

                        Ok(Token::Dead(run))
                    }
                    Some(b'o') => {
                        self.pos += consumed;

                        Ok(Token::Alive(run))
                    }
                    Some(&got) => Err(RleError::UnrecognizedByte {
                        got,
                        offset: self.pos + consumed - 1,
                    }),
                    None => Err(RleError::MissingTerminator),
                }
            }

            got => Err(RleError::UnrecognizedByte {
                got,
                offset: self.pos,
            }),
        }
    }
}

/// Finds the dimensions grammar anywhere in the header line. Text around the
/// match (a trailing `, rule = B3/S23`, say) is tolerated.
fn read_dimensions(line: &[u8]) -> Option<(u32, u32)> {
    (0..line.len())
        .filter(|&i| line[i] == b'x')
        .find_map(|i| try_dimensions(&line[i..]))
}

/// Matches `x <ws> = <ws> <digits> <ws> , <ws> y <ws> = <ws> <digits>` at the
/// start of the slice.
fn try_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    let bytes = parse_util::expect(b'x', bytes)?;
    let bytes = parse_util::take_ws(bytes);
    let bytes = parse_util::expect(b'=', bytes)?;
    let bytes = parse_util::take_ws(bytes);
    let (width, bytes) = parse_util::digits(bytes)?;

    let bytes = parse_util::take_ws(bytes);
    let bytes = parse_util::expect(b',', bytes)?;
    let bytes = parse_util::take_ws(bytes);

    let bytes = parse_util::expect(b'y', bytes)?;
    let bytes = parse_util::take_ws(bytes);
    let bytes = parse_util::expect(b'=', bytes)?;
    let bytes = parse_util::take_ws(bytes);
    let (height, _) = parse_util::digits(bytes)?;

    Some((width, height))
}
