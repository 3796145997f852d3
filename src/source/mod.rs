/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Adapters for delivering plain bytes to the lexer.
//!
//! This behavior is defined by the [`Source`] trait, which
//! exposes exactly one operation: fill a byte buffer,
//! signalling end of input. Everything else -- encoding
//! detection, transcoding, buffering -- happens on this
//! side of the trait, in the [`Decoder`].
//!
//! Two adapters are provided, each with a top level
//! convenience function:
//!
//! - `&str` / `&[u8]` => [`from_utf8()`] / [`from_slice()`]
//! - a file path => [`from_file()`]
//!
//! Input may arrive as UTF8, UTF16 (LE/BE) or UTF32
//! (LE/BE); the encoding is detected from a byte order mark
//! or, failing that, from the pattern of null bytes in the
//! first four bytes of the stream, per YAML 1.2 §5.2.

pub mod error;
pub mod file;
pub mod slice;

use std::path::Path;

use crate::{
    source::{
        error::{SourceError, SourceResult},
        file::FileSource,
        slice::SliceSource,
    },
    token::StreamEncoding,
};

/// Instantiate a new [`Source`] over the given UTF8 string
/// slice
///
/// ## Examples
///
/// ```rust
/// use yamlet::source::from_utf8;
///
/// let yaml = "{a yaml: mapping}";
///
/// let source = from_utf8(yaml);
/// ```
pub fn from_utf8(utf8: &str) -> SliceSource<'_>
{
    SliceSource::new(utf8.as_bytes())
}

/// Instantiate a new [`Source`] over the given byte slice,
/// in any of the supported encodings
///
/// ## Examples
///
/// ```rust
/// use yamlet::source::from_slice;
///
/// let yaml = b"[some, valid, yaml]";
///
/// let source = from_slice(yaml);
/// ```
pub fn from_slice(slice: &[u8]) -> SliceSource<'_>
{
    SliceSource::new(slice)
}

/// Instantiate a new [`Source`] streaming from the file at
/// the given path
///
/// ## Errors
///
/// This function will error if the file cannot be opened
///
/// ## Examples
///
/// ```no_run
/// use yamlet::source::from_file;
///
/// let source = from_file("config.yaml")?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn from_file<P>(path: P) -> std::io::Result<FileSource>
where
    P: AsRef<Path>,
{
    FileSource::open(path)
}

/// A byte stream the lexer can drain.
///
/// Implementors deliver the stream chunk-wise into a caller
/// provided buffer, returning the number of bytes written
/// and whether the stream is finished. A `(0, false)`
/// return is legal and means "try again"; a short write
/// does not imply end of input.
pub trait Source
{
    /// Fill .buf with the next bytes of the stream,
    /// returning the count written and whether the stream
    /// has ended
    fn fill(&mut self, buf: &mut [u8]) -> SourceResult<(usize, bool)>;
}

/// Chunk size requested from the underlying [`Source`] per
/// refill
const CHUNK_SIZE: usize = 8 * 1024;

/// Longest byte order mark we can encounter (UTF32)
const MAX_BOM: usize = 4;

/// Streaming transcoder from any supported encoding to
/// UTF8.
///
/// Owns the [`Source`] and the decoded buffer the lexer
/// scans. Bytes are pulled on demand in [`CHUNK_SIZE`]
/// chunks; code units straddling a chunk boundary are
/// carried over to the next refill.
#[derive(Debug)]
pub(crate) struct Decoder<S>
{
    src: S,

    /// Undecoded bytes carried between refills
    raw: Vec<u8>,
    /// Decoded UTF8 content
    content: String,

    encoding:  Option<StreamEncoding>,
    exhausted: bool,
}

impl<S> Decoder<S>
where
    S: Source,
{
    pub fn new(src: S) -> Self
    {
        Self {
            src,
            raw: Vec::new(),
            content: String::new(),
            encoding: None,
            exhausted: false,
        }
    }

    /// The decoded stream content, so far
    pub fn content(&self) -> &str
    {
        &self.content
    }

    /// Has the underlying stream been fully decoded?
    pub fn is_exhausted(&self) -> bool
    {
        self.exhausted
    }

    /// The encoding detected on the stream, if detection
    /// has run
    pub fn encoding(&self) -> Option<StreamEncoding>
    {
        self.encoding
    }

    /// Pull (at least) one chunk from the underlying stream
    /// and decode it onto .content, returning whether the
    /// stream is now exhausted.
    pub fn refill(&mut self) -> SourceResult<bool>
    {
        if self.exhausted
        {
            return Ok(true);
        }

        let mut chunk = [0; CHUNK_SIZE];
        let mut eoi = false;

        // Loop until we make progress or the stream ends,
        // tolerating empty reads
        while !eoi
        {
            let (n, end) = self.src.fill(&mut chunk)?;
            eoi = end;

            self.raw.extend_from_slice(&chunk[..n]);

            if n != 0
            {
                break;
            }
        }

        if self.encoding.is_none() && (self.raw.len() >= MAX_BOM || eoi)
        {
            self.detect_encoding();
        }

        if self.encoding.is_some()
        {
            self.decode_raw(eoi)?;
        }

        // A stream shorter than MAX_BOM only detects at end
        // of input, at which point .raw must be fully
        // drained
        if eoi && !self.raw.is_empty()
        {
            return Err(self.truncation_error());
        }

        self.exhausted = eoi;

        Ok(eoi)
    }

    /// Determine the stream encoding from the leading
    /// bytes, consuming any byte order mark into a decoded
    /// U+FEFF.
    ///
    /// See: yaml.org/spec/1.2.2/#52-character-encodings
    fn detect_encoding(&mut self)
    {
        use StreamEncoding::*;

        let (encoding, bom) = match self.raw.as_slice()
        {
            [0x00, 0x00, 0xFE, 0xFF, ..] => (UTF32BE, 4),
            [0xFF, 0xFE, 0x00, 0x00, ..] => (UTF32LE, 4),
            [0xFE, 0xFF, ..] => (UTF16BE, 2),
            [0xFF, 0xFE, ..] => (UTF16LE, 2),
            [0xEF, 0xBB, 0xBF, ..] => (UTF8, 3),
            [0x00, 0x00, 0x00, _, ..] => (UTF32BE, 0),
            [_, 0x00, 0x00, 0x00, ..] => (UTF32LE, 0),
            [0x00, _, ..] => (UTF16BE, 0),
            [_, 0x00, ..] => (UTF16LE, 0),
            _ => (UTF8, 0),
        };

        // The mark is replaced by a decoded U+FEFF so the
        // lexer can surface it as a token
        if bom != 0
        {
            self.raw.drain(..bom);
            self.content.push('\u{FEFF}');
        }

        self.encoding = Some(encoding);
    }

    /// Decode as much of .raw as possible onto .content,
    /// retaining incomplete trailing code units unless the
    /// stream ended
    fn decode_raw(&mut self, eoi: bool) -> SourceResult<()>
    {
        match self.encoding
        {
            Some(StreamEncoding::UTF8) => self.decode_utf8(eoi),
            Some(StreamEncoding::UTF16LE) => self.decode_utf16(eoi, u16::from_le_bytes),
            Some(StreamEncoding::UTF16BE) => self.decode_utf16(eoi, u16::from_be_bytes),
            Some(StreamEncoding::UTF32LE) => self.decode_utf32(u32::from_le_bytes),
            Some(StreamEncoding::UTF32BE) => self.decode_utf32(u32::from_be_bytes),
            None => Ok(()),
        }
    }

    fn decode_utf8(&mut self, eoi: bool) -> SourceResult<()>
    {
        let valid = match std::str::from_utf8(&self.raw)
        {
            Ok(s) => s.len(),
            // A sequence truncated by the chunk boundary is
            // completed on the next refill
            Err(e) if e.error_len().is_none() && !eoi => e.valid_up_to(),
            Err(_) => return Err(SourceError::InvalidUtf8),
        };

        match std::str::from_utf8(&self.raw[..valid])
        {
            Ok(s) => self.content.push_str(s),
            Err(_) => return Err(SourceError::InvalidUtf8),
        }

        self.raw.drain(..valid);

        Ok(())
    }

    fn decode_utf16<F>(&mut self, eoi: bool, from_bytes: F) -> SourceResult<()>
    where
        F: Fn([u8; 2]) -> u16,
    {
        let mut pos = 0;

        while self.raw.len() - pos >= 2
        {
            let unit = from_bytes([self.raw[pos], self.raw[pos + 1]]);

            match unit
            {
                // Leading surrogate, needs a trailing pair
                0xD800..=0xDBFF =>
                {
                    if self.raw.len() - pos < 4
                    {
                        match eoi
                        {
                            true => return Err(SourceError::InvalidUtf16),
                            false => break,
                        }
                    }

                    let trail = from_bytes([self.raw[pos + 2], self.raw[pos + 3]]);

                    if !(0xDC00..=0xDFFF).contains(&trail)
                    {
                        return Err(SourceError::InvalidUtf16);
                    }

                    let point =
                        0x10000 + (((unit as u32) - 0xD800) << 10) + ((trail as u32) - 0xDC00);
                    let c = char::from_u32(point).ok_or(SourceError::InvalidUtf16)?;

                    self.content.push(c);
                    pos += 4;
                },
                // Unpaired trailing surrogate
                0xDC00..=0xDFFF => return Err(SourceError::InvalidUtf16),
                _ =>
                {
                    let c = char::from_u32(unit as u32).ok_or(SourceError::InvalidUtf16)?;

                    self.content.push(c);
                    pos += 2;
                },
            }
        }

        self.raw.drain(..pos);

        Ok(())
    }

    fn decode_utf32<F>(&mut self, from_bytes: F) -> SourceResult<()>
    where
        F: Fn([u8; 4]) -> u32,
    {
        let mut pos = 0;

        while self.raw.len() - pos >= 4
        {
            let unit = from_bytes([
                self.raw[pos],
                self.raw[pos + 1],
                self.raw[pos + 2],
                self.raw[pos + 3],
            ]);

            let c = char::from_u32(unit).ok_or(SourceError::InvalidUtf32)?;

            self.content.push(c);
            pos += 4;
        }

        self.raw.drain(..pos);

        Ok(())
    }

    fn truncation_error(&self) -> SourceError
    {
        match self.encoding
        {
            Some(StreamEncoding::UTF16LE) | Some(StreamEncoding::UTF16BE) =>
            {
                SourceError::InvalidUtf16
            },
            Some(StreamEncoding::UTF32LE) | Some(StreamEncoding::UTF32BE) =>
            {
                SourceError::InvalidUtf32
            },
            _ => SourceError::InvalidUtf8,
        }
    }
}
