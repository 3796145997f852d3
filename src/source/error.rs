/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use std::{fmt, io};

pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Failures raised while filling or transcoding the
/// underlying byte stream
#[derive(Debug)]
pub enum SourceError
{
    /// The underlying byte stream errored during a read
    Io(io::Error),

    /// The stream declared or defaulted to UTF8, but
    /// contained an invalid byte sequence
    InvalidUtf8,

    /// The stream was detected as UTF16, but contained an
    /// unpaired surrogate or truncated code unit
    InvalidUtf16,

    /// The stream was detected as UTF32, but contained a
    /// value outside the unicode range or a truncated code
    /// unit
    InvalidUtf32,
}

impl fmt::Display for SourceError
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self
        {
            Self::Io(e) => write!(f, "io error while reading source: {}", e),
            Self::InvalidUtf8 => f.write_str("invalid UTF8 byte sequence in source"),
            Self::InvalidUtf16 => f.write_str("invalid UTF16 code unit sequence in source"),
            Self::InvalidUtf32 => f.write_str("invalid UTF32 code unit in source"),
        }
    }
}

impl std::error::Error for SourceError
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)>
    {
        match self
        {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SourceError
{
    fn from(e: io::Error) -> Self
    {
        Self::Io(e)
    }
}

impl PartialEq for SourceError
{
    fn eq(&self, other: &Self) -> bool
    {
        use SourceError::*;

        matches!(
            (self, other),
            (Io(_), Io(_))
                | (InvalidUtf8, InvalidUtf8)
                | (InvalidUtf16, InvalidUtf16)
                | (InvalidUtf32, InvalidUtf32)
        )
    }
}
