/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::source::error::SourceError;

pub(crate) type LexResult<T> = std::result::Result<T, LexError>;

/// Failures encountered while tokenizing the YAML stream
#[derive(Debug)]
pub enum LexError
{
    /// Not an error: the scan ran out of buffered input and
    /// the source has more. Never surfaced by
    /// [`Lexer::next`](crate::lexer::Lexer); retried
    /// internally after a refill.
    Extend,

    /// Got end of stream while scanning a token
    UnexpectedEOF,

    /// Directive was not %YAML, %TAG or a well formed
    /// reserved directive
    UnknownDirective,

    /// A %YAML directive's version was not two dot
    /// separated digit runs
    InvalidVersion,

    /// A %YAML directive declared a major version this
    /// parser cannot process (2.x or greater)
    UnsupportedVersion,

    /// Tag handle was not primary (!), secondary (!!) or
    /// named (!word!)
    InvalidTagHandle,

    /// Tag prefix was missing or not separated from the
    /// handle by whitespace
    InvalidTagPrefix,

    /// Tag suffix contained characters outside the URI set,
    /// or a malformed %XX escape
    InvalidTagSuffix,

    /// A tag referenced a named handle that no %TAG
    /// directive declared
    UnknownTagHandle,

    /// An anchor (&) or alias (*) name was empty or
    /// contained forbidden characters
    InvalidAnchorName,

    /// An annotation (@) name was empty or contained
    /// forbidden characters
    InvalidAnnotationName,

    /// A single or double quoted scalar was malformed,
    /// typically unterminated
    InvalidFlowScalar,

    /// A plain scalar contained a character sequence that
    /// is not permitted
    InvalidPlainScalar,

    /// A block scalar header or body was malformed
    InvalidBlockScalar,

    /// A tab character '\t' was found in block indentation
    InvalidTab,

    /// A character that was not valid for the escape
    /// sequence was encountered
    UnknownEscape,

    /// Found a character that cannot start a valid token
    UnknownDelimiter,

    /// An integer overflowed
    IntOverflow,

    /// The byte source failed while reading or transcoding
    Source(SourceError),
}

impl fmt::Display for LexError
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self
        {
            Self::Extend => f.write_str("scan requires a longer buffer"),
            Self::UnexpectedEOF => f.write_str("unexpected end of stream while scanning a token"),
            Self::UnknownDirective => f.write_str("unknown directive"),
            Self::InvalidVersion => f.write_str("invalid %YAML directive version"),
            Self::UnsupportedVersion => f.write_str("unsupported YAML major version"),
            Self::InvalidTagHandle => f.write_str("invalid tag handle"),
            Self::InvalidTagPrefix => f.write_str("invalid tag directive prefix"),
            Self::InvalidTagSuffix => f.write_str("invalid tag suffix"),
            Self::UnknownTagHandle => f.write_str("tag handle was never declared"),
            Self::InvalidAnchorName => f.write_str("invalid anchor or alias name"),
            Self::InvalidAnnotationName => f.write_str("invalid annotation name"),
            Self::InvalidFlowScalar => f.write_str("invalid quoted scalar"),
            Self::InvalidPlainScalar => f.write_str("invalid plain scalar"),
            Self::InvalidBlockScalar => f.write_str("invalid block scalar"),
            Self::InvalidTab => f.write_str("tab character in indentation"),
            Self::UnknownEscape => f.write_str("unknown escape sequence"),
            Self::UnknownDelimiter => f.write_str("character cannot start any token"),
            Self::IntOverflow => f.write_str("integer overflow"),
            Self::Source(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for LexError
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)>
    {
        match self
        {
            Self::Source(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SourceError> for LexError
{
    fn from(e: SourceError) -> Self
    {
        Self::Source(e)
    }
}

impl PartialEq for LexError
{
    fn eq(&self, other: &Self) -> bool
    {
        match (self, other)
        {
            (Self::Source(a), Self::Source(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}
