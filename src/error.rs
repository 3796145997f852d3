/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use std::{error::Error as StdError, fmt};

use crate::{event::error::ParseError, lexer::error::LexError, mark::Mark, source::error::SourceError};

/// Result typedef used throughout this library's public API
pub type Result<T> = std::result::Result<T, Error>;

/// Opaque type representing all possible errors which can
/// occur during library usage.
///
/// Every error carries the position of the offending
/// character, plus the start and end of the most recent
/// token, enabling precise diagnostics against the source
/// stream.
pub struct Error
{
    inner: Box<internal::Error>,
}

impl Error
{
    /// The position at which the error occurred
    pub fn mark(&self) -> Mark
    {
        self.inner.mark
    }

    /// Start of the token the stream failed in (or just
    /// after)
    pub fn token_start(&self) -> Mark
    {
        self.inner.token_start
    }

    /// End of the token the stream failed in (or just
    /// after)
    pub fn token_end(&self) -> Mark
    {
        self.inner.token_end
    }

    /// Categorize the error into one of the following:
    ///
    /// - [`Category::Syntax`] The YAML stream was
    ///   syntactically invalid
    /// - [`Category::Data`] The YAML stream contained data
    ///   that could not be represented
    /// - [`Category::IO`] The underlying byte stream
    ///   surfaced an error while doing IO
    /// - [`Category::EOF`] The YAML stream ended
    ///   unexpectedly
    pub fn classify(&self) -> Category
    {
        self.inner.classify()
    }

    /// Boxes the internal error, returning the public error
    /// type
    pub(crate) fn new(kind: ParseError, mark: Mark, token_start: Mark, token_end: Mark) -> Self
    {
        Self {
            inner: Box::new(internal::Error {
                kind,
                mark,
                token_start,
                token_end,
            }),
        }
    }
}

impl fmt::Display for Error
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{} at {}", self.inner.kind, self.inner.mark)
    }
}

impl fmt::Debug for Error
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("Error")
            .field("kind", &self.inner.kind)
            .field("mark", &self.inner.mark)
            .field("token_start", &self.inner.token_start)
            .field("token_end", &self.inner.token_end)
            .finish()
    }
}

impl StdError for Error
{
    fn source(&self) -> Option<&(dyn StdError + 'static)>
    {
        Some(&self.inner.kind)
    }
}

/// Rough category of an [`Error`].
///
/// Useful for making decisions upon encountering an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category
{
    /// The underlying byte stream returned an error while
    /// attempting IO
    IO,

    /// The YAML stream was not syntactically valid
    Syntax,

    /// There was an issue with the data contained in the
    /// YAML stream (e.g: a malformed encoding)
    Data,

    /// The YAML stream unexpectedly terminated before it
    /// was appropriate to do so
    EOF,
}

pub(crate) mod internal
{
    use super::*;

    /// Internal error representation, bundling the cause
    /// with enough positional metadata to contextualize it
    pub(crate) struct Error
    {
        /// Error variant encountered
        pub kind:        ParseError,
        /// Position in the stream the error occurred
        pub mark:        Mark,
        /// Start of the most recent token
        pub token_start: Mark,
        /// End of the most recent token
        pub token_end:   Mark,
    }

    impl Error
    {
        /// Categorize this error
        pub fn classify(&self) -> Category
        {
            match &self.kind
            {
                ParseError::Lexer(LexError::Source(SourceError::Io(_))) => Category::IO,
                ParseError::Lexer(LexError::Source(_)) => Category::Data,
                ParseError::Lexer(LexError::UnexpectedEOF) => Category::EOF,
                ParseError::Lexer(_) => Category::Syntax,
                _ => Category::Syntax,
            }
        }
    }
}
