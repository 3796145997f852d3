/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use std::fmt;

pub use crate::lexer::error::LexError;

pub(crate) type ParseResult<T> = std::result::Result<T, ParseError>;

/// Failures encountered while interpreting the token stream
/// into events
#[derive(Debug)]
pub enum ParseError
{
    /// A mismatch between the stream's actual state and
    /// what the parser is expecting occurred. Typically
    /// this means the underlying lexer was tampered with
    CorruptStream,

    /// More than one %YAML directive was found for a single
    /// document
    DuplicateVersion,

    /// More than one %TAG directive was found for the same
    /// handle in a single document
    DuplicateTagDirective,

    /// In certain cases YAML requires an explicit '---',
    /// most commonly between a directive set and its
    /// document, or after an implicitly ended document
    MissingDocumentStart,

    /// An entry in a block sequence was required but not
    /// found
    ///
    /// ```yaml
    /// - 1
    /// foo: bar # should be: '- foo: bar'
    /// ```
    MissingBlockEntry,

    /// A mapping key was required but not found
    MissingKey,

    /// A mapping key was not followed by a ':' value
    /// indicator
    ///
    /// ```yaml
    /// a: 1
    /// b        # wants: 'b: ...'
    /// ```
    MissingValue,

    /// A YAML node was required but not found, most
    /// commonly when tags or anchors dangle
    ///
    /// ```yaml
    /// anchor: &anchor # wants: &anchor 'my scalar'
    /// ```
    MissingNode,

    /// A flow sequence entry must be followed by a ',' or
    /// a closing ']'
    MissingFlowSequenceEntryOrEnd,

    /// A flow mapping entry must be followed by a ',' or a
    /// closing '}'
    MissingFlowMappingEntryOrEnd,

    /// An annotation's parameter must be followed by a ','
    /// or a closing ')'
    MissingAnnotationParamOrEnd,

    /// A node was indented where no open collection could
    /// accept it
    ///
    /// ```yaml
    /// a:
    ///   b: 1
    ///  c: 2    # matches neither mapping's indentation
    /// ```
    InvalidIndentation,

    /// A mapping key was not allowed here, typically an
    /// implicit key spanning lines, exceeding 1024
    /// characters, or a value indicator in the middle of a
    /// line
    InvalidKey,

    /// A node's anchor or tag was declared twice
    DuplicateNodeProperty,

    /// An annotation appeared between a node's properties
    /// and the node itself
    AnnotationAfterProperties,

    /// Nesting exceeded the configured maximum depth
    DepthLimitExceeded,

    /// The tokenizer failed; see the wrapped error
    Lexer(LexError),
}

impl fmt::Display for ParseError
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self
        {
            Self::CorruptStream => f.write_str("token stream is inconsistent with parser state"),
            Self::DuplicateVersion => f.write_str("duplicate %YAML directive in one document"),
            Self::DuplicateTagDirective =>
            {
                f.write_str("duplicate %TAG directive for one handle in one document")
            },
            Self::MissingDocumentStart => f.write_str("expected a '---' document start"),
            Self::MissingBlockEntry => f.write_str("expected a '-' block sequence entry"),
            Self::MissingKey => f.write_str("expected a mapping key"),
            Self::MissingValue => f.write_str("expected a ':' after a mapping key"),
            Self::MissingNode => f.write_str("expected a YAML node"),
            Self::MissingFlowSequenceEntryOrEnd =>
            {
                f.write_str("expected a ',' or ']' in the flow sequence")
            },
            Self::MissingFlowMappingEntryOrEnd =>
            {
                f.write_str("expected a ',' or '}' in the flow mapping")
            },
            Self::MissingAnnotationParamOrEnd =>
            {
                f.write_str("expected a ',' or ')' in the annotation parameters")
            },
            Self::InvalidIndentation => f.write_str("indentation matches no open collection"),
            Self::InvalidKey => f.write_str("mapping key is not allowed here"),
            Self::DuplicateNodeProperty => f.write_str("node property declared twice"),
            Self::AnnotationAfterProperties =>
            {
                f.write_str("annotations may not follow node properties")
            },
            Self::DepthLimitExceeded => f.write_str("nesting exceeds the maximum parse depth"),
            Self::Lexer(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for ParseError
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)>
    {
        match self
        {
            Self::Lexer(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LexError> for ParseError
{
    fn from(e: LexError) -> Self
    {
        Self::Lexer(e)
    }
}

impl PartialEq for ParseError
{
    fn eq(&self, other: &Self) -> bool
    {
        match (self, other)
        {
            (Self::Lexer(a), Self::Lexer(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}
