/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use crate::{intern::Text, mark::Mark};

/// A single lexical element of the YAML stream, delimited
/// by its start and end [`Mark`]s
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token
{
    pub kind:  TokenKind,
    pub start: Mark,
    pub end:   Mark,
}

impl Token
{
    pub fn new(kind: TokenKind, start: Mark, end: Mark) -> Self
    {
        Self { kind, start, end }
    }

    /// Discriminant of this token
    pub fn marker(&self) -> Marker
    {
        Marker::from(&self.kind)
    }

    /// Column of this token's first character, zero indexed
    pub fn indent(&self) -> i64
    {
        self.start.column as i64 - 1
    }
}

/// Tokens that may be emitted by the YAML lexer
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind
{
    /// The stream's start, with the detected byte encoding
    /// {virtual}
    StreamStart(StreamEncoding),
    /// The stream's end {virtual}
    StreamEnd,
    /// A U+FEFF at the stream's start
    ByteOrderMark,
    /// The %YAML directive, (major,minor)
    VersionDirective(u8, u8),
    /// The %TAG directive, (handle, prefix)
    TagDirective(Text, Text),
    /// Any other % directive, (name, argument)
    ReservedDirective(Text, Text),
    /// A ---
    DirectivesEnd,
    /// A ...
    DocumentEnd,
    /// Indentation of the line the next token starts on
    Indent(usize),
    /// A '-'
    BlockEntry,
    /// A '?'
    ExplicitKey,
    /// A ':'
    Value,
    /// A '['
    FlowSequenceStart,
    /// A ']'
    FlowSequenceEnd,
    /// A '{'
    FlowMappingStart,
    /// A '}'
    FlowMappingEnd,
    /// A ','
    FlowEntry,
    /// An anchor (&name)
    Anchor(Text),
    /// An alias (*name)
    Alias(Text),
    /// A tag, resolved against the active %TAG directives
    Tag(Text),
    /// A scalar (content, style)
    Scalar(Text, ScalarStyle),
    /// An annotation (@name)
    AnnotationStart(Text),
    /// A '(' opening an annotation's parameter list
    AnnotationParamsStart,
    /// A ')' closing an annotation's parameter list
    AnnotationParamsEnd,
}

/// Discriminants of [`TokenKind`], used where the payload
/// is irrelevant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Marker
{
    StreamStart,
    StreamEnd,
    ByteOrderMark,
    VersionDirective,
    TagDirective,
    ReservedDirective,
    DirectivesEnd,
    DocumentEnd,
    Indent,
    BlockEntry,
    ExplicitKey,
    Value,
    FlowSequenceStart,
    FlowSequenceEnd,
    FlowMappingStart,
    FlowMappingEnd,
    FlowEntry,
    Anchor,
    Alias,
    Tag,
    Scalar,
    AnnotationStart,
    AnnotationParamsStart,
    AnnotationParamsEnd,
}

impl From<&'_ TokenKind> for Marker
{
    fn from(t: &'_ TokenKind) -> Self
    {
        use TokenKind::*;

        match t
        {
            StreamStart(_) => Self::StreamStart,
            StreamEnd => Self::StreamEnd,
            ByteOrderMark => Self::ByteOrderMark,
            VersionDirective(_, _) => Self::VersionDirective,
            TagDirective(_, _) => Self::TagDirective,
            ReservedDirective(_, _) => Self::ReservedDirective,
            DirectivesEnd => Self::DirectivesEnd,
            DocumentEnd => Self::DocumentEnd,
            Indent(_) => Self::Indent,
            BlockEntry => Self::BlockEntry,
            ExplicitKey => Self::ExplicitKey,
            Value => Self::Value,
            FlowSequenceStart => Self::FlowSequenceStart,
            FlowSequenceEnd => Self::FlowSequenceEnd,
            FlowMappingStart => Self::FlowMappingStart,
            FlowMappingEnd => Self::FlowMappingEnd,
            FlowEntry => Self::FlowEntry,
            Anchor(_) => Self::Anchor,
            Alias(_) => Self::Alias,
            Tag(_) => Self::Tag,
            Scalar(_, _) => Self::Scalar,
            AnnotationStart(_) => Self::AnnotationStart,
            AnnotationParamsStart => Self::AnnotationParamsStart,
            AnnotationParamsEnd => Self::AnnotationParamsEnd,
        }
    }
}

impl From<&'_ Token> for Marker
{
    fn from(t: &'_ Token) -> Self
    {
        Self::from(&t.kind)
    }
}

impl PartialEq<Token> for Marker
{
    fn eq(&self, other: &Token) -> bool
    {
        self == &Self::from(other)
    }
}

/// The encoding detected on the underlying byte stream.
///
/// Streams are transcoded to UTF8 internally; this records
/// what the bytes arrived as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamEncoding
{
    UTF8,
    UTF16LE,
    UTF16BE,
    UTF32LE,
    UTF32BE,
}

/// The style of a scalar, corresponding to the possible
/// presentations supported by YAML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarStyle
{
    /// No delimiters, content was detected purely from
    /// stream context
    Plain,
    /// Scalar was quoted in single quotes (`''`)
    SingleQuote,
    /// Scalar was quoted in double quotes (`""`)
    DoubleQuote,
    /// Scalar was preceded by pipe (`|`)
    Literal,
    /// Scalar was preceded by an arrow ('>')
    Folded,
}
