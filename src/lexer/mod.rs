/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The context sensitive YAML tokenizer.
//!
//! The [`Lexer`] pulls decoded characters from a
//! [`Decoder`] on demand and produces one [`Token`] per
//! call to [`next`](Lexer#method.next). YAML cannot be
//! tokenized without feedback from the parser: the same
//! bytes mean different things inside a flow collection, a
//! block collection or an annotation's parameter list. That
//! feedback arrives as the [`Regime`] argument to every
//! `next` call, rather than as mutable state on the lexer.
//!
//! Tokens never borrow from the scan buffer; any variable
//! content is copied into interned [`Text`] handles, which
//! is what lets the buffer grow lazily underneath us.
//!
//! [`Text`]: struct@crate::intern::Text

// Note that this module must come before all others, as
// they depend on the macros which expand into this scope
#[macro_use]
pub(crate) mod macros;

pub(crate) mod error;
pub(crate) mod flag;

mod anchor;
mod annotation;
mod directive;
mod scalar;
mod tag;

use std::collections::HashMap;

use crate::{
    intern::{Text, TextPool},
    lexer::{
        anchor::{scan_anchor, AnchorKind},
        annotation::scan_annotation,
        directive::scan_directive,
        error::{LexError, LexResult as Result},
        flag::{Flags, O_EXTENDABLE, O_ZEROED},
        scalar::{block::scan_block_scalar, flow::scan_flow_scalar, plain::scan_plain_scalar},
        tag::scan_node_tag,
    },
    mark::{Mark, MarkTracker},
    source::{Decoder, Source},
    token::{Marker, StreamEncoding, Token, TokenKind},
};

/// The family of tokens the parser expects next, telling
/// the lexer which scanning rules are active.
///
/// YAML's tokenization is driven by parser feedback; this
/// is that feedback, passed explicitly on every call rather
/// than kept as lexer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Regime
{
    /// Block context, carrying the governing collection's
    /// indentation. Scalars fold against it, and a line at
    /// or under it ends them
    Block(i64),
    /// Inside a flow collection: indentation is inactive
    /// and the flow indicators terminate plain scalars
    Flow,
    /// Inside an annotation's parameter list: flow rules,
    /// plus ')' terminates
    Params,
}

impl Regime
{
    pub fn is_block(&self) -> bool
    {
        matches!(self, Self::Block(_))
    }

    pub fn in_flow(&self) -> bool
    {
        !self.is_block()
    }

    pub fn is_params(&self) -> bool
    {
        matches!(self, Self::Params)
    }

    /// The governing indentation, with flow contexts
    /// pinned below any real column
    pub fn indent(&self) -> i64
    {
        match self
        {
            Self::Block(n) => *n,
            _ => -1,
        }
    }
}

/// The YAML tokenizer.
///
/// Produces the token stream described by [`TokenKind`]
/// from any [`Source`], pulling and transcoding bytes
/// lazily.
#[derive(Debug)]
pub(crate) struct Lexer<S>
{
    reader: Decoder<S>,
    scan:   Scan,
}

impl<S> Lexer<S>
where
    S: Source,
{
    pub fn new(src: S, pool: TextPool) -> Self
    {
        Self {
            reader: Decoder::new(src),
            scan:   Scan::new(pool),
        }
    }

    /// Fetch the next token under the given .regime.
    ///
    /// Once the stream end has been reached this returns
    /// the stream end token forever, consuming nothing.
    pub fn next(&mut self, regime: Regime) -> Result<Token>
    {
        loop
        {
            // The first chunk must be decoded before any scan,
            // so the encoding (and byte order mark) are known
            if self.reader.encoding().is_none() && !self.reader.is_exhausted()
            {
                self.reader.refill()?;
                continue;
            }

            let eof = self.reader.is_exhausted();
            let encoding = self.reader.encoding().unwrap_or(StreamEncoding::UTF8);

            match self
                .scan
                .next_token(self.reader.content(), eof, encoding, regime)
            {
                Err(LexError::Extend) if !eof =>
                {
                    self.reader.refill()?;
                },
                // A scan demanding more of an exhausted stream is
                // a truncated token
                Err(LexError::Extend) => return Err(LexError::UnexpectedEOF),
                other => return other,
            }
        }
    }

    /// Start mark of the most recently returned token
    pub fn recent_start(&self) -> Mark
    {
        self.scan.recent.0
    }

    /// End mark of the most recently returned token
    pub fn recent_end(&self) -> Mark
    {
        self.scan.recent.1
    }

    /// Start mark of the token currently being scanned
    pub fn token_start(&self) -> Mark
    {
        self.scan.token_start
    }

    /// Mark of the next unconsumed character
    pub fn current_mark(&self) -> Mark
    {
        self.scan.marks.mark()
    }

    /// The next unconsumed character, if any is buffered
    pub fn current_char(&self) -> Option<char>
    {
        self.reader.content()[self.scan.offset..].chars().next()
    }
}

/// All mutable tokenizer state, kept apart from the
/// [`Decoder`] so that scanning can borrow the decoded
/// content while mutating itself
#[derive(Debug)]
struct Scan
{
    /// Offset into the decoded content consumed so far
    offset: usize,

    /// Current stream state
    state: StreamState,

    /// Position of the next unconsumed character
    marks: MarkTracker,

    /// Line of the most recently emitted token, used to
    /// synthesize indentation tokens on new lines
    last_line: usize,

    /// Marks of the most recently returned token
    recent: (Mark, Mark),

    /// Start of the token currently being scanned
    token_start: Mark,

    /// Has the stream leading byte order mark check run?
    bom_done: bool,

    /// Active %TAG bindings, handle to prefix
    tags: HashMap<Text, Text>,

    /// Has any node content been emitted since the last
    /// document boundary? Governs when .tags reset
    in_content: bool,

    pool: TextPool,
}

impl Scan
{
    fn new(pool: TextPool) -> Self
    {
        Self {
            offset: 0,
            state: StreamState::Start,
            marks: MarkTracker::new(),
            last_line: 0,
            recent: (Mark::START, Mark::START),
            token_start: Mark::START,
            bom_done: false,
            tags: HashMap::new(),
            in_content: false,
            pool,
        }
    }

    /// Scan the next token from .base, which is the decoded
    /// stream content so far; .eof is whether that content
    /// is complete.
    ///
    /// May return LexError::Extend, in which case no token
    /// was produced and the call must be repeated with more
    /// content.
    fn next_token(
        &mut self,
        base: &str,
        eof: bool,
        encoding: StreamEncoding,
        regime: Regime,
    ) -> Result<Token>
    {
        let opts = match eof
        {
            true => O_ZEROED,
            false => O_EXTENDABLE,
        };

        // Is it the beginning of the stream?
        if self.state == StreamState::Start
        {
            self.state = StreamState::Stream;

            return Ok(self.token(TokenKind::StreamStart(encoding), self.marks.mark()));
        }

        // Terminal state, the stream end token repeats
        if self.state == StreamState::Done
        {
            return Ok(self.token(TokenKind::StreamEnd, self.marks.mark()));
        }

        // A byte order mark may lead the stream, surfaced as
        // its own token without occupying a column
        if !self.bom_done
        {
            if base[self.offset..].is_empty() && !eof
            {
                return Err(LexError::Extend);
            }

            self.bom_done = true;

            if base[self.offset..].starts_with('\u{FEFF}')
            {
                let start = self.marks.mark();

                self.marks.update_invisible('\u{FEFF}'.len_utf8());
                self.offset += '\u{FEFF}'.len_utf8();

                return Ok(self.token(TokenKind::ByteOrderMark, start));
            }
        }

        // Eat whitespace and comments to the next delimiter
        self.eat_whitespace(base, opts, regime)?;

        // Is it the end of the stream?
        if base[self.offset..].is_empty()
        {
            if !eof
            {
                return Err(LexError::Extend);
            }

            self.state = StreamState::Done;

            return Ok(self.token(TokenKind::StreamEnd, self.marks.mark()));
        }

        // A new line emits its indentation before the line's
        // first real token
        if self.marks.mark().line > self.last_line
        {
            self.last_line = self.marks.mark().line;

            let indent = self.marks.mark().column - 1;

            return Ok(self.token(TokenKind::Indent(indent), self.marks.mark()));
        }

        self.scan_token(base, opts, regime)
    }

    /// Scan a single real token from the head of the
    /// unconsumed buffer.
    ///
    /// All progress is made on local copies and committed
    /// only on success, keeping the scan restartable when
    /// it runs out of buffered content
    fn scan_token(&mut self, base: &str, opts: Flags, regime: Regime) -> Result<Token>
    {
        let mut buffer = &base[self.offset..];
        let mut marks = self.marks.clone();

        let start = marks.mark();
        self.token_start = start;

        let column = start.column;

        // 4 characters is the longest delimiter sequence we
        // can encounter ('--- ', '... ')
        cache!(~buffer, 4, opts)?;

        let kind = match buffer.as_bytes()
        {
            // Is it a directive?
            [DIRECTIVE, ..] if column == 1 =>
            {
                self.document_boundary(false);

                scan_directive(opts, &mut buffer, &mut marks, &self.pool, &mut self.tags)?
            },

            // Is it a document marker?
            [b'-', b'-', b'-', ..] if column == 1 && isWhiteSpaceZ!(~buffer, 3) =>
            {
                self.document_boundary(false);

                advance!(buffer, :marks, 3);

                TokenKind::DirectivesEnd
            },
            [b'.', b'.', b'.', ..] if column == 1 && isWhiteSpaceZ!(~buffer, 3) =>
            {
                self.document_boundary(true);

                advance!(buffer, :marks, 3);

                TokenKind::DocumentEnd
            },

            // Is it a flow collection delimiter?
            [FLOW_MAPPING_START, ..] =>
            {
                advance!(buffer, :marks, 1);

                TokenKind::FlowMappingStart
            },
            [FLOW_MAPPING_END, ..] =>
            {
                advance!(buffer, :marks, 1);

                TokenKind::FlowMappingEnd
            },
            [FLOW_SEQUENCE_START, ..] =>
            {
                advance!(buffer, :marks, 1);

                TokenKind::FlowSequenceStart
            },
            [FLOW_SEQUENCE_END, ..] =>
            {
                advance!(buffer, :marks, 1);

                TokenKind::FlowSequenceEnd
            },
            [FLOW_ENTRY, ..] =>
            {
                advance!(buffer, :marks, 1);

                TokenKind::FlowEntry
            },

            // Is it an annotation parameter list delimiter?
            [PARAMS_START, ..] if regime.is_params() =>
            {
                advance!(buffer, :marks, 1);

                TokenKind::AnnotationParamsStart
            },
            [PARAMS_END, ..] if regime.is_params() =>
            {
                advance!(buffer, :marks, 1);

                TokenKind::AnnotationParamsEnd
            },

            // Is it a block entry?
            [BLOCK_ENTRY, ..] if isWhiteSpaceZ!(~buffer, 1) =>
            {
                advance!(buffer, :marks, 1);

                TokenKind::BlockEntry
            },

            // Is it an explicit key?
            [EXPLICIT_KEY, ..] if regime.in_flow() || isWhiteSpaceZ!(~buffer, 1) =>
            {
                advance!(buffer, :marks, 1);

                TokenKind::ExplicitKey
            },

            // Is it a value?
            [VALUE, ..] if regime.in_flow() || isWhiteSpaceZ!(~buffer, 1) =>
            {
                advance!(buffer, :marks, 1);

                TokenKind::Value
            },

            // Is it an anchor or alias?
            [b @ ANCHOR, ..] | [b @ ALIAS, ..] =>
            {
                let kind = AnchorKind::new(b).expect("only & or * is bound here");

                scan_anchor(opts, &mut buffer, &mut marks, &self.pool, kind)?
            },

            // Is it a tag?
            [TAG, ..] => scan_node_tag(opts, &mut buffer, &mut marks, &self.pool, &self.tags)?,

            // Is it an annotation?
            [ANNOTATION, ..] => scan_annotation(opts, &mut buffer, &mut marks, &self.pool)?,

            // Is it a block scalar?
            [c @ LITERAL, ..] | [c @ FOLDED, ..] if regime.is_block() =>
            {
                let fold = *c == FOLDED;
                let (kind, amt) =
                    scan_block_scalar(opts, buffer, &mut marks, &self.pool, regime, fold)?;
                advance!(buffer, amt);

                kind
            },

            // Is it a quoted scalar?
            [c @ SINGLE, ..] | [c @ DOUBLE, ..] =>
            {
                let single = *c == SINGLE;
                let (kind, amt) = scan_flow_scalar(opts, buffer, &mut marks, &self.pool, single)?;
                advance!(buffer, amt);

                kind
            },

            // Is it a plain scalar?
            _ if is_plain_scalar(buffer, regime) =>
            {
                let (kind, amt) = scan_plain_scalar(opts, buffer, &mut marks, &self.pool, regime)?;
                advance!(buffer, amt);

                kind
            },

            // Otherwise its an error
            _ => return Err(LexError::UnknownDelimiter),
        };

        // Commit the scan
        self.offset = base.len() - buffer.len();
        self.marks = marks;

        if content_token(&kind)
        {
            self.in_content = true;
        }

        Ok(self.token(kind, start))
    }

    /// Chomp whitespace and comments until the next
    /// delimiter, committing the progress immediately
    fn eat_whitespace(&mut self, base: &str, opts: Flags, regime: Regime) -> Result<usize>
    {
        let mut buffer = &base[self.offset..];
        let mut chomp_line = false;
        let mut leading = self.marks.mark().column == 1;

        loop
        {
            cache!(~buffer, 1, opts)?;

            if isBlank!(~buffer)
            {
                // Indentation must be spaces; a tab in front of
                // block structure on its line is an error
                if check!(~buffer => b'\t')
                    && leading
                    && regime.is_block()
                    && !chomp_line
                    && line_has_content(buffer)
                {
                    return Err(LexError::InvalidTab);
                }

                advance!(buffer, :self.marks, 1);
            }
            else if isBreak!(~buffer)
            {
                chomp_line = false;
                leading = true;

                advance!(buffer, :self.marks, @line);
            }
            else if check!(~buffer => b'#')
            {
                chomp_line = true;

                advance!(buffer, :self.marks, @char);
            }
            else if chomp_line
            {
                advance!(buffer, :self.marks, @char);
            }
            else
            {
                break;
            }
        }

        let eaten = base.len() - self.offset - buffer.len();
        self.offset = base.len() - buffer.len();

        Ok(eaten)
    }

    /// Handle a document boundary: %TAG bindings apply to a
    /// single document, so they reset when one ends
    fn document_boundary(&mut self, end_marker: bool)
    {
        if end_marker || self.in_content
        {
            self.tags.clear();
            self.in_content = false;
        }
    }

    /// Assemble a token ending at the current position,
    /// updating the recent marks
    fn token(&mut self, kind: TokenKind, start: Mark) -> Token
    {
        let end = self.marks.mark();

        self.recent = (start, end);

        Token::new(kind, start, end)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum StreamState
{
    Start,
    Stream,
    Done,
}

/// Checks if .buffer starts with a character that could be
/// a plain scalar.
///
/// Per the YAML spec, a plain scalar cannot start with any
/// YAML indicator, excluding ':' '?' '-' when followed by a
/// plain safe character.
///
/// See:
///     YAML 1.2: Section 7.3.3
///     yaml.org/spec/1.2/spec.html#ns-plain-first(c)
fn is_plain_scalar(base: &str, regime: Regime) -> bool
{
    if isWhiteSpaceZ!(~base)
    {
        return false;
    }

    match base.as_bytes()
    {
        [DIRECTIVE, ..]
        | [ANCHOR, ..]
        | [ALIAS, ..]
        | [TAG, ..]
        | [SINGLE, ..]
        | [DOUBLE, ..]
        | [FLOW_MAPPING_START, ..]
        | [FLOW_SEQUENCE_START, ..]
        | [FLOW_MAPPING_END, ..]
        | [FLOW_SEQUENCE_END, ..]
        | [FLOW_ENTRY, ..]
        | [LITERAL, ..]
        | [FOLDED, ..]
        | [COMMENT, ..]
        | [ANNOTATION, ..]
        | [RESERVED, ..] => false,
        [VALUE, ..] | [EXPLICIT_KEY, ..] | [BLOCK_ENTRY, ..]
            if !is_plain_safe(base, 1, regime) =>
        {
            false
        },
        _ => true,
    }
}

/// Checks if the character at .offset is "safe" inside a
/// plain scalar for the given .regime, as defined in
///
/// yaml.org/spec/1.2/spec.html#ns-plain-safe(c)
fn is_plain_safe(base: &str, offset: usize, regime: Regime) -> bool
{
    let not_whitespace = !isWhiteSpaceZ!(~base, offset);

    match regime.in_flow()
    {
        true => not_whitespace && !isFlowIndicator!(~base, offset),
        false => not_whitespace,
    }
}

/// Checks whether the line starting .buffer has anything on
/// it beyond whitespace and comments
fn line_has_content(buffer: &str) -> bool
{
    let mut rest = buffer;

    loop
    {
        if isBreakZ!(~rest) || check!(~rest => b'#')
        {
            return false;
        }

        if !isBlank!(~rest)
        {
            return true;
        }

        advance!(rest, 1);
    }
}

/// Does this token kind constitute document content,
/// rather than framing?
fn content_token(kind: &TokenKind) -> bool
{
    !matches!(
        Marker::from(kind),
        Marker::StreamStart
            | Marker::StreamEnd
            | Marker::ByteOrderMark
            | Marker::VersionDirective
            | Marker::TagDirective
            | Marker::ReservedDirective
            | Marker::DirectivesEnd
            | Marker::DocumentEnd
            | Marker::Indent
    )
}

/// One token of lookahead over a [`Lexer`].
///
/// The parser peeks to decide state transitions and pops
/// once it commits; a peeked token is sticky until consumed
#[derive(Debug)]
pub(crate) struct PeekLexer<S>
{
    lexer:  Lexer<S>,
    peeked: Option<Token>,
}

impl<S> PeekLexer<S>
where
    S: Source,
{
    pub fn new(lexer: Lexer<S>) -> Self
    {
        Self {
            lexer,
            peeked: None,
        }
    }

    /// View the next token without consuming it
    pub fn peek(&mut self, regime: Regime) -> Result<&Token>
    {
        if self.peeked.is_none()
        {
            self.peeked = Some(self.lexer.next(regime)?);
        }

        match self.peeked
        {
            Some(ref token) => Ok(token),
            None => unreachable!("peek slot was just filled"),
        }
    }

    /// Consume and return the next token
    pub fn pop(&mut self, regime: Regime) -> Result<Token>
    {
        match self.peeked.take()
        {
            Some(token) => Ok(token),
            None => self.lexer.next(regime),
        }
    }

    pub fn lexer(&self) -> &Lexer<S>
    {
        &self.lexer
    }
}

const DIRECTIVE: u8 = b'%';
const ANCHOR: u8 = b'&';
const ALIAS: u8 = b'*';
const TAG: u8 = b'!';
const SINGLE: u8 = b'\'';
const DOUBLE: u8 = b'"';
const VALUE: u8 = b':';
const FLOW_MAPPING_START: u8 = b'{';
const FLOW_MAPPING_END: u8 = b'}';
const FLOW_SEQUENCE_START: u8 = b'[';
const FLOW_SEQUENCE_END: u8 = b']';
const FLOW_ENTRY: u8 = b',';
const BLOCK_ENTRY: u8 = b'-';
const EXPLICIT_KEY: u8 = b'?';
const LITERAL: u8 = b'|';
const FOLDED: u8 = b'>';
const COMMENT: u8 = b'#';
const ANNOTATION: u8 = b'@';
const RESERVED: u8 = b'`';
const PARAMS_START: u8 = b'(';
const PARAMS_END: u8 = b')';

#[cfg(test)]
mod tests
{
    #[macro_use]
    mod macros;

    mod annotation;
    mod collection;
    mod document;
    mod properties;
    mod scalar;

    use super::*;
    use crate::source::slice::SliceSource;

    /// Iterator over the token stream of a str, for tests
    pub(in crate::lexer) struct ScanIter<'a>
    {
        lexer: Lexer<SliceSource<'a>>,
        done:  bool,
    }

    impl<'a> ScanIter<'a>
    {
        pub fn new(data: &'a str) -> Self
        {
            Self {
                lexer: Lexer::new(SliceSource::new(data.as_bytes()), TextPool::new()),
                done:  false,
            }
        }

        pub fn next_token(&mut self, regime: Regime) -> Result<Option<Token>>
        {
            if self.done
            {
                return Ok(None);
            }

            let token = self.lexer.next(regime)?;

            if token.marker() == Marker::StreamEnd
            {
                self.done = true;
            }

            Ok(Some(token))
        }
    }

    #[test]
    fn empty_stream()
    {
        let mut scan = ScanIter::new("");

        let start = scan.next_token(Regime::Block(-2)).unwrap().unwrap();
        let end = scan.next_token(Regime::Block(-2)).unwrap().unwrap();

        assert_eq!(start.marker(), Marker::StreamStart);
        assert_eq!(end.marker(), Marker::StreamEnd);
        assert_eq!(scan.next_token(Regime::Block(-2)).unwrap(), None);
    }

    #[test]
    fn stream_end_is_idempotent()
    {
        let mut lexer = Lexer::new(SliceSource::new(b""), TextPool::new());

        assert_eq!(
            lexer.next(Regime::Block(-2)).unwrap().marker(),
            Marker::StreamStart
        );

        for _ in 0..3
        {
            assert_eq!(
                lexer.next(Regime::Block(-2)).unwrap().marker(),
                Marker::StreamEnd
            );
        }
    }

    #[test]
    fn byte_order_mark_token()
    {
        let mut scan = ScanIter::new("\u{FEFF}key");

        let start = scan.next_token(Regime::Block(-2)).unwrap().unwrap();
        let bom = scan.next_token(Regime::Block(-2)).unwrap().unwrap();

        assert_eq!(start.marker(), Marker::StreamStart);
        assert_eq!(bom.marker(), Marker::ByteOrderMark);

        // The mark occupies stream indices but no column
        assert_eq!(bom.start.column, 1);
        assert_eq!(bom.end.column, 1);
        assert_eq!(bom.end.index, 3);
    }
}
