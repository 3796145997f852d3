/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! This module exposes the [`Parser`] struct and related
//! types. The Parser drives the [`Lexer`] over a byte
//! [`Source`], interpreting the token sequence into a
//! series of [`Event`]s. These events are the core output
//! of this library.
//!
//! ## Invoking the Parser
//!
//! The two interesting methods on a [`Parser`] are:
//!
//! 1. [`next_event`](Parser#method.next_event)
//! 2. [`into_iter`](Parser#method.into_iter)
//!
//! The first returns the next [`Event`] (naturally), while
//! the second returns an interface implementing
//! [`Iterator`], allowing one to hook into that entire
//! ecosystem.
//!
//! ## Structure
//!
//! The Parser is a stack of (state, indentation) levels.
//! Each `next_event` call runs the state at the top of the
//! stack, which peeks at the head of the token stream,
//! transitions, and either produces an event or yields so
//! the loop re-enters with the new top. Before every token
//! request the parser tells the lexer which token family it
//! expects, via [`Regime`]; that feedback loop is what
//! makes YAML tokenizable at all.
//!
//! [`Lexer`]: struct@crate::lexer::Lexer
//! [`Source`]: trait@crate::source::Source

#[macro_use]
mod macros;

use crate::{
    error::Result,
    event::{
        error::{ParseError, ParseResult},
        state::{
            Flags, Level, State, StateMachine, FLOW_INDENT, O_BLOCK, O_EMPTY, O_EXPLICIT, O_FIRST,
            O_IMPLICIT, O_IMPLICITABLE, O_NIL, O_PARAMS, ROOT_INDENT,
        },
        types::{
            Alias, Annotation, CollectionStyle, Directives, DocumentEnd, DocumentStart, Event,
            EventData, Mapping, Node, NodeKind, ReservedDirective, Scalar, Sequence, StreamStart,
            TagDirectives, VersionDirective, DEFAULT_TAGS, DEFAULT_VERSION,
        },
    },
    intern::{Text, TextPool},
    lexer::{Lexer, PeekLexer, Regime},
    mark::Mark,
    source::{slice::SliceSource, Source},
    token::{Marker, ScalarStyle, Token},
};

/// The maximum nesting depth accepted by default; see
/// [`Parser::with_max_depth`]
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Maximum byte length of an implicit mapping key,
/// including the distance to its ':' indicator
const MAX_IMPLICIT_KEY: usize = 1024;

/// The [`Parser`] interprets the token stream of a
/// [`Source`]'s bytes as a series of [`Event`]s.
///
/// A Parser iteratively consumes its stream, ending when
/// the stream end event has been produced, after which it
/// always returns None.
///
/// The first error is terminal: the event stream ends, and
/// the mark accessors describe where in the input the
/// failure happened.
///
/// [`Source`]: trait@crate::source::Source
#[derive(Debug)]
pub struct Parser<S>
{
    lexer: PeekLexer<S>,
    state: StateMachine,
    pool:  TextPool,

    /// Directives collected for the upcoming document
    pending: PendingDirectives,

    /// Node properties read but not yet attached
    props: Props,

    /// A node event synthesized early, emitted on the next
    /// state transition
    cached: Option<Event>,

    max_depth: usize,
    done:      bool,
}

impl<'a> Parser<SliceSource<'a>>
{
    /// Instantiate a new [`Parser`] over the given UTF8
    /// string slice
    pub fn from_utf8(data: &'a str) -> Self
    {
        Self::new(SliceSource::new(data.as_bytes()))
    }

    /// Instantiate a new [`Parser`] over the given byte
    /// slice, in any supported encoding
    pub fn from_slice(data: &'a [u8]) -> Self
    {
        Self::new(SliceSource::new(data))
    }
}

impl<S> Parser<S>
where
    S: Source,
{
    /// Instantiate a new [`Parser`], ready to consume the
    /// given byte source
    pub fn new(src: S) -> Self
    {
        let pool = TextPool::new();

        Self {
            lexer: PeekLexer::new(Lexer::new(src, pool.clone())),
            state: StateMachine::default(),
            pool,
            pending: PendingDirectives::default(),
            props: Props::default(),
            cached: None,
            max_depth: DEFAULT_MAX_DEPTH,
            done: false,
        }
    }

    /// Set the maximum nesting depth, above which parsing
    /// fails rather than growing the level stack
    pub fn with_max_depth(mut self, max_depth: usize) -> Self
    {
        self.max_depth = max_depth;

        self
    }

    /// Reset this [`Parser`], pointing it at a new byte
    /// source. Any partially consumed stream is abandoned.
    pub fn set_input(&mut self, src: S)
    {
        self.lexer = PeekLexer::new(Lexer::new(src, self.pool.clone()));
        self.state = StateMachine::default();
        self.pending = PendingDirectives::default();
        self.props = Props::default();
        self.cached = None;
        self.done = false;
    }

    /// Fetch the next [`Event`] from the underlying stream,
    /// or None once the stream end has been produced.
    ///
    /// The first error is terminal; subsequent calls return
    /// None.
    pub fn next_event(&mut self) -> Option<Result<Event>>
    {
        match self.get_next_event()
        {
            Ok(event) => event.map(Ok),
            Err(e) =>
            {
                self.done = true;

                Some(Err(self.contextualize(e)))
            },
        }
    }

    /// Provides an [`Iterator`] interface to this
    /// [`Parser`]
    #[allow(clippy::wrong_self_convention)]
    pub fn into_iter(&mut self) -> EventIter<'_, S>
    {
        EventIter::new(self)
    }

    /// Start mark of the most recent token produced by the
    /// underlying lexer
    pub fn recent_token_start(&self) -> Mark
    {
        self.lexer.lexer().recent_start()
    }

    /// End mark of the most recent token produced by the
    /// underlying lexer
    pub fn recent_token_end(&self) -> Mark
    {
        self.lexer.lexer().recent_end()
    }

    /// Start mark of the token the lexer is currently
    /// scanning
    pub fn current_token_start(&self) -> Mark
    {
        self.lexer.lexer().token_start()
    }

    /// The next unconsumed input character, if any is
    /// buffered
    pub fn current_character(&self) -> Option<char>
    {
        self.lexer.lexer().current_char()
    }

    /// Runs the state machine until it either provides the
    /// next [`Event`], an error, or the machine is finished
    fn get_next_event(&mut self) -> ParseResult<Option<Event>>
    {
        let mut event = None;

        // Main loop, continue until an event is produced, an
        // error is returned or we're marked as finished
        while !self.done && event.is_none()
        {
            event = self.state_transition()?;
        }

        Ok(event)
    }

    /// Process the next state in the state machine, running
    /// the associated routine
    fn state_transition(&mut self) -> ParseResult<Option<Event>>
    {
        let Level { state, indent } = self.state.top().clone();

        match state
        {
            State::StreamStart => self.stream_start(),
            State::StreamEnd => self.stream_end(),
            State::DocumentStart(opts) => self.document_start(opts),
            State::DocumentContent => self.document_content(),
            State::DocumentEnd => self.document_end(),
            State::Node(kind, opts) => self.pending_node(kind, opts, indent),
            State::BlockSequenceEntry => self.block_sequence_entry(indent),
            State::BlockMappingKey => self.block_mapping_key(indent),
            State::BlockMappingValue(opts) => self.block_mapping_value(opts, indent),
            State::ImplicitMappingKey => self.implicit_mapping_key(),
            State::FlowSequenceEntry(opts) => self.flow_sequence_entry(opts),
            State::FlowSequenceMappingKey => self.flow_sequence_entry_mapping_key(),
            State::FlowSequenceMappingValue => self.flow_sequence_entry_mapping_value(),
            State::FlowSequenceMappingEnd => self.flow_sequence_entry_mapping_end(),
            State::FlowMappingKey(opts) => self.flow_mapping_key(opts),
            State::FlowMappingValue(opts) => self.flow_mapping_value(opts),
            State::AnnotationParams => self.annotation_params(),
            State::AnnotationParam(opts) => self.annotation_param(opts),
        }
    }

    /// Start of the token stream, emit the stream start
    /// event
    fn stream_start(&mut self) -> ParseResult<Option<Event>>
    {
        let (start, end, encoding) = consume!(self, Regime::Block(ROOT_INDENT), StreamStart(e));

        state!(~self, -> State::DocumentStart(O_IMPLICIT));

        let event = Event::new(start, end, EventData::StreamStart(StreamStart {
            encoding,
        }));

        Ok(Some(event))
    }

    /// End of the token stream, emit the stream end event
    /// and finish
    fn stream_end(&mut self) -> ParseResult<Option<Event>>
    {
        if self.done
        {
            return Ok(None);
        }

        let token = pop!(self, Regime::Block(ROOT_INDENT));

        if token.marker() != Marker::StreamEnd
        {
            return Err(ParseError::CorruptStream);
        }

        self.done = true;

        let event = Event::new(token.start, token.end, EventData::StreamEnd);

        Ok(Some(event))
    }

    /// Start of a new document, collect any directives,
    /// determine whether the document is explicit and prime
    /// the state machine accordingly
    fn document_start(&mut self, opts: Flags) -> ParseResult<Option<Event>>
    {
        let regime = Regime::Block(ROOT_INDENT);

        // Collect everything that may precede the document
        // proper: the byte order mark, directives, and stray
        // end markers
        loop
        {
            match peek!(~self, regime)
            {
                Marker::ByteOrderMark =>
                {
                    pop!(self, regime);
                },
                Marker::VersionDirective =>
                {
                    let (_, _, major, minor) = consume!(self, regime, VersionDirective(a, b));

                    if self.pending.version.is_some()
                    {
                        return Err(ParseError::DuplicateVersion);
                    }

                    self.pending.version = Some(VersionDirective { major, minor });
                },
                Marker::TagDirective =>
                {
                    let (_, _, handle, prefix) = consume!(self, regime, TagDirective(h, p));

                    // %TAG directives with the same handle are an error
                    //
                    // See:
                    //  yaml.org/spec/1.2.2/#682-tag-directives
                    if self.pending.tags.contains_key(&handle)
                    {
                        return Err(ParseError::DuplicateTagDirective);
                    }

                    self.pending.tags.insert(handle, prefix);
                },
                Marker::ReservedDirective =>
                {
                    let (_, _, name, argument) = consume!(self, regime, ReservedDirective(n, a));

                    self.pending.reserved.push(ReservedDirective { name, argument });
                },
                // A '...' with no open document is skipped
                Marker::DocumentEnd =>
                {
                    pop!(self, regime);
                },
                _ => break,
            }
        }

        let (start, end, marker) = peek!(self, regime);
        let directives = self.pending.is_some();

        match marker
        {
            Marker::StreamEnd if directives => Err(ParseError::MissingDocumentStart),
            Marker::StreamEnd =>
            {
                state!(~self, -> State::StreamEnd);

                Ok(None)
            },
            Marker::DirectivesEnd =>
            {
                pop!(self, regime);

                let event = self.document_start_event(start, end, !IMPLICIT);

                state!(~self, >> State::DocumentEnd, @ROOT_INDENT);
                state!(~self, -> State::DocumentContent, @ROOT_INDENT);

                Ok(Some(event))
            },
            _ if directives || !opts.contains(O_IMPLICIT) =>
            {
                Err(ParseError::MissingDocumentStart)
            },
            // Implicit document, the node begins directly
            _ =>
            {
                let event = self.document_start_event(start, start, IMPLICIT);

                state!(~self, >> State::DocumentEnd, @ROOT_INDENT);
                state!(~self, -> State::Node(NodeKind::Root, O_BLOCK | O_IMPLICITABLE), @ROOT_INDENT);

                Ok(Some(event))
            },
        }
    }

    /// An explicit document's content, which may be absent
    /// entirely, in which case the document holds a single
    /// empty scalar
    fn document_content(&mut self) -> ParseResult<Option<Event>>
    {
        let regime = Regime::Block(ROOT_INDENT);
        let (start, _, marker) = peek!(self, regime);

        let empty = matches!(
            marker,
            Marker::DirectivesEnd
                | Marker::DocumentEnd
                | Marker::StreamEnd
                | Marker::VersionDirective
                | Marker::TagDirective
                | Marker::ReservedDirective
        );

        if empty
        {
            state!(~self, << None);

            return self.empty_scalar(start, NodeKind::Root).map(Some);
        }

        self.node(regime, NodeKind::Root, IMPLICITABLE, !INDENTLESS)
    }

    /// End of a document, determine whether it is explicit
    /// and which kind of start the next document requires
    fn document_end(&mut self) -> ParseResult<Option<Event>>
    {
        let regime = Regime::Block(ROOT_INDENT);
        let (start, mut end, marker) = peek!(self, regime);
        let mut implicit = true;

        match marker
        {
            Marker::DocumentEnd =>
            {
                pop!(self, regime);

                implicit = false;
            },
            Marker::StreamEnd
            | Marker::DirectivesEnd
            | Marker::VersionDirective
            | Marker::TagDirective
            | Marker::ReservedDirective =>
            {
                // The event is virtual, it has no real length
                end = start;
            },
            _ => return Err(ParseError::MissingDocumentStart),
        }

        // After an explicit '...' a bare document may follow;
        // after an implicit end the next document start must
        // be explicit
        let opts = match implicit
        {
            true => O_NIL,
            false => O_IMPLICIT,
        };

        state!(~self, -> State::DocumentStart(opts));

        let event = Event::new(start, end, EventData::DocumentEnd(DocumentEnd { implicit }));

        Ok(Some(event))
    }

    /// A saved node expectation, resumed after an
    /// annotation completed
    fn pending_node(&mut self, kind: NodeKind, opts: Flags, indent: i64)
        -> ParseResult<Option<Event>>
    {
        let regime = match (opts.contains(O_BLOCK), opts.contains(O_PARAMS))
        {
            (true, _) => Regime::Block(indent),
            (_, true) => Regime::Params,
            _ => Regime::Flow,
        };

        self.node(regime, kind, opts.contains(O_IMPLICITABLE), !INDENTLESS)
    }

    /// Produce a node event: a scalar, alias, annotation or
    /// collection start, resolving the block implicit key
    /// question where relevant.
    ///
    /// .indentless permits a block sequence at the
    /// governing indentation itself, which YAML allows in
    /// exactly one position: a mapping's value.
    ///
    /// Expects the current top level to be the node's slot:
    /// leaf nodes pop it, collection starts replace it
    fn node(
        &mut self,
        regime: Regime,
        kind: NodeKind,
        implicitable: bool,
        indentless: bool,
    ) -> ParseResult<Option<Event>>
    {
        self.read_props(regime)?;

        let (start, _, marker) = peek!(self, regime);

        match marker
        {
            Marker::Alias if self.props.is_empty() =>
            {
                let (a_start, a_end, name) = consume!(self, regime, Alias(n));

                // An alias may itself be an implicit mapping key
                if regime.is_block()
                {
                    let (n_start, _, n_marker) = peek!(self, regime);

                    if n_marker == Marker::Value && n_start.line == a_end.line
                    {
                        if !implicitable
                        {
                            return Err(ParseError::InvalidKey);
                        }

                        let event = Event::new(
                            a_start,
                            a_start,
                            EventData::MappingStart(Node {
                                anchor:  None,
                                tag:     None,
                                content: Mapping {
                                    style: CollectionStyle::Block,
                                },
                                kind,
                            }),
                        );

                        self.cached = Some(Event::new(
                            a_start,
                            a_end,
                            EventData::Alias(Alias { name }),
                        ));

                        let indent = a_start.column as i64 - 1;
                        state!(~self, -> State::ImplicitMappingKey, @indent);

                        return Ok(Some(event));
                    }
                }

                state!(~self, << None);

                let event = Event::new(a_start, a_end, EventData::Alias(Alias { name }));

                Ok(Some(event))
            },
            Marker::Scalar =>
            {
                let (s_start, s_end, data, style) = consume!(self, regime, Scalar(t, s));

                if regime.is_block()
                {
                    let (n_start, _, n_marker) = peek!(self, regime);

                    if n_marker == Marker::Value && n_start.line == s_end.line
                    {
                        return self.implicit_map_from_scalar(
                            kind,
                            implicitable,
                            (s_start, s_end, data, style),
                            n_start,
                        );
                    }
                }

                let (anchor, tag, p_start) = self.props.take();
                state!(~self, << None);

                let event = Event::new(
                    p_start.unwrap_or(s_start),
                    s_end,
                    EventData::Scalar(Node {
                        anchor,
                        tag,
                        content: Scalar::new(data, style),
                        kind,
                    }),
                );

                Ok(Some(event))
            },
            Marker::FlowSequenceStart =>
            {
                let token = pop!(self, regime);
                let (anchor, tag, p_start) = self.props.take();

                state!(~self, -> State::FlowSequenceEntry(O_FIRST), @FLOW_INDENT);

                let event = Event::new(
                    p_start.unwrap_or(token.start),
                    token.end,
                    EventData::SequenceStart(Node {
                        anchor,
                        tag,
                        content: Sequence {
                            style: CollectionStyle::Flow,
                        },
                        kind,
                    }),
                );

                Ok(Some(event))
            },
            Marker::FlowMappingStart =>
            {
                let token = pop!(self, regime);
                let (anchor, tag, p_start) = self.props.take();

                state!(~self, -> State::FlowMappingKey(O_FIRST), @FLOW_INDENT);

                let event = Event::new(
                    p_start.unwrap_or(token.start),
                    token.end,
                    EventData::MappingStart(Node {
                        anchor,
                        tag,
                        content: Mapping {
                            style: CollectionStyle::Flow,
                        },
                        kind,
                    }),
                );

                Ok(Some(event))
            },
            // Start of sequence (block); the '-' is consumed
            // by the sequence entry state.
            //
            // An entry indicator at the governing
            // indentation belongs to the enclosing
            // collection, except in the indentless position
            Marker::BlockEntry
                if regime.is_block()
                    && (start.column as i64 - 1 > regime.indent() || indentless) =>
            {
                let (anchor, tag, p_start) = self.props.take();
                let indent = start.column as i64 - 1;

                state!(~self, -> State::BlockSequenceEntry, @indent);

                let event = Event::new(
                    p_start.unwrap_or(start),
                    start,
                    EventData::SequenceStart(Node {
                        anchor,
                        tag,
                        content: Sequence {
                            style: CollectionStyle::Block,
                        },
                        kind,
                    }),
                );

                Ok(Some(event))
            },
            // Start of mapping with an explicit key (block);
            // the '?' is consumed by the key state
            Marker::ExplicitKey if regime.is_block() =>
            {
                let (anchor, tag, p_start) = self.props.take();
                let indent = start.column as i64 - 1;

                state!(~self, -> State::BlockMappingKey, @indent);

                let event = Event::new(
                    p_start.unwrap_or(start),
                    start,
                    EventData::MappingStart(Node {
                        anchor,
                        tag,
                        content: Mapping {
                            style: CollectionStyle::Block,
                        },
                        kind,
                    }),
                );

                Ok(Some(event))
            },
            // A lone ':' opens a mapping with an empty
            // implicit key
            Marker::Value if regime.is_block() =>
            {
                if !implicitable
                {
                    return Err(ParseError::InvalidKey);
                }

                let (anchor, tag, p_start) = self.props.take();
                let indent = start.column as i64 - 1;

                let event = Event::new(
                    p_start.unwrap_or(start),
                    start,
                    EventData::MappingStart(Node {
                        anchor,
                        tag,
                        content: Mapping {
                            style: CollectionStyle::Block,
                        },
                        kind,
                    }),
                );

                self.cached = Some(self.empty_scalar(start, NodeKind::Key)?);

                state!(~self, -> State::ImplicitMappingKey, @indent);

                Ok(Some(event))
            },
            Marker::AnnotationStart =>
            {
                if !self.props.is_empty()
                {
                    return Err(ParseError::AnnotationAfterProperties);
                }

                let (a_start, a_end, name) = consume!(self, regime, AnnotationStart(n));

                // Re-attempt this node once the annotation's
                // parameters are done
                let mut opts = O_NIL;

                if regime.is_block()
                {
                    opts |= O_BLOCK;
                }
                if regime.is_params()
                {
                    opts |= O_PARAMS;
                }
                if implicitable
                {
                    opts |= O_IMPLICITABLE;
                }

                let indent = self.state.top().indent;

                state!(~self, -> State::Node(kind, opts), @indent);
                state!(~self, ^ State::AnnotationParams, @FLOW_INDENT);

                let event = Event::new(
                    a_start,
                    a_end,
                    EventData::AnnotationStart(Annotation { name }),
                );

                Ok(Some(event))
            },
            // Dangling properties bind to an empty scalar
            _ if !self.props.is_empty() =>
            {
                let (anchor, tag, p_start) = self.props.take();
                let mark = p_start.unwrap_or(start);

                state!(~self, << None);

                let event = Event::new(
                    mark,
                    mark,
                    EventData::Scalar(Node {
                        anchor,
                        tag,
                        content: Scalar::new(self.pool.empty(), ScalarStyle::Plain),
                        kind,
                    }),
                );

                Ok(Some(event))
            },
            _ => Err(ParseError::MissingNode),
        }
    }

    /// A scalar directly followed by ':' on its line opens
    /// a block mapping: emit the mapping start, cache the
    /// scalar as its first key
    fn implicit_map_from_scalar(
        &mut self,
        kind: NodeKind,
        implicitable: bool,
        (s_start, s_end, data, style): (Mark, Mark, Text, ScalarStyle),
        value_start: Mark,
    ) -> ParseResult<Option<Event>>
    {
        if !implicitable
        {
            return Err(ParseError::InvalidKey);
        }

        // Implicit keys are restricted to a single line, and
        // 1024 characters including the ':'
        //
        // See:
        //  yaml.org/spec/1.2/spec.html#ns-s-implicit-yaml-key(c)
        if s_start.line != s_end.line
            || value_start.index.saturating_sub(s_start.index) > MAX_IMPLICIT_KEY
        {
            return Err(ParseError::InvalidKey);
        }

        // Properties preceding the key bind to the mapping,
        // not the key
        let (anchor, tag, p_start) = self.props.take();
        let map_start = p_start.unwrap_or(s_start);
        let indent = map_start.column as i64 - 1;

        let event = Event::new(
            map_start,
            map_start,
            EventData::MappingStart(Node {
                anchor,
                tag,
                content: Mapping {
                    style: CollectionStyle::Block,
                },
                kind,
            }),
        );

        self.cached = Some(Event::new(
            s_start,
            s_end,
            EventData::Scalar(Node {
                anchor:  None,
                tag:     None,
                content: Scalar::new(data, style),
                kind:    NodeKind::Key,
            }),
        ));

        state!(~self, -> State::ImplicitMappingKey, @indent);

        Ok(Some(event))
    }

    /// Emit the key cached when an implicit mapping was
    /// synthesized, then expect its value
    fn implicit_mapping_key(&mut self) -> ParseResult<Option<Event>>
    {
        let event = self.cached.take().ok_or(ParseError::CorruptStream)?;

        state!(~self, -> State::BlockMappingValue(O_NIL));

        Ok(Some(event))
    }

    /// Block context sequence entry, producing the next
    /// entry node or the sequence end
    fn block_sequence_entry(&mut self, indent: i64) -> ParseResult<Option<Event>>
    {
        let regime = Regime::Block(indent);
        let (start, _, marker) = peek!(self, regime);

        if framing(marker)
        {
            state!(~self, << None);

            let event = Event::new(start, start, EventData::SequenceEnd);

            return Ok(Some(event));
        }

        let column = start.column as i64 - 1;

        match marker
        {
            Marker::BlockEntry if column == indent =>
            {
                let token = pop!(self, regime);
                let (n_start, _, n_marker) = peek!(self, regime);
                let n_column = n_start.column as i64 - 1;

                // An entry is empty if its line holds nothing
                // else and the next token dedents, repeats the
                // entry indicator, or ends the stream
                let empty = framing(n_marker)
                    || (n_marker == Marker::BlockEntry
                        && n_start.line > token.start.line
                        && n_column == indent)
                    || (n_start.line > token.start.line && n_column <= indent);

                if empty
                {
                    return self.empty_scalar(token.end, NodeKind::Entry).map(Some);
                }

                state!(~self, >> State::BlockSequenceEntry, @indent);

                self.node(regime, NodeKind::Entry, IMPLICITABLE, !INDENTLESS)
            },
            Marker::BlockEntry if column < indent =>
            {
                state!(~self, << None);

                let event = Event::new(start, start, EventData::SequenceEnd);

                Ok(Some(event))
            },
            _ if column <= indent =>
            {
                state!(~self, << None);

                let event = Event::new(start, start, EventData::SequenceEnd);

                Ok(Some(event))
            },
            _ => Err(ParseError::MissingBlockEntry),
        }
    }

    /// Block context mapping key, producing the next key
    /// node or the mapping end
    fn block_mapping_key(&mut self, indent: i64) -> ParseResult<Option<Event>>
    {
        let regime = Regime::Block(indent);
        let (start, _, marker) = peek!(self, regime);

        if framing(marker)
        {
            state!(~self, << None);

            let event = Event::new(start, start, EventData::MappingEnd);

            return Ok(Some(event));
        }

        let column = start.column as i64 - 1;

        if column < indent
        {
            state!(~self, << None);

            let event = Event::new(start, start, EventData::MappingEnd);

            return Ok(Some(event));
        }

        if column > indent
        {
            return Err(ParseError::InvalidIndentation);
        }

        match marker
        {
            // An explicit '? key' entry
            Marker::ExplicitKey =>
            {
                let token = pop!(self, regime);
                let (n_start, _, n_marker) = peek!(self, regime);
                let n_column = n_start.column as i64 - 1;

                // The key is empty when nothing follows on the
                // line and the next line does not indent past us
                let empty = framing(n_marker)
                    || (n_start.line > token.start.line && n_column <= indent);

                if empty
                {
                    state!(~self, -> State::BlockMappingValue(O_EXPLICIT));

                    return self.empty_scalar(token.end, NodeKind::Key).map(Some);
                }

                state!(~self, >> State::BlockMappingValue(O_EXPLICIT), @indent);

                self.node(regime, NodeKind::Key, IMPLICITABLE, !INDENTLESS)
            },
            // An implied empty key, ': value' at our column
            Marker::Value =>
            {
                state!(~self, -> State::BlockMappingValue(O_NIL));

                self.empty_scalar(start, NodeKind::Key).map(Some)
            },
            _ => self.simple_key(regime, indent),
        }
    }

    /// A non-explicit block mapping key: properties, then a
    /// scalar or alias, then a same-line ':'
    fn simple_key(&mut self, regime: Regime, indent: i64) -> ParseResult<Option<Event>>
    {
        self.read_props(regime)?;

        let (start, _, marker) = peek!(self, regime);

        match marker
        {
            Marker::Scalar =>
            {
                let (s_start, s_end, data, style) = consume!(self, regime, Scalar(t, s));

                self.require_value_indicator(regime, s_start, s_end)?;

                let (anchor, tag, p_start) = self.props.take();

                state!(~self, -> State::BlockMappingValue(O_NIL));

                let event = Event::new(
                    p_start.unwrap_or(s_start),
                    s_end,
                    EventData::Scalar(Node {
                        anchor,
                        tag,
                        content: Scalar::new(data, style),
                        kind: NodeKind::Key,
                    }),
                );

                Ok(Some(event))
            },
            Marker::Alias if self.props.is_empty() =>
            {
                let (a_start, a_end, name) = consume!(self, regime, Alias(n));

                self.require_value_indicator(regime, a_start, a_end)?;

                state!(~self, -> State::BlockMappingValue(O_NIL));

                let event = Event::new(a_start, a_end, EventData::Alias(Alias { name }));

                Ok(Some(event))
            },
            // A flow collection may be a key: parse it in
            // full, then expect the ':'
            Marker::FlowSequenceStart | Marker::FlowMappingStart =>
            {
                state!(~self, >> State::BlockMappingValue(O_NIL), @indent);

                self.node(regime, NodeKind::Key, !IMPLICITABLE, !INDENTLESS)
            },
            _ if !self.props.is_empty() =>
            {
                // Dangling properties: an empty key
                let (anchor, tag, p_start) = self.props.take();

                state!(~self, -> State::BlockMappingValue(O_NIL));

                let event = Event::new(
                    p_start.unwrap_or(start),
                    p_start.unwrap_or(start),
                    EventData::Scalar(Node {
                        anchor,
                        tag,
                        content: Scalar::new(self.pool.empty(), ScalarStyle::Plain),
                        kind: NodeKind::Key,
                    }),
                );

                Ok(Some(event))
            },
            _ => Err(ParseError::MissingKey),
        }
    }

    /// An implicit key must be followed by a ':' on the
    /// same line, within the length limit
    fn require_value_indicator(&mut self, regime: Regime, start: Mark, end: Mark)
        -> ParseResult<()>
    {
        let (v_start, _, v_marker) = peek!(self, regime);

        if v_marker != Marker::Value
        {
            return Err(ParseError::MissingValue);
        }

        if v_start.line != end.line
            || start.line != end.line
            || v_start.index.saturating_sub(start.index) > MAX_IMPLICIT_KEY
        {
            return Err(ParseError::InvalidKey);
        }

        Ok(())
    }

    /// Block context mapping value, producing the value
    /// node, an implied empty value, or deferring to the
    /// next key
    fn block_mapping_value(&mut self, opts: Flags, indent: i64) -> ParseResult<Option<Event>>
    {
        let regime = Regime::Block(indent);
        let explicit = opts.contains(O_EXPLICIT);
        let (start, _, marker) = peek!(self, regime);

        if marker != Marker::Value
        {
            // We have already produced this entry's key, so a
            // value is implied regardless of what follows
            state!(~self, -> State::BlockMappingKey);

            return self.empty_scalar(start, NodeKind::Value).map(Some);
        }

        let column = start.column as i64 - 1;

        // An explicit entry's ':' sits on its own line, at
        // the mapping's indentation
        if explicit && column != indent
        {
            return Err(ParseError::InvalidIndentation);
        }

        let token = pop!(self, regime);
        let (n_start, _, n_marker) = peek!(self, regime);
        let n_column = n_start.column as i64 - 1;

        // Where may the value node live? On the ':' line, or
        // on following lines indented past the mapping. A
        // block sequence is additionally allowed at the
        // mapping's own indentation
        let same_line = n_start.line == token.start.line;
        let nested = n_start.line > token.start.line && n_column > indent;
        let zero_indented =
            n_marker == Marker::BlockEntry && n_start.line > token.start.line && n_column == indent;

        if framing(n_marker) || !(same_line || nested || zero_indented)
        {
            state!(~self, -> State::BlockMappingKey);

            return self.empty_scalar(n_start, NodeKind::Value).map(Some);
        }

        state!(~self, >> State::BlockMappingKey, @indent);

        // A value on the ':' line cannot itself open an
        // implicit mapping
        self.node(regime, NodeKind::Value, !same_line, !same_line)
    }

    /// Flow context sequence entry, producing the next
    /// entry, a nested single pair mapping, or the sequence
    /// end
    fn flow_sequence_entry(&mut self, opts: Flags) -> ParseResult<Option<Event>>
    {
        let regime = Regime::Flow;
        let first = opts.contains(O_FIRST);

        let (start, end, mut marker) = peek!(self, regime);

        if framing(marker)
        {
            return Err(ParseError::MissingFlowSequenceEntryOrEnd);
        }

        if marker == Marker::FlowSequenceEnd
        {
            pop!(self, regime);
            state!(~self, << None);

            return Ok(Some(Event::new(start, end, EventData::SequenceEnd)));
        }

        /*
         * If its not the first entry, there *must* be a
         * separator, e.g:
         *
         * [ one, two, three ]
         *  ^   ^    ^
         *  |   But the rest must have an entry
         *  Okay to skip the first ','
         */
        if !first
        {
            if marker != Marker::FlowEntry
            {
                return Err(ParseError::MissingFlowSequenceEntryOrEnd);
            }

            pop!(self, regime);

            // A trailing ',' before the close is tolerated
            let (start, end, m) = peek!(self, regime);

            if m == Marker::FlowSequenceEnd
            {
                pop!(self, regime);
                state!(~self, << None);

                return Ok(Some(Event::new(start, end, EventData::SequenceEnd)));
            }

            marker = m;
        }

        state!(~self, -> State::FlowSequenceEntry(O_NIL));

        match marker
        {
            /*
             * Start of a "compact" single pair mapping, e.g:
             *
             *  [ key: value, entryN... ]
             *    ^--------^ Note the lack of '{' '}'s
             *
             * YAML supports this exact scenario: a flow
             * sequence entry holding exactly 1 KV pair
             *
             * See:
             *  yaml.org/spec/1.2.2/#example-flow-mapping-adjacent-values
             */
            Marker::ExplicitKey =>
            {
                let token = pop!(self, regime);
                let (n_start, _, n_marker) = peek!(self, regime);

                let event = Event::new(
                    token.start,
                    token.end,
                    EventData::MappingStart(Node {
                        anchor:  None,
                        tag:     None,
                        content: Mapping {
                            style: CollectionStyle::Flow,
                        },
                        kind:    NodeKind::Entry,
                    }),
                );

                let empty = matches!(
                    n_marker,
                    Marker::Value | Marker::FlowEntry | Marker::FlowSequenceEnd
                );

                if empty
                {
                    self.cached = Some(self.empty_scalar(n_start, NodeKind::Key)?);
                }

                state!(~self, -> State::FlowSequenceMappingKey);

                Ok(Some(event))
            },
            // A bare ':' implies an empty key single pair
            Marker::Value =>
            {
                let (v_start, _, _) = peek!(self, regime);

                let event = Event::new(
                    v_start,
                    v_start,
                    EventData::MappingStart(Node {
                        anchor:  None,
                        tag:     None,
                        content: Mapping {
                            style: CollectionStyle::Flow,
                        },
                        kind:    NodeKind::Entry,
                    }),
                );

                self.cached = Some(self.empty_scalar(v_start, NodeKind::Key)?);

                state!(~self, -> State::FlowSequenceMappingKey);

                Ok(Some(event))
            },
            Marker::Scalar => self.flow_pair_or_entry(regime, |this, regime| {
                let (s_start, s_end, data, style) = consume!(this, regime, Scalar(t, s));
                let event = Event::new(
                    s_start,
                    s_end,
                    EventData::Scalar(Node {
                        anchor:  None,
                        tag:     None,
                        content: Scalar::new(data, style),
                        kind:    NodeKind::Entry,
                    }),
                );

                Ok((event, s_start, s_end))
            }),
            Marker::Alias => self.flow_pair_or_entry(regime, |this, regime| {
                let (a_start, a_end, name) = consume!(this, regime, Alias(n));
                let event = Event::new(a_start, a_end, EventData::Alias(Alias { name }));

                Ok((event, a_start, a_end))
            }),
            _ =>
            {
                state!(~self, >> State::FlowSequenceEntry(O_NIL), @FLOW_INDENT);

                self.node(regime, NodeKind::Entry, !IMPLICITABLE, !INDENTLESS)
            },
        }
    }

    /// A scalar or alias inside a flow sequence: if a ':'
    /// follows it was the key of a single pair mapping,
    /// otherwise it stands alone
    fn flow_pair_or_entry<F>(&mut self, regime: Regime, consume: F) -> ParseResult<Option<Event>>
    where
        F: FnOnce(&mut Self, Regime) -> ParseResult<(Event, Mark, Mark)>,
    {
        let (event, start, _) = consume(self, regime)?;

        let (_, _, n_marker) = peek!(self, regime);

        if n_marker == Marker::Value
        {
            // Single pair mapping; re-kind the cached node as
            // its key
            let mut cached = event;

            if let EventData::Scalar(node) = cached.data_mut()
            {
                node.kind = NodeKind::Key;
            }

            let mapping = Event::new(
                start,
                start,
                EventData::MappingStart(Node {
                    anchor:  None,
                    tag:     None,
                    content: Mapping {
                        style: CollectionStyle::Flow,
                    },
                    kind:    NodeKind::Entry,
                }),
            );

            self.cached = Some(cached);

            state!(~self, -> State::FlowSequenceMappingKey);

            return Ok(Some(mapping));
        }

        Ok(Some(event))
    }

    /// Single pair mapping key inside a flow sequence
    fn flow_sequence_entry_mapping_key(&mut self) -> ParseResult<Option<Event>>
    {
        if let Some(event) = self.cached.take()
        {
            state!(~self, -> State::FlowSequenceMappingValue);

            return Ok(Some(event));
        }

        state!(~self, >> State::FlowSequenceMappingValue, @FLOW_INDENT);

        self.node(Regime::Flow, NodeKind::Key, !IMPLICITABLE, !INDENTLESS)
    }

    /// Single pair mapping value inside a flow sequence
    fn flow_sequence_entry_mapping_value(&mut self) -> ParseResult<Option<Event>>
    {
        let regime = Regime::Flow;
        let (start, _, marker) = peek!(self, regime);

        if marker == Marker::Value
        {
            pop!(self, regime);

            let (n_start, _, n_marker) = peek!(self, regime);

            /*
             * Check that the value is real, not implied, e.g:
             *
             * [ key: ] or [ key: , another ]
             *       ^           ^
             *       Implied values
             */
            if !matches!(n_marker, Marker::FlowEntry | Marker::FlowSequenceEnd)
            {
                state!(~self, >> State::FlowSequenceMappingEnd, @FLOW_INDENT);

                return self.node(regime, NodeKind::Value, !IMPLICITABLE, !INDENTLESS);
            }

            state!(~self, -> State::FlowSequenceMappingEnd);

            return self.empty_scalar(n_start, NodeKind::Value).map(Some);
        }

        state!(~self, -> State::FlowSequenceMappingEnd);

        self.empty_scalar(start, NodeKind::Value).map(Some)
    }

    /// Close a single pair mapping, returning to the parent
    /// sequence
    fn flow_sequence_entry_mapping_end(&mut self) -> ParseResult<Option<Event>>
    {
        let (start, _, _) = peek!(self, Regime::Flow);

        state!(~self, -> State::FlowSequenceEntry(O_NIL));

        Ok(Some(Event::new(start, start, EventData::MappingEnd)))
    }

    /// Flow context mapping key, producing the next key
    /// node or the mapping end
    fn flow_mapping_key(&mut self, opts: Flags) -> ParseResult<Option<Event>>
    {
        let regime = Regime::Flow;
        let first = opts.contains(O_FIRST);

        let (start, end, mut marker) = peek!(self, regime);

        if framing(marker)
        {
            return Err(ParseError::MissingFlowMappingEntryOrEnd);
        }

        if marker == Marker::FlowMappingEnd
        {
            pop!(self, regime);
            state!(~self, << None);

            return Ok(Some(Event::new(start, end, EventData::MappingEnd)));
        }

        if !first
        {
            if marker != Marker::FlowEntry
            {
                return Err(ParseError::MissingFlowMappingEntryOrEnd);
            }

            pop!(self, regime);

            let (start, end, m) = peek!(self, regime);

            if m == Marker::FlowMappingEnd
            {
                pop!(self, regime);
                state!(~self, << None);

                return Ok(Some(Event::new(start, end, EventData::MappingEnd)));
            }

            marker = m;
        }

        state!(~self, -> State::FlowMappingKey(O_NIL));

        // An explicit '?' is permitted but changes nothing
        // in the flow context
        if marker == Marker::ExplicitKey
        {
            pop!(self, regime);

            let (_, _, m) = peek!(self, regime);
            marker = m;
        }

        let (start, _, _) = peek!(self, regime);

        match marker
        {
            // An implied empty key
            Marker::Value =>
            {
                state!(~self, -> State::FlowMappingValue(O_NIL));

                self.empty_scalar(start, NodeKind::Key).map(Some)
            },
            Marker::FlowMappingEnd =>
            {
                let token = pop!(self, regime);
                state!(~self, << None);

                Ok(Some(Event::new(
                    token.start,
                    token.end,
                    EventData::MappingEnd,
                )))
            },
            Marker::Scalar =>
            {
                let (s_start, s_end, data, style) = consume!(self, regime, Scalar(t, s));
                let (_, _, n_marker) = peek!(self, regime);

                /*
                 * YAML permits omitting both the value and its
                 * indicator entirely:
                 *
                 * { hello }
                 *         ^ an implied empty value
                 */
                let value = match n_marker == Marker::Value
                {
                    true => O_NIL,
                    false => O_EMPTY,
                };

                state!(~self, -> State::FlowMappingValue(value));

                let event = Event::new(
                    s_start,
                    s_end,
                    EventData::Scalar(Node {
                        anchor:  None,
                        tag:     None,
                        content: Scalar::new(data, style),
                        kind:    NodeKind::Key,
                    }),
                );

                Ok(Some(event))
            },
            Marker::Alias =>
            {
                let (a_start, a_end, name) = consume!(self, regime, Alias(n));
                let (_, _, n_marker) = peek!(self, regime);

                let value = match n_marker == Marker::Value
                {
                    true => O_NIL,
                    false => O_EMPTY,
                };

                state!(~self, -> State::FlowMappingValue(value));

                Ok(Some(Event::new(a_start, a_end, EventData::Alias(Alias {
                    name,
                }))))
            },
            _ =>
            {
                state!(~self, >> State::FlowMappingValue(O_NIL), @FLOW_INDENT);

                self.node(regime, NodeKind::Key, !IMPLICITABLE, !INDENTLESS)
            },
        }
    }

    /// Flow context mapping value, producing the value node
    /// or an implied empty scalar
    fn flow_mapping_value(&mut self, opts: Flags) -> ParseResult<Option<Event>>
    {
        let regime = Regime::Flow;
        let (start, _, marker) = peek!(self, regime);

        // The '{ key }' shorthand: the value was implied by
        // the missing indicator
        if opts.contains(O_EMPTY)
        {
            state!(~self, -> State::FlowMappingKey(O_NIL));

            return self.empty_scalar(start, NodeKind::Value).map(Some);
        }

        if marker == Marker::Value
        {
            pop!(self, regime);

            let (n_start, _, n_marker) = peek!(self, regime);

            if !matches!(n_marker, Marker::FlowEntry | Marker::FlowMappingEnd)
            {
                state!(~self, >> State::FlowMappingKey(O_NIL), @FLOW_INDENT);

                return self.node(regime, NodeKind::Value, !IMPLICITABLE, !INDENTLESS);
            }

            state!(~self, -> State::FlowMappingKey(O_NIL));

            return self.empty_scalar(n_start, NodeKind::Value).map(Some);
        }

        state!(~self, -> State::FlowMappingKey(O_NIL));

        self.empty_scalar(start, NodeKind::Value).map(Some)
    }

    /// After an annotation start event: an optional
    /// parenthesized parameter list, then the annotation
    /// end
    fn annotation_params(&mut self) -> ParseResult<Option<Event>>
    {
        let regime = Regime::Params;
        let (start, _, marker) = peek!(self, regime);

        if marker == Marker::AnnotationParamsStart
        {
            pop!(self, regime);
            state!(~self, -> State::AnnotationParam(O_FIRST));

            return Ok(None);
        }

        state!(~self, << None);

        Ok(Some(Event::new(start, start, EventData::AnnotationEnd)))
    }

    /// A parameter inside an annotation's parenthesized
    /// list, parsed with flow rules
    fn annotation_param(&mut self, opts: Flags) -> ParseResult<Option<Event>>
    {
        let regime = Regime::Params;
        let first = opts.contains(O_FIRST);

        let (start, end, marker) = peek!(self, regime);

        if framing(marker)
        {
            return Err(ParseError::MissingAnnotationParamOrEnd);
        }

        if marker == Marker::AnnotationParamsEnd
        {
            pop!(self, regime);
            state!(~self, << None);

            return Ok(Some(Event::new(start, end, EventData::AnnotationEnd)));
        }

        if !first
        {
            if marker != Marker::FlowEntry
            {
                return Err(ParseError::MissingAnnotationParamOrEnd);
            }

            pop!(self, regime);

            let (start, end, m) = peek!(self, regime);

            if m == Marker::AnnotationParamsEnd
            {
                pop!(self, regime);
                state!(~self, << None);

                return Ok(Some(Event::new(start, end, EventData::AnnotationEnd)));
            }
        }

        state!(~self, -> State::AnnotationParam(O_NIL));
        state!(~self, >> State::AnnotationParam(O_NIL), @FLOW_INDENT);

        self.node(regime, NodeKind::Entry, !IMPLICITABLE, !INDENTLESS)
    }

    /// Accumulate a node's anchor and tag, in either order,
    /// at most one of each
    fn read_props(&mut self, regime: Regime) -> ParseResult<()>
    {
        loop
        {
            let (start, _, marker) = peek!(self, regime);

            match marker
            {
                Marker::Anchor =>
                {
                    let (_, _, name) = consume!(self, regime, Anchor(n));

                    if self.props.anchor.replace(name).is_some()
                    {
                        return Err(ParseError::DuplicateNodeProperty);
                    }

                    self.props.start.get_or_insert(start);
                },
                Marker::Tag =>
                {
                    let (_, _, tag) = consume!(self, regime, Tag(t));

                    if self.props.tag.replace(tag).is_some()
                    {
                        return Err(ParseError::DuplicateNodeProperty);
                    }

                    self.props.start.get_or_insert(start);
                },
                _ => return Ok(()),
            }
        }
    }

    /// Produce an empty plain scalar node event at .mark
    fn empty_scalar(&mut self, mark: Mark, kind: NodeKind) -> ParseResult<Event>
    {
        let event = Event::new(
            mark,
            mark,
            EventData::Scalar(Node {
                anchor: None,
                tag: None,
                content: Scalar::new(self.pool.empty(), ScalarStyle::Plain),
                kind,
            }),
        );

        Ok(event)
    }

    /// Build the document start event from the pending
    /// directive set, merged over the defaults
    fn document_start_event(&mut self, start: Mark, end: Mark, implicit: bool) -> Event
    {
        let pending = std::mem::take(&mut self.pending);

        let mut tags: TagDirectives = pending.tags;

        // Insert any missing default directives, but do not
        // overwrite declared values
        for (handle, prefix) in DEFAULT_TAGS.iter()
        {
            let handle = self.pool.intern(handle);

            tags.entry(handle).or_insert_with(|| self.pool.intern(prefix));
        }

        let directives = Directives {
            version: pending.version.unwrap_or(DEFAULT_VERSION),
            tags,
            reserved: pending.reserved,
        };

        Event::new(
            start,
            end,
            EventData::DocumentStart(DocumentStart {
                directives,
                implicit,
            }),
        )
    }

    /// Peek the head of the token stream, consuming and
    /// recording indentation tokens as they pass
    fn peek_token(&mut self, regime: Regime) -> ParseResult<(Mark, Mark, Marker)>
    {
        loop
        {
            let (start, end, marker) = {
                let token = self.lexer.peek(regime).map_err(ParseError::from)?;

                (token.start, token.end, token.marker())
            };

            if marker == Marker::Indent
            {
                self.lexer.pop(regime).map_err(ParseError::from)?;

                continue;
            }

            return Ok((start, end, marker));
        }
    }

    /// Pop the head of the token stream, skipping
    /// indentation tokens
    fn pop_token(&mut self, regime: Regime) -> ParseResult<Token>
    {
        self.peek_token(regime)?;

        self.lexer.pop(regime).map_err(ParseError::from)
    }

    /// Push a continuation level under the active one,
    /// enforcing the depth limit
    fn push_level(&mut self, level: Level) -> ParseResult<()>
    {
        if self.state.depth() >= self.max_depth
        {
            return Err(ParseError::DepthLimitExceeded);
        }

        self.state.push(level);

        Ok(())
    }

    /// Make .level the active level, saving the current one
    /// to the stack, enforcing the depth limit
    fn push_top_level(&mut self, level: Level) -> ParseResult<()>
    {
        if self.state.depth() >= self.max_depth
        {
            return Err(ParseError::DepthLimitExceeded);
        }

        self.state.push_top(level);

        Ok(())
    }

    /// Wrap a subsystem error with the positions needed for
    /// diagnostics
    fn contextualize(&self, error: ParseError) -> crate::error::Error
    {
        crate::error::Error::new(
            error,
            self.lexer.lexer().current_mark(),
            self.lexer.lexer().recent_start(),
            self.lexer.lexer().recent_end(),
        )
    }
}

/// Is this marker document or stream framing, rather than
/// node content? Open block collections close in front of
/// these
fn framing(marker: Marker) -> bool
{
    matches!(
        marker,
        Marker::StreamEnd
            | Marker::DirectivesEnd
            | Marker::DocumentEnd
            | Marker::VersionDirective
            | Marker::TagDirective
            | Marker::ReservedDirective
    )
}

/// Directives collected between documents
#[derive(Debug, Default)]
struct PendingDirectives
{
    version:  Option<VersionDirective>,
    tags:     TagDirectives,
    reserved: Vec<ReservedDirective>,
}

impl PendingDirectives
{
    fn is_some(&self) -> bool
    {
        self.version.is_some() || !self.tags.is_empty() || !self.reserved.is_empty()
    }
}

/// A node's pending properties, read before the node they
/// bind to
#[derive(Debug, Default)]
struct Props
{
    anchor: Option<Text>,
    tag:    Option<Text>,
    start:  Option<Mark>,
}

impl Props
{
    fn is_empty(&self) -> bool
    {
        self.anchor.is_none() && self.tag.is_none()
    }

    fn take(&mut self) -> (Option<Text>, Option<Text>, Option<Mark>)
    {
        (
            self.anchor.take(),
            self.tag.take(),
            self.start.take(),
        )
    }
}

/// Provides an [`Iterator`] interface to interact with
/// [`Event`]s through.
#[derive(Debug)]
pub struct EventIter<'a, S>
{
    parser: &'a mut Parser<S>,
}

impl<'a, S> EventIter<'a, S>
where
    S: Source,
{
    fn new(parser: &'a mut Parser<S>) -> Self
    {
        Self { parser }
    }
}

impl<'a, S> Iterator for EventIter<'a, S>
where
    S: Source,
{
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item>
    {
        self.parser.next_event()
    }
}

const IMPLICIT: bool = true;
const IMPLICITABLE: bool = true;
const INDENTLESS: bool = true;

#[cfg(test)]
mod tests;
