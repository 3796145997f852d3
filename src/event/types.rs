/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Contains the various types used by [Event]s to represent
//! YAML.

use std::collections::HashMap;

use crate::{intern::Text, mark::Mark};

pub use crate::token::{ScalarStyle, StreamEncoding};

/// Default tag directives applied to every YAML document.
///
/// Equivalent of:
///
/// ```yaml
/// %TAG !    !
/// %TAG !!   tag:yaml.org,2002:
/// ```
///
/// These are always in scope, though documents may
/// expressly override them
pub const DEFAULT_TAGS: [(&str, &str); 2] = [("!", "!"), ("!!", "tag:yaml.org,2002:")];

/// Default YAML stream version. If unspecified in the
/// stream it is assumed to be this version.
///
/// Equivalent of:
///
/// ```yaml
/// %YAML 1.3
/// ```
pub const DEFAULT_VERSION: VersionDirective = VersionDirective { major: 1, minor: 3 };

/// Specific YAML productions found in the YAML stream. Each
/// Event has a start and end mark indicating the range of
/// the stream represented by the given Event. See
/// [EventData] for all of the possible Event variants.
#[derive(Debug, Clone, PartialEq)]
pub struct Event
{
    start_mark: Mark,
    end_mark:   Mark,
    inner:      EventData,
}

impl Event
{
    /// Instantiate a new [`Event`] with the given marks and
    /// data
    pub(crate) fn new(start_mark: Mark, end_mark: Mark, event: EventData) -> Self
    {
        Self {
            start_mark,
            end_mark,
            inner: event,
        }
    }

    /// Retrieve the start mark of this [`Event`]
    pub fn start(&self) -> Mark
    {
        self.start_mark
    }

    /// Retrieve the end mark of this [`Event`]
    pub fn end(&self) -> Mark
    {
        self.end_mark
    }

    /// Retrieve the data associated with this [`Event`]
    pub fn data(&self) -> &EventData
    {
        &self.inner
    }

    /// Retrieve the data associated with this [`Event`]
    /// mutably
    pub fn data_mut(&mut self) -> &mut EventData
    {
        &mut self.inner
    }
}

/// The possible variants of an [Event]. See the
/// documentation on each variant for an explanation of what
/// each variant represents.
#[derive(Debug, Clone, PartialEq)]
pub enum EventData
{
    /// Beginning of the event stream, always the first
    /// event produced, and only produced once per stream
    StreamStart(StreamStart),
    /// End of events, always the last event produced, after
    /// which the stream is finished
    StreamEnd,

    /// Start of document content; any tag resolution or
    /// version specific behavior should use the attached
    /// directives
    DocumentStart(DocumentStart),
    /// End of document content, followed either by another
    /// DocumentStart or a StreamEnd event
    DocumentEnd(DocumentEnd),

    /// A reference to a previously anchored node, by name.
    /// Whether that anchor exists is not checked here
    Alias(Alias),
    /// A scalar leaf node
    Scalar(Node<Scalar>),

    /// Start of a YAML key value production, followed by
    /// alternating key and value nodes until a balancing
    /// MappingEnd
    MappingStart(Node<Mapping>),
    /// End of a YAML key value production
    MappingEnd,
    /// Start of a YAML array production, followed by zero
    /// or more nodes until a balancing SequenceEnd
    SequenceStart(Node<Sequence>),
    /// End of a YAML array production
    SequenceEnd,

    /// Start of an annotation (@name), optionally followed
    /// by its parameters as flow nodes, until a balancing
    /// AnnotationEnd
    AnnotationStart(Annotation),
    /// End of an annotation's parameters
    AnnotationEnd,
}

/// Wrapper around [Event] variants that correspond to a
/// YAML node production -- that is, those that may carry
/// node properties.
///
/// One of:
///
///   `[Scalar, MappingStart, SequenceStart]`
#[derive(Debug, Clone, PartialEq)]
pub struct Node<T>
{
    /// The anchor attached to this node (if any)
    pub anchor:  Option<Text>,
    /// The resolved tag attached to this node (if any)
    pub tag:     Option<Text>,
    /// The node's content if simple, or a hint about the
    /// complex structure type
    pub content: T,
    /// Contextual information about this Node
    pub kind:    NodeKind,
}

/// Representation of a YAML scalar node, containing the
/// associated content and style.
///
/// This struct implements `Deref<Target = str>`, backed by
/// the underlying content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scalar
{
    data:  Text,
    style: ScalarStyle,
}

impl Scalar
{
    pub(crate) fn new(data: Text, style: ScalarStyle) -> Self
    {
        Self { data, style }
    }

    /// Retrieve the content of this [`Scalar`]
    pub fn data(&self) -> &Text
    {
        &self.data
    }

    /// Retrieve this [`Scalar`]'s style
    pub fn style(&self) -> ScalarStyle
    {
        self.style
    }
}

impl AsRef<str> for Scalar
{
    fn as_ref(&self) -> &str
    {
        &self.data
    }
}

impl std::ops::Deref for Scalar
{
    type Target = str;

    fn deref(&self) -> &Self::Target
    {
        &self.data
    }
}

/// Contextual information about a [Node]'s position in the
/// YAML byte stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind
{
    /// Top level [Node] of a YAML document, will only (and
    /// always) be found on the first Node of each document
    Root,

    /// Entry in a YAML sequence
    Entry,

    /// A key in a YAML mapping
    Key,
    /// A value in a YAML mapping
    Value,
}

/// The presentation of a collection in the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionStyle
{
    /// Indentation structured, newline separated
    Block,
    /// Bracketed and comma separated
    Flow,
}

/// StreamStart [Event] contents
#[derive(Debug, Clone, PartialEq)]
pub struct StreamStart
{
    /// Encoding detected on the YAML byte stream
    pub encoding: StreamEncoding,
}

/// DocumentStart [Event] contents
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentStart
{
    /// This document's directive set
    pub directives: Directives,
    /// Was this event present in the stream, or inferred?
    pub implicit:   bool,
}

/// DocumentEnd [Event] contents
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentEnd
{
    /// Was this event present in the stream, or inferred?
    pub implicit: bool,
}

/// Alias [Event] contents
#[derive(Debug, Clone, PartialEq)]
pub struct Alias
{
    /// Name of the anchor this alias refers to
    pub name: Text,
}

/// MappingStart [Event] contents
#[derive(Debug, Clone, PartialEq)]
pub struct Mapping
{
    /// The presentation style of this mapping
    pub style: CollectionStyle,
}

/// SequenceStart [Event] contents
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence
{
    /// The presentation style of this sequence
    pub style: CollectionStyle,
}

/// AnnotationStart [Event] contents
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation
{
    /// The annotation's name, without the leading '@'
    pub name: Text,
}

/// YAML Directives belonging to a document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Directives
{
    /// %YAML directive, indicating the YAML schema version
    /// used for the current document
    pub version:  VersionDirective,
    /// Map of %TAG directives in scope, handle to prefix
    pub tags:     TagDirectives,
    /// Reserved directives seen before this document, kept
    /// so callers can surface warnings
    pub reserved: Vec<ReservedDirective>,
}

/// A directive this parser does not understand, carried
/// through for the caller to inspect
#[derive(Debug, Clone, PartialEq)]
pub struct ReservedDirective
{
    /// The directive's name, without the leading '%'
    pub name:     Text,
    /// Everything after the name, to the line end
    pub argument: Text,
}

/// %YAML directive representation, containing the .major
/// and .minor version of the current document in the YAML
/// stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionDirective
{
    /// The major version of this YAML stream
    pub major: u8,
    /// The minor version of this YAML stream
    pub minor: u8,
}

impl Default for VersionDirective
{
    fn default() -> Self
    {
        DEFAULT_VERSION
    }
}

/// Typedef map of tag directives in scope for the current
/// document
pub type TagDirectives = HashMap<Text, Text>;
