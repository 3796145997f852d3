/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use std::mem;

pub(in crate::event) use self::flags::*;
use crate::event::types::NodeKind;

/// Indentation of the implicit root context, below any
/// block level
pub(in crate::event) const ROOT_INDENT: i64 = -2;

/// Indentation of flow levels, where indentation is
/// inactive
pub(in crate::event) const FLOW_INDENT: i64 = -1;

pub(in crate::event) const INITIAL_LEVEL: Level = Level {
    state:  State::StreamStart,
    indent: ROOT_INDENT,
};

/// A parse expectation and the indentation it is pinned to.
///
/// Block collection levels carry the column of their first
/// token; flow levels carry [`FLOW_INDENT`] and the root
/// [`ROOT_INDENT`], keeping every comparison an i64 compare
#[derive(Debug, Clone, PartialEq)]
pub(in crate::event) struct Level
{
    pub state:  State,
    pub indent: i64,
}

impl Level
{
    pub fn new(state: State, indent: i64) -> Self
    {
        Self { state, indent }
    }
}

/// The stack of [`Level`]s driving event production.
///
/// The active level is .top; deeper expectations save their
/// continuation to the stack and restore it by popping
#[derive(Debug, Clone)]
pub(in crate::event) struct StateMachine
{
    top:   Level,
    stack: Vec<Level>,
}

impl StateMachine
{
    /// Instantiate a new state machine with the given
    /// initial Level.
    pub fn new(initial: Level) -> Self
    {
        Self {
            top:   initial,
            stack: Vec::default(),
        }
    }

    /// Push a Level into the current .top, adding the
    /// previous .top to the stack
    pub fn push_top(&mut self, level: Level)
    {
        let old = mem::replace(&mut self.top, level);
        self.stack.push(old);
    }

    /// Push a Level onto the stack, below the current .top
    pub fn push(&mut self, level: Level)
    {
        self.stack.push(level);
    }

    /// Pop the Level stack, replacing the current .top with
    /// the next Level on the stack, returning the previous
    /// top if a replacement was made.
    pub fn pop(&mut self) -> Option<Level>
    {
        self.stack.pop().map(|new| mem::replace(&mut self.top, new))
    }

    /// Immutably access the top Level
    pub fn top(&self) -> &Level
    {
        &self.top
    }

    /// Mutably access the top Level
    pub fn top_mut(&mut self) -> &mut Level
    {
        &mut self.top
    }

    /// Current depth of the machine, including .top
    pub fn depth(&self) -> usize
    {
        self.stack.len() + 1
    }

    /// Iterate the live levels, bottom of the stack first,
    /// ending with .top
    pub fn levels(&self) -> impl Iterator<Item = &Level>
    {
        self.stack.iter().chain(std::iter::once(&self.top))
    }
}

impl Default for StateMachine
{
    fn default() -> Self
    {
        Self::new(INITIAL_LEVEL)
    }
}

/// Possible states in the processing of a YAML token
/// sequence
#[derive(Debug, Clone, PartialEq)]
pub(in crate::event) enum State
{
    /// Expecting start of stream
    StreamStart,
    /// Expecting nothing (end of state)
    StreamEnd,

    /// Expecting start of document, directives first
    /// :: O_IMPLICIT?
    DocumentStart(Flags),
    /// Expecting an explicit document's root node, which
    /// may be absent
    DocumentContent,
    /// Expecting end of document
    DocumentEnd,

    /// Expecting a node
    /// :: O_BLOCK? | O_IMPLICITABLE?
    Node(NodeKind, Flags),

    /// Expecting sequence entries in the block context
    BlockSequenceEntry,
    /// Expecting a mapping key in the block context
    /// :: O_EXPLICIT?
    BlockMappingKey,
    /// Expecting a mapping value in the block context
    /// :: O_EXPLICIT?
    BlockMappingValue(Flags),
    /// Emit a cached implicit key and continue the mapping
    ImplicitMappingKey,

    /// Expecting sequence entries in the flow context
    /// :: O_FIRST?
    FlowSequenceEntry(Flags),
    /// Expecting a key in a flow sequence->mapping nested
    /// structure
    FlowSequenceMappingKey,
    /// Expecting a value in a flow sequence->mapping nested
    /// structure
    FlowSequenceMappingValue,
    /// Expecting the end of a flow sequence->mapping nested
    /// structure
    FlowSequenceMappingEnd,

    /// Expecting a mapping key in the flow context
    /// :: O_FIRST?
    FlowMappingKey(Flags),
    /// Expecting a mapping value in the flow context
    /// :: O_EMPTY?
    FlowMappingValue(Flags),

    /// Expecting an annotation's optional parameter list
    /// opener
    AnnotationParams,
    /// Expecting annotation parameters as flow entries
    /// :: O_FIRST?
    AnnotationParam(Flags),
}

mod flags
{
    use bitflags::bitflags;

    /// Nil / empty flag set
    pub const O_NIL: Flags = Flags::empty();
    /// Is the document implicit (no '---' required)?
    pub const O_IMPLICIT: Flags = Flags::IMPLICIT;
    /// Is this the first entry of the collection?
    pub const O_FIRST: Flags = Flags::FIRST;
    /// Is the current mapping value expected to be empty?
    pub const O_EMPTY: Flags = Flags::EMPTY;
    /// Was the surrounding mapping key explicit ('?')?
    pub const O_EXPLICIT: Flags = Flags::EXPLICIT;
    /// Is the expected node in the block context?
    pub const O_BLOCK: Flags = Flags::BLOCK;
    /// Is the expected node inside annotation parameters?
    pub const O_PARAMS: Flags = Flags::PARAMS;
    /// May the expected node open an implicit mapping?
    pub const O_IMPLICITABLE: Flags = Flags::IMPLICITABLE;

    bitflags! {
        /// Options used by the state machine, not all options
        /// are relevant to all states.
        #[derive(Default)]
        pub struct Flags: u8 {
            const IMPLICIT      = 0b00000001;
            const FIRST         = 0b00000010;
            const EMPTY         = 0b00000100;
            const EXPLICIT      = 0b00001000;
            const BLOCK         = 0b00010000;
            const PARAMS        = 0b00100000;
            const IMPLICITABLE  = 0b01000000;
        }
    }
}
