/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! This library exposes methods for interacting with YAML
//! byte streams, as a stream of parse events.
//!
//! The core type is the [`Parser`], which pulls bytes from
//! a [`source`], tokenizes them with feedback from its own
//! state machine, and hands back one [`Event`] per call.
//! Nothing is parsed before you ask for it, and the event
//! sequence is guaranteed balanced for any input the parser
//! accepts.
//!
//! ```rust
//! use yamlet::{Parser, event::types::EventData};
//!
//! let mut parser = Parser::from_utf8("lang: rust");
//!
//! while let Some(event) = parser.next_event() {
//!     let event = event?;
//!
//!     if let EventData::Scalar(node) = event.data() {
//!         println!("scalar: {}", node.content.data());
//!     }
//! }
//! # Ok::<(), yamlet::Error>(())
//! ```
//!
//! Annotations (`@name(...)`), a YAML 1.3 draft extension,
//! are surfaced as their own balanced event pair.
//!
//! [`Event`]: struct@event::types::Event

#![allow(dead_code)]
#![allow(clippy::suspicious_else_formatting)]

pub mod event;
pub mod source;

mod error;
mod intern;
mod lexer;
mod mark;
mod token;

pub use crate::{
    error::{Category, Error, Result},
    event::{EventIter, Parser},
    intern::{Text, TextPool},
    mark::Mark,
    token::{ScalarStyle, StreamEncoding},
};
