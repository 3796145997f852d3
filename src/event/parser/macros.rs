/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! This module contains the macros used by lib/event/parser

/// Peek the head of the token stream under the given
/// .regime, skipping indentation tokens.
///
/// Modifiers
///     ~ := return only the Marker
///
/// Variants
///     /1 ~.self, .regime := Marker
///     /2 .self, .regime  := (start, end, Marker)
macro_rules! peek {
    (~$self:ident, $regime:expr) => {{
        let (_, _, marker) = $self.peek_token($regime)?;

        marker
    }};
    ($self:ident, $regime:expr) => {
        $self.peek_token($regime)?
    };
}

/// Pop the head of the token stream under the given
/// .regime, skipping indentation tokens
macro_rules! pop {
    ($self:ident, $regime:expr) => {
        $self.pop_token($regime)?
    };
}

/// Pop the head of the token stream, binding the payload of
/// the given TokenKind variant, erroring on a mismatch.
///
/// Returns (start, end, payload...)
macro_rules! consume {
    ($self:ident, $regime:expr, $variant:ident ( $( $bind:ident ),+ )) => {{
        let token = $self.pop_token($regime)?;

        match token.kind
        {
            crate::token::TokenKind::$variant( $( $bind ),+ ) =>
            {
                (token.start, token.end, $( $bind ),+)
            },
            _ => return Err(crate::event::error::ParseError::CorruptStream),
        }
    }};
}

/// Manipulate the parser's state machine.
///
/// Variants
///     /1 ~.self, -> .state             replace the active state
///     /2 ~.self, -> .state, @.indent   replace the active level
///     /3 ~.self, >> .state, @.indent   save a continuation under the active level
///     /4 ~.self, ^ .state, @.indent    make .state active, saving the current level
///     /5 ~.self, << None               pop to the saved continuation
macro_rules! state {
    (~$self:ident, -> $state:expr) => {
        $self.state.top_mut().state = $state
    };
    (~$self:ident, -> $state:expr, @$indent:expr) => {{
        let top = $self.state.top_mut();

        top.state = $state;
        top.indent = $indent;
    }};
    (~$self:ident, >> $state:expr, @$indent:expr) => {
        $self.push_level(crate::event::state::Level::new($state, $indent))?
    };
    (~$self:ident, ^ $state:expr, @$indent:expr) => {
        $self.push_top_level(crate::event::state::Level::new($state, $indent))?
    };
    (~$self:ident, << None) => {
        $self.state.pop()
    };
}
