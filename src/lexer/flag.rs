/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use bitflags::bitflags;

/// An empty, zeroed flag set. This is the default set, with
/// all other flags disabled.
pub(crate) const O_ZEROED: Flags = Flags::empty();

/// Hints to token scanning functions that the underlying
/// buffer can be extended. Set whenever the byte source has
/// not yet reported end of input.
///
/// If this flag is set a scan returns [`LexError::Extend`]
/// when the buffer terminates before a token can be
/// completed, and is retried once more of the stream has
/// been decoded.
///
/// [`LexError::Extend`]: enum@crate::lexer::error::LexError
pub(crate) const O_EXTENDABLE: Flags = Flags::EXTENDABLE;

bitflags! {
    /// Directives controlling the behavior of token scanning
    /// functions, see each O_ variant for an explanation
    #[derive(Default)]
    pub(crate) struct Flags: u32 {
        const EXTENDABLE = 0b00000001;
    }
}
