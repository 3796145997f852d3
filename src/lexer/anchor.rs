/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use crate::{
    intern::TextPool,
    lexer::{
        error::{LexError, LexResult as Result},
        flag::Flags,
    },
    mark::MarkTracker,
    token::TokenKind,
};

/// Scan an anchor or alias from .buffer, which is expected
/// to begin with '&' or '*', returning the relevant token.
///
/// Names are limited to the URI unreserved characters:
/// alphanumerics plus '-', '_', '.' and '~'. An empty name
/// is an error.
pub(in crate::lexer) fn scan_anchor(
    opts: Flags,
    buffer: &mut &str,
    marks: &mut MarkTracker,
    pool: &TextPool,
    kind: AnchorKind,
) -> Result<TokenKind>
{
    // *anchor 'rest of the line'
    // ^
    advance!(*buffer, :marks, 1);

    // *anchor 'rest of the line'
    //  ^^^^^^
    let mut len = 0;

    loop
    {
        cache!(~*buffer, @len, 1, opts)?;

        match buffer.as_bytes().get(len)
        {
            Some(&b) if is_anchor_char(b) => len += 1,
            _ => break,
        }
    }

    // A name must contain at least one character
    if len == 0
    {
        return Err(LexError::InvalidAnchorName);
    }

    let name = pool.intern(&buffer[..len]);
    advance!(*buffer, :marks, len);

    // *anchor: value
    //        ^
    // There does not necessarily need to be whitespace, so
    // we also check against the set of valid followers
    cache!(~*buffer, 1, opts)?;
    if !(isWhiteSpaceZ!(~*buffer) || check!(~*buffer => b':' | b',' | b']' | b'}' | b')'))
    {
        return Err(LexError::InvalidAnchorName);
    }

    let token = match kind
    {
        AnchorKind::Alias => TokenKind::Alias(name),
        AnchorKind::Anchor => TokenKind::Anchor(name),
    };

    Ok(token)
}

/// Representation of a YAML anchor (&) or alias (*) marker
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(in crate::lexer) enum AnchorKind
{
    Anchor,
    Alias,
}

impl AnchorKind
{
    /// Fallibly determine whether an anchor or alias starts
    /// from the given .byte
    pub fn new(byte: &u8) -> Option<Self>
    {
        let s = match byte
        {
            b'*' => Self::Alias,
            b'&' => Self::Anchor,
            _ => return None,
        };

        Some(s)
    }
}

fn is_anchor_char(b: u8) -> bool
{
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~')
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::lexer::flag::O_ZEROED;

    type TestResult = anyhow::Result<()>;

    fn scan(base: &str, kind: AnchorKind) -> Result<(TokenKind, usize)>
    {
        let mut buffer = base;
        let mut marks = MarkTracker::new();
        let pool = TextPool::new();

        scan_anchor(O_ZEROED, &mut buffer, &mut marks, &pool, kind)
            .map(|token| (token, base.len() - buffer.len()))
    }

    #[test]
    fn anchor_simple() -> TestResult
    {
        let (token, amt) = scan("&anchor value", AnchorKind::Anchor)?;

        assert_eq!(amt, 7);
        assert_eq!(token, TokenKind::Anchor("anchor".into()));

        Ok(())
    }

    #[test]
    fn alias_simple() -> TestResult
    {
        let (token, amt) = scan("*anchor\n", AnchorKind::Alias)?;

        assert_eq!(amt, 7);
        assert_eq!(token, TokenKind::Alias("anchor".into()));

        Ok(())
    }

    #[test]
    fn alias_as_implicit_key() -> TestResult
    {
        let (token, _) = scan("*key: value", AnchorKind::Alias)?;

        assert_eq!(token, TokenKind::Alias("key".into()));

        Ok(())
    }

    #[test]
    fn alias_in_flow() -> TestResult
    {
        let (token, amt) = scan("*a, *b]", AnchorKind::Alias)?;

        assert_eq!(amt, 2);
        assert_eq!(token, TokenKind::Alias("a".into()));

        Ok(())
    }

    #[test]
    fn anchor_empty_name_errors()
    {
        assert_eq!(
            scan("& value", AnchorKind::Anchor),
            Err(LexError::InvalidAnchorName)
        );
    }

    #[test]
    fn anchor_at_eof() -> TestResult
    {
        let (token, _) = scan("&a", AnchorKind::Anchor)?;

        assert_eq!(token, TokenKind::Anchor("a".into()));

        Ok(())
    }
}
