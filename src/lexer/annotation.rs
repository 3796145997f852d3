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

/// Scan an annotation from .buffer, which is expected to
/// begin with '@', returning the annotation start token.
///
/// Only the name is consumed here; a parenthesized
/// parameter list, if present, is tokenized separately
/// under the params regime.
pub(in crate::lexer) fn scan_annotation(
    opts: Flags,
    buffer: &mut &str,
    marks: &mut MarkTracker,
    pool: &TextPool,
) -> Result<TokenKind>
{
    // @concat(a, b)
    // ^
    advance!(*buffer, :marks, 1);

    // @concat(a, b)
    //  ^^^^^^
    let mut len = 0;

    loop
    {
        cache!(~*buffer, @len, 1, opts)?;

        match buffer.as_bytes().get(len)
        {
            Some(&b) if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_') => len += 1,
            _ => break,
        }
    }

    if len == 0
    {
        return Err(LexError::InvalidAnnotationName);
    }

    let name = pool.intern(&buffer[..len]);
    advance!(*buffer, :marks, len);

    // The name ends at whitespace, the parameter list, or a
    // closing indicator
    cache!(~*buffer, 1, opts)?;
    if !(isWhiteSpaceZ!(~*buffer) || check!(~*buffer => b'(' | b',' | b']' | b'}' | b')'))
    {
        return Err(LexError::InvalidAnnotationName);
    }

    Ok(TokenKind::AnnotationStart(name))
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::lexer::flag::O_ZEROED;

    type TestResult = anyhow::Result<()>;

    fn scan(base: &str) -> Result<(TokenKind, usize)>
    {
        let mut buffer = base;
        let mut marks = MarkTracker::new();
        let pool = TextPool::new();

        scan_annotation(O_ZEROED, &mut buffer, &mut marks, &pool)
            .map(|token| (token, base.len() - buffer.len()))
    }

    #[test]
    fn annotation_bare() -> TestResult
    {
        let (token, amt) = scan("@defaults value")?;

        assert_eq!(amt, 9);
        assert_eq!(token, TokenKind::AnnotationStart("defaults".into()));

        Ok(())
    }

    #[test]
    fn annotation_with_params() -> TestResult
    {
        let (token, amt) = scan("@concat(a, b)")?;

        assert_eq!(amt, 7);
        assert_eq!(token, TokenKind::AnnotationStart("concat".into()));

        Ok(())
    }

    #[test]
    fn annotation_empty_name_errors()
    {
        assert_eq!(scan("@ value"), Err(LexError::InvalidAnnotationName));
    }
}
