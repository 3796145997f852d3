/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use std::collections::HashMap;

use atoi::atoi;

use crate::{
    intern::{Text, TextPool},
    lexer::{
        error::{LexError, LexResult as Result},
        flag::Flags,
        tag::{scan_tag_handle, scan_tag_prefix},
    },
    mark::MarkTracker,
    token::TokenKind,
};

/// Scans a directive from .buffer, which is expected to
/// begin with a '%' at the first column of a line.
///
/// %YAML and %TAG are understood; a %TAG's binding is
/// recorded into .tags for tag resolution. Any other well
/// formed directive becomes a reserved directive token,
/// surfaced to the caller rather than erroring.
pub(in crate::lexer) fn scan_directive(
    opts: Flags,
    buffer: &mut &str,
    marks: &mut MarkTracker,
    pool: &TextPool,
    tags: &mut HashMap<Text, Text>,
) -> Result<TokenKind>
{
    // %YAML 1.3
    // ^
    advance!(*buffer, :marks, 1);

    let name = take_while(opts, buffer.as_bytes(), |b| {
        b.is_ascii_alphanumeric() || *b == b'-'
    })?;

    if name.is_empty()
    {
        return Err(LexError::UnknownDirective);
    }

    let kind = DirectiveKind::new(name);
    let name = pool.intern_bytes(name).map_err(|_| LexError::UnknownDirective)?;

    advance!(*buffer, :marks, name.len());

    match kind
    {
        DirectiveKind::Version =>
        {
            eat_blanks(opts, buffer, marks)?;

            // %YAML 1.3
            //       ^
            let (major, skip) = scan_version_digits(opts, buffer)?;
            advance!(*buffer, :marks, skip);

            // %YAML 1.3
            //        ^
            cache!(~*buffer, 1, opts)?;
            check!(~*buffer => b'.', else LexError::InvalidVersion)?;
            advance!(*buffer, :marks, 1);

            // %YAML 1.3
            //         ^
            let (minor, skip) = scan_version_digits(opts, buffer)?;
            advance!(*buffer, :marks, skip);

            cache!(~*buffer, 1, opts)?;
            if !isWhiteSpaceZ!(~*buffer)
            {
                return Err(LexError::InvalidVersion);
            }

            // This parser processes the 1.x family only
            match major
            {
                1 => Ok(TokenKind::VersionDirective(major, minor)),
                0 => Err(LexError::InvalidVersion),
                _ => Err(LexError::UnsupportedVersion),
            }
        },
        DirectiveKind::Tag =>
        {
            eat_blanks(opts, buffer, marks)?;

            // %TAG !named! tag:prefix/
            //      ^^^^^^^
            let handle = scan_tag_handle(opts, buffer, marks, pool)?;

            // At least one space between handle and prefix
            cache!(~*buffer, 1, opts)?;
            isBlank!(~*buffer, else LexError::InvalidTagPrefix)?;

            eat_blanks(opts, buffer, marks)?;

            // %TAG !named! tag:prefix/
            //              ^^^^^^^^^^^
            let prefix = scan_tag_prefix(opts, buffer, marks, pool)?;

            cache!(~*buffer, 1, opts)?;
            if !isWhiteSpaceZ!(~*buffer)
            {
                return Err(LexError::InvalidTagPrefix);
            }

            tags.insert(handle.clone(), prefix.clone());

            Ok(TokenKind::TagDirective(handle, prefix))
        },
        DirectiveKind::Reserved =>
        {
            eat_blanks(opts, buffer, marks)?;

            // Everything up to the line end or a comment is the
            // directive's argument
            let mut len = 0;

            loop
            {
                cache!(~*buffer, @len, 1, opts)?;

                if isBreakZ!(~*buffer, len) || check!(~*buffer, len => b'#')
                {
                    break;
                }

                len += widthOf!(~*buffer, len);
            }

            let argument = pool.intern(buffer[..len].trim_end());
            advance!(*buffer, :marks, len);

            Ok(TokenKind::ReservedDirective(name, argument))
        },
    }
}

/// The recognized YAML directives, plus the reserved rest
enum DirectiveKind
{
    Version,
    Tag,
    Reserved,
}

impl DirectiveKind
{
    fn new(name: &[u8]) -> Self
    {
        match name
        {
            b"YAML" => Self::Version,
            b"TAG" => Self::Tag,
            _ => Self::Reserved,
        }
    }
}

fn scan_version_digits(opts: Flags, b: &mut &str) -> Result<(u8, usize)>
{
    let digits = take_while(opts, b.as_bytes(), u8::is_ascii_digit)?;
    let number = atoi(digits).ok_or(LexError::InvalidVersion)?;

    Ok((number, digits.len()))
}

fn eat_blanks(opts: Flags, buffer: &mut &str, marks: &mut MarkTracker) -> Result<usize>
{
    let mut eaten = 0;

    loop
    {
        cache!(~*buffer, 1, opts)?;

        if !isBlank!(~*buffer)
        {
            break;
        }

        advance!(*buffer, :marks, 1);
        eaten += 1;
    }

    Ok(eaten)
}

fn take_while<'b, F>(opts: Flags, base: &'b [u8], f: F) -> Result<&'b [u8]>
where
    F: Fn(&u8) -> bool,
{
    let mut index = 0;

    loop
    {
        let i = cache!(base, @index, 1, opts)?;

        match base.get(index)
        {
            Some(b) if f(b) => index += i,
            _ => return Ok(&base[..index]),
        }
    }
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::lexer::flag::O_ZEROED;

    type TestResult = anyhow::Result<()>;

    fn scan(base: &str) -> (Result<TokenKind>, HashMap<Text, Text>)
    {
        let mut buffer = base;
        let mut marks = MarkTracker::new();
        let mut tags = HashMap::new();
        let pool = TextPool::new();

        let result = scan_directive(O_ZEROED, &mut buffer, &mut marks, &pool, &mut tags);

        (result, tags)
    }

    #[test]
    fn version_directive() -> TestResult
    {
        let (token, _) = scan("%YAML 1.3\n");

        assert_eq!(token?, TokenKind::VersionDirective(1, 3));

        Ok(())
    }

    #[test]
    fn version_directive_future_minor() -> TestResult
    {
        let (token, _) = scan("%YAML 1.9\n");

        assert_eq!(token?, TokenKind::VersionDirective(1, 9));

        Ok(())
    }

    #[test]
    fn version_directive_unsupported_major()
    {
        let (token, _) = scan("%YAML 2.0\n");

        assert_eq!(token, Err(LexError::UnsupportedVersion));
    }

    #[test]
    fn version_directive_malformed()
    {
        let (token, _) = scan("%YAML one.two\n");

        assert_eq!(token, Err(LexError::InvalidVersion));
    }

    #[test]
    fn tag_directive_binds_handle() -> TestResult
    {
        let (token, tags) = scan("%TAG !e! tag:example.com,2000:app/\n");

        assert_eq!(
            token?,
            TokenKind::TagDirective("!e!".into(), "tag:example.com,2000:app/".into())
        );
        assert_eq!(
            tags.get("!e!").map(|t| t.as_str()),
            Some("tag:example.com,2000:app/")
        );

        Ok(())
    }

    #[test]
    fn tag_directive_secondary_override() -> TestResult
    {
        let (token, tags) = scan("%TAG !! tag:example.com,2000:\n");

        assert_eq!(
            token?,
            TokenKind::TagDirective("!!".into(), "tag:example.com,2000:".into())
        );
        assert!(tags.contains_key("!!"));

        Ok(())
    }

    #[test]
    fn tag_directive_missing_prefix_errors()
    {
        let (token, _) = scan("%TAG !e!\n");

        assert_eq!(token, Err(LexError::InvalidTagPrefix));
    }

    #[test]
    fn reserved_directive() -> TestResult
    {
        let (token, _) = scan("%FOO bar baz # comment\n");

        assert_eq!(
            token?,
            TokenKind::ReservedDirective("FOO".into(), "bar baz".into())
        );

        Ok(())
    }

    #[test]
    fn bare_percent_errors()
    {
        let (token, _) = scan("% \n");

        assert_eq!(token, Err(LexError::UnknownDirective));
    }
}
