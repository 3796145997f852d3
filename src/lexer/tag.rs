/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! This module contains functions and helpers for scanning
//! YAML tags.
//!
//! A quick refresher on the terminology used in this
//! module. In YAML, a tag is made out of several
//! components:
//!
//! 1. handle
//! 2. prefix
//! 3. suffix
//!
//! ### A visual aid
//!
//! ---
//! %TAG <handle> <prefix>
//! key: <handle><suffix> value
//! ...
//!
//! A handle is one of: !, !! or !:word:!, referred to as
//! primary, secondary and named respectively. A prefix is
//! bound to a handle by a %TAG directive, with the primary
//! and secondary handles having override-able defaults.
//!
//! Unlike most scanners in this crate, tag resolution
//! happens here at lex time: the token produced carries the
//! handle's prefix already joined with the suffix, so
//! '!!str' leaves this module as 'tag:yaml.org,2002:str'.
//! Verbatim tags ('!<uri>') pass through untouched, and a
//! lone '!' stays as the non specific tag.

use std::collections::HashMap;

use crate::{
    intern::{Text, TextPool},
    lexer::{
        error::{LexError, LexResult as Result},
        flag::Flags,
        scalar::escape::tag_uri_unescape,
    },
    mark::MarkTracker,
    token::TokenKind,
};

/// Prefix the primary handle (!) resolves to when no %TAG
/// directive overrides it
pub(crate) const DEFAULT_PRIMARY_PREFIX: &str = "!";

/// Prefix the secondary handle (!!) resolves to when no
/// %TAG directive overrides it
pub(crate) const DEFAULT_SECONDARY_PREFIX: &str = "tag:yaml.org,2002:";

/// Scans a node tag from .buffer, which is expected to
/// begin with a '!', resolving it against the active .tags
/// directive bindings, and returning the resolved token.
pub(in crate::lexer) fn scan_node_tag(
    opts: Flags,
    buffer: &mut &str,
    marks: &mut MarkTracker,
    pool: &TextPool,
    tags: &HashMap<Text, Text>,
) -> Result<TokenKind>
{
    cache!(~*buffer, 2, opts)?;

    // Verbatim tags are stored as they appear, no resolution
    //
    // !<tag:example.com,2000:app/rgb>
    // ^^
    if check!(~*buffer => [b'!', b'<', ..])
    {
        advance!(*buffer, :marks, 2);

        let mut len = 0;

        loop
        {
            cache!(~*buffer, @len, 1, opts)?;

            match buffer.as_bytes().get(len)
            {
                Some(&b'>') => break,
                Some(&b) if is_uri_char(b) => len += 1,
                _ => return Err(LexError::InvalidTagSuffix),
            }
        }

        if len == 0
        {
            return Err(LexError::InvalidTagSuffix);
        }

        let verbatim = pool.intern(&buffer[..len]);
        advance!(*buffer, :marks, len + 1);

        end_check(opts, *buffer)?;

        return Ok(TokenKind::Tag(verbatim));
    }

    let handle = scan_handle(opts, buffer, marks, pool, false)?;

    // !!str
    //   ^^^
    let mut scratch = Vec::new();

    loop
    {
        cache!(~*buffer, 1, opts)?;

        match buffer.as_bytes().first()
        {
            Some(&b'%') =>
            {
                cache!(~*buffer, 3, opts)?;
                let amt = tag_uri_unescape(*buffer, &mut scratch)?;
                advance!(*buffer, :marks, amt);
            },
            Some(&b) if is_tag_char(b) =>
            {
                scratch.push(b);
                advance!(*buffer, :marks, 1);
            },
            _ => break,
        }
    }

    end_check(opts, *buffer)?;

    let suffix = std::str::from_utf8(&scratch).map_err(|_| LexError::InvalidTagSuffix)?;

    let resolved = match (&handle, suffix.is_empty())
    {
        // A lone '!' disables resolution on the node, and is
        // carried through as the non specific tag
        (Handle::Primary, true) => pool.intern("!"),
        (Handle::Secondary, true) => return Err(LexError::InvalidTagSuffix),
        (Handle::Named(_), true) => return Err(LexError::InvalidTagSuffix),
        (_, false) =>
        {
            let prefix = match &handle
            {
                Handle::Primary => tags
                    .get(DEFAULT_PRIMARY_PREFIX)
                    .map(|t| t.as_str())
                    .unwrap_or(DEFAULT_PRIMARY_PREFIX),
                Handle::Secondary => tags
                    .get("!!")
                    .map(|t| t.as_str())
                    .unwrap_or(DEFAULT_SECONDARY_PREFIX),
                Handle::Named(name) => match tags.get(name.as_str())
                {
                    Some(prefix) => prefix.as_str(),
                    None => return Err(LexError::UnknownTagHandle),
                },
            };

            let mut full = String::with_capacity(prefix.len() + suffix.len());
            full.push_str(prefix);
            full.push_str(suffix);

            pool.intern(&full)
        },
    };

    Ok(TokenKind::Tag(resolved))
}

/// Scans a tag handle for a %TAG directive, returning it
/// interned
pub(in crate::lexer) fn scan_tag_handle(
    opts: Flags,
    buffer: &mut &str,
    marks: &mut MarkTracker,
    pool: &TextPool,
) -> Result<Text>
{
    let handle = scan_handle(opts, buffer, marks, pool, true)?;

    let text = match handle
    {
        Handle::Primary => pool.intern("!"),
        Handle::Secondary => pool.intern("!!"),
        Handle::Named(name) => name,
    };

    Ok(text)
}

/// Scans a %TAG directive's prefix, returning it interned.
///
/// Prefixes are kept verbatim, including any %XX escapes
pub(in crate::lexer) fn scan_tag_prefix(
    opts: Flags,
    buffer: &mut &str,
    marks: &mut MarkTracker,
    pool: &TextPool,
) -> Result<Text>
{
    let mut len = 0;

    loop
    {
        cache!(~*buffer, @len, 1, opts)?;

        match buffer.as_bytes().get(len)
        {
            // A prefix may additionally start with '!' for
            // local tags
            Some(&b'!') if len == 0 => len += 1,
            Some(&b) if is_uri_char(b) => len += 1,
            _ => break,
        }
    }

    if len == 0
    {
        return Err(LexError::InvalidTagPrefix);
    }

    let prefix = pool.intern(&buffer[..len]);
    advance!(*buffer, :marks, len);

    Ok(prefix)
}

/// The three shapes of a tag handle
enum Handle
{
    Primary,
    Secondary,
    Named(Text),
}

/// Scans a handle from .buffer, which is expected to begin
/// with '!'.
///
/// In a directive position a trailing '!' is required for
/// anything beyond the primary handle; in a node position a
/// bare '!word' is the primary handle with 'word' left in
/// the buffer as the suffix.
fn scan_handle(
    opts: Flags,
    buffer: &mut &str,
    marks: &mut MarkTracker,
    pool: &TextPool,
    directive: bool,
) -> Result<Handle>
{
    check!(~*buffer => b'!', else LexError::InvalidTagHandle)?;

    let mut len = 1;

    loop
    {
        cache!(~*buffer, @len, 1, opts)?;

        match buffer.as_bytes().get(len)
        {
            Some(&b) if b.is_ascii_alphanumeric() || b == b'-' => len += 1,
            _ => break,
        }
    }

    let named = check!(~*buffer, len => b'!');

    let handle = match (named, len)
    {
        // !! -- the secondary handle
        (true, 1) =>
        {
            advance!(*buffer, :marks, 2);

            Handle::Secondary
        },
        // !word! -- a named handle
        (true, _) =>
        {
            let name = pool.intern(&buffer[..len + 1]);
            advance!(*buffer, :marks, len + 1);

            Handle::Named(name)
        },
        // ! -- the primary handle; in a node position any
        // word characters after it belong to the suffix
        (false, _) if !directive && len > 1 =>
        {
            advance!(*buffer, :marks, 1);

            Handle::Primary
        },
        (false, 1) =>
        {
            advance!(*buffer, :marks, 1);

            Handle::Primary
        },
        // %TAG !word prefix -- a handle must close its '!'
        (false, _) => Err(LexError::InvalidTagHandle)?,
    };

    Ok(handle)
}

/// Characters permitted in a tag suffix: the URI set minus
/// '!' and the flow indicators, which YAML reserves
fn is_tag_char(b: u8) -> bool
{
    is_uri_char(b) && !matches!(b, b'!' | b',' | b'[' | b']' | b'{' | b'}')
}

/// The URI character set of YAML §5.6, excluding '%' which
/// introduces an escape
fn is_uri_char(b: u8) -> bool
{
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'-' | b'#'
                | b';'
                | b'/'
                | b'?'
                | b':'
                | b'@'
                | b'&'
                | b'='
                | b'+'
                | b'$'
                | b','
                | b'_'
                | b'.'
                | b'!'
                | b'~'
                | b'*'
                | b'\''
                | b'('
                | b')'
                | b'['
                | b']'
        )
}

/// A node tag must be followed by whitespace, the stream
/// end or a closing flow/params indicator
fn end_check(opts: Flags, buffer: &str) -> Result<()>
{
    cache!(~*buffer, 1, opts)?;

    match isWhiteSpaceZ!(~*buffer) || check!(~*buffer => b',' | b']' | b'}' | b')')
    {
        true => Ok(()),
        false => Err(LexError::InvalidTagSuffix),
    }
}
