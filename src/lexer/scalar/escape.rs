//! This module exports function(s) for handling scalar
//! escapes in YAML documents.

use crate::lexer::error::{LexError, LexResult as Result};

/// Unescape a given YAML escape sequence as defined in
/// [Section 5.7][Link]. Specifically, YAML defines 18
/// 'special' escapes, and 3 methods of encoding 8, 16 and
/// 32 bit unicode points.
///
/// It writes the unescaped character to .scratch, returning
/// the length of .base advanced, or an error if the
/// escape sequence is invalid. It expects .base->0 is a
/// backslash (\\), as this is the only valid start of an
/// escape sequence.
///
/// [Link]: https://yaml.org/spec/1.2/spec.html#c-escape
pub(in crate::lexer) fn flow_unescape(base: &str, scratch: &mut String) -> Result<usize>
{
    let mut buffer = base;
    let mut escape_len: Option<u8> = None;

    // Not an escape sequence, early exit
    if !check!(~buffer => b'\\')
    {
        return Ok(0);
    }

    advance!(buffer, 1);

    // See 5.7: Escaped Characters
    // yaml.org/spec/1.2/spec.html#id2776092
    match buffer.as_bytes()
    {
        [b'0', ..] => scratch.push('\x00'),
        [b'a', ..] => scratch.push('\x07'),
        [b'b', ..] => scratch.push('\x08'),
        [b't', ..] | [b'\t', ..] => scratch.push('\x09'),
        [b'n', ..] => scratch.push('\x0A'),
        [b'v', ..] => scratch.push('\x0B'),
        [b'f', ..] => scratch.push('\x0C'),
        [b'r', ..] => scratch.push('\x0D'),
        [b'e', ..] => scratch.push('\x1B'),
        [b' ', ..] => scratch.push('\x20'),
        [b'"', ..] => scratch.push('"'),
        [b'/', ..] => scratch.push('/'),
        [b'\\', ..] => scratch.push('\\'),
        [b'N', ..] => scratch.push('\u{0085}'),
        [b'_', ..] => scratch.push('\u{00A0}'),
        [b'L', ..] => scratch.push('\u{2028}'),
        [b'P', ..] => scratch.push('\u{2029}'),
        [b'x', ..] => escape_len = Some(2),
        [b'u', ..] => escape_len = Some(4),
        [b'U', ..] => escape_len = Some(8),
        [] => return Err(LexError::UnexpectedEOF),
        _ => return Err(LexError::UnknownEscape),
    }
    advance!(buffer, 1);

    if let Some(sequence) = escape_len
    {
        let amt = write_unicode_point(buffer, scratch, sequence)?;
        advance!(buffer, amt);
    }

    Ok(base.len() - buffer.len())
}

/// Unescape a percent encoded UTF8 tag escape sequence as
/// defined in [Section 5.6][Link], writing the octets to
/// the scratch, returning the length of .base consumed.
///
/// [Link]: https://yaml.org/spec/1.2/spec.html#ns-uri-char
pub(in crate::lexer) fn tag_uri_unescape(base: &str, scratch: &mut Vec<u8>) -> Result<usize>
{
    let mut buffer = base;
    let mut codepoint_len: i8 = 0;

    while {
        if buffer.len() < 3
        {
            return Err(LexError::UnexpectedEOF);
        }

        if !(check!(~buffer => b'%') && isHex!(~buffer, 1) && isHex!(~buffer, 2))
        {
            return Err(LexError::UnknownEscape);
        }

        // Safety: we just checked that there are at least three
        // bytes in the buffer
        let octet: u8 = (as_hex(buffer.as_bytes()[1]) << 4) + as_hex(buffer.as_bytes()[2]);

        match codepoint_len
        {
            // First time through, determine how many octets this codepoint has
            0 =>
            {
                codepoint_len = match octet
                {
                    o if (o & 0x80) == 0x00 => 1,
                    o if (o & 0xE0) == 0xC0 => 2,
                    o if (o & 0xF0) == 0xE0 => 3,
                    o if (o & 0xF8) == 0xF0 => 4,
                    _ => return Err(LexError::UnknownEscape),
                }
            },
            // Else ensure that the trailing octet is valid
            _ =>
            {
                if (octet & 0xC0) != 0x80
                {
                    return Err(LexError::UnknownEscape);
                }
            },
        }

        scratch.push(octet);
        codepoint_len -= 1;
        advance!(buffer, 3);

        codepoint_len > 0
    }
    {}

    Ok(base.len() - buffer.len())
}

/// Writes a UTF8 codepoint to the scratch space, returning
/// the bytes consumed from .base
fn write_unicode_point(base: &str, scratch: &mut String, codepoint_len: u8) -> Result<usize>
{
    let mut buffer = base;
    let mut value: u32 = 0;

    for _ in 0..codepoint_len
    {
        match buffer.as_bytes()
        {
            [] => return Err(LexError::UnexpectedEOF),
            [b, ..] if b.is_ascii_hexdigit() =>
            {
                value = (value << 4) + as_hex(*b) as u32;
                advance!(buffer, 1);
            },
            _ => return Err(LexError::UnknownEscape),
        }
    }

    let point = char::from_u32(value).ok_or(LexError::UnknownEscape)?;
    scratch.push(point);

    Ok(codepoint_len as usize)
}

fn as_hex(b: u8) -> u8
{
    match b
    {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => 0,
    }
}
