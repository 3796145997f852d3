//! Scanner for block scalars, the literal (|) and folded
//! (>) styles.
//!
//! A block scalar is introduced by its header: the style
//! indicator, an optional explicit indentation digit and an
//! optional chomping indicator ('-' strip, '+' keep,
//! default clip). Content starts on the following line and
//! runs until a non blank line indented less than the
//! scalar's content indentation.

use std::num::NonZeroU8;

use atoi::atoi;

use crate::{
    intern::TextPool,
    lexer::{
        error::{LexError, LexResult as Result},
        flag::Flags,
        Regime,
    },
    mark::MarkTracker,
    token::{ScalarStyle, TokenKind},
};

/// Chomping behavior for trailing line breaks of a block
/// scalar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChompStyle
{
    /// Keep a single trailing line break (default)
    Clip,
    /// Remove all trailing line breaks
    Strip,
    /// Keep every trailing line break
    Keep,
}

/// Scans a literal or folded block scalar, returning a
/// token kind and the amount read from .base, which is
/// expected to begin with the style indicator.
pub(in crate::lexer) fn scan_block_scalar(
    opts: Flags,
    base: &str,
    marks: &mut MarkTracker,
    pool: &TextPool,
    regime: Regime,
    fold: bool,
) -> Result<(TokenKind, usize)>
{
    let mut buffer = base;
    let mut scratch = String::new();

    let style = match fold
    {
        true => ScalarStyle::Folded,
        false => ScalarStyle::Literal,
    };

    // Content must be indented past the governing
    // collection; at the root that means column one
    let parent = regime.indent();
    let floor = if parent < 0 { 0 } else { parent as usize + 1 };

    // Eat the '|' or '>'
    advance!(buffer, :marks, 1);

    let (chomp, explicit) = scan_header(opts, &mut buffer, marks)?;

    let mut detected: Option<usize> = explicit.map(|d| {
        let base_indent = if parent < 0 { 0 } else { parent as usize };

        base_indent + d.get() as usize
    });

    // Line breaks waiting on the next content line to decide
    // their fate (fold, literal, or chomp)
    let mut breaks: usize = 0;
    let mut started = false;
    let mut prev_deeper = false;

    'content: loop
    {
        cache!(~buffer, 1, opts)?;

        if buffer.is_empty()
        {
            break 'content;
        }

        // Consume the line's indentation, up to the content
        // indentation when known
        loop
        {
            let column = marks.mark().column - 1;
            let enough = detected.map_or(false, |n| column >= n);

            if enough || !check!(~buffer => b' ')
            {
                break;
            }

            advance!(buffer, :marks, 1);
            cache!(~buffer, 1, opts)?;
        }

        cache!(~buffer, 4, opts)?;

        let column = marks.mark().column - 1;

        // Tabs may not be used for block indentation
        if check!(~buffer => b'\t') && column < detected.unwrap_or(floor) && !line_is_blank(buffer)
        {
            return Err(LexError::InvalidTab);
        }

        // A blank line is content-less and never terminates
        // the scalar, whatever its indentation or trailing
        // whitespace
        if line_is_blank(buffer)
        {
            loop
            {
                cache!(~buffer, 1, opts)?;

                if isBreak!(~buffer)
                {
                    breaks += 1;
                    advance!(buffer, :marks, @line);

                    break;
                }

                if buffer.is_empty()
                {
                    break 'content;
                }

                advance!(buffer, :marks, 1);
            }

            continue 'content;
        }

        if buffer.is_empty()
        {
            break 'content;
        }

        // A document indicator always ends the scalar
        if isDocumentIndicator!(~buffer, :marks)
        {
            break 'content;
        }

        // A non blank line at or below the governing
        // indentation ends the scalar
        if column < detected.unwrap_or(floor)
        {
            break 'content;
        }

        // First content line fixes the indentation when no
        // explicit indicator was given
        if detected.is_none()
        {
            detected = Some(column.max(floor));
        }

        // Content beginning with a blank sits past the
        // detected indentation
        let deeper = isBlank!(~buffer);

        // Join pending breaks: folded scalars collapse a
        // single break between normally indented lines into a
        // space, everything else stays literal
        match (started, fold)
        {
            (false, _) =>
            {
                for _ in 0..breaks
                {
                    scratch.push('\n');
                }
            },
            (true, false) =>
            {
                for _ in 0..breaks
                {
                    scratch.push('\n');
                }
            },
            (true, true) if breaks == 1 && !deeper && !prev_deeper => scratch.push(' '),
            (true, true) =>
            {
                // The break following a normally indented line
                // going into a deeper line stays literal, hence
                // no N-1 adjustment when crossing indentation
                let literal = match deeper || prev_deeper
                {
                    true => breaks,
                    false => breaks.saturating_sub(1),
                };

                for _ in 0..literal
                {
                    scratch.push('\n');
                }
            },
        }

        breaks = 0;

        // Consume the rest of the line as content
        loop
        {
            cache!(~buffer, 1, opts)?;

            if isBreakZ!(~buffer)
            {
                break;
            }

            let width = widthOf!(~buffer);
            scratch.push_str(&buffer[..width]);
            advance!(buffer, :marks, @char);
        }

        started = true;
        prev_deeper = deeper;

        if isBreak!(~buffer)
        {
            breaks += 1;
            advance!(buffer, :marks, @line);
        }
    }

    // Apply the chomping indicator to the trailing breaks
    match chomp
    {
        ChompStyle::Strip =>
        {},
        ChompStyle::Clip if started && breaks > 0 => scratch.push('\n'),
        ChompStyle::Clip =>
        {},
        ChompStyle::Keep =>
        {
            for _ in 0..breaks
            {
                scratch.push('\n');
            }
        },
    }

    let token = TokenKind::Scalar(pool.intern(&scratch), style);
    let advance = base.len() - buffer.len();

    Ok((token, advance))
}

/// Retrieve a block scalar's header: the optional explicit
/// indentation digit and chomping indicator, in either
/// order, followed by optional trailing whitespace and a
/// comment, terminated by a line break (or the stream end)
fn scan_header(
    opts: Flags,
    buffer: &mut &str,
    marks: &mut MarkTracker,
) -> Result<(ChompStyle, Option<NonZeroU8>)>
{
    let mut skip = 0;
    let mut indent = None;
    let mut chomp = ChompStyle::Clip;

    cache!(~buffer, 2, opts)?;

    // Set the explicit indent if it exists.
    //
    // Note that we silently eat an invalid indent (0) rather
    // than erroring
    match buffer.as_bytes()
    {
        [i @ b'0'..=b'9', ..] | [_, i @ b'0'..=b'9', ..] =>
        {
            indent = atoi::<u8>(&[*i]).and_then(NonZeroU8::new);
            skip += 1;
        },
        _ =>
        {},
    }

    // Set the chomping behavior of the scalar, if required
    match buffer.as_bytes()
    {
        [c, ..] | [_, c, ..] if matches!(*c, b'+') =>
        {
            chomp = ChompStyle::Keep;
            skip += 1;
        },
        [c, ..] | [_, c, ..] if matches!(*c, b'-') =>
        {
            chomp = ChompStyle::Strip;
            skip += 1;
        },
        _ =>
        {},
    }

    advance!(*buffer, :marks, skip);

    // Whitespace and an optional comment may trail the
    // header, nothing else
    let mut in_comment = false;

    loop
    {
        cache!(~*buffer, 1, opts)?;

        if isBreakZ!(~*buffer)
        {
            break;
        }

        match (in_comment, isBlank!(~*buffer), check!(~*buffer => b'#'))
        {
            (true, _, _) | (_, true, _) =>
            {},
            (_, _, true) => in_comment = true,
            _ => return Err(LexError::InvalidBlockScalar),
        }

        advance!(*buffer, :marks, @char);
    }

    if isBreak!(~*buffer)
    {
        advance!(*buffer, :marks, @line);
    }

    Ok((chomp, indent))
}

/// Checks whether the line starting .buffer contains only
/// whitespace
fn line_is_blank(buffer: &str) -> bool
{
    let mut rest = buffer;

    loop
    {
        if isBreakZ!(~rest)
        {
            return true;
        }

        if !isBlank!(~rest)
        {
            return false;
        }

        advance!(rest, 1);
    }
}
