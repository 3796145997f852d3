use crate::{
    intern::TextPool,
    lexer::{
        error::{LexError, LexResult as Result},
        flag::Flags,
        scalar::escape::flow_unescape,
    },
    mark::MarkTracker,
    token::{ScalarStyle, TokenKind},
};

/// Scans a single or double quoted scalar, returning a
/// token kind and the amount read from .base, which is
/// expected to begin with the opening quote.
///
/// Multi line quoted scalars fold like plain scalars: a
/// single break joins to a space, N blank lines become N-1
/// literal breaks, whitespace around the join is stripped.
/// Double quoted scalars additionally process C style
/// escapes and backslash line continuations.
pub(in crate::lexer) fn scan_flow_scalar(
    opts: Flags,
    base: &str,
    marks: &mut MarkTracker,
    pool: &TextPool,
    single: bool,
) -> Result<(TokenKind, usize)>
{
    let mut buffer = base;
    let mut scratch = String::new();

    let mut blanks = String::new();
    let mut breaks: usize = 0;

    let (quote, style) = match single
    {
        true => (SINGLE, ScalarStyle::SingleQuote),
        false => (DOUBLE, ScalarStyle::DoubleQuote),
    };

    // Eat the left quote
    advance!(buffer, :marks, 1);

    'scalar: loop
    {
        cache!(~buffer, 2, opts)?;

        // An unterminated scalar is an error, quotes must be
        // closed before the stream ends
        if buffer.is_empty()
        {
            return Err(LexError::InvalidFlowScalar);
        }

        // A document indicator inside a quoted scalar is also
        // an unterminated scalar
        if isDocumentIndicator!(~buffer, :marks)
        {
            return Err(LexError::InvalidFlowScalar);
        }

        // Content resumes, so any pending whitespace joins in.
        // This applies even when the next character is the
        // closing quote: trailing blanks and breaks are part of
        // a quoted scalar
        flush(&mut scratch, &mut blanks, &mut breaks);

        // Consume non whitespace characters
        while !isWhiteSpaceZ!(~buffer)
        {
            cache!(~buffer, 2, opts)?;

            // An escaped quote ('') cannot end a single quoted
            // scalar
            if single && check!(~buffer => [SINGLE, SINGLE, ..])
            {
                scratch.push('\'');

                advance!(buffer, :marks, 2);
                continue;
            }

            // The right quote ends the scalar
            if buffer.as_bytes().first() == Some(&quote)
            {
                break 'scalar;
            }

            if !single && check!(~buffer => b'\\')
            {
                // A backslash directly before a line break escapes
                // the break: no join is added and the next line's
                // leading whitespace is stripped
                if isBreak!(~buffer, 1)
                {
                    advance!(buffer, :marks, 1);
                    advance!(buffer, :marks, @line);

                    loop
                    {
                        cache!(~buffer, 1, opts)?;

                        match isBlank!(~buffer)
                        {
                            true =>
                            {
                                advance!(buffer, :marks, 1);
                            },
                            false => break,
                        }
                    }

                    continue;
                }

                let amt = flow_unescape(buffer, &mut scratch)?;
                advance!(buffer, :marks, amt);

                continue;
            }

            let width = widthOf!(~buffer);
            scratch.push_str(&buffer[..width]);
            advance!(buffer, :marks, @char);
        }

        // Consume whitespace, deciding between an in line gap
        // and a line join
        loop
        {
            cache!(~buffer, 1, opts)?;

            if buffer.is_empty()
            {
                return Err(LexError::InvalidFlowScalar);
            }

            match (isBlank!(~buffer), isBreak!(~buffer))
            {
                (true, _) =>
                {
                    if breaks == 0
                    {
                        blanks.push_str(&buffer[..1]);
                    }

                    advance!(buffer, :marks, 1);
                },
                (_, true) =>
                {
                    breaks += 1;
                    blanks.clear();

                    advance!(buffer, :marks, @line);
                },
                _ => break,
            }
        }
    }

    // Eat the right quote
    advance!(buffer, :marks, 1);

    let token = TokenKind::Scalar(pool.intern(&scratch), style);
    let advance = base.len() - buffer.len();

    Ok((token, advance))
}

/// Join pending whitespace into .scratch: blanks verbatim,
/// a single break as a space, N breaks as N-1 literal line
/// feeds
fn flush(scratch: &mut String, blanks: &mut String, breaks: &mut usize)
{
    match *breaks
    {
        0 => scratch.push_str(blanks),
        1 => scratch.push(' '),
        n =>
        {
            for _ in 1..n
            {
                scratch.push('\n');
            }
        },
    }

    blanks.clear();
    *breaks = 0;
}

const SINGLE: u8 = b'\'';
const DOUBLE: u8 = b'"';
