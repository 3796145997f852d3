use crate::{
    intern::TextPool,
    lexer::{
        error::LexResult as Result,
        flag::Flags,
        Regime,
    },
    mark::MarkTracker,
    token::{ScalarStyle, TokenKind},
};

/// Scans a plain scalar, returning a token kind and the
/// amount read from .base. Multi line scalars are folded:
/// a single line break joins to a space, N blank lines
/// become N-1 literal breaks, leading and trailing
/// whitespace on continuation lines is stripped.
///
/// Continuation lines must be indented past the governing
/// collection's indentation, which arrives through the
/// .regime; a dedented line ends the scalar.
///
/// See:
///     YAML 1.2: Section 7.3.3
///     yaml.org/spec/1.2/spec.html#ns-plain-first(c)
pub(in crate::lexer) fn scan_plain_scalar(
    opts: Flags,
    base: &str,
    marks: &mut MarkTracker,
    pool: &TextPool,
    regime: Regime,
) -> Result<(TokenKind, usize)>
{
    let mut buffer = base;
    let mut scratch = String::new();

    // Whitespace pending a decision: joined into the scalar
    // if content continues, dropped if the scalar ends
    let mut blanks = String::new();
    let mut breaks: usize = 0;

    'scalar: loop
    {
        // 4 is the longest character sequence we can encounter
        // (document indicators)
        cache!(~buffer, 4, opts)?;

        if buffer.is_empty()
        {
            break 'scalar;
        }

        // A document indicator or comment always terminates a
        // plain scalar.
        //
        // The only ways to reach this check are at the scalar's
        // first character, or after consuming whitespace below,
        // so a bare '#' test is enough
        if isDocumentIndicator!(~buffer, :marks) || check!(~buffer => b'#')
        {
            break 'scalar;
        }

        // Consume non whitespace characters
        while !isWhiteSpaceZ!(~buffer)
        {
            cache!(~buffer, 2, opts)?;

            // Character sequences which end a plain scalar:
            //
            // ': '                         -> anywhere
            // ':' + flow indicator         -> flow context
            // ',' | '[' | ']' | '{' | '}'  -> flow context
            // ')'                          -> annotation params
            if check!(~buffer => b':')
                && (isWhiteSpaceZ!(~buffer, 1)
                    || (regime.in_flow() && isFlowIndicator!(~buffer, 1)))
            {
                break 'scalar;
            }

            if regime.in_flow() && isFlowIndicator!(~buffer)
            {
                break 'scalar;
            }

            if regime.is_params() && check!(~buffer => b')')
            {
                break 'scalar;
            }

            // Content continues, so any held whitespace joins in
            flush(&mut scratch, &mut blanks, &mut breaks);

            let width = widthOf!(~buffer);
            scratch.push_str(&buffer[..width]);
            advance!(buffer, :marks, @char);
        }

        // Consume whitespace, deciding between an in line gap
        // and a line join
        loop
        {
            cache!(~buffer, 1, opts)?;

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

        if buffer.is_empty()
        {
            break 'scalar;
        }

        // After a line break the next line's content must sit
        // past the governing indentation, or the scalar is over
        if breaks > 0
        {
            let indent = marks.mark().column as i64 - 1;

            if indent <= regime.indent()
            {
                break 'scalar;
            }
        }
    }

    let token = TokenKind::Scalar(pool.intern(&scratch), ScalarStyle::Plain);
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

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::lexer::flag::O_ZEROED;

    type TestResult = anyhow::Result<()>;

    fn scan(base: &str, regime: Regime) -> Result<(TokenKind, usize)>
    {
        let mut marks = MarkTracker::new();
        let pool = TextPool::new();

        scan_plain_scalar(O_ZEROED, base, &mut marks, &pool, regime)
    }

    fn content(token: TokenKind) -> String
    {
        match token
        {
            TokenKind::Scalar(text, ScalarStyle::Plain) => text.to_string(),
            other => panic!("expected a plain scalar, got {:?}", other),
        }
    }

    #[test]
    fn plain_simple() -> TestResult
    {
        let (token, amt) = scan("hello world", Regime::Block(-2))?;

        assert_eq!(amt, 11);
        assert_eq!(content(token), "hello world");

        Ok(())
    }

    #[test]
    fn plain_stops_at_value() -> TestResult
    {
        let (token, amt) = scan("key: value", Regime::Block(-2))?;

        assert_eq!(amt, 3);
        assert_eq!(content(token), "key");

        Ok(())
    }

    #[test]
    fn plain_colon_without_space_is_content() -> TestResult
    {
        let (token, _) = scan("a:b", Regime::Block(-2))?;

        assert_eq!(content(token), "a:b");

        Ok(())
    }

    #[test]
    fn plain_stops_at_comment() -> TestResult
    {
        let (token, _) = scan("value # a comment", Regime::Block(-2))?;

        assert_eq!(content(token), "value");

        Ok(())
    }

    #[test]
    fn plain_flow_stops_at_indicator() -> TestResult
    {
        let (token, amt) = scan("entry,next]", Regime::Flow)?;

        assert_eq!(amt, 5);
        assert_eq!(content(token), "entry");

        Ok(())
    }

    #[test]
    fn plain_multi_line_folds() -> TestResult
    {
        let (token, _) = scan("a\n b\n c", Regime::Block(-2))?;

        assert_eq!(content(token), "a b c");

        Ok(())
    }

    #[test]
    fn plain_empty_lines_become_breaks() -> TestResult
    {
        let (token, _) = scan("a\n\n b", Regime::Block(-2))?;

        assert_eq!(content(token), "a\nb");

        Ok(())
    }

    #[test]
    fn plain_dedent_ends_scalar() -> TestResult
    {
        // Governing indentation 0: the second line is not
        // indented past it
        let (token, _) = scan("a\nb: c", Regime::Block(0))?;

        assert_eq!(content(token), "a");

        Ok(())
    }

    #[test]
    fn plain_stops_at_document_marker() -> TestResult
    {
        let (token, _) = scan("a\n--- b", Regime::Block(-2))?;

        assert_eq!(content(token), "a");

        Ok(())
    }

    #[test]
    fn plain_params_stops_at_paren() -> TestResult
    {
        let (token, amt) = scan("arg)", Regime::Params)?;

        assert_eq!(amt, 3);
        assert_eq!(content(token), "arg");

        Ok(())
    }
}
