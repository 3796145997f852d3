/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! This module contains the various macros used by
//! lib/lexer.

/// Rebinds .buffer's binding forward, updating the .marks
/// tracker to match.
///
/// Care must be taken to ensure that @line is only used
/// when you are sure that a YAML line break starts the
/// given .buffer, as @line _will not advance_ the buffer at
/// all if it is not a line break. Similarly, @char assumes
/// a complete UTF8 sequence starts the buffer.
///
/// Modifiers
///     <- .buffer := return .buffer->0..amount
///
/// Variants
///     /1 .buffer, :.marks, .amount       byte == column advance
///     /2 .buffer, :.marks, @char         one codepoint, one column
///     /3 .buffer, :.marks, @line         one line break
///     /4 .buffer, .amount                no mark tracking
macro_rules! advance {
    ($buffer:expr, :$marks:expr, @line) => {
        let amount = advance!(@amount $buffer);
        let (_, rest) = $buffer.split_at(amount);
        $marks.update_line(amount);

        $buffer = rest
    };
    ($buffer:expr, :$marks:expr, @char) => {
        let amount = match widthOf!(~$buffer)
        {
            0 => 0,
            n => n,
        };
        let (_, rest) = $buffer.split_at(amount);
        $marks.update(amount, 1);

        $buffer = rest
    };
    ($buffer:expr, :$marks:expr, $amount:expr) => {
        let (_, rest) = $buffer.split_at($amount);
        $marks.update($amount, $amount);

        $buffer = rest
    };
    (<- $buffer:expr, :$marks:expr, $amount:expr) => {{
        let (cut, rest) = $buffer.split_at($amount);
        $marks.update($amount, $amount);

        $buffer = rest;

        cut
    }};
    ($buffer:expr, $amount:expr) => {
        let (_, rest) = $buffer.split_at($amount);

        $buffer = rest
    };

    (@amount $buffer:expr) => {
        match $buffer.as_bytes()
        {
            [b'\r', b'\n', ..]
            | [b'\xC2', b'\x85', ..] => 2,
            [b'\xE2', b'\x80', b'\xA8', ..]
            | [b'\xE2', b'\x80', b'\xA9', ..] => 3,
            [b'\r', ..] | [b'\n', ..] => 1,
            _ => 0,
        }
    };
}

/// Check that the underlying .buffer has at least the given
/// number of UTF8 .codepoints available, returning an error
/// if O_EXTENDABLE is set in .opts. Returns the number of
/// _bytes_ read.
///
/// Modifiers
///     ~ .buffer := .buffer.as_bytes()
///
/// Variants
///     /1 .buffer, .codepoints, .opts
///     /2 .buffer, @.offset, .codepoints, .opts
macro_rules! cache {
    (~$buffer:expr $(, @$offset:expr )?, $codepoints:expr, $opts:expr) => {
        cache!($buffer.as_bytes(), $( @$offset, )? $codepoints, $opts)
    };
    ($buffer:expr, $codepoints:expr, $opts:expr) => {
        cache!(@priv $buffer, 0, $codepoints, $opts)
    };
    ($buffer:expr, @$offset:expr, $codepoints:expr, $opts:expr) => {
        cache!(@priv $buffer, $offset, $codepoints, $opts)
    };
    (@priv $buffer:expr, $offset:expr, $codepoints:expr, $opts:expr) => {{
        let extend = $opts.contains($crate::lexer::flag::O_EXTENDABLE);
        let mut ret = Ok(0);
        let mut bytes = $offset;
        for _ in 0..$codepoints
        {
            match widthOf!($buffer, bytes)
            {
                0 =>
                {
                    if extend
                    {
                        ret = Err($crate::lexer::error::LexError::Extend);
                    }

                    break;
                },
                n =>
                {
                    bytes += n;
                    ret = ret.map(|r| r + n);
                },
            }
        }

        ret
    }};
}

/// Check the .buffer (@ .offset) matches the given
/// .pattern, optionally returning an .error.
///
/// Note that the error path is special cased to return an
/// UnexpectedEOF if it encounters an empty slice, although
/// this can be overridden by expressly including an empty
/// pattern ([]) in your .pattern
///
/// Modifiers
///     ~ .buffer := .buffer.as_bytes()
///
/// Variants
///     /1 .buffer => .pattern := /2 .buffer, 0 => .pattern
///     /2 .buffer, .offset => .pattern
///     /3 .buffer => .pattern, else .error
///             := /4 .buffer, 0 => .pattern else .error
///     /4 .buffer, .offset => .pattern, else .error
macro_rules! check {
    (~ $buffer:expr $(, $offset:expr )? => $( $match:tt )|+ $(, else $error:expr)? ) => {
        check!(@priv $buffer.as_bytes() $(, $offset )? => $( $match )|+ $(, else $error)?)
    };

    ($buffer:expr $(, $offset:expr )? => $( $match:tt )|+ $(, else $error:expr)? ) => {
        check!(@priv $buffer $(, $offset )? => $( $match )|+ $(, else $error)?)
    };

    /* Private variants */
    (@priv $buffer:expr, $offset:expr => $( $match:tt )|+) => {
        match $buffer.get($offset..) {
            Some(buffer) => check!(@priv buffer => $( $match )|+),
            None => check!(@eofck $( $match )|+ ),
        }
    };
    (@priv $buffer:expr => $( $match:tt )|+) => {
        match $buffer {
            $( check!(@ptn $match) )|+ => true,
            _ => false
        }
    };
    (@priv $buffer:expr, $offset:expr => $( $match:tt )|+, else $error:expr) => {
        match $buffer.get($offset..) {
            Some(buffer) => check!(@priv buffer => $( $match )|+, else $error),
            None if check!(@eofck $( $match )|+ ) => Ok(()),
            _ => Err($crate::lexer::error::LexError::UnexpectedEOF),
        }
    };
    (@priv $buffer:expr => $( $match:tt )|+, else $error:expr) => {
        match $buffer {
            $( check!(@ptn $match) )|+ => Ok(()),
            [] => Err($crate::lexer::error::LexError::UnexpectedEOF),
            _ => Err($error),
        }
    };

    // Note we use macro path rules to first try matching the given
    // token as a literal, e.g a b'_', then try it as a pattern
    (@ptn $byte:literal) => {
        [$byte, ..]
    };
    (@ptn $match:pat) => {
        $match
    };

    // When indexing to an out of bounds .offset, we mostly want
    // to return false, however if the caller is checking for an
    // out of bounds (e.g a [] pattern) we must special case this
    // and return true
    (@eofck $( $match:tt )|+) => {{
        #[allow(unused_mut)]
        let mut checking_eof = false;
        $( check!(@eofck &mut checking_eof, $match); )+

        checking_eof
    }};
    // _If and only if_ there is an empty slice pattern, set
    // checking_eof to true as the caller wants to positively
    // check for EOF
    (@eofck $is_checking:expr, []) => {
        *$is_checking = true
    };
    (@eofck $is_checking:expr, $_:literal) => {
    };
    (@eofck $is_checking:expr, $_:pat) => {
    };
}

/// Check if the byte (@ .offset) is a line break
///
/// Modifiers
///     ~ .buffer := .buffer.as_bytes()
///
/// Variants
///     /1 .buffer := /2 .buffer, 0
///     /2 .buffer, .offset
///     /3 .buffer, else .error
///             := /4 .buffer, 0, else .error
///     /4 .buffer, .offset, else .error
macro_rules! isBreak {
    (~ $buffer:expr $(, $offset:expr )? $(, else $error:expr )? ) => {
        isBreak!($buffer.as_bytes() $(, $offset )? $(, else $error)?)
    };
    ($buffer:expr $(, $offset:expr )? $(, else $error:expr )? ) => {
        check!($buffer $(, $offset)? =>
            b'\r'                                   /* CR   #xD     */
            | b'\n'                                 /* LF   #xA     */
            | [b'\xC2', b'\x85', ..]                /* NEL  #x85    */
            | [b'\xE2', b'\x80', b'\xA8', ..]       /* LS   #x2028  */
            | [b'\xE2', b'\x80', b'\xA9', ..]       /* PS   #x2029  */
            $(, else $error)?
        )
    };
}

/// Check if the byte (@ .offset) is a line break or if the
/// buffer is empty
macro_rules! isBreakZ {
    (~ $buffer:expr $(, $offset:expr )? ) => {
        isBreakZ!($buffer.as_bytes() $(, $offset )? )
    };
    ($buffer:expr $(, $offset:expr )? ) => {
        isBreak!($buffer $(, $offset)? ) || check!($buffer $(, $offset)? => [])
    };
}

/// Check if the byte (@ .offset) is a space or tab
macro_rules! isBlank {
    (~ $buffer:expr $(, $offset:expr )? $(, else $error:expr )? ) => {
        isBlank!($buffer.as_bytes() $(, $offset )? $(, else $error )? )
    };
    ($buffer:expr $(, $offset:expr )? $(, else $error:expr )? ) => {
        check!($buffer $(, $offset)? => b' ' | b'\t' $(, else $error )? )
    };
}

/// Check if the byte (@ .offset) is a space, tab or line
/// break
macro_rules! isWhiteSpace {
    (~ $buffer:expr $(, $offset:expr )? $(, else $error:expr )? ) => {
        isWhiteSpace!($buffer.as_bytes() $(, $offset )? $(, else $error)? )
    };
    ($buffer:expr $(, $offset:expr )? ) => {
        isBlank!($buffer $(, $offset)?) || isBreak!($buffer $(, $offset)?)
    };
    ($buffer:expr $(, $offset:expr )?, else $error:expr ) => {
        isBlank!($buffer $(, $offset)?, else $error)
            .or_else(|_| isBreak!($buffer $(, $offset)?, else $error))
    };
}

/// Check if the byte (@ .offset) is a space, tab, line
/// break or if .buffer is empty
macro_rules! isWhiteSpaceZ {
    (~ $buffer:expr $(, $offset:expr )? ) => {
        isWhiteSpaceZ!($buffer.as_bytes() $(, $offset )? )
    };
    ($buffer:expr $(, $offset:expr )? ) => {
        isBlank!($buffer $(, $offset)?)
            || isBreak!($buffer $(, $offset)?)
            || check!($buffer $(, $offset)? => [])
    };
}

/// Check if the byte (@ .offset) is a flow indicator, one
/// of: ',' '[' ']' '{' '}'
macro_rules! isFlowIndicator {
    (~ $buffer:expr $(, $offset:expr )? ) => {
        isFlowIndicator!($buffer.as_bytes() $(, $offset )? )
    };
    ($buffer:expr $(, $offset:expr )? ) => {
        check!($buffer $(, $offset)? => b',' | b'[' | b']' | b'{' | b'}')
    };
}

/// Check if a YAML document indicator ('---', '...') exists
/// @.offset in the given .buffer.
///
/// You must provide the current column (or a .marks
/// tracker)
///
/// Modifiers:
///     ~ .buffer := .buffer.as_bytes()
///
/// Variants
///     /1 .buffer, .column
///     /2 .buffer, :.marks
macro_rules! isDocumentIndicator {
    (~ $buffer:expr, :$marks:expr) => {
        isDocumentIndicator!($buffer.as_bytes(), $marks.mark().column)
    };
    ($buffer:expr, :$marks:expr) => {
        isDocumentIndicator!($buffer, $marks.mark().column)
    };
    (~ $buffer:expr, $column:expr) => {
        isDocumentIndicator!($buffer.as_bytes(), $column)
    };
    ($buffer:expr, $column:expr) => {
        $column == 1
            && check!($buffer => [b'-', b'-', b'-', ..] | [b'.', b'.', b'.', ..])
            && isWhiteSpaceZ!($buffer, 3)
    };
}

/// Checks if byte (@ .offset) in .buffer is hexadecimal
macro_rules! isHex {
    (~ $buffer:expr $(, $offset:expr )? ) => {
        isHex!($buffer.as_bytes() $(, $offset)? )
    };
    ($buffer:expr $(, $offset:expr )? ) => {
        check!($buffer $(, $offset)? =>
                [b'0'..=b'9', ..] | [b'A'..=b'F', ..] | [b'a'..=b'f', ..]
            )
    };
}

/// Returns the length of the unicode character (@ .offset)
///
/// Modifiers:
///     ~ .buffer := .buffer.as_bytes()
///
/// Variants:
///     /1 .buffer := /2 .buffer, 0
///     /2 .buffer, .offset
macro_rules! widthOf {
    (~ $buffer:expr $(, $offset:expr )?) => {
        widthOf!($buffer.as_bytes() $(, $offset)?)
    };
    ($buffer:expr $(, $offset:expr )?) => {
        widthOf!(@priv $buffer $(, $offset)? )
    };
    (@priv $buffer:expr) => {
        widthOf!(@priv $buffer, 0)
    };
    (@priv $buffer:expr, $offset:expr) => {
        match $buffer.get($offset) {
            Some(c) if c & 0x80 == 0x00 => 1,
            Some(c) if c & 0xE0 == 0xC0 => 2,
            Some(c) if c & 0xF0 == 0xE0 => 3,
            Some(c) if c & 0xF8 == 0xF0 => 4,
            _ => 0,
        }
    };
}
