/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use crate::{
    lexer::{error::LexError, Regime},
    token::{ScalarStyle::*, StreamEncoding, TokenKind::*},
};

const ROOT: Regime = Regime::Block(-2);

#[test]
fn document_markers()
{
    tokens!("--- a\n...\n--- b", ROOT =>
        StreamStart(StreamEncoding::UTF8),
        Indent(0),
        DirectivesEnd,
        Scalar("a".into(), Plain),
        Indent(0),
        DocumentEnd,
        Indent(0),
        DirectivesEnd,
        Scalar("b".into(), Plain),
        StreamEnd,
    );
}

#[test]
fn bare_directives_end_at_eof()
{
    tokens!("---", ROOT =>
        StreamStart(StreamEncoding::UTF8),
        Indent(0),
        DirectivesEnd,
        StreamEnd,
    );
}

#[test]
fn version_directive()
{
    tokens!("%YAML 1.3\n--- a", ROOT =>
        StreamStart(StreamEncoding::UTF8),
        Indent(0),
        VersionDirective(1, 3),
        Indent(0),
        DirectivesEnd,
        Scalar("a".into(), Plain),
        StreamEnd,
    );
}

#[test]
fn tag_directive_tokens()
{
    tokens!("%TAG !e! tag:example.com,2000:app/\n--- !e!foo bar", ROOT =>
        StreamStart(StreamEncoding::UTF8),
        Indent(0),
        TagDirective("!e!".into(), "tag:example.com,2000:app/".into()),
        Indent(0),
        DirectivesEnd,
        Tag("tag:example.com,2000:app/foo".into()),
        Scalar("bar".into(), Plain),
        StreamEnd,
    );
}

#[test]
fn tag_directive_expires_at_document_end()
{
    // The !e! binding belongs to the first document only
    tokens_err!(
        "%TAG !e! tag:example.com,2000:\n--- !e!a\n...\n--- !e!b",
        ROOT => LexError::UnknownTagHandle
    );
}

#[test]
fn reserved_directive_token()
{
    tokens!("%FOO bar baz\n--- a", ROOT =>
        StreamStart(StreamEncoding::UTF8),
        Indent(0),
        ReservedDirective("FOO".into(), "bar baz".into()),
        Indent(0),
        DirectivesEnd,
        Scalar("a".into(), Plain),
        StreamEnd,
    );
}

#[test]
fn unsupported_version_errors()
{
    tokens_err!("%YAML 2.0\n--- a", ROOT => LexError::UnsupportedVersion);
}

#[test]
fn document_marker_mid_line_is_content()
{
    tokens!("a --- b", ROOT =>
        StreamStart(StreamEncoding::UTF8),
        Indent(0),
        Scalar("a --- b".into(), Plain),
        StreamEnd,
    );
}

#[test]
fn utf16le_stream_decodes()
{
    use crate::{intern::TextPool, lexer::Lexer, source::slice::SliceSource, token::Marker};

    // 'a: b' as UTF16LE with a byte order mark
    let bytes: &[u8] = b"\xFF\xFEa\x00:\x00 \x00b\x00";
    let mut lexer = Lexer::new(SliceSource::new(bytes), TextPool::new());

    let start = lexer.next(Regime::Block(0)).unwrap();
    assert_eq!(start.kind, StreamStart(StreamEncoding::UTF16LE));

    let bom = lexer.next(Regime::Block(0)).unwrap();
    assert_eq!(bom.marker(), Marker::ByteOrderMark);

    let kinds: Vec<_> = std::iter::from_fn(|| match lexer.next(Regime::Block(0))
    {
        Ok(token) if token.marker() != Marker::StreamEnd => Some(token.kind),
        _ => None,
    })
    .collect();

    assert_eq!(kinds, vec![
        Indent(0),
        Scalar("a".into(), Plain),
        Value,
        Scalar("b".into(), Plain),
    ]);
}
