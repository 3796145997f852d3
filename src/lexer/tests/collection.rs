/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use crate::{
    lexer::Regime,
    token::{ScalarStyle::*, StreamEncoding, TokenKind::*},
};

const ROOT: Regime = Regime::Block(0);

#[test]
fn block_sequence()
{
    tokens!("- a\n- b", ROOT =>
        StreamStart(StreamEncoding::UTF8),
        Indent(0),
        BlockEntry,
        Scalar("a".into(), Plain),
        Indent(0),
        BlockEntry,
        Scalar("b".into(), Plain),
        StreamEnd,
    );
}

#[test]
fn block_mapping()
{
    tokens!("a: 1\nb: 2", ROOT =>
        StreamStart(StreamEncoding::UTF8),
        Indent(0),
        Scalar("a".into(), Plain),
        Value,
        Scalar("1".into(), Plain),
        Indent(0),
        Scalar("b".into(), Plain),
        Value,
        Scalar("2".into(), Plain),
        StreamEnd,
    );
}

#[test]
fn nested_block_mapping_indent_tokens()
{
    tokens!("a:\n  b: c", ROOT =>
        StreamStart(StreamEncoding::UTF8),
        Indent(0),
        Scalar("a".into(), Plain),
        Value,
        Indent(2),
        Scalar("b".into(), Plain),
        Value,
        Scalar("c".into(), Plain),
        StreamEnd,
    );
}

#[test]
fn explicit_key_tokens()
{
    tokens!("? key\n: value", ROOT =>
        StreamStart(StreamEncoding::UTF8),
        Indent(0),
        ExplicitKey,
        Scalar("key".into(), Plain),
        Indent(0),
        Value,
        Scalar("value".into(), Plain),
        StreamEnd,
    );
}

#[test]
fn flow_sequence()
{
    tokens!("[1, 2, 3]", Regime::Flow =>
        StreamStart(StreamEncoding::UTF8),
        Indent(0),
        FlowSequenceStart,
        Scalar("1".into(), Plain),
        FlowEntry,
        Scalar("2".into(), Plain),
        FlowEntry,
        Scalar("3".into(), Plain),
        FlowSequenceEnd,
        StreamEnd,
    );
}

#[test]
fn flow_mapping()
{
    tokens!("{a: 1, b: 2}", Regime::Flow =>
        StreamStart(StreamEncoding::UTF8),
        Indent(0),
        FlowMappingStart,
        Scalar("a".into(), Plain),
        Value,
        Scalar("1".into(), Plain),
        FlowEntry,
        Scalar("b".into(), Plain),
        Value,
        Scalar("2".into(), Plain),
        FlowMappingEnd,
        StreamEnd,
    );
}

#[test]
fn flow_json_adjacent_value()
{
    tokens!(r#"{"a":1}"#, Regime::Flow =>
        StreamStart(StreamEncoding::UTF8),
        Indent(0),
        FlowMappingStart,
        Scalar("a".into(), DoubleQuote),
        Value,
        Scalar("1".into(), Plain),
        FlowMappingEnd,
        StreamEnd,
    );
}

#[test]
fn flow_plain_scalar_with_colon()
{
    // A ':' not followed by whitespace or a flow indicator
    // stays inside the plain scalar
    tokens!("[a:1]", Regime::Flow =>
        StreamStart(StreamEncoding::UTF8),
        Indent(0),
        FlowSequenceStart,
        Scalar("a:1".into(), Plain),
        FlowSequenceEnd,
        StreamEnd,
    );
}

#[test]
fn nested_flow_collections()
{
    tokens!("[{a: 1}, [2]]", Regime::Flow =>
        StreamStart(StreamEncoding::UTF8),
        Indent(0),
        FlowSequenceStart,
        FlowMappingStart,
        Scalar("a".into(), Plain),
        Value,
        Scalar("1".into(), Plain),
        FlowMappingEnd,
        FlowEntry,
        FlowSequenceStart,
        Scalar("2".into(), Plain),
        FlowSequenceEnd,
        FlowSequenceEnd,
        StreamEnd,
    );
}

#[test]
fn indentation_tokens_report_columns()
{
    tokens!("a:\n    deep:\n      deeper", ROOT =>
        StreamStart(StreamEncoding::UTF8),
        Indent(0),
        Scalar("a".into(), Plain),
        Value,
        Indent(4),
        Scalar("deep".into(), Plain),
        Value,
        Indent(6),
        Scalar("deeper".into(), Plain),
        StreamEnd,
    );
}

#[test]
fn comment_lines_are_skipped()
{
    tokens!("# leading comment\n- a # trailing\n# another\n- b", ROOT =>
        StreamStart(StreamEncoding::UTF8),
        Indent(0),
        BlockEntry,
        Scalar("a".into(), Plain),
        Indent(0),
        BlockEntry,
        Scalar("b".into(), Plain),
        StreamEnd,
    );
}
