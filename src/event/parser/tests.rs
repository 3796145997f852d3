/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Event level tests, asserting on a compact rendering of
//! the event stream: one line per event, in the notation
//! used by the YAML test suite ('+STR', '=VAL :foo', ...).

use pretty_assertions::assert_eq;

use super::*;
use crate::event::types::*;

/// Parse .data to completion, panicking on error
fn events_of(data: &str) -> Vec<String>
{
    let mut parser = Parser::from_utf8(data);
    let mut rendered = Vec::new();

    while let Some(event) = parser.next_event()
    {
        match event
        {
            Ok(event) => rendered.push(render(&event)),
            Err(e) => panic!("parse error on {:?}: {}", data, e),
        }
    }

    rendered
}

/// Parse .data until the error it must produce
fn error_of(data: &str) -> ParseError
{
    let mut parser = Parser::from_utf8(data);

    loop
    {
        match parser.get_next_event()
        {
            Ok(Some(_)) => continue,
            Ok(None) => panic!("parser accepted invalid input: {:?}", data),
            Err(e) => return e,
        }
    }
}

/// Render an event in test suite notation
fn render(event: &Event) -> String
{
    match event.data()
    {
        EventData::StreamStart(_) => "+STR".into(),
        EventData::StreamEnd => "-STR".into(),
        EventData::DocumentStart(doc) => match doc.implicit
        {
            true => "+DOC".into(),
            false => "+DOC ---".into(),
        },
        EventData::DocumentEnd(doc) => match doc.implicit
        {
            true => "-DOC".into(),
            false => "-DOC ...".into(),
        },
        EventData::SequenceStart(node) =>
        {
            let style = match node.content.style
            {
                CollectionStyle::Flow => " []",
                CollectionStyle::Block => "",
            };

            format!("+SEQ{}{}", style, props(&node.anchor, &node.tag))
        },
        EventData::SequenceEnd => "-SEQ".into(),
        EventData::MappingStart(node) =>
        {
            let style = match node.content.style
            {
                CollectionStyle::Flow => " {}",
                CollectionStyle::Block => "",
            };

            format!("+MAP{}{}", style, props(&node.anchor, &node.tag))
        },
        EventData::MappingEnd => "-MAP".into(),
        EventData::Scalar(node) =>
        {
            let style = match node.content.style()
            {
                ScalarStyle::Plain => ':',
                ScalarStyle::SingleQuote => '\'',
                ScalarStyle::DoubleQuote => '"',
                ScalarStyle::Literal => '|',
                ScalarStyle::Folded => '>',
            };

            format!(
                "=VAL{} {}{}",
                props(&node.anchor, &node.tag),
                style,
                escape(node.content.data())
            )
        },
        EventData::Alias(alias) => format!("=ALI *{}", alias.name),
        EventData::AnnotationStart(ann) => format!("+ANN @{}", ann.name),
        EventData::AnnotationEnd => "-ANN".into(),
    }
}

fn props(anchor: &Option<Text>, tag: &Option<Text>) -> String
{
    let mut s = String::new();

    if let Some(anchor) = anchor
    {
        s.push_str(" &");
        s.push_str(anchor);
    }

    if let Some(tag) = tag
    {
        s.push_str(" <");
        s.push_str(tag);
        s.push('>');
    }

    s
}

fn escape(data: &str) -> String
{
    data.replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('\t', "\\t")
}

macro_rules! events {
    ($data:expr => $( $expected:literal ),+ $(,)?) => {
        assert_eq!(events_of($data), vec![ $( $expected.to_string() ),+ ])
    };
}

/*
 * ==== Stream and document framing ====
 */

#[test]
fn empty_stream()
{
    events!("" => "+STR", "-STR");
}

#[test]
fn scalar_document()
{
    events!("hello" =>
        "+STR", "+DOC", "=VAL :hello", "-DOC", "-STR");
}

#[test]
fn explicit_document()
{
    events!("--- hello" =>
        "+STR", "+DOC ---", "=VAL :hello", "-DOC", "-STR");
}

#[test]
fn explicit_document_ends()
{
    events!("--- a\n...\n--- b" =>
        "+STR",
        "+DOC ---", "=VAL :a", "-DOC ...",
        "+DOC ---", "=VAL :b", "-DOC",
        "-STR");
}

#[test]
fn bare_document_after_end_marker()
{
    events!("a\n...\nb" =>
        "+STR",
        "+DOC", "=VAL :a", "-DOC ...",
        "+DOC", "=VAL :b", "-DOC",
        "-STR");
}

#[test]
fn empty_explicit_document()
{
    events!("---" =>
        "+STR", "+DOC ---", "=VAL :", "-DOC", "-STR");
}

#[test]
fn empty_explicit_documents()
{
    events!("---\n---" =>
        "+STR",
        "+DOC ---", "=VAL :", "-DOC",
        "+DOC ---", "=VAL :", "-DOC",
        "-STR");
}

#[test]
fn version_directive_attaches_to_document()
{
    let mut parser = Parser::from_utf8("%YAML 1.3\n--- a");

    // +STR
    parser.next_event().unwrap().unwrap();

    let doc = parser.next_event().unwrap().unwrap();

    match doc.data()
    {
        EventData::DocumentStart(doc) =>
        {
            assert!(!doc.implicit);
            assert_eq!(doc.directives.version, VersionDirective { major: 1, minor: 3 });

            // The defaults are merged in alongside
            assert_eq!(
                doc.directives.tags.get("!!").map(|t| t.as_str()),
                Some("tag:yaml.org,2002:")
            );
        },
        other => panic!("expected a document start, got {:?}", other),
    }
}

#[test]
fn reserved_directive_surfaced_on_document()
{
    let mut parser = Parser::from_utf8("%FOO bar baz\n--- a");

    parser.next_event().unwrap().unwrap();
    let doc = parser.next_event().unwrap().unwrap();

    match doc.data()
    {
        EventData::DocumentStart(doc) =>
        {
            assert_eq!(doc.directives.reserved.len(), 1);
            assert_eq!(&doc.directives.reserved[0].name, "FOO");
            assert_eq!(&doc.directives.reserved[0].argument, "bar baz");
        },
        other => panic!("expected a document start, got {:?}", other),
    }
}

#[test]
fn directives_without_document_error()
{
    assert_eq!(error_of("%YAML 1.3"), ParseError::MissingDocumentStart);
}

#[test]
fn duplicate_version_directive_errors()
{
    assert_eq!(
        error_of("%YAML 1.3\n%YAML 1.3\n--- a"),
        ParseError::DuplicateVersion
    );
}

#[test]
fn duplicate_tag_directive_errors()
{
    assert_eq!(
        error_of("%TAG !e! tag:one/\n%TAG !e! tag:two/\n--- a"),
        ParseError::DuplicateTagDirective
    );
}

#[test]
fn content_after_document_errors()
{
    assert_eq!(error_of("'a'\n'b'"), ParseError::MissingDocumentStart);
}

/*
 * ==== Block collections ====
 */

#[test]
fn block_mapping()
{
    events!("a: 1\nb: 2" =>
        "+STR", "+DOC",
        "+MAP", "=VAL :a", "=VAL :1", "=VAL :b", "=VAL :2", "-MAP",
        "-DOC", "-STR");
}

#[test]
fn block_sequence()
{
    events!("- a\n- b" =>
        "+STR", "+DOC",
        "+SEQ", "=VAL :a", "=VAL :b", "-SEQ",
        "-DOC", "-STR");
}

#[test]
fn nested_block_mapping()
{
    events!("outer:\n  inner: 1" =>
        "+STR", "+DOC",
        "+MAP", "=VAL :outer",
        "+MAP", "=VAL :inner", "=VAL :1", "-MAP",
        "-MAP",
        "-DOC", "-STR");
}

#[test]
fn sequence_of_mappings()
{
    events!("- a: 1\n- b: 2" =>
        "+STR", "+DOC",
        "+SEQ",
        "+MAP", "=VAL :a", "=VAL :1", "-MAP",
        "+MAP", "=VAL :b", "=VAL :2", "-MAP",
        "-SEQ",
        "-DOC", "-STR");
}

#[test]
fn nested_sequences_compact()
{
    events!("- - a\n  - b" =>
        "+STR", "+DOC",
        "+SEQ", "+SEQ", "=VAL :a", "=VAL :b", "-SEQ", "-SEQ",
        "-DOC", "-STR");
}

#[test]
fn zero_indented_sequence_value()
{
    events!("a:\n- 1\n- 2\nb: x" =>
        "+STR", "+DOC",
        "+MAP", "=VAL :a",
        "+SEQ", "=VAL :1", "=VAL :2", "-SEQ",
        "=VAL :b", "=VAL :x",
        "-MAP",
        "-DOC", "-STR");
}

#[test]
fn empty_sequence_entries()
{
    events!("- a\n-\n- b" =>
        "+STR", "+DOC",
        "+SEQ", "=VAL :a", "=VAL :", "=VAL :b", "-SEQ",
        "-DOC", "-STR");
}

#[test]
fn empty_mapping_values()
{
    events!("a:\nb: 2" =>
        "+STR", "+DOC",
        "+MAP", "=VAL :a", "=VAL :", "=VAL :b", "=VAL :2", "-MAP",
        "-DOC", "-STR");
}

#[test]
fn explicit_key_entries()
{
    events!("? a\n: 1\n? b\n: 2" =>
        "+STR", "+DOC",
        "+MAP", "=VAL :a", "=VAL :1", "=VAL :b", "=VAL :2", "-MAP",
        "-DOC", "-STR");
}

#[test]
fn explicit_key_missing_value()
{
    events!("? a\n? b" =>
        "+STR", "+DOC",
        "+MAP", "=VAL :a", "=VAL :", "=VAL :b", "=VAL :", "-MAP",
        "-DOC", "-STR");
}

#[test]
fn empty_key_value()
{
    events!(": v" =>
        "+STR", "+DOC",
        "+MAP", "=VAL :", "=VAL :v", "-MAP",
        "-DOC", "-STR");
}

#[test]
fn document_marker_closes_block_collections()
{
    events!("a: 1\n--- b" =>
        "+STR", "+DOC",
        "+MAP", "=VAL :a", "=VAL :1", "-MAP",
        "-DOC",
        "+DOC ---", "=VAL :b", "-DOC",
        "-STR");
}

#[test]
fn sibling_keys_after_nested_mapping()
{
    // Sibling keys are matched by column, not nesting order
    events!("a:\n b: 1\nc: 2" =>
        "+STR", "+DOC",
        "+MAP", "=VAL :a", "+MAP", "=VAL :b", "=VAL :1", "-MAP", "=VAL :c", "=VAL :2", "-MAP",
        "-DOC", "-STR");
}

#[test]
fn indentation_violation_errors()
{
    // 'd' sits at a column no open mapping claims
    assert_eq!(
        error_of("a:\n  b: 1\n d: 2"),
        ParseError::InvalidIndentation
    );
}

#[test]
fn multiline_implicit_key_errors()
{
    assert_eq!(error_of("'a\nb': c"), ParseError::InvalidKey);
}

#[test]
fn value_in_mid_line_errors()
{
    assert_eq!(error_of("a: b: c"), ParseError::InvalidKey);
}

#[test]
fn key_without_value_errors()
{
    assert_eq!(error_of("a: 1\n'b'"), ParseError::MissingValue);
}

#[test]
fn misplaced_block_entry_errors()
{
    assert_eq!(error_of("- 'a'\n  - b"), ParseError::MissingBlockEntry);
}

/*
 * ==== Flow collections ====
 */

#[test]
fn flow_sequence()
{
    events!("[1, 2, 3]" =>
        "+STR", "+DOC",
        "+SEQ []", "=VAL :1", "=VAL :2", "=VAL :3", "-SEQ",
        "-DOC", "-STR");
}

#[test]
fn flow_mapping()
{
    events!("{a: 1, b: 2}" =>
        "+STR", "+DOC",
        "+MAP {}", "=VAL :a", "=VAL :1", "=VAL :b", "=VAL :2", "-MAP",
        "-DOC", "-STR");
}

#[test]
fn empty_flow_collections()
{
    events!("[]" => "+STR", "+DOC", "+SEQ []", "-SEQ", "-DOC", "-STR");
    events!("{}" => "+STR", "+DOC", "+MAP {}", "-MAP", "-DOC", "-STR");
}

#[test]
fn flow_trailing_comma()
{
    events!("[a, b, ]" =>
        "+STR", "+DOC",
        "+SEQ []", "=VAL :a", "=VAL :b", "-SEQ",
        "-DOC", "-STR");
}

#[test]
fn nested_flow_collections()
{
    events!("[a, [b, c], {d: e}]" =>
        "+STR", "+DOC",
        "+SEQ []",
        "=VAL :a",
        "+SEQ []", "=VAL :b", "=VAL :c", "-SEQ",
        "+MAP {}", "=VAL :d", "=VAL :e", "-MAP",
        "-SEQ",
        "-DOC", "-STR");
}

#[test]
fn flow_sequence_single_pair_mapping()
{
    events!("[a: 1, b]" =>
        "+STR", "+DOC",
        "+SEQ []",
        "+MAP {}", "=VAL :a", "=VAL :1", "-MAP",
        "=VAL :b",
        "-SEQ",
        "-DOC", "-STR");
}

#[test]
fn flow_sequence_pair_implied_key()
{
    events!("[: v]" =>
        "+STR", "+DOC",
        "+SEQ []",
        "+MAP {}", "=VAL :", "=VAL :v", "-MAP",
        "-SEQ",
        "-DOC", "-STR");
}

#[test]
fn flow_mapping_singleton_key()
{
    events!("{ hello }" =>
        "+STR", "+DOC",
        "+MAP {}", "=VAL :hello", "=VAL :", "-MAP",
        "-DOC", "-STR");
}

#[test]
fn flow_mapping_implied_values()
{
    events!("{a: , b}" =>
        "+STR", "+DOC",
        "+MAP {}", "=VAL :a", "=VAL :", "=VAL :b", "=VAL :", "-MAP",
        "-DOC", "-STR");
}

#[test]
fn flow_mapping_as_block_value()
{
    events!("a: {b: 1}" =>
        "+STR", "+DOC",
        "+MAP", "=VAL :a",
        "+MAP {}", "=VAL :b", "=VAL :1", "-MAP",
        "-MAP",
        "-DOC", "-STR");
}

#[test]
fn flow_collection_as_mapping_key()
{
    events!("k: v\n[a, b]: c" =>
        "+STR", "+DOC",
        "+MAP", "=VAL :k", "=VAL :v",
        "+SEQ []", "=VAL :a", "=VAL :b", "-SEQ",
        "=VAL :c",
        "-MAP",
        "-DOC", "-STR");
}

#[test]
fn unterminated_flow_sequence_errors()
{
    assert_eq!(
        error_of("[a, b"),
        ParseError::MissingFlowSequenceEntryOrEnd
    );
}

#[test]
fn document_marker_inside_flow_errors()
{
    assert_eq!(
        error_of("[a,\n--- b"),
        ParseError::MissingFlowSequenceEntryOrEnd
    );
}

#[test]
fn missing_flow_separator_errors()
{
    assert_eq!(
        error_of("{a: 1 b: 2}"),
        ParseError::MissingFlowMappingEntryOrEnd
    );
}

/*
 * ==== Node properties ====
 */

#[test]
fn anchored_scalar_and_alias()
{
    events!("- &a foo\n- *a" =>
        "+STR", "+DOC",
        "+SEQ", "=VAL &a :foo", "=ALI *a", "-SEQ",
        "-DOC", "-STR");
}

#[test]
fn tagged_scalar()
{
    events!("!!str 123" =>
        "+STR", "+DOC",
        "=VAL <tag:yaml.org,2002:str> :123",
        "-DOC", "-STR");
}

#[test]
fn tagged_literal_scalar_document()
{
    events!("--- !!str |-\n  line1\n  line2" =>
        "+STR", "+DOC ---",
        "=VAL <tag:yaml.org,2002:str> |line1\\nline2",
        "-DOC", "-STR");
}

#[test]
fn anchor_and_tag_in_either_order()
{
    events!("&a !!str one" =>
        "+STR", "+DOC", "=VAL &a <tag:yaml.org,2002:str> :one", "-DOC", "-STR");
    events!("!!str &a one" =>
        "+STR", "+DOC", "=VAL &a <tag:yaml.org,2002:str> :one", "-DOC", "-STR");
}

#[test]
fn properties_attach_to_implicit_mapping()
{
    events!("!!map\na: b" =>
        "+STR", "+DOC",
        "+MAP <tag:yaml.org,2002:map>", "=VAL :a", "=VAL :b", "-MAP",
        "-DOC", "-STR");
}

#[test]
fn anchored_value_then_alias_key()
{
    events!("a: &x b\n*x : c" =>
        "+STR", "+DOC",
        "+MAP", "=VAL :a", "=VAL &x :b", "=ALI *x", "=VAL :c", "-MAP",
        "-DOC", "-STR");
}

#[test]
fn dangling_properties_make_empty_scalar()
{
    events!("- &a\n- b" =>
        "+STR", "+DOC",
        "+SEQ", "=VAL &a :", "=VAL :b", "-SEQ",
        "-DOC", "-STR");
}

#[test]
fn tag_directive_resolution()
{
    events!("%TAG !e! tag:example.com,2000:app/\n--- !e!rgb fff" =>
        "+STR", "+DOC ---",
        "=VAL <tag:example.com,2000:app/rgb> :fff",
        "-DOC", "-STR");
}

#[test]
fn verbatim_tag()
{
    events!("!<tag:example.com,2000:app/rgb> fff" =>
        "+STR", "+DOC",
        "=VAL <tag:example.com,2000:app/rgb> :fff",
        "-DOC", "-STR");
}

#[test]
fn duplicate_anchor_property_errors()
{
    assert_eq!(error_of("&a &b c"), ParseError::DuplicateNodeProperty);
}

#[test]
fn undeclared_tag_handle_errors()
{
    assert_eq!(
        error_of("!nope!str value"),
        ParseError::Lexer(crate::lexer::error::LexError::UnknownTagHandle)
    );
}

/*
 * ==== Annotations ====
 */

#[test]
fn annotation_without_params()
{
    events!("@defaults\nk: v" =>
        "+STR", "+DOC",
        "+ANN @defaults", "-ANN",
        "+MAP", "=VAL :k", "=VAL :v", "-MAP",
        "-DOC", "-STR");
}

#[test]
fn annotation_with_params()
{
    events!("@concat(a, b) c" =>
        "+STR", "+DOC",
        "+ANN @concat", "=VAL :a", "=VAL :b", "-ANN",
        "=VAL :c",
        "-DOC", "-STR");
}

#[test]
fn annotation_params_nest_collections()
{
    events!("@merge([1, 2], {k: v}) x" =>
        "+STR", "+DOC",
        "+ANN @merge",
        "+SEQ []", "=VAL :1", "=VAL :2", "-SEQ",
        "+MAP {}", "=VAL :k", "=VAL :v", "-MAP",
        "-ANN",
        "=VAL :x",
        "-DOC", "-STR");
}

#[test]
fn annotation_after_properties_errors()
{
    assert_eq!(
        error_of("&a @foo b"),
        ParseError::AnnotationAfterProperties
    );
}

/*
 * ==== Structural properties ====
 */

const PROPERTY_INPUTS: [&str; 8] = [
    "hello",
    "a: 1\nb: 2",
    "- a\n- b",
    "[1, {a: b}, [c]]",
    "a:\n  b:\n    c: 1\n  d: 2",
    "--- a\n...\n--- b",
    "- &a foo\n- *a",
    "@concat(a, b) c",
];

#[test]
fn events_are_balanced()
{
    for input in &PROPERTY_INPUTS
    {
        let events = events_of(input);

        let mut depth: i64 = 0;

        for event in &events
        {
            match &event[..2]
            {
                "+S" | "+D" | "+M" | "+A" => depth += 1,
                "-S" | "-D" | "-M" | "-A" => depth -= 1,
                _ =>
                {},
            }

            assert!(depth >= 0, "unbalanced events in {:?}: {:?}", input, events);
        }

        assert_eq!(depth, 0, "unbalanced events in {:?}: {:?}", input, events);
        assert_eq!(events.first().map(String::as_str), Some("+STR"));
        assert_eq!(events.last().map(String::as_str), Some("-STR"));
    }
}

#[test]
fn termination_is_idempotent()
{
    let mut parser = Parser::from_utf8("a: 1");

    while let Some(event) = parser.next_event()
    {
        event.unwrap();
    }

    for _ in 0..3
    {
        assert!(parser.next_event().is_none());
    }
}

#[test]
fn marks_are_monotonic()
{
    for input in &PROPERTY_INPUTS
    {
        let mut parser = Parser::from_utf8(input);
        let mut previous: Option<Event> = None;

        while let Some(event) = parser.next_event()
        {
            let event = event.unwrap();

            if let Some(prev) = previous.take()
            {
                assert!(
                    prev.end().index <= event.start().index,
                    "marks regressed in {:?}: {:?} then {:?}",
                    input,
                    prev,
                    event
                );
            }

            previous = Some(event);
        }
    }
}

#[test]
fn block_levels_strictly_increase()
{
    let mut parser = Parser::from_utf8("a:\n  b:\n    c: 1\n  d: 2");

    while let Some(event) = parser.next_event()
    {
        event.unwrap();

        let block_levels: Vec<i64> = parser
            .state
            .levels()
            .map(|level| level.indent)
            .filter(|indent| *indent >= 0)
            .collect();

        for pair in block_levels.windows(2)
        {
            assert!(
                pair[0] < pair[1],
                "block indentation not strictly increasing: {:?}",
                block_levels
            );
        }
    }
}

#[test]
fn depth_limit_enforced()
{
    let mut parser = Parser::from_utf8("[[[[[[a]]]]]]").with_max_depth(4);

    let error = loop
    {
        match parser.get_next_event()
        {
            Ok(Some(_)) => continue,
            Ok(None) => panic!("depth limit was not enforced"),
            Err(e) => break e,
        }
    };

    assert_eq!(error, ParseError::DepthLimitExceeded);
}

#[test]
fn error_reports_marks()
{
    let mut parser = Parser::from_utf8("a:\n  b: 1\n d: 2");

    let error = loop
    {
        match parser.next_event()
        {
            Some(Ok(_)) => continue,
            Some(Err(e)) => break e,
            None => panic!("expected a parse error"),
        }
    };

    assert_eq!(error.classify(), crate::error::Category::Syntax);

    // The offending token sits on line 3
    assert_eq!(parser.recent_token_start().line, 3);
}

#[test]
fn set_input_resets()
{
    let mut parser = Parser::from_utf8("a: 1");

    parser.next_event().unwrap().unwrap();

    parser.set_input(SliceSource::new(b"fresh"));

    let events: Vec<String> = std::iter::from_fn(|| {
        parser
            .next_event()
            .map(|event| render(&event.unwrap()))
    })
    .collect();

    assert_eq!(events, vec!["+STR", "+DOC", "=VAL :fresh", "-DOC", "-STR"]);
}

#[test]
fn multi_line_plain_scalar_folds()
{
    events!("a: first\n  second" =>
        "+STR", "+DOC",
        "+MAP", "=VAL :a", "=VAL :first second", "-MAP",
        "-DOC", "-STR");
}

#[test]
fn quoted_styles_survive()
{
    events!("- 'single'\n- \"double\"" =>
        "+STR", "+DOC",
        "+SEQ", "=VAL 'single", "=VAL \"double", "-SEQ",
        "-DOC", "-STR");
}

#[test]
fn folded_scalar_value()
{
    events!("key: >\n  folds\n  lines\n" =>
        "+STR", "+DOC",
        "+MAP", "=VAL :key", "=VAL >folds lines\\n", "-MAP",
        "-DOC", "-STR");
}
