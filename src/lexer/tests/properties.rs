/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use crate::{
    lexer::{error::LexError, Regime},
    token::{ScalarStyle::*, StreamEncoding, TokenKind::*},
};

const ROOT: Regime = Regime::Block(0);

#[test]
fn anchor_then_alias()
{
    tokens!("- &a foo\n- *a", ROOT =>
        StreamStart(StreamEncoding::UTF8),
        Indent(0),
        BlockEntry,
        Anchor("a".into()),
        Scalar("foo".into(), Plain),
        Indent(0),
        BlockEntry,
        Alias("a".into()),
        StreamEnd,
    );
}

#[test]
fn anchored_tagged_node()
{
    tokens!("&anchor !!str value", ROOT =>
        StreamStart(StreamEncoding::UTF8),
        Indent(0),
        Anchor("anchor".into()),
        Tag("tag:yaml.org,2002:str".into()),
        Scalar("value".into(), Plain),
        StreamEnd,
    );
}

#[test]
fn verbatim_tag_token()
{
    tokens!("!<tag:example.com,2000:app/rgb> value", ROOT =>
        StreamStart(StreamEncoding::UTF8),
        Indent(0),
        Tag("tag:example.com,2000:app/rgb".into()),
        Scalar("value".into(), Plain),
        StreamEnd,
    );
}

#[test]
fn local_tag_token()
{
    tokens!("!local value", ROOT =>
        StreamStart(StreamEncoding::UTF8),
        Indent(0),
        Tag("!local".into()),
        Scalar("value".into(), Plain),
        StreamEnd,
    );
}

#[test]
fn alias_as_mapping_key()
{
    tokens!("*key: value", ROOT =>
        StreamStart(StreamEncoding::UTF8),
        Indent(0),
        Alias("key".into()),
        Value,
        Scalar("value".into(), Plain),
        StreamEnd,
    );
}

#[test]
fn empty_anchor_name_errors()
{
    tokens_err!("& value", ROOT => LexError::InvalidAnchorName);
}

#[test]
fn undeclared_named_handle_errors()
{
    tokens_err!("!nope!suffix value", ROOT => LexError::UnknownTagHandle);
}
