/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Interned, immutable text handles.
//!
//! Every piece of variable data surfaced by this library --
//! scalar contents, anchor and alias names, resolved tags,
//! directive arguments -- is copied out of the scan buffer
//! into a [`Text`] handle allocated through a [`TextPool`].
//!
//! A [`Text`] is a reference counted, immutable UTF8
//! string. Cloning a handle retains the underlying
//! allocation, dropping it releases it; the allocation
//! lives until the last holder lets go, which may well be
//! after the parser that produced it is gone. Equality and
//! hashing are by content, never by pointer.

use std::{
    borrow::Borrow,
    fmt,
    hash::{Hash, Hasher},
    ops::Deref,
    rc::Rc,
};

/// A reference counted, immutable UTF8 string.
///
/// Compares and hashes by content. Dereferences to [`str`].
#[derive(Debug, Clone)]
pub struct Text
{
    inner: Rc<str>,
}

impl Text
{
    fn new(s: &str) -> Self
    {
        Self { inner: s.into() }
    }

    /// Length of the underlying text, in bytes
    pub fn len(&self) -> usize
    {
        self.inner.len()
    }

    /// Is the underlying text empty?
    pub fn is_empty(&self) -> bool
    {
        self.inner.is_empty()
    }

    /// View the underlying text
    pub fn as_str(&self) -> &str
    {
        &self.inner
    }
}

impl Deref for Text
{
    type Target = str;

    fn deref(&self) -> &Self::Target
    {
        &self.inner
    }
}

impl AsRef<str> for Text
{
    fn as_ref(&self) -> &str
    {
        &self.inner
    }
}

impl Borrow<str> for Text
{
    fn borrow(&self) -> &str
    {
        &self.inner
    }
}

impl PartialEq for Text
{
    fn eq(&self, other: &Self) -> bool
    {
        self.inner == other.inner
    }
}

impl Eq for Text {}

impl PartialEq<str> for Text
{
    fn eq(&self, other: &str) -> bool
    {
        &*self.inner == other
    }
}

impl PartialEq<&str> for Text
{
    fn eq(&self, other: &&str) -> bool
    {
        &*self.inner == *other
    }
}

impl Hash for Text
{
    fn hash<H: Hasher>(&self, state: &mut H)
    {
        self.inner.hash(state)
    }
}

impl fmt::Display for Text
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl From<&str> for Text
{
    fn from(s: &str) -> Self
    {
        Self::new(s)
    }
}

/// Allocator for [`Text`] handles.
///
/// The pool owns nothing beyond the distinguished empty
/// string, which is shared between every caller of
/// [`empty`](#method.empty) rather than reallocated.
/// Duplicate inputs are not deduplicated; two equal handles
/// may or may not share an allocation, which is why handle
/// equality is defined over content.
///
/// Cloning a pool is cheap and yields a pool sharing the
/// same empty constant.
#[derive(Debug, Clone)]
pub struct TextPool
{
    empty: Text,
}

impl TextPool
{
    /// Construct a new pool
    pub fn new() -> Self
    {
        Self {
            empty: Text::new(""),
        }
    }

    /// Copy .s into a new [`Text`] handle.
    ///
    /// The caller's buffer is not retained; empty input
    /// returns the shared empty constant.
    pub fn intern(&self, s: &str) -> Text
    {
        match s.is_empty()
        {
            true => self.empty(),
            false => Text::new(s),
        }
    }

    /// Copy .bytes into a new [`Text`] handle, if they are
    /// valid UTF8
    pub fn intern_bytes(&self, bytes: &[u8]) -> Result<Text, std::str::Utf8Error>
    {
        std::str::from_utf8(bytes).map(|s| self.intern(s))
    }

    /// The shared empty string
    pub fn empty(&self) -> Text
    {
        self.empty.clone()
    }
}

impl Default for TextPool
{
    fn default() -> Self
    {
        Self::new()
    }
}
