/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Contains an implementation of [`Source`](super::Source)
//! for in memory byte sequences.

use crate::source::{error::SourceResult, Source};

/// A [`Source`](super::Source) implementor over borrowed
/// bytes
#[derive(Debug, Clone)]
pub struct SliceSource<'a>
{
    data: &'a [u8],
    pos:  usize,
}

impl<'a> SliceSource<'a>
{
    /// Instantiate a new [`SliceSource`] over the given
    /// bytes
    pub fn new(data: &'a [u8]) -> Self
    {
        Self { data, pos: 0 }
    }
}

impl<'a> Source for SliceSource<'a>
{
    fn fill(&mut self, buf: &mut [u8]) -> SourceResult<(usize, bool)>
    {
        let remaining = &self.data[self.pos..];
        let n = remaining.len().min(buf.len());

        buf[..n].copy_from_slice(&remaining[..n]);
        self.pos += n;

        Ok((n, self.pos == self.data.len()))
    }
}
