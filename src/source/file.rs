/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Contains an implementation of [`Source`](super::Source)
//! streaming from a file path.

use std::{fs::File, io::Read, path::Path};

use crate::source::{error::SourceResult, Source};

/// A [`Source`](super::Source) implementor streaming a
/// file's contents.
///
/// The file is opened on construction, read on demand and
/// closed on drop.
#[derive(Debug)]
pub struct FileSource
{
    file: File,
    eof:  bool,
}

impl FileSource
{
    /// Open the file at .path for streaming
    pub fn open<P>(path: P) -> std::io::Result<Self>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path)?;

        Ok(Self { file, eof: false })
    }
}

impl Source for FileSource
{
    fn fill(&mut self, buf: &mut [u8]) -> SourceResult<(usize, bool)>
    {
        if self.eof
        {
            return Ok((0, true));
        }

        let n = self.file.read(buf)?;

        // A zero length read on a File means end of file
        self.eof = n == 0;

        Ok((n, self.eof))
    }
}
