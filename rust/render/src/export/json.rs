// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON frame export for web or external viewers.

use std::io::Write;

use serde::Serialize;

use crate::backend::RenderBackend;
use crate::color::{Rgb, BACKGROUND};
use crate::error::Result;
use crate::filter::RenderFrame;

/// Top-level document written for each frame.
#[derive(Serialize)]
struct FrameDocument<'a> {
    background: Rgb,
    #[serde(flatten)]
    frame: &'a RenderFrame,
}

/// Writes each presented frame as one JSON document.
pub struct JsonFrameWriter<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonFrameWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
        }
    }

    /// Indent the output.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RenderBackend for JsonFrameWriter<W> {
    fn name(&self) -> &str {
        "json"
    }

    fn present(&mut self, frame: &RenderFrame) -> Result<()> {
        let doc = FrameDocument {
            background: BACKGROUND,
            frame,
        };
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &doc)?;
        } else {
            serde_json::to_writer(&mut self.writer, &doc)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
