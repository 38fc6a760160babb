//! Texture session
//!
//! `TexTool` remembers the last texture it opened so the decoded image can
//! be saved later. Every open replaces that state; a failed open clears it.

use crate::decode::{self, DecodeOutput};
use crate::events::DecodeListener;
use crate::options::OpenOptions;
use klei_tex_binary::{FileSink, ImageSink};
use klei_tex_core::{Result, TexError};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// The texture most recently opened by a [`TexTool`]
#[derive(Debug, Clone)]
pub struct CurrentTexture {
    pub path: PathBuf,
    pub output: DecodeOutput,
}

/// Stateful front end over [`decode::open`]
#[derive(Debug, Default)]
pub struct TexTool {
    options: OpenOptions,
    current: Option<CurrentTexture>,
}

impl TexTool {
    pub fn new(options: OpenOptions) -> Self {
        Self {
            options,
            current: None,
        }
    }

    pub fn options(&self) -> &OpenOptions {
        &self.options
    }

    /// Open a texture from a stream, replacing the current one
    pub fn open<R, L>(
        &mut self,
        filename: &Path,
        stream: R,
        listener: &mut L,
    ) -> Result<&CurrentTexture>
    where
        R: Read,
        L: DecodeListener + ?Sized,
    {
        self.current = None;
        let output = decode::open(filename, stream, &self.options, listener)?;
        Ok(self.current.insert(CurrentTexture {
            path: filename.to_path_buf(),
            output,
        }))
    }

    /// Open a texture file, replacing the current one
    pub fn open_file<P, L>(&mut self, path: P, listener: &mut L) -> Result<&CurrentTexture>
    where
        P: AsRef<Path>,
        L: DecodeListener + ?Sized,
    {
        self.current = None;
        let path = path.as_ref();
        let stream = BufReader::new(File::open(path)?);
        self.open(path, stream, listener)
    }

    /// The current texture, if the last open succeeded
    pub fn current(&self) -> Option<&CurrentTexture> {
        self.current.as_ref()
    }

    /// Forget the current texture
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Write the current image to `sink`
    pub fn save<S: ImageSink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        let current = self
            .current
            .as_ref()
            .ok_or_else(|| TexError::export("no texture is open"))?;
        sink.write_image(&current.output.image)
    }

    /// Write the current image to a file, format chosen by extension
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.save(&mut FileSink::new(path.as_ref()))
    }
}
