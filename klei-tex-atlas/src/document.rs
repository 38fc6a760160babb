//! Atlas XML document reader
//!
//! An atlas document looks like:
//!
//! ```xml
//! <Atlas>
//!     <Texture filename="inventoryimages.tex" />
//!     <Elements>
//!         <Element name="axe.tex" u1="0.0009" u2="0.0615" v1="0.9385" v2="0.9990" />
//!     </Elements>
//! </Atlas>
//! ```
//!
//! Every child element of `Atlas/Elements` is an entry, whatever its tag.

use crate::types::RawAtlasEntry;
use klei_tex_core::{Result, TexError};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

const ROOT_TAG: &[u8] = b"Atlas";
const ELEMENTS_TAG: &[u8] = b"Elements";
const TEXTURE_TAG: &[u8] = b"Texture";

/// Parsed atlas document
#[derive(Debug, Clone, Default)]
pub struct AtlasDocument {
    /// Texture file named by `Atlas/Texture@filename`
    texture: Option<String>,
    /// Entries in document order
    entries: Vec<RawAtlasEntry>,
    /// Path the document was loaded from
    file_path: Option<PathBuf>,
}

impl AtlasDocument {
    /// Load an atlas document from a file
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use klei_tex_atlas::AtlasDocument;
    ///
    /// let doc = AtlasDocument::load("inventoryimages.xml")?;
    /// println!("{} entries", doc.entries().len());
    /// # Ok::<(), klei_tex_core::TexError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut doc = Self::parse_str(&content)?;
        doc.file_path = Some(path.to_path_buf());
        Ok(doc)
    }

    /// Load an atlas document from a reader
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::parse_str(&content)
    }

    /// Parse an atlas document from a string
    ///
    /// Fails with [`TexError::AtlasDocument`] when the XML is malformed or
    /// has no `Atlas/Elements` node. Bad attribute values are left for the
    /// mapper to report per entry.
    pub fn parse_str(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut doc = AtlasDocument::default();
        let mut path: Vec<Vec<u8>> = Vec::new();
        let mut found_elements = false;

        loop {
            let event = reader.read_event().map_err(|e| {
                TexError::atlas_document(format!(
                    "XML error at position {}: {}",
                    reader.buffer_position(),
                    e
                ))
            })?;

            match event {
                Event::Start(ref start) => {
                    doc.visit(&path, start, &mut found_elements)?;
                    path.push(start.name().as_ref().to_vec());
                }
                Event::Empty(ref start) => {
                    doc.visit(&path, start, &mut found_elements)?;
                }
                Event::End(_) => {
                    path.pop();
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !found_elements {
            return Err(TexError::atlas_document("missing Atlas/Elements node"));
        }

        debug!(
            entries = doc.entries.len(),
            texture = doc.texture.as_deref().unwrap_or(""),
            "Read atlas document"
        );
        Ok(doc)
    }

    /// Handle an opening tag whose parent chain is `path`
    fn visit(
        &mut self,
        path: &[Vec<u8>],
        start: &BytesStart,
        found_elements: &mut bool,
    ) -> Result<()> {
        let name = start.name();
        match path {
            [root] if root.as_slice() == ROOT_TAG => {
                if name.as_ref() == ELEMENTS_TAG {
                    *found_elements = true;
                } else if name.as_ref() == TEXTURE_TAG {
                    self.texture = read_attributes(start)?
                        .into_iter()
                        .find(|(key, _)| key == "filename")
                        .map(|(_, value)| value);
                }
            }
            [root, elements] if root.as_slice() == ROOT_TAG && elements.as_slice() == ELEMENTS_TAG => {
                let mut entry = RawAtlasEntry::new(self.entries.len());
                for (key, value) in read_attributes(start)? {
                    entry.set_attribute(&key, value);
                }
                self.entries.push(entry);
            }
            _ => {}
        }
        Ok(())
    }

    /// Texture file named by the document, if any
    pub fn texture(&self) -> Option<&str> {
        self.texture.as_deref()
    }

    /// Entries in document order
    pub fn entries(&self) -> &[RawAtlasEntry] {
        &self.entries
    }

    /// Path the document was loaded from
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }
}

fn read_attributes(start: &BytesStart) -> Result<Vec<(String, String)>> {
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr =
            attr.map_err(|e| TexError::atlas_document(format!("invalid attribute: {}", e)))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| TexError::atlas_document(format!("invalid attribute value: {}", e)))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(attributes)
}

/// Atlas document path for a texture: same directory, same base name,
/// `extension` in place of the texture's own
pub fn atlas_path_for<P: AsRef<Path>>(texture_path: P, extension: &str) -> PathBuf {
    texture_path.as_ref().with_extension(extension)
}
