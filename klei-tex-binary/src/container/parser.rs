//! KTEX container parser implementation

use super::header::TextureHeader;
use super::types::{MipLevel, TexFile};
use crate::reader::BinaryReader;
use klei_tex_core::{MIP_RECORD_SIZE, ParseStage, Result, TexError};
use std::io::Read;
use tracing::{debug, instrument};

/// KTEX container parser
///
/// Reads the header and then every mip record in stored order. Blob sizes
/// come from each record's length prefix and are never inferred from the
/// pixel format.
pub struct ContainerParser;

impl ContainerParser {
    /// Parse a container from an in-memory buffer
    #[instrument(level = "debug", skip(data), fields(len = data.len()))]
    pub fn parse(data: &[u8]) -> Result<TexFile> {
        let mut reader = BinaryReader::new(data);
        let header = TextureHeader::from_reader(&mut reader)?;
        debug!(
            platform = ?header.platform,
            format = %header.pixel_format,
            texture_type = ?header.texture_type,
            mips = header.mip_count,
            "Parsed KTEX header"
        );

        // Every record needs at least its prefix; reject impossible counts
        // before reading anything so a corrupt count fails immediately.
        let min_table_size = (header.mip_count as usize).saturating_mul(MIP_RECORD_SIZE);
        if min_table_size > reader.remaining() {
            return Err(TexError::malformed(
                ParseStage::Header,
                format!(
                    "header declares {} mips but only {} bytes remain",
                    header.mip_count,
                    reader.remaining()
                ),
            ));
        }

        let mut mipmaps: Vec<MipLevel> = Vec::with_capacity(header.mip_count as usize);
        for index in 0..header.mip_count as usize {
            let mip = Self::parse_mip(&mut reader, index, mipmaps.last())?;
            debug!(
                index,
                width = mip.width,
                height = mip.height,
                size = mip.data.len(),
                "Parsed mip record"
            );
            mipmaps.push(mip);
        }

        if reader.remaining() > 0 {
            debug!(trailing = reader.remaining(), "Ignoring bytes after last mip");
        }

        Ok(TexFile { header, mipmaps })
    }

    /// Read a whole stream and parse it.
    ///
    /// The stream is consumed and dropped before this returns, on success or
    /// failure.
    pub fn parse_reader<R: Read>(mut stream: R) -> Result<TexFile> {
        let mut data = Vec::new();
        stream.read_to_end(&mut data)?;
        Self::parse(&data)
    }

    fn parse_mip(
        reader: &mut BinaryReader,
        index: usize,
        previous: Option<&MipLevel>,
    ) -> Result<MipLevel> {
        reader.set_stage(ParseStage::MipRecord(index));
        let width = reader.read_u32()?;
        let height = reader.read_u32()?;
        let data_size = reader.read_u32()? as usize;

        if width == 0 || height == 0 {
            return Err(TexError::malformed(
                ParseStage::MipRecord(index),
                format!("invalid dimensions {}x{}", width, height),
            ));
        }

        if let Some(previous) = previous {
            if width > previous.width || height > previous.height {
                return Err(TexError::malformed(
                    ParseStage::MipRecord(index),
                    format!(
                        "{}x{} is larger than the previous level {}x{}",
                        width, height, previous.width, previous.height
                    ),
                ));
            }
        }

        reader.set_stage(ParseStage::MipData(index));
        let data = reader.read_bytes(data_size)?;

        Ok(MipLevel {
            width,
            height,
            data,
        })
    }
}
