//! Block-compressed pixel format decoders
//!
//! Block decoding is delegated to `texture2ddecoder`. DXT1, DXT3 and DXT5
//! share the same 8-byte colour block: two RGB565 endpoints followed by
//! sixteen 2-bit palette indices, pixel 0 in the lowest bits. DXT3 and DXT5
//! prefix it with an 8-byte alpha block.
//!
//! Two colour block rules are enforced around the crate call: a DXT1 block
//! with `c0 <= c1` maps index 3 to transparent black, and DXT3/DXT5 colour
//! blocks always use the 4-colour palette.

use super::Decoder;
use crate::texture::formats::PixelFormat;
use klei_tex_core::{BLOCK_DIMENSION, ParseStage, RGBA_BYTES_PER_PIXEL, Result, TexError};
use std::fmt::Display;

const BLOCK: usize = BLOCK_DIMENSION as usize;
const COLOUR_BLOCK_SIZE: usize = 8;
const ALPHA_BLOCK_SIZE: usize = 8;

/// Decoder for DXT block formats
pub struct CompressedDecoder;

impl CompressedDecoder {
    /// Create a new compressed decoder
    pub fn new() -> Self {
        Self
    }

    /// Decode DXT1 format
    fn decode_dxt1(&self, data: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
        let data = block_data(data, width, height, PixelFormat::DXT1)?;
        let mut output = vec![0u32; width as usize * height as usize];

        texture2ddecoder::decode_bc1(data, width as usize, height as usize, &mut output)
            .map_err(|e| block_error(PixelFormat::DXT1, e))?;

        let mut rgba = unpack_pixels(&output);
        apply_punch_through(data, width, height, &mut rgba);
        Ok(rgba)
    }

    /// Decode DXT3 format
    fn decode_dxt3(&self, data: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
        let blocks = four_colour_blocks(block_data(data, width, height, PixelFormat::DXT3)?);
        let mut output = vec![0u32; width as usize * height as usize];

        texture2ddecoder::decode_bc2(&blocks, width as usize, height as usize, &mut output)
            .map_err(|e| block_error(PixelFormat::DXT3, e))?;

        Ok(unpack_pixels(&output))
    }

    /// Decode DXT5 format
    fn decode_dxt5(&self, data: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
        let blocks = four_colour_blocks(block_data(data, width, height, PixelFormat::DXT5)?);
        let mut output = vec![0u32; width as usize * height as usize];

        texture2ddecoder::decode_bc3(&blocks, width as usize, height as usize, &mut output)
            .map_err(|e| block_error(PixelFormat::DXT5, e))?;

        Ok(unpack_pixels(&output))
    }
}

impl Decoder for CompressedDecoder {
    fn decode(&self, data: &[u8], width: u32, height: u32, format: PixelFormat) -> Result<Vec<u8>> {
        match format {
            PixelFormat::DXT1 => self.decode_dxt1(data, width, height),
            PixelFormat::DXT3 => self.decode_dxt3(data, width, height),
            PixelFormat::DXT5 => self.decode_dxt5(data, width, height),
            other => Err(TexError::unsupported_format(other.raw())),
        }
    }

    fn can_decode(&self, format: PixelFormat) -> bool {
        format.is_compressed()
    }

    fn supported_formats(&self) -> Vec<PixelFormat> {
        vec![PixelFormat::DXT1, PixelFormat::DXT3, PixelFormat::DXT5]
    }
}

impl Default for CompressedDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// The exact run of blocks covering a `width x height` image
fn block_data(data: &[u8], width: u32, height: u32, format: PixelFormat) -> Result<&[u8]> {
    format
        .calculate_data_size(width, height)
        .and_then(|len| data.get(..len))
        .ok_or_else(|| {
            TexError::malformed(
                ParseStage::MipData(0),
                format!(
                    "insufficient block data for {} {}x{}: got {}",
                    format,
                    width,
                    height,
                    data.len()
                ),
            )
        })
}

fn block_error(format: PixelFormat, error: impl Display) -> TexError {
    TexError::malformed(
        ParseStage::MipData(0),
        format!("{} decoding failed: {}", format, error),
    )
}

/// `texture2ddecoder` packs every pixel as a little-endian BGRA word
fn unpack_pixels(output: &[u32]) -> Vec<u8> {
    output
        .iter()
        .flat_map(|&pixel| {
            let [b, g, r, a] = pixel.to_le_bytes();
            [r, g, b, a]
        })
        .collect()
}

/// Endpoints and packed indices of an 8-byte colour block
fn colour_fields(block: &[u8]) -> (u16, u16, u32) {
    (
        u16::from_le_bytes([block[0], block[1]]),
        u16::from_le_bytes([block[2], block[3]]),
        u32::from_le_bytes([block[4], block[5], block[6], block[7]]),
    )
}

/// Clear every index-3 pixel of the 3-colour DXT1 blocks to transparent black
fn apply_punch_through(data: &[u8], width: u32, height: u32, rgba: &mut [u8]) {
    let width = width as usize;
    let height = height as usize;
    let blocks_x = width.div_ceil(BLOCK).max(1);

    for (index, block) in data.chunks_exact(COLOUR_BLOCK_SIZE).enumerate() {
        let (c0, c1, indices) = colour_fields(block);
        if c0 > c1 {
            continue;
        }

        let origin_x = (index % blocks_x) * BLOCK;
        let origin_y = (index / blocks_x) * BLOCK;
        for i in 0..BLOCK * BLOCK {
            if (indices >> (2 * i)) & 0x03 != 3 {
                continue;
            }
            let x = origin_x + i % BLOCK;
            let y = origin_y + i / BLOCK;
            if x < width && y < height {
                let offset = (y * width + x) * RGBA_BYTES_PER_PIXEL;
                rgba[offset..offset + RGBA_BYTES_PER_PIXEL].fill(0);
            }
        }
    }
}

/// Copy of DXT3/DXT5 `data` whose colour blocks all have `c0 > c1`.
///
/// Swapping the endpoints of a `c0 < c1` block swaps palette entries 0/1
/// and 2/3, so every index gets its low bit flipped. Equal endpoints give a
/// single-colour palette, which index 0 reproduces.
fn four_colour_blocks(data: &[u8]) -> Vec<u8> {
    let mut blocks = data.to_vec();

    for block in blocks.chunks_exact_mut(ALPHA_BLOCK_SIZE + COLOUR_BLOCK_SIZE) {
        let colour = &mut block[ALPHA_BLOCK_SIZE..];
        let (c0, c1, indices) = colour_fields(colour);
        let indices = if c0 < c1 {
            colour[0..2].copy_from_slice(&c1.to_le_bytes());
            colour[2..4].copy_from_slice(&c0.to_le_bytes());
            indices ^ 0x5555_5555
        } else if c0 == c1 {
            0
        } else {
            continue;
        };
        colour[4..8].copy_from_slice(&indices.to_le_bytes());
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colour_block(c0: u16, c1: u16, indices: u32) -> [u8; 8] {
        let mut block = [0u8; 8];
        block[0..2].copy_from_slice(&c0.to_le_bytes());
        block[2..4].copy_from_slice(&c1.to_le_bytes());
        block[4..8].copy_from_slice(&indices.to_le_bytes());
        block
    }

    /// DXT5 alpha half where pixel i selects ramp index i % 8
    fn alpha_block(a0: u8, a1: u8) -> [u8; 8] {
        let mut bits = 0u64;
        for i in 0..16u64 {
            bits |= (i % 8) << (3 * i);
        }
        let mut block = [0u8; 8];
        block[0] = a0;
        block[1] = a1;
        block[2..8].copy_from_slice(&bits.to_le_bytes()[..6]);
        block
    }

    fn decode(data: &[u8], width: u32, height: u32, format: PixelFormat) -> Vec<[u8; 4]> {
        CompressedDecoder::new()
            .decode(data, width, height, format)
            .unwrap()
            .chunks_exact(4)
            .map(|px| [px[0], px[1], px[2], px[3]])
            .collect()
    }

    /// The eight DXT5 alpha palette entries for a pair of endpoints
    fn decoded_ramp(a0: u8, a1: u8) -> [u8; 8] {
        let mut block = [0u8; 16];
        block[..8].copy_from_slice(&alpha_block(a0, a1));
        block[8..].copy_from_slice(&colour_block(0xFFFF, 0xFFFF, 0));
        let pixels = decode(&block, 4, 4, PixelFormat::DXT5);

        let mut ramp = [0u8; 8];
        for (i, entry) in ramp.iter_mut().enumerate() {
            *entry = pixels[i][3];
        }
        ramp
    }

    #[test]
    fn test_565_endpoints_expand_by_bit_replication() {
        for (colour, expected) in [
            (0xFFFFu16, [255, 255, 255, 255]),
            (0x0000, [0, 0, 0, 255]),
            (0xF800, [255, 0, 0, 255]),
            (0x07E0, [0, 255, 0, 255]),
            (0x001F, [0, 0, 255, 255]),
            (0x8410, [132, 130, 132, 255]),
        ] {
            let block = colour_block(colour, colour, 0);
            let pixels = decode(&block, 4, 4, PixelFormat::DXT1);
            assert!(pixels.iter().all(|&px| px == expected), "{:#06x}", colour);
        }
    }

    #[test]
    fn test_dxt1_four_colour_block() {
        // white > black selects the opaque 4-colour mode; index i for pixel i % 4
        let block = colour_block(0xFFFF, 0x0000, 0xE4E4_E4E4);
        let pixels = decode(&block, 4, 4, PixelFormat::DXT1);

        assert_eq!(pixels[0], [255, 255, 255, 255]);
        assert_eq!(pixels[1], [0, 0, 0, 255]);
        assert_eq!(pixels[2], [170, 170, 170, 255]);
        assert_eq!(pixels[3], [85, 85, 85, 255]);
        assert_eq!(pixels[15], [85, 85, 85, 255]);
    }

    #[test]
    fn test_dxt1_three_colour_block_has_transparency() {
        let block = colour_block(0x0000, 0xFFFF, 0xE4E4_E4E4);
        let pixels = decode(&block, 4, 4, PixelFormat::DXT1);

        assert_eq!(pixels[0], [0, 0, 0, 255]);
        assert_eq!(pixels[1], [255, 255, 255, 255]);
        assert_eq!(pixels[2], [127, 127, 127, 255]);
        assert_eq!(pixels[3], [0, 0, 0, 0]);
    }

    #[test]
    fn test_dxt1_degenerate_block() {
        // Equal endpoints: indices 0-2 all resolve to the endpoint colour
        let colour = 0x5AEB;
        let expected = decode(&colour_block(colour, colour, 0), 4, 4, PixelFormat::DXT1)[0];
        assert_eq!(expected[3], 255);
        for indices in [0x5555_5555, 0xAAAA_AAAA, 0x9A46_2519 & 0xAAAA_AAAA] {
            let block = colour_block(colour, colour, indices);
            for pixel in decode(&block, 4, 4, PixelFormat::DXT1) {
                assert_eq!(pixel, expected);
            }
        }
    }

    #[test]
    fn test_dxt3_explicit_alpha() {
        let mut block = [0u8; 16];
        for (i, byte) in block.iter_mut().take(8).enumerate() {
            // pixel 2i gets i, pixel 2i+1 gets 15 - i
            *byte = (i as u8) | (((15 - i) as u8) << 4);
        }
        block[8..].copy_from_slice(&colour_block(0xFFFF, 0xFFFF, 0));
        let pixels = decode(&block, 4, 4, PixelFormat::DXT3);

        assert_eq!(pixels[0], [255, 255, 255, 0x00]);
        assert_eq!(pixels[1], [255, 255, 255, 0xFF]);
        assert_eq!(pixels[2], [255, 255, 255, 0x11]);
        assert_eq!(pixels[14], [255, 255, 255, 0x77]);
        assert_eq!(pixels[15], [255, 255, 255, 0x88]);
    }

    #[test]
    fn test_dxt3_never_uses_transparent_colour_mode() {
        let mut block = [0xFFu8; 16];
        block[8..].copy_from_slice(&colour_block(0x0000, 0xFFFF, 0xE4E4_E4E4));
        let pixels = decode(&block, 4, 4, PixelFormat::DXT3);

        assert_eq!(pixels[0], [0, 0, 0, 255]);
        assert_eq!(pixels[1], [255, 255, 255, 255]);
        // 4-colour mode: thirds of the way between c0 and c1
        assert_eq!(pixels[2], [85, 85, 85, 255]);
        assert_eq!(pixels[3], [170, 170, 170, 255]);
    }

    #[test]
    fn test_dxt5_never_uses_transparent_colour_mode() {
        let mut block = [0u8; 16];
        block[0] = 255;
        block[1] = 255;
        block[8..].copy_from_slice(&colour_block(0x0000, 0xFFFF, 0xE4E4_E4E4));
        let pixels = decode(&block, 4, 4, PixelFormat::DXT5);

        assert_eq!(pixels[0], [0, 0, 0, 255]);
        assert_eq!(pixels[1], [255, 255, 255, 255]);
        assert_eq!(pixels[2], [85, 85, 85, 255]);
        assert_eq!(pixels[3], [170, 170, 170, 255]);
        assert_eq!(pixels[15], [170, 170, 170, 255]);
    }

    #[test]
    fn test_dxt5_equal_endpoints_are_single_colour() {
        let mut block = [0u8; 16];
        block[0] = 255;
        block[1] = 255;
        block[8..].copy_from_slice(&colour_block(0xF800, 0xF800, 0xFFFF_FFFF));
        for pixel in decode(&block, 4, 4, PixelFormat::DXT5) {
            assert_eq!(pixel, [255, 0, 0, 255]);
        }
    }

    #[test]
    fn test_alpha_ramp_eight_step() {
        assert_eq!(decoded_ramp(255, 0), [255, 0, 218, 182, 145, 109, 72, 36]);
    }

    #[test]
    fn test_alpha_ramp_six_step() {
        assert_eq!(decoded_ramp(0, 255), [0, 255, 51, 102, 153, 204, 0, 255]);
    }

    #[test]
    fn test_alpha_ramp_monotonic() {
        for (a0, a1) in [(200u8, 13u8), (13, 200), (90, 91), (255, 0), (7, 7)] {
            let ramp = decoded_ramp(a0, a1);
            let steps: &[usize] = if a0 > a1 {
                &[0, 2, 3, 4, 5, 6, 7, 1]
            } else {
                &[0, 2, 3, 4, 5, 1]
            };
            let values: Vec<u8> = steps.iter().map(|&i| ramp[i]).collect();
            let (lo, hi) = (a0.min(a1), a0.max(a1));
            for pair in values.windows(2) {
                if a0 > a1 {
                    assert!(pair[0] >= pair[1], "{:?} for ({}, {})", values, a0, a1);
                } else {
                    assert!(pair[0] <= pair[1], "{:?} for ({}, {})", values, a0, a1);
                }
            }
            assert!(values.iter().all(|&v| v >= lo && v <= hi));
        }
    }

    #[test]
    fn test_dxt5_six_step_block() {
        // a0 <= a1 with a c0 <= c1 colour half: literal 0 and 255 at indices 6 and 7
        let mut block = [0u8; 16];
        block[..8].copy_from_slice(&alpha_block(40, 240));
        block[8..].copy_from_slice(&colour_block(0x001F, 0xF800, 0));
        let pixels = decode(&block, 4, 4, PixelFormat::DXT5);

        let expected = [40, 240, 80, 120, 160, 200, 0, 255];
        for (i, pixel) in pixels.iter().enumerate() {
            assert_eq!(*pixel, [0, 0, 255, expected[i % 8]], "pixel {}", i);
        }
    }

    #[test]
    fn test_block_placement_row_major() {
        // 8x4 image: left block red, right block blue
        let mut data = Vec::new();
        data.extend_from_slice(&colour_block(0xF800, 0xF800, 0));
        data.extend_from_slice(&colour_block(0x001F, 0x001F, 0));
        let pixels = decode(&data, 8, 4, PixelFormat::DXT1);

        for y in 0..4 {
            assert_eq!(pixels[y * 8 + 3], [255, 0, 0, 255]);
            assert_eq!(pixels[y * 8 + 4], [0, 0, 255, 255]);
        }
    }

    #[test]
    fn test_partial_blocks_are_clipped() {
        // 5x3 image needs a 2x1 block grid; index 3 of the 3-colour second
        // block lands on the last column only
        let mut data = Vec::new();
        data.extend_from_slice(&colour_block(0xF800, 0xF800, 0));
        data.extend_from_slice(&colour_block(0x07E0, 0x07E0, 0x0303_0303));
        let pixels = decode(&data, 5, 3, PixelFormat::DXT1);

        assert_eq!(pixels.len(), 5 * 3);
        for y in 0..3 {
            assert_eq!(pixels[y * 5 + 3], [255, 0, 0, 255]);
            assert_eq!(pixels[y * 5 + 4], [0, 0, 0, 0]);
        }
    }

    #[test]
    fn test_tiny_mip_uses_one_block() {
        let block = colour_block(0x001F, 0x001F, 0);
        let rgba = CompressedDecoder::new()
            .decode(&block, 1, 1, PixelFormat::DXT1)
            .unwrap();
        assert_eq!(rgba, vec![0, 0, 255, 255]);
    }

    #[test]
    fn test_short_block_data_is_malformed() {
        let err = CompressedDecoder::new()
            .decode(&[0u8; 8], 8, 8, PixelFormat::DXT1)
            .unwrap_err();
        assert!(matches!(err, TexError::MalformedContainer { .. }));
    }

    #[test]
    fn test_four_colour_rewrite() {
        let mut data = [0xAAu8; 16];
        data[8..].copy_from_slice(&colour_block(0x0000, 0xFFFF, 0xE4E4_E4E4));
        let blocks = four_colour_blocks(&data);

        assert_eq!(&blocks[..8], &data[..8]);
        assert_eq!(colour_fields(&blocks[8..]), (0xFFFF, 0x0000, 0xB1B1_B1B1));
    }
}
