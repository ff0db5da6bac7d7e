//! The DDS decoder front door and the surface assembly loops.

use std::io::{self, Read};

use crate::bc;
use crate::color::AlphaMode;
use crate::error::{DecodeError, DecodeResult};
use crate::format::{classify, ChannelMasks, SupportedFormat};
use crate::header::Header;
use crate::MAGIC;

/// Largest accepted extent on either axis. Keeps all later offset
/// arithmetic comfortably inside `usize`.
const MAX_SIZE: u32 = 1 << 24;

fn check_dimension_overflow(width: u32, height: u32, bytes_per_pixel: u8) -> bool {
    u64::from(width) * u64::from(height) > u64::MAX / u64::from(bytes_per_pixel)
}

/// Reads payload bytes, mapping a short read to [`DecodeError::TruncatedPayload`].
fn read_payload(r: &mut impl Read, buf: &mut [u8]) -> DecodeResult<()> {
    r.read_exact(buf).map_err(|err| match err.kind() {
        io::ErrorKind::UnexpectedEof => DecodeError::TruncatedPayload,
        _ => DecodeError::Io(err),
    })
}

/// Header-only description of a DDS stream, as reported by
/// [`decode_config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeConfig {
    /// Logical width in pixels.
    pub width: u32,
    /// Logical height in pixels.
    pub height: u32,
    /// How downstream compositing should interpret the decoded alpha.
    pub alpha_mode: AlphaMode,
}

/// A decoded 8-bit-per-channel RGBA surface.
///
/// Compressed input decodes in whole 4x4 blocks, so the backing storage may
/// be padded to the next block boundary; consumers should only observe the
/// `width() x height()` subregion, most conveniently through [`Raster::rows`].
#[derive(Debug, Clone)]
pub struct Raster {
    pixels: Vec<u8>,
    stride: usize,
    width: u32,
    height: u32,
    alpha_mode: AlphaMode,
}

impl Raster {
    /// Logical width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Logical height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per stored row. At least `width() * 4`; more when the surface
    /// was padded to a block boundary.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// How downstream compositing should interpret the alpha channel.
    pub fn alpha_mode(&self) -> AlphaMode {
        self.alpha_mode
    }

    /// The backing storage, including any block padding. Row `y` starts at
    /// byte `y * stride()`.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consumes the raster, handing out the backing storage.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Iterates the logical rows, each `width() * 4` bytes of RGBA.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        let row_bytes = self.width as usize * 4;
        self.pixels
            .chunks(self.stride.max(1))
            .take(self.height as usize)
            .map(move |row| &row[..row_bytes])
    }

    /// The RGBA value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the logical extent.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height);
        let at = y as usize * self.stride + x as usize * 4;
        self.pixels[at..at + 4].try_into().unwrap()
    }
}

/// The representation of a DDS decoder.
///
/// Constructing it parses and validates the header; [`DdsDecoder::read_raster`]
/// then consumes the payload. The decode is strictly sequential and
/// terminal on the first error.
pub struct DdsDecoder<R> {
    inner: R,
    width: u32,
    height: u32,
    format: SupportedFormat,
}

impl<R: Read> DdsDecoder<R> {
    /// Creates a new decoder that decodes from the stream `r`, consuming
    /// the magic and the 124-byte header.
    pub fn new(mut r: R) -> DecodeResult<Self> {
        let mut magic = [0; 4];
        r.read_exact(&mut magic)?;
        if magic != *MAGIC {
            return Err(DecodeError::InvalidMagic(magic));
        }

        let header = Header::from_reader(&mut r)?;
        let format = classify(&header.pixel_format)?;

        if header.width > MAX_SIZE
            || header.height > MAX_SIZE
            || check_dimension_overflow(header.width, header.height, 4)
        {
            return Err(DecodeError::DimensionsTooLarge {
                width: header.width,
                height: header.height,
            });
        }

        Ok(Self {
            inner: r,
            width: header.width,
            height: header.height,
            format,
        })
    }

    /// Logical `(width, height)` of the image.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// How downstream compositing should interpret the decoded alpha.
    pub fn alpha_mode(&self) -> AlphaMode {
        self.format.alpha_mode()
    }

    /// The header-only description of the stream.
    pub fn config(&self) -> DecodeConfig {
        DecodeConfig {
            width: self.width,
            height: self.height,
            alpha_mode: self.format.alpha_mode(),
        }
    }

    /// Decodes the top-level surface into an owned raster.
    pub fn read_raster(mut self) -> DecodeResult<Raster> {
        match self.format {
            SupportedFormat::Bc1 => self.read_blocks(8, bc::decode_bc1a),
            SupportedFormat::Bc2 => self.read_blocks(16, bc::decode_bc2),
            SupportedFormat::Bc3 => self.read_blocks(16, bc::decode_bc3),
            SupportedFormat::Rgba32(masks) => self.read_rgba32(masks),
        }
    }

    /// Decodes a block-compressed payload: blocks are read row-major, one
    /// at a time, each decoding straight into its disjoint 4x4 window of
    /// the padded raster.
    fn read_blocks(
        &mut self,
        block_bytes: usize,
        decode_block: fn(&[u8], &mut [u8], usize),
    ) -> DecodeResult<Raster> {
        let blocks_w = (self.width as usize + 3) / 4;
        let blocks_h = (self.height as usize + 3) / 4;
        let stride = blocks_w * 16;
        let mut pixels = vec![0u8; stride * blocks_h * 4];

        let mut block = [0u8; 16];
        for by in 0..blocks_h {
            for bx in 0..blocks_w {
                read_payload(&mut self.inner, &mut block[..block_bytes])?;
                let dest = &mut pixels[by * 4 * stride + bx * 16..];
                decode_block(&block[..block_bytes], dest, stride);
            }
        }

        Ok(Raster {
            pixels,
            stride,
            width: self.width,
            height: self.height,
            alpha_mode: self.format.alpha_mode(),
        })
    }

    /// Decodes an uncompressed 32-bpp payload one source row at a time,
    /// unpacking each little-endian pixel through the normalized channel
    /// masks.
    fn read_rgba32(&mut self, masks: ChannelMasks) -> DecodeResult<Raster> {
        let stride = self.width as usize * 4;
        let mut pixels = vec![0u8; stride * self.height as usize];
        let mut row = vec![0u8; stride];

        for y in 0..self.height as usize {
            read_payload(&mut self.inner, &mut row)?;
            let src: &[[u8; 4]] = bytemuck::cast_slice(&row);
            let dst: &mut [[u8; 4]] =
                bytemuck::cast_slice_mut(&mut pixels[y * stride..(y + 1) * stride]);
            for (&src_px, dst_px) in src.iter().zip(dst) {
                let packed = u32::from_le_bytes(src_px);
                *dst_px = [
                    masks.r.extract(packed),
                    masks.g.extract(packed),
                    masks.b.extract(packed),
                    masks.a.extract(packed),
                ];
            }
        }

        Ok(Raster {
            pixels,
            stride,
            width: self.width,
            height: self.height,
            alpha_mode: AlphaMode::Straight,
        })
    }
}

/// Decodes a DDS stream into a raster.
pub fn decode<R: Read>(r: R) -> DecodeResult<Raster> {
    DdsDecoder::new(r)?.read_raster()
}

/// Reads only the header of a DDS stream and reports its dimensions and
/// color interpretation. The payload is never touched, so only
/// header-phase errors can occur.
pub fn decode_config<R: Read>(r: R) -> DecodeResult<DecodeConfig> {
    Ok(DdsDecoder::new(r)?.config())
}
