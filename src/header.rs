//! Parsing of the legacy DDS header and its embedded pixel format.
//!
//! <https://learn.microsoft.com/en-us/windows/win32/direct3ddds/dds-header>

use std::io::Read;

use byteorder_lite::{LittleEndian, ReadBytesExt};

use crate::error::{DecodeError, DecodeResult};

/// Fixed size of the header body, bytes.
const HEADER_SIZE: u32 = 124;
/// Fixed size of the embedded pixel-format structure, bytes.
const PIXEL_FORMAT_SIZE: u32 = 32;

/// The DDS_HEADER structure: dimensions, format and mipmap count of a
/// texture. All multibyte fields are little-endian.
#[derive(Debug)]
pub(crate) struct Header {
    pub(crate) _flags: u32,
    pub(crate) height: u32,
    pub(crate) width: u32,
    pub(crate) _pitch_or_linear_size: u32,
    pub(crate) _depth: u32,
    pub(crate) _mipmap_count: u32,
    pub(crate) pixel_format: PixelFormat,
    pub(crate) _caps: u32,
    pub(crate) _caps2: u32,
}

impl Header {
    pub(crate) fn from_reader(r: &mut dyn Read) -> DecodeResult<Self> {
        let size = r.read_u32::<LittleEndian>()?;
        if size != HEADER_SIZE {
            return Err(DecodeError::InvalidHeaderSize(size));
        }

        let flags = HeaderFlags::from_u32(r.read_u32::<LittleEndian>()?)?.bits();
        let height = r.read_u32::<LittleEndian>()?;
        let width = r.read_u32::<LittleEndian>()?;
        let pitch_or_linear_size = r.read_u32::<LittleEndian>()?;
        let depth = r.read_u32::<LittleEndian>()?;
        let mipmap_count = r.read_u32::<LittleEndian>()?;
        // Skip `dwReserved1`
        {
            let mut skipped = [0; 4 * 11];
            r.read_exact(&mut skipped)?;
        }
        let pixel_format = PixelFormat::from_reader(r)?;
        let caps = r.read_u32::<LittleEndian>()?;
        let caps2 = r.read_u32::<LittleEndian>()?;
        // Skip `dwCaps3`, `dwCaps4`, `dwReserved2` (unused)
        {
            let mut skipped = [0; 4 + 4 + 4];
            r.read_exact(&mut skipped)?;
        }

        Ok(Self {
            _flags: flags,
            height,
            width,
            _pitch_or_linear_size: pitch_or_linear_size,
            _depth: depth,
            _mipmap_count: mipmap_count,
            pixel_format,
            _caps: caps,
            _caps2: caps2,
        })
    }
}

/// The header flag word. Only the four required bits are validated; any
/// other bits, known or not, pass through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HeaderFlags(u32);

impl HeaderFlags {
    #![allow(dead_code)]

    /// Required in every .dds file.
    pub(crate) const CAPS: u32 = 0x1;
    /// Required in every .dds file.
    pub(crate) const HEIGHT: u32 = 0x2;
    /// Required in every .dds file.
    pub(crate) const WIDTH: u32 = 0x4;
    /// Required when pitch is provided for an uncompressed texture.
    pub(crate) const PITCH: u32 = 0x8;
    /// Required in every .dds file.
    pub(crate) const PIXEL_FORMAT: u32 = 0x1000;
    /// Required in a mipmapped texture.
    pub(crate) const MIPMAP_COUNT: u32 = 0x20000;
    /// Required when pitch is provided for a compressed texture.
    pub(crate) const LINEAR_SIZE: u32 = 0x80000;
    /// Required in a depth texture.
    pub(crate) const DEPTH: u32 = 0x800000;

    pub(crate) const REQUIRED: u32 =
        Self::CAPS | Self::HEIGHT | Self::WIDTH | Self::PIXEL_FORMAT;

    fn from_u32(flags: u32) -> DecodeResult<Self> {
        let missing = Self::REQUIRED & !flags;
        if missing != 0 {
            return Err(DecodeError::MissingRequiredFlags(missing));
        }
        Ok(Self(flags))
    }

    /// The raw flag word.
    pub(crate) fn bits(self) -> u32 {
        self.0
    }
}

/// The DDS_PIXELFORMAT structure.
#[derive(Debug)]
pub(crate) struct PixelFormat {
    pub(crate) flags: PixelFormatFlags,
    pub(crate) fourcc: [u8; 4],
    pub(crate) rgb_bit_count: u32,
    pub(crate) r_bit_mask: u32,
    pub(crate) g_bit_mask: u32,
    pub(crate) b_bit_mask: u32,
    pub(crate) a_bit_mask: u32,
}

impl PixelFormat {
    fn from_reader(r: &mut dyn Read) -> DecodeResult<Self> {
        let size = r.read_u32::<LittleEndian>()?;
        if size != PIXEL_FORMAT_SIZE {
            return Err(DecodeError::InvalidPixelFormatSize(size));
        }

        Ok(Self {
            flags: PixelFormatFlags(r.read_u32::<LittleEndian>()?),
            fourcc: {
                let mut v = [0; 4];
                r.read_exact(&mut v)?;
                v
            },
            rgb_bit_count: r.read_u32::<LittleEndian>()?,
            r_bit_mask: r.read_u32::<LittleEndian>()?,
            g_bit_mask: r.read_u32::<LittleEndian>()?,
            b_bit_mask: r.read_u32::<LittleEndian>()?,
            a_bit_mask: r.read_u32::<LittleEndian>()?,
        })
    }
}

/// The pixel-format flag word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PixelFormatFlags(pub(crate) u32);

impl PixelFormatFlags {
    #![allow(dead_code)]

    /// Texture contains alpha data; the alpha bit mask contains valid data.
    pub(crate) const ALPHA_PIXELS: u32 = 0x1;
    /// Older files: alpha-channel-only uncompressed data.
    pub(crate) const ALPHA: u32 = 0x2;
    /// Texture contains compressed RGB data; the fourCC identifies it.
    pub(crate) const FOURCC: u32 = 0x4;
    /// Texture contains uncompressed RGB data; bit count and color masks
    /// contain valid data.
    pub(crate) const RGB: u32 = 0x40;
    /// Older files: uncompressed YUV data in the color masks.
    pub(crate) const YUV: u32 = 0x200;
    /// Older files: single-channel uncompressed data in the red mask.
    pub(crate) const LUMINANCE: u32 = 0x20000;

    /// Returns true if all of `bits` are set.
    pub(crate) fn has(self, bits: u32) -> bool {
        self.0 & bits == bits
    }
}
