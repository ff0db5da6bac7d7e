//! Classification of a parsed pixel format into a decodable profile.

use crate::color::AlphaMode;
use crate::error::{DecodeError, DecodeResult};
use crate::header::{PixelFormat, PixelFormatFlags};

/// One channel of an uncompressed 32-bit pixel: the shift down to bit 0
/// and the mask normalized to the value range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Channel {
    shift: u32,
    mask: u32,
}

impl Channel {
    /// Derives the shift by counting the trailing zero bits of the
    /// original mask, then shifts the mask down to the value range. A zero
    /// mask yields a channel that always extracts 0.
    fn from_mask(mask: u32) -> Self {
        if mask == 0 {
            return Self { shift: 0, mask: 0 };
        }
        let shift = mask.trailing_zeros();
        Self {
            shift,
            mask: mask >> shift,
        }
    }

    /// Extracts this channel from a packed little-endian pixel.
    #[inline(always)]
    pub(crate) fn extract(self, pixel: u32) -> u8 {
        ((pixel >> self.shift) & self.mask) as u8
    }
}

/// Per-channel extraction recipe for the uncompressed path.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ChannelMasks {
    pub(crate) r: Channel,
    pub(crate) g: Channel,
    pub(crate) b: Channel,
    pub(crate) a: Channel,
}

/// The format profile driving allocation and block dispatch. Derived once
/// from the parsed header.
#[derive(Debug, Clone, Copy)]
pub(crate) enum SupportedFormat {
    /// DXT1: 8-byte blocks, 1-bit punch-through alpha.
    Bc1,
    /// DXT3: 16-byte blocks, explicit 4-bit alpha.
    Bc2,
    /// DXT5: 16-byte blocks, interpolated 3-bit alpha.
    Bc3,
    /// Uncompressed 32-bit RGBA behind arbitrary channel masks.
    Rgba32(ChannelMasks),
}

impl SupportedFormat {
    pub(crate) fn alpha_mode(self) -> AlphaMode {
        match self {
            // BC1's punch-through entry decodes to transparent black
            SupportedFormat::Bc1 => AlphaMode::Premultiplied,
            _ => AlphaMode::Straight,
        }
    }
}

/// Picks the decode path from the pixel-format flags, or rejects the file.
pub(crate) fn classify(pf: &PixelFormat) -> DecodeResult<SupportedFormat> {
    if pf.flags.has(PixelFormatFlags::FOURCC) {
        return match &pf.fourcc {
            b"DXT1" => Ok(SupportedFormat::Bc1),
            b"DXT3" => Ok(SupportedFormat::Bc2),
            b"DXT5" => Ok(SupportedFormat::Bc3),
            other => Err(DecodeError::UnsupportedFourCc(*other)),
        };
    }

    if pf.flags.has(PixelFormatFlags::RGB) {
        if pf.rgb_bit_count != 32 || !pf.flags.has(PixelFormatFlags::ALPHA_PIXELS) {
            return Err(DecodeError::UnrecognizedFormat);
        }
        return Ok(SupportedFormat::Rgba32(ChannelMasks {
            r: Channel::from_mask(pf.r_bit_mask),
            g: Channel::from_mask(pf.g_bit_mask),
            b: Channel::from_mask(pf.b_bit_mask),
            a: Channel::from_mask(pf.a_bit_mask),
        }));
    }

    Err(DecodeError::UnrecognizedFormat)
}
