//! Decoding of DDS images.
//!
//! DDS (DirectDraw Surface) is a container format for storing DXT (S3TC)
//! compressed images. This crate parses the legacy DDS header and decodes
//! DXT1/DXT3/DXT5 block-compressed surfaces, as well as uncompressed
//! 32-bit RGBA, into 8-bit-per-channel RGBA rasters.
//!
//! The two entry points mirror a host image framework's split between
//! sniffing a stream and decoding it: [`decode_config`] reads only the
//! header and reports dimensions plus the alpha interpretation of the
//! output; [`decode`] produces the full raster. A host registry can key
//! the format on the [`MAGIC`] prefix (see [`is_dds`]).
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! let file = BufReader::new(File::open("texture.dds")?);
//! let raster = dds::decode(file)?;
//! for row in raster.rows() {
//!     // each row is width * 4 bytes of RGBA
//! }
//! # Ok::<(), dds::DecodeError>(())
//! ```
//!
//! # Related Links
//! * <https://docs.microsoft.com/en-us/windows/win32/direct3ddds/dx-graphics-dds-pguide> - Description of the DDS format.

#![warn(missing_docs)]
#![warn(unused_qualifications)]
#![deny(missing_copy_implementations)]
#![forbid(unsafe_code)]

mod bc;
mod color;
mod convert;
mod decoder;
mod error;
mod format;
mod header;

pub use crate::bc::{decode_bc1, decode_bc1a, decode_bc2, decode_bc3};
pub use crate::color::AlphaMode;
pub use crate::convert::Rgb565;
pub use crate::decoder::{decode, decode_config, DdsDecoder, DecodeConfig, Raster};
pub use crate::error::{DecodeError, DecodeResult};

/// The magic prefix of every DDS stream.
pub const MAGIC: &[u8; 4] = b"DDS ";

/// Returns true if `buf` begins with the DDS signature. Useful for
/// magic-prefix format sniffing in a host image registry.
pub fn is_dds(buf: &[u8]) -> bool {
    buf.starts_with(MAGIC)
}
