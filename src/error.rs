//! Error types reported while parsing and decoding a DDS stream.

use std::io;
use std::{error, fmt};

/// Errors that can occur during decoding and parsing of a DDS image.
///
/// Every error is terminal for the decode that produced it; no partial
/// output is handed out.
#[derive(Debug)]
pub enum DecodeError {
    /// The underlying reader failed before the expected bytes were available.
    Io(io::Error),
    /// The first four bytes of the stream were not `"DDS "`.
    InvalidMagic([u8; 4]),
    /// The header size field was not 124.
    InvalidHeaderSize(u32),
    /// The embedded pixel-format size field was not 32.
    InvalidPixelFormatSize(u32),
    /// One or more of the required header flags is absent. The payload
    /// holds exactly the missing bits.
    MissingRequiredFlags(u32),
    /// The stream is compressed with something other than DXT1/DXT3/DXT5.
    UnsupportedFourCc([u8; 4]),
    /// Neither a supported compression nor 32-bit RGBA.
    UnrecognizedFormat,
    /// The payload ended before the surface was complete.
    TruncatedPayload,
    /// The surface dimensions exceed what the decoder will allocate for.
    DimensionsTooLarge {
        /// Width in pixels, straight from the header.
        width: u32,
        /// Height in pixels, straight from the header.
        height: u32,
    },
}

/// Result of a DDS decoding operation.
pub type DecodeResult<T> = Result<T, DecodeError>;

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Io(err) => write!(f, "I/O error: {err}"),
            DecodeError::InvalidMagic(magic) => {
                write!(f, "DDS signature not found, got {magic:02X?}")
            }
            DecodeError::InvalidHeaderSize(s) => write!(f, "Invalid DDS header size: {s}"),
            DecodeError::InvalidPixelFormatSize(s) => {
                write!(f, "Invalid DDS PixelFormat size: {s}")
            }
            DecodeError::MissingRequiredFlags(bits) => {
                write!(f, "Missing required DDS header flags: {bits:#010X}")
            }
            DecodeError::UnsupportedFourCc(cc) => {
                write!(f, "Unsupported DDS FourCC {:?}", String::from_utf8_lossy(cc))
            }
            DecodeError::UnrecognizedFormat => f.write_str("Unrecognized DDS pixel format"),
            DecodeError::TruncatedPayload => {
                f.write_str("DDS payload ended before the surface was complete")
            }
            DecodeError::DimensionsTooLarge { width, height } => {
                write!(f, "Image dimensions ({width}x{height}) are too large")
            }
        }
    }
}

impl error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            DecodeError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for DecodeError {
    fn from(err: io::Error) -> Self {
        DecodeError::Io(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::error::Error;

    #[test]
    fn four_cc_rendered_as_ascii() {
        let err = DecodeError::UnsupportedFourCc(*b"DX10");
        assert_eq!(err.to_string(), "Unsupported DDS FourCC \"DX10\"");
    }

    #[test]
    fn io_source_is_exposed() {
        let err = DecodeError::from(io::Error::new(io::ErrorKind::Other, "boom"));
        assert!(err.source().is_some());
        assert!(DecodeError::TruncatedPayload.source().is_none());
    }
}
