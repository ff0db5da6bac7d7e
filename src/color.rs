//! Interpretation of the alpha channel in decoded output.

/// How the RGB channels of a decoded raster relate to its alpha channel.
///
/// DXT1 streams can legitimately decode to transparent black, so their
/// output is reported as premultiplied; DXT3/DXT5 and uncompressed RGBA
/// carry their color unscaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlphaMode {
    /// RGB channels are independent of alpha.
    Straight,
    /// RGB channels have been scaled by alpha.
    Premultiplied,
}

impl AlphaMode {
    /// Returns true for [`AlphaMode::Premultiplied`].
    pub fn is_premultiplied(self) -> bool {
        self == AlphaMode::Premultiplied
    }
}
