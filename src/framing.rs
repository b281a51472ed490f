/// The container format a window bits value selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// Bare DEFLATE data, no header or trailer (-8..=-15)
    Raw,

    /// zlib header and Adler-32 trailer (8..=15)
    Zlib,

    /// gzip header and CRC-32 trailer (24..=31)
    Gzip,

    /// zlib or gzip, detected from the header. Decompression only (40..=47)
    Auto
}

impl Framing {
    /// Classifies a window bits value the way the codec would.
    ///
    /// Returns None for values the codec rejects. zlib accepts 0 when
    /// decompressing (window size taken from the header), this is reported
    /// as [Framing::Zlib]
    pub fn from_window_bits(window_bits: i32) -> Option<Self> {
        match window_bits {
            -15..=-8 => Some(Self::Raw),
            0 | 8..=15 => Some(Self::Zlib),
            24..=31 => Some(Self::Gzip),
            40..=47 => Some(Self::Auto),

            _ => None
        }
    }
}

impl std::fmt::Display for Framing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Raw => "raw",
            Self::Zlib => "zlib",
            Self::Gzip => "gzip",
            Self::Auto => "auto"
        };
        f.write_str(name)
    }
}
