use std::os::raw::{c_char, c_int};

use libz_sys::z_stream;

use super::{Direction, Stream, StreamConfig, DEFAULT_MEM_LEVEL, DEFAULT_STRATEGY, DEFLATE_METHOD};

/// Compression through the codec's deflate entry points
#[derive(Debug)]
pub enum Deflate {}

/// A stream that compresses everything written to it
pub type Compressor = Stream<Deflate>;

impl Direction for Deflate {
    const NAME: &'static str = "deflate";

    unsafe fn init(strm: &mut z_stream, config: &StreamConfig, version: *const c_char, stream_size: c_int) -> c_int {
        unsafe { libz_sys::deflateInit_(strm, config.level, version, stream_size) }
    }

    unsafe fn init_extended(strm: &mut z_stream, config: &StreamConfig, version: *const c_char, stream_size: c_int) -> c_int {
        unsafe {
            libz_sys::deflateInit2_(
                strm,
                config.level,
                DEFLATE_METHOD,
                config.window_bits,
                DEFAULT_MEM_LEVEL,
                DEFAULT_STRATEGY,
                version,
                stream_size
            )
        }
    }

    unsafe fn process(strm: &mut z_stream, flush: c_int) -> c_int {
        unsafe { libz_sys::deflate(strm, flush) }
    }

    unsafe fn end(strm: &mut z_stream) -> c_int {
        unsafe { libz_sys::deflateEnd(strm) }
    }
}

impl Default for Stream<Deflate> {
    /// Identical to [Compressor::new]
    fn default() -> Self {
        Self::new()
    }
}

impl Stream<Deflate> {
    /// Creates a new Compressor with the codec's default level and zlib framing
    pub fn new() -> Self {
        Self::with_config(StreamConfig::default())
    }

    /// Creates a new Compressor with the specified level (0-9, or -1 for the default)
    pub fn with_level(level: i32) -> Self {
        Self::with_config(StreamConfig { level, ..Default::default() })
    }

    /// Creates a new Compressor with the specified window bits.
    /// See [crate::framing::Framing::from_window_bits]
    pub fn with_window_bits(window_bits: i32) -> Self {
        Self::with_config(StreamConfig { window_bits, ..Default::default() })
    }

    pub fn with_level_and_window_bits(level: i32, window_bits: i32) -> Self {
        Self::with_config(StreamConfig { level, window_bits })
    }
}
