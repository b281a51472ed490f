use std::os::raw::{c_char, c_int};

use libz_sys::z_stream;

use super::{Direction, Flush, Stream, StreamConfig};

/// Decompression through the codec's inflate entry points
#[derive(Debug)]
pub enum Inflate {}

/// A stream that decompresses everything written to it
pub type Decompressor = Stream<Inflate>;

impl Direction for Inflate {
    const NAME: &'static str = "inflate";

    unsafe fn init(strm: &mut z_stream, _config: &StreamConfig, version: *const c_char, stream_size: c_int) -> c_int {
        unsafe { libz_sys::inflateInit_(strm, version, stream_size) }
    }

    unsafe fn init_extended(strm: &mut z_stream, config: &StreamConfig, version: *const c_char, stream_size: c_int) -> c_int {
        unsafe { libz_sys::inflateInit2_(strm, config.window_bits, version, stream_size) }
    }

    unsafe fn process(strm: &mut z_stream, flush: c_int) -> c_int {
        unsafe { libz_sys::inflate(strm, flush) }
    }

    unsafe fn end(strm: &mut z_stream) -> c_int {
        unsafe { libz_sys::inflateEnd(strm) }
    }

    // Finishing here would demand that the whole remaining output fits into
    // a single scratch buffer, so it is downgraded to a sync flush
    fn flush_code(flush: Flush) -> c_int {
        match flush {
            Flush::Finish => Flush::Sync.code(),
            _ => flush.code()
        }
    }
}

impl Default for Stream<Inflate> {
    /// Identical to [Decompressor::new]
    fn default() -> Self {
        Self::new()
    }
}

impl Stream<Inflate> {
    /// Creates a new Decompressor for zlib framed data
    pub fn new() -> Self {
        Self::with_config(StreamConfig::default())
    }

    /// Creates a new Decompressor with the specified window bits.
    /// See [crate::framing::Framing::from_window_bits]
    pub fn with_window_bits(window_bits: i32) -> Self {
        Self::with_config(StreamConfig { window_bits, ..Default::default() })
    }
}
