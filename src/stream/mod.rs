use std::{marker::PhantomData, mem, os::raw::{c_char, c_int, c_uint}};

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::{framing::Framing, status::{codes, StreamError}};

use self::session::Session;

pub use libz_sys::z_stream;
pub use self::session::SCRATCH_CAPACITY;

/// Provides the compression direction and the [Compressor] type
pub mod deflate;

/// Provides the decompression direction and the [Decompressor] type
pub mod inflate;

mod session;

pub use self::deflate::{Compressor, Deflate};
pub use self::inflate::{Decompressor, Inflate};

/// Lets the codec pick its own compression level
pub const DEFAULT_LEVEL: i32 = -1;

/// Window bits selecting a 32 KiB window with zlib framing
pub const DEFAULT_WINDOW_BITS: i32 = 15;

/// The only compression method the codec defines (DEFLATE)
pub const DEFLATE_METHOD: i32 = 8;

/// Memory the compressor may spend on its internal state (1-9)
pub const DEFAULT_MEM_LEVEL: i32 = 8;

/// The codec's default strategy, tuned for general data
pub const DEFAULT_STRATEGY: i32 = 0;

// Largest slice the cursor can describe in one go
const MAX_PIECE: usize = c_uint::MAX as usize;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("stream failed: {0}")]
    Stream(#[from] StreamError),

    #[error("error within callback: {0}")]
    FromCallback(#[from] anyhow::Error)
}

/// How much output the codec should emit for a single write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flush {
    /// Let the codec buffer as much as it wants
    #[default]
    None,

    /// Emit everything so far, without aligning output on a byte boundary.
    /// This is what a flushing [Stream::write] uses
    Partial,

    /// Emit everything so far and align output on a byte boundary
    Sync,

    /// Like [Flush::Sync], and reset the compression state
    Full,

    /// Complete the stream
    Finish
}

impl Flush {
    /// The codec's numeric flush mode
    pub fn code(self) -> c_int {
        match self {
            Self::None => 0,
            Self::Partial => 1,
            Self::Sync => 2,
            Self::Full => 3,
            Self::Finish => 4
        }
    }
}

/// Session parameters. Fixed once a [Stream] is constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConfig {
    /// Compression level, ignored by decompressors
    pub level: i32,

    /// Window size and framing, see [Framing::from_window_bits]
    pub window_bits: i32
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL,
            window_bits: DEFAULT_WINDOW_BITS
        }
    }
}

impl StreamConfig {
    /// Whether the session has to be set up through the extended initializer
    pub fn has_custom_window_bits(&self) -> bool {
        self.window_bits != DEFAULT_WINDOW_BITS
    }

    /// The container format implied by the window bits
    pub fn framing(&self) -> Option<Framing> {
        Framing::from_window_bits(self.window_bits)
    }
}

/// Selects the codec entry points a [Stream] drives.
///
/// Implementors only forward to the codec. Everything else (initialization
/// bookkeeping, the drain loop, teardown) is done by [Stream]
pub trait Direction {
    /// Name used in log events
    const NAME: &'static str;

    /// Initializes `strm` with the codec's default window bits
    ///
    /// # Safety
    /// `strm` must be a fresh record that stays at the same address
    /// until [Direction::end] is called on it
    unsafe fn init(strm: &mut z_stream, config: &StreamConfig, version: *const c_char, stream_size: c_int) -> c_int;

    /// Initializes `strm` with the window bits from `config`
    ///
    /// # Safety
    /// Same as [Direction::init]
    unsafe fn init_extended(strm: &mut z_stream, config: &StreamConfig, version: *const c_char, stream_size: c_int) -> c_int;

    /// Consumes input and produces output through the cursor of `strm`
    ///
    /// # Safety
    /// `strm` must be initialized, and its input and output pointers
    /// must be valid for the lengths it advertises
    unsafe fn process(strm: &mut z_stream, flush: c_int) -> c_int;

    /// Releases the codec state of `strm`
    ///
    /// # Safety
    /// `strm` must be initialized and must not be used afterwards
    unsafe fn end(strm: &mut z_stream) -> c_int;

    /// The flush mode [Stream::write] uses for its boolean flag.
    /// A flushing write emits everything so far but keeps the stream open
    fn flush_mode(flush: bool) -> Flush {
        if flush { Flush::Partial } else { Flush::None }
    }

    /// The codec flush code for a requested [Flush]
    fn flush_code(flush: Flush) -> c_int {
        flush.code()
    }
}

/// An incremental compression or decompression stream.
///
/// The codec session is set up on the first write (or on
/// [Stream::ensure_initialized]) and released when the stream is dropped.
/// Dropping a compressor before finishing it discards whatever it buffered
pub struct Stream<D: Direction> {
    session: Session,
    config: StreamConfig,

    initialized: bool,
    failed: bool,

    direction: PhantomData<D>
}

impl<D: Direction> std::fmt::Debug for Stream<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stream")
            .field("direction", &D::NAME)
            .field("config", &self.config)
            .field("initialized", &self.initialized)
            .field("failed", &self.failed)
            .finish()
    }
}

impl<D: Direction> Stream<D> {
    /// Creates a new uninitialized stream with the specified parameters
    pub fn with_config(config: StreamConfig) -> Self {
        Self {
            session: Session::new(),
            config,

            initialized: false,
            failed: false,

            direction: PhantomData
        }
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Returns whether any operation on this stream has failed.
    /// A failed stream should be dropped
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Total amount of input bytes consumed by the codec
    pub fn total_in(&self) -> u64 {
        self.session.total_in()
    }

    /// Total amount of output bytes produced by the codec
    pub fn total_out(&self) -> u64 {
        self.session.total_out()
    }

    /// Sets up the codec session. Does nothing if it is already set up
    pub fn ensure_initialized(&mut self) -> Result<(), StreamError> {
        if self.initialized {
            return Ok(());
        }

        let version = crate::codec_version().as_ptr();
        let stream_size = mem::size_of::<z_stream>() as c_int;
        let extended = self.config.has_custom_window_bits();

        // SAFETY: the record is boxed inside the session and has not been initialized yet
        let res = unsafe {
            if extended {
                D::init_extended(self.session.raw(), &self.config, version, stream_size)
            } else {
                D::init(self.session.raw(), &self.config, version, stream_size)
            }
        };

        if res != codes::OK {
            return Err(self.fail(res));
        }

        self.initialized = true;
        debug!(
            direction = D::NAME,
            path = if extended { "extended" } else { "simple" },
            level = self.config.level,
            window_bits = self.config.window_bits,
            framing = ?self.config.framing(),
            "session initialized"
        );

        Ok(())
    }

    /// Feeds `data` to the codec and returns whatever output it produced.
    ///
    /// With `flush` set the codec emits all output it can derive from the
    /// input so far, and the stream stays open for further writes. Without
    /// it the output may well be empty. A compressed stream is only complete
    /// after a [Flush::Finish] through [Stream::write_with]
    pub fn write(&mut self, data: &[u8], flush: bool) -> Result<Vec<u8>, StreamError> {
        self.write_with(data, D::flush_mode(flush))
    }

    /// Same as [Stream::write], with an explicit [Flush] mode
    pub fn write_with(&mut self, data: &[u8], flush: Flush) -> Result<Vec<u8>, StreamError> {
        let mut result = Vec::new();
        self.drain(data, flush, |chunk: &[u8]| {
            result.extend_from_slice(chunk);
            Ok::<_, StreamError>(())
        })?;

        Ok(result)
    }

    /// Feeds `data` to the codec, passing output to the callback as soon as
    /// it is produced instead of collecting it. The callback may be fired
    /// multiple times, or not at all
    pub fn write_into(&mut self, data: &[u8], flush: Flush, mut on_output: impl FnMut(&[u8]) -> anyhow::Result<()>) -> Result<(), WriteError> {
        self.drain(data, flush, |chunk: &[u8]| {
            on_output(chunk).map_err(WriteError::FromCallback)
        })
    }

    fn drain<E, F>(&mut self, data: &[u8], flush: Flush, mut sink: F) -> Result<(), E>
    where
        E: From<StreamError>,
        F: FnMut(&[u8]) -> Result<(), E>
    {
        self.ensure_initialized()?;

        // Input longer than the cursor can describe is fed in pieces,
        // holding the flush back until the last one
        let mut remaining = data;
        let result = loop {
            let (piece, rest) = remaining.split_at(remaining.len().min(MAX_PIECE));
            let piece_flush = if rest.is_empty() { flush } else { Flush::None };

            if let Err(e) = self.drain_piece(piece, piece_flush, &mut sink) {
                break Err(e);
            }

            if rest.is_empty() {
                break Ok(());
            }
            remaining = rest;
        };

        self.session.clear_input();
        if result.is_err() {
            self.failed = true;
        }

        result
    }

    fn drain_piece<E, F>(&mut self, piece: &[u8], flush: Flush, sink: &mut F) -> Result<(), E>
    where
        E: From<StreamError>,
        F: FnMut(&[u8]) -> Result<(), E>
    {
        let flush = D::flush_code(flush);
        self.session.set_input(piece);

        let mut continuation = false;
        loop {
            self.session.reset_output();

            // SAFETY: the session is initialized, the cursor points at `piece`
            // and at the scratch buffer, both outlive this call
            let status = unsafe { D::process(self.session.raw(), flush) };

            if status < 0 {
                // No progress was possible: either the previous buffer was
                // filled exactly, or there was no input to begin with
                if status == codes::BUF_ERROR && (continuation || piece.is_empty()) {
                    trace!(direction = D::NAME, continuation, "nothing left to emit");
                    break;
                }

                return Err(self.fail(status).into());
            }

            let produced = self.session.produced();
            trace!(
                direction = D::NAME,
                status,
                produced = produced.len(),
                avail_in = self.session.avail_in(),
                "drain iteration"
            );

            if !produced.is_empty() {
                sink(produced)?;
            }

            if self.session.avail_out() != 0 || status == codes::STREAM_END {
                break;
            }
            continuation = true;
        }

        if self.session.avail_in() != 0 {
            debug!(direction = D::NAME, avail_in = self.session.avail_in(), "codec left input unconsumed");
            self.failed = true;
            return Err(StreamError::Undefined.into());
        }

        Ok(())
    }

    fn fail(&mut self, status: c_int) -> StreamError {
        let err = StreamError::from_code(status);
        self.failed = true;

        debug!(direction = D::NAME, code = status, message = ?self.session.message(), "codec reported an error: {err}");
        err
    }
}

impl<D: Direction> Drop for Stream<D> {
    fn drop(&mut self) {
        if !self.initialized {
            return;
        }

        // SAFETY: initialized, and the record is never used again
        let res = unsafe { D::end(self.session.raw()) };
        match res {
            codes::OK => debug!(direction = D::NAME, "session released"),

            // Pending data was thrown away, which is what dropping early means
            codes::DATA_ERROR => debug!(direction = D::NAME, "session released with pending data"),

            _ => warn!(direction = D::NAME, code = res, "failed to release session cleanly")
        }
    }
}
