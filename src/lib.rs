use std::{ffi::CStr, sync::OnceLock};

/// Provides the error type codec status codes are translated into
pub mod status;

/// Provides utilities for telling which container format a window bits value selects
pub mod framing;

/// Provides incremental compression and decompression streams
pub mod stream;

#[cfg(feature = "bytes")]
mod blob;

pub use status::StreamError;
pub use stream::{Compressor, Decompressor, Flush, Stream, StreamConfig, WriteError};

static CODEC_VERSION: OnceLock<&'static CStr> = OnceLock::new();

pub(crate) fn codec_version() -> &'static CStr {
    // SAFETY: the codec returns a pointer to a static, nul-terminated string
    CODEC_VERSION.get_or_init(|| unsafe { CStr::from_ptr(libz_sys::zlibVersion()) })
}

/// Returns the version of the underlying codec library
pub fn version() -> &'static str {
    codec_version().to_str().unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    #[test]
    fn version_is_cached() {
        let first = super::version();
        assert!(first.starts_with('1'), "unexpected codec version {first}");
        assert!(std::ptr::eq(first, super::version()));
    }
}
