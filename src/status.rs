use thiserror::Error;

/// Status codes returned by the codec entry points
pub(crate) mod codes {
    use std::os::raw::c_int;

    pub const OK: c_int = 0;
    pub const STREAM_END: c_int = 1;
    pub const NEED_DICT: c_int = 2;
    pub const ERRNO: c_int = -1;
    pub const STREAM_ERROR: c_int = -2;
    pub const DATA_ERROR: c_int = -3;
    pub const MEM_ERROR: c_int = -4;
    pub const BUF_ERROR: c_int = -5;
    pub const VERSION_ERROR: c_int = -6;
}

/// A codec status translated into a closed set of cases.
///
/// [StreamError::StreamEnd] is the terminal signal of a finished stream.
/// It is never returned from a write, the drain loop consumes it
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamError {
    #[error("end of stream reached")]
    StreamEnd,

    #[error("a preset dictionary is needed")]
    NeedDictionary,

    #[error("codec reported a system error: errno {0}")]
    Errno(i32),

    #[error("inconsistent stream state")]
    StreamError,

    #[error("invalid or corrupted input data")]
    DataError,

    #[error("codec ran out of memory")]
    MemoryError,

    #[error("no progress was possible")]
    BufferError,

    #[error("incompatible codec version")]
    VersionMismatch,

    #[error("undefined stream error")]
    Undefined
}

impl StreamError {
    /// Maps a codec status code. Every value has a mapping,
    /// unknown codes become [StreamError::Undefined]
    pub fn from_code(code: i32) -> Self {
        match code {
            codes::STREAM_END => Self::StreamEnd,
            codes::NEED_DICT => Self::NeedDictionary,
            codes::ERRNO => Self::Errno(code),
            codes::STREAM_ERROR => Self::StreamError,
            codes::DATA_ERROR => Self::DataError,
            codes::MEM_ERROR => Self::MemoryError,
            codes::BUF_ERROR => Self::BufferError,
            codes::VERSION_ERROR => Self::VersionMismatch,

            _ => Self::Undefined
        }
    }

    /// Returns the codec status code this error stands for,
    /// or None for [StreamError::Undefined]
    pub fn code(&self) -> Option<i32> {
        let code = match self {
            Self::StreamEnd => codes::STREAM_END,
            Self::NeedDictionary => codes::NEED_DICT,
            Self::Errno(code) => *code,
            Self::StreamError => codes::STREAM_ERROR,
            Self::DataError => codes::DATA_ERROR,
            Self::MemoryError => codes::MEM_ERROR,
            Self::BufferError => codes::BUF_ERROR,
            Self::VersionMismatch => codes::VERSION_ERROR,

            Self::Undefined => return None
        };

        Some(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_codes() {
        assert_eq!(StreamError::from_code(1), StreamError::StreamEnd);
        assert_eq!(StreamError::from_code(2), StreamError::NeedDictionary);
        assert_eq!(StreamError::from_code(-1), StreamError::Errno(-1));
        assert_eq!(StreamError::from_code(-2), StreamError::StreamError);
        assert_eq!(StreamError::from_code(-3), StreamError::DataError);
        assert_eq!(StreamError::from_code(-4), StreamError::MemoryError);
        assert_eq!(StreamError::from_code(-5), StreamError::BufferError);
        assert_eq!(StreamError::from_code(-6), StreamError::VersionMismatch);
    }

    #[test]
    fn unknown_codes_are_undefined() {
        for code in [0, 3, 7, -7, -100, i32::MIN, i32::MAX] {
            assert_eq!(StreamError::from_code(code), StreamError::Undefined, "code {code}");
        }
    }

    #[test]
    fn code_inverts_mapping() {
        for code in -6..=2 {
            if code == 0 {
                continue;
            }
            assert_eq!(StreamError::from_code(code).code(), Some(code));
        }
        assert_eq!(StreamError::Undefined.code(), None);
    }
}
