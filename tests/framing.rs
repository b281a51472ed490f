mod common;

use std::io::Read;

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use flate2::{read::GzDecoder, Crc};

use stream_deflate::{framing::Framing, Compressor, Decompressor, Flush, StreamError};

use common::mixed_bytes;

#[test]
fn test_zlib_output_is_standard() {
    let data = mixed_bytes(30_000);
    let compressed = Compressor::new().write_with(&data, Flush::Finish).unwrap();

    // CMF/FLG: deflate method, header checksum
    assert_eq!(compressed[0] & 0x0f, 8);
    assert_eq!(BigEndian::read_u16(&compressed[..2]) % 31, 0);

    assert_eq!(inflate::inflate_bytes_zlib(&compressed).unwrap(), data);
}

#[test]
fn test_raw_deflate_output_is_standard() {
    let data = mixed_bytes(30_000);
    let mut compressor = Compressor::with_window_bits(-15);
    assert_eq!(compressor.config().framing(), Some(Framing::Raw));

    let compressed = compressor.write_with(&data, Flush::Finish).unwrap();
    assert_eq!(inflate::inflate_bytes(&compressed).unwrap(), data);

    let decompressed = Decompressor::with_window_bits(-15).write(&compressed, true).unwrap();
    assert_eq!(decompressed, data);
}

#[test]
fn test_gzip_output_is_standard() {
    let data = mixed_bytes(30_000);
    let mut compressor = Compressor::with_level_and_window_bits(9, 31);
    assert_eq!(compressor.config().framing(), Some(Framing::Gzip));

    let compressed = compressor.write_with(&data, Flush::Finish).unwrap();
    assert_eq!(&compressed[..2], &[0x1f, 0x8b]);

    // Trailer: CRC-32, then input size modulo 2^32
    let trailer = &compressed[compressed.len() - 8..];
    let mut crc = Crc::new();
    crc.update(&data);
    assert_eq!(LittleEndian::read_u32(&trailer[..4]), crc.sum());
    assert_eq!(LittleEndian::read_u32(&trailer[4..]), data.len() as u32);

    let mut decompressed = Vec::new();
    GzDecoder::new(&compressed[..]).read_to_end(&mut decompressed).unwrap();
    assert_eq!(decompressed, data);
}

#[test]
fn test_auto_detection_reads_both() {
    let data = mixed_bytes(10_000);
    let zlib = Compressor::new().write(&data, true).unwrap();
    let gzip = Compressor::with_window_bits(31).write(&data, true).unwrap();

    for compressed in [zlib, gzip] {
        let mut decompressor = Decompressor::with_window_bits(47);
        assert_eq!(decompressor.config().framing(), Some(Framing::Auto));
        assert_eq!(decompressor.write(&compressed, true).unwrap(), data);
    }
}

#[test]
fn test_smaller_window() {
    let data = mixed_bytes(50_000);
    let compressed = Compressor::with_window_bits(10).write(&data, true).unwrap();

    // The header announces the smaller window, so a default decompressor can read it
    assert_eq!(compressed[0] >> 4, 10 - 8);
    assert_eq!(Decompressor::new().write(&compressed, true).unwrap(), data);
}

#[test]
fn test_mismatched_framing_fails() {
    let raw = Compressor::with_window_bits(-15).write(b"raw data, no header", true).unwrap();
    assert!(Decompressor::new().write(&raw, true).is_err());

    let zlib = Compressor::new().write(&mixed_bytes(1000), true).unwrap();
    assert_eq!(Decompressor::with_window_bits(31).write(&zlib, true), Err(StreamError::DataError));
}

#[test]
fn test_invalid_window_bits_fail_init() {
    assert_eq!(Framing::from_window_bits(99), None);

    let mut compressor = Compressor::with_window_bits(99);
    assert_eq!(compressor.write(b"data", true), Err(StreamError::StreamError));
    assert!(!compressor.is_initialized());

    let mut decompressor = Decompressor::with_window_bits(99);
    assert_eq!(decompressor.ensure_initialized(), Err(StreamError::StreamError));
}
