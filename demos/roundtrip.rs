use std::{env, fs};

use stream_deflate::{Compressor, Decompressor, Flush};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("Codec version: {}", stream_deflate::version());

    let data = match env::args().nth(1) {
        Some(path) => fs::read(path)?,
        None => b"the quick brown fox jumps over the lazy dog. ".repeat(10_000)
    };

    let chunk_size = 16 * 1024;

    let mut compressor = Compressor::new();
    let mut compressed = Vec::new();
    let mut chunks = data.chunks(chunk_size).peekable();
    while let Some(chunk) = chunks.next() {
        let last = chunks.peek().is_none();
        let out = compressor.write(chunk, last)?;
        println!("Wrote {} bytes, got {} compressed bytes back", chunk.len(), out.len());

        compressed.extend(out);
    }

    // Flushing writes leave the stream open, so end it explicitly
    compressed.extend(compressor.write_with(&[], Flush::Finish)?);

    let mut decompressor = Decompressor::new();
    let mut decompressed = Vec::new();
    for chunk in compressed.chunks(chunk_size / 4) {
        decompressed.extend(decompressor.write(chunk, false)?);
    }

    anyhow::ensure!(decompressed == data, "round trip produced different bytes");

    println!(
        "\nDone! {} bytes -> {} bytes ({:.1}%)",
        data.len(),
        compressed.len(),
        100.0 * compressed.len() as f64 / data.len().max(1) as f64
    );

    Ok(())
}
