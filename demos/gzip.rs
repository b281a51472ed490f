use std::{env, fs::{File, OpenOptions}, io::{Read, Write, self}};

use stream_deflate::{Compressor, Flush};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let input_path = env::args().nth(1).unwrap_or_else(|| "archive.tar".to_owned());
    let output_path = format!("{input_path}.gz");

    let mut input = File::open(&input_path)?;
    let mut output = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&output_path)?;

    println!("Compressing {input_path} into {output_path}");

    // Window bits 31: 32 KiB window with gzip framing
    let mut compressor = Compressor::with_level_and_window_bits(9, 31);
    let mut buf = vec![0u8; 64 * 1024];
    loop {
        let read = input.read(&mut buf)?;
        let flush = if read == 0 { Flush::Finish } else { Flush::None };

        compressor.write_into(&buf[..read], flush, |data| {
            print!(".");
            io::stdout().flush()?;

            output.write_all(data)?;
            Ok(())
        })?;

        if read == 0 {
            break;
        }
    }

    println!("\nDone! {} -> {} bytes", compressor.total_in(), compressor.total_out());

    Ok(())
}
