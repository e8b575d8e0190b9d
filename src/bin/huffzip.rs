use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use log::info;

use huffzip::compression::huffman::{huffman_compress, huffman_decompress};
use huffzip::compression::table::CodeTable;
use huffzip::{Error, Result};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(args: &[String]) -> Result<()> {
    if args.len() == 5 && args[1] == "compress" {
        return compress_file(
            Path::new(&args[2]),
            Path::new(&args[3]),
            Path::new(&args[4]),
        );
    }
    if args.len() == 5 && args[1] == "decompress" {
        return decompress_file(
            Path::new(&args[2]),
            Path::new(&args[3]),
            Path::new(&args[4]),
        );
    }

    let progname = args.first().map(String::as_str).unwrap_or("huffzip");
    eprintln!("usage: {} compress <input> <compressed> <codes>", progname);
    eprintln!("       {} decompress <compressed> <codes> <output>", progname);
    process::exit(2);
}

fn compress_file(input: &Path, compressed: &Path, codes: &Path) -> Result<()> {
    let data = fs::read(input)?;
    info!("read {} bytes from {}", data.len(), input.display());

    let (payload, table) = huffman_compress(&data)?;

    write_atomic(compressed, &payload)?;
    write_atomic(codes, table.serialize().as_bytes())?;
    info!(
        "compression complete: {} payload bytes written to {}, codes written to {}",
        payload.len(),
        compressed.display(),
        codes.display()
    );
    Ok(())
}

fn decompress_file(compressed: &Path, codes: &Path, output: &Path) -> Result<()> {
    let table_text = fs::read_to_string(codes)
        .map_err(|e| Error::MissingTable(format!("{}: {}", codes.display(), e)))?;
    let table = CodeTable::parse(&table_text)?;

    let payload = fs::read(compressed)?;
    let restored = huffman_decompress(&payload, &table)?;

    write_atomic(output, &restored)?;
    info!(
        "decompression complete: {} bytes written to {}",
        restored.len(),
        output.display()
    );
    Ok(())
}

/// Writes through a temporary sibling and renames it into place, so a
/// failed run never leaves a half-written file behind at the final path.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
