use memmap2::Mmap;
use std::fs::File;
use std::io;
use std::path::Path;

/// Memory-map a RAW file for decoding
pub fn read_binary_file_mmap(path: impl AsRef<Path>) -> io::Result<Mmap> {
    let file = File::open(path)?;
    // Safety: the file is only read, and the map is dropped once decoding finishes
    unsafe { Mmap::map(&file) }
}
