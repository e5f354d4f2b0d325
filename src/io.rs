//! Simple I/O collaborators around the core: the textual integer source and
//! the raw word dump used as the persisted artifact.
//!
//! The dump is the truncated encoded buffer written verbatim in the
//! platform's native word layout: no header, no length prefix, no checksum.
//! The element count travels out-of-band.

use std::io::{BufRead, Read, Write};
use std::path::Path;

use crate::error::CodecError;

//==================================================================================
// 1. Integer Source
//==================================================================================

/// Reads whitespace- or newline-delimited unsigned 32-bit integers.
pub fn read_integers<R: BufRead>(reader: R) -> Result<Vec<u32>, CodecError> {
    let mut values = Vec::new();
    for line in reader.lines() {
        let line = line?;
        for token in line.split_whitespace() {
            let value = token.parse::<u32>().map_err(|_| CodecError::Parse {
                index: values.len(),
                token: token.to_string(),
            })?;
            values.push(value);
        }
    }
    Ok(values)
}

pub fn read_integers_from_path(path: impl AsRef<Path>) -> Result<Vec<u32>, CodecError> {
    let file = std::fs::File::open(path)?;
    read_integers(std::io::BufReader::new(file))
}

/// Reads one posting list per line; blank lines are skipped. `Parse`
/// errors count tokens across the whole input.
pub fn read_lists<R: BufRead>(reader: R) -> Result<Vec<Vec<u32>>, CodecError> {
    let mut lists = Vec::new();
    let mut index = 0;
    for line in reader.lines() {
        let line = line?;
        let mut list = Vec::new();
        for token in line.split_whitespace() {
            let value = token.parse::<u32>().map_err(|_| CodecError::Parse {
                index,
                token: token.to_string(),
            })?;
            list.push(value);
            index += 1;
        }
        if !list.is_empty() {
            lists.push(list);
        }
    }
    Ok(lists)
}

pub fn read_lists_from_path(path: impl AsRef<Path>) -> Result<Vec<Vec<u32>>, CodecError> {
    let file = std::fs::File::open(path)?;
    read_lists(std::io::BufReader::new(file))
}

//==================================================================================
// 2. Raw Word Dump
//==================================================================================

pub fn write_words<W: Write>(mut writer: W, words: &[u32]) -> Result<(), CodecError> {
    writer.write_all(bytemuck::cast_slice::<u32, u8>(words))?;
    writer.flush()?;
    Ok(())
}

pub fn read_words<R: Read>(mut reader: R) -> Result<Vec<u32>, CodecError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    if bytes.len() % 4 != 0 {
        return Err(CodecError::CorruptStream(format!(
            "word dump is {} bytes, not a multiple of 4",
            bytes.len()
        )));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| u32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

//==================================================================================
// 3. Display Helper
//==================================================================================

/// Renders a sequence as `{ a b c }`.
pub fn format_sequence(values: &[u32]) -> String {
    let mut out = String::with_capacity(4 + values.len() * 4);
    out.push_str("{ ");
    for value in values {
        out.push_str(&value.to_string());
        out.push(' ');
    }
    out.push('}');
    out
}
