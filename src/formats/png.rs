use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::Path;

use flate2::read::ZlibDecoder;
use img_parts::Bytes;
use img_parts::png::{Png, PngChunk};
use tracing::{debug, warn};

use super::MetadataFormat;
use crate::error::MetadataError;
use crate::traits::{Metadata, MetadataSink, MetadataSource};

const TEXT: [u8; 4] = *b"tEXt";
const ZTXT: [u8; 4] = *b"zTXt";
const ITXT: [u8; 4] = *b"iTXt";
const IEND: [u8; 4] = *b"IEND";

/// Textual chunks of a PNG (`tEXt`, `zTXt`, `iTXt`), in file order.
///
/// Image data and every other chunk pass through untouched. A chunk whose
/// text did not change is written back as it was read.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngFormat;

/// A decoded text chunk.
#[derive(Debug, PartialEq, Eq)]
struct TextChunk {
    keyword: String,
    text: String,
}

fn latin1_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

fn string_to_latin1(text: &str) -> Option<Vec<u8>> {
    text.chars().map(|c| u8::try_from(c).ok()).collect()
}

fn split_nul(bytes: &[u8]) -> Option<(&[u8], &[u8])> {
    let at = bytes.iter().position(|&b| b == 0)?;
    Some((&bytes[..at], &bytes[at + 1..]))
}

fn inflate(bytes: &[u8]) -> Option<Vec<u8>> {
    let mut out = Vec::new();
    ZlibDecoder::new(bytes).read_to_end(&mut out).ok()?;
    Some(out)
}

fn decode_chunk(chunk: &PngChunk) -> Option<TextChunk> {
    let data = chunk.contents();
    let (keyword, rest) = split_nul(data)?;
    let keyword = latin1_to_string(keyword);
    let text = match chunk.kind() {
        TEXT => latin1_to_string(rest),
        ZTXT => {
            let (&method, compressed) = rest.split_first()?;
            if method != 0 {
                return None;
            }
            latin1_to_string(&inflate(compressed)?)
        }
        ITXT => {
            let [flag, method, rest @ ..] = rest else {
                return None;
            };
            let (_language, rest) = split_nul(rest)?;
            let (_translated, body) = split_nul(rest)?;
            let body = match (*flag, *method) {
                (0, _) => body.to_vec(),
                (1, 0) => inflate(body)?,
                _ => return None,
            };
            String::from_utf8(body).ok()?
        }
        _ => return None,
    };
    Some(TextChunk { keyword, text })
}

fn is_text_kind(kind: [u8; 4]) -> bool {
    matches!(kind, TEXT | ZTXT | ITXT)
}

/// Build a `tEXt` chunk when both halves fit Latin-1, else an uncompressed
/// `iTXt` chunk.
fn encode_chunk(keyword: &[u8], text: &str) -> PngChunk {
    let mut data = keyword.to_vec();
    data.push(0);
    match string_to_latin1(text) {
        Some(latin1) => {
            data.extend_from_slice(&latin1);
            PngChunk::new(TEXT, Bytes::from(data))
        }
        None => {
            // compression flag, method, empty language tag, empty translation
            data.extend_from_slice(&[0, 0, 0, 0]);
            data.extend_from_slice(text.as_bytes());
            PngChunk::new(ITXT, Bytes::from(data))
        }
    }
}

fn read_png(path: &Path) -> Result<Png, Box<dyn std::error::Error + Send + Sync>> {
    let bytes = fs::read(path)?;
    Ok(Png::from_bytes(Bytes::from(bytes))?)
}

impl MetadataSource for PngFormat {
    fn load(&self, path: &Path) -> Result<Metadata, MetadataError> {
        let png = read_png(path).map_err(|e| MetadataError::read(path, e))?;
        let mut metadata = Metadata::new();
        for chunk in png.chunks().iter().filter(|c| is_text_kind(c.kind())) {
            match decode_chunk(chunk) {
                Some(TextChunk { keyword, text }) => metadata.push((keyword, text)),
                None => warn!(target: "formats", path = %path.display(), "skipping undecodable text chunk"),
            }
        }
        debug!(target: "formats", path = %path.display(), fields = metadata.len(), "png loaded");
        Ok(metadata)
    }
}

impl MetadataSink for PngFormat {
    fn persist(&self, path: &Path, metadata: &Metadata) -> Result<(), MetadataError> {
        let mut png = read_png(path).map_err(|e| MetadataError::write(path, e))?;

        let mut written: HashSet<&str> = HashSet::new();
        let mut chunks = Vec::with_capacity(png.chunks().len() + metadata.len());
        for chunk in std::mem::take(png.chunks_mut()) {
            if chunk.kind() == IEND {
                for (key, value) in metadata.iter().filter(|(k, _)| !written.contains(k.as_str())) {
                    let keyword = string_to_latin1(key)
                        .ok_or_else(|| MetadataError::write(path, format!("keyword {key:?} is not Latin-1")))?;
                    chunks.push(encode_chunk(&keyword, value));
                }
                written.extend(metadata.iter().map(|(k, _)| k.as_str()));
                chunks.push(chunk);
                continue;
            }
            if !is_text_kind(chunk.kind()) {
                chunks.push(chunk);
                continue;
            }
            let Some(decoded) = decode_chunk(&chunk) else {
                chunks.push(chunk);
                continue;
            };
            let Some((key, value)) = metadata.iter().find(|(k, _)| *k == decoded.keyword) else {
                debug!(target: "formats", keyword = %decoded.keyword, "dropping text chunk");
                continue;
            };
            if !written.insert(key.as_str()) {
                continue;
            }
            if decoded.text == *value {
                chunks.push(chunk);
            } else {
                let keyword = string_to_latin1(key)
                    .ok_or_else(|| MetadataError::write(path, format!("keyword {key:?} is not Latin-1")))?;
                chunks.push(encode_chunk(&keyword, value));
            }
        }
        *png.chunks_mut() = chunks;

        let mut out = Vec::new();
        png.encoder()
            .write_to(&mut out)
            .map_err(|e| MetadataError::write(path, e))?;
        fs::write(path, &out).map_err(|e| MetadataError::write(path, e))?;
        debug!(target: "formats", path = %path.display(), fields = metadata.len(), "png written");
        Ok(())
    }
}

impl MetadataFormat for PngFormat {
    fn name(&self) -> &'static str {
        "png"
    }
}
