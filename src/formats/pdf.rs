use std::path::Path;

use lopdf::{Dictionary, Document, Object, StringFormat};
use tracing::{debug, warn};

use super::MetadataFormat;
use crate::error::MetadataError;
use crate::traits::{Metadata, MetadataSink, MetadataSource};

const UTF16_BOM: [u8; 2] = [0xFE, 0xFF];

/// The document information dictionary of a PDF (`/Title`, `/Author`, ...).
///
/// Keys are reported without the leading `/`. Only text-like entries
/// (strings, names, numbers, booleans) are editable. Saving updates the
/// existing dictionary in place: unchanged entries keep their original
/// objects, edited ones keep their type when the new text still parses as
/// that type, and entries that are not text-like are left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfFormat;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// PDFDocEncoding 0x18..=0x1F.
const DOC_ACCENTS: [char; 8] = ['˘', 'ˇ', 'ˆ', '˙', '˝', '˛', '˚', '˜'];

/// PDFDocEncoding 0x80..=0x9E.
const DOC_HIGH: [char; 31] = [
    '•', '†', '‡', '…', '—', '–', 'ƒ', '⁄', '‹', '›', '−', '‰', '„', '“', '”', '‘', '’', '‚', '™', 'ﬁ', 'ﬂ',
    'Ł', 'Œ', 'Š', 'Ÿ', 'Ž', 'ı', 'ł', 'œ', 'š', 'ž',
];

fn doc_encoding_char(byte: u8) -> char {
    match byte {
        0x18..=0x1F => DOC_ACCENTS[usize::from(byte - 0x18)],
        0x80..=0x9E => DOC_HIGH[usize::from(byte - 0x80)],
        0xA0 => '€',
        0x7F | 0x9F | 0xAD => char::REPLACEMENT_CHARACTER,
        _ => char::from(byte),
    }
}

fn decode_text(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&UTF16_BOM) {
        let pairs = rest.chunks_exact(2);
        let odd = !pairs.remainder().is_empty();
        let units: Vec<u16> = pairs.map(|pair| u16::from_be_bytes([pair[0], pair[1]])).collect();
        let mut text = String::from_utf16_lossy(&units);
        if odd {
            warn!(target: "formats", len = bytes.len(), "odd-length UTF-16 text string");
            text.push(char::REPLACEMENT_CHARACTER);
        }
        return text;
    }
    if let Some(rest) = bytes.strip_prefix(&UTF8_BOM) {
        return String::from_utf8_lossy(rest).into_owned();
    }
    bytes.iter().map(|&b| doc_encoding_char(b)).collect()
}

/// Bytes that mean the same thing in ASCII and PDFDocEncoding.
fn is_plain(ch: char) -> bool {
    matches!(ch, '\t' | '\n' | '\r' | ' '..='~')
}

fn encode_text(text: &str) -> Object {
    if text.chars().all(is_plain) {
        return Object::string_literal(text);
    }
    let mut bytes = UTF16_BOM.to_vec();
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

fn object_text(object: &Object) -> Option<String> {
    match object {
        Object::String(bytes, _) => Some(decode_text(bytes)),
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        Object::Integer(n) => Some(n.to_string()),
        Object::Real(r) => Some(r.to_string()),
        Object::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Encode `text` with the same object type as `previous` when it parses as
/// that type, otherwise as a text string.
fn encode_like(previous: Option<&Object>, text: &str) -> Object {
    let typed = match previous {
        Some(Object::Name(_)) if !text.is_empty() && !text.contains(char::is_whitespace) => {
            Some(Object::Name(text.as_bytes().to_vec()))
        }
        Some(Object::Integer(_)) => text.parse().ok().map(Object::Integer),
        Some(Object::Real(_)) => text.parse().ok().map(Object::Real),
        Some(Object::Boolean(_)) => text.parse().ok().map(Object::Boolean),
        _ => None,
    };
    typed.unwrap_or_else(|| encode_text(text))
}

fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
    match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_object(*id).ok()?.as_dict().ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

impl MetadataSource for PdfFormat {
    fn load(&self, path: &Path) -> Result<Metadata, MetadataError> {
        let doc = Document::load(path).map_err(|e| MetadataError::read(path, e))?;
        let Some(info) = info_dictionary(&doc) else {
            debug!(target: "formats", path = %path.display(), "pdf has no info dictionary");
            return Ok(Metadata::new());
        };

        let mut metadata = Metadata::new();
        for (key, value) in info.iter() {
            let key = String::from_utf8_lossy(key).into_owned();
            match object_text(value) {
                Some(text) => metadata.push((key, text)),
                None => debug!(target: "formats", key = %key, "skipping non-text info entry"),
            }
        }
        debug!(target: "formats", path = %path.display(), fields = metadata.len(), "pdf loaded");
        Ok(metadata)
    }
}

impl MetadataSink for PdfFormat {
    fn persist(&self, path: &Path, metadata: &Metadata) -> Result<(), MetadataError> {
        let mut doc = Document::load(path).map_err(|e| MetadataError::write(path, e))?;

        let mut info = info_dictionary(&doc).cloned().unwrap_or_else(Dictionary::new);
        let dropped: Vec<Vec<u8>> = info
            .iter()
            .filter(|(key, value)| {
                object_text(value).is_some() && !metadata.iter().any(|(k, _)| k.as_bytes() == key.as_slice())
            })
            .map(|(key, _)| key.clone())
            .collect();
        for key in dropped {
            info.remove(&key);
        }
        for (key, value) in metadata {
            let previous = info.get(key.as_bytes()).ok();
            if previous.and_then(object_text).as_deref() == Some(value.as_str()) {
                continue;
            }
            let object = encode_like(previous, value);
            info.set(key.as_bytes().to_vec(), object);
        }

        let existing = doc.trailer.get(b"Info").and_then(Object::as_reference).ok();
        match existing {
            Some(id) => {
                doc.objects.insert(id, Object::Dictionary(info));
            }
            None => {
                let id = doc.add_object(Object::Dictionary(info));
                doc.trailer.set("Info", Object::Reference(id));
            }
        }

        doc.save(path).map_err(|e| MetadataError::write(path, e))?;
        debug!(target: "formats", path = %path.display(), fields = metadata.len(), "pdf written");
        Ok(())
    }
}

impl MetadataFormat for PdfFormat {
    fn name(&self) -> &'static str {
        "pdf"
    }
}
