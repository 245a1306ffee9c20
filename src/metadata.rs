//! Document information stamping built on top of `lopdf`.
//!
//! `genpdf` only exposes the document title, so the producer and creator entries are
//! written into the rendered bytes afterwards.  Values outside ASCII are stored as
//! UTF-16BE text strings with a byte order mark.

use std::io;

use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};
use thiserror::Error;

use crate::model::DocumentInfo;

/// Errors that can occur while rewriting the information dictionary.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The PDF bytes could not be parsed or written by `lopdf`.
    #[error("Failed to process PDF bytes: {0}")]
    Pdf(#[from] lopdf::Error),
    /// The updated document could not be serialized.
    #[error("Failed to write PDF bytes: {0}")]
    Io(#[from] io::Error),
    /// The trailer references an `Info` object that is not a dictionary.
    #[error("PDF information entry is not a dictionary")]
    InvalidInfo,
}

/// Writes `Title`, `Producer` and `Creator` into the document information dictionary,
/// creating the dictionary when the document has none.
pub fn apply_document_info(pdf_bytes: &[u8], info: &DocumentInfo) -> Result<Vec<u8>, MetadataError> {
    let mut document = Document::load_mem(pdf_bytes)?;

    let info_id = info_dictionary_id(&mut document);
    let dictionary = document
        .get_object_mut(info_id)?
        .as_dict_mut()
        .map_err(|_| MetadataError::InvalidInfo)?;

    dictionary.set("Title", text_string(&info.title));
    dictionary.set("Producer", text_string(&info.producer));
    dictionary.set("Creator", text_string(&info.creator));

    let mut buffer = Vec::new();
    document.save_to(&mut buffer)?;
    Ok(buffer)
}

const UTF16_BOM: [u8; 2] = [0xFE, 0xFF];

/// Encodes `value` as a PDF text string.
pub fn text_string(value: &str) -> Object {
    if value.is_ascii() {
        return Object::string_literal(value);
    }

    let mut bytes = UTF16_BOM.to_vec();
    bytes.extend(value.encode_utf16().flat_map(u16::to_be_bytes));
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Decodes the bytes of a PDF text string.
///
/// Strings without the UTF-16BE byte order mark are read as PDFDocEncoding, whose
/// printable range matches Latin-1 closely enough for document information.
pub fn decode_text_string(bytes: &[u8]) -> String {
    match bytes.strip_prefix(&UTF16_BOM) {
        Some(utf16) => {
            let units: Vec<u16> = utf16
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        None => bytes.iter().map(|&byte| char::from(byte)).collect(),
    }
}

fn info_dictionary_id(document: &mut Document) -> ObjectId {
    if let Ok(id) = document.trailer.get(b"Info").and_then(Object::as_reference) {
        if document.objects.contains_key(&id) {
            return id;
        }
    }

    let id = document.add_object(Object::Dictionary(Dictionary::new()));
    document.trailer.set("Info", Object::Reference(id));
    id
}

/// Reads a string entry from the information dictionary of `pdf_bytes`.
pub fn read_info_entry(pdf_bytes: &[u8], key: &str) -> Result<Option<String>, MetadataError> {
    let document = Document::load_mem(pdf_bytes)?;
    let Ok(id) = document.trailer.get(b"Info").and_then(Object::as_reference) else {
        return Ok(None);
    };
    let dictionary = document
        .get_object(id)?
        .as_dict()
        .map_err(|_| MetadataError::InvalidInfo)?;

    Ok(dictionary
        .get(key.as_bytes())
        .ok()
        .and_then(|value| value.as_str().ok())
        .map(decode_text_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    fn blank_pdf() -> Vec<u8> {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();
        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        document.save_to(&mut bytes).expect("save blank pdf");
        bytes
    }

    fn info() -> DocumentInfo {
        DocumentInfo {
            title: "Ada Lovelace - Cover Letter".into(),
            producer: "cv---maker".into(),
            creator: "cv---maker".into(),
        }
    }

    #[test]
    fn creates_missing_info_dictionary() {
        let stamped = apply_document_info(&blank_pdf(), &info()).expect("stamp info");

        assert_eq!(
            read_info_entry(&stamped, "Producer").expect("read"),
            Some("cv---maker".to_string())
        );
        assert_eq!(
            read_info_entry(&stamped, "Creator").expect("read"),
            Some("cv---maker".to_string())
        );
        assert_eq!(
            read_info_entry(&stamped, "Title").expect("read"),
            Some("Ada Lovelace - Cover Letter".to_string())
        );
    }

    #[test]
    fn overwrites_existing_entries() {
        let once = apply_document_info(&blank_pdf(), &info()).expect("stamp info");
        let mut updated = info();
        updated.title = "Grace Hopper - Cover Letter".into();
        let twice = apply_document_info(&once, &updated).expect("stamp info again");

        assert_eq!(
            read_info_entry(&twice, "Title").expect("read"),
            Some("Grace Hopper - Cover Letter".to_string())
        );
    }

    #[test]
    fn non_ascii_values_are_stored_as_utf16() {
        let mut accented = info();
        accented.title = "Nicolò Rossi - Cover Letter".into();
        let stamped = apply_document_info(&blank_pdf(), &accented).expect("stamp info");

        let document = Document::load_mem(&stamped).expect("load stamped pdf");
        let info_id = document
            .trailer
            .get(b"Info")
            .and_then(Object::as_reference)
            .expect("info reference");
        let title = document
            .get_object(info_id)
            .and_then(Object::as_dict)
            .and_then(|dictionary| dictionary.get(b"Title"))
            .and_then(Object::as_str)
            .expect("title bytes");
        assert_eq!(&title[..2], &UTF16_BOM);
        assert_eq!(&title[2..6], &[0x00, b'N', 0x00, b'i']);

        assert_eq!(
            read_info_entry(&stamped, "Title").expect("read"),
            Some("Nicolò Rossi - Cover Letter".to_string())
        );
    }

    #[test]
    fn ascii_values_stay_literal() {
        let Object::String(bytes, format) = text_string("cv---maker") else {
            panic!("text string must be a string object");
        };
        assert_eq!(bytes, b"cv---maker");
        assert!(matches!(format, StringFormat::Literal));
    }

    #[test]
    fn text_strings_decode_both_encodings() {
        let Object::String(bytes, _) = text_string("Città") else {
            panic!("text string must be a string object");
        };
        assert_eq!(decode_text_string(&bytes), "Città");
        assert_eq!(decode_text_string(b"Plain"), "Plain");
    }

    #[test]
    fn rejects_non_pdf_input() {
        let err = apply_document_info(b"not a pdf", &info()).unwrap_err();
        assert!(matches!(err, MetadataError::Pdf(_)));
    }

    #[test]
    fn missing_info_reads_as_none() {
        assert_eq!(read_info_entry(&blank_pdf(), "Producer").expect("read"), None);
    }
}
