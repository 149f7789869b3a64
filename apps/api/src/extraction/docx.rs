//! DOCX text recovery: reads `word/document.xml` out of the OOXML zip container and
//! emits every paragraph's text followed by a newline, in document order.
//!
//! Table cells and text boxes are flattened into the same stream. Paragraph text is the
//! concatenation of its `w:t` runs, with `w:tab` as a tab and `w:br`/`w:cr` as newlines.
//! Markup-compatibility blocks are read through their `mc:Choice` branch only.

use std::io::{Cursor, Read};

use roxmltree::{Document, Node};
use zip::ZipArchive;

use super::{DocumentError, DocumentFormat};

const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const MC_NS: &str = "http://schemas.openxmlformats.org/markup-compatibility/2006";
const DOCUMENT_PART: &str = "word/document.xml";

/// Upper bound on the decompressed size of `word/document.xml`.
pub const MAX_DOCUMENT_PART_BYTES: u64 = 64 * 1024 * 1024;

pub fn extract_docx_text(content: &[u8]) -> Result<String, DocumentError> {
    let xml = read_document_part(content, MAX_DOCUMENT_PART_BYTES)?;
    let doc = Document::parse(&xml).map_err(malformed)?;

    let body = doc
        .descendants()
        .find(|n| is_word_element(n, "body"))
        .ok_or_else(|| malformed("document part has no w:body"))?;

    let mut paragraphs = Vec::new();
    collect_paragraphs(body, None, &mut paragraphs);

    let mut text = String::with_capacity(paragraphs.iter().map(|p| p.len() + 1).sum());
    for paragraph in &paragraphs {
        text.push_str(paragraph);
        text.push('\n');
    }
    Ok(text)
}

fn read_document_part(content: &[u8], limit: u64) -> Result<String, DocumentError> {
    let mut archive = ZipArchive::new(Cursor::new(content)).map_err(malformed)?;
    let mut part = archive.by_name(DOCUMENT_PART).map_err(malformed)?;

    let oversized = || malformed(format!("{DOCUMENT_PART} expands beyond {limit} bytes"));
    if part.size() > limit {
        return Err(oversized());
    }

    // The declared size is untrusted; cap what the inflater may produce.
    let mut raw = Vec::new();
    (&mut part)
        .take(limit + 1)
        .read_to_end(&mut raw)
        .map_err(malformed)?;
    if raw.len() as u64 > limit {
        return Err(oversized());
    }

    String::from_utf8(raw).map_err(malformed)
}

/// Walks the body in document order. `current` is the index of the innermost open
/// paragraph in `out`; run content outside any paragraph is ignored.
fn collect_paragraphs(node: Node, current: Option<usize>, out: &mut Vec<String>) {
    for child in node.children().filter(|n| n.is_element()) {
        let namespace = child.tag_name().namespace();
        if namespace != Some(WORD_NS) {
            // Fallback duplicates the Choice content for older readers.
            let is_fallback = namespace == Some(MC_NS) && child.tag_name().name() == "Fallback";
            if !is_fallback {
                collect_paragraphs(child, current, out);
            }
            continue;
        }

        match (child.tag_name().name(), current) {
            ("p", _) => {
                out.push(String::new());
                let idx = out.len() - 1;
                collect_paragraphs(child, Some(idx), out);
            }
            // Property blocks hold tab-stop definitions, not content.
            ("pPr" | "rPr", _) => {}
            ("t", Some(idx)) => {
                if let Some(text) = child.text() {
                    out[idx].push_str(text);
                }
            }
            ("tab", Some(idx)) => out[idx].push('\t'),
            ("br" | "cr", Some(idx)) => out[idx].push('\n'),
            _ => collect_paragraphs(child, current, out),
        }
    }
}

fn is_word_element(node: &Node, local: &str) -> bool {
    node.is_element()
        && node.tag_name().namespace() == Some(WORD_NS)
        && node.tag_name().name() == local
}

fn malformed(reason: impl std::fmt::Display) -> DocumentError {
    DocumentError::extraction(DocumentFormat::Docx, reason)
}
