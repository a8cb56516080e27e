//! DOCX reader: a `.docx` file is a zip archive whose body lives in
//! `word/document.xml` as a sequence of `<w:p>` paragraphs made of `<w:t>` runs.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use super::ExtractError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Returns the document's body paragraphs, in order, joined by `\n`.
/// Paragraphs nested in tables are not part of the body sequence.
pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| ExtractError::Docx(e.to_string()))?;
    let part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractError::Docx(format!("{DOCUMENT_PART}: {e}")))?;

    let paragraphs = read_paragraphs(BufReader::new(part))?;
    Ok(paragraphs.join("\n"))
}

fn read_paragraphs<R: BufRead>(source: R) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_reader(source);
    reader.config_mut().trim_text(false);

    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut table_depth = 0_usize;
    let mut in_text_run = false;
    let mut buf = Vec::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| ExtractError::Docx(format!("malformed {DOCUMENT_PART}: {e}")))?;

        match event {
            Event::Start(e) => match e.name().as_ref() {
                b"w:tbl" => table_depth += 1,
                b"w:p" if table_depth == 0 => current = Some(String::new()),
                b"w:t" => in_text_run = true,
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:tbl" => table_depth = table_depth.saturating_sub(1),
                b"w:p" if table_depth == 0 => paragraphs.extend(current.take()),
                b"w:t" => in_text_run = false,
                _ => {}
            },
            Event::Empty(e) => {
                let para = current.as_mut();
                match (e.name().as_ref(), para) {
                    (b"w:p", None) if table_depth == 0 => paragraphs.push(String::new()),
                    (b"w:tab", Some(p)) => p.push('\t'),
                    (b"w:br" | b"w:cr", Some(p)) => p.push('\n'),
                    _ => {}
                }
            }
            Event::Text(t) if in_text_run => {
                if let Some(p) = current.as_mut() {
                    let text = t
                        .unescape()
                        .map_err(|e| ExtractError::Docx(e.to_string()))?;
                    p.push_str(&text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}
