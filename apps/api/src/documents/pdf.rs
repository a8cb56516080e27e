use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use super::ExtractError;

/// Concatenates the text of every page in page order.
///
/// `pdf-extract` panics on some malformed inputs; those panics are reported as
/// ordinary extraction errors.
pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    let pages = panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_by_pages(path)))
        .map_err(|payload| ExtractError::Pdf(panic_message(payload.as_ref())))?
        .map_err(|e| ExtractError::Pdf(e.to_string()))?;

    Ok(pages.concat())
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "PDF parser aborted".to_string()
    }
}

/// Builds a minimal PDF with one Helvetica text line per page. An empty string
/// yields a page with an empty content stream.
#[cfg(test)]
pub(crate) fn pdf_bytes(pages: &[&str]) -> Vec<u8> {
    let page_ids: Vec<usize> = (0..pages.len()).map(|i| 4 + 2 * i).collect();
    let kids: Vec<String> = page_ids.iter().map(|id| format!("{id} 0 R")).collect();

    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids.join(" "), pages.len()),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];
    for (page, id) in pages.iter().zip(&page_ids) {
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            id + 1
        ));
        let content = if page.is_empty() {
            String::new()
        } else {
            let escaped = page
                .replace('\\', "\\\\")
                .replace('(', "\\(")
                .replace(')', "\\)");
            format!("BT /F1 12 Tf 72 720 Td ({escaped}) Tj ET")
        };
        objects.push(format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        ));
    }

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }

    let xref_at = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
    for offset in offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_pdf(pages: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(&pdf_bytes(pages)).unwrap();
        file
    }

    #[test]
    fn test_pages_are_joined_in_order_with_blank_page_empty() {
        let file = write_pdf(&["Python Docker", "", "Kubernetes AWS"]);

        let pages = pdf_extract::extract_text_by_pages(file.path()).unwrap();
        assert_eq!(pages.len(), 3);
        assert!(pages[0].contains("Python Docker"), "{pages:?}");
        assert!(pages[1].trim().is_empty(), "{pages:?}");
        assert!(pages[2].contains("Kubernetes AWS"), "{pages:?}");

        let text = extract_text(file.path()).unwrap();
        assert_eq!(text, pages.concat());
        let first = text.find("Python Docker").unwrap();
        let last = text.find("Kubernetes AWS").unwrap();
        assert!(first < last, "{text:?}");
    }

    #[test]
    fn test_single_page_pdf() {
        let file = write_pdf(&["Figma and Photoshop"]);
        let text = extract_text(file.path()).unwrap();
        assert!(text.contains("Figma and Photoshop"), "{text:?}");
    }

    #[test]
    fn test_panic_message_reads_string_payloads() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("bad xref");
        assert_eq!(panic_message(payload.as_ref()), "bad xref");

        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("bad font"));
        assert_eq!(panic_message(payload.as_ref()), "bad font");

        let payload: Box<dyn std::any::Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(payload.as_ref()), "PDF parser aborted");
    }
}
