//! PDF text extraction via pdf-extract.
//!
//! Scanned (image-only) PDFs yield little or no text; no OCR is performed.

use super::ExtractError;
use tracing::debug;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Extract the text of every page, concatenated in page order.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    if !is_pdf(bytes) {
        return Err(ExtractError::NotPdf);
    }

    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ExtractError::Pdf(e.to_string()))?;
    debug!(pages = pages.len(), "extracted pdf pages");

    Ok(join_pages(&pages))
}

/// True if the buffer starts with the PDF header.
pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
}

fn join_pages(pages: &[String]) -> String {
    pages.concat()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal uncompressed PDF with one line of Helvetica text per page
    fn build_pdf(pages: &[&str]) -> Vec<u8> {
        let page_id = |i: usize| 4 + 2 * i;
        let kids: Vec<String> = (0..pages.len())
            .map(|i| format!("{} 0 R", page_id(i)))
            .collect();

        let mut objects = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids.join(" "),
                pages.len()
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        ];
        for (i, text) in pages.iter().enumerate() {
            let stream = format!("BT /F1 24 Tf 72 720 Td ({}) Tj ET", text);
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                page_id(i) + 1
            ));
            objects.push(format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                stream.len(),
                stream
            ));
        }

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, object) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, object).as_bytes());
        }

        let xref = pdf.len();
        pdf.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
        for offset in offsets {
            pdf.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                xref
            )
            .as_bytes(),
        );
        pdf
    }

    #[test]
    fn test_extracts_every_page_in_order() {
        let bytes = build_pdf(&["Primeira", "Segunda", "Terceira"]);

        let text = extract_pdf(&bytes).unwrap();

        let positions: Vec<usize> = ["Primeira", "Segunda", "Terceira"]
            .iter()
            .map(|page| text.find(page).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_join_pages_keeps_page_order() {
        let pages = vec![
            "primeira página\n".to_string(),
            "segunda".to_string(),
            String::new(),
            "terceira".to_string(),
        ];
        assert_eq!(join_pages(&pages), "primeira página\nsegundaterceira");
    }

    #[test]
    fn test_rejects_non_pdf_bytes() {
        let result = extract_pdf(b"PK\x03\x04 definitely a zip");
        assert!(matches!(result, Err(ExtractError::NotPdf)));
    }

    #[test]
    fn test_rejects_empty_buffer() {
        assert!(matches!(extract_pdf(&[]), Err(ExtractError::NotPdf)));
    }

    #[test]
    fn test_is_pdf() {
        assert!(is_pdf(b"%PDF-1.7\n..."));
        assert!(!is_pdf(b"<html>"));
    }
}
