//! Word (.docx) text extraction.
//!
//! DOCX files are ZIP archives; the body lives in `word/document.xml`. Only
//! top-level body paragraphs are read, so table cells and text boxes are
//! skipped. Each paragraph contributes its run text followed by a newline.

use super::ExtractError;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::io::{BufRead, BufReader, Cursor};
use tracing::debug;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extract paragraph text from an in-memory .docx file.
///
/// The result is `P1\nP2\n...Pk\n`.
pub fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let document = archive
        .by_name(DOCUMENT_PART)
        .map_err(|_| ExtractError::MissingPart(DOCUMENT_PART))?;

    let paragraphs = read_paragraphs(BufReader::new(document))?;
    debug!(paragraphs = paragraphs.len(), "extracted docx paragraphs");

    Ok(join_paragraphs(&paragraphs))
}

fn join_paragraphs(paragraphs: &[String]) -> String {
    let mut text = String::with_capacity(paragraphs.iter().map(|p| p.len() + 1).sum());
    for paragraph in paragraphs {
        text.push_str(paragraph);
        text.push('\n');
    }
    text
}

/// Stream document.xml and collect the text of each body paragraph
fn read_paragraphs<R: BufRead>(source: R) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::with_capacity(1024);

    // local names of the currently open elements
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut open_paragraphs = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = e.local_name().as_ref().to_vec();
                if name == b"p" {
                    open_paragraphs += 1;
                    if open_paragraphs == 1 && parent_is(&stack, b"body") {
                        current = Some(String::new());
                    }
                }
                stack.push(name);
            }
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"p" if open_paragraphs == 0 && parent_is(&stack, b"body") => {
                    paragraphs.push(String::new());
                }
                b"tab" if in_run(&stack, open_paragraphs) => {
                    if let Some(paragraph) = current.as_mut() {
                        paragraph.push('\t');
                    }
                }
                b"br" | b"cr" if in_run(&stack, open_paragraphs) => {
                    if let Some(paragraph) = current.as_mut() {
                        paragraph.push('\n');
                    }
                }
                _ => {}
            },
            Ok(Event::End(_)) => {
                let name = stack.pop().unwrap_or_default();
                if name == b"p" {
                    open_paragraphs = open_paragraphs.saturating_sub(1);
                    if open_paragraphs == 0 {
                        if let Some(paragraph) = current.take() {
                            paragraphs.push(paragraph);
                        }
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if in_text(&stack, open_paragraphs) {
                    if let Some(paragraph) = current.as_mut() {
                        paragraph.push_str(&String::from_utf8_lossy(&e));
                    }
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if in_text(&stack, open_paragraphs) {
                    if let Some(paragraph) = current.as_mut() {
                        match e.resolve_char_ref() {
                            Ok(Some(c)) => paragraph.push(c),
                            Ok(None) => {
                                let name = e.decode().map_err(|err| ExtractError::Xml(err.to_string()))?;
                                match resolve_predefined_entity(&name) {
                                    Some(value) => paragraph.push_str(value),
                                    // unknown entities are kept verbatim
                                    None => {
                                        paragraph.push('&');
                                        paragraph.push_str(&name);
                                        paragraph.push(';');
                                    }
                                }
                            }
                            Err(err) => return Err(ExtractError::Xml(err.to_string())),
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

fn parent_is(stack: &[Vec<u8>], name: &[u8]) -> bool {
    matches!(stack.last(), Some(last) if last.as_slice() == name)
}

/// Inside a run of the top-level paragraph
fn in_run(stack: &[Vec<u8>], open_paragraphs: usize) -> bool {
    open_paragraphs == 1 && parent_is(stack, b"r")
}

/// Inside a `w:t` of the top-level paragraph
fn in_text(stack: &[Vec<u8>], open_paragraphs: usize) -> bool {
    open_paragraphs == 1 && parent_is(stack, b"t")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(inner: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}<w:sectPr/></w:body></w:document>"#,
            inner
        )
    }

    fn paragraphs_of(inner: &str) -> Vec<String> {
        read_paragraphs(body(inner).as_bytes()).unwrap()
    }

    #[test]
    fn test_runs_are_concatenated() {
        let paragraphs = paragraphs_of(
            r#"<w:p><w:pPr><w:pStyle w:val="Title"/></w:pPr><w:r><w:t>Olá, </w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>mundo</w:t></w:r></w:p>"#,
        );
        assert_eq!(paragraphs, vec!["Olá, mundo"]);
    }

    #[test]
    fn test_empty_paragraphs_are_kept() {
        let paragraphs =
            paragraphs_of(r#"<w:p><w:r><w:t>um</w:t></w:r></w:p><w:p/><w:p></w:p><w:p><w:r><w:t>dois</w:t></w:r></w:p>"#);
        assert_eq!(paragraphs, vec!["um", "", "", "dois"]);
    }

    #[test]
    fn test_tabs_and_breaks() {
        let paragraphs = paragraphs_of(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t></w:r></w:p>"#,
        );
        assert_eq!(paragraphs, vec!["a\tb\nc"]);
    }

    #[test]
    fn test_entities_are_resolved() {
        let paragraphs =
            paragraphs_of(r#"<w:p><w:r><w:t xml:space="preserve">Tom &amp; Jerry &lt;3 &#233;</w:t></w:r></w:p>"#);
        assert_eq!(paragraphs, vec!["Tom & Jerry <3 é"]);
    }

    #[test]
    fn test_tables_are_skipped() {
        let paragraphs = paragraphs_of(
            r#"<w:p><w:r><w:t>antes</w:t></w:r></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>célula</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p><w:r><w:t>depois</w:t></w:r></w:p>"#,
        );
        assert_eq!(paragraphs, vec!["antes", "depois"]);
    }

    #[test]
    fn test_deleted_text_is_skipped() {
        let paragraphs = paragraphs_of(
            r#"<w:p><w:del><w:r><w:delText>velho</w:delText></w:r></w:del><w:ins><w:r><w:t>novo</w:t></w:r></w:ins></w:p>"#,
        );
        assert_eq!(paragraphs, vec!["novo"]);
    }

    #[test]
    fn test_join_paragraphs() {
        let paragraphs = vec!["P1".to_string(), String::new(), "P3".to_string()];
        assert_eq!(join_paragraphs(&paragraphs), "P1\n\nP3\n");
        assert_eq!(join_paragraphs(&[]), "");
    }

    #[test]
    fn test_hex_and_unknown_entities() {
        let paragraphs =
            paragraphs_of(r#"<w:p><w:r><w:t>&quot;&#x41;&quot; &nbsp;</w:t></w:r></w:p>"#);
        assert_eq!(paragraphs, vec!["\"A\" &nbsp;"]);
    }

    #[test]
    fn test_not_a_zip() {
        let result = extract_docx(b"%PDF-1.4 not a docx");
        assert!(matches!(result, Err(ExtractError::Archive(_))));
    }
}
