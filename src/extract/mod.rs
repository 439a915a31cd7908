//! Text extraction from uploaded documents.
//!
//! Both extractors work on bytes already read into memory.

pub mod docx;
pub mod pdf;

pub use docx::extract_docx;
pub use pdf::extract_pdf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("not a PDF document")]
    NotPdf,
    #[error("failed to extract PDF text: {0}")]
    Pdf(String),
    #[error("failed to open Word document: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("Word document has no {0} part")]
    MissingPart(&'static str),
    #[error("malformed Word document XML: {0}")]
    Xml(String),
}
