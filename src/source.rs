//! Input acquisition: one of four sources produces the document text.

use crate::extract::{self, ExtractError};
use crate::scraper::{self, ScraperError};
use clap::ValueEnum;
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Where the document text comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputMode {
    /// Typed text
    Text,
    /// A PDF file
    Pdf,
    /// A Word (.docx) file
    Word,
    /// A web page
    Url,
}

impl InputMode {
    pub const ALL: [InputMode; 4] = [
        InputMode::Text,
        InputMode::Pdf,
        InputMode::Word,
        InputMode::Url,
    ];

    /// Label shown in the selection control
    pub fn label(&self) -> &'static str {
        match self {
            InputMode::Text => "Texto",
            InputMode::Pdf => "Upload de PDF",
            InputMode::Word => "Upload de Word",
            InputMode::Url => "URL",
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The payload submitted for the selected mode.
///
/// `None` for uploads means nothing was uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Text(String),
    Pdf(Option<Vec<u8>>),
    Word(Option<Vec<u8>>),
    Url(String),
}

impl Submission {
    pub fn mode(&self) -> InputMode {
        match self {
            Submission::Text(_) => InputMode::Text,
            Submission::Pdf(_) => InputMode::Pdf,
            Submission::Word(_) => InputMode::Word,
            Submission::Url(_) => InputMode::Url,
        }
    }

    /// Build a submission from a raw user value: the text itself, a file path,
    /// or a URL. Blank paths mean nothing was uploaded.
    pub fn from_input(mode: InputMode, input: &str) -> std::io::Result<Self> {
        Ok(match mode {
            InputMode::Text => Submission::Text(input.to_string()),
            InputMode::Pdf => Submission::Pdf(read_upload(input)?),
            InputMode::Word => Submission::Word(read_upload(input)?),
            InputMode::Url => Submission::Url(input.trim().to_string()),
        })
    }
}

/// Read an uploaded file fully into memory
pub fn read_upload(path: &str) -> std::io::Result<Option<Vec<u8>>> {
    let path = path.trim();
    if path.is_empty() {
        return Ok(None);
    }
    std::fs::read(Path::new(path)).map(Some)
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Fetch(#[from] ScraperError),
}

/// Text acquired from a submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub text: String,
    /// Page title, for URLs
    pub title: Option<String>,
}

impl Document {
    fn from_text(text: String) -> Self {
        Self { text, title: None }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Run the extraction matching the submission. Only that one runs.
pub async fn acquire(submission: &Submission) -> Result<Document, SourceError> {
    let document = match submission {
        Submission::Text(text) => Document::from_text(text.clone()),
        Submission::Pdf(None) | Submission::Word(None) => Document::default(),
        Submission::Pdf(Some(bytes)) => Document::from_text(extract::extract_pdf(bytes)?),
        Submission::Word(Some(bytes)) => Document::from_text(extract::extract_docx(bytes)?),
        Submission::Url(url) if url.trim().is_empty() => Document::default(),
        Submission::Url(url) => {
            let content = scraper::fetch_content(url).await?;
            Document {
                text: content.text,
                title: content.title,
            }
        }
    };

    info!(
        mode = %submission.mode(),
        chars = document.text.len(),
        "acquired document text"
    );
    Ok(document)
}
