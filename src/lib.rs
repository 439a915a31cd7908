//! # Resumo
//!
//! Summarise typed text, PDF and Word documents, and web pages with Gemini.
//!
//! ## Features
//!
//! - **Four sources**: typed text, PDF, Word (.docx), or a URL's paragraphs
//! - **Pluggable model**: any [`agent::Summarizer`] can stand in for Gemini
//! - **Word statistics**: top-20 frequency listing and an SVG word cloud

pub mod agent;
pub mod analytics;
pub mod config;
pub mod extract;
pub mod scraper;
pub mod session;
pub mod source;
pub mod summary;
pub mod ui;
pub mod wordcloud;

pub use agent::{GeminiSummarizer, Summarizer};
pub use config::Config;
pub use session::{handle, Notice, Options, Outcome};
pub use source::{InputMode, Submission};
pub use summary::Summary;
