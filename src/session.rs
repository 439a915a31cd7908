//! Request handling for a single user action.
//!
//! [`handle`] turns a submission into an [`Outcome`] of plain data. It never
//! fails: problems become [`Notice`]s for the presentation layer to show.

use crate::agent::{self, Summarizer};
use crate::analytics::{self, WordCount};
use crate::config::{Config, ConfigError, API_KEY_VAR};
use crate::source::{self, SourceError, Submission};
use crate::summary::Summary;
use crate::wordcloud::{WordCloud, WordCloudOptions};
use serde::Serialize;
use tracing::{info, warn};

pub const EMPTY_INPUT_WARNING: &str = "Por favor, insira um texto para gerar o resumo.";

/// A message for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "level", content = "message", rename_all = "lowercase")]
pub enum Notice {
    Warning(String),
    Error(String),
}

impl Notice {
    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Warning(m) | Notice::Error(m) => m,
        }
    }
}

/// What to do with the acquired text
#[derive(Debug, Clone)]
pub struct Options {
    pub summarize: bool,
    pub analytics: bool,
    pub top_n: usize,
    pub max_words: usize,
}

impl Options {
    pub fn from_config(config: &Config) -> Self {
        Self {
            summarize: true,
            analytics: true,
            top_n: config.analytics.top_n,
            max_words: config.analytics.max_words,
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Analytics {
    pub top_words: Vec<WordCount>,
    #[serde(skip)]
    pub word_cloud: WordCloud,
}

/// Result of one submission
#[derive(Debug, Clone, Default, Serialize)]
pub struct Outcome {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics: Option<Analytics>,
    pub notices: Vec<Notice>,
}

impl Outcome {
    pub fn has_errors(&self) -> bool {
        self.notices.iter().any(Notice::is_error)
    }

    fn notice(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }
}

/// Handle one submission.
///
/// The summariser is `None` when no credential is configured; asking for a
/// summary then yields an error notice and no service call.
pub async fn handle(
    submission: &Submission,
    summarizer: Option<&dyn Summarizer>,
    options: &Options,
) -> Outcome {
    let document = match source::acquire(submission).await {
        Ok(document) => document,
        Err(e) => {
            warn!(error = %e, "acquisition failed");
            return Outcome::default().notice(Notice::Error(acquisition_message(&e)));
        }
    };

    if document.is_empty() {
        info!(mode = %submission.mode(), "empty input, nothing to do");
        return Outcome::default().notice(Notice::Warning(EMPTY_INPUT_WARNING.to_string()));
    }

    let mut outcome = Outcome {
        text: document.text,
        title: document.title,
        ..Default::default()
    };

    if options.summarize {
        match summarizer {
            Some(summarizer) => match agent::summarize(summarizer, &outcome.text).await {
                Ok(summary) => outcome.summary = Some(summary),
                Err(e) => {
                    warn!(error = %e, "summarisation failed");
                    outcome
                        .notices
                        .push(Notice::Error(format!("Erro ao gerar o resumo: {}", e)));
                }
            },
            None => outcome.notices.push(Notice::Error(
                ConfigError::MissingApiKey(API_KEY_VAR.to_string()).to_string(),
            )),
        }
    }

    if options.analytics {
        outcome.analytics = Some(analyze(&outcome.text, options));
    }

    outcome
}

/// Top-N listing and word cloud. Each re-tokenises the text.
pub fn analyze(text: &str, options: &Options) -> Analytics {
    let cloud_options = WordCloudOptions {
        max_words: options.max_words,
        ..Default::default()
    };

    Analytics {
        top_words: analytics::top_words(text, options.top_n),
        word_cloud: WordCloud::from_text(text, &cloud_options),
    }
}

fn acquisition_message(error: &SourceError) -> String {
    match error {
        SourceError::Fetch(e) => format!("Erro ao acessar a URL: {}", e),
        SourceError::Extract(e) => format!("Erro ao extrair o texto: {}", e),
    }
}
