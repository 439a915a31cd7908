//! Summary struct - the output of the summarisation agent.

use serde::{Deserialize, Serialize};

/// Summary text returned by the model, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Model identifier the summary was requested from
    pub model: String,
    /// Response text, exactly as the service returned it
    pub text: String,
}

impl Summary {
    /// Create a new summary
    pub fn new(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            text: text.into(),
        }
    }
}
