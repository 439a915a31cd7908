//! Interactive terminal session using dialoguer.
//!
//! A thin adapter: it collects a submission, hands it to
//! [`session::handle`], and prints whatever comes back.

use crate::agent::{GeminiSummarizer, Summarizer};
use crate::analytics;
use crate::config::Config;
use crate::session::{self, Notice, Options, Outcome};
use crate::source::{InputMode, Submission};
use crate::wordcloud::WordCloud;
use anyhow::Context;
use chrono::Local;
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const TITLE: &str = "Aplicação de Resumo de Texto com Google Gemini";
const EXIT_LABEL: &str = "Sair";

/// Run the interactive session until the user picks "Sair"
pub async fn run(config: &Config) -> anyhow::Result<()> {
    if !atty::is(atty::Stream::Stdin) {
        anyhow::bail!("the interactive session needs a terminal; use `resumo summarise` instead");
    }

    let theme = ColorfulTheme::default();
    println!("{}\n", TITLE.bold());

    // A missing key is reported once; the summary path stays off afterwards.
    let summarizer = match GeminiSummarizer::from_config(config) {
        Ok(summarizer) => Some(summarizer),
        Err(e) => {
            print_notice(&Notice::Error(e.to_string()));
            None
        }
    };
    let summarizer: Option<&dyn Summarizer> = summarizer.as_ref().map(|s| s as &dyn Summarizer);

    let mut items: Vec<&str> = InputMode::ALL.iter().map(|mode| mode.label()).collect();
    items.push(EXIT_LABEL);

    loop {
        let choice = Select::with_theme(&theme)
            .with_prompt("Escolha a fonte do texto")
            .items(&items)
            .default(0)
            .interact()?;

        let Some(mode) = InputMode::ALL.get(choice).copied() else {
            break;
        };

        let submission = match prompt_submission(mode, &theme) {
            Ok(submission) => submission,
            Err(e) => {
                print_notice(&Notice::Error(format!("{:#}", e)));
                continue;
            }
        };

        let button = match mode {
            InputMode::Text => "Gerar Resumo",
            _ => "Enviar",
        };
        if !Confirm::with_theme(&theme)
            .with_prompt(button)
            .default(true)
            .interact()?
        {
            continue;
        }

        let options = Options {
            summarize: summarizer.is_some(),
            ..Options::from_config(config)
        };
        let outcome = session::handle(&submission, summarizer, &options).await;
        render(&outcome, config);
    }

    Ok(())
}

/// Ask for the payload of the selected mode
fn prompt_submission(mode: InputMode, theme: &ColorfulTheme) -> anyhow::Result<Submission> {
    let submission = match mode {
        InputMode::Text => {
            let typed: String = Input::<String>::with_theme(theme)
                .with_prompt("Digite o texto que deseja resumir (vazio abre o editor)")
                .allow_empty(true)
                .interact_text()?;
            if typed.is_empty() {
                Submission::Text(edit::edit("").context("failed to open editor")?)
            } else {
                Submission::Text(typed)
            }
        }
        InputMode::Pdf | InputMode::Word => {
            let path: String = Input::<String>::with_theme(theme)
                .with_prompt(format!("{}: caminho do arquivo", mode.label()))
                .allow_empty(true)
                .interact_text()?;
            Submission::from_input(mode, &path)
                .with_context(|| format!("failed to read {}", path.trim()))?
        }
        InputMode::Url => {
            let url: String = Input::<String>::with_theme(theme)
                .with_prompt("Digite a URL")
                .allow_empty(true)
                .interact_text()?;
            Submission::Url(url.trim().to_string())
        }
    };

    debug!(mode = %mode, "collected submission");
    Ok(submission)
}

/// Print an outcome; the word cloud goes to an SVG file.
///
/// Failing to save the cloud is reported like any other error and the
/// session carries on.
pub fn render(outcome: &Outcome, config: &Config) {
    for notice in &outcome.notices {
        print_notice(notice);
    }

    if let Some(title) = &outcome.title {
        println!("\n=== {} ===", title);
    }

    if let Some(summary) = &outcome.summary {
        println!("\n{}", "Resumo Gerado:".green().bold());
        println!("{}", summary.text);
    }

    if let Some(stats) = &outcome.analytics {
        println!("\n{}", "Palavras mais frequentes:".cyan().bold());
        println!("{}", analytics::format_top_words(&stats.top_words));

        match save_cloud(&stats.word_cloud, &config.output.dir) {
            Ok(path) => println!("\n{} {}", "Nuvem de palavras:".cyan().bold(), path.display()),
            Err(e) => {
                warn!(error = %e, "could not save word cloud");
                print_notice(&Notice::Error(format!("{:#}", e)));
            }
        }
    }

    println!();
}

fn save_cloud(cloud: &WordCloud, dir: &Path) -> anyhow::Result<PathBuf> {
    let path = cloud_path(dir);
    std::fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    std::fs::write(&path, cloud.to_svg())
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

pub fn print_notice(notice: &Notice) {
    match notice {
        Notice::Warning(message) => eprintln!("{} {}", "Aviso:".yellow().bold(), message),
        Notice::Error(message) => eprintln!("{} {}", "Erro:".red().bold(), message),
    }
}

fn cloud_path(dir: &Path) -> PathBuf {
    dir.join(format!("nuvem-{}.svg", Local::now().format("%Y%m%d-%H%M%S")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordcloud::WordCloudOptions;

    #[test]
    fn test_save_cloud_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let cloud = WordCloud::from_text("gato gato", &WordCloudOptions::default());

        let path = save_cloud(&cloud, &dir.path().join("nuvens")).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains(">gato</text>"));
    }

    #[test]
    fn test_save_cloud_into_a_file_is_an_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let cloud = WordCloud::from_text("gato", &WordCloudOptions::default());

        let err = save_cloud(&cloud, file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to"));
    }
}
