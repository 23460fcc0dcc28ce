//! CLI command definitions and handlers

use clap::{Args, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use crate::core::batch::BatchTranslator;
use crate::core::client::{GoogleTranslator, TranslationService};
use crate::core::config::TranslatorConfig;

/// Commands for the batch translator
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List supported language codes
    Languages,

    /// Detect the language of a text
    Detect {
        /// Text to inspect
        text: String,
    },

    /// Translate a single text
    Translate {
        /// Text to translate
        text: String,

        /// Source language code or name (default: auto)
        #[arg(short, long, default_value = "auto")]
        src: String,

        /// Destination language code or name (default: en)
        #[arg(short, long, default_value = "en")]
        dest: String,
    },

    /// Translate one column of a JSON or YAML dataset
    Dataset(DatasetArgs),

    /// Walk through catalog, detection and dataset translation
    Demo,

    /// Start HTTP API server
    Server {
        /// Bind address (default: 0.0.0.0)
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Listen port (default: 8000)
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
    },
}

/// Arguments of the dataset command
#[derive(Args, Debug, Clone)]
pub struct DatasetArgs {
    /// Input dataset file (.json, .yaml, .yml)
    #[arg(short, long)]
    pub file: PathBuf,

    /// Column holding the text to translate
    #[arg(short, long)]
    pub column: String,

    /// Name of the derived column
    #[arg(long, default_value = "TranslatedText")]
    pub output_column: String,

    /// Source language code or name (default: auto)
    #[arg(short, long, default_value = "auto")]
    pub src: String,

    /// Destination language code or name (default: en)
    #[arg(short, long, default_value = "en")]
    pub dest: String,

    /// Output file (default: <input>_translated.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum characters shown per cell (at least 4)
    #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(4..))]
    pub max_colwidth: Option<usize>,
}

impl DatasetArgs {
    /// Column translation job described by these arguments
    pub fn job(&self) -> crate::processors::dataset::ColumnJob {
        crate::processors::dataset::ColumnJob::new(self.column.clone(), self.dest.clone())
            .with_source_lang(self.src.clone())
            .with_target_column(self.output_column.clone())
    }

    /// Output path, defaulting to a sibling of the input file
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| crate::processors::dataset::DatasetProcessor::default_output_path(&self.file))
    }
}

fn batch_translator(config: &TranslatorConfig) -> anyhow::Result<BatchTranslator> {
    let service = GoogleTranslator::new(config.clone())?;
    Ok(BatchTranslator::new(Arc::new(service)))
}

/// Handle languages command
pub fn handle_languages(config: &TranslatorConfig) -> anyhow::Result<()> {
    use crate::cli::display::render_table;
    use crate::core::languages::LanguageCatalog;

    let rows: Vec<Vec<String>> = LanguageCatalog::global()
        .iter()
        .map(|(code, name)| vec![code.to_string(), name.to_string()])
        .collect();

    print!("{}", render_table(&["Code", "Language"], &rows, config.max_colwidth));
    Ok(())
}

/// Handle detect command
pub async fn handle_detect(config: &TranslatorConfig, text: String) -> anyhow::Result<()> {
    use crate::core::languages::LanguageCatalog;
    use tracing::info;

    info!("Detecting language of {} chars", text.chars().count());

    let translator = GoogleTranslator::new(config.clone())?;
    let detection = translator.detect(&text).await?;
    let name = LanguageCatalog::global()
        .get(&detection.lang)
        .unwrap_or("unknown");

    println!("Detected: {} ({}), confidence: {:.2}", detection.lang, name, detection.confidence);
    Ok(())
}

/// Handle translate command
pub async fn handle_translate(
    config: &TranslatorConfig,
    text: String,
    src: String,
    dest: String,
) -> anyhow::Result<()> {
    use tracing::info;

    let translator = GoogleTranslator::new(config.clone())?;
    let translation = translator.translate(&text, &src, &dest).await?;

    info!("Translated {} -> {}", translation.src, translation.dest);
    println!("{}", translation.text);
    if let Some(pronunciation) = translation.pronunciation {
        println!("({})", pronunciation);
    }
    Ok(())
}

/// Handle dataset translation command
pub async fn handle_dataset(config: &TranslatorConfig, args: DatasetArgs) -> anyhow::Result<()> {
    use crate::cli::display::render_table;
    use crate::processors::dataset::DatasetProcessor;
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::Instant;
    use tracing::info;

    let start_time = Instant::now();

    let file = args.file.clone();
    let output = args.output_path();
    let job = args.job();

    info!("Starting dataset translation");
    info!("Input: {}", file.display());
    info!("Output: {}", output.display());
    info!("Column: {} -> {}", job.source_column, job.target_column);
    info!("Languages: {} -> {}", job.source_lang, job.target_lang);

    let processor = DatasetProcessor::new(batch_translator(config)?);

    let pb = ProgressBar::new(0);
    pb.set_style(ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")?
        .progress_chars("=>-"));
    pb.set_message(format!("Translating: {}", file.display()));

    let table = match processor
        .translate_file(&file, Some(&output), &job, &pb)
        .await
    {
        Ok(table) => {
            pb.finish_with_message("Completed");
            table
        }
        Err(e) => {
            pb.abandon_with_message(format!("Failed: {}", e));
            return Err(e.into());
        }
    };

    let headers: Vec<&str> = table.columns().iter().map(String::as_str).collect();
    let width = args.max_colwidth.unwrap_or(config.max_colwidth);
    println!("\n{}", render_table(&headers, &table.display_rows(), width));

    let duration = start_time.elapsed();
    info!("Completed: {} rows in {:?}", table.len(), duration);

    println!("✅ Translation completed!");
    println!("   Rows: {}", table.len());
    println!("   Output: {}", output.display());
    println!("   Time: {:?}", duration);

    Ok(())
}

/// Handle demo command
pub async fn handle_demo(config: &TranslatorConfig) -> anyhow::Result<()> {
    use crate::cli::display::render_table;
    use crate::core::languages::LanguageCatalog;
    use crate::core::models::TextTable;
    use crate::processors::dataset::{ColumnJob, DatasetProcessor};
    use indicatif::ProgressBar;

    let catalog = LanguageCatalog::global();
    println!("📚 {} supported languages, e.g.:", catalog.len());
    let sample: Vec<Vec<String>> = catalog
        .iter()
        .take(5)
        .map(|(code, name)| vec![code.to_string(), name.to_string()])
        .collect();
    print!("{}", render_table(&["Code", "Language"], &sample, config.max_colwidth));

    let translator = GoogleTranslator::new(config.clone())?;

    let text = "Cerco un centro di gravità permanente";
    let detection = translator.detect(text).await?;
    println!(
        "\n🔎 \"{}\" looks like {} ({}), confidence {:.2}",
        text,
        detection.lang,
        catalog.get(&detection.lang).unwrap_or("unknown"),
        detection.confidence
    );

    let translation = translator.translate(text, "auto", "en").await?;
    println!("🌐 {}", translation.text);

    let table = TextTable::from_column(
        "EnglishText",
        vec![
            "Police in France say they have seized 140,000 face masks that were destined for sale on the black market.".to_string(),
            "Officers say they discovered the haul when they spotted a businessman unloading the masks from a lorry into a house in St Denis, north of Paris.".to_string(),
            "Prime Minister Boris Johnson could possibly lead the daily news conference on Monday but, if not then, it will be pretty soon afterwards.".to_string(),
        ],
    );

    let processor = DatasetProcessor::new(BatchTranslator::new(Arc::new(translator)));
    let job = ColumnJob::new("EnglishText", "it")
        .with_source_lang("en")
        .with_target_column("ItalianText");
    let table = processor
        .translate_table(table, &job, &ProgressBar::hidden())
        .await?;

    let headers: Vec<&str> = table.columns().iter().map(String::as_str).collect();
    println!("\n{}", render_table(&headers, &table.display_rows(), config.max_colwidth));

    Ok(())
}

/// Handle server command
pub async fn handle_server(config: &TranslatorConfig, host: String, port: u16) -> anyhow::Result<()> {
    use crate::server::api::run_server;
    use tracing::info;

    info!("Starting HTTP server on {}:{}", host, port);
    println!("🚀 Server starting on http://{}:{}", host, port);

    run_server(batch_translator(config)?, host, port).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(subcommand)]
        command: Commands,
    }

    fn parse_dataset(args: &[&str]) -> Result<DatasetArgs, clap::Error> {
        let mut argv = vec!["gtrans-batch", "dataset"];
        argv.extend_from_slice(args);
        match TestCli::try_parse_from(argv)?.command {
            Commands::Dataset(dataset) => Ok(dataset),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_dataset_args_build_job() {
        let args = parse_dataset(&[
            "--file", "news.json", "--column", "EnglishText",
            "--output-column", "ItalianText", "--src", "en", "--dest", "it",
        ])
        .unwrap();

        let job = args.job();
        assert_eq!(job.source_column, "EnglishText");
        assert_eq!(job.target_column, "ItalianText");
        assert_eq!(job.source_lang, "en");
        assert_eq!(job.target_lang, "it");
        assert_eq!(args.output_path(), PathBuf::from("news_translated.json"));
    }

    #[test]
    fn test_dataset_args_defaults() {
        let args = parse_dataset(&["-f", "data.yaml", "-c", "SourceText"]).unwrap();

        let job = args.job();
        assert_eq!(job.target_column, "TranslatedText");
        assert_eq!(job.source_lang, "auto");
        assert_eq!(job.target_lang, "en");
        assert_eq!(args.max_colwidth, None);
    }

    #[test]
    fn test_max_colwidth_lower_bound() {
        assert!(parse_dataset(&["-f", "d.json", "-c", "A", "--max-colwidth", "0"]).is_err());
        assert!(parse_dataset(&["-f", "d.json", "-c", "A", "--max-colwidth", "3"]).is_err());

        let args = parse_dataset(&["-f", "d.json", "-c", "A", "--max-colwidth", "4"]).unwrap();
        assert_eq!(args.max_colwidth, Some(4));
    }
}
