use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reqsift::services::extraction::{ExtractionConfig, ExtractionService, SofficeConverter};
use reqsift::services::generation::{GenerationConfig, OpenAiGenerator};
use reqsift::services::normalizer;
use reqsift::services::pipeline::ProcessingService;

/// Trích xuất yêu cầu kỹ thuật từ hồ sơ mời thầu.
#[derive(Parser)]
#[command(name = "reqsift", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract the page-tagged transcript of a document.
    Extract {
        /// Document to extract (.pdf, .docx or .doc).
        input: PathBuf,
    },
    /// Normalize requirement markdown into structured JSON.
    Normalize {
        /// Markdown file to normalize.
        input: PathBuf,
    },
    /// Run a document through the full pipeline.
    Process {
        /// Document to process (.pdf, .docx or .doc).
        input: PathBuf,
        /// Directory for the .md and .json artifacts (defaults to the
        /// input's directory).
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reqsift=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Extract { input } => {
            let config = ExtractionConfig::from_env();
            config.validate()?;
            let converter = SofficeConverter::from_config(&config);
            let service = ExtractionService::new(config);

            let transcript = service.extract_document(&input, &converter).await?;
            println!("{}", transcript.render());
        }
        Command::Normalize { input } => {
            let markdown = tokio::fs::read_to_string(&input).await?;
            let items = normalizer::normalize(&markdown);
            println!("{}", normalizer::to_json(&items)?);
        }
        Command::Process { input, out_dir } => {
            let config = ExtractionConfig::from_env();
            config.validate()?;
            let converter = SofficeConverter::from_config(&config);
            let generator = OpenAiGenerator::new(GenerationConfig::from_env()?);
            let service = ProcessingService::new(config, converter, generator);

            let outcome = service.process_file(&input).await?;

            let out_dir = match out_dir {
                Some(dir) => {
                    tokio::fs::create_dir_all(&dir).await?;
                    dir
                }
                None => input.parent().unwrap_or(&input).to_path_buf(),
            };
            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "output".to_string());

            let md_path = out_dir.join(format!("{stem}.md"));
            let json_path = out_dir.join(format!("{stem}.json"));

            tokio::fs::write(&md_path, &outcome.markdown).await?;
            tokio::fs::write(&json_path, normalizer::to_json(&outcome.items)?).await?;

            info!(
                markdown = %md_path.display(),
                json = %json_path.display(),
                items = outcome.items.len(),
                time_ms = outcome.time_ms,
                "artifacts written"
            );
            println!("{}", json_path.display());
        }
    }

    Ok(())
}
