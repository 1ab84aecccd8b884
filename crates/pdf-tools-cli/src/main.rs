use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use pdf_images::{ImagesOptions, SelectedFile};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdft", about = "PDF tools CLI", version)]
struct Cli {
    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Combine PNG/JPEG images into a PDF, one centered image per page
    Images {
        /// Input image files, in page order
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// JSON options file; flags below override its values
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output paper size
        #[arg(long, value_enum)]
        paper: Option<PaperArg>,

        /// Output orientation
        #[arg(long, value_enum)]
        orientation: Option<OrientationArg>,

        /// Document title
        #[arg(long)]
        title: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

impl From<PaperArg> for pdf_images::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<OrientationArg> for pdf_images::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Images {
            input,
            output,
            config,
            paper,
            orientation,
            title,
        } => {
            let mut options = match config {
                Some(path) => ImagesOptions::load(&path)
                    .await
                    .with_context(|| format!("Loading {}", path.display()))?,
                None => ImagesOptions::default(),
            };
            if let Some(paper) = paper {
                options.paper_size = paper.into();
            }
            if let Some(orientation) = orientation {
                options.orientation = orientation.into();
            }
            if let Some(title) = title {
                options.title = title;
            }

            let files = input
                .iter()
                .map(SelectedFile::from_path)
                .collect::<pdf_images::Result<Vec<_>>>()?;
            log::info!(
                "Combining {} images on {:?} {:?} pages",
                files.len(),
                options.paper_size,
                options.orientation
            );

            let page_count = pdf_images::generate_pdf(&files, &options, &output).await?;
            println!("Generated {} pages → {}", page_count, output.display());
        }
    }

    Ok(())
}
