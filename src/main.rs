mod acknowledgment;
mod canvas;
mod error;
mod form;
mod import;
mod metrics;
mod naming;
mod resource;
mod signature;
mod text;
mod transfer;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::error;

use crate::acknowledgment::AcknowledgmentPdf;
use crate::error::FormError;
use crate::form::{AcknowledgmentForm, TransferForm};
use crate::transfer::TransferPdf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generates Main Store PDF forms with a digital-signature placeholder field."
)]
struct Cli {
    /// Directory generated PDFs are written to. Defaults to `output/` next
    /// to the executable.
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an Acknowledgment of Receipt form.
    Acknowledgment {
        /// TOML form file with custodian details and item rows.
        #[arg(long)]
        form: PathBuf,

        /// Replace the form file's item rows with rows imported from an
        /// .xlsx spreadsheet.
        #[arg(long)]
        import: Option<PathBuf>,
    },
    /// Render an Asset Transfer Form (ATF).
    Transfer {
        /// TOML form file with both parties and asset rows.
        #[arg(long)]
        form: PathBuf,

        /// Replace the form file's asset rows with rows imported from an
        /// .xlsx spreadsheet.
        #[arg(long)]
        import: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();

    if let Err(err) = run(Cli::parse()) {
        error!("{err}");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), FormError> {
    let output_dir = cli.output_dir.unwrap_or_else(resource::output_dir);

    let path = match cli.command {
        Command::Acknowledgment { form, import } => {
            let mut form = AcknowledgmentForm::from_toml_file(&form)?;
            if let Some(sheet) = import {
                form.items = import::read_items(&sheet)?;
                form.normalize();
            }
            AcknowledgmentPdf::new().generate(&form, &output_dir)?
        }
        Command::Transfer { form, import } => {
            let mut form = TransferForm::from_toml_file(&form)?;
            if let Some(sheet) = import {
                form.assets = import::read_assets(&sheet)?;
                form.normalize();
            }
            TransferPdf::new().generate(&form, &output_dir)?
        }
    };

    println!("PDF generated: {}", path.display());
    Ok(())
}
