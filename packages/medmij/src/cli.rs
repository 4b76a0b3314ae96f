//! Command-line interface for the medmij client.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{is_medmij_naam, DEFAULT_LIJST_URL};
use crate::error::Result;
use crate::http::create_client;
use crate::types::Zorgaanbieder;
use crate::zorgaanbiederslijst::{download_zorgaanbiederslijst_xml, ZorgaanbiedersCollection};

/// MedMij zorgaanbiederslijst client.
#[derive(Parser)]
#[command(name = "medmij")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download the published lijst, validate it and show a summary.
    Fetch {
        /// URL to download the lijst from
        #[arg(short, long, default_value = DEFAULT_LIJST_URL)]
        url: String,

        /// Write the raw XML to this file after validation
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a lijst document on disk.
    Validate {
        /// Path to the lijst XML file
        file: PathBuf,
    },

    /// Show all zorgaanbieders in a lijst document.
    List {
        /// Path to the lijst XML file
        file: PathBuf,

        /// Print the parsed lijst as JSON
        #[arg(long)]
        json: bool,
    },

    /// Look up one zorgaanbieder by name.
    Get {
        /// Path to the lijst XML file
        file: PathBuf,

        /// Name of the zorgaanbieder (ends with @medmij)
        naam: String,

        /// Print the zorgaanbieder as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch { url, output } => fetch_command(&url, output.as_deref()),
        Commands::Validate { file } => validate_command(&file),
        Commands::List { file, json } => list_command(&file, json),
        Commands::Get { file, naam, json } => get_command(&file, &naam, json),
    }
}

/// Execute the fetch command.
fn fetch_command(url: &str, output: Option<&Path>) -> Result<()> {
    println!("{} {}", style("Downloading").bold(), style(url).cyan());

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Downloading zorgaanbiederslijst...");
    let client = create_client()?;
    let download = download_zorgaanbiederslijst_xml(&client, url);

    pb.set_message("Validating...");
    let result = download.and_then(|xml| {
        ZorgaanbiedersCollection::from_xml_data(&xml).map(|collection| (xml, collection))
    });
    pb.finish_and_clear();
    let (xml, collection) = result?;

    if let Some(path) = output {
        fs::write(path, &xml)?;
        println!("Saved lijst to {}", style(path.display()).green());
    }

    print_summary(&collection);
    Ok(())
}

/// Execute the validate command.
fn validate_command(file: &Path) -> Result<()> {
    let collection = load_lijst(file)?;
    println!(
        "{} {} is a valid zorgaanbiederslijst ({} zorgaanbieders)",
        style("OK").green().bold(),
        file.display(),
        collection.len()
    );
    Ok(())
}

/// Execute the list command.
fn list_command(file: &Path, json: bool) -> Result<()> {
    let collection = load_lijst(file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&collection)?);
        return Ok(());
    }

    print_summary(&collection);
    Ok(())
}

/// Execute the get command.
fn get_command(file: &Path, naam: &str, json: bool) -> Result<()> {
    let collection = load_lijst(file)?;

    if !is_medmij_naam(naam) {
        tracing::warn!(naam, "Name does not end with '@medmij'; lijst names follow that convention");
    }
    let zorgaanbieder = collection.get_by_name(naam)?;

    if json {
        println!("{}", serde_json::to_string_pretty(zorgaanbieder)?);
        return Ok(());
    }

    print_zorgaanbieder(zorgaanbieder);
    Ok(())
}

/// Read and parse a lijst document from disk.
fn load_lijst(file: &Path) -> Result<ZorgaanbiedersCollection> {
    let xml = fs::read_to_string(file)?;
    ZorgaanbiedersCollection::from_xml_data(&xml)
}

fn print_summary(collection: &ZorgaanbiedersCollection) {
    println!(
        "{} zorgaanbieders on the lijst",
        style(collection.len()).green().bold()
    );
    for zorgaanbieder in collection {
        print_zorgaanbieder(zorgaanbieder);
    }
}

fn print_zorgaanbieder(zorgaanbieder: &Zorgaanbieder) {
    println!();
    println!("  {}", style(&zorgaanbieder.naam).cyan().bold());
    for dienst in zorgaanbieder.gegevensdiensten.values() {
        println!("    {} {}", style("gegevensdienst").dim(), dienst.id);
        println!("      authorization: {}", dienst.authorization_endpoint_uri);
        println!("      token:         {}", dienst.token_endpoint_uri);
    }
}
