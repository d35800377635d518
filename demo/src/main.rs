//! Command-line runner that shows each nfdkit dialog and prints the result.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use nfdkit_dialog::{Encoding, FileDialog, Filter};
use owo_colors::OwoColorize;

#[derive(Debug, Parser)]
#[command(name = "nfdkit-demo")]
#[command(about = "Show native file dialogs from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Pick one file
    Open(Common),
    /// Pick several files
    OpenMany(Common),
    /// Choose a file to save to
    Save {
        #[command(flatten)]
        common: Common,
        /// Suggested file name
        #[arg(long)]
        name: Option<String>,
    },
    /// Pick a folder
    Folder {
        /// Starting directory
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct Common {
    /// Starting directory
    #[arg(long)]
    path: Option<PathBuf>,
    /// Filter as NAME=SPEC, e.g. Images=png,jpg (repeatable)
    #[arg(long = "filter", value_parser = parse_filter)]
    filters: Vec<Filter>,
}

fn parse_filter(raw: &str) -> Result<Filter, String> {
    let (name, spec) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=SPEC, got `{raw}`"))?;
    if name.is_empty() || spec.is_empty() {
        return Err(format!("filter name and spec must be non-empty in `{raw}`"));
    }
    Ok(Filter::new(name, spec))
}

fn build(path: Option<PathBuf>, filters: Vec<Filter>) -> FileDialog {
    let mut dialog = FileDialog::new();
    if let Some(path) = path {
        dialog = dialog.set_location(path);
    }
    filters
        .into_iter()
        .fold(dialog, |dialog, filter| dialog.with_filter(filter))
}

#[cfg(feature = "native")]
fn run(command: Commands) -> Result<Vec<PathBuf>> {
    let picked = match command {
        Commands::Open(common) => build(common.path, common.filters)
            .show_open_single_file()?
            .into_iter()
            .collect(),
        Commands::OpenMany(common) => {
            build(common.path, common.filters).show_open_multiple_files()?
        }
        Commands::Save { common, name } => {
            let mut dialog = build(common.path, common.filters);
            if let Some(name) = name {
                dialog = dialog.set_file_name(name);
            }
            dialog.show_save_single_file()?.into_iter().collect()
        }
        Commands::Folder { path } => build(path, Vec::new())
            .show_pick_folder()?
            .into_iter()
            .collect(),
    };
    Ok(picked)
}

#[cfg(not(feature = "native"))]
fn run(command: Commands) -> Result<Vec<PathBuf>> {
    let dialog = match command {
        Commands::Open(common) | Commands::OpenMany(common) | Commands::Save { common, .. } => {
            build(common.path, common.filters)
        }
        Commands::Folder { path } => build(path, Vec::new()),
    };
    log::debug!("would show {dialog:?}");
    anyhow::bail!("nfdkit-demo was built without a native backend; rebuild with `--features native`")
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let banner = format!("Showing dialog ({} strings)...", Encoding::native());
    println!("{}", banner.green().bold());

    let picked = run(cli.command).context("Dialog failed")?;

    if picked.is_empty() {
        println!("{}", "Nothing selected (cancelled).".yellow());
    }
    for path in picked {
        println!("{}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_argument_splits_on_first_equals() {
        assert_eq!(
            parse_filter("Images=png,jpg").unwrap(),
            Filter::new("Images", "png,jpg")
        );
        assert_eq!(parse_filter("A=b=c").unwrap(), Filter::new("A", "b=c"));
    }

    #[test]
    fn malformed_filter_argument_is_rejected() {
        assert!(parse_filter("Images").is_err());
        assert!(parse_filter("=png").is_err());
        assert!(parse_filter("Images=").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
