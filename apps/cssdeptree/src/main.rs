use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use cssdeptree_core::TraversalConfig;
use log::{debug, info};
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

mod output;

use output::{Output, write_output};

#[derive(Debug, Parser)]
#[command(name = "cssdeptree", version)]
#[command(
    about = "Resolve the @import url(...) dependency tree of a stylesheet",
    long_about = "Resolve the @import url(...) dependency tree of a stylesheet.\n\n\
                  Prints the import tree, the list of local files and the list of remote \
                  URLs as JSON. Also installed as `cssdt`."
)]
struct Cli {
    /// Stylesheet to resolve
    css_file: PathBuf,

    /// Output file paths relative to current directory
    #[arg(short = 'r', long)]
    relative: bool,

    /// Only show list of file dependencies
    #[arg(short = 'l', long)]
    files_list: bool,

    /// Only show list of URL dependencies
    #[arg(short = 'u', long)]
    urls_list: bool,

    /// Exclude all files from output
    #[arg(short = 'L', long)]
    exclude_files: bool,

    /// Exclude all URL dependencies from output
    #[arg(short = 'U', long)]
    exclude_urls: bool,

    /// Exclude dependency tree from output (only file and URL lists will be present)
    #[arg(short = 'T', long)]
    exclude_tree: bool,

    /// Compress output JSON
    #[arg(short = 'c', long)]
    compress: bool,
}

impl Cli {
    fn config(&self) -> TraversalConfig {
        TraversalConfig {
            relative: self.relative,
            exclude_tree: self.exclude_tree,
            exclude_files: self.exclude_files,
            exclude_urls: self.exclude_urls,
        }
    }
}

fn run(cli: &Cli) -> Result<Output> {
    let output = if cli.files_list {
        let files = cssdeptree_core::resolve_files(&cli.css_file, cli.relative)?;
        Output::Lines(files.iter().map(|p| p.display().to_string()).collect())
    } else if cli.urls_list {
        Output::Lines(cssdeptree_core::resolve_urls(&cli.css_file, cli.relative)?)
    } else {
        Output::Aggregate(cssdeptree_core::resolve(&cli.css_file, &cli.config())?)
    };
    Ok(output)
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli);

    let start = Instant::now();
    info!(
        "Resolving {} (using {} threads)",
        cli.css_file.display(),
        rayon::current_num_threads()
    );

    match run(&cli) {
        Ok(output) => {
            write_output(&mut stdout, &output, cli.compress)?;
            info!("Finished in {}ms", start.elapsed().as_millis());
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}
