//! Command line front-end.
//!
//! Reads tokens from arguments, a file or stdin, layers configuration
//! (file, `SUPERNET_*` environment, flags) and writes the result.

use crate::config::{ExpansionPolicy, SortOrder, SummarizerConfig};
use crate::input::{read_input, read_input_file};
use crate::listener::LogListener;
use crate::output::{summary_line, write_entries, write_json};
use crate::processing::Summarizer;
use clap::{ArgAction, Parser};
use colored::Colorize;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::PathBuf;

/// Summarize IPv4 addresses and CIDR ranges into the biggest possible supernets.
#[derive(Debug, Parser)]
#[command(name = "supernet-summary", version)]
pub struct Cli {
    /// Addresses or CIDR ranges. Read from --input or stdin when empty.
    #[arg(value_name = "ADDRESS")]
    pub addresses: Vec<String>,

    /// File with addresses, separated by whitespace, commas or newlines.
    #[arg(short, long, value_name = "FILE", conflicts_with = "addresses")]
    pub input: Option<PathBuf>,

    /// Write the result to a file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Emit a JSON array instead of one entry per line.
    #[arg(long)]
    pub json: bool,

    /// JSON configuration file.
    #[arg(short, long, value_name = "FILE", env = "SUPERNET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Widest prefix length to try (default 8).
    #[arg(long, value_name = "MASK")]
    pub min_mask: Option<u8>,

    /// Narrowest prefix length to try (default 30, at most 30).
    #[arg(long, value_name = "MASK")]
    pub max_mask: Option<u8>,

    /// Sort by address value instead of by string.
    #[arg(long)]
    pub numeric_sort: bool,

    /// Absorb network and broadcast addresses into discovered blocks.
    #[arg(long)]
    pub fold_edges: bool,

    /// Expand ranges fully, even over addresses also listed on their own.
    #[arg(long)]
    pub include_explicit: bool,

    /// Log progress notifications.
    #[arg(long)]
    pub progress: bool,

    /// log4rs configuration file.
    #[arg(long, value_name = "FILE", default_value = "log4rs.yml", env = "SUPERNET_LOG_CONFIG")]
    pub log_config: PathBuf,

    /// Verbose logging (-v debug, -vv trace) when no log config file is found.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors when no log config file is found.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Defaults, then the config file, then environment, then flags.
    pub fn build_config(&self) -> Result<SummarizerConfig, Box<dyn Error>> {
        let config = match &self.config {
            Some(path) => SummarizerConfig::from_file(path)?,
            None => SummarizerConfig::default(),
        };
        let mut config = config.apply_env()?;
        self.apply_flags(&mut config);
        config.validate()?;
        log::debug!("Using config: {config:?}");
        Ok(config)
    }

    fn apply_flags(&self, config: &mut SummarizerConfig) {
        if let Some(mask) = self.min_mask {
            config.min_mask = mask;
        }
        if let Some(mask) = self.max_mask {
            config.max_mask = mask;
        }
        if self.numeric_sort {
            config.sort = SortOrder::Numeric;
        }
        if self.fold_edges {
            config.fold_edge_addresses = true;
        }
        if self.include_explicit {
            config.expansion = ExpansionPolicy::IncludeAll;
        }
    }

    /// Positional tokens as given, else the input file, else stdin.
    ///
    /// Comments and comma separators are only understood in file and stdin
    /// input.
    pub fn read_tokens(&self) -> Result<Vec<String>, Box<dyn Error>> {
        if !self.addresses.is_empty() {
            return Ok(self.addresses.clone());
        }
        match &self.input {
            Some(path) => read_input_file(path),
            None => {
                log::info!("Reading addresses from stdin");
                read_input(io::stdin().lock())
            }
        }
    }
}

/// Run the whole command: config, input, summarize, output.
pub fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let config = cli.build_config()?;
    let mut summarizer = Summarizer::new(config)?;
    if cli.progress {
        summarizer.add_listener(Box::new(LogListener));
    }

    let tokens = cli.read_tokens()?;
    let entries = summarizer.summarize_entries(tokens.as_slice()).map_err(|e| {
        log::error!("{}", e.to_string().red());
        e
    })?;

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| format!("Error writing output file {}: {e}", path.display()))?;
            let mut out = BufWriter::new(file);
            if cli.json {
                write_json(&mut out, &entries)?;
            } else {
                write_entries(&mut out, &entries, false)?;
            }
            out.flush()?;
            log::info!("Wrote {} entries to {}", entries.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let color = !cli.json && stdout.is_terminal();
            let mut out = stdout.lock();
            if cli.json {
                write_json(&mut out, &entries)?;
            } else {
                write_entries(&mut out, &entries, color)?;
            }
        }
    }

    log::info!("{}", summary_line(&entries));
    Ok(())
}
