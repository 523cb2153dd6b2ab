//! fbtool: inspect what filebundle serves.
//!
//! Usage:
//!   # List the embedded demo bundle
//!   fbtool ls webui
//!
//!   # Print a bundled file, inflating it if it was stored compressed
//!   fbtool cat webui/app.js --decompress
//!
//!   # Show every entry compiled into the binary
//!   fbtool tree
//!
//!   # Serve the same paths from disk instead
//!   fbtool --data-root ./site stat webui/index.html --gzip

mod demo;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use filebundle::{
    Backend, BundleEntry, DataRoot, EntryKind, FileBundle, FileType, OpenFlags, Settings,
};
use tracing_subscriber::{EnvFilter, fmt};

/// Inspect directories and files served through filebundle.
#[derive(Parser, Debug)]
#[command(name = "fbtool")]
#[command(about = "Inspect directories and files served through filebundle")]
struct Args {
    /// RON settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Resolve relative paths under this directory instead of the bundle
    #[arg(long, env = "FILEBUNDLE_DATA_ROOT", global = true)]
    data_root: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// List a directory
    Ls {
        /// Directory path ("" is the bundle root)
        #[arg(default_value = "")]
        dir: String,
    },
    /// Print the whole embedded table, ignoring any data root
    Tree,
    /// Write a file's bytes to stdout
    Cat {
        path: String,
        #[command(flatten)]
        encoding: Encoding,
    },
    /// Show backend, size and compression of a file
    Stat {
        path: String,
        #[command(flatten)]
        encoding: Encoding,
    },
}

#[derive(clap::Args, Debug)]
struct Encoding {
    /// Inflate entries stored compressed
    #[arg(long, conflicts_with = "gzip")]
    decompress: bool,

    /// Gzip content that is not already compressed
    #[arg(long)]
    gzip: bool,
}

impl From<&Encoding> for OpenFlags {
    fn from(e: &Encoding) -> Self {
        OpenFlags {
            decompress: e.decompress,
            compress: e.gzip,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(io::stderr)
        .init();

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(root) = &args.data_root {
        settings = settings.with_data_root(root);
    }
    tracing::debug!(data_root = ?settings.data_root, "settings resolved");

    let fb = FileBundle::with_data_root(&demo::DEMO, settings);
    match &args.command {
        Command::Ls { dir } => list(&fb, dir),
        Command::Tree => tree(&mut io::stdout().lock(), fb.table(), 0),
        Command::Cat { path, encoding } => cat(&fb, path, encoding.into()),
        Command::Stat { path, encoding } => stat(&fb, path, encoding.into()),
    }
}

fn list(fb: &FileBundle<'_, Settings>, dir: &str) -> Result<()> {
    let listing = fb
        .open_dir(dir)
        .with_context(|| format!("opening directory {dir:?}"))?;

    let mut out = io::stdout().lock();
    for entry in listing {
        let marker = match entry.kind {
            FileType::Directory => 'd',
            FileType::File => 'f',
            FileType::Unknown => '?',
        };
        writeln!(out, "{marker} {}", entry.name)?;
    }
    Ok(())
}

fn tree(out: &mut impl Write, entry: &BundleEntry<'_>, depth: usize) -> Result<()> {
    let indent = "  ".repeat(depth.saturating_sub(1));
    match entry.kind() {
        EntryKind::Directory { children } => {
            if depth > 0 {
                writeln!(out, "{indent}{}/", entry.name())?;
            }
            for child in *children {
                tree(out, child, depth + 1)?;
            }
        }
        EntryKind::File {
            data,
            original_size: Some(original),
        } => writeln!(out, "{indent}{} ({} bytes, gzip of {original})", entry.name(), data.len())?,
        EntryKind::File {
            data,
            original_size: None,
        } => writeln!(out, "{indent}{} ({} bytes)", entry.name(), data.len())?,
    }
    Ok(())
}

fn cat(fb: &FileBundle<'_, Settings>, path: &str, flags: OpenFlags) -> Result<()> {
    let mut file = fb
        .open(path, flags)
        .with_context(|| format!("opening {path:?}"))?;

    let mut out = io::stdout().lock();
    let copied = io::copy(&mut file, &mut out).with_context(|| format!("reading {path:?}"))?;
    out.flush()?;
    tracing::debug!(path, copied, "done");
    file.close();
    Ok(())
}

fn stat(fb: &FileBundle<'_, Settings>, path: &str, flags: OpenFlags) -> Result<()> {
    let file = fb
        .open(path, flags)
        .with_context(|| format!("opening {path:?}"))?;

    let backend = match file.backend() {
        Backend::Bundle => "bundle",
        Backend::Direct => "direct",
    };
    let data_root = fb
        .data_root()
        .data_root()
        .map_or_else(|| "-".to_string(), |root| root.display().to_string());
    println!("path:       {path}");
    println!("backend:    {backend}");
    println!("data root:  {data_root}");
    println!("size:       {}", file.size());
    println!("compressed: {}", file.is_compressed());
    Ok(())
}
