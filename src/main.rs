use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use quotewall::{resources, QuoteStore, RenderOpts, Typeface, WallpaperRenderer};

#[derive(Parser, Debug)]
#[command(name = "quotewall", version)]
struct Cli {
    /// Quote store JSON path.
    #[arg(long, global = true)]
    quotes: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the next wallpaper, write it as a JPEG and install it.
    Next(NextArgs),
    /// Manage the quote store.
    #[command(subcommand)]
    Quotes(QuotesCmd),
}

#[derive(Parser, Debug)]
struct NextArgs {
    /// Output JPEG path.
    #[arg(long)]
    out: Option<PathBuf>,

    /// TrueType font used for the quotation.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Seed the random source for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Skip installing the image as the desktop wallpaper.
    #[arg(long, default_value_t = false)]
    no_set: bool,
}

#[derive(Subcommand, Debug)]
enum QuotesCmd {
    /// Print all stored quotations with their indices.
    List,
    /// Append a quotation to the store.
    Add { text: String },
    /// Replace the quotation at the given 0-based index.
    Edit { index: usize, text: String },
    /// Remove the quotation at the given 0-based index.
    Remove { index: usize },
    /// Replace the store from a JSON string-array file.
    Import { path: PathBuf },
    /// Write the store to a JSON string-array file.
    Export { path: PathBuf },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let store = QuoteStore::new(cli.quotes.unwrap_or_else(resources::default_quotes_path));
    match cli.cmd {
        Command::Next(args) => cmd_next(args, &store),
        Command::Quotes(cmd) => cmd_quotes(cmd, &store),
    }
}

fn cmd_next(args: NextArgs, store: &QuoteStore) -> anyhow::Result<()> {
    let renderer = WallpaperRenderer::new(RenderOpts::default());
    let font_path = args.font.unwrap_or_else(resources::default_font_path);
    let face = Typeface::open_or_fallback(&font_path, renderer.opts().font_px);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let img = renderer.generate(&mut rng, store, &face)?;
    let bytes = renderer.encode_jpeg(&img)?;

    let out = args.out.unwrap_or_else(resources::default_output_path);
    std::fs::write(&out, &bytes).with_context(|| format!("write '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());

    if !args.no_set {
        let abs = std::fs::canonicalize(&out)
            .with_context(|| format!("resolve '{}'", out.display()))?;
        let abs = abs.to_str().context("output path is not valid UTF-8")?;
        wallpaper::set_from_path(abs).map_err(|err| anyhow::anyhow!("set wallpaper: {err}"))?;
        eprintln!("installed as desktop wallpaper");
    }
    Ok(())
}

fn cmd_quotes(cmd: QuotesCmd, store: &QuoteStore) -> anyhow::Result<()> {
    match cmd {
        QuotesCmd::List => {
            let quotes = store.load();
            if quotes.is_empty() {
                eprintln!("quote store is empty ({})", store.path().display());
            }
            for (i, quote) in quotes.iter().enumerate() {
                println!("{i}: {quote}");
            }
        }
        QuotesCmd::Add { text } => {
            store.add(&text)?;
            eprintln!("added 1 quote to {}", store.path().display());
        }
        QuotesCmd::Edit { index, text } => {
            let previous = store.edit(index, &text)?;
            eprintln!("replaced: {previous}");
        }
        QuotesCmd::Remove { index } => {
            let removed = store.remove(index)?;
            eprintln!("removed: {removed}");
        }
        QuotesCmd::Import { path } => {
            let count = store.import(&path)?;
            eprintln!("imported {count} quotes from {}", path.display());
        }
        QuotesCmd::Export { path } => {
            let count = store.export(&path)?;
            eprintln!("exported {count} quotes to {}", path.display());
        }
    }
    Ok(())
}
