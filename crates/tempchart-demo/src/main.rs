// File: crates/tempchart-demo/src/main.rs
// Summary: CLI that pages through a temperature-change CSV: PNG frames, text frames, or the repeat table.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use tempchart_core::{ChartConfig, Controller, CsvSource, DataSource, Page, PassOutcome, Ranker, Renderer, TextRenderer};
use tempchart_render_skia::{theme, RenderOptions, SkiaRenderer};

#[derive(Parser)]
#[command(name = "tempchart")]
#[command(about = "Top-K temperature change charts from a country CSV")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Input {
    /// CSV with a `Country` column and `F<year>` columns
    #[arg(default_value = "crates/tempchart-demo/data/temp_data.csv")]
    csv: PathBuf,

    /// TOML file overriding the default chart policy
    #[arg(long, short)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every page to PNG files
    Render {
        #[command(flatten)]
        input: Input,

        #[arg(long, short, default_value = "target/out")]
        out: PathBuf,

        /// Extra entities to plot on the time-series page
        #[arg(long = "entity")]
        entities: Vec<String>,

        #[arg(long, default_value = "light")]
        theme: String,
    },
    /// Print every page as text
    Text {
        #[command(flatten)]
        input: Input,

        #[arg(long = "entity")]
        entities: Vec<String>,
    },
    /// List entities that rank in the top K in more than one snapshot year
    Repeats {
        #[command(flatten)]
        input: Input,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Render { input, out, entities, theme: theme_name } => {
            let (cfg, mut src) = open(&input)?;
            let opts = RenderOptions { theme: theme::find(&theme_name), ..RenderOptions::default() };
            let mut renderer = SkiaRenderer::new(&out, opts);
            let rendered = walk(cfg, &mut src, &mut renderer, &entities)?;
            println!("Wrote {rendered} frames to {}", renderer.out_dir().display());
            for e in renderer.errors() {
                println!("  skipped: {e}");
            }
        }
        Commands::Text { input, entities } => {
            let (cfg, mut src) = open(&input)?;
            let mut renderer = TextRenderer::new(std::io::stdout().lock());
            walk(cfg, &mut src, &mut renderer, &entities)?;
        }
        Commands::Repeats { input } => {
            let (cfg, mut src) = open(&input)?;
            let rows = src.load_rows().with_context(|| format!("failed to load '{}'", input.csv.display()))?;
            let history = Ranker::new(cfg.top_k, cfg.aggregate_entity.clone()).history(&rows, &cfg.snapshot_years);
            let (lo, hi) = cfg.window_bounds();
            println!("Top {} repeats over {lo}-{hi}:", cfg.top_k);
            for (entity, years) in history.iter().filter(|(_, y)| y.len() > 1) {
                let joined = years.iter().map(|y| y.to_string()).collect::<Vec<_>>().join(", ");
                println!("  {entity}: {joined}");
            }
        }
    }
    Ok(())
}

fn open(input: &Input) -> Result<(ChartConfig, CsvSource)> {
    let cfg = match &input.config {
        Some(p) => ChartConfig::load(p).with_context(|| format!("config '{}'", p.display()))?,
        None => ChartConfig::default(),
    };
    let path = resolve_path(&input.csv)?;
    info!("Using input file: {}", path.display());
    Ok((cfg, CsvSource::new(path)))
}

/// Visit every snapshot page, then the time-series page for the aggregate and each extra entity.
fn walk(cfg: ChartConfig, src: &mut CsvSource, out: &mut dyn Renderer, entities: &[String]) -> Result<usize> {
    let mut ctl = Controller::new(cfg)?;
    let mut rendered = 0usize;
    let mut tally = |o: PassOutcome| {
        if o.is_rendered() { rendered += 1; }
    };

    tally(ctl.start(src, out));
    // a failed page is retried by the next step, so bound the walk by the page count
    for _ in 0..=ctl.view().page_count() {
        if ctl.page() == Page::Interactive { break; }
        tally(ctl.next(src, out));
    }
    if ctl.page() == Page::Interactive {
        for e in entities {
            tally(ctl.select_entity(e, src, out)?);
        }
    } else if !entities.is_empty() {
        warn!("time-series page not reached; ignoring --entity");
    }

    if rendered == 0 {
        anyhow::bail!("no frames rendered; check the input file");
    }
    Ok(rendered)
}

/// Resolve path, trying the `.csv`/`.cvs` swap if needed.
fn resolve_path(p: &Path) -> Result<PathBuf> {
    if p.exists() {
        return Ok(p.to_path_buf());
    }
    if let Some(alt) = swap_ext(p) {
        if alt.exists() {
            info!("(extension swapped between .csv/.cvs)");
            return Ok(alt);
        }
    }
    anyhow::bail!("file not found: {}", p.display());
}

fn swap_ext(p: &Path) -> Option<PathBuf> {
    let mut alt = p.to_path_buf();
    let ext = p.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "cvs" => {
            alt.set_extension("csv");
            Some(alt)
        }
        "csv" => {
            alt.set_extension("cvs");
            Some(alt)
        }
        _ => None,
    }
}
