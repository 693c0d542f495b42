//! # Field Gallery Demo
//!
//! Entry point of the demo binary: parses the command line, sets up
//! file-based logging (the terminal itself belongs to the UI), builds
//! the registries and the demonstrated widget set, and hands control to
//! the terminal shell.
//!
//! A duplicate registration or a duplicated demonstrated type is
//! reported here and aborts startup before the terminal enters raw
//! mode.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gallery::app::App;
use gallery::{configurators, locale, tui};

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal gallery of enhanced field widgets")]
struct Args {
    /// Tab to open at startup, by index or widget type name
    #[arg(long)]
    tab: Option<String>,

    /// Initial locale tag for locale-aware widgets (e.g. de-DE)
    #[arg(long)]
    locale: Option<String>,

    /// Event poll interval in milliseconds
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,

    /// Append tracing output to this file; logging is off without it
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &PathBuf) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let registry = configurators::standard_registry().context("building configurator registry")?;
    let side_effects =
        configurators::standard_side_effects().context("building side-effect registry")?;
    let gallery = configurators::standard_gallery().context("building widget gallery")?;
    tracing::info!(
        widgets = gallery.widget_count(),
        configurators = registry.len(),
        "gallery assembled"
    );

    let mut app = App::new(gallery, registry, side_effects);
    app.tick_rate = Duration::from_millis(args.tick_ms.max(10));

    if let Some(tag) = &args.locale {
        let Some(chosen) = locale::by_code(tag) else {
            bail!("unknown locale {tag}; try one of pl-PL, en-GB, fr-FR, de-DE, zh-CN");
        };
        app.apply_locale(chosen);
    }

    if let Some(tab) = &args.tab {
        let index = match tab.parse::<usize>() {
            Ok(n) => n,
            Err(_) => {
                let titles = app.gallery.tab_titles();
                match titles.iter().position(|t| t.eq_ignore_ascii_case(tab)) {
                    Some(i) => i,
                    None => bail!("unknown tab {tab}; expected an index or one of {titles:?}"),
                }
            }
        };
        app.select_tab(index);
    }

    tui::run_tui(&mut app).context("running the terminal UI")?;
    Ok(())
}
