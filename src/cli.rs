// src/cli.rs
//
// Headless frontend: one load, apply the view flags, write CSV/TSV.
//
//   cli --symbols BTC,ETH --top 10 -o out/coins.csv --changes
//
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::warn;

use crate::config::options::{AppOptions, CurrencyUnit, ExportFormat, SymbolFilter, Timeframe};
use crate::progress::{Progress, Stage};
use crate::scrape::Pipeline;
use crate::view::{self, ChangeRow, CoinView};
use crate::{csv, file};

#[derive(Debug, Parser)]
#[command(name = "coin_scrape", version, about = "Scrape the CoinMarketCap front-page listing into CSV")]
pub struct Cli {
    /// Page to scrape
    #[arg(long, env = "COIN_SCRAPE_URL", default_value = crate::config::consts::SOURCE_URL)]
    pub url: String,

    /// Comma-separated symbols to keep (default: all)
    #[arg(long, env = "COIN_SCRAPE_SYMBOLS", default_value = "")]
    pub symbols: String,

    /// Keep the first N coins after filtering (1..=100)
    #[arg(long, env = "COIN_SCRAPE_TOP", default_value_t = 100,
          value_parser = clap::value_parser!(u16).range(1..=100))]
    pub top: u16,

    /// Percent-change timeframe for --changes ordering: 7d, 24h or 1h
    #[arg(long, env = "COIN_SCRAPE_TIMEFRAME", default_value = "7d")]
    pub timeframe: Timeframe,

    /// Keep source order in the --changes listing
    #[arg(long, env = "COIN_SCRAPE_NO_SORT")]
    pub no_sort: bool,

    /// Display currency. Only USD quotes are scraped.
    #[arg(long, env = "COIN_SCRAPE_CURRENCY", default_value = "USD")]
    pub currency: CurrencyUnit,

    /// csv or tsv
    #[arg(long, env = "COIN_SCRAPE_FORMAT", default_value = "csv")]
    pub format: ExportFormat,

    /// Output file; stdout when omitted
    #[arg(short, long, env = "COIN_SCRAPE_OUT")]
    pub out: Option<PathBuf>,

    /// Omit the header line
    #[arg(long, env = "COIN_SCRAPE_NO_HEADERS")]
    pub no_headers: bool,

    /// Also print the percent-change table
    #[arg(long, env = "COIN_SCRAPE_CHANGES")]
    pub changes: bool,

    /// Cache bucket width in seconds (0: only explicit refresh invalidates)
    #[arg(long, env = "COIN_SCRAPE_CACHE_SECS", default_value_t = 0)]
    pub cache_secs: u64,

    /// No stage messages on stderr
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn to_options(&self) -> AppOptions {
        let mut o = AppOptions::default();
        o.source.url = self.url.clone();
        o.source.cache_bucket = (self.cache_secs > 0).then(|| Duration::from_secs(self.cache_secs));

        o.view.symbols = SymbolFilter::from_list(&self.symbols);
        o.view.set_top_n(self.top as usize);
        o.view.timeframe = self.timeframe;
        o.view.sort_values = !self.no_sort;
        o.view.currency = self.currency;

        o.export.format = self.format;
        o.export.include_headers = !self.no_headers;
        if let Some(p) = &self.out {
            o.export.set_path(&p.to_string_lossy());
        }
        o
    }
}

struct StderrProgress {
    quiet: bool,
}

impl Progress for StderrProgress {
    fn begin(&mut self, url: &str) {
        if !self.quiet { eprintln!("Loading {url}"); }
    }
    fn stage(&mut self, stage: Stage) {
        if !self.quiet { eprintln!("  {}…", stage.label()); }
    }
    fn finish(&mut self, rows: Option<usize>) {
        if !self.quiet && rows.is_some() { eprintln!("Done."); }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let opts = cli.to_options();
    if !opts.view.currency.is_backed() {
        warn!(currency = opts.view.currency.label(), "only USD quotes are scraped; values stay in USD");
    }

    let pipeline = Pipeline::from_options(&opts.source).wrap_err("setting up HTTP client")?;
    let entry = pipeline
        .load(&mut StderrProgress { quiet: cli.quiet })
        .wrap_err_with(|| format!("loading {}", opts.source.url))?;

    let view = CoinView::new(&entry.table, &opts.view);
    eprintln!("{}", view.dimension_text());

    match &cli.out {
        Some(_) => {
            let path = file::write_export(&opts.export, view.records())
                .wrap_err("writing export file")?;
            eprintln!("Wrote {}", path.display());
        }
        None => {
            let text = csv::to_export_string(&opts.export, view.records())?;
            io::stdout().write_all(text.as_bytes())?;
        }
    }

    if cli.changes {
        // Keep stdout clean for piped CSV.
        if cli.out.is_some() {
            print_changes(&mut io::stdout(), &view, opts.view.timeframe, opts.view.sort_values)?;
        } else {
            print_changes(&mut io::stderr(), &view, opts.view.timeframe, opts.view.sort_values)?;
        }
    }
    Ok(())
}

fn print_changes<W: Write>(w: &mut W, view: &CoinView<'_>, tf: Timeframe, sort: bool) -> io::Result<()> {
    writeln!(w, "% price change ({})", tf.period())?;
    writeln!(w, "{:<10} {:>9} {:>9} {:>9}", "symbol", "1h", "24h", "7d")?;

    let mut rows: Vec<(f64, ChangeRow)> = view
        .records()
        .map(|r| r.percent_change(tf))
        .zip(view::change_rows(view))
        .collect();
    if sort {
        rows.sort_by(|a, b| a.0.total_cmp(&b.0));
    }
    for (_, r) in &rows {
        let mark = if r.positive(tf) { '+' } else { '-' };
        writeln!(w, "{:<10} {:>9.2} {:>9.2} {:>9.2} {mark}", r.symbol, r.pct_1h, r.pct_24h, r.pct_7d)?;
    }
    Ok(())
}
