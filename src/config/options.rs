// src/config/options.rs
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use super::consts::*;
use crate::data::Column;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub source: SourceOptions,
    pub view: ViewOptions,
    pub export: ExportOptions,
}

/* ---------------- Source ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceOptions {
    pub url: String,
    pub user_agent: String,
    /// Width of the cache time bucket. `None` keeps one table until an
    /// explicit refresh.
    pub cache_bucket: Option<Duration>,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            url: SOURCE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            cache_bucket: None,
        }
    }
}

/* ---------------- View ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SymbolFilter {
    All,
    Only(Vec<String>),
}

impl SymbolFilter {
    pub fn allows(&self, symbol: &str) -> bool {
        match self {
            SymbolFilter::All => true,
            SymbolFilter::Only(v) => v.iter().any(|s| s == symbol),
        }
    }

    /// Parse "BTC, eth,SOL" into an `Only` filter (uppercased, deduped).
    /// An empty list means "all".
    pub fn from_list(s: &str) -> Self {
        let mut v: Vec<String> = s
            .split(',')
            .map(|p| p.trim().to_ascii_uppercase())
            .filter(|p| !p.is_empty())
            .collect();
        if v.is_empty() {
            return SymbolFilter::All;
        }
        v.sort_unstable();
        v.dedup();
        SymbolFilter::Only(v)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Timeframe {
    H1,
    H24,
    #[default]
    D7,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Timeframe::D7, Timeframe::H24, Timeframe::H1];

    pub fn label(self) -> &'static str {
        match self {
            Timeframe::H1 => "1h",
            Timeframe::H24 => "24h",
            Timeframe::D7 => "7d",
        }
    }

    pub fn period(self) -> &'static str {
        match self {
            Timeframe::H1 => "1 hour period",
            Timeframe::H24 => "24 hours period",
            Timeframe::D7 => "7 days period",
        }
    }

    pub fn column(self) -> Column {
        match self {
            Timeframe::H1 => Column::PercentChange1h,
            Timeframe::H24 => Column::PercentChange24h,
            Timeframe::D7 => Column::PercentChange7d,
        }
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1h" => Ok(Timeframe::H1),
            "24h" => Ok(Timeframe::H24),
            "7d" => Ok(Timeframe::D7),
            other => Err(format!("unknown timeframe '{other}' (expected 7d, 24h or 1h)")),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CurrencyUnit {
    #[default]
    Usd,
    Btc,
    Eth,
}

impl CurrencyUnit {
    pub const ALL: [CurrencyUnit; 3] = [CurrencyUnit::Usd, CurrencyUnit::Btc, CurrencyUnit::Eth];

    pub fn label(self) -> &'static str {
        match self {
            CurrencyUnit::Usd => "USD",
            CurrencyUnit::Btc => "BTC",
            CurrencyUnit::Eth => "ETH",
        }
    }

    /// Only USD quotes are scraped; other units have no rate source.
    pub fn is_backed(self) -> bool {
        matches!(self, CurrencyUnit::Usd)
    }
}

impl FromStr for CurrencyUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(CurrencyUnit::Usd),
            "BTC" => Ok(CurrencyUnit::Btc),
            "ETH" => Ok(CurrencyUnit::Eth),
            other => Err(format!("unknown currency '{other}' (expected USD, BTC or ETH)")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewOptions {
    pub symbols: SymbolFilter,
    top_n: usize,
    pub timeframe: Timeframe,
    pub sort_values: bool,
    pub currency: CurrencyUnit,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            symbols: SymbolFilter::All,
            top_n: TOP_N_MAX,
            timeframe: Timeframe::default(),
            sort_values: true,
            currency: CurrencyUnit::default(),
        }
    }
}

impl ViewOptions {
    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn set_top_n(&mut self, n: usize) {
        self.top_n = n.clamp(TOP_N_MIN, TOP_N_MAX);
    }

    /// Slider binding for the GUI; value is clamped on the next `set_top_n`.
    pub fn top_n_mut(&mut self) -> &mut usize {
        &mut self.top_n
    }
}

/* ---------------- Export ---------------- */

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delimiter(&self) -> u8 {
        match self { ExportFormat::Csv => b',', ExportFormat::Tsv => b'\t' }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            other => Err(format!("unknown format '{other}' (expected csv or tsv)")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    out_path: OutputPath,
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out_path: OutputPath::default(),
            include_headers: true,
        }
    }
}

impl ExportOptions {
    /// `<dir>/<stem>.<ext>`; ext follows the format unless the user typed one.
    pub fn out_path(&self) -> PathBuf {
        let ext = match &self.out_path.ext {
            Some(user_ext) => user_ext.to_string_lossy().into_owned(),
            None => self.format.ext().to_string(),
        };
        let stem = self.out_path.file_stem.to_string_lossy();
        self.out_path.dir.join(format!("{stem}.{ext}"))
    }

    /// Parse GUI/CLI text into dir + stem (+ explicit extension, if any).
    pub fn set_path(&mut self, text: &str) {
        let p = Path::new(text.trim());
        if let Some(parent) = p.parent() {
            self.out_path.dir = parent.to_path_buf();
        }
        if let Some(stem) = p.file_stem() {
            self.out_path.file_stem = stem.to_os_string();
        }
        self.out_path.ext = p.extension().map(|e| e.to_os_string());
    }

    pub fn is_default_path(&self) -> bool {
        self.out_path == OutputPath::default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct OutputPath {
    dir: PathBuf,
    file_stem: OsString, // without extension
    ext: Option<OsString>,
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(DEFAULT_FILE),
            ext: None,
        }
    }
}
