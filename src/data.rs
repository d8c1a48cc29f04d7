// src/data.rs
//
// Canonical table types and the Table Builder.
//
// - Column:        the fixed 8-name output schema, in public display order.
// - CoinRecord:    one row; serde field names ARE the schema names, so the
//                  csv crate writes headers in schema order for free.
// - MappedColumns: named columns as they come out of the schema mapper.
// - CoinTable:     immutable, row-oriented result of `build`.

use serde::{Deserialize, Serialize};

use crate::config::options::Timeframe;
use crate::error::MappingError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    CoinName,
    CoinSymbol,
    MarketCap,
    PercentChange1h,
    PercentChange24h,
    PercentChange7d,
    Price,
    Volume24h,
}

impl Column {
    /// Fixed output order. Downstream code may rely on positions.
    pub const ALL: [Column; 8] = [
        Column::CoinName,
        Column::CoinSymbol,
        Column::MarketCap,
        Column::PercentChange1h,
        Column::PercentChange24h,
        Column::PercentChange7d,
        Column::Price,
        Column::Volume24h,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Column::CoinName => "coin_name",
            Column::CoinSymbol => "coin_symbol",
            Column::MarketCap => "market_cap",
            Column::PercentChange1h => "percent_change_1h",
            Column::PercentChange24h => "percent_change_24h",
            Column::PercentChange7d => "percent_change_7d",
            Column::Price => "price",
            Column::Volume24h => "volume_24h",
        }
    }

    /// Header name of this column on the listing page.
    pub fn source_key(self) -> &'static str {
        match self {
            Column::CoinName => "id",
            Column::CoinSymbol => "symbol",
            Column::MarketCap => "quote.USD.marketCap",
            Column::PercentChange1h => "quote.USD.percentChange1h",
            Column::PercentChange24h => "quote.USD.percentChange24h",
            Column::PercentChange7d => "quote.USD.percentChange7d",
            Column::Price => "quote.USD.price",
            Column::Volume24h => "quote.USD.volume24h",
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, Column::CoinName | Column::CoinSymbol)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoinRecord {
    pub coin_name: String,
    pub coin_symbol: String,
    pub market_cap: f64,
    pub percent_change_1h: f64,
    pub percent_change_24h: f64,
    pub percent_change_7d: f64,
    pub price: f64,
    pub volume_24h: f64,
}

impl CoinRecord {
    /// Numeric value of a column; `None` for the two text columns.
    pub fn number(&self, col: Column) -> Option<f64> {
        match col {
            Column::CoinName | Column::CoinSymbol => None,
            Column::MarketCap => Some(self.market_cap),
            Column::PercentChange1h => Some(self.percent_change_1h),
            Column::PercentChange24h => Some(self.percent_change_24h),
            Column::PercentChange7d => Some(self.percent_change_7d),
            Column::Price => Some(self.price),
            Column::Volume24h => Some(self.volume_24h),
        }
    }

    pub fn percent_change(&self, tf: Timeframe) -> f64 {
        self.number(tf.column()).unwrap_or_default()
    }

    /// Display text for the table widget.
    pub fn cell(&self, col: Column) -> String {
        match col {
            Column::CoinName => self.coin_name.clone(),
            Column::CoinSymbol => self.coin_symbol.clone(),
            Column::MarketCap | Column::Volume24h => {
                format!("{:.0}", self.number(col).unwrap_or_default())
            }
            Column::PercentChange1h | Column::PercentChange24h | Column::PercentChange7d => {
                format!("{:.2}", self.number(col).unwrap_or_default())
            }
            Column::Price => format!("{}", self.price),
        }
    }
}

/// One mapped column, already typed.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnData {
    Text(Vec<String>),
    Number(Vec<f64>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Text(v) => v.len(),
            ColumnData::Number(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ColumnData::Text(_) => "text",
            ColumnData::Number(_) => "numeric",
        }
    }
}

/// Output of the schema mapper: schema columns in fixed order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MappedColumns {
    columns: Vec<(Column, ColumnData)>,
}

impl MappedColumns {
    pub fn new() -> Self {
        Self { columns: Vec::with_capacity(Column::ALL.len()) }
    }

    pub fn push(&mut self, col: Column, data: ColumnData) {
        self.columns.retain(|(c, _)| *c != col);
        self.columns.push((col, data));
    }

    pub fn get(&self, col: Column) -> Option<&ColumnData> {
        self.columns.iter().find(|(c, _)| *c == col).map(|(_, d)| d)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|(c, _)| c.name()).collect()
    }
}

/// Immutable row-oriented table. One per successful load.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoinTable {
    records: Vec<CoinRecord>,
}

impl CoinTable {
    pub fn from_records(records: Vec<CoinRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[CoinRecord] { &self.records }
    pub fn get(&self, i: usize) -> Option<&CoinRecord> { self.records.get(i) }
    pub fn row_count(&self) -> usize { self.records.len() }
    pub fn column_count(&self) -> usize { Column::ALL.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
}

/// Zip named columns into records. All eight schema columns must be present
/// with equal lengths. Text columns must carry `Text`, numeric columns finite
/// `Number`s.
pub fn build(mapped: MappedColumns) -> Result<CoinTable, MappingError> {
    let mut text: Vec<&[String]> = Vec::with_capacity(2);
    let mut numbers: Vec<&[f64]> = Vec::with_capacity(Column::ALL.len() - 2);
    let mut n: Option<usize> = None;

    for col in Column::ALL {
        let data = mapped.get(col).ok_or(MappingError::MissingField {
            source_key: col.source_key(),
            field: col.name(),
        })?;
        if let Some(expected) = n {
            if expected != data.len() {
                return Err(MappingError::LengthMismatch {
                    row: expected.min(data.len()),
                    expected,
                    found: data.len(),
                });
            }
        }
        n = Some(data.len());

        match (col.is_numeric(), data) {
            (false, ColumnData::Text(v)) => text.push(v),
            (true, ColumnData::Number(v)) => {
                if let Some(row) = v.iter().position(|f| !f.is_finite()) {
                    return Err(MappingError::InvalidValue {
                        field: col.name(),
                        row,
                        found: v[row].to_string(),
                    });
                }
                numbers.push(v);
            }
            (_, other) => {
                return Err(MappingError::InvalidValue {
                    field: col.name(),
                    row: 0,
                    found: format!("{} column", other.kind()),
                });
            }
        }
    }

    // text: [name, symbol]; numbers: schema order from market_cap on
    let records = (0..n.unwrap_or(0))
        .map(|i| CoinRecord {
            coin_name: text[0][i].clone(),
            coin_symbol: text[1][i].clone(),
            market_cap: numbers[0][i],
            percent_change_1h: numbers[1][i],
            percent_change_24h: numbers[2][i],
            percent_change_7d: numbers[3][i],
            price: numbers[4][i],
            volume_24h: numbers[5][i],
        })
        .collect();

    Ok(CoinTable { records })
}
