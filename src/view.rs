// src/view.rs
//
// Presentation-side views over a built `CoinTable`. Nothing here mutates or
// clones the table: a `CoinView` is a list of row indices into it, the same
// shape the table widget, the export path and the chart all read from.

use crate::config::options::{Timeframe, ViewOptions};
use crate::data::{CoinRecord, CoinTable};

/// Symbols for the multiselect: sorted, no duplicates.
pub fn sorted_symbols(table: &CoinTable) -> Vec<String> {
    let mut v: Vec<String> = table.records().iter().map(|r| r.coin_symbol.clone()).collect();
    v.sort();
    v.dedup();
    v
}

/// Filter by symbol, then keep the first `top_n`. Source order is kept.
pub struct CoinView<'a> {
    table: &'a CoinTable,
    row_ix: Vec<usize>,
}

impl<'a> CoinView<'a> {
    pub fn new(table: &'a CoinTable, opts: &ViewOptions) -> Self {
        let row_ix = table
            .records()
            .iter()
            .enumerate()
            .filter(|(_, r)| opts.symbols.allows(&r.coin_symbol))
            .map(|(i, _)| i)
            .take(opts.top_n())
            .collect();
        Self { table, row_ix }
    }

    pub fn len(&self) -> usize { self.row_ix.len() }
    pub fn is_empty(&self) -> bool { self.row_ix.is_empty() }

    pub fn row(&self, i: usize) -> Option<&'a CoinRecord> {
        self.row_ix.get(i).and_then(|&ix| self.table.get(ix))
    }

    pub fn records(&self) -> impl Iterator<Item = &'a CoinRecord> + '_ {
        self.row_ix.iter().filter_map(|&ix| self.table.get(ix))
    }

    pub fn dimension_text(&self) -> String {
        format!(
            "Data dimension: {} rows and {} columns.",
            self.len(),
            self.table.column_count()
        )
    }
}

/// One line of the percent-change table.
#[derive(Clone, Debug, PartialEq)]
pub struct ChangeRow {
    pub symbol: String,
    pub pct_1h: f64,
    pub pct_24h: f64,
    pub pct_7d: f64,
    pub positive_1h: bool,
    pub positive_24h: bool,
    pub positive_7d: bool,
}

impl ChangeRow {
    pub fn positive(&self, tf: Timeframe) -> bool {
        match tf {
            Timeframe::H1 => self.positive_1h,
            Timeframe::H24 => self.positive_24h,
            Timeframe::D7 => self.positive_7d,
        }
    }
}

pub fn change_rows(view: &CoinView<'_>) -> Vec<ChangeRow> {
    view.records()
        .map(|r| ChangeRow {
            symbol: r.coin_symbol.clone(),
            pct_1h: r.percent_change_1h,
            pct_24h: r.percent_change_24h,
            pct_7d: r.percent_change_7d,
            positive_1h: r.percent_change_1h > 0.0,
            positive_24h: r.percent_change_24h > 0.0,
            positive_7d: r.percent_change_7d > 0.0,
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    pub symbol: String,
    pub value: f64,
    /// Strictly greater than zero; 0.0 draws as a loss.
    pub positive: bool,
}

/// Bars for the selected timeframe, ascending by value when `sort` is set.
pub fn bar_series(view: &CoinView<'_>, timeframe: Timeframe, sort: bool) -> Vec<Bar> {
    let mut bars: Vec<Bar> = view
        .records()
        .map(|r| {
            let value = r.percent_change(timeframe);
            Bar { symbol: r.coin_symbol.clone(), value, positive: value > 0.0 }
        })
        .collect();
    if sort {
        bars.sort_by(|a, b| a.value.total_cmp(&b.value));
    }
    bars
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::SymbolFilter;
    use pretty_assertions::assert_eq;

    fn coin(symbol: &str, h1: f64, h24: f64, d7: f64) -> CoinRecord {
        CoinRecord {
            coin_name: symbol.to_lowercase(),
            coin_symbol: symbol.to_string(),
            market_cap: 1.0,
            percent_change_1h: h1,
            percent_change_24h: h24,
            percent_change_7d: d7,
            price: 1.0,
            volume_24h: 1.0,
        }
    }

    fn table() -> CoinTable {
        CoinTable::from_records(vec![
            coin("BTC", 0.5, -1.0, 3.0),
            coin("ETH", -0.2, 2.0, -4.0),
            coin("USDT", 0.0, 0.0, 0.0),
            coin("SOL", 1.5, 5.0, 12.0),
        ])
    }

    fn symbols<'a>(view: &'a CoinView<'_>) -> Vec<&'a str> {
        view.records().map(|r| r.coin_symbol.as_str()).collect()
    }

    #[test]
    fn symbols_are_sorted_and_unique() {
        let mut records = table().records().to_vec();
        records.push(coin("BTC", 0.0, 0.0, 0.0));
        let t = CoinTable::from_records(records);
        assert_eq!(sorted_symbols(&t), ["BTC", "ETH", "SOL", "USDT"]);
    }

    #[test]
    fn filter_then_top_n_keeps_source_order() {
        let t = table();
        let mut opts = ViewOptions::default();
        opts.symbols = SymbolFilter::Only(vec!["SOL".into(), "BTC".into(), "USDT".into()]);
        opts.set_top_n(2);

        let view = CoinView::new(&t, &opts);
        assert_eq!(symbols(&view), ["BTC", "USDT"]);
        assert_eq!(view.row(1).map(|r| r.coin_symbol.as_str()), Some("USDT"));
        assert_eq!(view.dimension_text(), "Data dimension: 2 rows and 8 columns.");
    }

    #[test]
    fn empty_selection_is_an_empty_view() {
        let t = table();
        let mut opts = ViewOptions::default();
        opts.symbols = SymbolFilter::Only(vec![]);
        let view = CoinView::new(&t, &opts);
        assert!(view.is_empty());
        assert!(view.row(0).is_none());
    }

    #[test]
    fn change_flags_are_strictly_positive() {
        let t = table();
        let view = CoinView::new(&t, &ViewOptions::default());
        let rows = change_rows(&view);
        let usdt = rows.iter().find(|r| r.symbol == "USDT").unwrap();
        assert!(!usdt.positive_1h && !usdt.positive_24h && !usdt.positive_7d);
        assert!(rows[0].positive_1h && !rows[0].positive_24h && rows[0].positive(Timeframe::D7));
    }

    #[test]
    fn bars_sort_ascending_only_when_asked() {
        let t = table();
        let view = CoinView::new(&t, &ViewOptions::default());

        let sorted: Vec<_> = bar_series(&view, Timeframe::D7, true).into_iter().map(|b| b.symbol).collect();
        assert_eq!(sorted, ["ETH", "USDT", "BTC", "SOL"]);

        let unsorted: Vec<_> = bar_series(&view, Timeframe::H24, false).into_iter().map(|b| b.value).collect();
        assert_eq!(unsorted, [-1.0, 2.0, 0.0, 5.0]);
    }
}
