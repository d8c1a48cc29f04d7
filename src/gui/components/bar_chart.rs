// src/gui/components/bar_chart.rs
//
// Horizontal bar plot of % price change for the selected timeframe.
// Gains green, losses (and exact zero) red.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};

use crate::gui::app::App;
use crate::view::{self, Bar};

const BAR_H: f32 = 14.0;
const GAP: f32 = 4.0;
const LABEL_W: f32 = 64.0;
const GAIN: Color32 = Color32::from_rgb(0x2E, 0xA0, 0x43);
const LOSS: Color32 = Color32::from_rgb(0xD7, 0x3A, 0x49);

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.heading("Bar plot of % price change");

    let opts = &app.state.options.view;
    ui.label(egui::RichText::new(opts.timeframe.period()).italics());

    let Some(v) = app.view() else { return };
    let bars = view::bar_series(&v, opts.timeframe, opts.sort_values);
    if bars.is_empty() {
        ui.label("No coins selected.");
        return;
    }

    egui::ScrollArea::vertical()
        .id_salt("bar_chart_scroll")
        .show(ui, |ui| paint(ui, &bars));
}

/// Value span always includes zero so the axis is on screen.
fn span(bars: &[Bar]) -> (f64, f64) {
    let lo = bars.iter().map(|b| b.value).fold(0.0_f64, f64::min);
    let hi = bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
    if hi - lo < f64::EPSILON { (lo - 1.0, hi + 1.0) } else { (lo, hi) }
}

fn paint(ui: &mut egui::Ui, bars: &[Bar]) {
    let width = ui.available_width().max(LABEL_W + 40.0);
    let height = bars.len() as f32 * (BAR_H + GAP) + GAP;
    let (rect, _resp) = ui.allocate_exact_size(Vec2::new(width, height), Sense::hover());
    let painter = ui.painter_at(rect);
    let text_color = ui.visuals().text_color();

    let plot = Rect::from_min_max(Pos2::new(rect.left() + LABEL_W, rect.top()), rect.max);
    let (lo, hi) = span(bars);
    let x_of = |v: f64| plot.left() + ((v - lo) / (hi - lo)) as f32 * plot.width();
    let zero_x = x_of(0.0);

    for (i, bar) in bars.iter().enumerate() {
        let top = rect.top() + GAP + i as f32 * (BAR_H + GAP);
        let x = x_of(bar.value);
        let bar_rect = Rect::from_min_max(
            Pos2::new(zero_x.min(x), top),
            Pos2::new(zero_x.max(x).max(zero_x.min(x) + 1.0), top + BAR_H),
        );
        painter.rect_filled(bar_rect, 0.0, if bar.positive { GAIN } else { LOSS });

        painter.text(
            Pos2::new(rect.left() + LABEL_W - 6.0, top + BAR_H / 2.0),
            Align2::RIGHT_CENTER,
            &bar.symbol,
            FontId::monospace(11.0),
            text_color,
        );

        let row = Rect::from_min_max(Pos2::new(rect.left(), top), Pos2::new(rect.right(), top + BAR_H));
        let hover = ui.interact(row, ui.id().with(("bar", i)), Sense::hover());
        hover.on_hover_text(format!("{}: {:.2}%", bar.symbol, bar.value));
    }

    painter.line_segment(
        [Pos2::new(zero_x, rect.top()), Pos2::new(zero_x, rect.bottom())],
        Stroke::new(1.0, text_color),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(value: f64) -> Bar {
        Bar { symbol: "X".into(), value, positive: value > 0.0 }
    }

    #[test]
    fn span_includes_zero() {
        assert_eq!(span(&[bar(2.0), bar(5.0)]), (0.0, 5.0));
        assert_eq!(span(&[bar(-3.0), bar(-1.0)]), (-3.0, 0.0));
        assert_eq!(span(&[bar(-2.0), bar(4.0)]), (-2.0, 4.0));
    }

    #[test]
    fn flat_series_gets_a_unit_span() {
        assert_eq!(span(&[bar(0.0)]), (-1.0, 1.0));
    }
}
