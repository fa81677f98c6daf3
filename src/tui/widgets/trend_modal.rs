//! Price trend modal - line chart of one product's price history

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph, Widget},
};
use rust_decimal::prelude::ToPrimitive;

use super::spinner::{LoadingStage, Spinner};
use crate::tui::theme::Theme;
use crate::types::{format_fixed_2, PriceHistoryEntry, PricedProduct};

/// Popup size as a percentage of the terminal
const POPUP_PERCENT: u16 = 80;
const MIN_POPUP_WIDTH: u16 = 40;
const MIN_POPUP_HEIGHT: u16 = 12;

/// `percent`% of `len`, computed in u32 so wide terminals can't overflow
fn percent_of(len: u16, percent: u16) -> u16 {
    let scaled = u32::from(len) * u32::from(percent) / 100;
    u16::try_from(scaled).unwrap_or(len)
}

/// Chart coordinates: x in days since the first entry when every date parses,
/// otherwise the entry's position; y is the price.
pub fn chart_points(history: &[PriceHistoryEntry]) -> Vec<(f64, f64)> {
    let dates: Option<Vec<_>> = history.iter().map(|e| e.parsed_date()).collect();
    let first = dates.as_ref().and_then(|d| d.first().copied());

    history
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let x = match (&dates, first) {
                (Some(dates), Some(first)) => (dates[i] - first).num_days() as f64,
                _ => i as f64,
            };
            (x, entry.price.to_f64().unwrap_or(0.0))
        })
        .collect()
}

/// [min, max] over one coordinate, widened when flat
pub fn axis_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    if (max - min).abs() < f64::EPSILON {
        return [min - 1.0, max + 1.0];
    }
    [min, max]
}

/// Trend modal overlay
pub struct TrendModal<'a> {
    product: &'a PricedProduct,
    /// None while the history is loading
    history: Option<&'a [PriceHistoryEntry]>,
    spinner_frame: usize,
    theme: Theme,
}

impl<'a> TrendModal<'a> {
    pub fn new(
        product: &'a PricedProduct,
        history: Option<&'a [PriceHistoryEntry]>,
        spinner_frame: usize,
        theme: Theme,
    ) -> Self {
        Self {
            product,
            history,
            spinner_frame,
            theme,
        }
    }

    /// Calculate centered popup area
    pub fn centered_area(area: Rect) -> Rect {
        let width = percent_of(area.width, POPUP_PERCENT)
            .max(MIN_POPUP_WIDTH)
            .min(area.width);
        let height = percent_of(area.height, POPUP_PERCENT)
            .max(MIN_POPUP_HEIGHT)
            .min(area.height);
        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
    }
}

impl Widget for TrendModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let title = format!(" {} Price Trend ", self.product.name);
        let block = Block::default()
            .title(title)
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()));

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Chart
            Constraint::Length(1), // Close hint
        ])
        .split(inner);

        match self.history {
            None => {
                Spinner::new(self.spinner_frame, LoadingStage::History, self.theme)
                    .render(chunks[0], buf);
            }
            Some([]) => {
                let y = chunks[0].y + chunks[0].height / 2;
                Paragraph::new(Line::from(Span::styled(
                    "No price history",
                    Style::default().fg(self.theme.muted()),
                )))
                .alignment(Alignment::Center)
                .render(
                    Rect {
                        y,
                        height: 1,
                        ..chunks[0]
                    },
                    buf,
                );
            }
            Some(history) => self.render_chart(history, chunks[0], buf),
        }

        let hint = Line::from(vec![
            Span::styled(
                "Esc",
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(": Close", Style::default().fg(self.theme.muted())),
        ]);
        Paragraph::new(hint)
            .alignment(Alignment::Center)
            .render(chunks[1], buf);
    }
}

impl TrendModal<'_> {
    fn render_chart(&self, history: &[PriceHistoryEntry], area: Rect, buf: &mut Buffer) {
        let points = chart_points(history);
        let x_bounds = axis_bounds(points.iter().map(|(x, _)| *x));
        let y_bounds = axis_bounds(points.iter().map(|(_, y)| *y));

        let (first, last) = match (history.first(), history.last()) {
            (Some(first), Some(last)) => (first.date.clone(), last.date.clone()),
            _ => (String::new(), String::new()),
        };

        let price_labels: Vec<String> = history
            .iter()
            .map(|e| e.price)
            .min()
            .into_iter()
            .chain(history.iter().map(|e| e.price).max())
            .map(|p| format!("${}", format_fixed_2(p)))
            .collect();

        let label = format!("{} price", self.product.name);
        let datasets = vec![Dataset::default()
            .name(label)
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(self.theme.chart_line()))
            .data(&points)];

        let axis_style = Style::default().fg(self.theme.muted());
        let chart = Chart::new(datasets)
            .x_axis(
                Axis::default()
                    .style(axis_style)
                    .bounds(x_bounds)
                    .labels(vec![first, last]),
            )
            .y_axis(
                Axis::default()
                    .style(axis_style)
                    .bounds(y_bounds)
                    .labels(price_labels),
            );

        chart.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Price, PrevPrice, ProductId};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn entry(date: &str, price: Decimal) -> PriceHistoryEntry {
        PriceHistoryEntry {
            date: date.to_string(),
            price,
        }
    }

    fn product() -> PricedProduct {
        PricedProduct {
            id: ProductId::new(1).unwrap(),
            name: "Laptop".to_string(),
            category: "Electronics".to_string(),
            price: Price::new(dec!(999)),
            prev_price: PrevPrice::NotAvailable,
        }
    }

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    // ========== chart_points tests ==========

    #[test]
    fn test_chart_points_by_date() {
        let history = vec![
            entry("2025-01-01", dec!(10)),
            entry("2025-01-03", dec!(12.5)),
            entry("2025-01-10", dec!(11)),
        ];
        assert_eq!(
            chart_points(&history),
            vec![(0.0, 10.0), (2.0, 12.5), (9.0, 11.0)]
        );
    }

    #[test]
    fn test_chart_points_fall_back_to_position() {
        let history = vec![entry("first", dec!(1)), entry("2025-01-03", dec!(2))];
        assert_eq!(chart_points(&history), vec![(0.0, 1.0), (1.0, 2.0)]);
    }

    #[test]
    fn test_chart_points_empty() {
        assert!(chart_points(&[]).is_empty());
    }

    // ========== axis_bounds tests ==========

    #[test]
    fn test_axis_bounds() {
        assert_eq!(axis_bounds([3.0, 1.0, 2.0].into_iter()), [1.0, 3.0]);
    }

    #[test]
    fn test_axis_bounds_flat_is_widened() {
        assert_eq!(axis_bounds([5.0, 5.0].into_iter()), [4.0, 6.0]);
    }

    #[test]
    fn test_axis_bounds_empty() {
        assert_eq!(axis_bounds(std::iter::empty()), [0.0, 1.0]);
    }

    // ========== layout and render tests ==========

    #[test]
    fn test_centered_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = TrendModal::centered_area(area);
        assert_eq!(popup.width, 80);
        assert_eq!(popup.height, 40);
        assert_eq!(popup.x, 10);
        assert_eq!(popup.y, 5);
    }

    #[test]
    fn test_centered_area_small_terminal() {
        let area = Rect::new(0, 0, 30, 10);
        let popup = TrendModal::centered_area(area);
        assert_eq!(popup.width, 30);
        assert_eq!(popup.height, 10);
    }

    #[test]
    fn test_centered_area_very_large_terminal() {
        let area = Rect::new(0, 0, 1000, 900);
        let popup = TrendModal::centered_area(area);
        assert_eq!(popup.width, 800);
        assert_eq!(popup.height, 720);
        assert_eq!(popup.x, 100);
        assert_eq!(popup.y, 90);
    }

    #[test]
    fn test_percent_of_max_dimension() {
        assert_eq!(percent_of(u16::MAX, 80), 52428);
        assert_eq!(percent_of(u16::MAX, 100), u16::MAX);
    }

    #[test]
    fn test_renders_loading_spinner() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        let product = product();

        TrendModal::new(&product, None, 0, Theme::Dark).render(area, &mut buf);

        let content = buffer_text(&buf);
        assert!(content.contains("Laptop Price Trend"));
        assert!(content.contains("Fetching price history..."));
    }

    #[test]
    fn test_renders_empty_history_message() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        let product = product();

        TrendModal::new(&product, Some(&[]), 0, Theme::Dark).render(area, &mut buf);

        assert!(buffer_text(&buf).contains("No price history"));
    }

    #[test]
    fn test_renders_chart_labels() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        let product = product();
        let history = vec![entry("2025-01-01", dec!(10)), entry("2025-01-05", dec!(14.5))];

        TrendModal::new(&product, Some(&history), 0, Theme::Dark).render(area, &mut buf);

        let content = buffer_text(&buf);
        assert!(content.contains("2025-01-01"));
        assert!(content.contains("2025-01-05"));
        assert!(content.contains("$14.50"));
        assert!(content.contains("Esc"));
    }
}
