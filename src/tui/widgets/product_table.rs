//! Product table widget - predicted prices with trend arrows

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::services::{category_icon, classify_trend};
use crate::tui::theme::Theme;
use crate::types::PricedProduct;

/// Maximum content width (centered beyond this)
const MAX_CONTENT_WIDTH: u16 = 170;

/// Column definitions: (label, width)
const COLUMNS: [(&str, u16); 5] = [
    ("ID", 6),
    ("Name", 30),
    ("Category", 18),
    ("Predicted Price", 18),
    ("Previous", 12),
];

/// Sum of column widths
const TABLE_WIDTH: u16 = 84;

/// Truncate to `max` characters, marking the cut with an ellipsis (UTF-8 safe)
pub fn truncate_name(name: &str, max: usize) -> String {
    if name.chars().count() > max {
        let kept: String = name.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    } else {
        name.to_string()
    }
}

/// "▣ Electronics", or the bare name padded for unknown categories
pub fn category_label(category: &str) -> String {
    match category_icon(category) {
        Some(icon) => format!("{} {}", icon.glyph(), category),
        None => format!("  {}", category),
    }
}

/// First visible row so that `selected` stays on screen
pub fn scroll_offset(selected: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 {
        return 0;
    }
    (selected + 1).saturating_sub(visible_rows)
}

/// Product table view
pub struct ProductTable<'a> {
    products: &'a [PricedProduct],
    selected: usize,
    theme: Theme,
}

impl<'a> ProductTable<'a> {
    pub fn new(products: &'a [PricedProduct], selected: usize, theme: Theme) -> Self {
        Self {
            products,
            selected,
            theme,
        }
    }
}

impl Widget for ProductTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let content_width = area.width.min(MAX_CONTENT_WIDTH);
        let x_offset = (area.width.saturating_sub(content_width)) / 2;
        let centered_area = Rect {
            x: area.x + x_offset,
            y: area.y,
            width: content_width,
            height: area.height,
        };

        let chunks = Layout::vertical([
            Constraint::Length(1), // Top padding
            Constraint::Length(1), // Title
            Constraint::Length(1), // Separator
            Constraint::Length(1), // Header
            Constraint::Fill(1),   // Product rows
            Constraint::Length(1), // Separator
            Constraint::Length(1), // Keybindings
        ])
        .split(centered_area);

        self.render_title(chunks[1], buf);
        self.render_separator(chunks[2], buf);
        self.render_header(chunks[3], buf);
        self.render_rows(chunks[4], buf);
        self.render_separator(chunks[5], buf);
        self.render_keybindings(chunks[6], buf);
    }
}

impl ProductTable<'_> {
    /// Horizontal offset that centers the table
    fn table_area(&self, area: Rect, y: u16) -> Rect {
        let offset = area.width.saturating_sub(TABLE_WIDTH) / 2;
        Rect {
            x: area.x + offset,
            y,
            width: TABLE_WIDTH.min(area.width),
            height: 1,
        }
    }

    fn render_title(&self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(Line::from(Span::styled(
            "Predicted Prices",
            Style::default()
                .fg(self.theme.title())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(area, buf);
    }

    fn render_separator(&self, area: Rect, buf: &mut Buffer) {
        let line = "─".repeat(area.width as usize);
        buf.set_string(
            area.x,
            area.y,
            &line,
            Style::default().fg(self.theme.muted()),
        );
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let bold = Style::default()
            .fg(self.theme.text())
            .add_modifier(Modifier::BOLD);

        let spans: Vec<Span> = COLUMNS
            .iter()
            .enumerate()
            .map(|(i, (label, width))| {
                let width = *width as usize;
                // ID and Name left-aligned, the rest right-aligned
                let text = if i < 3 {
                    format!("{:<width$}", label, width = width)
                } else {
                    format!("{:>width$}", label, width = width)
                };
                Span::styled(text, bold)
            })
            .collect();

        Paragraph::new(Line::from(spans)).render(self.table_area(area, area.y), buf);
    }

    fn render_rows(&self, area: Rect, buf: &mut Buffer) {
        if self.products.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "No products. Press r to reload.",
                Style::default().fg(self.theme.muted()),
            )))
            .alignment(Alignment::Center)
            .render(
                Rect {
                    height: area.height.min(1),
                    ..area
                },
                buf,
            );
            return;
        }

        let visible_rows = area.height as usize;
        let offset = scroll_offset(self.selected, visible_rows);

        for (i, product) in self
            .products
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible_rows)
        {
            let y = area.y + (i - offset) as u16;
            let row = self.product_row(product, i == self.selected);
            Paragraph::new(row).render(self.table_area(area, y), buf);
        }
    }

    fn product_row(&self, product: &PricedProduct, selected: bool) -> Line<'static> {
        let trend = classify_trend(product.prev_price, product.price);
        let price_text = match trend.arrow() {
            Some(arrow) => format!("${} {}", product.price, arrow),
            None => format!("${}  ", product.price),
        };

        let (marker, name_style) = if selected {
            (
                "▸ ",
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("  ", Style::default().fg(self.theme.text()))
        };

        Line::from(vec![
            Span::styled(
                format!("{}{:<4}", marker, product.id),
                Style::default().fg(self.theme.accent()),
            ),
            Span::styled(
                format!("{:<30}", truncate_name(&product.name, 28)),
                name_style,
            ),
            Span::styled(
                format!("{:<18}", truncate_name(&category_label(&product.category), 17)),
                Style::default().fg(self.theme.text()),
            ),
            Span::styled(
                format!("{:>18}", price_text),
                Style::default().fg(self.theme.trend_color(trend)),
            ),
            Span::styled(
                format!("{:>12}", product.prev_price),
                Style::default().fg(self.theme.muted()),
            ),
        ])
    }

    fn render_keybindings(&self, area: Rect, buf: &mut Buffer) {
        let bindings = Paragraph::new(Line::from(vec![
            Span::styled("Enter", Style::default().fg(self.theme.accent())),
            Span::styled(": Price trend", Style::default().fg(self.theme.muted())),
            Span::raw("  "),
            Span::styled("r", Style::default().fg(self.theme.accent())),
            Span::styled(": Reload", Style::default().fg(self.theme.muted())),
            Span::raw("  "),
            Span::styled("q", Style::default().fg(self.theme.accent())),
            Span::styled(": Quit", Style::default().fg(self.theme.muted())),
            Span::raw("  "),
            Span::styled("?", Style::default().fg(self.theme.accent())),
            Span::styled(": Help", Style::default().fg(self.theme.muted())),
        ]))
        .alignment(Alignment::Center);

        bindings.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Price, PrevPrice, ProductId};
    use rust_decimal_macros::dec;

    fn product(id: u32, name: &str, category: &str, price: Price, prev: PrevPrice) -> PricedProduct {
        PricedProduct {
            id: ProductId::new(id).unwrap(),
            name: name.to_string(),
            category: category.to_string(),
            price,
            prev_price: prev,
        }
    }

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    // ========== helper tests ==========

    #[test]
    fn test_table_width_matches_columns() {
        let total: u16 = COLUMNS.iter().map(|(_, w)| w).sum();
        assert_eq!(total, TABLE_WIDTH);
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Laptop", 10), "Laptop");
        assert_eq!(truncate_name("Mechanical Keyboard", 10), "Mechanica…");
        assert_eq!(truncate_name("Écouteurs sans fil", 5), "Écou…");
    }

    #[test]
    fn test_category_label() {
        assert_eq!(category_label("Storage"), "≣ Storage");
        assert_eq!(category_label("Toys"), "  Toys");
    }

    #[test]
    fn test_scroll_offset() {
        assert_eq!(scroll_offset(0, 5), 0);
        assert_eq!(scroll_offset(4, 5), 0);
        assert_eq!(scroll_offset(5, 5), 1);
        assert_eq!(scroll_offset(9, 5), 5);
        assert_eq!(scroll_offset(3, 0), 0);
    }

    // ========== render tests ==========

    #[test]
    fn test_renders_rows_with_trend_arrows() {
        let products = vec![
            product(
                1,
                "Laptop",
                "Electronics",
                Price::new(dec!(12)),
                PrevPrice::Recorded(Price::new(dec!(10))),
            ),
            product(
                2,
                "Smartwatch",
                "Wearables",
                Price::new(dec!(8)),
                PrevPrice::Recorded(Price::new(dec!(9))),
            ),
            product(3, "Cable", "Misc", Price::new(dec!(5)), PrevPrice::NotAvailable),
        ];
        let area = Rect::new(0, 0, 100, 12);
        let mut buf = Buffer::empty(area);

        ProductTable::new(&products, 0, Theme::Dark).render(area, &mut buf);

        let content = buffer_text(&buf);
        assert!(content.contains("Predicted Prices"));
        assert!(content.contains("$12.00 ▲"));
        assert!(content.contains("$8.00 ▼"));
        assert!(content.contains("$5.00"));
        assert!(content.contains("N/A"));
        assert!(content.contains("▣ Electronics"));
        assert!(content.contains("◷ Wearables"));
        assert!(content.contains("▸ 1"));
    }

    #[test]
    fn test_renders_empty_list_without_error() {
        let area = Rect::new(0, 0, 100, 10);
        let mut buf = Buffer::empty(area);

        ProductTable::new(&[], 0, Theme::Dark).render(area, &mut buf);

        let content = buffer_text(&buf);
        assert!(content.contains("No products"));
        assert!(!content.contains("Error"));
    }

    #[test]
    fn test_selected_row_stays_visible() {
        let products: Vec<PricedProduct> = (1..=10)
            .map(|n| {
                product(
                    n,
                    &format!("Item{:02}", n),
                    "Gadgets",
                    Price::new(dec!(1)),
                    PrevPrice::NotAvailable,
                )
            })
            .collect();
        // 6 fixed lines leave 3 rows
        let area = Rect::new(0, 0, 100, 9);
        let mut buf = Buffer::empty(area);

        ProductTable::new(&products, 9, Theme::Dark).render(area, &mut buf);

        let content = buffer_text(&buf);
        assert!(content.contains("Item10"));
        assert!(content.contains("Item08"));
        assert!(!content.contains("Item01"));
    }
}
