//! Category icon mapping

/// Icon shown next to a known product category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryIcon {
    Devices,
    Headphones,
    Tools,
    Watch,
    Database,
}

impl CategoryIcon {
    /// Stable icon identifier
    pub fn id(self) -> &'static str {
        match self {
            Self::Devices => "devices",
            Self::Headphones => "headphones",
            Self::Tools => "tools",
            Self::Watch => "watch",
            Self::Database => "database",
        }
    }

    /// Single-cell terminal glyph
    pub fn glyph(self) -> char {
        match self {
            Self::Devices => '▣',
            Self::Headphones => '♫',
            Self::Tools => '⚒',
            Self::Watch => '◷',
            Self::Database => '≣',
        }
    }
}

/// Map a category name to its icon. Unknown categories have no icon.
pub fn category_icon(category: &str) -> Option<CategoryIcon> {
    match category {
        "Electronics" => Some(CategoryIcon::Devices),
        "Accessories" => Some(CategoryIcon::Headphones),
        "Gadgets" => Some(CategoryIcon::Tools),
        "Wearables" => Some(CategoryIcon::Watch),
        "Storage" => Some(CategoryIcon::Database),
        _ => None,
    }
}
