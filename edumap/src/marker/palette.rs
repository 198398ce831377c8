//! Icon colors per institution type.

use std::collections::HashMap;

/// Color used for types without an explicit entry.
pub const DEFAULT_COLOR: &str = "#3498db";

/// Mapping from institution type to icon color.
///
/// The set of types is open-ended; unknown types get the default color.
#[derive(Debug, Clone, PartialEq)]
pub struct TypePalette {
    colors: HashMap<String, String>,
    default_color: String,
}

impl TypePalette {
    /// Create an empty palette where every type gets `default_color`.
    pub fn new(default_color: &str) -> Self {
        Self {
            colors: HashMap::new(),
            default_color: default_color.to_string(),
        }
    }

    /// Builder-style variant of [`set_color`](Self::set_color).
    pub fn with_color(mut self, kind: &str, color: &str) -> Self {
        self.set_color(kind, color);
        self
    }

    /// Assign a color to a type, replacing any previous one.
    pub fn set_color(&mut self, kind: &str, color: &str) {
        self.colors.insert(kind.to_string(), color.to_string());
    }

    /// Replace the fallback color.
    pub fn set_default_color(&mut self, color: &str) {
        self.default_color = color.to_string();
    }

    /// Icon color for a type (exact match), falling back to the default.
    pub fn color_for(&self, kind: &str) -> &str {
        self.colors
            .get(kind)
            .map(String::as_str)
            .unwrap_or(self.default_color.as_str())
    }

    /// The fallback color.
    pub fn default_color(&self) -> &str {
        &self.default_color
    }

    /// Explicit entries sorted by type name.
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .colors
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort_unstable();
        entries
    }
}

impl Default for TypePalette {
    fn default() -> Self {
        Self::new(DEFAULT_COLOR)
            .with_color("Școală Gimnazială", "#3498db")
            .with_color("Liceu", "#e74c3c")
            .with_color("Grădiniță", "#f39c12")
            .with_color("Colegiu", "#9b59b6")
    }
}

/// Short icon label for a type: uppercase initials of its words, at most three.
///
/// Returns `"?"` for an empty type.
pub fn short_label(kind: &str) -> String {
    let label: String = kind
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(3)
        .collect();

    if label.is_empty() {
        "?".to_string()
    } else {
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_colors() {
        let palette = TypePalette::default();
        assert_eq!(palette.color_for("Școală Gimnazială"), "#3498db");
        assert_eq!(palette.color_for("Liceu"), "#e74c3c");
        assert_eq!(palette.color_for("Grădiniță"), "#f39c12");
        assert_eq!(palette.color_for("Colegiu"), "#9b59b6");
    }

    #[test]
    fn test_unknown_type_uses_default() {
        let palette = TypePalette::default();
        assert_eq!(palette.color_for("Universitate"), DEFAULT_COLOR);
        assert_eq!(palette.color_for(""), DEFAULT_COLOR);
        // Matching is exact
        assert_eq!(palette.color_for("liceu"), DEFAULT_COLOR);
    }

    #[test]
    fn test_override_and_default() {
        let mut palette = TypePalette::default();
        palette.set_color("Liceu", "#000000");
        palette.set_default_color("#ffffff");
        assert_eq!(palette.color_for("Liceu"), "#000000");
        assert_eq!(palette.color_for("Universitate"), "#ffffff");
    }

    #[test]
    fn test_entries_sorted() {
        let palette = TypePalette::new("#111111")
            .with_color("Liceu", "#e74c3c")
            .with_color("Colegiu", "#9b59b6");
        assert_eq!(
            palette.entries(),
            vec![("Colegiu", "#9b59b6"), ("Liceu", "#e74c3c")]
        );
    }

    #[test]
    fn test_short_label() {
        assert_eq!(short_label("Școală Gimnazială"), "ȘG");
        assert_eq!(short_label("Liceu"), "L");
        assert_eq!(short_label("liceu tehnologic"), "LT");
        assert_eq!(short_label("a b c d"), "ABC");
        assert_eq!(short_label("   "), "?");
        assert_eq!(short_label(""), "?");
    }
}
