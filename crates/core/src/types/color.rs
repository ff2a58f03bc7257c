//! Color swatch mapping.
//!
//! Catalog colors arrive as free text (`"Noir"`), hex literals (`"#1a1a2e"`)
//! or CSS `rgb()`/`rgba()` values. The filter UI needs an actual swatch
//! color for each label, so this module maps the shop's French color names
//! to hex codes and passes literals through untouched.

/// Fallback swatch for labels with no known mapping.
pub const DEFAULT_SWATCH: &str = "#CCCCCC";

/// The shop's color vocabulary, mapped to hex swatches.
const SWATCHES: &[(&str, &str)] = &[
    ("Noir", "#000000"),
    ("Blanc", "#FFFFFF"),
    ("Gris", "#808080"),
    ("Marine", "#000080"),
    ("Rouge", "#FF0000"),
    ("Bleu", "#0000FF"),
    ("Rose", "#FFC0CB"),
    ("Lavande", "#E6E6FA"),
    ("Jaune", "#FFFF00"),
    ("Menthe", "#98FB98"),
    ("Beige", "#F5F5DC"),
    ("Vert", "#008000"),
    ("Orange", "#FFA500"),
    ("Violet", "#8A2BE2"),
    ("Kaki", "#F0E68C"),
    ("Marron", "#A52A2A"),
    ("Bordeaux", "#800020"),
];

/// Resolve a color label to a displayable CSS color.
///
/// Hex (`#RGB`/`#RRGGBB`) and `rgb()`/`rgba()` literals are returned as-is.
/// Named colors are looked up exactly, then with the first letter
/// capitalized (the backend is not consistent about casing). Unknown labels
/// fall back to [`DEFAULT_SWATCH`].
#[must_use]
pub fn color_to_hex(label: &str) -> String {
    if is_hex_literal(label) || is_rgb_literal(label) {
        return label.to_owned();
    }

    if let Some(hex) = lookup(label) {
        return hex.to_owned();
    }

    // Retry with "noir" / "NOIR" style inputs normalized to "Noir".
    let capitalized = capitalize(label);
    lookup(&capitalized).unwrap_or(DEFAULT_SWATCH).to_owned()
}

fn lookup(label: &str) -> Option<&'static str> {
    SWATCHES
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, hex)| *hex)
}

fn is_hex_literal(s: &str) -> bool {
    let Some(digits) = s.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

fn is_rgb_literal(s: &str) -> bool {
    let lower = s.to_ascii_lowercase();
    lower.starts_with("rgb(") || lower.starts_with("rgba(")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_color() {
        assert_eq!(color_to_hex("Noir"), "#000000");
        assert_eq!(color_to_hex("Bordeaux"), "#800020");
    }

    #[test]
    fn test_case_insensitive_lookup() {
        assert_eq!(color_to_hex("noir"), "#000000");
        assert_eq!(color_to_hex("MARINE"), "#000080");
    }

    #[test]
    fn test_hex_passthrough() {
        assert_eq!(color_to_hex("#1a2b3c"), "#1a2b3c");
        assert_eq!(color_to_hex("#fff"), "#fff");
    }

    #[test]
    fn test_rgb_passthrough() {
        assert_eq!(color_to_hex("rgb(10, 20, 30)"), "rgb(10, 20, 30)");
        assert_eq!(color_to_hex("RGBA(0,0,0,0.5)"), "RGBA(0,0,0,0.5)");
    }

    #[test]
    fn test_invalid_hex_falls_back() {
        // Wrong length and non-hex digits are not literals.
        assert_eq!(color_to_hex("#12345"), DEFAULT_SWATCH);
        assert_eq!(color_to_hex("#zzz"), DEFAULT_SWATCH);
    }

    #[test]
    fn test_unknown_label_falls_back() {
        assert_eq!(color_to_hex("Chartreuse"), DEFAULT_SWATCH);
    }
}
