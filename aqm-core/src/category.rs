use serde::{Deserialize, Serialize};
use std::fmt;

/// A display color as 8-bit RGB.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// CSS style hex string, e.g. `#10b981`.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

/// The six AQI severity bins, ordered from least to most severe.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Category {
    Good,
    Moderate,
    UnhealthySensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Good,
        Category::Moderate,
        Category::UnhealthySensitive,
        Category::Unhealthy,
        Category::VeryUnhealthy,
        Category::Hazardous,
    ];

    /// Classify an AQI value. Upper bounds are inclusive.
    pub fn from_aqi(aqi: u32) -> Category {
        match aqi {
            0..=50 => Category::Good,
            51..=100 => Category::Moderate,
            101..=150 => Category::UnhealthySensitive,
            151..=200 => Category::Unhealthy,
            201..=300 => Category::VeryUnhealthy,
            _ => Category::Hazardous,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Good => "Good",
            Category::Moderate => "Moderate",
            Category::UnhealthySensitive => "Unhealthy for Sensitive",
            Category::Unhealthy => "Unhealthy",
            Category::VeryUnhealthy => "Very Unhealthy",
            Category::Hazardous => "Hazardous",
        }
    }

    /// Green, yellow, orange, red, purple, dark purple.
    pub fn color(&self) -> Rgb {
        match self {
            Category::Good => Rgb(0x10, 0xb9, 0x81),
            Category::Moderate => Rgb(0xea, 0xb3, 0x08),
            Category::UnhealthySensitive => Rgb(0xf9, 0x73, 0x16),
            Category::Unhealthy => Rgb(0xef, 0x44, 0x44),
            Category::VeryUnhealthy => Rgb(0xa8, 0x55, 0xf7),
            Category::Hazardous => Rgb(0x6b, 0x21, 0xa8),
        }
    }

    /// Style tag used by presentation layers to theme the display.
    pub fn css_class(&self) -> &'static str {
        match self {
            Category::Good => "aqi-good",
            Category::Moderate => "aqi-moderate",
            Category::UnhealthySensitive => "aqi-unhealthy-sensitive",
            Category::Unhealthy => "aqi-unhealthy",
            Category::VeryUnhealthy => "aqi-very-unhealthy",
            Category::Hazardous => "aqi-hazardous",
        }
    }

    /// Legend entry, e.g. "Moderate (51-100)".
    pub fn range_label(&self) -> &'static str {
        match self {
            Category::Good => "Good (0-50)",
            Category::Moderate => "Moderate (51-100)",
            Category::UnhealthySensitive => "Unhealthy for Sensitive (101-150)",
            Category::Unhealthy => "Unhealthy (151-200)",
            Category::VeryUnhealthy => "Very Unhealthy (201-300)",
            Category::Hazardous => "Hazardous (300+)",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Category::Good => "Minimal impact",
            Category::Moderate => "Acceptable quality",
            Category::UnhealthySensitive => "Sensitive groups affected",
            Category::Unhealthy => "Everyone affected",
            Category::VeryUnhealthy => "Health warnings",
            Category::Hazardous => "Emergency conditions",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Category and color for an AQI value.
pub fn classify(aqi: u32) -> (Category, Rgb) {
    let category = Category::from_aqi(aqi);
    (category, category.color())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(0).0, Category::Good);
        assert_eq!(classify(50).0, Category::Good);
        assert_eq!(classify(51).0, Category::Moderate);
        assert_eq!(classify(100).0, Category::Moderate);
        assert_eq!(classify(101).0, Category::UnhealthySensitive);
        assert_eq!(classify(150).0, Category::UnhealthySensitive);
        assert_eq!(classify(151).0, Category::Unhealthy);
        assert_eq!(classify(200).0, Category::Unhealthy);
        assert_eq!(classify(201).0, Category::VeryUnhealthy);
        assert_eq!(classify(300).0, Category::VeryUnhealthy);
        assert_eq!(classify(301).0, Category::Hazardous);
        assert_eq!(classify(500).0, Category::Hazardous);
        assert_eq!(classify(999).0, Category::Hazardous);
    }

    #[test]
    fn test_colors_are_distinct_per_bin() {
        let mut colors: Vec<Rgb> = Category::ALL.iter().map(|c| c.color()).collect();
        colors.dedup();
        assert_eq!(colors.len(), 6);
        assert_eq!(classify(25).1.hex(), "#10b981");
        assert_eq!(classify(450).1.hex(), "#6b21a8");
    }

    #[test]
    fn test_categories_are_ordered_by_severity() {
        assert!(Category::Good < Category::Moderate);
        assert!(Category::VeryUnhealthy < Category::Hazardous);
        let mut sorted = Category::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, Category::ALL.to_vec());
    }

    #[test]
    fn test_css_class_and_legend() {
        assert_eq!(Category::UnhealthySensitive.css_class(), "aqi-unhealthy-sensitive");
        assert_eq!(Category::Hazardous.range_label(), "Hazardous (300+)");
        assert_eq!(Category::Good.description(), "Minimal impact");
    }
}
