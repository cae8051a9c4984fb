//! Health recommendations for each severity bin.

use crate::category::Category;

/// Ordered health recommendations for `category`.
pub fn recommendations(category: Category) -> &'static [&'static str] {
    match category {
        Category::Good => &[
            "Air quality is good. Perfect for outdoor activities!",
            "Great day for jogging, cycling, or outdoor sports.",
            "Windows can be opened for fresh air ventilation.",
        ],
        Category::Moderate => &[
            "Air quality is acceptable for most people.",
            "Sensitive individuals should consider limiting prolonged outdoor activities.",
            "Good day for normal outdoor activities with minor precautions.",
        ],
        Category::UnhealthySensitive => &[
            "Sensitive groups should reduce outdoor activities.",
            "Children, elderly, and people with respiratory issues should stay indoors.",
            "Consider wearing a mask if you must go outside.",
        ],
        Category::Unhealthy => &[
            "Everyone should limit outdoor activities.",
            "Wear N95 masks when going outside.",
            "Keep windows closed and use air purifiers indoors.",
            "Avoid outdoor exercise and strenuous activities.",
        ],
        Category::VeryUnhealthy => &[
            "Avoid all outdoor activities.",
            "Stay indoors with windows and doors closed.",
            "Use air purifiers and wear masks even indoors if needed.",
            "Seek medical attention if experiencing breathing difficulties.",
        ],
        Category::Hazardous => &[
            "Health emergency conditions! Stay indoors.",
            "Avoid all outdoor exposure.",
            "Use high-quality air purifiers and sealed indoor spaces.",
            "Seek immediate medical attention for any respiratory symptoms.",
        ],
    }
}

/// Ordered health recommendations for an AQI value.
pub fn advise(aqi: u32) -> &'static [&'static str] {
    recommendations(Category::from_aqi(aqi))
}
