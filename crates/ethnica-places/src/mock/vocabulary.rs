//! Fixed word lists the mock generator draws from.

pub const CATEGORIES: &[&str] = &[
    "Restaurant",
    "Café",
    "Bar",
    "Bakery",
    "Coffee Shop",
    "Grocery",
    "Bookstore",
    "Clothing Store",
    "Electronics",
    "Beauty Salon",
    "Hardware Store",
    "Pharmacy",
    "Gym",
    "Art Gallery",
    "Gift Shop",
    "Yoga Studio",
    "Pet Store",
    "Florist",
    "Food Truck",
    "Jewelry Store",
];

pub const ATTRIBUTES: &[&str] = &[
    "Woman Owned",
    "Black Owned",
    "LGBTQ+ Owned",
    "Latino Owned",
    "Asian Owned",
    "Veteran Owned",
    "Locally Owned",
    "Family Owned",
    "Sustainable",
    "Organic",
    "Vegan Options",
    "Fair Trade",
    "Eco-Friendly",
    "Minority Owned",
    "Ethical Business",
    "Budget Friendly",
    "Premium",
    "Highly Rated",
];

pub(crate) const NAME_LEADS: &[&[&str]] = &[
    &[
        "The", "Happy", "Golden", "Green", "Blue", "Urban", "Rustic", "Modern", "Classic",
    ],
    &[
        "Sunshine", "Mountain", "Ocean", "City", "Garden", "Valley", "River",
    ],
    &[
        "Fresh", "Tasty", "Artisan", "Organic", "Premium", "Craft", "Homemade",
    ],
    &[
        "Local",
        "Neighborhood",
        "Community",
        "Family",
        "Friendly",
        "Cozy",
        "Trendy",
    ],
];

/// Suffixes for the `"<Category> <Suffix>"` name template.
pub(crate) const NAME_SUFFIXES: &[&str] = &[
    "House", "Corner", "Spot", "Place", "Station", "Hub", "Market",
];

pub(crate) const STREET_NAMES: &[&str] = &[
    "Main", "Oak", "Maple", "Cedar", "Pine", "Elm", "Park", "Lake", "River", "Hill", "Valley",
    "Mountain", "Ocean",
];

pub(crate) const STREET_TYPES: &[&str] = &["St", "Ave", "Blvd", "Dr", "Ln", "Rd", "Way", "Pl", "Ct"];

pub(crate) const PHOTO_SETS: &[&[&str]] = &[
    &["https://images.unsplash.com/photo-1517248135467-4c7edcad34c4?w=1000&q=80"],
    &["https://images.unsplash.com/photo-1526365609942-180c5ee58144?w=1000&q=80"],
    &["https://images.unsplash.com/photo-1555396273-367ea4eb4db5?w=1000&q=80"],
];

pub(crate) const PLACEHOLDER_PHOTOS: &[&str] = &[
    "https://via.placeholder.com/400x300/4F46E5/FFFFFF?text=Restaurant",
    "https://via.placeholder.com/400x300/6366F1/FFFFFF?text=Cafe",
    "https://via.placeholder.com/400x300/8B5CF6/FFFFFF?text=Shop",
    "https://via.placeholder.com/400x300/EC4899/FFFFFF?text=Grocery",
    "https://via.placeholder.com/400x300/F43F5E/FFFFFF?text=Bakery",
];

pub(crate) const REVIEW_TEXT: &str =
    "This place is amazing! I highly recommend checking it out when you're in the area.";

/// First vocabulary category containing `term` (case-insensitive).
#[must_use]
pub fn matching_category(term: &str) -> Option<&'static str> {
    let needle = term.to_lowercase();
    CATEGORIES
        .iter()
        .copied()
        .find(|c| c.to_lowercase().contains(&needle))
}

/// `"vegan sushi"` → `"Vegan Sushi"`.
#[must_use]
pub fn title_case(term: &str) -> String {
    term.split_whitespace()
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Upper-case the first character only: `"bakery"` → `"Bakery"`.
#[must_use]
pub fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub(crate) fn slug(s: &str) -> String {
    s.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
}
