//! Value and category filters applied to normalized results.

use ethnica_core::Business;

/// Narrowing applied after a source has answered.
///
/// Every listed attribute must be present on a business (AND). The category,
/// when set, must match exactly. Both comparisons ignore case and surrounding
/// whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    attributes: Vec<String>,
    category: Option<String>,
}

fn fold(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_lowercase())
}

impl SearchFilters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank entries are dropped; repeats collapse.
    #[must_use]
    pub fn with_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for attribute in attributes {
            if let Some(folded) = fold(attribute.as_ref()) {
                if !self.attributes.contains(&folded) {
                    self.attributes.push(folded);
                }
            }
        }
        self
    }

    /// A blank category means "any".
    #[must_use]
    pub fn with_category(mut self, category: Option<&str>) -> Self {
        self.category = category.and_then(fold);
        self
    }

    /// `"Woman Owned, Halal Options"` → two attribute filters.
    #[must_use]
    pub fn with_attribute_list(self, list: Option<&str>) -> Self {
        match list {
            Some(list) => self.with_attributes(list.split(',')),
            None => self,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.category.is_none()
    }

    #[must_use]
    pub fn matches(&self, business: &Business) -> bool {
        if let Some(category) = &self.category {
            if business.category.trim().to_lowercase() != *category {
                return false;
            }
        }
        self.attributes.iter().all(|wanted| {
            business
                .attributes
                .iter()
                .any(|have| have.trim().to_lowercase() == *wanted)
        })
    }

    pub(crate) fn apply(&self, businesses: Vec<Business>) -> Vec<Business> {
        if self.is_empty() {
            return businesses;
        }
        businesses.into_iter().filter(|b| self.matches(b)).collect()
    }
}
