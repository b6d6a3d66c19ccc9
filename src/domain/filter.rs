//! Listing filters and sort order.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A selectable filter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOption {
    /// Wire value.
    pub id: &'static str,
    /// Display label.
    pub label: &'static str,
}

/// Product categories.
pub const CATEGORIES: &[FilterOption] = &[
    FilterOption { id: "homeEssentials", label: "Home Essentials" },
    FilterOption { id: "personalCare", label: "Personal Care" },
    FilterOption { id: "lifestyleAndConvinience", label: "Lifestyle & Convinience" },
];

/// Brands, shown as "services" on the home page.
pub const BRANDS: &[FilterOption] = &[
    FilterOption { id: "clean", label: "Clean" },
    FilterOption { id: "fix", label: "Fix" },
    FilterOption { id: "build", label: "Build" },
    FilterOption { id: "guard", label: "Guard" },
    FilterOption { id: "move", label: "Move" },
    FilterOption { id: "style", label: "Style" },
    FilterOption { id: "fit", label: "Fit" },
    FilterOption { id: "care", label: "Care" },
    FilterOption { id: "pets", label: "Pets" },
    FilterOption { id: "green", label: "Green" },
    FilterOption { id: "tech", label: "Tech" },
];

/// Filterable product attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterSection {
    /// `category` query parameter.
    Category,
    /// `brand` query parameter, labelled "Service".
    Brand,
}

impl FilterSection {
    /// Query parameter name.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Brand => "brand",
        }
    }

    /// Values that can be selected in the section.
    #[must_use]
    pub const fn options(self) -> &'static [FilterOption] {
        match self {
            Self::Category => CATEGORIES,
            Self::Brand => BRANDS,
        }
    }

    /// Heading shown above the section.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Brand => "Service",
        }
    }
}

/// Selected filter ids per section, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterParams {
    selected: BTreeMap<FilterSection, Vec<String>>,
}

impl FilterParams {
    /// No filters selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A filter holding exactly one value.
    #[must_use]
    pub fn single(section: FilterSection, id: impl Into<String>) -> Self {
        let mut params = Self::new();
        params.toggle(section, id);
        params
    }

    /// Adds `id` to `section`, or removes it when already selected.
    pub fn toggle(&mut self, section: FilterSection, id: impl Into<String>) {
        let id = id.into();
        let values = self.selected.entry(section).or_default();
        if let Some(pos) = values.iter().position(|v| *v == id) {
            values.remove(pos);
            if values.is_empty() {
                self.selected.remove(&section);
            }
        } else {
            values.push(id);
        }
    }

    /// Whether `id` is selected in `section`.
    #[must_use]
    pub fn is_selected(&self, section: FilterSection, id: &str) -> bool {
        self.selected
            .get(&section)
            .is_some_and(|values| values.iter().any(|v| v == id))
    }

    /// Whether no section has a selection.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Drops every selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Query pairs, values comma-joined, empty sections omitted.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        self.selected
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(section, values)| (section.key(), values.join(",")))
            .collect()
    }
}

/// Listing sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(missing_docs)]
pub enum SortOption {
    #[default]
    PriceLowToHigh,
    PriceHighToLow,
    TitleAToZ,
    TitleZToA,
}

impl SortOption {
    /// Every option in cycling order.
    pub const ALL: [Self; 4] = [
        Self::PriceLowToHigh,
        Self::PriceHighToLow,
        Self::TitleAToZ,
        Self::TitleZToA,
    ];

    /// Wire value of `sortBy`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PriceLowToHigh => "price-lowtohigh",
            Self::PriceHighToLow => "price-hightolow",
            Self::TitleAToZ => "title-atoz",
            Self::TitleZToA => "title-ztoa",
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PriceLowToHigh => "Price: Low to High",
            Self::PriceHighToLow => "Price: High to Low",
            Self::TitleAToZ => "Title: A to Z",
            Self::TitleZToA => "Title: Z to A",
        }
    }

    /// Next option, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::PriceLowToHigh => Self::PriceHighToLow,
            Self::PriceHighToLow => Self::TitleAToZ,
            Self::TitleAToZ => Self::TitleZToA,
            Self::TitleZToA => Self::PriceLowToHigh,
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|option| option.as_str() == s)
            .ok_or_else(|| format!("unknown sort option: {s}"))
    }
}
