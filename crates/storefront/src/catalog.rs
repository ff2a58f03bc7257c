//! Pure filter/sort/facet engine for the category browse view.
//!
//! Given a fetched product list and a [`FilterState`], [`browse`] produces
//! the filtered, sorted, paginated [`CatalogPage`] the UI renders. Nothing
//! here touches the network or storage; the full filtered set is computed
//! once and sliced for "show more".
//!
//! Facets are context-sensitive: the selectable colors are computed from
//! the subset that already satisfies the price and size constraints (and
//! vice versa), so the filter UI never offers a choice that would yield
//! zero results.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use rust_decimal::Decimal;

use velours_core::{CategoryId, Product};

/// Products revealed per "show more" click.
pub const PAGE_SIZE: usize = 6;

/// Default upper bound of the price slider, in dinars. Widened when the
/// catalog contains more expensive items.
const DEFAULT_MAX_PRICE: u32 = 200;

// =============================================================================
// Filter state
// =============================================================================

/// The category token driving the browse view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every product.
    All,
    /// Best sellers (`is_featured`).
    Featured,
    /// New arrivals (category tagged `new`, or flagged by the backend).
    NewArrivals,
    /// The unisex collections shelf.
    Collections,
    /// Exact category match.
    Category(CategoryId),
}

impl CategoryFilter {
    /// Parse a route token (`all`, `meilleures-ventes`, `nouveautes`,
    /// `collections`, or a raw category id).
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token {
            "" | "all" => Self::All,
            "meilleures-ventes" => Self::Featured,
            "nouveautes" => Self::NewArrivals,
            "collections" => Self::Collections,
            other => Self::Category(CategoryId::new(other)),
        }
    }

    /// Whether a product belongs to this category view.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Featured => product.is_featured,
            Self::NewArrivals => product.is_new || product.category_id.as_str().contains("new"),
            Self::Collections => product.category_id.as_str() == "unisexe",
            Self::Category(id) => product.category_id == *id,
        }
    }

    /// The `category` query parameter sent to the backend for this view.
    ///
    /// The backend pre-filters on legacy category names; the engine then
    /// re-applies the predicate client-side, so an over-broad backend
    /// response stays correct.
    #[must_use]
    pub fn backend_param(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Featured => Some("best-seller"),
            Self::NewArrivals => Some("new"),
            Self::Collections => Some("unisexe"),
            Self::Category(id) => Some(id.as_str()),
        }
    }

    /// The contextual message shown when the view has no products.
    #[must_use]
    pub fn empty_state(&self) -> EmptyState {
        match self {
            Self::NewArrivals => EmptyState {
                title: "Aucune nouveauté pour le moment",
                body: "Revenez bientôt pour découvrir nos prochaines nouveautés !",
            },
            Self::Featured => EmptyState {
                title: "Aucun best-seller pour le moment",
                body: "Les meilleures ventes seront bientôt disponibles ici.",
            },
            _ => EmptyState {
                title: "Aucun produit trouvé",
                body: "Essayez de modifier vos critères de recherche ou de filtrage.",
            },
        }
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self::All
    }
}

/// Empty-view message pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState {
    pub title: &'static str,
    pub body: &'static str,
}

/// Sort order for the browse view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Name A-Z (the view's default).
    #[default]
    NameAsc,
    /// Name Z-A.
    NameDesc,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
}

impl SortKey {
    /// Parse a `name-asc`-style token.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "name-asc" => Some(Self::NameAsc),
            "name-desc" => Some(Self::NameDesc),
            "price-asc" => Some(Self::PriceAsc),
            "price-desc" => Some(Self::PriceDesc),
            _ => None,
        }
    }

    /// The token form used in query strings and the sort dropdown.
    #[must_use]
    pub const fn as_token(self) -> &'static str {
        match self {
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
        }
    }
}

/// Inclusive price range filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    /// Create a range; `min` and `max` are inclusive bounds.
    #[must_use]
    pub const fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.min && price <= self.max
    }

    fn is_default(&self) -> bool {
        self.min == Decimal::ZERO && self.max == Decimal::from(DEFAULT_MAX_PRICE)
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::new(Decimal::ZERO, Decimal::from(DEFAULT_MAX_PRICE))
    }
}

/// Filter criteria for the browse view.
///
/// Ephemeral: reconstructed from URL query parameters and in-memory UI
/// state on every navigation, never persisted.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    /// Active category token.
    pub category: CategoryFilter,
    /// Inclusive price range.
    pub price_range: PriceRange,
    /// Selected color labels; empty means "any color".
    pub colors: Vec<String>,
    /// Selected size labels; empty means "any size".
    pub sizes: Vec<String>,
    /// Normalized (trimmed, lowercased) free-text search term.
    search: Option<String>,
    /// Active sort order.
    pub sort: SortKey,
}

impl FilterState {
    /// Start a filter state for a category view.
    #[must_use]
    pub fn for_category(category: CategoryFilter) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }

    /// Set the free-text search term, normalizing it once (trim +
    /// lowercase). An all-whitespace term clears the search.
    pub fn set_search(&mut self, term: &str) {
        let normalized = term.trim().to_lowercase();
        self.search = (!normalized.is_empty()).then_some(normalized);
    }

    /// The normalized search term, if any.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Widen the default price range to cover the whole catalog.
    ///
    /// Only applies while the range is still the untouched default, so a
    /// shopper's explicit narrowing is never overwritten.
    pub fn widen_max(&mut self, catalog_max: Decimal) {
        if self.price_range.is_default() && catalog_max > self.price_range.max {
            self.price_range.max = catalog_max;
        }
    }

    /// Whether a product passes every active predicate.
    ///
    /// Predicates are AND-combined, cheapest first; the substring search
    /// runs last.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if !self.category.matches(product) {
            return false;
        }

        if !self.price_range.contains(product.price) {
            return false;
        }

        if !self.colors.is_empty()
            && !product.colors.iter().any(|c| self.colors.contains(c))
        {
            return false;
        }

        if !self.sizes.is_empty() && !product.sizes.iter().any(|s| self.sizes.contains(s)) {
            return false;
        }

        if let Some(term) = &self.search {
            let in_name = product.name.to_lowercase().contains(term);
            let in_description = product.description.to_lowercase().contains(term);
            let in_colors = product
                .colors
                .iter()
                .any(|c| c.to_lowercase().contains(term));
            if !(in_name || in_description || in_colors) {
                return false;
            }
        }

        true
    }

    /// Reconstruct filter state from a URL query string.
    ///
    /// Recognized parameters: `colors` (comma-separated), `sizes`
    /// (comma-separated), `price` (`min-max`), `search`, `sort`.
    /// Unknown or malformed parameters fall back to the defaults.
    #[must_use]
    pub fn from_query(category: CategoryFilter, query: &str) -> Self {
        let mut state = Self::for_category(category);

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "colors" => {
                    state.colors = split_csv(&value);
                }
                "sizes" => {
                    state.sizes = split_csv(&value);
                }
                "price" => {
                    if let Some(range) = parse_price_range(&value) {
                        state.price_range = range;
                    }
                }
                "search" => state.set_search(&value),
                "sort" => {
                    if let Some(sort) = SortKey::parse(&value) {
                        state.sort = sort;
                    }
                }
                _ => {}
            }
        }

        state
    }

    /// Serialize the active filters back into a query string for URL sync.
    ///
    /// Defaults are omitted so an untouched view keeps a clean URL.
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());

        if !self.colors.is_empty() {
            serializer.append_pair("colors", &self.colors.join(","));
        }
        if !self.sizes.is_empty() {
            serializer.append_pair("sizes", &self.sizes.join(","));
        }
        if !self.price_range.is_default() {
            serializer.append_pair(
                "price",
                &format!("{}-{}", self.price_range.min, self.price_range.max),
            );
        }
        if let Some(term) = &self.search {
            serializer.append_pair("search", term);
        }

        serializer.finish()
    }
}

fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn parse_price_range(value: &str) -> Option<PriceRange> {
    let (min, max) = value.split_once('-')?;
    let min: Decimal = min.trim().parse().ok()?;
    let max: Decimal = max.trim().parse().ok()?;
    (min <= max).then_some(PriceRange::new(min, max))
}

// =============================================================================
// Filtering and sorting
// =============================================================================

/// Apply every active predicate, preserving catalog order.
#[must_use]
pub fn filter_products(products: &[Product], state: &FilterState) -> Vec<Product> {
    products
        .iter()
        .filter(|product| state.matches(product))
        .cloned()
        .collect()
}

/// Stable sort by the active key; ties keep insertion order.
pub fn sort_products(products: &mut [Product], key: SortKey) {
    match key {
        SortKey::NameAsc => products.sort_by(compare_names),
        SortKey::NameDesc => products.sort_by(|a, b| compare_names(b, a)),
        SortKey::PriceAsc => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
    }
}

/// Case-insensitive name ordering.
fn compare_names(a: &Product, b: &Product) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

/// Filter, sort, and paginate in one pass: the view the UI renders.
#[must_use]
pub fn browse(products: &[Product], state: &FilterState) -> CatalogPage {
    let mut filtered = filter_products(products, state);
    sort_products(&mut filtered, state.sort);
    CatalogPage::new(filtered)
}

// =============================================================================
// Pagination
// =============================================================================

/// The filtered-and-sorted result set with a visibility window.
///
/// "Show more" only moves the window; the set is never recomputed.
#[derive(Debug, Clone)]
pub struct CatalogPage {
    items: Vec<Product>,
    visible: usize,
}

impl CatalogPage {
    fn new(items: Vec<Product>) -> Self {
        Self {
            items,
            visible: PAGE_SIZE,
        }
    }

    /// The currently visible slice.
    #[must_use]
    pub fn visible(&self) -> &[Product] {
        let end = self.visible.min(self.items.len());
        self.items.get(..end).unwrap_or(&self.items)
    }

    /// Every item in the filtered set, sorted.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.items
    }

    /// Size of the full filtered set.
    #[must_use]
    pub fn total(&self) -> usize {
        self.items.len()
    }

    /// Whether the set is empty (the UI shows the contextual empty state).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether "show more" has anything left to reveal.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.visible < self.items.len()
    }

    /// Reveal the next page's worth of items.
    pub fn show_more(&mut self) {
        self.visible = (self.visible + PAGE_SIZE).min(self.items.len().max(PAGE_SIZE));
    }

    /// Collapse back to the first page.
    pub fn show_less(&mut self) {
        self.visible = PAGE_SIZE;
    }
}

// =============================================================================
// Facets
// =============================================================================

/// Selectable filter values, computed from the constrained subset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Facets {
    /// Colors available under the current price/size constraints.
    pub colors: Vec<String>,
    /// Sizes available under the current price/color constraints.
    pub sizes: Vec<String>,
}

/// Compute the selectable colors and sizes for the filter panel.
///
/// Each facet ignores its own dimension: colors are gathered from products
/// matching the category, search, price, and *size* constraints; sizes
/// from products matching category, search, price, and *color*
/// constraints. Values are deduplicated and sorted.
#[must_use]
pub fn available_facets(products: &[Product], state: &FilterState) -> Facets {
    let mut colors = BTreeSet::new();
    let mut sizes = BTreeSet::new();

    let mut without_colors = state.clone();
    without_colors.colors.clear();
    let mut without_sizes = state.clone();
    without_sizes.sizes.clear();

    for product in products {
        if without_colors.matches(product) {
            colors.extend(product.colors.iter().cloned());
        }
        if without_sizes.matches(product) {
            sizes.extend(product.sizes.iter().cloned());
        }
    }

    Facets {
        colors: colors.into_iter().collect(),
        sizes: sizes.into_iter().collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use velours_core::{ProductId, Rating};

    struct Spec<'a> {
        id: &'a str,
        name: &'a str,
        price: i64,
        category: &'a str,
        colors: &'a [&'a str],
        sizes: &'a [&'a str],
        featured: bool,
    }

    fn make(spec: &Spec<'_>) -> Product {
        Product {
            id: ProductId::new(spec.id),
            name: spec.name.to_owned(),
            description: format!("Description de {}", spec.name),
            price: Decimal::from(spec.price),
            category_id: CategoryId::new(spec.category),
            category: None,
            images: vec![],
            sizes: spec.sizes.iter().map(|s| (*s).to_owned()).collect(),
            colors: spec.colors.iter().map(|c| (*c).to_owned()).collect(),
            rating: Rating::Five,
            stock_quantity: 1,
            is_featured: spec.featured,
            is_new: false,
            created_at: chrono::Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            make(&Spec {
                id: "p1",
                name: "Blouson",
                price: 20,
                category: "unisexe",
                colors: &["Noir"],
                sizes: &["S", "M"],
                featured: false,
            }),
            make(&Spec {
                id: "p2",
                name: "Chemise",
                price: 50,
                category: "unisexe",
                colors: &["Blanc", "Bleu"],
                sizes: &["M"],
                featured: true,
            }),
            make(&Spec {
                id: "p3",
                name: "Anorak",
                price: 80,
                category: "new-homme",
                colors: &["Rouge"],
                sizes: &["L"],
                featured: false,
            }),
        ]
    }

    #[test]
    fn test_price_range_excludes_out_of_range() {
        let mut state = FilterState::for_category(CategoryFilter::All);
        state.price_range = PriceRange::new(Decimal::from(30), Decimal::from(100));

        let result = filter_products(&catalog(), &state);
        let ids: Vec<_> = result.iter().map(|p| p.id.as_str().to_owned()).collect();
        assert_eq!(ids, vec!["p2", "p3"]);
    }

    #[test]
    fn test_price_range_bounds_are_inclusive() {
        let mut state = FilterState::for_category(CategoryFilter::All);
        state.price_range = PriceRange::new(Decimal::from(20), Decimal::from(80));

        assert_eq!(filter_products(&catalog(), &state).len(), 3);
    }

    #[test]
    fn test_featured_token_selects_featured_only() {
        let state = FilterState::for_category(CategoryFilter::from_token("meilleures-ventes"));
        let result = filter_products(&catalog(), &state);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id.as_str(), "p2");
    }

    #[test]
    fn test_new_arrivals_token_matches_tagged_category() {
        let state = FilterState::for_category(CategoryFilter::from_token("nouveautes"));
        let result = filter_products(&catalog(), &state);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id.as_str(), "p3");
    }

    #[test]
    fn test_all_token_bypasses_category() {
        let state = FilterState::for_category(CategoryFilter::from_token("all"));
        assert_eq!(filter_products(&catalog(), &state).len(), 3);
    }

    #[test]
    fn test_exact_category_match() {
        let state = FilterState::for_category(CategoryFilter::from_token("new-homme"));
        let result = filter_products(&catalog(), &state);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id.as_str(), "p3");
    }

    #[test]
    fn test_search_matches_name_description_and_colors() {
        let mut state = FilterState::for_category(CategoryFilter::All);

        state.set_search("  CHEMISE ");
        assert_eq!(filter_products(&catalog(), &state).len(), 1);

        state.set_search("rouge");
        let by_color = filter_products(&catalog(), &state);
        assert_eq!(by_color.len(), 1);
        assert_eq!(by_color[0].id.as_str(), "p3");

        state.set_search("description de blouson");
        assert_eq!(filter_products(&catalog(), &state).len(), 1);
    }

    #[test]
    fn test_color_and_size_predicates_intersect() {
        let mut state = FilterState::for_category(CategoryFilter::All);
        state.colors = vec!["Bleu".to_owned()];
        state.sizes = vec!["M".to_owned()];

        let result = filter_products(&catalog(), &state);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id.as_str(), "p2");
    }

    #[test]
    fn test_sort_price_desc_reverses_asc_for_distinct_prices() {
        let state = FilterState::for_category(CategoryFilter::All);
        let mut asc = filter_products(&catalog(), &state);
        let mut desc = asc.clone();

        sort_products(&mut asc, SortKey::PriceAsc);
        sort_products(&mut desc, SortKey::PriceDesc);

        let asc_ids: Vec<_> = asc.iter().map(|p| p.id.clone()).collect();
        let mut desc_ids: Vec<_> = desc.iter().map(|p| p.id.clone()).collect();
        desc_ids.reverse();
        assert_eq!(asc_ids, desc_ids);
    }

    #[test]
    fn test_sort_is_stable_on_equal_prices() {
        let mut products = vec![
            make(&Spec {
                id: "a",
                name: "Veste",
                price: 50,
                category: "unisexe",
                colors: &[],
                sizes: &[],
                featured: false,
            }),
            make(&Spec {
                id: "b",
                name: "Pull",
                price: 50,
                category: "unisexe",
                colors: &[],
                sizes: &[],
                featured: false,
            }),
        ];

        sort_products(&mut products, SortKey::PriceAsc);
        assert_eq!(products[0].id.as_str(), "a");
        assert_eq!(products[1].id.as_str(), "b");
    }

    #[test]
    fn test_sort_names_case_insensitive() {
        let mut products = vec![
            make(&Spec {
                id: "a",
                name: "veste",
                price: 1,
                category: "unisexe",
                colors: &[],
                sizes: &[],
                featured: false,
            }),
            make(&Spec {
                id: "b",
                name: "Anorak",
                price: 1,
                category: "unisexe",
                colors: &[],
                sizes: &[],
                featured: false,
            }),
        ];

        sort_products(&mut products, SortKey::NameAsc);
        assert_eq!(products[0].name, "Anorak");
    }

    #[test]
    fn test_pagination_slices_without_recompute() {
        let products: Vec<Product> = (0..8)
            .map(|i| {
                make(&Spec {
                    id: &format!("p{i}"),
                    name: &format!("Produit {i:02}"),
                    price: 10,
                    category: "unisexe",
                    colors: &[],
                    sizes: &[],
                    featured: false,
                })
            })
            .collect();

        let state = FilterState::for_category(CategoryFilter::All);
        let mut page = browse(&products, &state);

        assert_eq!(page.visible().len(), PAGE_SIZE);
        assert!(page.has_more());

        page.show_more();
        assert_eq!(page.visible().len(), 8);
        assert!(!page.has_more());

        page.show_less();
        assert_eq!(page.visible().len(), PAGE_SIZE);
    }

    #[test]
    fn test_empty_result_has_contextual_message() {
        let state = FilterState::for_category(CategoryFilter::NewArrivals);
        let page = browse(&[], &state);

        assert!(page.is_empty());
        assert_eq!(
            state.category.empty_state().title,
            "Aucune nouveauté pour le moment"
        );
        assert_eq!(
            CategoryFilter::All.empty_state().title,
            "Aucun produit trouvé"
        );
    }

    #[test]
    fn test_facets_ignore_their_own_dimension() {
        let mut state = FilterState::for_category(CategoryFilter::All);
        state.colors = vec!["Rouge".to_owned()];

        let facets = available_facets(&catalog(), &state);
        // Colors ignore the color selection: every catalog color shows.
        assert_eq!(facets.colors, vec!["Blanc", "Bleu", "Noir", "Rouge"]);
        // Sizes honor it: only the red anorak's size remains.
        assert_eq!(facets.sizes, vec!["L"]);
    }

    #[test]
    fn test_facets_honor_price_constraint() {
        let mut state = FilterState::for_category(CategoryFilter::All);
        state.price_range = PriceRange::new(Decimal::ZERO, Decimal::from(30));

        let facets = available_facets(&catalog(), &state);
        assert_eq!(facets.colors, vec!["Noir"]);
        assert_eq!(facets.sizes, vec!["M", "S"]);
    }

    #[test]
    fn test_query_round_trip() {
        let mut state = FilterState::for_category(CategoryFilter::All);
        state.colors = vec!["Noir".to_owned(), "Bleu".to_owned()];
        state.sizes = vec!["M".to_owned()];
        state.price_range = PriceRange::new(Decimal::ZERO, Decimal::from(150));
        state.set_search("veste");

        let query = state.to_query();
        let parsed = FilterState::from_query(CategoryFilter::All, &query);

        assert_eq!(parsed.colors, state.colors);
        assert_eq!(parsed.sizes, state.sizes);
        assert_eq!(parsed.price_range, state.price_range);
        assert_eq!(parsed.search(), Some("veste"));
    }

    #[test]
    fn test_query_ignores_malformed_price() {
        let parsed = FilterState::from_query(CategoryFilter::All, "price=cheap-ish");
        assert_eq!(parsed.price_range, PriceRange::default());
    }

    #[test]
    fn test_widen_max_only_touches_default_range() {
        let mut state = FilterState::for_category(CategoryFilter::All);
        state.widen_max(Decimal::from(350));
        assert_eq!(state.price_range.max, Decimal::from(350));

        let mut narrowed = FilterState::for_category(CategoryFilter::All);
        narrowed.price_range = PriceRange::new(Decimal::ZERO, Decimal::from(100));
        narrowed.widen_max(Decimal::from(350));
        assert_eq!(narrowed.price_range.max, Decimal::from(100));
    }

    #[test]
    fn test_sort_key_token_round_trip() {
        for key in [
            SortKey::NameAsc,
            SortKey::NameDesc,
            SortKey::PriceAsc,
            SortKey::PriceDesc,
        ] {
            assert_eq!(SortKey::parse(key.as_token()), Some(key));
        }
        assert_eq!(SortKey::parse("rating-desc"), None);
    }
}
