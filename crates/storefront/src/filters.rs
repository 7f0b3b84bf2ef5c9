//! The query-string-driven product filter engine.
//!
//! The URL query string is the single source of truth: [`FilterState`] is a
//! plain value type reconstructed from it via [`FilterState::parse`] and
//! written back via [`FilterState::serialize`], so filter combinations are
//! shareable links and browser history restores them. Parse and serialize
//! are total and round-trip (`parse(serialize(s)) == s` for every reachable
//! state), independent of any routing primitive.
//!
//! Filtering itself is a pure, synchronous mapping from the full in-memory
//! product list; there is no server round-trip.

use rust_decimal::Decimal;
use url::form_urlencoded;

use crate::supabase::types::Product;

/// Upper price bound (and the default for `priceMax`).
fn price_ceiling() -> Decimal {
    Decimal::from(10_000)
}

fn clamp_price(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, price_ceiling())
}

/// A multi-select facet. An empty selection means "no constraint from this
/// facet", not "exclude everything".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Categories,
    Brands,
    Colors,
    Memory,
    ScreenSizes,
    Conditions,
}

impl Facet {
    /// Every facet, in query-string order.
    pub const ALL: [Self; 6] = [
        Self::Categories,
        Self::Brands,
        Self::Colors,
        Self::Memory,
        Self::ScreenSizes,
        Self::Conditions,
    ];

    /// The query parameter holding this facet's comma-joined tokens.
    #[must_use]
    pub const fn param(self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::Brands => "brands",
            Self::Colors => "colors",
            Self::Memory => "memory",
            Self::ScreenSizes => "screenSize",
            Self::Conditions => "condition",
        }
    }

    fn from_param(param: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|facet| facet.param() == param)
    }
}

/// The complete filter selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Lower price bound, inclusive. Always `<= price_max`.
    pub price_min: Decimal,
    /// Upper price bound, inclusive. Always `>= price_min`.
    pub price_max: Decimal,
    pub categories: Vec<String>,
    pub brands: Vec<String>,
    pub colors: Vec<String>,
    pub memory: Vec<String>,
    pub screen_sizes: Vec<String>,
    pub conditions: Vec<String>,
    /// Minimum rating; zero means no constraint.
    pub rating: u8,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            price_min: Decimal::ZERO,
            price_max: price_ceiling(),
            categories: Vec::new(),
            brands: Vec::new(),
            colors: Vec::new(),
            memory: Vec::new(),
            screen_sizes: Vec::new(),
            conditions: Vec::new(),
            rating: 0,
        }
    }
}

impl FilterState {
    /// Reconstruct the state from a query string (with or without a leading
    /// `?`). Total: unknown parameters and unparseable numbers fall back to
    /// the defaults, and a hand-edited inverted price range is repaired by
    /// pushing the upper bound up to the lower.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let mut state = Self::default();

        for (key, value) in
            form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        {
            match key.as_ref() {
                "priceMin" => {
                    if let Ok(v) = value.parse::<Decimal>() {
                        state.price_min = clamp_price(v);
                    }
                }
                "priceMax" => {
                    if let Ok(v) = value.parse::<Decimal>() {
                        state.price_max = clamp_price(v);
                    }
                }
                "rating" => {
                    if let Ok(v) = value.parse::<u8>() {
                        state.rating = v;
                    }
                }
                other => {
                    if let Some(facet) = Facet::from_param(other) {
                        *state.facet_mut(facet) = value
                            .split(',')
                            .filter(|token| !token.is_empty())
                            .map(str::to_owned)
                            .collect();
                    }
                }
            }
        }

        if state.price_min > state.price_max {
            state.price_max = state.price_min;
        }

        state
    }

    /// Serialize to a query string. Parameters at their defaults are
    /// omitted, so the default state serializes to the empty string.
    #[must_use]
    pub fn serialize(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());

        if self.price_min > Decimal::ZERO {
            serializer.append_pair("priceMin", &self.price_min.to_string());
        }
        if self.price_max < price_ceiling() {
            serializer.append_pair("priceMax", &self.price_max.to_string());
        }
        for facet in Facet::ALL {
            let tokens = self.facet(facet);
            if !tokens.is_empty() {
                serializer.append_pair(facet.param(), &tokens.join(","));
            }
        }
        if self.rating > 0 {
            serializer.append_pair("rating", &self.rating.to_string());
        }

        serializer.finish()
    }

    /// The selected tokens of a facet.
    #[must_use]
    pub fn facet(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Categories => &self.categories,
            Facet::Brands => &self.brands,
            Facet::Colors => &self.colors,
            Facet::Memory => &self.memory,
            Facet::ScreenSizes => &self.screen_sizes,
            Facet::Conditions => &self.conditions,
        }
    }

    fn facet_mut(&mut self, facet: Facet) -> &mut Vec<String> {
        match facet {
            Facet::Categories => &mut self.categories,
            Facet::Brands => &mut self.brands,
            Facet::Colors => &mut self.colors,
            Facet::Memory => &mut self.memory,
            Facet::ScreenSizes => &mut self.screen_sizes,
            Facet::Conditions => &mut self.conditions,
        }
    }

    /// Replace a facet's whole selection.
    pub fn set_facet(&mut self, facet: Facet, values: Vec<String>) {
        *self.facet_mut(facet) = values;
    }

    /// Flip membership of `value` in a facet's selection.
    pub fn toggle(&mut self, facet: Facet, value: &str) {
        let tokens = self.facet_mut(facet);
        if let Some(pos) = tokens.iter().position(|token| token == value) {
            tokens.remove(pos);
        } else {
            tokens.push(value.to_owned());
        }
    }

    /// Set the lower price bound, clamped to the valid range. Raising it
    /// past the upper bound pushes the upper bound up with it, so an
    /// inverted range is never written.
    pub fn update_price_min(&mut self, value: Decimal) {
        self.price_min = clamp_price(value);
        if self.price_min > self.price_max {
            self.price_max = self.price_min;
        }
    }

    /// Set the upper price bound, clamped to the valid range. Lowering it
    /// past the lower bound pulls the lower bound down with it.
    pub fn update_price_max(&mut self, value: Decimal) {
        self.price_max = clamp_price(value);
        if self.price_max < self.price_min {
            self.price_min = self.price_max;
        }
    }

    /// Set the minimum-rating threshold; zero clears it.
    pub const fn set_rating(&mut self, rating: u8) {
        self.rating = rating;
    }

    /// Clear every filter back to the defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether a product satisfies every active facet (all conditions
    /// AND-ed).
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let price = product.price.amount();
        if price < self.price_min || price > self.price_max {
            return false;
        }

        if !self.categories.is_empty()
            && !self.categories.iter().any(|c| c == &product.category)
        {
            return false;
        }
        if !self.brands.is_empty() && !self.brands.iter().any(|b| b == &product.brand) {
            return false;
        }
        if self.rating > 0 && product.rating < f64::from(self.rating) {
            return false;
        }
        if !self.colors.is_empty() && !self.colors.iter().any(|c| c == &product.color) {
            return false;
        }
        if !self.memory.is_empty() && !self.memory.iter().any(|m| m == &product.memory) {
            return false;
        }
        if !self.screen_sizes.is_empty()
            && !self.screen_sizes.iter().any(|s| s == &product.screen_size)
        {
            return false;
        }
        if !self.conditions.is_empty()
            && !self
                .conditions
                .iter()
                .any(|c| c == product.condition.label())
        {
            return false;
        }

        true
    }

    /// Pure derivation of the filtered list.
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products
            .iter()
            .filter(|product| self.matches(product))
            .cloned()
            .collect()
    }

    /// Badge count: one per non-default price bound, one for a rating
    /// threshold, one per selected facet token.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        let mut count = 0;
        if self.price_min > Decimal::ZERO {
            count += 1;
        }
        if self.price_max < price_ceiling() {
            count += 1;
        }
        if self.rating > 0 {
            count += 1;
        }
        for facet in Facet::ALL {
            count += self.facet(facet).len();
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures;

    use super::*;

    #[test]
    fn test_default_serializes_to_empty() {
        assert_eq!(FilterState::default().serialize(), "");
        assert_eq!(FilterState::parse(""), FilterState::default());
    }

    #[test]
    fn test_round_trip() {
        let mut state = FilterState::default();
        state.toggle(Facet::Categories, "Tablets");
        state.toggle(Facet::Categories, "Phones");
        state.toggle(Facet::Conditions, "Like New");
        state.update_price_min(Decimal::from(100));
        state.update_price_max(Decimal::from(300));
        state.set_rating(4);

        assert_eq!(FilterState::parse(&state.serialize()), state);
    }

    #[test]
    fn test_parse_tolerates_junk_and_leading_question_mark() {
        let state = FilterState::parse("?priceMin=oops&bogus=1&brands=Slate,,Volt");
        assert_eq!(state.price_min, Decimal::ZERO);
        assert_eq!(state.brands, vec!["Slate".to_owned(), "Volt".to_owned()]);
    }

    #[test]
    fn test_price_clamp_in_both_update_orders() {
        // Raising the min past the max pushes the max up.
        let mut state = FilterState::default();
        state.update_price_max(Decimal::from(200));
        state.update_price_min(Decimal::from(500));
        assert_eq!(state.price_min, Decimal::from(500));
        assert_eq!(state.price_max, Decimal::from(500));

        // Lowering the max past the min pulls the min down.
        let mut state = FilterState::default();
        state.update_price_min(Decimal::from(500));
        state.update_price_max(Decimal::from(200));
        assert_eq!(state.price_min, Decimal::from(200));
        assert_eq!(state.price_max, Decimal::from(200));

        // Out-of-range values clamp to [0, 10000].
        let mut state = FilterState::default();
        state.update_price_min(Decimal::from(-50));
        state.update_price_max(Decimal::from(99_999));
        assert_eq!(state.price_min, Decimal::ZERO);
        assert_eq!(state.price_max, Decimal::from(10_000));
    }

    #[test]
    fn test_parse_repairs_inverted_range() {
        let state = FilterState::parse("priceMin=5000&priceMax=100");
        assert!(state.price_min <= state.price_max);
    }

    #[test]
    fn test_apply_is_pure_and_idempotent() {
        let catalog = fixtures::catalog();
        let mut state = FilterState::default();
        state.toggle(Facet::Brands, "Slate");

        let first = state.apply(&catalog);
        let second = state.apply(&catalog);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_tablets_under_300() {
        // Two tablets in the catalog, one priced at 250.
        let mut state = FilterState::default();
        state.toggle(Facet::Categories, "Tablets");
        state.update_price_max(Decimal::from(300));

        let result = state.apply(&fixtures::catalog());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Slate Pad 11");
    }

    #[test]
    fn test_empty_facet_means_no_constraint() {
        let state = FilterState::default();
        assert_eq!(state.apply(&fixtures::catalog()).len(), 5);
    }

    #[test]
    fn test_condition_and_rating_facets() {
        let mut state = FilterState::default();
        state.toggle(Facet::Conditions, "Open Box");
        let result = state.apply(&fixtures::catalog());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Volt One");

        let mut state = FilterState::default();
        state.set_rating(4);
        // Everything rated >= 4 except the 3.9-rated earbuds.
        assert_eq!(state.apply(&fixtures::catalog()).len(), 4);
    }

    #[test]
    fn test_toggle_flips_membership() {
        let mut state = FilterState::default();
        state.toggle(Facet::Colors, "Black");
        assert_eq!(state.colors, vec!["Black".to_owned()]);
        state.toggle(Facet::Colors, "Black");
        assert!(state.colors.is_empty());
    }

    #[test]
    fn test_set_facet_replaces_the_selection() {
        let mut state = FilterState::default();
        state.toggle(Facet::Memory, "64GB");
        state.set_facet(
            Facet::Memory,
            vec!["128GB".to_owned(), "256GB".to_owned()],
        );
        assert_eq!(state.memory, vec!["128GB".to_owned(), "256GB".to_owned()]);

        state.set_facet(Facet::Memory, Vec::new());
        assert!(state.memory.is_empty());
    }

    #[test]
    fn test_active_filter_count() {
        let mut state = FilterState::default();
        assert_eq!(state.active_filter_count(), 0);

        state.toggle(Facet::Categories, "Tablets");
        state.toggle(Facet::Categories, "Phones");
        state.update_price_max(Decimal::from(300));
        state.set_rating(4);
        // Two category tokens + the non-default max + the rating threshold.
        assert_eq!(state.active_filter_count(), 4);

        state.reset();
        assert_eq!(state.active_filter_count(), 0);
    }
}
