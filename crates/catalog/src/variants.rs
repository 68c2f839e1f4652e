//! Variant combinations and price/stock resolution.
//!
//! A product with variants declares ordered categories (`Color: [Red, Blue]`,
//! `Size: [S, M, L]`). Every purchasable combination is one option from each
//! category, in category order. Combinations are keyed by that ordered option
//! tuple ([`ComboKey`]); the `"Red / S"` display name is derived from the key.
//!
//! Everything here is pure. Callers replace a product's combination list with
//! the output of [`regenerate_combinations`] instead of patching it in place.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use storefront_core::{DomainError, DomainResult, ValueObject};

/// Separator between option names in a combination's display name.
pub const COMBINATION_SEPARATOR: &str = " / ";

/// A named list of mutually exclusive options (e.g. `Size: [S, M, L]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantCategory {
    pub name: String,
    pub options: Vec<String>,
}

impl VariantCategory {
    pub fn new<I, S>(name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether this category takes part in combination generation.
    ///
    /// Half-edited categories (blank name, no options yet) are skipped.
    pub fn participates(&self) -> bool {
        !self.name.trim().is_empty() && !self.options.is_empty()
    }
}

impl ValueObject for VariantCategory {}

/// Ordered option tuple identifying a combination, one entry per participating category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComboKey(Vec<String>);

impl ComboKey {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(options.into_iter().map(Into::into).collect())
    }

    pub fn options(&self) -> &[String] {
        &self.0
    }

    /// `"Red / S"`; a single option is its own name.
    pub fn display_name(&self) -> String {
        self.0.join(COMBINATION_SEPARATOR)
    }
}

impl ValueObject for ComboKey {}

impl core::fmt::Display for ComboKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.display_name())
    }
}

/// A purchasable combination with its own price (smallest currency unit) and stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantCombination {
    pub key: ComboKey,
    pub price: u64,
    pub stock: u32,
}

impl VariantCombination {
    /// Fresh generated entry: price 0, stock 0 until the admin fills them in.
    pub fn new(key: ComboKey) -> Self {
        Self {
            key,
            price: 0,
            stock: 0,
        }
    }

    pub fn with_pricing(key: ComboKey, price: u64, stock: u32) -> Self {
        Self { key, price, stock }
    }

    pub fn name(&self) -> String {
        self.key.display_name()
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// The shopper's current pick: category name -> chosen option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(BTreeMap<String, String>);

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, category: impl Into<String>, option: impl Into<String>) {
        self.0.insert(category.into(), option.into());
    }

    /// Builder form of [`Selection::select`].
    pub fn with(mut self, category: impl Into<String>, option: impl Into<String>) -> Self {
        self.select(category, option);
        self
    }

    /// Copy of this selection with one category overridden.
    pub fn overriding(&self, category: &str, option: &str) -> Self {
        self.clone().with(category, option)
    }

    pub fn get(&self, category: &str) -> Option<&str> {
        self.0.get(category).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K, V> FromIterator<(K, V)> for Selection
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VariantError {
    /// The caller resolved a combination before every category had a pick.
    #[error("no option selected for category `{category}`")]
    MissingSelection { category: String },
}

/// Cartesian product of the participating categories' options.
///
/// The first category varies slowest and the last fastest. Every entry starts
/// at price 0 / stock 0.
pub fn generate_combinations(categories: &[VariantCategory]) -> Vec<VariantCombination> {
    let participating: Vec<&VariantCategory> =
        categories.iter().filter(|c| c.participates()).collect();
    if participating.is_empty() {
        return Vec::new();
    }

    let mut tuples: Vec<Vec<String>> = vec![Vec::new()];
    for category in participating {
        tuples = tuples
            .into_iter()
            .flat_map(|prefix| {
                category.options.iter().map(move |option| {
                    let mut tuple = prefix.clone();
                    tuple.push(option.clone());
                    tuple
                })
            })
            .collect();
    }

    tuples
        .into_iter()
        .map(|tuple| VariantCombination::new(ComboKey(tuple)))
        .collect()
}

/// Regenerate combinations, carrying admin-set price/stock forward by key.
///
/// Existing entries with no counterpart in the new generation are dropped.
/// Feeding the output back in as `existing` yields the same list.
pub fn regenerate_combinations(
    categories: &[VariantCategory],
    existing: &[VariantCombination],
) -> Vec<VariantCombination> {
    let previous: HashMap<&ComboKey, &VariantCombination> =
        existing.iter().map(|c| (&c.key, c)).collect();

    generate_combinations(categories)
        .into_iter()
        .map(|fresh| match previous.get(&fresh.key) {
            Some(kept) => (*kept).clone(),
            None => fresh,
        })
        .collect()
}

/// Key of the combination a selection points at, following category order.
pub fn resolve_combo_key(
    categories: &[VariantCategory],
    selection: &Selection,
) -> Result<ComboKey, VariantError> {
    categories
        .iter()
        .map(|category| {
            selection
                .get(&category.name)
                .map(str::to_string)
                .ok_or_else(|| VariantError::MissingSelection {
                    category: category.name.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(ComboKey)
}

/// Display name of the combination a selection points at.
pub fn resolve_combo_name(
    categories: &[VariantCategory],
    selection: &Selection,
) -> Result<String, VariantError> {
    resolve_combo_key(categories, selection).map(|key| key.display_name())
}

/// The `variants` block of a product: categories, combinations and the
/// switch deciding whether combinations drive price and stock at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantConfig {
    pub use_custom_pricing: bool,
    pub categories: Vec<VariantCategory>,
    pub combinations: Vec<VariantCombination>,
}

impl VariantConfig {
    /// Config with combinations generated from `categories`.
    pub fn new(use_custom_pricing: bool, categories: Vec<VariantCategory>) -> Self {
        let combinations = generate_combinations(&categories);
        Self {
            use_custom_pricing,
            categories,
            combinations,
        }
    }

    pub fn has_categories(&self) -> bool {
        !self.categories.is_empty()
    }

    pub fn category(&self, name: &str) -> Option<&VariantCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn find(&self, key: &ComboKey) -> Option<&VariantCombination> {
        self.combinations.iter().find(|c| &c.key == key)
    }

    /// Combination driving price/stock for `selection`, if any.
    ///
    /// `None` means "use the product's base values": custom pricing is off,
    /// there are no combinations, the selection is incomplete, or it points
    /// at a combination that no longer exists.
    pub fn matched_combination(&self, selection: &Selection) -> Option<&VariantCombination> {
        if !self.use_custom_pricing || self.combinations.is_empty() {
            return None;
        }
        let key = resolve_combo_key(&self.categories, selection).ok()?;
        self.find(&key)
    }

    pub fn active_price(&self, base_price: u64, selection: &Selection) -> u64 {
        self.matched_combination(selection)
            .map(|c| c.price)
            .unwrap_or(base_price)
    }

    pub fn max_stock(&self, base_stock: u32, selection: &Selection) -> u32 {
        self.matched_combination(selection)
            .map(|c| c.stock)
            .unwrap_or(base_stock)
    }

    /// Whether switching `category` to `option` (other picks unchanged) lands
    /// on an in-stock combination.
    ///
    /// Only the single resulting combination is checked.
    pub fn is_option_available(&self, category: &str, option: &str, selection: &Selection) -> bool {
        if !self.use_custom_pricing {
            return true;
        }
        let hypothetical = selection.overriding(category, option);
        resolve_combo_key(&self.categories, &hypothetical)
            .ok()
            .and_then(|key| self.find(&key))
            .is_some_and(VariantCombination::in_stock)
    }

    /// Unique, non-blank category names and options.
    ///
    /// Categories without options are allowed: they are mid-edit and simply
    /// do not participate in generation.
    pub fn validate(&self) -> DomainResult<()> {
        let mut names = HashSet::new();
        for category in &self.categories {
            if category.name.trim().is_empty() {
                return Err(DomainError::validation("category name cannot be empty"));
            }
            if !names.insert(category.name.as_str()) {
                return Err(DomainError::validation(format!(
                    "duplicate category `{}`",
                    category.name
                )));
            }
            let mut options = HashSet::new();
            for option in &category.options {
                if option.trim().is_empty() {
                    return Err(DomainError::validation(format!(
                        "category `{}` has an empty option",
                        category.name
                    )));
                }
                if !options.insert(option.as_str()) {
                    return Err(DomainError::validation(format!(
                        "duplicate option `{option}` in category `{}`",
                        category.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Same config with combinations regenerated against its own categories.
    pub fn normalized(mut self) -> Self {
        self.regenerate();
        self
    }

    pub fn set_custom_pricing(&mut self, enabled: bool) {
        self.use_custom_pricing = enabled;
    }

    pub fn add_category(&mut self, name: &str) -> DomainResult<()> {
        let name = name.trim();
        self.ensure_new_category_name(name)?;
        self.categories.push(VariantCategory::new(name, Vec::<String>::new()));
        self.regenerate();
        Ok(())
    }

    /// Renaming keeps combination keys (they hold options, not category names),
    /// so prices survive.
    pub fn rename_category(&mut self, old: &str, new: &str) -> DomainResult<()> {
        let new = new.trim();
        if old == new {
            return Ok(());
        }
        self.ensure_new_category_name(new)?;
        let category = self.category_mut(old)?;
        category.name = new.to_string();
        Ok(())
    }

    pub fn remove_category(&mut self, name: &str) -> DomainResult<()> {
        let before = self.categories.len();
        self.categories.retain(|c| c.name != name);
        if self.categories.len() == before {
            return Err(DomainError::not_found());
        }
        self.regenerate();
        Ok(())
    }

    pub fn add_option(&mut self, category: &str, option: &str) -> DomainResult<()> {
        let option = option.trim();
        if option.is_empty() {
            return Err(DomainError::validation("option cannot be empty"));
        }
        let target = self.category_mut(category)?;
        if target.options.iter().any(|o| o == option) {
            return Err(DomainError::validation(format!(
                "duplicate option `{option}` in category `{category}`"
            )));
        }
        target.options.push(option.to_string());
        self.regenerate();
        Ok(())
    }

    pub fn remove_option(&mut self, category: &str, option: &str) -> DomainResult<()> {
        let target = self.category_mut(category)?;
        let before = target.options.len();
        target.options.retain(|o| o != option);
        if target.options.len() == before {
            return Err(DomainError::not_found());
        }
        self.regenerate();
        Ok(())
    }

    /// Admin edit of one row of the price/stock table.
    pub fn set_combination(&mut self, key: &ComboKey, price: u64, stock: u32) -> DomainResult<()> {
        let row = self
            .combinations
            .iter_mut()
            .find(|c| &c.key == key)
            .ok_or_else(DomainError::not_found)?;
        row.price = price;
        row.stock = stock;
        Ok(())
    }

    fn regenerate(&mut self) {
        self.combinations = regenerate_combinations(&self.categories, &self.combinations);
    }

    fn category_mut(&mut self, name: &str) -> DomainResult<&mut VariantCategory> {
        self.categories
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(DomainError::not_found)
    }

    fn ensure_new_category_name(&self, name: &str) -> DomainResult<()> {
        if name.is_empty() {
            return Err(DomainError::validation("category name cannot be empty"));
        }
        if self.category(name).is_some() {
            return Err(DomainError::validation(format!("duplicate category `{name}`")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color() -> VariantCategory {
        VariantCategory::new("Color", ["Red", "Blue"])
    }

    fn size() -> VariantCategory {
        VariantCategory::new("Size", ["S", "M"])
    }

    fn names(combos: &[VariantCombination]) -> Vec<String> {
        combos.iter().map(VariantCombination::name).collect()
    }

    fn key(options: &[&str]) -> ComboKey {
        ComboKey::new(options.iter().copied())
    }

    #[test]
    fn no_valid_categories_generate_nothing() {
        assert!(generate_combinations(&[]).is_empty());

        let half_edited = [
            VariantCategory::new("", ["Red"]),
            VariantCategory::new("Size", Vec::<String>::new()),
        ];
        assert!(generate_combinations(&half_edited).is_empty());
    }

    #[test]
    fn single_category_names_are_plain_options() {
        let combos = generate_combinations(&[color()]);
        assert_eq!(names(&combos), vec!["Red", "Blue"]);
        assert!(combos.iter().all(|c| c.price == 0 && c.stock == 0));
    }

    #[test]
    fn first_category_varies_slowest() {
        let combos = generate_combinations(&[color(), size()]);
        assert_eq!(names(&combos), vec!["Red / S", "Red / M", "Blue / S", "Blue / M"]);
    }

    #[test]
    fn invalid_categories_are_skipped_in_the_middle() {
        let combos = generate_combinations(&[
            color(),
            VariantCategory::new("Material", Vec::<String>::new()),
            size(),
        ]);
        assert_eq!(combos.len(), 4);
        assert_eq!(combos[1].name(), "Red / M");
    }

    #[test]
    fn two_by_three_yields_six() {
        let combos =
            generate_combinations(&[color(), VariantCategory::new("Size", ["S", "M", "L"])]);
        assert_eq!(combos.len(), 6);
    }

    #[test]
    fn regeneration_keeps_admin_pricing() {
        let existing = vec![VariantCombination::with_pricing(key(&["Red", "S"]), 100, 5)];
        let combos = regenerate_combinations(&[color(), size()], &existing);

        let red_s = combos.iter().find(|c| c.name() == "Red / S").unwrap();
        assert_eq!((red_s.price, red_s.stock), (100, 5));
        let blue_m = combos.iter().find(|c| c.name() == "Blue / M").unwrap();
        assert_eq!((blue_m.price, blue_m.stock), (0, 0));
    }

    #[test]
    fn removing_an_option_drops_its_combinations() {
        let mut config = VariantConfig::new(true, vec![color(), size()]);
        config.set_combination(&key(&["Red", "M"]), 50, 1).unwrap();
        config.set_combination(&key(&["Red", "S"]), 70, 2).unwrap();

        config.remove_option("Size", "M").unwrap();

        assert_eq!(names(&config.combinations), vec!["Red / S", "Blue / S"]);
        assert!(config.combinations.iter().all(|c| !c.name().ends_with("/ M")));
        assert_eq!(config.find(&key(&["Red", "S"])).unwrap().price, 70);
    }

    #[test]
    fn removing_a_category_resets_to_defaults() {
        let mut config = VariantConfig::new(true, vec![color(), size()]);
        config.set_combination(&key(&["Red", "S"]), 70, 2).unwrap();

        config.remove_category("Size").unwrap();

        assert_eq!(names(&config.combinations), vec!["Red", "Blue"]);
        assert!(config.combinations.iter().all(|c| c.price == 0 && c.stock == 0));
    }

    #[test]
    fn renaming_a_category_keeps_prices() {
        let mut config = VariantConfig::new(true, vec![color(), size()]);
        config.set_combination(&key(&["Blue", "M"]), 90, 4).unwrap();

        config.rename_category("Color", "Colour").unwrap();

        let selection = Selection::new().with("Colour", "Blue").with("Size", "M");
        assert_eq!(config.active_price(10, &selection), 90);
    }

    #[test]
    fn editor_rejects_duplicates_and_blanks() {
        let mut config = VariantConfig::new(true, vec![color()]);
        assert!(matches!(config.add_category(" "), Err(DomainError::Validation(_))));
        assert!(matches!(config.add_category("Color"), Err(DomainError::Validation(_))));
        assert!(matches!(config.add_option("Color", "Red"), Err(DomainError::Validation(_))));
        assert!(matches!(config.add_option("Color", ""), Err(DomainError::Validation(_))));
        assert_eq!(config.add_option("Weight", "1kg"), Err(DomainError::NotFound));
        assert_eq!(config.remove_option("Color", "Green"), Err(DomainError::NotFound));
    }

    #[test]
    fn new_empty_category_does_not_change_combinations() {
        let mut config = VariantConfig::new(true, vec![color()]);
        config.set_combination(&key(&["Red"]), 10, 1).unwrap();

        config.add_category("Size").unwrap();
        assert_eq!(names(&config.combinations), vec!["Red", "Blue"]);

        config.add_option("Size", "XL").unwrap();
        assert_eq!(names(&config.combinations), vec!["Red / XL", "Blue / XL"]);
    }

    #[test]
    fn set_combination_rejects_unknown_keys() {
        let mut config = VariantConfig::new(true, vec![color()]);
        assert_eq!(
            config.set_combination(&key(&["Green"]), 1, 1),
            Err(DomainError::NotFound)
        );
    }

    #[test]
    fn validate_flags_duplicate_categories_and_options() {
        let dup_category = VariantConfig::new(true, vec![color(), color()]);
        assert!(matches!(dup_category.validate(), Err(DomainError::Validation(_))));

        let dup_option = VariantConfig::new(true, vec![VariantCategory::new("Color", ["Red", "Red"])]);
        assert!(matches!(dup_option.validate(), Err(DomainError::Validation(_))));

        let mid_edit = VariantConfig::new(true, vec![color(), VariantCategory::new("Size", Vec::<String>::new())]);
        assert!(mid_edit.validate().is_ok());
    }

    #[test]
    fn resolve_joins_in_category_order() {
        let selection = Selection::new().with("Size", "M").with("Color", "Blue");
        assert_eq!(
            resolve_combo_name(&[color(), size()], &selection).unwrap(),
            "Blue / M"
        );
    }

    #[test]
    fn resolve_reports_the_missing_category() {
        let selection = Selection::new().with("Color", "Blue");
        assert_eq!(
            resolve_combo_name(&[color(), size()], &selection),
            Err(VariantError::MissingSelection {
                category: "Size".to_string()
            })
        );
    }

    #[test]
    fn price_ignores_combinations_without_custom_pricing() {
        let mut config = VariantConfig::new(false, vec![color()]);
        config.set_combination(&key(&["Red"]), 5000, 9).unwrap();
        let selection = Selection::new().with("Color", "Red");

        assert_eq!(config.active_price(1000, &selection), 1000);
        assert_eq!(config.max_stock(3, &selection), 3);
    }

    #[test]
    fn resolution_miss_falls_back_to_base_values() {
        let config = VariantConfig::new(true, vec![color()]);
        let stale = Selection::new().with("Color", "Green");
        assert_eq!(config.active_price(1000, &stale), 1000);
        assert_eq!(config.max_stock(7, &stale), 7);

        let incomplete = Selection::new();
        assert_eq!(config.active_price(1000, &incomplete), 1000);
    }

    #[test]
    fn empty_combinations_fall_back_to_base_values() {
        let config = VariantConfig {
            use_custom_pricing: true,
            categories: vec![color()],
            combinations: vec![],
        };
        let selection = Selection::new().with("Color", "Red");
        assert_eq!(config.active_price(1000, &selection), 1000);
        assert_eq!(config.max_stock(2, &selection), 2);
    }

    #[test]
    fn availability_checks_the_hypothetical_combination() {
        let mut config = VariantConfig::new(true, vec![color(), size()]);
        config.set_combination(&key(&["Red", "S"]), 100, 0).unwrap();
        config.set_combination(&key(&["Blue", "S"]), 100, 2).unwrap();
        config.set_combination(&key(&["Red", "M"]), 100, 1).unwrap();

        let current = Selection::new().with("Color", "Blue").with("Size", "S");
        assert!(!config.is_option_available("Color", "Red", &current));
        assert!(config.is_option_available("Color", "Blue", &current));
        // Blue / M has stock 0.
        assert!(!config.is_option_available("Size", "M", &current));

        let other = Selection::new().with("Color", "Red").with("Size", "M");
        assert!(config.is_option_available("Color", "Red", &other));
    }

    #[test]
    fn availability_is_unconditional_for_simple_products() {
        let config = VariantConfig::new(false, vec![color()]);
        assert!(config.is_option_available("Color", "Red", &Selection::new()));
        assert!(config.is_option_available("Color", "Purple", &Selection::new()));
    }

    #[test]
    fn selection_deserializes_from_a_plain_map() {
        let selection: Selection = serde_json::from_str(r#"{"Color":"Red","Size":"S"}"#).unwrap();
        assert_eq!(selection.get("Color"), Some("Red"));
        assert_eq!(selection.len(), 2);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn categories_strategy() -> impl Strategy<Value = Vec<VariantCategory>> {
            prop::collection::vec(
                ("[A-Z][a-z]{0,6}", prop::collection::hash_set("[a-z0-9]{1,4}", 0..4)),
                0..4,
            )
            .prop_map(|raw| {
                let mut seen = HashSet::new();
                raw.into_iter()
                    .filter(|(name, _)| seen.insert(name.clone()))
                    .map(|(name, options)| {
                        let mut options: Vec<String> = options.into_iter().collect();
                        options.sort();
                        VariantCategory::new(name, options)
                    })
                    .collect()
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Count equals the product of participating option counts.
            #[test]
            fn count_is_product_of_option_counts(categories in categories_strategy()) {
                let participating: Vec<_> = categories.iter().filter(|c| c.participates()).collect();
                let expected = if participating.is_empty() {
                    0
                } else {
                    participating.iter().map(|c| c.options.len()).product::<usize>()
                };
                prop_assert_eq!(generate_combinations(&categories).len(), expected);
            }

            /// Keys are unique.
            #[test]
            fn keys_are_unique(categories in categories_strategy()) {
                let combos = generate_combinations(&categories);
                let keys: HashSet<_> = combos.iter().map(|c| c.key.clone()).collect();
                prop_assert_eq!(keys.len(), combos.len());
            }

            /// Regenerating from its own output changes nothing.
            #[test]
            fn regeneration_is_idempotent(
                categories in categories_strategy(),
                price in 0u64..100_000,
                stock in 0u32..50,
            ) {
                let mut existing = generate_combinations(&categories);
                for (i, combo) in existing.iter_mut().enumerate() {
                    combo.price = price + i as u64;
                    combo.stock = stock;
                }
                existing.push(VariantCombination::with_pricing(ComboKey::new(["orphan"]), 1, 1));

                let once = regenerate_combinations(&categories, &existing);
                let twice = regenerate_combinations(&categories, &once);
                prop_assert_eq!(&once, &twice);
                prop_assert!(once.iter().all(|c| c.key != ComboKey::new(["orphan"])));
            }

            /// Any full selection over generated options resolves to a generated key.
            #[test]
            fn first_options_resolve_to_first_combination(categories in categories_strategy()) {
                let participating: Vec<VariantCategory> =
                    categories.into_iter().filter(|c| c.participates()).collect();
                prop_assume!(!participating.is_empty());

                let selection: Selection = participating
                    .iter()
                    .map(|c| (c.name.clone(), c.options[0].clone()))
                    .collect();
                let config = VariantConfig::new(true, participating);
                let matched = config.matched_combination(&selection);
                prop_assert_eq!(matched, config.combinations.first());
            }
        }
    }
}
