use std::collections::{HashMap, HashSet};

use crate::store::catalog::Catalog;

/// Rule tables for collapsing a raw item id onto the completed purchase it
/// represents. The ids are patch artifacts and belong to the same catalog
/// version they were derived from; swap the whole table when the catalog
/// version changes.
#[derive(Debug, Clone)]
pub struct NormalizerRules {
    /// Base boots. Enchanted variants collapse onto these.
    pub boots: HashSet<u32>,
    /// Ids counted as consumables on top of the Consumable tag.
    pub consumables: HashSet<u32>,
    /// Sated/enchanted forms mapped back to their base item.
    pub enchantment_map: HashMap<u32, u32>,
    /// Items with upgrade lists that still count as completed purchases.
    pub exempt: HashSet<u32>,
}

impl Default for NormalizerRules {
    fn default() -> Self {
        let boots = [3006, 3009, 3020, 3047, 3111, 3117, 3158].into_iter().collect();

        let mut consumables: HashSet<u32> = (3340..3343).chain(3361..3365).collect();
        consumables.extend([2043, 2044, 2003, 2004]);

        // Sated devourers map to the corresponding devourer.
        let enchantment_map = [(3930, 3710), (3931, 3718), (3932, 3722), (3933, 3726)]
            .into_iter()
            .collect();

        // The devourers themselves.
        let exempt = [3710, 3718, 3722, 3726].into_iter().collect();

        NormalizerRules {
            boots,
            consumables,
            enchantment_map,
            exempt,
        }
    }
}

pub struct ItemNormalizer<'a> {
    catalog: &'a Catalog,
    rules: NormalizerRules,
}

impl<'a> ItemNormalizer<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self::with_rules(catalog, NormalizerRules::default())
    }

    pub fn with_rules(catalog: &'a Catalog, rules: NormalizerRules) -> Self {
        ItemNormalizer { catalog, rules }
    }

    /// Collapses a raw item id to the purchase goal it stands for, or
    /// `None` when the purchase carries no build information (consumables,
    /// intermediate components, sub-500-gold starters). The rules overlap,
    /// so their order is load-bearing.
    pub fn normalize(&self, item_id: u32) -> Option<u32> {
        let item = self.catalog.item(item_id)?;

        // Boots first: a base boot counts as itself, and anything built
        // from exactly one base boot collapses onto that boot. Checking the
        // base boot here keeps the collapse a fixed point.
        if self.rules.boots.contains(&item_id) {
            return Some(item_id);
        }
        if let [component] = item.builds_from.as_slice() {
            if self.rules.boots.contains(component) {
                return Some(*component);
            }
        }

        if item.tags.iter().any(|t| t == "Consumable") || self.rules.consumables.contains(&item_id)
        {
            return None;
        }

        if let Some(&base) = self.rules.enchantment_map.get(&item_id) {
            return Some(base);
        }

        if self.rules.exempt.contains(&item_id) {
            return Some(item_id);
        }

        if !item.upgrades_into.is_empty() {
            // Component of something bigger.
            return None;
        }

        if item.total_cost < 500 {
            return None;
        }

        Some(item_id)
    }
}
