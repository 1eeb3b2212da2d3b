//! Typed resource stockpiles.
//!
//! Each contender owns one `ResourcePool`: an `(income, stock)` pair for each
//! of the three materials. Stock never goes negative; every mutator clamps.

use serde::{Deserialize, Serialize};

use crate::cards::Material;

/// Which field of a resource a mutation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceSlot {
    /// Amount added to stock at every replenishment.
    Income,
    /// Amount available to pay card costs.
    Stock,
}

/// Income and stock of one material.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resource {
    pub income: i64,
    pub stock: i64,
}

impl Resource {
    #[must_use]
    pub const fn new(income: i64, stock: i64) -> Self {
        Self { income, stock }
    }

    /// Read a field.
    #[must_use]
    pub fn get(&self, slot: ResourceSlot) -> i64 {
        match slot {
            ResourceSlot::Income => self.income,
            ResourceSlot::Stock => self.stock,
        }
    }

    fn field_mut(&mut self, slot: ResourceSlot) -> &mut i64 {
        match slot {
            ResourceSlot::Income => &mut self.income,
            ResourceSlot::Stock => &mut self.stock,
        }
    }
}

/// Three resources, indexed by [`Material`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourcePool {
    resources: [Resource; Material::COUNT],
}

impl ResourcePool {
    /// Create a pool from explicit `(income, stock)` pairs.
    ///
    /// Negative stock is clamped to zero.
    #[must_use]
    pub fn new(resources: [Resource; Material::COUNT]) -> Self {
        let mut pool = Self { resources };
        for r in &mut pool.resources {
            r.stock = r.stock.max(0);
        }
        pool
    }

    /// The same `(income, stock)` for every material.
    #[must_use]
    pub fn uniform(income: i64, stock: i64) -> Self {
        Self::new([Resource::new(income, stock); Material::COUNT])
    }

    #[must_use]
    pub fn get(&self, material: Material) -> &Resource {
        &self.resources[material.index()]
    }

    #[must_use]
    pub fn stock(&self, material: Material) -> i64 {
        self.get(material).stock
    }

    #[must_use]
    pub fn income(&self, material: Material) -> i64 {
        self.get(material).income
    }

    /// Whether `cost` can be paid from the stock of `material`.
    #[must_use]
    pub fn can_afford(&self, material: Material, cost: i64) -> bool {
        self.stock(material) >= cost
    }

    /// Add `delta` to one field, flooring the result at `floor`.
    pub fn adjust(&mut self, material: Material, slot: ResourceSlot, delta: i64, floor: i64) {
        let field = self.resources[material.index()].field_mut(slot);
        *field = (*field + delta).max(floor);
    }

    /// Add `delta` to every stock, floored at 0.
    pub fn adjust_stacks(&mut self, delta: i64) {
        for m in Material::ALL {
            self.adjust(m, ResourceSlot::Stock, delta, 0);
        }
    }

    /// Add `delta` to every income and stock, floored at 1.
    pub fn adjust_all(&mut self, delta: i64) {
        for m in Material::ALL {
            self.adjust(m, ResourceSlot::Income, delta, 1);
            self.adjust(m, ResourceSlot::Stock, delta, 1);
        }
    }

    /// Pay a card cost. Stock is floored at 0.
    pub fn spend(&mut self, material: Material, cost: i64) {
        self.adjust(material, ResourceSlot::Stock, -cost, 0);
    }

    /// Remove up to `amount` of stock, returning what was actually taken.
    pub fn take(&mut self, material: Material, amount: i64) -> i64 {
        let taken = self.stock(material).min(amount).max(0);
        self.resources[material.index()].stock -= taken;
        taken
    }

    /// Add each material's income to its stock.
    pub fn replenish(&mut self) {
        for r in &mut self.resources {
            r.stock = (r.stock + r.income).max(0);
        }
    }

    /// Iterate `(material, resource)` pairs in material order.
    pub fn iter(&self) -> impl Iterator<Item = (Material, &Resource)> {
        Material::ALL.into_iter().zip(self.resources.iter())
    }

    /// Flatten to `[income0, stock0, income1, stock1, income2, stock2]`.
    #[must_use]
    pub fn flatten(&self) -> [i64; 2 * Material::COUNT] {
        let mut out = [0; 2 * Material::COUNT];
        for (i, r) in self.resources.iter().enumerate() {
            out[2 * i] = r.income;
            out[2 * i + 1] = r.stock;
        }
        out
    }
}
