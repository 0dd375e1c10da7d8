//! # Share Partition
//!
//! Pure arithmetic over one property's ownership partition.
//!
//! A `SharePartition` is a working copy of the `(holder -> units)` map.
//! Mutations are applied to the copy, checked for conservation, and only
//! then turned into storage writes. Nothing here touches the store.

use crate::domain::errors::LedgerError;
use serde::{Deserialize, Serialize};
use shared_types::{Address, PropertyId, ShareUnit};
use std::collections::{BTreeMap, BTreeSet};

/// One holder's current stake in a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipEntry {
    pub property: PropertyId,
    pub holder: Address,
    pub units: ShareUnit,
}

/// One leg of a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub to: Address,
    pub units: ShareUnit,
}

impl Allocation {
    pub fn new(to: Address, units: ShareUnit) -> Self {
        Self { to, units }
    }
}

/// Working copy of a property's balances with change tracking.
#[derive(Debug, Clone)]
pub struct SharePartition {
    property: PropertyId,
    original: BTreeMap<Address, ShareUnit>,
    balances: BTreeMap<Address, ShareUnit>,
}

impl SharePartition {
    pub fn new(property: PropertyId, balances: BTreeMap<Address, ShareUnit>) -> Self {
        Self {
            property,
            original: balances.clone(),
            balances,
        }
    }

    pub fn empty(property: PropertyId) -> Self {
        Self::new(property, BTreeMap::new())
    }

    pub fn balance_of(&self, holder: &Address) -> ShareUnit {
        self.balances.get(holder).copied().unwrap_or(0)
    }

    /// Add units to a holder, creating the entry if needed.
    pub fn credit(&mut self, holder: Address, units: ShareUnit) -> Result<(), LedgerError> {
        let current = self.balance_of(&holder);
        let updated = current.checked_add(units).ok_or_else(|| {
            LedgerError::invariant(self.property, format!("balance overflow for {}", holder))
        })?;
        self.balances.insert(holder, updated);
        Ok(())
    }

    /// Remove units from a holder, pruning the entry at zero.
    pub fn debit(&mut self, holder: Address, units: ShareUnit) -> Result<(), LedgerError> {
        let available = self.balance_of(&holder);
        let remaining =
            available
                .checked_sub(units)
                .ok_or(LedgerError::InsufficientShares {
                    property: self.property,
                    holder,
                    available,
                    requested: units,
                })?;
        if remaining == 0 {
            self.balances.remove(&holder);
        } else {
            self.balances.insert(holder, remaining);
        }
        Ok(())
    }

    /// Sum of all balances, or `None` on overflow.
    pub fn total(&self) -> Option<ShareUnit> {
        self.balances
            .values()
            .try_fold(0u64, |acc, units| acc.checked_add(*units))
    }

    /// Conservation check: the partition must sum to exactly `denominator`
    /// and hold no zero-unit entries.
    pub fn verify_conservation(&self, denominator: ShareUnit) -> Result<(), LedgerError> {
        if let Some((holder, _)) = self.balances.iter().find(|(_, units)| **units == 0) {
            return Err(LedgerError::invariant(
                self.property,
                format!("zero-unit entry retained for {}", holder),
            ));
        }
        match self.total() {
            Some(total) if total == denominator => Ok(()),
            Some(total) => Err(LedgerError::invariant(
                self.property,
                format!("supply {} != denominator {}", total, denominator),
            )),
            None => Err(LedgerError::invariant(self.property, "supply overflow")),
        }
    }

    /// Holders whose balance differs from the loaded state, with the new
    /// balance (0 means the entry must be deleted).
    pub fn changes(&self) -> Vec<(Address, ShareUnit)> {
        let holders: BTreeSet<&Address> =
            self.original.keys().chain(self.balances.keys()).collect();
        holders
            .into_iter()
            .filter_map(|holder| {
                let before = self.original.get(holder).copied().unwrap_or(0);
                let after = self.balance_of(holder);
                (before != after).then_some((*holder, after))
            })
            .collect()
    }

    pub fn entries(&self) -> Vec<OwnershipEntry> {
        self.balances
            .iter()
            .map(|(holder, units)| OwnershipEntry {
                property: self.property,
                holder: *holder,
                units: *units,
            })
            .collect()
    }
}

/// Sum allocation amounts without overflow.
pub fn allocation_total(allocations: &[Allocation]) -> u128 {
    allocations.iter().map(|a| a.units as u128).sum()
}
