//! # Property-Based Ledger Checks
//!
//! Random sequences of transfers and splits among a small set of holders.
//! Whatever mix of successes and rejections occurs, the partition must
//! still sum to the denominator and the provenance chain must verify.

use pc_03_property_ledger::Allocation;
use proptest::prelude::*;
use shared_types::Address;

/// Number of principals in generated operations.
pub const HOLDERS: u8 = 4;

pub fn holder(index: u8) -> Address {
    Address([0x10 + index; 20])
}

/// One generated ledger operation.
#[derive(Debug, Clone)]
pub enum Op {
    Transfer { from: u8, to: u8, units: u64 },
    Split { holder: u8, legs: Vec<(u8, u64)> },
}

impl Op {
    pub fn allocations(legs: &[(u8, u64)]) -> Vec<Allocation> {
        legs.iter()
            .map(|(to, units)| Allocation::new(holder(*to), *units))
            .collect()
    }
}

pub fn op_strategy(denominator: u64) -> impl Strategy<Value = Op> {
    let units = 0..=denominator;
    prop_oneof![
        (0..HOLDERS, 0..HOLDERS, units.clone())
            .prop_map(|(from, to, units)| Op::Transfer { from, to, units }),
        (
            0..HOLDERS,
            prop::collection::vec((0..HOLDERS, units), 0..4)
        )
            .prop_map(|(holder, legs)| Op::Split { holder, legs }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;
    use pc_03_property_ledger::{
        LedgerConfig, LedgerError, PropertyRegistryApi, ProvenanceLogApi, ShareLedgerApi,
    };

    const DENOMINATOR: u64 = 1_000;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn test_random_operations_conserve_supply(ops in prop::collection::vec(op_strategy(DENOMINATOR), 1..40)) {
            let (mut ledger, _, docs1) =
                make_ledger(LedgerConfig::default().with_denominator(DENOMINATOR));
            let p = ledger.create(holder(0), metadata_h1(), docs1).unwrap();
            let mut expected_events = 1usize;

            for op in &ops {
                let result = match op {
                    Op::Transfer { from, to, units } => {
                        ledger.transfer(p, holder(*from), holder(*to), *units).map(|()| 1)
                    }
                    Op::Split { holder: h, legs } => ledger
                        .split(p, holder(*h), &Op::allocations(legs))
                        .map(|()| 1 + legs.len()),
                };
                match result {
                    Ok(appended) => expected_events += appended,
                    Err(e) => prop_assert!(e.is_user_error(), "unexpected error: {}", e),
                }

                let total: u64 = ledger.holders(p).unwrap().iter().map(|e| e.units).sum();
                prop_assert_eq!(total, DENOMINATOR);
                prop_assert_eq!(ledger.total_supply(p).unwrap(), DENOMINATOR);
                prop_assert!(ledger.holders(p).unwrap().iter().all(|e| e.units > 0));
                prop_assert!(ledger.verify_chain(p).unwrap());
            }

            prop_assert_eq!(ledger.history(p).unwrap().count(), expected_events);
        }

        #[test]
        fn test_rejected_transfer_changes_nothing(units in (DENOMINATOR + 1)..u64::MAX) {
            let (mut ledger, _, docs1) =
                make_ledger(LedgerConfig::default().with_denominator(DENOMINATOR));
            let p = ledger.create(holder(0), metadata_h1(), docs1).unwrap();
            let head = ledger.chain_head(p).unwrap();

            let result = ledger.transfer(p, holder(0), holder(1), units);

            let is_insufficient = matches!(result, Err(LedgerError::InsufficientShares { .. }));
            prop_assert!(is_insufficient);
            prop_assert_eq!(ledger.balance_of(p, &holder(0)), DENOMINATOR);
            prop_assert_eq!(ledger.chain_head(p).unwrap(), head);
        }
    }
}
