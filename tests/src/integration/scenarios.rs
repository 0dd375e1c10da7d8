//! # Reference Ownership Scenarios
//!
//! One property, three principals, D = 1,000,000:
//!
//! 1. `create(alice, h1, docs1)` mints everything to alice
//! 2. alice transfers 400,000 to bob
//! 3. an overdraft of 700,000 fails and changes nothing
//! 4. alice splits 100,000 to bob and 200,000 to carol
//! 5. alice cannot retire while holding less than D

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use pc_03_property_ledger::{
        Allocation, EventKind, LedgerConfig, LedgerError, PropertyRegistryApi, PropertyStatus,
        ProvenanceLogApi, ShareLedgerApi, DEFAULT_DENOMINATOR,
    };

    const D: u64 = DEFAULT_DENOMINATOR;

    // =========================================================================
    // SCENARIOS
    // =========================================================================

    #[test]
    fn test_reference_scenarios_in_sequence() {
        let (mut ledger, _, docs1) = make_ledger(LedgerConfig::default());

        // Scenario 1
        let p = ledger.create(ALICE, metadata_h1(), docs1).unwrap();
        assert_eq!(ledger.balance_of(p, &ALICE), D);
        assert_eq!(ledger.balance_of(p, &BOB), 0);

        // Scenario 2
        ledger.transfer(p, ALICE, BOB, 400_000).unwrap();
        assert_eq!(ledger.balance_of(p, &ALICE), 600_000);
        assert_eq!(ledger.balance_of(p, &BOB), 400_000);
        assert_eq!(ledger.total_supply(p).unwrap(), D);

        // Scenario 3
        let head = ledger.chain_head(p).unwrap();
        assert!(matches!(
            ledger.transfer(p, ALICE, BOB, 700_000),
            Err(LedgerError::InsufficientShares { .. })
        ));
        assert_eq!(ledger.balance_of(p, &ALICE), 600_000);
        assert_eq!(ledger.balance_of(p, &BOB), 400_000);
        assert_eq!(ledger.chain_head(p).unwrap(), head);

        // Scenario 4
        let before = ledger.history(p).unwrap().count();
        ledger
            .split(
                p,
                ALICE,
                &[Allocation::new(BOB, 100_000), Allocation::new(CAROL, 200_000)],
            )
            .unwrap();
        assert_eq!(ledger.balance_of(p, &ALICE), 300_000);
        assert_eq!(ledger.balance_of(p, &CAROL), 200_000);

        let events: Vec<_> = ledger
            .history(p)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        let appended = &events[before..];
        assert_eq!(appended.len(), 3);
        for pair in appended.windows(2) {
            assert_eq!(pair[1].seq, pair[0].seq + 1);
            assert_eq!(pair[1].prev_event_hash, pair[0].hash());
        }

        // Scenario 5
        assert!(matches!(
            ledger.retire(p, ALICE),
            Err(LedgerError::Unauthorized { .. })
        ));
        assert_eq!(ledger.get(p).unwrap().status, PropertyStatus::Active);

        assert!(ledger.verify_chain(p).unwrap());
    }

    #[test]
    fn test_full_lifecycle_to_retirement() {
        let (mut ledger, documents, docs1) = make_ledger(LedgerConfig::default());
        let p = ledger.create(ALICE, metadata_h1(), docs1).unwrap();

        ledger.transfer(p, ALICE, BOB, 400_000).unwrap();
        ledger
            .split(p, BOB, &[Allocation::new(CAROL, 150_000)])
            .unwrap();

        // consolidate everything with carol
        ledger.transfer(p, ALICE, CAROL, 600_000).unwrap();
        ledger.transfer(p, BOB, CAROL, 250_000).unwrap();
        assert_eq!(ledger.balance_of(p, &CAROL), D);
        assert_eq!(ledger.properties_of(&ALICE).unwrap(), vec![]);

        let appraisal = documents.store_document(b"appraisal 2026-10");
        let docs2 = documents.register_set([appraisal]).unwrap();
        ledger.amend(p, CAROL, metadata_h2(), Some(docs2)).unwrap();
        ledger.retire(p, CAROL).unwrap();

        let kinds: Vec<EventKind> = ledger
            .history(p)
            .unwrap()
            .map(|event| event.unwrap().kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::Minted,
                EventKind::Transferred,
                EventKind::Split,
                EventKind::Split,
                EventKind::Transferred,
                EventKind::Transferred,
                EventKind::Amended,
                EventKind::Retired,
            ]
        );
        assert!(ledger.verify_chain(p).unwrap());
        assert!(matches!(
            ledger.transfer(p, CAROL, ALICE, 1),
            Err(LedgerError::PropertyRetired { .. })
        ));
    }

    #[test]
    fn test_properties_are_isolated() {
        let (mut ledger, _, docs1) = make_ledger(LedgerConfig::default());
        let house = ledger.create(ALICE, metadata_h1(), docs1).unwrap();
        let barn = ledger.create(ALICE, metadata_h2(), docs1).unwrap();

        ledger.transfer(house, ALICE, BOB, 10).unwrap();

        assert_eq!(ledger.balance_of(barn, &ALICE), D);
        assert_eq!(ledger.balance_of(barn, &BOB), 0);
        assert_eq!(ledger.history(barn).unwrap().count(), 1);
        assert_eq!(ledger.history(house).unwrap().count(), 2);
    }

    #[test]
    fn test_shared_ledger_reads_see_committed_writes() {
        let (ledger, docs1) = make_shared_ledger();
        let reader = ledger.clone();

        let p = ledger.create(ALICE, metadata_h1(), docs1).unwrap();
        ledger.transfer(p, ALICE, BOB, 1).unwrap();

        assert_eq!(reader.balance_of(p, &BOB), 1);
        assert_eq!(reader.history(p).unwrap().len(), 2);
        assert_eq!(reader.stats().unwrap().total_events, 2);
    }
}
