//! # Signed Command Flow
//!
//! Requests signed with Ed25519 keys pass through `LedgerGateway`, which
//! authenticates the signer, enforces its nonce order and acts on its
//! behalf only.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use pc_01_identity::{AuthError, Ed25519IdentityAdapter, RequestSigner};
    use pc_03_property_ledger::{
        Allocation, CommandEnvelope, CommandOutcome, GatewayError, LedgerCommand, LedgerError,
        LedgerGateway, DEFAULT_DENOMINATOR,
    };

    fn make_gateway() -> (
        LedgerGateway<
            Ed25519IdentityAdapter,
            pc_03_property_ledger::InMemoryKVStore,
            pc_03_property_ledger::LogicalClock,
            Documents,
        >,
        shared_types::DocumentSetId,
    ) {
        let (ledger, docs1) = make_shared_ledger();
        (LedgerGateway::new(Ed25519IdentityAdapter::new(), ledger), docs1)
    }

    fn signed(
        signer: &RequestSigner,
        nonce: u64,
        command: &LedgerCommand,
    ) -> pc_01_identity::SignedRequest {
        signer.sign(CommandEnvelope::new(nonce, command.clone()).encode().unwrap())
    }

    #[test]
    fn test_signed_lifecycle() {
        let (gateway, docs1) = make_gateway();
        let alice = RequestSigner::from_seed([0xA1; 32]);
        let bob = RequestSigner::from_seed([0xB0; 32]);
        let carol = RequestSigner::from_seed([0xC4; 32]);

        let create = LedgerCommand::Create {
            metadata_hash: metadata_h1(),
            document_set: docs1,
        };
        let p = match gateway.submit(&signed(&alice, 1, &create)).unwrap() {
            CommandOutcome::Created(p) => p,
            other => panic!("Expected Created, got {:?}", other),
        };

        let split = LedgerCommand::Split {
            property: p,
            allocations: vec![
                Allocation::new(bob.address(), 100_000),
                Allocation::new(carol.address(), 200_000),
            ],
        };
        assert_eq!(
            gateway.submit(&signed(&alice, 2, &split)).unwrap(),
            CommandOutcome::Split
        );

        // bob cannot retire, alice cannot either while others hold shares
        let retire = LedgerCommand::Retire { property: p };
        for (signer, nonce) in [(&alice, 3), (&bob, 1)] {
            assert!(matches!(
                gateway.submit(&signed(signer, nonce, &retire)),
                Err(GatewayError::Ledger(LedgerError::Unauthorized { .. }))
            ));
        }

        for signer in [&bob, &carol] {
            let units = gateway.ledger().balance_of(p, &signer.address());
            let back = LedgerCommand::Transfer {
                property: p,
                to: alice.address(),
                units,
            };
            assert_eq!(
                gateway.submit(&signed(signer, 2, &back)).unwrap(),
                CommandOutcome::Transferred
            );
        }

        assert_eq!(
            gateway.ledger().balance_of(p, &alice.address()),
            DEFAULT_DENOMINATOR
        );
        assert_eq!(
            gateway.submit(&signed(&alice, 4, &retire)).unwrap(),
            CommandOutcome::Retired
        );
        assert!(gateway.ledger().verify_chain(p).unwrap());

        let actors: Vec<_> = gateway
            .ledger()
            .history(p)
            .unwrap()
            .into_iter()
            .map(|event| event.actor)
            .collect();
        assert_eq!(actors.first(), Some(&alice.address()));
        assert!(actors.contains(&bob.address()));
        assert!(actors.contains(&carol.address()));
    }

    #[test]
    fn test_replayed_request_is_rejected() {
        let (gateway, docs1) = make_gateway();
        let alice = RequestSigner::from_seed([0xA1; 32]);
        let bob = RequestSigner::from_seed([0xB0; 32]);

        let p = gateway
            .ledger()
            .create(alice.address(), metadata_h1(), docs1)
            .unwrap();
        let pay_bob = signed(
            &alice,
            0,
            &LedgerCommand::Transfer {
                property: p,
                to: bob.address(),
                units: 100_000,
            },
        );

        // the same bytes forwarded by anyone apply once
        gateway.submit(&pay_bob).unwrap();
        for _ in 0..4 {
            assert!(matches!(
                gateway.submit(&pay_bob),
                Err(GatewayError::Replay { nonce: 0, .. })
            ));
        }
        assert_eq!(gateway.ledger().balance_of(p, &bob.address()), 100_000);
        assert_eq!(
            gateway.ledger().total_supply(p).unwrap(),
            DEFAULT_DENOMINATOR
        );
        assert_eq!(gateway.next_nonce(&alice.address()).unwrap(), 1);
    }

    #[test]
    fn test_signers_have_independent_nonces() {
        let (gateway, docs1) = make_gateway();
        let alice = RequestSigner::from_seed([0xA1; 32]);
        let bob = RequestSigner::from_seed([0xB0; 32]);

        let alice_create = LedgerCommand::Create {
            metadata_hash: metadata_h1(),
            document_set: docs1,
        };
        let bob_create = LedgerCommand::Create {
            metadata_hash: metadata_h2(),
            document_set: docs1,
        };
        gateway.submit(&signed(&alice, 0, &alice_create)).unwrap();
        gateway.submit(&signed(&bob, 0, &bob_create)).unwrap();

        assert_eq!(gateway.ledger().stats().unwrap().total_properties, 2);
        assert_eq!(gateway.next_nonce(&alice.address()).unwrap(), 1);
        assert_eq!(gateway.next_nonce(&bob.address()).unwrap(), 1);
    }

    #[test]
    fn test_foreign_signature_rejected() {
        let (gateway, docs1) = make_gateway();
        let alice = RequestSigner::from_seed([0xA1; 32]);
        let mallory = RequestSigner::from_seed([0x66; 32]);

        let command = LedgerCommand::Create {
            metadata_hash: metadata_h1(),
            document_set: docs1,
        };
        let mut request = signed(&mallory, 0, &command);
        request.public_key = alice.public_key();

        assert!(matches!(
            gateway.submit(&request),
            Err(GatewayError::Auth(AuthError::InvalidSignature))
        ));
        assert_eq!(gateway.ledger().stats().unwrap().total_properties, 0);
    }
}
