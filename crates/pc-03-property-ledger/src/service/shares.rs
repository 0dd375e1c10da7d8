//! # Share Ledger Operations
//!
//! Transfers and splits over a staged `SharePartition`.

use super::*;
use crate::domain::errors::LedgerError;
use crate::domain::property::PropertyRecord;
use crate::domain::provenance::EventPayload;
use crate::domain::shares::{allocation_total, Allocation, OwnershipEntry};
use crate::ports::inbound::ShareLedgerApi;
use shared_types::{Address, PropertyId, ShareUnit};
use tracing::{debug, warn};

impl<KV, TS, DR> PropertyLedgerService<KV, TS, DR>
where
    KV: KeyValueStore,
    TS: TimeSource,
    DR: DocumentSetResolver,
{
    /// Credit the full denominator to the creator as the genesis event.
    pub(crate) fn mint(
        &self,
        mutation: &mut Mutation,
        creator: Address,
        denominator: ShareUnit,
        timestamp: shared_types::LogicalTime,
    ) -> Result<(), LedgerError> {
        if !mutation.is_genesis() {
            return Err(LedgerError::invariant(
                mutation.property,
                "mint on a property that already has provenance",
            ));
        }
        mutation.partition.credit(creator, denominator)?;
        mutation.append(
            creator,
            EventPayload::Minted {
                to: creator,
                units: denominator,
            },
            timestamp,
        )?;
        Ok(())
    }

    fn validate_allocations(
        &self,
        property: PropertyId,
        holder: &Address,
        allocations: &[Allocation],
    ) -> Result<(), LedgerError> {
        if allocations.is_empty() {
            return Err(LedgerError::InvalidAmount {
                reason: "split requires at least one allocation",
            });
        }
        if allocations.len() > self.config.max_split_allocations {
            return Err(LedgerError::TooManyAllocations {
                count: allocations.len(),
                max: self.config.max_split_allocations,
            });
        }
        for allocation in allocations {
            if allocation.units == 0 {
                return Err(LedgerError::InvalidAmount {
                    reason: "split allocation of zero units",
                });
            }
            if allocation.to == *holder {
                return Err(LedgerError::SelfTransfer {
                    property,
                    holder: *holder,
                });
            }
        }
        Ok(())
    }

    fn record_ownership_change(record: &mut PropertyRecord) {
        record.ownership_changes = record.ownership_changes.saturating_add(1);
    }
}

impl<KV, TS, DR> ShareLedgerApi for PropertyLedgerService<KV, TS, DR>
where
    KV: KeyValueStore,
    TS: TimeSource,
    DR: DocumentSetResolver,
{
    fn transfer(
        &mut self,
        property: PropertyId,
        from: Address,
        to: Address,
        units: ShareUnit,
    ) -> Result<(), LedgerError> {
        let mut record = self.active_record(property)?;
        if units == 0 {
            return Err(LedgerError::InvalidAmount {
                reason: "transfer of zero units",
            });
        }
        if from == to {
            return Err(LedgerError::SelfTransfer {
                property,
                holder: from,
            });
        }

        let mut mutation = self.begin(property)?;
        mutation.partition.debit(from, units)?;
        mutation.partition.credit(to, units)?;

        let now = self.clock.now();
        mutation.append(from, EventPayload::Transferred { from, to, units }, now)?;
        Self::record_ownership_change(&mut record);

        debug!("[pc-03] transfer {} units of {}: {} -> {}", units, property, from, to);
        self.commit(mutation, &record)?;
        Ok(())
    }

    fn split(
        &mut self,
        property: PropertyId,
        holder: Address,
        allocations: &[Allocation],
    ) -> Result<(), LedgerError> {
        let mut record = self.active_record(property)?;
        self.validate_allocations(property, &holder, allocations)?;

        let mut mutation = self.begin(property)?;
        let available = mutation.partition.balance_of(&holder);
        let requested = allocation_total(allocations);
        if requested > available as u128 {
            return Err(LedgerError::SplitExceedsBalance {
                property,
                holder,
                available,
                requested,
            });
        }
        // requested <= available, so the narrowing cannot truncate
        let total_units = requested as ShareUnit;

        mutation.partition.debit(holder, total_units)?;
        for allocation in allocations {
            mutation.partition.credit(allocation.to, allocation.units)?;
        }

        let now = self.clock.now();
        mutation.append(
            holder,
            EventPayload::SplitOpened {
                holder,
                allocations: allocations.to_vec(),
                total_units,
            },
            now,
        )?;
        for (index, allocation) in allocations.iter().enumerate() {
            mutation.append(
                holder,
                EventPayload::SplitAllocated {
                    holder,
                    to: allocation.to,
                    units: allocation.units,
                    index: index as u32,
                },
                now,
            )?;
        }
        Self::record_ownership_change(&mut record);

        debug!(
            "[pc-03] split {} units of {} from {} into {} allocations",
            total_units,
            property,
            holder,
            allocations.len()
        );
        self.commit(mutation, &record)?;
        Ok(())
    }

    fn merge(&mut self, property: PropertyId, holder: Address) -> Result<ShareUnit, LedgerError> {
        self.active_record(property)?;
        self.stored_balance(property, &holder)
    }

    fn balance_of(&self, property: PropertyId, holder: &Address) -> ShareUnit {
        match self.stored_balance(property, holder) {
            Ok(units) => units,
            Err(e) => {
                warn!("[pc-03] balance read failed for {} in {}: {}", holder, property, e);
                0
            }
        }
    }

    fn total_supply(&self, property: PropertyId) -> Result<ShareUnit, LedgerError> {
        let record = self.require_record(property)?;
        let partition = self.load_partition(property)?;
        let total = partition
            .total()
            .ok_or_else(|| LedgerError::invariant(property, "supply overflow"))?;
        if total != record.denominator {
            return Err(LedgerError::invariant(
                property,
                format!("supply {} != denominator {}", total, record.denominator),
            ));
        }
        Ok(total)
    }

    fn holders(&self, property: PropertyId) -> Result<Vec<OwnershipEntry>, LedgerError> {
        self.require_record(property)?;
        Ok(self.load_partition(property)?.entries())
    }
}
