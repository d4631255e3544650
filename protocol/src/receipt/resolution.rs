//! # Alias Resolution Engine
//!
//! Finds the concrete value an alias resolved to for one transaction.
//!
//! 1. Pick the address or mosaic statements, by the kind of the
//!    unresolved identifier.
//! 2. Keep the statement whose height **and** unresolved identifier both
//!    match. The identifier is compared as written in the transaction,
//!    never by what it resolved to.
//! 3. Compute the expected [`ReceiptSource`] for the transaction position.
//! 4. Return the entry with exactly that source.
//!
//! There is no fallback to the first entry or to an entry with a matching
//! primary id only. Sibling transactions in the same block often share an
//! alias, and a near match would attribute one sibling's resolution to
//! another.

use thiserror::Error;
use tracing::debug;

use super::service::LookupError;
use super::statement::{ReceiptSource, ResolutionType, ResolvedValue, Statement, Unresolved};
use crate::account::Address;
use crate::transaction::{DecodingError, MosaicId, UnresolvedAddress, UnresolvedMosaicId};

/// Errors raised while resolving aliases.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The block has no statement for this identifier at this height.
    #[error("no {kind} resolution statement for {unresolved} at height {height}")]
    StatementNotFound {
        kind: ResolutionType,
        unresolved: String,
        height: u64,
    },

    /// A statement exists, but no entry has the expected source.
    #[error("no {kind} resolution entry for {unresolved} at height {height} with source {expected}")]
    EntryNotFound {
        kind: ResolutionType,
        unresolved: String,
        height: u64,
        expected: ReceiptSource,
    },

    /// The transaction has no height or index to resolve against.
    #[error("transaction has no block metadata")]
    MissingTransactionInfo,

    /// The statement or transaction lookup failed.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// A fetched record did not decode.
    #[error(transparent)]
    Decoding(#[from] DecodingError),
}

impl ResolutionError {
    /// True for the two "nothing recorded" cases.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::StatementNotFound { .. } | Self::EntryNotFound { .. }
        )
    }
}

/// Resolves `unresolved` for the transaction at `top_level_index` in the
/// block at `height`, or for its inner transaction at `inner_index`.
pub fn resolve(
    statement: &Statement,
    unresolved: &Unresolved,
    height: u64,
    top_level_index: u32,
    inner_index: Option<u32>,
) -> Result<ResolvedValue, ResolutionError> {
    let kind = unresolved.resolution_type();

    let resolution = statement
        .statements(kind)
        .iter()
        .find(|s| s.height == height && s.unresolved == *unresolved)
        .ok_or_else(|| ResolutionError::StatementNotFound {
            kind,
            unresolved: unresolved.to_string(),
            height,
        })?;

    let not_found = |expected: ReceiptSource| ResolutionError::EntryNotFound {
        kind,
        unresolved: unresolved.to_string(),
        height,
        expected,
    };
    let expected = ReceiptSource::expected(top_level_index, inner_index)
        .ok_or_else(|| not_found(ReceiptSource::new(u32::MAX, u32::MAX)))?;

    let entry = resolution
        .resolution_entries
        .iter()
        .find(|e| e.source == expected)
        .ok_or_else(|| not_found(expected))?;

    debug!(%kind, %unresolved, height, source = %expected, "alias resolved");
    Ok(entry.resolved)
}

/// Resolves an address field. A concrete address is returned as is.
pub fn resolve_address(
    statement: &Statement,
    unresolved: &UnresolvedAddress,
    height: u64,
    top_level_index: u32,
    inner_index: Option<u32>,
) -> Result<Address, ResolutionError> {
    if let UnresolvedAddress::Address(address) = unresolved {
        return Ok(*address);
    }
    let query = Unresolved::Address(*unresolved);
    match resolve(statement, &query, height, top_level_index, inner_index)? {
        ResolvedValue::Address(address) => Ok(address),
        ResolvedValue::Mosaic(_) => Err(ResolutionError::EntryNotFound {
            kind: ResolutionType::Address,
            unresolved: query.to_string(),
            height,
            expected: ReceiptSource::expected(top_level_index, inner_index)
                .unwrap_or(ReceiptSource::new(0, 0)),
        }),
    }
}

/// Resolves a mosaic id field. A concrete mosaic id is returned as is.
pub fn resolve_mosaic_id(
    statement: &Statement,
    unresolved: &UnresolvedMosaicId,
    height: u64,
    top_level_index: u32,
    inner_index: Option<u32>,
) -> Result<MosaicId, ResolutionError> {
    if let UnresolvedMosaicId::Mosaic(id) = unresolved {
        return Ok(*id);
    }
    let query = Unresolved::Mosaic(*unresolved);
    match resolve(statement, &query, height, top_level_index, inner_index)? {
        ResolvedValue::Mosaic(id) => Ok(id),
        ResolvedValue::Address(_) => Err(ResolutionError::EntryNotFound {
            kind: ResolutionType::Mosaic,
            unresolved: query.to_string(),
            height,
            expected: ReceiptSource::expected(top_level_index, inner_index)
                .unwrap_or(ReceiptSource::new(0, 0)),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipt::statement::{ResolutionEntry, ResolutionStatement};
    use crate::transaction::NamespaceId;

    const H: u64 = 1_000;

    fn addr(byte: u8) -> Address {
        let mut raw = [byte; 24];
        raw[0] = 0x98;
        Address::from_bytes(raw)
    }

    fn alias() -> UnresolvedAddress {
        UnresolvedAddress::Namespace(NamespaceId(0xD857_42D2_6861_7751))
    }

    fn entry(primary_id: u32, secondary_id: u32, resolved: Address) -> ResolutionEntry {
        ResolutionEntry {
            source: ReceiptSource::new(primary_id, secondary_id),
            resolved: ResolvedValue::Address(resolved),
        }
    }

    fn statement() -> Statement {
        Statement {
            address_resolution_statements: vec![
                ResolutionStatement {
                    height: H,
                    unresolved: Unresolved::Address(alias()),
                    resolution_entries: vec![entry(1, 0, addr(0xAA)), entry(2, 1, addr(0xBB))],
                },
                ResolutionStatement {
                    height: H + 1,
                    unresolved: Unresolved::Address(alias()),
                    resolution_entries: vec![entry(1, 0, addr(0xCC))],
                },
            ],
            mosaic_resolution_statements: vec![],
        }
    }

    #[test]
    fn test_standalone_resolves_to_top_level_entry() {
        let resolved = resolve(&statement(), &Unresolved::Address(alias()), H, 0, None).unwrap();
        assert_eq!(resolved, ResolvedValue::Address(addr(0xAA)));
    }

    #[test]
    fn test_inner_resolves_with_inverted_coordinates() {
        let resolved = resolve(&statement(), &Unresolved::Address(alias()), H, 0, Some(1)).unwrap();
        assert_eq!(resolved, ResolvedValue::Address(addr(0xBB)));
    }

    #[test]
    fn test_unmatched_index_fails() {
        let err = resolve(&statement(), &Unresolved::Address(alias()), H, 5, None).unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(
            err,
            ResolutionError::EntryNotFound { expected, .. } if expected == ReceiptSource::new(6, 0)
        ));
    }

    #[test]
    fn test_primary_only_match_is_not_enough() {
        // (2, 0) does not exist even though an entry with primary id 2 does.
        let err = resolve(&statement(), &Unresolved::Address(alias()), H, 1, None).unwrap_err();
        assert!(matches!(err, ResolutionError::EntryNotFound { .. }));
    }

    #[test]
    fn test_height_must_match_exactly() {
        let resolved = resolve(&statement(), &Unresolved::Address(alias()), H + 1, 0, None).unwrap();
        assert_eq!(resolved, ResolvedValue::Address(addr(0xCC)));

        let err = resolve(&statement(), &Unresolved::Address(alias()), H + 2, 0, None).unwrap_err();
        assert!(matches!(err, ResolutionError::StatementNotFound { height, .. } if height == H + 2));
    }

    #[test]
    fn test_other_alias_has_no_statement() {
        let other = Unresolved::Address(UnresolvedAddress::Namespace(NamespaceId(7)));
        let err = resolve(&statement(), &other, H, 0, None).unwrap_err();
        assert!(matches!(err, ResolutionError::StatementNotFound { .. }));
    }

    #[test]
    fn test_kind_selects_statement_set() {
        let as_mosaic = Unresolved::Mosaic(UnresolvedMosaicId::Namespace(NamespaceId(
            0xD857_42D2_6861_7751,
        )));
        let err = resolve(&statement(), &as_mosaic, H, 0, None).unwrap_err();
        assert!(matches!(
            err,
            ResolutionError::StatementNotFound { kind: ResolutionType::Mosaic, .. }
        ));
    }

    #[test]
    fn test_concrete_values_pass_through() {
        let concrete = UnresolvedAddress::Address(addr(0x11));
        assert_eq!(
            resolve_address(&Statement::default(), &concrete, H, 0, None).unwrap(),
            addr(0x11)
        );
        let mosaic = UnresolvedMosaicId::Mosaic(MosaicId(5));
        assert_eq!(
            resolve_mosaic_id(&Statement::default(), &mosaic, H, 0, None).unwrap(),
            MosaicId(5)
        );
    }

    #[test]
    fn test_resolve_address_helper() {
        assert_eq!(
            resolve_address(&statement(), &alias(), H, 0, Some(1)).unwrap(),
            addr(0xBB)
        );
    }
}
