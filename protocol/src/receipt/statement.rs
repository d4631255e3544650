//! Block statements: the per-block record of which alias resolved to what.
//!
//! A statement is produced once per block by the chain and never changes.
//! The client only reads it.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::account::Address;
use crate::transaction::factory::{array, numeric_u64, optional, required, string, unsigned};
use crate::transaction::ids::{MosaicId, UnresolvedAddress, UnresolvedMosaicId};
use crate::transaction::DecodingError;

/// Which statement set an identifier belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResolutionType {
    Address,
    Mosaic,
}

impl fmt::Display for ResolutionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address => write!(f, "address"),
            Self::Mosaic => write!(f, "mosaic"),
        }
    }
}

/// Position of the transaction a receipt applies to.
///
/// Both ids are 1-based; `(0, 0)` is reserved for block-level receipts and
/// `secondary_id == 0` marks a top-level transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptSource {
    pub primary_id: u32,
    pub secondary_id: u32,
}

impl ReceiptSource {
    pub fn new(primary_id: u32, secondary_id: u32) -> Self {
        Self {
            primary_id,
            secondary_id,
        }
    }

    /// The coordinate the chain records for a transaction position.
    ///
    /// Top-level: `(top_level_index + 1, 0)`.
    /// Aggregate inner: `(inner_index + 1, top_level_index + 1)`. The inner
    /// position goes first. `None` only if an index overflows.
    pub fn expected(top_level_index: u32, inner_index: Option<u32>) -> Option<Self> {
        let top = top_level_index.checked_add(1)?;
        match inner_index {
            Some(inner) => Some(Self::new(inner.checked_add(1)?, top)),
            None => Some(Self::new(top, 0)),
        }
    }
}

impl fmt::Display for ReceiptSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.primary_id, self.secondary_id)
    }
}

/// An identifier awaiting resolution, tagged with its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Unresolved {
    Address(UnresolvedAddress),
    Mosaic(UnresolvedMosaicId),
}

impl Unresolved {
    pub fn resolution_type(&self) -> ResolutionType {
        match self {
            Self::Address(_) => ResolutionType::Address,
            Self::Mosaic(_) => ResolutionType::Mosaic,
        }
    }
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(a) => write!(f, "{}", a),
            Self::Mosaic(m) => write!(f, "{}", m),
        }
    }
}

/// The concrete value an alias resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResolvedValue {
    Address(Address),
    Mosaic(MosaicId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionEntry {
    pub source: ReceiptSource,
    pub resolved: ResolvedValue,
}

/// All resolutions of one unresolved identifier within one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionStatement {
    pub height: u64,
    pub unresolved: Unresolved,
    pub resolution_entries: Vec<ResolutionEntry>,
}

/// Every resolution statement of a block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statement {
    pub address_resolution_statements: Vec<ResolutionStatement>,
    pub mosaic_resolution_statements: Vec<ResolutionStatement>,
}

impl Statement {
    /// Statements of one kind.
    pub fn statements(&self, kind: ResolutionType) -> &[ResolutionStatement] {
        match kind {
            ResolutionType::Address => &self.address_resolution_statements,
            ResolutionType::Mosaic => &self.mosaic_resolution_statements,
        }
    }

    /// Reads the REST shape:
    ///
    /// ```text
    /// { "addressResolutionStatements": [ { "statement": { "height": "1",
    ///     "unresolved": "99...", "resolutionEntries": [
    ///       { "source": { "primaryId": 1, "secondaryId": 0 }, "resolved": "98..." } ] } } ],
    ///   "mosaicResolutionStatements": [ ... ] }
    /// ```
    ///
    /// The `statement` wrapper is optional.
    pub fn from_json(value: &Value) -> Result<Self, DecodingError> {
        let read = |name: &'static str, kind: ResolutionType| {
            array(value, name)?
                .iter()
                .map(|record| resolution_statement(record, kind))
                .collect::<Result<Vec<_>, DecodingError>>()
        };
        Ok(Self {
            address_resolution_statements: read("addressResolutionStatements", ResolutionType::Address)?,
            mosaic_resolution_statements: read("mosaicResolutionStatements", ResolutionType::Mosaic)?,
        })
    }
}

fn resolution_statement(
    record: &Value,
    kind: ResolutionType,
) -> Result<ResolutionStatement, DecodingError> {
    let statement = optional(record, "statement").unwrap_or(record);
    let height = numeric_u64(required(statement, "height")?, "statement.height")?;
    let unresolved_text = string(required(statement, "unresolved")?, "statement.unresolved")?;
    let unresolved = match kind {
        ResolutionType::Address => UnresolvedAddress::from_encoded(unresolved_text)
            .map(Unresolved::Address)
            .map_err(|e| DecodingError::invalid("statement.unresolved", e.to_string()))?,
        ResolutionType::Mosaic => UnresolvedMosaicId::from_hex(unresolved_text)
            .map(Unresolved::Mosaic)
            .ok_or_else(|| DecodingError::invalid("statement.unresolved", unresolved_text))?,
    };

    let resolution_entries = array(statement, "resolutionEntries")?
        .iter()
        .map(|entry| {
            let source = required(entry, "source")?;
            let resolved_text = string(required(entry, "resolved")?, "resolved")?;
            let resolved = match kind {
                ResolutionType::Address => Address::from_encoded(resolved_text)
                    .map(ResolvedValue::Address)
                    .map_err(|e| DecodingError::invalid("resolved", e.to_string()))?,
                ResolutionType::Mosaic => MosaicId::from_hex(resolved_text)
                    .map(ResolvedValue::Mosaic)
                    .ok_or_else(|| DecodingError::invalid("resolved", resolved_text))?,
            };
            Ok(ResolutionEntry {
                source: ReceiptSource::new(
                    unsigned(required(source, "primaryId")?, "source.primaryId")?,
                    unsigned(required(source, "secondaryId")?, "source.secondaryId")?,
                ),
                resolved,
            })
        })
        .collect::<Result<Vec<_>, DecodingError>>()?;

    Ok(ResolutionStatement {
        height,
        unresolved,
        resolution_entries,
    })
}
