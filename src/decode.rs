//! Positional decoding of simulated call results.
//!
//! Every read-only function of the package returns a single group of values.
//! A [`DecodeShape`] lists the expected fields of that group in declaration order.
//! [`decode`] validates the raw row against it and converts each element.
//! Rows shorter than the shape are rejected, extra trailing elements are ignored.
//! Decoding is all-or-nothing.
//!
//! Numbers are decoded into `u64` exactly: JSON integers and decimal strings are
//! accepted (the latter is how values above 2^53 travel in JSON), anything lossy is rejected.

use serde_json::Value;

use crate::{
    abi,
    error::DexError,
    types::{Address, PoolBalances, PoolFees, PoolInfo, QuoteKind, QuoteResult},
};

/// How a raw element is converted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Numeric,
    Address,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn num(name: &'static str) -> Field {
    Field {
        name,
        kind: FieldKind::Numeric,
    }
}

/// Ordered field list of a result row along with the operation name used in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeShape {
    operation: &'static str,
    fields: &'static [Field],
    lead_label: Option<&'static str>,
}

impl DecodeShape {
    pub const QUOTE: Self = Self::new(
        abi::quote::BY_SELL,
        &[
            num("amount"),
            num("lp_builder_fee_in"),
            num("lp_builder_fee_out"),
            num("swap_fee"),
            num("burn_fee"),
            num("dev_fee"),
            num("rewards_fee"),
        ],
    );

    pub const POOL_BALANCES: Self = Self::new(
        abi::srm::POOL_BALANCES,
        &[num("balance_a"), num("balance_b"), num("lp_supply")],
    );

    pub const POOL_FEES: Self = Self::new(
        abi::srm::POOL_FEES,
        &[
            num("lp_builder_fee"),
            num("burn_fee"),
            num("creator_royalty_fee"),
            num("rewards_fee"),
        ],
    );

    pub const POOL_INFO: Self = Self::new(
        abi::srm::POOL_INFO,
        &[
            num("balance_a"),
            num("balance_b"),
            num("lp_supply"),
            num("lp_builder_fee"),
            num("burn_fee"),
            num("creator_royalty_fee"),
            num("rewards_fee"),
            num("swap_balance_a"),
            num("burn_balance_a"),
            num("burn_balance_b"),
            num("creator_balance_a"),
            num("reward_balance_a"),
            Field {
                name: "creator_royalty_wallet",
                kind: FieldKind::Address,
            },
        ],
    );

    pub const fn new(operation: &'static str, fields: &'static [Field]) -> Self {
        Self {
            operation,
            fields,
            lead_label: None,
        }
    }

    /// Quote shape for the given direction: same layout, different operation and leading label.
    pub fn quote(kind: QuoteKind) -> Self {
        let operation = match kind {
            QuoteKind::BySell => abi::quote::BY_SELL,
            QuoteKind::ByBuy => abi::quote::BY_BUY,
        };
        Self {
            operation,
            lead_label: Some(kind.amount_label()),
            ..Self::QUOTE
        }
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn fields(&self) -> &'static [Field] {
        self.fields
    }

    /// Name of the field at `position`, `None` past the end of the shape.
    pub fn field_name(&self, position: usize) -> Option<&'static str> {
        let field = self.fields.get(position)?;
        match (position, self.lead_label) {
            (0, Some(label)) => Some(label),
            _ => Some(field.name),
        }
    }
}

/// Decoded field value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Numeric(u64),
    Address(Address),
}

/// Decoded row, read back positionally in shape order.
#[derive(Debug)]
pub struct Row {
    operation: &'static str,
    values: std::vec::IntoIter<FieldValue>,
}

impl Row {
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn next_u64(&mut self) -> Result<u64, DexError> {
        match self.values.next() {
            Some(FieldValue::Numeric(v)) => Ok(v),
            other => Err(DexError::malformed(
                self.operation,
                format!("expected numeric field, got {other:?}"),
            )),
        }
    }

    pub fn next_address(&mut self) -> Result<Address, DexError> {
        match self.values.next() {
            Some(FieldValue::Address(v)) => Ok(v),
            other => Err(DexError::malformed(
                self.operation,
                format!("expected address field, got {other:?}"),
            )),
        }
    }
}

/// Validates `raw` against `shape` and converts every field of it.
pub fn decode(shape: &DecodeShape, raw: Option<&Value>) -> Result<Row, DexError> {
    let operation = shape.operation;
    let elements = match raw {
        Some(Value::Array(elements)) => elements,
        Some(other) => {
            return Err(DexError::malformed(
                operation,
                format!("expected array, got {}", json_kind(other)),
            ));
        }
        None => return Err(DexError::malformed(operation, "missing return values")),
    };
    if elements.len() < shape.fields.len() {
        return Err(DexError::malformed(
            operation,
            format!(
                "expected at least {} values, got {}",
                shape.fields.len(),
                elements.len()
            ),
        ));
    }

    let values = shape
        .fields
        .iter()
        .zip(elements)
        .enumerate()
        .map(|(position, (field, element))| {
            let converted = match field.kind {
                FieldKind::Numeric => coerce_u64(element).map(FieldValue::Numeric),
                FieldKind::Address => coerce_address(element).map(FieldValue::Address),
            };
            converted.map_err(|reason| {
                DexError::malformed(
                    operation,
                    format!(
                        "field `{}`: {reason}",
                        shape.field_name(position).unwrap_or(field.name)
                    ),
                )
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Row {
        operation,
        values: values.into_iter(),
    })
}

fn coerce_u64(value: &Value) -> Result<u64, String> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| format!("{n} is not an unsigned 64-bit integer")),
        Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => s
            .parse()
            .map_err(|_| format!("{s:?} overflows unsigned 64-bit integer")),
        other => Err(format!("expected integer, got {}", json_kind(other))),
    }
}

fn coerce_address(value: &Value) -> Result<Address, String> {
    match value {
        Value::String(s) => s.parse().map_err(|e| format!("{e}")),
        other => Err(format!("expected address string, got {}", json_kind(other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Typed result with a fixed decode shape.
pub trait Decode: Sized {
    const SHAPE: DecodeShape;

    fn from_row(row: &mut Row) -> Result<Self, DexError>;

    fn decode(raw: Option<&Value>) -> Result<Self, DexError> {
        Self::from_row(&mut decode(&Self::SHAPE, raw)?)
    }
}

impl Decode for PoolBalances {
    const SHAPE: DecodeShape = DecodeShape::POOL_BALANCES;

    fn from_row(row: &mut Row) -> Result<Self, DexError> {
        Ok(Self {
            balance_a: row.next_u64()?,
            balance_b: row.next_u64()?,
            lp_supply: row.next_u64()?,
        })
    }
}

impl Decode for PoolFees {
    const SHAPE: DecodeShape = DecodeShape::POOL_FEES;

    fn from_row(row: &mut Row) -> Result<Self, DexError> {
        Ok(Self {
            lp_builder_fee: row.next_u64()?,
            burn_fee: row.next_u64()?,
            creator_royalty_fee: row.next_u64()?,
            rewards_fee: row.next_u64()?,
        })
    }
}

impl Decode for PoolInfo {
    const SHAPE: DecodeShape = DecodeShape::POOL_INFO;

    fn from_row(row: &mut Row) -> Result<Self, DexError> {
        Ok(Self {
            balance_a: row.next_u64()?,
            balance_b: row.next_u64()?,
            lp_supply: row.next_u64()?,
            lp_builder_fee: row.next_u64()?,
            burn_fee: row.next_u64()?,
            creator_royalty_fee: row.next_u64()?,
            rewards_fee: row.next_u64()?,
            swap_balance_a: row.next_u64()?,
            burn_balance_a: row.next_u64()?,
            burn_balance_b: row.next_u64()?,
            creator_balance_a: row.next_u64()?,
            reward_balance_a: row.next_u64()?,
            creator_royalty_wallet: row.next_address()?,
        })
    }
}

/// Decodes a quote of either direction, both share [`DecodeShape::QUOTE`].
pub fn decode_quote(kind: QuoteKind, raw: Option<&Value>) -> Result<QuoteResult, DexError> {
    let mut row = decode(&DecodeShape::quote(kind), raw)?;
    Ok(QuoteResult {
        kind,
        amount: row.next_u64()?,
        lp_builder_fee_in: row.next_u64()?,
        lp_builder_fee_out: row.next_u64()?,
        swap_fee: row.next_u64()?,
        burn_fee: row.next_u64()?,
        dev_fee: row.next_u64()?,
        rewards_fee: row.next_u64()?,
    })
}
