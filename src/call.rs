//! Call descriptor construction.
//!
//! A [`CallDescriptor`] is a single Move call preceded by the derivation commands
//! its arguments depend on. Arguments are kept exactly in the order they were
//! appended to the [`CallBuilder`], which must be the callee's declared parameter order.
//!
//! ```
//! use srm_dex_sdk::{call::{CallBuilder, CallTarget}, types::Address};
//!
//! let target = CallTarget::new(Address::CLOCK, "SRMV1", "deposit_lp_tokens").unwrap();
//! let mut builder = CallBuilder::new(target);
//! let split = builder.split_coin("0xc0".parse().unwrap(), 10);
//! let call = builder
//!     .object("0xb0".parse().unwrap())
//!     .derived(split)
//!     .u64(10)
//!     .build()
//!     .unwrap();
//! assert_eq!(call.commands().len(), 1);
//! assert_eq!(call.arguments().len(), 3);
//! ```

use std::{
    fmt,
    str::FromStr,
    sync::atomic::{AtomicUsize, Ordering},
};

use itertools::Itertools;
use serde::{Serialize, Serializer};

use crate::{
    error::EncodingError,
    types::{Address, Identifier, ObjectId, TypeTag},
};

/// Fully qualified Move function.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CallTarget {
    package: Address,
    module: Identifier,
    function: Identifier,
}

impl CallTarget {
    pub fn new(
        package: Address,
        module: impl Into<String>,
        function: impl Into<String>,
    ) -> Result<Self, EncodingError> {
        Ok(Self {
            package,
            module: Identifier::new(module)?,
            function: Identifier::new(function)?,
        })
    }

    pub fn package(&self) -> Address {
        self.package
    }

    pub fn module(&self) -> &Identifier {
        &self.module
    }

    pub fn function(&self) -> &Identifier {
        &self.function
    }
}

impl fmt::Display for CallTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.package, self.module, self.function)
    }
}

impl Serialize for CallTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Tagged pure value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum PureValue {
    U64(u64),
    Bool(bool),
    Address(Address),
    Bytes(Vec<u8>),
}

impl PureValue {
    /// Parses a decimal `u64`, as supplied by loosely typed callers.
    pub fn parse_u64(s: &str) -> Result<Self, EncodingError> {
        let digits = s.trim();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(EncodingError::InvalidU64(s.to_string()));
        }
        digits
            .parse()
            .map(PureValue::U64)
            .map_err(|_| EncodingError::InvalidU64(s.to_string()))
    }

    /// BCS encoding of the value.
    pub fn to_bcs(&self) -> Result<Vec<u8>, EncodingError> {
        Ok(match self {
            PureValue::U64(v) => bcs::to_bytes(v)?,
            PureValue::Bool(v) => bcs::to_bytes(v)?,
            PureValue::Address(v) => bcs::to_bytes(v.as_bytes())?,
            PureValue::Bytes(v) => bcs::to_bytes(v)?,
        })
    }
}

impl FromStr for PureValue {
    type Err = EncodingError;

    /// Parses `<tag>:<value>`, e.g. `u64:1000`, `bool:true`, `address:0x6`, `bytes:0xff00`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tag, value) = s
            .split_once(':')
            .ok_or_else(|| EncodingError::InvalidTypeTag(s.to_string()))?;
        match tag {
            "u64" => Self::parse_u64(value),
            "bool" => value
                .parse()
                .map(PureValue::Bool)
                .map_err(|_| EncodingError::InvalidTypeTag(s.to_string())),
            "address" => value.parse().map(PureValue::Address),
            "bytes" => hex::decode(value.trim_start_matches("0x"))
                .map(PureValue::Bytes)
                .map_err(|_| EncodingError::InvalidTypeTag(s.to_string())),
            _ => Err(EncodingError::InvalidTypeTag(s.to_string())),
        }
    }
}

/// Pure value together with its wire encoding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PureArg {
    #[serde(flatten)]
    value: PureValue,
    #[serde(serialize_with = "serialize_hex")]
    bcs: Vec<u8>,
}

impl PureArg {
    pub fn new(value: PureValue) -> Result<Self, EncodingError> {
        let bcs = value.to_bcs()?;
        Ok(Self { value, bcs })
    }

    pub fn value(&self) -> &PureValue {
        &self.value
    }

    pub fn bcs(&self) -> &[u8] {
        &self.bcs
    }
}

fn serialize_hex<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}

/// Handle to the value produced by a derivation command of the same call.
///
/// Only valid on the [`CallBuilder`] that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Derived {
    builder: usize,
    index: usize,
}

impl Derived {
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Positional argument of the Move call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CallArgument {
    Pure(PureArg),
    Object { id: ObjectId },
    Derived { index: usize },
}

/// Derivation command executed before the call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Command {
    /// Carves a sub-coin of `amount` out of `coin`.
    SplitCoin { coin: ObjectId, amount: u64 },
}

/// Immutable description of a Move call ready for simulation or submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallDescriptor {
    commands: Vec<Command>,
    target: CallTarget,
    type_params: Vec<TypeTag>,
    arguments: Vec<CallArgument>,
}

impl CallDescriptor {
    pub fn target(&self) -> &CallTarget {
        &self.target
    }

    pub fn type_params(&self) -> &[TypeTag] {
        &self.type_params
    }

    pub fn arguments(&self) -> &[CallArgument] {
        &self.arguments
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Position of the Move call among all executed commands,
    /// i.e. the index of its result group in a simulation result.
    pub fn call_index(&self) -> usize {
        self.commands.len()
    }
}

impl fmt::Display for CallDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.target)?;
        if !self.type_params.is_empty() {
            write!(f, "<{}>", self.type_params.iter().join(", "))?;
        }
        Ok(())
    }
}

/// Builder of [`CallDescriptor`].
///
/// Argument appenders never fail, encoding errors are reported by [`CallBuilder::build`].
#[derive(Debug)]
pub struct CallBuilder {
    id: usize,
    target: CallTarget,
    type_params: Vec<TypeTag>,
    commands: Vec<Command>,
    arguments: Vec<Result<CallArgument, EncodingError>>,
}

impl CallBuilder {
    pub fn new(target: CallTarget) -> Self {
        static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            target,
            type_params: vec![],
            commands: vec![],
            arguments: vec![],
        }
    }

    pub fn type_params(mut self, type_params: impl IntoIterator<Item = TypeTag>) -> Self {
        self.type_params.extend(type_params);
        self
    }

    /// Registers a split of `amount` off `coin` and returns the handle
    /// to pass to [`CallBuilder::derived`].
    pub fn split_coin(&mut self, coin: ObjectId, amount: u64) -> Derived {
        let handle = Derived {
            builder: self.id,
            index: self.commands.len(),
        };
        self.commands.push(Command::SplitCoin { coin, amount });
        handle
    }

    pub fn pure(mut self, value: PureValue) -> Self {
        self.arguments.push(PureArg::new(value).map(CallArgument::Pure));
        self
    }

    pub fn u64(self, value: u64) -> Self {
        self.pure(PureValue::U64(value))
    }

    /// Appends a `u64` given in decimal text form.
    pub fn u64_str(mut self, value: &str) -> Self {
        self.arguments
            .push(PureValue::parse_u64(value).and_then(PureArg::new).map(CallArgument::Pure));
        self
    }

    pub fn bool(self, value: bool) -> Self {
        self.pure(PureValue::Bool(value))
    }

    pub fn address(self, value: Address) -> Self {
        self.pure(PureValue::Address(value))
    }

    pub fn bytes(self, value: Vec<u8>) -> Self {
        self.pure(PureValue::Bytes(value))
    }

    pub fn object(mut self, id: ObjectId) -> Self {
        self.arguments.push(Ok(CallArgument::Object { id }));
        self
    }

    /// Appends the value of a split registered on this builder, a handle
    /// issued by another builder fails the build.
    pub fn derived(mut self, handle: Derived) -> Self {
        self.arguments.push(if handle.builder == self.id {
            Ok(CallArgument::Derived {
                index: handle.index,
            })
        } else {
            Err(EncodingError::UnknownDerived(handle.index))
        });
        self
    }

    pub fn build(self) -> Result<CallDescriptor, EncodingError> {
        let arguments = self
            .arguments
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CallDescriptor {
            commands: self.commands,
            target: self.target,
            type_params: self.type_params,
            arguments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> CallTarget {
        CallTarget::new("0xabc".parse().unwrap(), "SRMV1", "deposit_lp_tokens").unwrap()
    }

    #[test]
    fn test_target_display() {
        let expected = format!("{}::SRMV1::deposit_lp_tokens", "0xabc".parse::<Address>().unwrap());
        assert_eq!(target().to_string(), expected);
        assert!(matches!(
            CallTarget::new(Address::ZERO, "SRMV1", "bad-name"),
            Err(EncodingError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_pure_value_bcs() {
        assert_eq!(
            PureValue::U64(1000).to_bcs().unwrap(),
            vec![0xe8, 0x03, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(PureValue::Bool(true).to_bcs().unwrap(), vec![1]);
        assert_eq!(PureValue::Address(Address::CLOCK).to_bcs().unwrap().len(), 32);
        assert_eq!(
            PureValue::Bytes(vec![0xaa, 0xbb]).to_bcs().unwrap(),
            vec![2, 0xaa, 0xbb]
        );
    }

    #[test]
    fn test_parse_u64_rejects_unrepresentable() {
        assert_eq!(PureValue::parse_u64(" 42 "), Ok(PureValue::U64(42)));
        for s in ["-1", "", "1.5", "abc", "+7", "18446744073709551616"] {
            assert!(
                matches!(PureValue::parse_u64(s), Err(EncodingError::InvalidU64(_))),
                "{s}"
            );
        }
    }

    #[test]
    fn test_pure_value_from_str() {
        assert_eq!("u64:7".parse::<PureValue>(), Ok(PureValue::U64(7)));
        assert_eq!("bool:false".parse::<PureValue>(), Ok(PureValue::Bool(false)));
        assert_eq!(
            "address:0x6".parse::<PureValue>(),
            Ok(PureValue::Address(Address::CLOCK))
        );
        assert_eq!(
            "bytes:0xff00".parse::<PureValue>(),
            Ok(PureValue::Bytes(vec![0xff, 0]))
        );
        assert!("u64:-3".parse::<PureValue>().is_err());
        assert!("i64:3".parse::<PureValue>().is_err());
    }

    #[test]
    fn test_builder_keeps_argument_order() {
        let call = CallBuilder::new(target())
            .u64(1)
            .bool(true)
            .object(Address::CLOCK)
            .u64(2)
            .build()
            .unwrap();
        let values = call
            .arguments()
            .iter()
            .map(|a| match a {
                CallArgument::Pure(p) => format!("{:?}", p.value()),
                CallArgument::Object { id } => id.to_string(),
                CallArgument::Derived { index } => format!("#{index}"),
            })
            .collect::<Vec<_>>();
        assert_eq!(
            values,
            vec![
                "U64(1)".to_string(),
                "Bool(true)".to_string(),
                Address::CLOCK.to_string(),
                "U64(2)".to_string(),
            ]
        );
        assert_eq!(call.call_index(), 0);
    }

    #[test]
    fn test_builder_derived_precedes_call() {
        let mut builder = CallBuilder::new(target());
        let split = builder.split_coin(Address::CLOCK, 55);
        let call = builder.object(Address::ZERO).derived(split).u64(55).build().unwrap();
        assert_eq!(call.call_index(), 1);
        assert!(matches!(
            &call.commands()[0],
            Command::SplitCoin { coin, amount: 55 } if *coin == Address::CLOCK
        ));
        assert_eq!(call.arguments()[1], CallArgument::Derived { index: 0 });
    }

    #[test]
    fn test_builder_rejects_unknown_derived() {
        let mut other = CallBuilder::new(target());
        other.split_coin(Address::ZERO, 1);
        let mut second = CallBuilder::new(target());
        second.split_coin(Address::ZERO, 1);
        let foreign = second.split_coin(Address::ZERO, 2);

        assert_eq!(
            other.derived(foreign).build(),
            Err(EncodingError::UnknownDerived(1))
        );
    }

    #[test]
    fn test_builder_rejects_foreign_derived_in_range() {
        let mut mine = CallBuilder::new(target());
        mine.split_coin(Address::CLOCK, 1);
        let mut other = CallBuilder::new(target());
        let foreign = other.split_coin(Address::ZERO, 999);
        assert_eq!(foreign.index(), 0);

        assert_eq!(
            mine.object(Address::ZERO).derived(foreign).build(),
            Err(EncodingError::UnknownDerived(0))
        );

        let mut mine = CallBuilder::new(target());
        let own = mine.split_coin(Address::CLOCK, 1);
        assert!(mine.derived(own).build().is_ok());
    }

    #[test]
    fn test_builder_reports_encoding_error() {
        let result = CallBuilder::new(target()).u64(1).u64_str("-5").build();
        assert_eq!(result, Err(EncodingError::InvalidU64("-5".to_string())));
    }

    #[test]
    fn test_descriptor_json_shape() {
        let sui: TypeTag = "0x2::sui::SUI".parse().unwrap();
        let mut builder = CallBuilder::new(target()).type_params([sui]);
        let split = builder.split_coin(Address::CLOCK, 1);
        let call = builder.derived(split).u64(1).build().unwrap();
        let json = serde_json::to_value(&call).unwrap();

        assert_eq!(json["commands"][0]["kind"], "splitCoin");
        assert_eq!(json["commands"][0]["amount"], 1);
        assert_eq!(json["typeParams"][0], "0x2::sui::SUI");
        assert_eq!(json["arguments"][0]["kind"], "derived");
        assert_eq!(json["arguments"][1]["kind"], "pure");
        assert_eq!(json["arguments"][1]["type"], "u64");
        assert_eq!(json["arguments"][1]["bcs"], "0100000000000000");
    }
}
