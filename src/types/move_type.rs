use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::EncodingError;

use super::Address;

/// Move module or function name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, derive_more::Display)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(name: impl Into<String>) -> Result<Self, EncodingError> {
        let name = name.into();
        if is_valid_identifier(&name) {
            Ok(Self(name))
        } else {
            Err(EncodingError::InvalidIdentifier(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        // A lone underscore is reserved.
        Some('_') if name.len() > 1 => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Move type identifier, e.g. `0x2::sui::SUI` or `vector<u8>`.
///
/// Kept in the form it was supplied, validated structurally only.
#[derive(Clone, Debug, PartialEq, Eq, Hash, derive_more::Display)]
pub struct TypeTag(String);

const PRIMITIVES: [&str; 9] = [
    "bool", "u8", "u16", "u32", "u64", "u128", "u256", "address", "signer",
];

/// Deepest accepted nesting of type parameter lists.
const MAX_TYPE_DEPTH: usize = 16;

impl TypeTag {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TypeTag {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        if is_valid_type(tag, 0) {
            Ok(Self(tag.to_string()))
        } else {
            Err(EncodingError::InvalidTypeTag(s.to_string()))
        }
    }
}

fn is_valid_type(tag: &str, depth: usize) -> bool {
    if PRIMITIVES.contains(&tag) {
        return true;
    }
    let (head, params) = match tag.split_once('<') {
        Some((head, rest)) => match rest.strip_suffix('>') {
            Some(inner) => (head, Some(inner)),
            None => return false,
        },
        None => (tag, None),
    };
    if params.is_some() && depth >= MAX_TYPE_DEPTH {
        return false;
    }
    let head_ok = if head == "vector" {
        params.is_some_and(|p| split_params(p).is_some_and(|ps| ps.len() == 1))
    } else {
        is_valid_struct_head(head)
    };
    head_ok
        && params.is_none_or(|p| {
            split_params(p)
                .is_some_and(|ps| ps.into_iter().all(|t| is_valid_type(t, depth + 1)))
        })
}

fn is_valid_struct_head(head: &str) -> bool {
    let parts: Vec<&str> = head.split("::").collect();
    matches!(parts.as_slice(), [addr, module, name]
        if addr.parse::<Address>().is_ok()
            && is_valid_identifier(module)
            && is_valid_identifier(name))
}

/// Splits a type parameter list on top-level commas.
fn split_params(list: &str) -> Option<Vec<&str>> {
    let mut depth = 0usize;
    let mut start = 0;
    let mut params = vec![];
    for (i, c) in list.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                params.push(list[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    params.push(list[start..].trim());
    Some(params)
}

impl Serialize for TypeTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TypeTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Coin types of a pool, in the pool's declared `<A, B>` order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoinPair {
    pub a: TypeTag,
    pub b: TypeTag,
}

impl CoinPair {
    pub fn new(a: TypeTag, b: TypeTag) -> Self {
        Self { a, b }
    }

    /// Type parameters of the generic pool functions.
    pub fn type_params(&self) -> [TypeTag; 2] {
        [self.a.clone(), self.b.clone()]
    }
}
