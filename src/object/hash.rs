use super::{EvalError, Object};
use fnv::FnvHasher;
use indexmap::IndexMap;
use std::convert::TryFrom;
use std::fmt::{self, Display, Formatter};
use std::hash::Hasher;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashKind {
    Integer,
    Boolean,
    String,
}

/// The hashable projection of an `Integer`, `Boolean` or `String` object.
///
/// Strings are keyed by the 64-bit FNV-1a hash of their bytes, so two
/// distinct strings with colliding hashes share a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    pub kind: HashKind,
    pub value: u64,
}

impl From<i64> for HashKey {
    fn from(n: i64) -> Self {
        Self {
            kind: HashKind::Integer,
            value: n as u64,
        }
    }
}

impl From<bool> for HashKey {
    fn from(b: bool) -> Self {
        Self {
            kind: HashKind::Boolean,
            value: b as u64,
        }
    }
}

impl From<&str> for HashKey {
    fn from(s: &str) -> Self {
        let mut hasher = FnvHasher::default();
        hasher.write(s.as_bytes());
        Self {
            kind: HashKind::String,
            value: hasher.finish(),
        }
    }
}

impl TryFrom<&Object> for HashKey {
    type Error = EvalError;

    fn try_from(obj: &Object) -> std::result::Result<Self, Self::Error> {
        match obj {
            Object::String(s) => Ok(s.as_str().into()),
            Object::Integer(n) => Ok((*n).into()),
            Object::Boolean(b) => Ok((*b).into()),
            o => Err(EvalError::NotHashable {
                type_name: o.type_name(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: Object,
    pub value: Object,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HashValue {
    pub pairs: IndexMap<HashKey, HashPair>,
}

impl HashValue {
    /// Inserts `value` under `key`, replacing any earlier pair with the same key.
    pub fn insert(&mut self, key: Object, value: Object) -> std::result::Result<(), EvalError> {
        let hash_key = HashKey::try_from(&key)?;
        self.pairs.insert(hash_key, HashPair { key, value });
        Ok(())
    }

    pub fn get(&self, key: &Object) -> std::result::Result<Option<&Object>, EvalError> {
        let hash_key = HashKey::try_from(key)?;
        Ok(self.pairs.get(&hash_key).map(|pair| &pair.value))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Display for HashValue {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let pair_names: Vec<String> = self
            .pairs
            .values()
            .map(|pair| format!("{}: {}", pair.key, pair.value))
            .collect();

        write!(f, "{{{}}}", pair_names.join(", "))
    }
}
