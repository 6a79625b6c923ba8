use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use crate::utils::hash::sha256_hex;

/// A type-safe wrapper around a directory's storage key.
///
/// Keys are the lowercase hex encoding of a SHA-256 digest, so they are always
/// 64 characters long.
//
// // 目录存储键的类型安全包装器：SHA-256 摘要的小写十六进制编码（64 个字符）。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DirectoryKey(String);

/// Errors that can occur while parsing a `DirectoryKey` string.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("Invalid key length: expected 64, got {0}")]
    InvalidLength(usize),
    #[error("Invalid character '{0}' in key: expected lowercase hex")]
    InvalidCharacter(char),
}

impl DirectoryKey {
    /// Length of the hex encoded key.
    pub const HEX_LEN: usize = 64;

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_digest_hex(hex: String) -> Self {
        debug_assert_eq!(hex.len(), Self::HEX_LEN, "SHA-256 hex should be 64 chars");
        Self(hex)
    }
}

/// Computes the storage key of a directory from who created it, when, and its name.
///
/// The key is `hex(sha256(actor_id ‖ timestamp ‖ name))` with the timestamp written in
/// decimal. Identical inputs always give the same key, so two directories created with
/// the same name by the same actor within one second map to the same record.
pub fn derive_key(actor_id: &str, timestamp: i64, name: &str) -> DirectoryKey {
    DirectoryKey::from_digest_hex(sha256_hex(format!("{actor_id}{timestamp}{name}").as_bytes()))
}

/// Like [`derive_key`] but mixes a nonce into the digest. Nonce 0 yields exactly
/// `derive_key(actor_id, timestamp, name)`.
pub fn derive_key_with_nonce(actor_id: &str, timestamp: i64, name: &str, nonce: u64) -> DirectoryKey {
    if nonce == 0 {
        return derive_key(actor_id, timestamp, name);
    }
    DirectoryKey::from_digest_hex(sha256_hex(
        format!("{actor_id}{timestamp}{name}#{nonce}").as_bytes(),
    ))
}

/// How new directory keys are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStrategy {
    /// Skip keys that already exist in the ledger or were handed out earlier in the
    /// same operation, by bumping a nonce.
    #[default]
    Disambiguated,
    /// Always use [`derive_key`]. Colliding inputs overwrite each other.
    Legacy,
}

/// Hands out fresh directory keys for the duration of one operation.
///
/// The allocator remembers every key it returned, so a multi-node operation (profile
/// initiation, subtree copy) never hands out the same key twice even before the
/// records reach the ledger.
#[derive(Debug, Default)]
pub struct KeyAllocator {
    strategy: KeyStrategy,
    reserved: HashSet<DirectoryKey>,
}

impl KeyAllocator {
    pub fn new(strategy: KeyStrategy) -> Self {
        Self {
            strategy,
            reserved: HashSet::new(),
        }
    }

    /// Returns the key for a new directory named `name`.
    ///
    /// `exists` reports whether a key is already taken in the backing store.
    pub fn allocate<E>(
        &mut self,
        actor_id: &str,
        timestamp: i64,
        name: &str,
        mut exists: impl FnMut(&DirectoryKey) -> Result<bool, E>,
    ) -> Result<DirectoryKey, E> {
        if self.strategy == KeyStrategy::Legacy {
            let key = derive_key(actor_id, timestamp, name);
            self.reserved.insert(key.clone());
            return Ok(key);
        }

        let mut nonce = 0u64;
        loop {
            let key = derive_key_with_nonce(actor_id, timestamp, name, nonce);
            if !self.reserved.contains(&key) && !exists(&key)? {
                self.reserved.insert(key.clone());
                return Ok(key);
            }
            nonce += 1;
        }
    }
}

// --- 核心 Trait 实现 ---

impl fmt::Display for DirectoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DirectoryKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for DirectoryKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != Self::HEX_LEN {
            return Err(KeyParseError::InvalidLength(s.len()));
        }
        if let Some(c) = s.chars().find(|c| !matches!(c, '0'..='9' | 'a'..='f')) {
            return Err(KeyParseError::InvalidCharacter(c));
        }
        Ok(Self(s.to_string()))
    }
}

// --- Serde (JSON) 序列化/反序列化 ---

impl Serialize for DirectoryKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DirectoryKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DirectoryKeyVisitor;

        impl<'de> serde::de::Visitor<'de> for DirectoryKeyVisitor {
            type Value = DirectoryKey;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a 64-character lowercase hex key")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                DirectoryKey::from_str(value).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(DirectoryKeyVisitor)
    }
}
