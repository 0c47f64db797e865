// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;

use rusqlite::ToSql;
use rusqlite::types::FromSql;
use rusqlite::types::FromSqlError;
use rusqlite::types::FromSqlResult;
use rusqlite::types::ToSqlOutput;
use rusqlite::types::ValueRef;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;

const ID_BYTES: usize = 8;

/// Identifies a topic: the leading bytes of the hash of its file path and
/// title, hex-encoded.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TopicId {
    inner: [u8; ID_BYTES],
}

impl TopicId {
    pub fn derive(file: &str, title: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(file.as_bytes());
        hasher.update(b":");
        hasher.update(title.as_bytes());
        let hash = hasher.finalize();
        let mut inner = [0u8; ID_BYTES];
        inner.copy_from_slice(&hash.as_bytes()[..ID_BYTES]);
        Self { inner }
    }

    pub fn to_hex(self) -> String {
        self.inner.iter().map(|b| format!("{b:02x}")).collect()
    }

    pub fn from_hex(s: &str) -> Fallible<Self> {
        let invalid = || ErrorReport::new(format!("invalid topic id in database: {s}"));
        if s.len() != ID_BYTES * 2 || !s.is_ascii() {
            return Err(invalid());
        }
        let mut inner = [0u8; ID_BYTES];
        for (i, byte) in inner.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
        }
        Ok(Self { inner })
    }
}

impl ToSql for TopicId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_hex()))
    }
}

impl FromSql for TopicId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let string: String = FromSql::column_result(value)?;
        TopicId::from_hex(&string).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

impl Display for TopicId {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for TopicId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_is_deterministic() {
        let a = TopicId::derive("k8s/pods.md", "pods");
        let b = TopicId::derive("k8s/pods.md", "pods");
        assert_eq!(a, b);
        assert_eq!(a.to_hex().len(), 16);
    }

    #[test]
    fn test_derive_depends_on_file_and_title() {
        let a = TopicId::derive("a.md", "a");
        assert_ne!(a, TopicId::derive("b.md", "a"));
        assert_ne!(a, TopicId::derive("a.md", "b"));
    }

    #[test]
    fn test_hex_round_trip() -> Fallible<()> {
        let id = TopicId::derive("notes/docker.md", "Docker Networking");
        let parsed = TopicId::from_hex(&id.to_hex())?;
        assert_eq!(id, parsed);
        Ok(())
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(TopicId::from_hex("").is_err());
        assert!(TopicId::from_hex("zzzzzzzzzzzzzzzz").is_err());
        assert!(TopicId::from_hex("0123456789abcdef00").is_err());
    }
}
