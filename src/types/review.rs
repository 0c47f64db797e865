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

use rusqlite::ToSql;
use rusqlite::types::FromSql;
use rusqlite::types::FromSqlError;
use rusqlite::types::FromSqlResult;
use rusqlite::types::ToSqlOutput;
use rusqlite::types::ValueRef;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::fail;
use crate::types::rating::Rating;
use crate::types::timestamp::Timestamp;
use crate::types::topic_id::TopicId;

/// One entry in a topic's review history.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewLog {
    pub topic_id: TopicId,
    pub reviewed_at: Timestamp,
    pub rating: Rating,
    pub kind: ReviewKind,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ReviewKind {
    /// The first read of a topic. The rating is how well it was understood.
    FirstRead,
    Review,
}

impl ReviewKind {
    fn as_str(&self) -> &str {
        match self {
            ReviewKind::FirstRead => "first_read",
            ReviewKind::Review => "review",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReviewKind::FirstRead => "First read",
            ReviewKind::Review => "Review",
        }
    }
}

impl ReviewLog {
    /// The rating as shown to the user: understanding levels for the first
    /// read, rating names afterwards.
    pub fn rating_label(&self) -> &'static str {
        match self.kind {
            ReviewKind::FirstRead => self.rating.understanding(),
            ReviewKind::Review => self.rating.as_str(),
        }
    }
}

impl TryFrom<String> for ReviewKind {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "first_read" => Ok(ReviewKind::FirstRead),
            "review" => Ok(ReviewKind::Review),
            _ => fail(format!("Invalid review kind: {}", value)),
        }
    }
}

impl ToSql for ReviewKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ReviewKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let string: String = FromSql::column_result(value)?;
        ReviewKind::try_from(string).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}
