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

use std::collections::BTreeMap;
use std::fs::create_dir_all;
use std::path::Path;

use rusqlite::Connection;
use rusqlite::Row;
use rusqlite::Transaction;
use rusqlite::config::DbConfig;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Card;
use crate::types::review::ReviewLog;
use crate::types::timestamp::Timestamp;
use crate::types::topic::Topic;
use crate::types::topic_id::TopicId;

/// The directory, inside the wiki, where recall keeps its data.
pub const DATA_DIR: &str = ".srs";

pub const DB_FILE: &str = "recall.db";

const TOPIC_COLUMNS: &str = "topic_id, title, file, created_at, due, stability, difficulty, reps, lapses, state, last_review";

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let mut conn = Connection::open(database_path)?;
        conn.set_db_config(DbConfig::SQLITE_DBCONFIG_ENABLE_FKEY, true)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                log::debug!("Creating schema in {database_path}.");
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        Ok(Self { conn })
    }

    /// Open the database that lives inside a wiki, creating it if needed.
    pub fn open_wiki(wiki: &Path) -> Fallible<Self> {
        let dir = wiki.join(DATA_DIR);
        create_dir_all(&dir)?;
        let db_path = dir.join(DB_FILE);
        let db_path: &str = db_path
            .to_str()
            .ok_or_else(|| ErrorReport::new("invalid path"))?;
        Self::new(db_path)
    }

    /// Start tracking a topic. If a topic with the same ID is already
    /// tracked, it is returned unchanged.
    pub fn add_topic(
        &mut self,
        title: &str,
        file: &str,
        tags: &[String],
        now: Timestamp,
    ) -> Fallible<Topic> {
        let topic = Topic::new(title.to_string(), file.to_string(), tags.to_vec(), now);
        if let Some(existing) = self.get_topic(topic.id)? {
            return Ok(existing);
        }
        log::debug!("Adding topic {} ({title}).", topic.id);
        let tx = self.conn.transaction()?;
        insert_topic(&tx, &topic)?;
        replace_tags(&tx, topic.id, &topic.tags)?;
        tx.commit()?;
        Ok(topic)
    }

    pub fn get_topic(&self, id: TopicId) -> Fallible<Option<Topic>> {
        let sql = format!("select {TOPIC_COLUMNS} from topics where topic_id = ?;");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => {
                let mut topic = topic_from_row(row)?;
                topic.tags = self.tags_of(topic.id)?;
                Ok(Some(topic))
            }
            None => Ok(None),
        }
    }

    pub fn get_topic_by_title(&self, title: &str) -> Fallible<Option<Topic>> {
        let sql =
            format!("select {TOPIC_COLUMNS} from topics where title = ? order by rowid limit 1;");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([title])?;
        match rows.next()? {
            Some(row) => {
                let mut topic = topic_from_row(row)?;
                topic.tags = self.tags_of(topic.id)?;
                Ok(Some(topic))
            }
            None => Ok(None),
        }
    }

    /// Like [`Database::get_topic_by_title`], but a missing topic is an
    /// error.
    pub fn require_topic(&self, title: &str) -> Fallible<Topic> {
        match self.get_topic_by_title(title)? {
            Some(topic) => Ok(topic),
            None => fail(format!("topic not found: {title}")),
        }
    }

    /// All tracked topics, in the order they were added.
    pub fn all_topics(&self) -> Fallible<Vec<Topic>> {
        let sql = format!("select {TOPIC_COLUMNS} from topics order by rowid;");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut topics = Vec::new();
        while let Some(row) = rows.next()? {
            topics.push(topic_from_row(row)?);
        }
        let mut tags = self.all_tags()?;
        for topic in topics.iter_mut() {
            topic.tags = tags.remove(&topic.id).unwrap_or_default();
        }
        Ok(topics)
    }

    /// Topics whose due date is at or before `until`.
    pub fn due_topics(&self, until: Timestamp) -> Fallible<Vec<Topic>> {
        let topics = self.all_topics()?;
        Ok(topics
            .into_iter()
            .filter(|t| t.card.is_due_by(until))
            .collect())
    }

    pub fn set_tags(&mut self, id: TopicId, tags: &[String]) -> Fallible<()> {
        let tx = self.conn.transaction()?;
        replace_tags(&tx, id, tags)?;
        tx.commit()?;
        Ok(())
    }

    /// Record that a topic's note now lives at `file`. The ID is kept, so
    /// the card and its history follow the note.
    pub fn set_file(&mut self, id: TopicId, file: &str) -> Fallible<()> {
        let updated = self
            .conn
            .execute("update topics set file = ? where topic_id = ?;", (file, id))?;
        if updated == 0 {
            return fail(format!("no topic with ID {id}"));
        }
        Ok(())
    }

    /// Persist a reviewed card and its log entry together.
    pub fn record_review(&mut self, card: &Card, log: &ReviewLog) -> Fallible<()> {
        let tx = self.conn.transaction()?;
        let updated = update_card(&tx, log.topic_id, card)?;
        if updated == 0 {
            return fail(format!("no topic with ID {}", log.topic_id));
        }
        insert_review(&tx, log)?;
        tx.commit()?;
        Ok(())
    }

    /// Stop tracking a topic. Its tags and review history go with it.
    pub fn remove_topic(&mut self, id: TopicId) -> Fallible<()> {
        let tx = self.conn.transaction()?;
        let deleted = tx.execute("delete from topics where topic_id = ?;", [id])?;
        if deleted == 0 {
            return fail(format!("no topic with ID {id}"));
        }
        tx.commit()?;
        Ok(())
    }

    /// A topic's review history, oldest first.
    pub fn review_history(&self, id: TopicId) -> Fallible<Vec<ReviewLog>> {
        let sql = "select topic_id, reviewed_at, rating, kind from reviews where topic_id = ? order by reviewed_at, review_id;";
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([id])?;
        let mut logs = Vec::new();
        while let Some(row) = rows.next()? {
            logs.push(review_from_row(row)?);
        }
        Ok(logs)
    }

    pub fn all_reviews(&self) -> Fallible<Vec<ReviewLog>> {
        let sql = "select topic_id, reviewed_at, rating, kind from reviews order by reviewed_at, review_id;";
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut logs = Vec::new();
        while let Some(row) = rows.next()? {
            logs.push(review_from_row(row)?);
        }
        Ok(logs)
    }

    /// Every tag, with the number of topics that carry it.
    pub fn tag_counts(&self) -> Fallible<BTreeMap<String, usize>> {
        let sql = "select tag, count(distinct topic_id) from topic_tags group by tag order by tag;";
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut counts = BTreeMap::new();
        while let Some(row) = rows.next()? {
            let tag: String = row.get(0)?;
            let count: i64 = row.get(1)?;
            counts.insert(tag, usize::try_from(count).unwrap_or(0));
        }
        Ok(counts)
    }

    fn tags_of(&self, id: TopicId) -> Fallible<Vec<String>> {
        let sql = "select tag from topic_tags where topic_id = ? order by position;";
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([id])?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            tags.push(row.get(0)?);
        }
        Ok(tags)
    }

    fn all_tags(&self) -> Fallible<BTreeMap<TopicId, Vec<String>>> {
        let sql = "select topic_id, tag from topic_tags order by topic_id, position;";
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut tags: BTreeMap<TopicId, Vec<String>> = BTreeMap::new();
        while let Some(row) = rows.next()? {
            let id: TopicId = row.get(0)?;
            let tag: String = row.get(1)?;
            tags.entry(id).or_default().push(tag);
        }
        Ok(tags)
    }
}

fn topic_from_row(row: &Row) -> Fallible<Topic> {
    Ok(Topic {
        id: row.get(0)?,
        title: row.get(1)?,
        file: row.get(2)?,
        created: row.get(3)?,
        card: Card {
            due: row.get(4)?,
            stability: row.get(5)?,
            difficulty: row.get(6)?,
            reps: row.get(7)?,
            lapses: row.get(8)?,
            state: row.get(9)?,
            last_review: row.get(10)?,
        },
        tags: Vec::new(),
    })
}

fn review_from_row(row: &Row) -> Fallible<ReviewLog> {
    Ok(ReviewLog {
        topic_id: row.get(0)?,
        reviewed_at: row.get(1)?,
        rating: row.get(2)?,
        kind: row.get(3)?,
    })
}

fn insert_topic(tx: &Transaction, topic: &Topic) -> Fallible<()> {
    let sql =
        format!("insert into topics ({TOPIC_COLUMNS}) values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?);");
    let card = &topic.card;
    tx.execute(
        &sql,
        (
            topic.id,
            &topic.title,
            &topic.file,
            topic.created,
            card.due,
            card.stability,
            card.difficulty,
            card.reps,
            card.lapses,
            card.state,
            card.last_review,
        ),
    )?;
    Ok(())
}

fn update_card(tx: &Transaction, id: TopicId, card: &Card) -> Fallible<usize> {
    let sql = "update topics set due = ?, stability = ?, difficulty = ?, reps = ?, lapses = ?, state = ?, last_review = ? where topic_id = ?;";
    let updated = tx.execute(
        sql,
        (
            card.due,
            card.stability,
            card.difficulty,
            card.reps,
            card.lapses,
            card.state,
            card.last_review,
            id,
        ),
    )?;
    Ok(updated)
}

fn replace_tags(tx: &Transaction, id: TopicId, tags: &[String]) -> Fallible<()> {
    tx.execute("delete from topic_tags where topic_id = ?;", [id])?;
    let sql = "insert into topic_tags (topic_id, position, tag) values (?, ?, ?);";
    for (position, tag) in tags.iter().enumerate() {
        tx.execute(sql, (id, position as i64, tag))?;
    }
    Ok(())
}

fn insert_review(tx: &Transaction, log: &ReviewLog) -> Fallible<()> {
    let sql = "insert into reviews (topic_id, reviewed_at, rating, kind) values (?, ?, ?, ?);";
    tx.execute(sql, (log.topic_id, log.reviewed_at, log.rating, log.kind))?;
    Ok(())
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["topics"], |row| row.get(0))?;
    Ok(count > 0)
}
