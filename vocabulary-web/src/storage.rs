use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{
    migrate::MigrateDatabase, query, query_as, sqlite::SqlitePoolOptions, FromRow, Pool, Sqlite,
    SqlitePool,
};

const WORD_COLUMNS: &str = "id, word, phonetic, audio_url, raw_data";
const VOCABULARY_COLUMNS: &str = "id, word_id, added_date, note";

/// A cached dictionary lookup.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WordEntry {
    pub id: i64,
    pub word: String,
    pub phonetic: Option<String>,
    pub audio_url: Option<String>,
    /// The dictionary API's first result entry, serialized as JSON.
    pub raw_data: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewWord<'a> {
    pub word: &'a str,
    pub phonetic: Option<&'a str>,
    pub audio_url: Option<&'a str>,
    pub raw_data: Option<&'a str>,
}

/// A word the user saved, with their note.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VocabularyEntry {
    pub id: i64,
    pub word_id: i64,
    pub added_date: DateTime<Utc>,
    pub note: String,
}

/// A vocabulary row together with the word it points at, if that word still exists.
#[derive(Debug, Clone, Serialize)]
pub struct VocabularyItem {
    #[serde(flatten)]
    pub entry: VocabularyEntry,
    pub word: Option<WordEntry>,
}

#[derive(Debug)]
pub enum VocabularyAdd {
    Added(VocabularyEntry),
    AlreadyPresent,
}

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    /// Opens (creating it if needed) the database at `url` and brings its schema up to date.
    pub async fn initialize(url: &str) -> sqlx::Result<Self> {
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?;
        }
        let pool = SqlitePool::connect(url).await?;
        sqlx::migrate!().run(&pool).await?;
        Ok(Self { pool })
    }

    /// A private, empty database that lives as long as the returned store.
    pub async fn in_memory() -> sqlx::Result<Self> {
        // Every connection to `:memory:` gets its own database, so keep exactly one alive.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        sqlx::migrate!().run(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn ping(&self) -> sqlx::Result<()> {
        query("SELECT 1").execute(&self.pool).await.map(|_| ())
    }
}

impl Storage {
    /// Words whose text contains `needle`, compared case-sensitively.
    pub async fn find_words_containing(&self, needle: &str) -> sqlx::Result<Vec<WordEntry>> {
        query_as(&format!(
            "SELECT {WORD_COLUMNS} FROM words WHERE instr(word, ?) > 0 ORDER BY id"
        ))
        .bind(needle)
        .fetch_all(&self.pool)
        .await
    }

    /// Inserts a word inside a transaction; nothing is kept if any step fails.
    pub async fn insert_word(&self, word: &NewWord<'_>) -> sqlx::Result<WordEntry> {
        let mut tx = self.pool.begin().await?;
        let entry = query_as(&format!(
            "INSERT INTO words(word, phonetic, audio_url, raw_data) VALUES(?, ?, ?, ?) RETURNING {WORD_COLUMNS}"
        ))
        .bind(word.word)
        .bind(word.phonetic)
        .bind(word.audio_url)
        .bind(word.raw_data)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(entry)
    }

    pub async fn get_word(&self, id: i64) -> sqlx::Result<Option<WordEntry>> {
        query_as(&format!("SELECT {WORD_COLUMNS} FROM words WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn get_words_by_ids(&self, ids: &[i64]) -> sqlx::Result<Vec<WordEntry>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!("SELECT {WORD_COLUMNS} FROM words WHERE id IN ({placeholders})");
        let mut words = query_as::<_, WordEntry>(&sql);
        for id in ids {
            words = words.bind(*id);
        }
        words.fetch_all(&self.pool).await
    }
}

impl Storage {
    pub async fn find_vocabulary_by_word(
        &self,
        word_id: i64,
    ) -> sqlx::Result<Option<VocabularyEntry>> {
        query_as(&format!(
            "SELECT {VOCABULARY_COLUMNS} FROM vocabulary WHERE word_id = ? LIMIT 1"
        ))
        .bind(word_id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn get_vocabulary(&self, id: i64) -> sqlx::Result<Option<VocabularyEntry>> {
        query_as(&format!(
            "SELECT {VOCABULARY_COLUMNS} FROM vocabulary WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Saves a word to the vocabulary unless it is already there.
    pub async fn add_vocabulary(&self, word_id: i64, note: &str) -> sqlx::Result<VocabularyAdd> {
        if self.find_vocabulary_by_word(word_id).await?.is_some() {
            return Ok(VocabularyAdd::AlreadyPresent);
        }
        let inserted = query_as::<_, VocabularyEntry>(&format!(
            "INSERT INTO vocabulary(word_id, added_date, note) VALUES(?, ?, ?) RETURNING {VOCABULARY_COLUMNS}"
        ))
        .bind(word_id)
        .bind(Utc::now())
        .bind(note)
        .fetch_one(&self.pool)
        .await;
        match inserted {
            Ok(entry) => Ok(VocabularyAdd::Added(entry)),
            // Lost a race against a concurrent add of the same word.
            Err(sqlx::Error::Database(error)) if error.is_unique_violation() => {
                Ok(VocabularyAdd::AlreadyPresent)
            }
            Err(error) => Err(error),
        }
    }

    /// All saved words, most recently added first.
    pub async fn list_vocabulary(&self) -> sqlx::Result<Vec<VocabularyItem>> {
        let entries: Vec<VocabularyEntry> = query_as(&format!(
            "SELECT {VOCABULARY_COLUMNS} FROM vocabulary ORDER BY added_date DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        let mut word_ids = entries.iter().map(|entry| entry.word_id).collect::<Vec<i64>>();
        word_ids.sort_unstable();
        word_ids.dedup();
        let mut words = self
            .get_words_by_ids(&word_ids)
            .await?
            .into_iter()
            .map(|word| (word.id, word))
            .collect::<HashMap<i64, WordEntry>>();

        Ok(entries
            .into_iter()
            .map(|entry| {
                // word_id is unique per row, so each word is handed out at most once
                let word = words.remove(&entry.word_id);
                VocabularyItem { entry, word }
            })
            .collect())
    }

    /// Attempt to remove a vocabulary entry, returns true if it was removed
    pub async fn remove_vocabulary(&self, id: i64) -> sqlx::Result<bool> {
        let result = query("DELETE FROM vocabulary WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Overwrites the note, returns if the entry was modified or not
    pub async fn update_vocabulary_note(&self, id: i64, note: &str) -> sqlx::Result<bool> {
        let result = query("UPDATE vocabulary SET note = ? WHERE id = ?")
            .bind(note)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
