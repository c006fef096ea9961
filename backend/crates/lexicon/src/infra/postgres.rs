//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{DailyTipId, DictionaryEntryId};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::domain::entities::{DailyTip, DailyWord, DictionaryEntry, LexiconSeed, NewDailyWord};
use crate::domain::repository::{
    DailyTipRepository, DailyWordRepository, DictionaryRepository, SeedRepository,
};
use crate::domain::value_objects::Difficulty;
use crate::error::{LexiconError, LexiconResult};

/// PostgreSQL-backed lexicon repository
#[derive(Clone)]
pub struct PgLexiconRepository {
    pool: PgPool,
}

impl PgLexiconRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl DictionaryRepository for PgLexiconRepository {
    async fn list_entries(&self) -> LexiconResult<Vec<DictionaryEntry>> {
        let rows = sqlx::query_as::<_, DictionaryRow>(
            r#"
            SELECT
                dictionary_id,
                word,
                definition,
                part_of_speech,
                pronunciation,
                example_sentence,
                difficulty_level
            FROM dictionary
            ORDER BY word
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(DictionaryRow::into_entry).collect()
    }

    async fn insert_entry(&self, entry: &DictionaryEntry) -> LexiconResult<()> {
        let mut conn = self.pool.acquire().await?;
        insert_entry_row(&mut *conn, entry).await
    }
}

impl DailyWordRepository for PgLexiconRepository {
    async fn latest_words(&self, limit: usize) -> LexiconResult<Vec<DailyWord>> {
        let limit = i64::try_from(limit)
            .map_err(|_| LexiconError::Internal(format!("daily word limit too large: {limit}")))?;

        let rows = sqlx::query_as::<_, DailyWordRow>(
            r#"
            SELECT
                daily_word_id,
                word,
                definition,
                challenges,
                dictionary_id,
                created_at
            FROM daily_words
            ORDER BY created_at DESC, daily_word_id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DailyWordRow::into_daily_word).collect())
    }

    async fn insert_word(&self, word: &NewDailyWord) -> LexiconResult<DailyWord> {
        let mut conn = self.pool.acquire().await?;
        let stored = insert_word_row(&mut *conn, word).await?;

        tracing::info!(daily_word_id = stored.id, word = %stored.word, "Daily word published");

        Ok(stored)
    }
}

impl DailyTipRepository for PgLexiconRepository {
    async fn active_tips(&self) -> LexiconResult<Vec<DailyTip>> {
        let rows = sqlx::query_as::<_, DailyTipRow>(
            r#"
            SELECT
                daily_tip_id,
                tip_text,
                tip_type,
                category,
                is_active
            FROM daily_tips
            WHERE is_active
            ORDER BY created_at, daily_tip_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(DailyTipRow::into_tip).collect()
    }
}

impl SeedRepository for PgLexiconRepository {
    async fn has_content(&self) -> LexiconResult<bool> {
        let has_content = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (SELECT 1 FROM dictionary)
                OR EXISTS (SELECT 1 FROM daily_words)
                OR EXISTS (SELECT 1 FROM daily_tips)
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(has_content)
    }

    async fn insert_seed(&self, seed: &LexiconSeed) -> LexiconResult<()> {
        let mut tx = self.pool.begin().await?;

        for entry in &seed.entries {
            insert_entry_row(&mut *tx, entry).await?;
        }
        for word in &seed.words {
            insert_word_row(&mut *tx, word).await?;
        }
        for tip in &seed.tips {
            insert_tip_row(&mut *tx, tip).await?;
        }

        tx.commit().await?;

        tracing::info!(rows = seed.row_count(), "Lexicon seed committed");

        Ok(())
    }
}

async fn insert_entry_row(conn: &mut PgConnection, entry: &DictionaryEntry) -> LexiconResult<()> {
    sqlx::query(
        r#"
        INSERT INTO dictionary (
            dictionary_id,
            word,
            definition,
            part_of_speech,
            pronunciation,
            example_sentence,
            difficulty_level
        ) VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(entry.id.as_uuid())
    .bind(&entry.word)
    .bind(&entry.definition)
    .bind(&entry.part_of_speech)
    .bind(&entry.pronunciation)
    .bind(&entry.example_sentence)
    .bind(i16::from(entry.difficulty.level()))
    .execute(&mut *conn)
    .await?;

    Ok(())
}

async fn insert_word_row(conn: &mut PgConnection, word: &NewDailyWord) -> LexiconResult<DailyWord> {
    let row = sqlx::query_as::<_, DailyWordRow>(
        r#"
        INSERT INTO daily_words (word, definition, challenges, dictionary_id)
        VALUES ($1, $2, $3, $4)
        RETURNING
            daily_word_id,
            word,
            definition,
            challenges,
            dictionary_id,
            created_at
        "#,
    )
    .bind(&word.word)
    .bind(&word.definition)
    .bind(&word.challenges)
    .bind(word.dictionary_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(row.into_daily_word())
}

async fn insert_tip_row(conn: &mut PgConnection, tip: &DailyTip) -> LexiconResult<()> {
    sqlx::query(
        r#"
        INSERT INTO daily_tips (
            daily_tip_id,
            tip_text,
            tip_type,
            category,
            is_active
        ) VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(tip.id.as_uuid())
    .bind(&tip.tip_text)
    .bind(tip.tip_type.as_str())
    .bind(&tip.category)
    .bind(tip.is_active)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

// Internal row types for sqlx mapping
#[derive(sqlx::FromRow)]
struct DictionaryRow {
    dictionary_id: Uuid,
    word: String,
    definition: String,
    part_of_speech: String,
    pronunciation: String,
    example_sentence: String,
    difficulty_level: i16,
}

impl DictionaryRow {
    fn into_entry(self) -> LexiconResult<DictionaryEntry> {
        Ok(DictionaryEntry {
            id: DictionaryEntryId::from_uuid(self.dictionary_id),
            word: self.word,
            definition: self.definition,
            part_of_speech: self.part_of_speech,
            pronunciation: self.pronunciation,
            example_sentence: self.example_sentence,
            difficulty: Difficulty::parse(i32::from(self.difficulty_level))?,
        })
    }
}

#[derive(sqlx::FromRow)]
struct DailyWordRow {
    daily_word_id: i64,
    word: String,
    definition: String,
    challenges: Vec<String>,
    dictionary_id: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl DailyWordRow {
    fn into_daily_word(self) -> DailyWord {
        DailyWord {
            id: self.daily_word_id,
            word: self.word,
            definition: self.definition,
            challenges: self.challenges,
            dictionary_id: self.dictionary_id,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct DailyTipRow {
    daily_tip_id: Uuid,
    tip_text: String,
    tip_type: String,
    category: String,
    is_active: bool,
}

impl DailyTipRow {
    fn into_tip(self) -> LexiconResult<DailyTip> {
        Ok(DailyTip {
            id: DailyTipId::from_uuid(self.daily_tip_id),
            tip_text: self.tip_text,
            tip_type: self.tip_type.parse()?,
            category: self.category,
            is_active: self.is_active,
        })
    }
}
