//! Domain Entities

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{DailyTipId, DictionaryEntryId};
use progress::models::ChallengeKey;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::value_objects::{Difficulty, TipType};
use crate::error::{LexiconError, LexiconResult};

/// Word in the browsable dictionary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
    #[serde(serialize_with = "serialize_id")]
    pub id: DictionaryEntryId,
    pub word: String,
    pub definition: String,
    pub part_of_speech: String,
    pub pronunciation: String,
    pub example_sentence: String,
    pub difficulty: Difficulty,
}

impl DictionaryEntry {
    pub fn new(
        word: impl Into<String>,
        definition: impl Into<String>,
        difficulty: Difficulty,
    ) -> LexiconResult<Self> {
        Ok(Self {
            id: DictionaryEntryId::new(),
            word: required(word.into(), "word")?,
            definition: required(definition.into(), "definition")?,
            part_of_speech: String::new(),
            pronunciation: String::new(),
            example_sentence: String::new(),
            difficulty,
        })
    }

    pub fn with_details(
        mut self,
        part_of_speech: impl Into<String>,
        pronunciation: impl Into<String>,
        example_sentence: impl Into<String>,
    ) -> Self {
        self.part_of_speech = part_of_speech.into();
        self.pronunciation = pronunciation.into();
        self.example_sentence = example_sentence.into();
        self
    }
}

/// Featured word of the day with its real-world challenges
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyWord {
    pub id: i64,
    pub word: String,
    pub definition: String,
    pub challenges: Vec<String>,
    pub dictionary_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl DailyWord {
    /// Key under which challenge `index` of this word is completed on `day`
    pub fn challenge_key(&self, day: NaiveDate, index: usize) -> ChallengeKey {
        ChallengeKey::for_day(day, self.id, index)
    }
}

/// Daily word before the store assigns its id
#[derive(Debug, Clone)]
pub struct NewDailyWord {
    pub word: String,
    pub definition: String,
    pub challenges: Vec<String>,
    pub dictionary_id: Option<Uuid>,
}

impl NewDailyWord {
    pub fn new(
        word: impl Into<String>,
        definition: impl Into<String>,
        challenges: Vec<String>,
    ) -> LexiconResult<Self> {
        let challenges: Vec<String> = challenges
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        if challenges.is_empty() {
            return Err(LexiconError::MissingField("challenges"));
        }

        Ok(Self {
            word: required(word.into(), "word")?,
            definition: required(definition.into(), "definition")?,
            challenges,
            dictionary_id: None,
        })
    }
}

/// Short learning tip shown with the daily words
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTip {
    #[serde(serialize_with = "serialize_id")]
    pub id: DailyTipId,
    pub tip_text: String,
    pub tip_type: TipType,
    pub category: String,
    pub is_active: bool,
}

impl DailyTip {
    pub fn new(
        tip_text: impl Into<String>,
        tip_type: TipType,
        category: impl Into<String>,
    ) -> LexiconResult<Self> {
        Ok(Self {
            id: DailyTipId::new(),
            tip_text: required(tip_text.into(), "tip_text")?,
            tip_type,
            category: category.into(),
            is_active: true,
        })
    }
}

/// Starter content that is written as one unit
#[derive(Debug, Clone, Default)]
pub struct LexiconSeed {
    pub entries: Vec<DictionaryEntry>,
    /// Daily words, usually linked to `entries` through `dictionary_id`
    pub words: Vec<NewDailyWord>,
    pub tips: Vec<DailyTip>,
}

impl LexiconSeed {
    pub fn row_count(&self) -> usize {
        self.entries.len() + self.words.len() + self.tips.len()
    }
}

fn required(value: String, field: &'static str) -> LexiconResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LexiconError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn serialize_id<T, S>(id: &kernel::id::Id<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_requires_word_and_definition() {
        let difficulty = Difficulty::new(2).unwrap();
        assert!(DictionaryEntry::new("  ", "x", difficulty).is_err());
        assert!(DictionaryEntry::new("word", "", difficulty).is_err());

        let entry = DictionaryEntry::new(" Serendipity ", "Happy chance", difficulty).unwrap();
        assert_eq!(entry.word, "Serendipity");
    }

    #[test]
    fn test_new_daily_word_drops_blank_challenges() {
        let word = NewDailyWord::new(
            "Ephemeral",
            "Lasting for a very short time",
            vec!["Photograph morning dew".to_string(), "  ".to_string()],
        )
        .unwrap();
        assert_eq!(word.challenges.len(), 1);

        let err = NewDailyWord::new("Ephemeral", "Short", vec![String::new()]).unwrap_err();
        assert!(matches!(err, LexiconError::MissingField("challenges")));
    }

    #[test]
    fn test_daily_word_challenge_key() {
        let word = DailyWord {
            id: 3,
            word: "Ubiquitous".to_string(),
            definition: "Found everywhere".to_string(),
            challenges: vec!["a".to_string(), "b".to_string()],
            dictionary_id: None,
            created_at: Utc::now(),
        };
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(word.challenge_key(day, 1).as_str(), "2024-05-01-word3-1");
    }

    #[test]
    fn test_entry_serializes_id_as_string() {
        let entry = DictionaryEntry::new("Atom", "Smallest unit", Difficulty::new(1).unwrap())
            .unwrap();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], entry.id.to_string());
        assert_eq!(json["difficulty"], 1);
        assert_eq!(json["partOfSpeech"], "");
    }
}
