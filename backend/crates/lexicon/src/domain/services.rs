//! Domain Services
//!
//! Pure selection logic over already loaded lexicon data.

use chrono::{Datelike, NaiveDate};

use crate::domain::entities::{DailyTip, DictionaryEntry};
use crate::domain::value_objects::Difficulty;

/// Dictionary search criteria
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryFilter {
    /// Case-insensitive substring of the word or its definition
    pub term: Option<String>,
    pub difficulty: Option<Difficulty>,
}

impl DictionaryFilter {
    pub fn new(term: Option<String>, difficulty: Option<Difficulty>) -> Self {
        let term = term
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty());
        Self { term, difficulty }
    }

    pub fn matches(&self, entry: &DictionaryEntry) -> bool {
        if let Some(difficulty) = self.difficulty {
            if entry.difficulty != difficulty {
                return false;
            }
        }

        match &self.term {
            Some(term) => {
                entry.word.to_lowercase().contains(term)
                    || entry.definition.to_lowercase().contains(term)
            }
            None => true,
        }
    }
}

/// Entries matching `filter`, keeping their order
pub fn filter_entries(entries: Vec<DictionaryEntry>, filter: &DictionaryFilter) -> Vec<DictionaryEntry> {
    entries.into_iter().filter(|e| filter.matches(e)).collect()
}

/// Tip shown on `day`: the same for every user, rotating through active tips
pub fn tip_for_day(tips: &[DailyTip], day: NaiveDate) -> Option<&DailyTip> {
    let active: Vec<&DailyTip> = tips.iter().filter(|t| t.is_active).collect();
    if active.is_empty() {
        return None;
    }
    let index = day.ordinal() as usize % active.len();
    active.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::TipType;

    fn entry(word: &str, definition: &str, level: u8) -> DictionaryEntry {
        DictionaryEntry::new(word, definition, Difficulty::new(level).unwrap()).unwrap()
    }

    fn entries() -> Vec<DictionaryEntry> {
        vec![
            entry("Atom", "Smallest unit of matter", 1),
            entry("Gravity", "Force that attracts a body toward the center of the earth", 2),
            entry("Hypothesis", "Proposed explanation made on limited evidence", 3),
        ]
    }

    #[test]
    fn test_blank_term_matches_all() {
        let filter = DictionaryFilter::new(Some("   ".to_string()), None);
        assert_eq!(filter.term, None);
        assert_eq!(filter_entries(entries(), &filter).len(), 3);
    }

    #[test]
    fn test_term_matches_word_or_definition_case_insensitive() {
        let by_word = DictionaryFilter::new(Some("GRAV".to_string()), None);
        let words: Vec<String> = filter_entries(entries(), &by_word)
            .into_iter()
            .map(|e| e.word)
            .collect();
        assert_eq!(words, ["Gravity"]);

        let by_definition = DictionaryFilter::new(Some("evidence".to_string()), None);
        let words: Vec<String> = filter_entries(entries(), &by_definition)
            .into_iter()
            .map(|e| e.word)
            .collect();
        assert_eq!(words, ["Hypothesis"]);
    }

    #[test]
    fn test_difficulty_and_term_combine() {
        let filter = DictionaryFilter::new(Some("o".to_string()), Difficulty::new(1));
        let words: Vec<String> = filter_entries(entries(), &filter)
            .into_iter()
            .map(|e| e.word)
            .collect();
        assert_eq!(words, ["Atom"]);

        let none = DictionaryFilter::new(None, Difficulty::new(5));
        assert!(filter_entries(entries(), &none).is_empty());
    }

    #[test]
    fn test_tip_rotates_by_day_of_year() {
        let mut tips = vec![
            DailyTip::new("first", TipType::Learning, "general").unwrap(),
            DailyTip::new("second", TipType::FunFact, "trivia").unwrap(),
            DailyTip::new("hidden", TipType::Motivation, "general").unwrap(),
        ];
        tips[2].is_active = false;

        // January 1st is ordinal 1.
        let jan_1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let jan_2 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(tip_for_day(&tips, jan_1).unwrap().tip_text, "second");
        assert_eq!(tip_for_day(&tips, jan_2).unwrap().tip_text, "first");

        assert!(tip_for_day(&[], jan_1).is_none());
    }
}
