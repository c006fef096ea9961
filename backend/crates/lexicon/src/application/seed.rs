//! Seed Lexicon Use Case
//!
//! Loads the starter word list into an empty store.

use crate::domain::entities::{DailyTip, DictionaryEntry, LexiconSeed, NewDailyWord};
use crate::domain::repository::SeedRepository;
use crate::domain::value_objects::{Difficulty, TipType};
use crate::error::{LexiconError, LexiconResult};
use std::sync::Arc;

struct SampleEntry {
    word: &'static str,
    definition: &'static str,
    part_of_speech: &'static str,
    pronunciation: &'static str,
    example_sentence: &'static str,
    difficulty: u8,
    challenges: [&'static str; 2],
}

const SAMPLE_ENTRIES: &[SampleEntry] = &[
    SampleEntry {
        word: "Serendipity",
        definition: "The occurrence of events by chance in a happy or beneficial way",
        part_of_speech: "noun",
        pronunciation: "/ˌserənˈdipədē/",
        example_sentence: "Pure serendipity led her to the café that became her writing spot.",
        difficulty: 3,
        challenges: [
            "Tell a friend about a serendipitous moment in your life",
            "Write down three lucky surprises from this week",
        ],
    },
    SampleEntry {
        word: "Ephemeral",
        definition: "Lasting for a very short time; transitory",
        part_of_speech: "adjective",
        pronunciation: "/əˈfem(ə)rəl/",
        example_sentence: "The cherry blossoms were ephemeral, gone within a few weeks.",
        difficulty: 4,
        challenges: [
            "Photograph something ephemeral in nature",
            "Write a short paragraph about a fleeting moment you noticed today",
        ],
    },
    SampleEntry {
        word: "Ubiquitous",
        definition: "Present, appearing, or found everywhere",
        part_of_speech: "adjective",
        pronunciation: "/yo͞oˈbikwədəs/",
        example_sentence: "Smartphones have become ubiquitous in modern society.",
        difficulty: 4,
        challenges: [
            "Name three ubiquitous objects around you and why they are common",
            "Use the word in a conversation today",
        ],
    },
    SampleEntry {
        word: "Benevolent",
        definition: "Well meaning and kindly; charitable",
        part_of_speech: "adjective",
        pronunciation: "/bəˈnevələnt/",
        example_sentence: "The benevolent donor asked to remain anonymous.",
        difficulty: 2,
        challenges: [
            "Do one small anonymous kindness today",
            "Describe someone benevolent you admire",
        ],
    },
];

const SAMPLE_TIPS: &[(&str, TipType, &str)] = &[
    (
        "Use a new word in three different sentences within a day to help it stick.",
        TipType::Learning,
        "retention",
    ),
    (
        "English has borrowed words from hundreds of languages.",
        TipType::FunFact,
        "language_history",
    ),
    (
        "\"The limits of my language mean the limits of my world.\" - Ludwig Wittgenstein",
        TipType::Motivation,
        "philosophy",
    ),
    (
        "Keep a vocabulary journal with a personal example for every new word.",
        TipType::ChallengeSpecific,
        "practice",
    ),
];

/// What a seed run inserted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub entries: usize,
    pub words: usize,
    pub tips: usize,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.entries == 0 && self.words == 0 && self.tips == 0
    }
}

/// Seed Lexicon Use Case
pub struct SeedLexiconUseCase<R>
where
    R: SeedRepository,
{
    seed_repo: Arc<R>,
}

impl<R> SeedLexiconUseCase<R>
where
    R: SeedRepository,
{
    pub fn new(seed_repo: Arc<R>) -> Self {
        Self { seed_repo }
    }

    /// Insert the samples unless the lexicon already has content
    ///
    /// The samples are written in one unit, so a failed run leaves the
    /// lexicon empty and the next run starts over.
    pub async fn execute(&self) -> LexiconResult<SeedReport> {
        if self.seed_repo.has_content().await? {
            tracing::info!("Lexicon already populated, skipping seed");
            return Ok(SeedReport::default());
        }

        let seed = starter_seed()?;
        self.seed_repo.insert_seed(&seed).await?;

        let report = SeedReport {
            entries: seed.entries.len(),
            words: seed.words.len(),
            tips: seed.tips.len(),
        };
        tracing::info!(
            entries = report.entries,
            words = report.words,
            tips = report.tips,
            "Lexicon seeded"
        );

        Ok(report)
    }
}

fn starter_seed() -> LexiconResult<LexiconSeed> {
    let mut seed = LexiconSeed::default();

    for sample in SAMPLE_ENTRIES {
        let difficulty = Difficulty::new(sample.difficulty)
            .ok_or(LexiconError::InvalidDifficulty(i32::from(sample.difficulty)))?;
        let entry = DictionaryEntry::new(sample.word, sample.definition, difficulty)?.with_details(
            sample.part_of_speech,
            sample.pronunciation,
            sample.example_sentence,
        );

        let mut word = NewDailyWord::new(
            sample.word,
            sample.definition,
            sample.challenges.iter().map(|c| c.to_string()).collect(),
        )?;
        word.dictionary_id = Some(entry.id.into_uuid());

        seed.entries.push(entry);
        seed.words.push(word);
    }

    for (text, tip_type, category) in SAMPLE_TIPS {
        seed.tips.push(DailyTip::new(*text, *tip_type, *category)?);
    }

    Ok(seed)
}
