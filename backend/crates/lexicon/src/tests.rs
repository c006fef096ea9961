//! Unit tests for lexicon crate

#[cfg(test)]
mod search_tests {
    use crate::application::search_dictionary::SearchDictionaryUseCase;
    use crate::domain::entities::DictionaryEntry;
    use crate::domain::repository::DictionaryRepository;
    use crate::domain::services::DictionaryFilter;
    use crate::domain::value_objects::Difficulty;
    use crate::infra::InMemoryLexicon;
    use std::sync::Arc;
    use tokio_test::assert_ok;

    async fn lexicon() -> Arc<InMemoryLexicon> {
        let lexicon = Arc::new(InMemoryLexicon::new());
        for (word, definition, level) in [
            ("Resilient", "Able to recover quickly from difficult conditions", 3),
            ("Benevolent", "Well meaning and kindly", 2),
            ("Eloquent", "Fluent or persuasive in speaking or writing", 3),
        ] {
            let entry =
                DictionaryEntry::new(word, definition, Difficulty::new(level).unwrap()).unwrap();
            lexicon.insert_entry(&entry).await.unwrap();
        }
        lexicon
    }

    fn words(entries: Vec<DictionaryEntry>) -> Vec<String> {
        entries.into_iter().map(|e| e.word).collect()
    }

    #[tokio::test]
    async fn test_lists_all_ordered_by_word() {
        let use_case = SearchDictionaryUseCase::new(lexicon().await);
        let found = assert_ok!(use_case.execute(&DictionaryFilter::default()).await);
        assert_eq!(words(found), ["Benevolent", "Eloquent", "Resilient"]);
    }

    #[tokio::test]
    async fn test_filters_by_term_and_difficulty() {
        let use_case = SearchDictionaryUseCase::new(lexicon().await);

        let filter = DictionaryFilter::new(Some("WRITING".to_string()), None);
        let found = assert_ok!(use_case.execute(&filter).await);
        assert_eq!(words(found), ["Eloquent"]);

        let filter = DictionaryFilter::new(None, Difficulty::new(3));
        let found = assert_ok!(use_case.execute(&filter).await);
        assert_eq!(words(found), ["Eloquent", "Resilient"]);
    }
}

#[cfg(test)]
mod daily_tests {
    use crate::application::config::LexiconConfig;
    use crate::application::daily_challenges::DailyChallengesUseCase;
    use crate::application::daily_tip::DailyTipUseCase;
    use crate::application::seed::SeedLexiconUseCase;
    use crate::domain::entities::NewDailyWord;
    use crate::domain::repository::{
        DailyTipRepository, DailyWordRepository, DictionaryRepository, SeedRepository,
    };
    use crate::infra::InMemoryLexicon;
    use chrono::NaiveDate;
    use std::sync::Arc;
    use tokio_test::{assert_err, assert_ok};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[tokio::test]
    async fn test_latest_words_with_keys() {
        let lexicon = Arc::new(InMemoryLexicon::new());
        for word in ["Atom", "Gravity", "Evolution"] {
            let new_word = NewDailyWord::new(
                word,
                "definition",
                vec!["first task".to_string(), "second task".to_string()],
            )
            .unwrap();
            lexicon.insert_word(&new_word).await.unwrap();
        }

        let use_case = DailyChallengesUseCase::new(lexicon, Arc::new(LexiconConfig::default()));
        let output = assert_ok!(use_case.execute(day()).await);

        assert_eq!(output.words.len(), 2);
        assert_eq!(output.words[0].word.word, "Evolution");
        assert_eq!(output.words[1].word.word, "Gravity");

        let keys: Vec<&str> = output.keys().map(|k| k.as_str()).collect();
        assert_eq!(
            keys,
            [
                "2024-05-01-word3-0",
                "2024-05-01-word3-1",
                "2024-05-01-word2-0",
                "2024-05-01-word2-1",
            ]
        );
        assert_eq!(output.words[0].challenges[1].text, "second task");
    }

    #[tokio::test]
    async fn test_seed_populates_once() {
        let lexicon = Arc::new(InMemoryLexicon::new());
        let seed = SeedLexiconUseCase::new(lexicon.clone());

        let report = assert_ok!(seed.execute().await);
        assert!(report.entries > 0);
        assert_eq!(report.entries, report.words);
        assert!(report.tips > 0);

        let again = assert_ok!(seed.execute().await);
        assert!(again.is_empty());

        let tip = assert_ok!(DailyTipUseCase::new(lexicon.clone()).execute(day()).await);
        assert!(tip.is_some());

        let daily = DailyChallengesUseCase::new(lexicon, Arc::new(LexiconConfig::default()));
        let output = assert_ok!(daily.execute(day()).await);
        assert_eq!(output.words.len(), 2);
        assert!(output.words.iter().all(|w| w.word.dictionary_id.is_some()));
    }

    #[tokio::test]
    async fn test_failed_seed_leaves_nothing_behind() {
        let reference = Arc::new(InMemoryLexicon::new());
        let full = assert_ok!(SeedLexiconUseCase::new(reference).execute().await);

        let lexicon = Arc::new(InMemoryLexicon::new());
        let seed = SeedLexiconUseCase::new(lexicon.clone());

        // Breaks after every entry and one daily word are written.
        lexicon.fail_seed_after(full.entries + 1);
        assert_err!(seed.execute().await);

        assert!(assert_ok!(lexicon.list_entries().await).is_empty());
        assert!(assert_ok!(lexicon.latest_words(10).await).is_empty());
        assert!(assert_ok!(lexicon.active_tips().await).is_empty());
        assert!(!assert_ok!(lexicon.has_content().await));

        lexicon.clear_failures();
        let report = assert_ok!(seed.execute().await);
        assert_eq!(report.entries, full.entries);
        assert_eq!(report.words, full.words);
        assert_eq!(report.tips, full.tips);
    }

    #[tokio::test]
    async fn test_no_tip_without_active_tips() {
        let lexicon = Arc::new(InMemoryLexicon::new());
        let tip = assert_ok!(DailyTipUseCase::new(lexicon).execute(day()).await);
        assert!(tip.is_none());
    }
}
