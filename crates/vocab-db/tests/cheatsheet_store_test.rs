//! Cheatsheet and settings repositories against a real PostgreSQL schema.

use vocab_db::test_fixtures::TestDatabase;
use vocab_db::{
    Category, CheatsheetRepository, CreateCheatsheetRequest, CreateWordRequest, Error,
    PageVisitRepository, PartOfSpeech, SettingsRepository, UpdateSettingsRequest, WordRepository,
};

fn word(text: &str, pos: Option<PartOfSpeech>) -> CreateWordRequest {
    CreateWordRequest {
        text: text.to_string(),
        translation: None,
        language: "es".to_string(),
        part_of_speech: pos,
        category: Category::Learning,
        context: None,
    }
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL
async fn test_cheatsheet_creation_is_atomic() {
    let test_db = TestDatabase::new().await;
    let db = &test_db.db;

    let w = db.words.insert_if_absent(word("tree", None)).await.unwrap();

    let err = db
        .cheatsheets
        .create(CreateCheatsheetRequest {
            title: "Nature".into(),
            word_ids: vec![w.entry().id, i64::MAX],
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));

    assert!(db.cheatsheets.list().await.unwrap().is_empty());
    let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cheatsheet_word")
        .fetch_one(&test_db.pool)
        .await
        .unwrap();
    assert_eq!(orphans, 0);

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL
async fn test_cheatsheet_words_ordered_by_part_of_speech() {
    let test_db = TestDatabase::new().await;
    let db = &test_db.db;

    let run = db
        .words
        .insert_if_absent(word("run", Some(PartOfSpeech::Verb)))
        .await
        .unwrap();
    let misc = db.words.insert_if_absent(word("hmm", None)).await.unwrap();
    let dog = db
        .words
        .insert_if_absent(word("dog", Some(PartOfSpeech::Noun)))
        .await
        .unwrap();
    let big = db
        .words
        .insert_if_absent(word("big", Some(PartOfSpeech::Adjective)))
        .await
        .unwrap();

    let summary = db
        .cheatsheets
        .create(CreateCheatsheetRequest {
            title: "Mixed".into(),
            word_ids: vec![
                run.entry().id,
                misc.entry().id,
                dog.entry().id,
                big.entry().id,
                dog.entry().id,
            ],
        })
        .await
        .unwrap();
    assert_eq!(summary.word_count, 4);

    let sheet = db.cheatsheets.get(summary.id).await.unwrap().unwrap();
    let texts: Vec<_> = sheet.words.iter().map(|w| w.text.as_str()).collect();
    assert_eq!(texts, vec!["big", "dog", "run", "hmm"]);

    assert!(db.cheatsheets.delete(summary.id).await.unwrap());
    assert!(db.cheatsheets.get(summary.id).await.unwrap().is_none());

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL
async fn test_settings_singleton_and_page_visits() {
    let test_db = TestDatabase::new().await;
    let db = &test_db.db;

    let settings = db.settings.get().await.unwrap();
    assert_eq!(settings.target_language, "es");
    assert_eq!(settings.min_word_length, 3);

    let updated = db
        .settings
        .update(UpdateSettingsRequest {
            target_language: Some("de".into()),
            min_word_length: Some(5),
        })
        .await
        .unwrap();
    assert_eq!(updated.target_language, "de");
    assert_eq!(db.settings.get().await.unwrap().min_word_length, 5);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_settings")
        .fetch_one(&test_db.pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);

    db.page_visits
        .record("https://example.com", Some("Example"))
        .await
        .unwrap();
    assert_eq!(db.page_visits.count().await.unwrap(), 1);

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL
async fn test_settings_read_does_not_write() {
    let test_db = TestDatabase::new().await;
    let db = &test_db.db;

    sqlx::query("DELETE FROM user_settings")
        .execute(&test_db.pool)
        .await
        .unwrap();

    let settings = db.settings.get().await.unwrap();
    assert_eq!(settings.target_language, "es");
    assert_eq!(settings.min_word_length, 3);

    let count = || async {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user_settings")
            .fetch_one(&test_db.pool)
            .await
            .unwrap()
    };
    assert_eq!(count().await, 0);

    db.settings.ensure_row().await.unwrap();
    db.settings.ensure_row().await.unwrap();
    assert_eq!(count().await, 1);

    test_db.cleanup().await;
}
