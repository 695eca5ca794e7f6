//! Word repository behavior against a real PostgreSQL schema.
//!
//! Run with: `DATABASE_URL=... cargo test -p vocab-db -- --ignored`

use chrono::{Duration, Utc};
use vocab_db::test_fixtures::TestDatabase;
use vocab_db::{
    Category, CategoryFilter, CreateWordRequest, Error, ListWordsRequest, PartOfSpeech,
    PartOfSpeechFilter, WordRepository, WordSort,
};

fn learning(text: &str) -> CreateWordRequest {
    CreateWordRequest {
        text: text.to_string(),
        translation: None,
        language: "es".to_string(),
        part_of_speech: None,
        category: Category::Learning,
        context: None,
    }
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL
async fn test_insert_if_absent_folds_case() {
    let test_db = TestDatabase::new().await;
    let words = &test_db.db.words;

    let created = words.insert_if_absent(learning("Hello")).await.unwrap();
    let again = words.insert_if_absent(learning("hELLO")).await.unwrap();

    assert!(created.is_created());
    assert!(!again.is_created());
    assert_eq!(again.entry().id, created.entry().id);
    assert_eq!(again.entry().text, "Hello");

    let found = words.find_by_text("HELLO").await.unwrap().unwrap();
    assert_eq!(found.id, created.entry().id);

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL
async fn test_insert_if_absent_folds_non_ascii_case() {
    let test_db = TestDatabase::new().await;
    let words = &test_db.db.words;

    let created = words.insert_if_absent(learning("Árbol")).await.unwrap();
    let again = words.insert_if_absent(learning("árbol")).await.unwrap();
    assert!(created.is_created());
    assert!(!again.is_created());
    assert_eq!(again.entry().id, created.entry().id);

    let found = words.find_by_text("ÁRBOL").await.unwrap().unwrap();
    assert_eq!(found.id, created.entry().id);
    assert_eq!(found.text, "Árbol");

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM word")
        .fetch_one(&test_db.pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL
async fn test_concurrent_insert_creates_single_row() {
    let test_db = TestDatabase::new().await;
    let words = test_db.db.words.clone();

    let (a, b) = futures::join!(
        words.insert_if_absent(learning("xylophone")),
        words.insert_if_absent(learning("Xylophone")),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_eq!(
        [a.is_created(), b.is_created()].iter().filter(|c| **c).count(),
        1
    );
    assert_eq!(a.entry().id, b.entry().id);

    let all = words.list(&ListWordsRequest::default()).await.unwrap();
    assert_eq!(all.total, 1);

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL
async fn test_pagination_boundary() {
    let test_db = TestDatabase::new().await;
    let words = &test_db.db.words;

    for i in 0..25 {
        words
            .insert_if_absent(learning(&format!("word{:02}", i)))
            .await
            .unwrap();
    }

    let page = |page| ListWordsRequest {
        page,
        limit: 10,
        ..Default::default()
    };
    let third = words.list(&page(3)).await.unwrap();
    assert_eq!(third.words.len(), 5);
    assert_eq!(third.total, 25);

    let fourth = words.list(&page(4)).await.unwrap();
    assert!(fourth.words.is_empty());
    assert_eq!(fourth.total, 25);

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL
async fn test_alphabetical_sort_ignores_case() {
    let test_db = TestDatabase::new().await;
    let words = &test_db.db.words;

    for text in ["banana", "Apple", "cherry"] {
        words.insert_if_absent(learning(text)).await.unwrap();
    }

    let sorted = words
        .list(&ListWordsRequest {
            sort: WordSort::AlphaAsc,
            ..Default::default()
        })
        .await
        .unwrap();
    let texts: Vec<_> = sorted.words.iter().map(|w| w.text.as_str()).collect();
    assert_eq!(texts, vec!["Apple", "banana", "cherry"]);

    let reversed = words
        .list(&ListWordsRequest {
            sort: WordSort::AlphaDesc,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(reversed.words[0].text, "cherry");

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL
async fn test_list_filters_by_category_and_unclassified() {
    let test_db = TestDatabase::new().await;
    let words = &test_db.db.words;

    let dog = words
        .insert_if_absent(CreateWordRequest {
            part_of_speech: Some(PartOfSpeech::Noun),
            ..learning("dog")
        })
        .await
        .unwrap();
    words.insert_if_absent(learning("zzyzx")).await.unwrap();
    words
        .set_category(dog.entry().id, Category::Known)
        .await
        .unwrap();

    let known_nouns = words
        .list(&ListWordsRequest {
            category: CategoryFilter::Only(Category::Known),
            part_of_speech: PartOfSpeechFilter::Label(PartOfSpeech::Noun),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(known_nouns.total, 1);

    let other = words
        .list(&ListWordsRequest {
            part_of_speech: PartOfSpeechFilter::Unclassified,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(other.total, 1);
    assert_eq!(other.words[0].text, "zzyzx");

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL
async fn test_toggle_round_trip_and_missing_id() {
    let test_db = TestDatabase::new().await;
    let words = &test_db.db.words;

    let entry = words.insert_if_absent(learning("river")).await.unwrap();
    let id = entry.entry().id;

    assert_eq!(words.toggle_category(id).await.unwrap(), Category::Known);
    assert_eq!(words.toggle_category(id).await.unwrap(), Category::Learning);

    let err = words.toggle_category(id + 1000).await.unwrap_err();
    assert!(matches!(err, Error::WordNotFound(_)));

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL
async fn test_category_counts_respect_cutoff() {
    let test_db = TestDatabase::new().await;
    let words = &test_db.db.words;

    let known = words.insert_if_absent(learning("ocean")).await.unwrap();
    words
        .set_category(known.entry().id, Category::Known)
        .await
        .unwrap();
    words.insert_if_absent(learning("desert")).await.unwrap();

    let all = words.category_counts(None).await.unwrap();
    assert_eq!((all.known, all.learning), (1, 1));

    let before = words
        .category_counts(Some(Utc::now() - Duration::days(1)))
        .await
        .unwrap();
    assert_eq!((before.known, before.learning), (0, 0));

    test_db.cleanup().await;
}
