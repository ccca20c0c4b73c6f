//! Seeding tests against the shipped data files and a file-backed database

use std::path::PathBuf;

use tempfile::TempDir;
use wcdb_common::db::{init_database, SqliteRepository};
use wcdb_common::seed::{seed_database, SeedData};
use wcdb_common::{Error, Repository};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../data")
}

#[test]
fn test_shipped_data_files_are_valid() {
    let data = SeedData::load(&data_dir()).expect("shipped seed data should load");

    assert_eq!(data.winners.len(), 19);
    assert!(data.winners.iter().all(|w| w.year <= 2022));
    assert!(data.winners.iter().all(|w| (w.year - 1950) % 4 == 0));
    assert!(!data.matches.is_empty());
}

#[test]
fn test_missing_data_dir_names_the_file() {
    let dir = TempDir::new().unwrap();
    let err = SeedData::load(dir.path()).unwrap_err();

    match err {
        Error::NotFound(msg) => assert!(msg.contains("winners.json"), "{}", msg),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_malformed_data_file_is_json_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("winners.json"), "[{\"year\": 1950,").unwrap();
    std::fs::write(dir.path().join("matches.json"), "[]").unwrap();

    assert!(matches!(SeedData::load(dir.path()), Err(Error::Json(_))));
}

#[tokio::test]
async fn test_seed_file_database_twice() {
    let dir = TempDir::new().unwrap();
    let pool = init_database(&dir.path().join("wcdb.db")).await.unwrap();
    let repo = SqliteRepository::new(pool);
    let data = SeedData::load(&data_dir()).unwrap();

    let first = seed_database(&repo, &data, false).await.unwrap();
    assert_eq!(first.winners_inserted, data.winners.len());
    assert_eq!(first.matches_inserted, data.matches.len());

    let second = seed_database(&repo, &data, false).await.unwrap();
    assert_eq!(second.winners_inserted, 0);
    assert_eq!(second.matches_inserted, 0);
    assert_eq!(second.total_winners, data.winners.len() as i64);

    let w = repo.find_winner_by_year(2018).await.unwrap().unwrap();
    assert_eq!(w.winner, "France");
    assert_eq!(w.host_country, "Russia");
}
