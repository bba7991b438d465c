use chrono::Duration;
use game_core::model::{CharacterKind, GameKind, SchoolProfile, SessionRecord};
use game_core::time::fixed_now;
use storage::repository::{ProfileRepository, RecordRepository};
use storage::sqlite::SqliteRepository;

#[tokio::test]
async fn sqlite_roundtrip_keeps_record_fields() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_records?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let record = SessionRecord::new(fixed_now(), 185, 73_400);
    let id = repo.append_record(GameKind::Korean, &record).await.unwrap();

    let rows = repo.list_records(GameKind::Korean, 10).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, id);
    assert_eq!(rows[0].record.recorded_at(), record.recorded_at());
    assert_eq!(rows[0].record.score(), 185);
    assert_eq!(rows[0].record.duration_ms(), 73_400);
}

#[tokio::test]
async fn sqlite_lists_most_recent_first_per_game() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_ordering?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let older = SessionRecord::new(fixed_now(), 100, 60_000);
    let newer = SessionRecord::new(fixed_now() + Duration::minutes(10), 300, 45_000);
    repo.append_record(GameKind::Math, &older).await.unwrap();
    repo.append_record(GameKind::Math, &newer).await.unwrap();

    let other_game = SessionRecord::new(fixed_now(), 900, 10_000);
    repo.append_record(GameKind::Korean, &other_game).await.unwrap();

    let rows = repo.list_records(GameKind::Math, 10).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].record.score(), 300);
    assert_eq!(rows[1].record.score(), 100);
    assert!(rows[0].id > rows[1].id);

    let limited = repo.list_records(GameKind::Math, 1).await.unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].record.score(), 300);
}

#[tokio::test]
async fn sqlite_reads_empty_store_as_empty_list() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_empty?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let rows = repo.list_records(GameKind::Math, 10).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn sqlite_profile_saves_replaces_and_clears() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_profile?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert!(repo.load_profile().await.unwrap().is_none());

    let first = SchoolProfile::new("숲속학교", CharacterKind::Cat).unwrap();
    repo.save_profile(&first).await.unwrap();
    assert_eq!(repo.load_profile().await.unwrap(), Some(first));

    let second = SchoolProfile::new("바다학교", CharacterKind::Teacher).unwrap();
    repo.save_profile(&second).await.unwrap();
    assert_eq!(repo.load_profile().await.unwrap(), Some(second));

    repo.clear_profile().await.unwrap();
    assert!(repo.load_profile().await.unwrap().is_none());
}
