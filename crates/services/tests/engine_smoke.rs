use std::sync::Arc;
use std::time::Duration;

use game_core::bank::{ArithmeticBank, HangulBank};
use game_core::model::{Answer, GameKind, GameRules};
use game_core::time::fixed_clock;
use services::session::GameLoopService;
use storage::repository::{InMemoryRepository, RecordRepository};

fn correct_raw(service: &GameLoopService) -> String {
    let session = service.session();
    let guard = session.lock().unwrap();
    match guard.current_question().unwrap().answer() {
        Answer::Text(s) => s.clone(),
        Answer::Number(n) => n.to_string(),
    }
}

#[tokio::test(start_paused = true)]
async fn korean_full_run_persists_final_score() {
    let repo = InMemoryRepository::new();
    let service = GameLoopService::new(
        fixed_clock(),
        Arc::new(repo.clone()),
        GameRules::korean(),
        Box::new(HangulBank::with_seed(31)),
    );

    service.start_with_countdown().unwrap();
    tokio::time::sleep(Duration::from_millis(3_100)).await;

    for level in 1_u8..=3 {
        assert_eq!(service.progress().unwrap().level, level);
        for _ in 0..10 {
            let raw = correct_raw(&service);
            service.submit(&raw).await.unwrap();
        }
        if level < 3 {
            tokio::time::sleep(Duration::from_millis(5_100)).await;
        }
    }

    let progress = service.progress().unwrap();
    assert!(progress.is_finished);

    // With a fixed clock every answer is instant: 10 * (15 + 30 + 45).
    assert_eq!(progress.score, 900);

    let rows = repo.list_records(GameKind::Korean, 10).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].record.score(), 900);
    assert_eq!(rows[0].record.duration_ms(), 0);
}

#[tokio::test(start_paused = true)]
async fn math_failed_block_records_and_allows_restart() {
    let repo = InMemoryRepository::new();
    let service = GameLoopService::new(
        fixed_clock(),
        Arc::new(repo.clone()),
        GameRules::math(),
        Box::new(ArithmeticBank::with_seed(31)),
    );

    service.start_with_countdown().unwrap();
    tokio::time::sleep(Duration::from_millis(3_100)).await;

    for _ in 0..10 {
        service.submit("wrong").await.unwrap();
    }
    assert!(service.progress().unwrap().is_finished);
    assert_eq!(repo.list_records(GameKind::Math, 10).await.unwrap().len(), 1);

    service.restart().unwrap();
    tokio::time::sleep(Duration::from_millis(3_100)).await;

    let progress = service.progress().unwrap();
    assert!(!progress.is_finished);
    assert_eq!(progress.level, 1);
    assert_eq!(progress.score, 0);

    // The earlier record survives the restart untouched.
    assert_eq!(repo.list_records(GameKind::Math, 10).await.unwrap().len(), 1);
}
