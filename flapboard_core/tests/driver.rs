use std::time::Duration;

use flapboard_core::driver::{play, play_blocking};
use flapboard_core::{BoardError, BoardSettings};

fn settings() -> BoardSettings {
    BoardSettings {
        rows: 2,
        cols: 8,
        playlist: vec!["ARRIVALS".into(), "ON TIME".into()],
        cycle_secs: 10.0,
        ..BoardSettings::default()
    }
}

#[tokio::test(start_paused = true)]
async fn plays_until_the_first_frame_settles() {
    let mut board = settings().build().unwrap();
    let ticks = play(&mut board, Duration::from_millis(50), |b| b.cycles() > 0 && b.is_settled())
        .await
        .unwrap();
    assert!(ticks > 10);
    assert_eq!(board.rows_text(), ["ARRIVALS", "        "]);
}

#[tokio::test(start_paused = true)]
async fn follows_the_playlist_in_virtual_time() {
    let mut board = settings().build().unwrap();
    play(&mut board, Duration::from_millis(100), |b| b.cycles() == 2 && b.is_settled())
        .await
        .unwrap();
    assert!(board.now() >= Duration::from_millis(10_500));
    assert!(board.now() < Duration::from_millis(20_500));
    assert_eq!(board.rows_text(), ["ON TIME ", "        "]);
}

#[tokio::test(start_paused = true)]
async fn zero_tick_is_rejected() {
    let mut board = settings().build().unwrap();
    let result = play(&mut board, Duration::ZERO, |_| true).await;
    assert!(matches!(result, Err(BoardError::InvalidTiming(_))));
}

#[test]
fn blocking_player_returns_immediately_when_done() {
    let mut board = settings().build().unwrap();
    let ticks = play_blocking(&mut board, Duration::from_millis(10), |_| true).unwrap();
    assert_eq!(ticks, 0);
}
