//! Host loop tests: real tokio time, in-memory input and output.

use std::time::Duration;

use tokio::io::{AsyncWriteExt, BufReader};
use vignette_cli::host::media::SimulatedMediaPlayer;
use vignette_cli::host::scheduler::DeadlineScheduler;
use vignette_cli::host::stage::TerminalStage;
use vignette_cli::host::{Exit, HostDirector, drive};
use vignette_core::config::PlaybackConfig;
use vignette_narrative::Director;
use vignette_script::Script;
use vignette_test_support::{cg_event, narration_event, script_of};

fn director(config: PlaybackConfig, media: SimulatedMediaPlayer) -> HostDirector<Vec<u8>> {
    Director::new(TerminalStage::new(Vec::new()), DeadlineScheduler::default(), media)
        .with_config(config)
}

fn output(director: &HostDirector<Vec<u8>>) -> String {
    String::from_utf8_lossy(director.stage().writer()).into_owned()
}

fn started(mut director: HostDirector<Vec<u8>>, script: Script) -> HostDirector<Vec<u8>> {
    director.start(script).unwrap();
    director
}

#[tokio::test]
async fn test_enter_presses_play_to_the_end() {
    // Arrange
    let mut director = started(
        director(
            PlaybackConfig::default(),
            SimulatedMediaPlayer::new(None, Duration::from_millis(10)),
        ),
        script_of(vec![vec![narration_event("Dawn."), narration_event("Dusk.")]]),
    );

    // Act
    let exit = drive(&mut director, &b"\nc\n"[..]).await.unwrap();

    // Assert
    assert_eq!(exit, Exit::Finished);
    let text = output(&director);
    assert!(text.contains("Dawn."));
    assert!(text.contains("Dusk."));
    assert!(text.contains("The End"));
}

#[tokio::test]
async fn test_quit_stops_before_the_end() {
    let mut director = started(
        director(
            PlaybackConfig::default(),
            SimulatedMediaPlayer::new(None, Duration::from_millis(10)),
        ),
        script_of(vec![vec![narration_event("Dawn."), narration_event("Dusk.")]]),
    );

    let exit = drive(&mut director, &b"q\n"[..]).await.unwrap();

    assert_eq!(exit, Exit::Quit);
    assert!(!director.is_ended());
}

#[tokio::test]
async fn test_closed_input_ends_the_session() {
    let mut director = started(
        director(
            PlaybackConfig::default(),
            SimulatedMediaPlayer::new(None, Duration::from_millis(10)),
        ),
        script_of(vec![vec![narration_event("Dawn.")]]),
    );

    let exit = drive(&mut director, &b""[..]).await.unwrap();

    assert_eq!(exit, Exit::InputClosed);
}

#[tokio::test]
async fn test_media_end_advances_on_its_own_with_auto_advance() {
    // Arrange
    let mut director = started(
        director(
            PlaybackConfig::default().with_auto_advance(true),
            SimulatedMediaPlayer::new(None, Duration::from_millis(20)),
        ),
        script_of(vec![vec![cg_event("intro.mp4")]]),
    );
    let (mut keep_open, reader) = tokio::io::duplex(64);

    // Act
    let exit = tokio::time::timeout(
        Duration::from_secs(5),
        drive(&mut director, BufReader::new(reader)),
    )
    .await
    .unwrap()
    .unwrap();

    // Assert
    assert_eq!(exit, Exit::Finished);
    assert!(output(&director).contains("Cinematic finished"));
    assert_eq!(director.media().loaded(), 0);
    keep_open.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_missing_media_falls_back_and_continue_moves_on() {
    let root = std::env::temp_dir().join("vignette-drive-test-empty-root");
    let mut director = started(
        director(
            PlaybackConfig::default(),
            SimulatedMediaPlayer::new(Some(root), Duration::from_millis(10)),
        ),
        script_of(vec![vec![cg_event("missing.mp4")]]),
    );

    let exit = drive(&mut director, &b"\n"[..]).await.unwrap();

    assert_eq!(exit, Exit::Finished);
    let text = output(&director);
    assert!(text.contains("Media failed to load"));
    assert!(text.contains("could not be played"));
}
