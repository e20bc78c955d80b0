//! Integration tests for the full session flow
//!
//! MockAgent -> step events -> SessionHistory -> teardown GIF export.
//! Mirrors the runs a real browser collaborator would produce: navigation
//! with real captures, no-vision runs, and placeholder-only runs.

use reel::agent::mock::{MockAgentRunner, MockConfig, MockStep};
use reel::agent::runner::Session;
use reel::agent::AgentError;
use reel::config::SessionConfig;
use reel::screenshot::Screenshot;

use super::common;

/// GIF is generated when the agent navigates to a page with real content
#[tokio::test]
async fn test_gif_generated_for_real_navigation() {
    let dir = tempfile::tempdir().unwrap();
    let gif_path = dir.path().join("test_agent.gif");

    let runner = MockAgentRunner::new().with_config(
        MockConfig::default()
            .with_model("mock-model")
            .with_steps(vec![
                MockStep::new(common::navigate_outcome("http://localhost/"))
                    .with_screenshot(common::RED_FRAME.clone()),
                MockStep::new(common::done_outcome("Navigated successfully"))
                    .with_screenshot(common::BLUE_FRAME.clone()),
            ]),
    );

    let config = SessionConfig::new("Navigate and verify the page loads")
        .with_max_steps(3)
        .with_gif_output(&gif_path);

    let history = Session::new(config).run(&runner).await.unwrap();

    assert_eq!(history.final_result(), Some("Navigated successfully"));
    assert_eq!(history.is_successful(), Some(true));

    assert!(gif_path.exists(), "gif was not created at {gif_path:?}");
    let size = gif_path.metadata().unwrap().len();
    assert!(
        size > 10_000,
        "gif file is too small ({size} bytes), likely only contains placeholders"
    );

    // History must contain at least one real screenshot
    let has_real = history
        .screenshots(false)
        .flatten()
        .any(|shot| !shot.is_placeholder());
    assert!(has_real, "no real screenshots found in history");
}

/// GIF is generated even when vision is disabled, as long as a real capture
/// exists for the export
#[tokio::test]
async fn test_gif_generated_without_vision() {
    let dir = tempfile::tempdir().unwrap();
    let gif_path = dir.path().join("no_vision_test.gif");

    // A no-vision run still captures screenshots for the gif; the model
    // placeholder only shows up for steps where the capture failed.
    let runner = MockAgentRunner::new().with_steps(vec![
        MockStep::new(common::navigate_outcome("http://localhost/"))
            .with_screenshot(common::GREEN_FRAME.clone()),
        MockStep::new(common::done_outcome("Successfully tested without vision"))
            .with_screenshot(Screenshot::placeholder(false)),
    ]);

    let config = SessionConfig::new("Navigate without using vision")
        .with_max_steps(3)
        .with_vision(false)
        .with_gif_output(&gif_path);

    let history = Session::new(config).run(&runner).await.unwrap();

    assert!(history.final_result().is_some());
    assert!(
        gif_path.exists(),
        "gif was not created at {gif_path:?} when use_vision=false"
    );
    assert!(gif_path.metadata().unwrap().len() > 0);

    // Positional sequence still covers every step
    let screenshots: Vec<_> = history.screenshots(true).collect();
    assert_eq!(screenshots.len(), 2);

    // At least one valid (non-placeholder) screenshot exists
    let valid = screenshots
        .iter()
        .flatten()
        .filter(|s| !s.is_placeholder())
        .count();
    assert!(valid > 0, "no valid screenshots found for gif generation");
}

/// No GIF is created when all screenshots are placeholders
#[tokio::test]
async fn test_no_gif_when_only_placeholders() {
    let dir = tempfile::tempdir().unwrap();
    let gif_path = dir.path().join("should_not_exist.gif");

    let runner = MockAgentRunner::new().with_steps(vec![
        MockStep::new(common::navigate_outcome("about:blank"))
            .with_screenshot(Screenshot::placeholder(true)),
        MockStep::new(common::done_outcome("Just completed without navigation"))
            .with_screenshot(Screenshot::placeholder(true)),
    ]);

    let config = SessionConfig::new("Just complete without navigation")
        .with_max_steps(2)
        .with_gif_output(&gif_path);

    let history = Session::new(config).run(&runner).await.unwrap();

    assert!(history.final_result().is_some());
    assert!(
        !gif_path.exists(),
        "gif should not be created when all screenshots are placeholders"
    );
}

/// Without a configured output path no export is attempted at all
#[tokio::test]
async fn test_no_export_without_configured_path() {
    let dir = tempfile::tempdir().unwrap();

    let runner = MockAgentRunner::new().with_steps(vec![
        MockStep::new(common::navigate_outcome("http://localhost/"))
            .with_screenshot(common::RED_FRAME.clone()),
        MockStep::new(common::done_outcome("done")),
    ]);

    let config = SessionConfig::new("run without gif");
    let history = Session::new(config).run(&runner).await.unwrap();

    assert_eq!(history.len(), 2);
    assert_eq!(
        std::fs::read_dir(dir.path()).unwrap().count(),
        0,
        "no artifact may be written without a configured path"
    );
}

/// A done step ends the run early; export still happens exactly once
#[tokio::test]
async fn test_early_done_stops_run_and_still_exports() {
    let dir = tempfile::tempdir().unwrap();
    let gif_path = dir.path().join("early.gif");

    // Scripted steps continue past the done step; the session must ignore
    // the extras.
    let runner = MockAgentRunner::new().with_steps(vec![
        MockStep::new(common::done_outcome("finished early"))
            .with_screenshot(common::GREEN_FRAME.clone()),
        MockStep::new(common::navigate_outcome("http://localhost/never"))
            .with_screenshot(common::RED_FRAME.clone()),
    ]);

    let config = SessionConfig::new("stop at the first step")
        .with_max_steps(10)
        .with_gif_output(&gif_path);

    let history = Session::new(config).run(&runner).await.unwrap();

    assert_eq!(history.len(), 1);
    assert_eq!(history.final_result(), Some("finished early"));
    assert!(gif_path.exists());
}

/// The step cap cuts off a runner that never reports done
#[tokio::test]
async fn test_step_limit_cuts_off_run() {
    let steps: Vec<MockStep> = (0..5)
        .map(|i| MockStep::new(common::navigate_outcome(&format!("http://localhost/{i}"))))
        .collect();
    let runner = MockAgentRunner::new().with_steps(steps);

    let config = SessionConfig::new("never finishes").with_max_steps(2);
    let history = Session::new(config).run(&runner).await.unwrap();

    assert_eq!(history.len(), 2);
    assert!(!history.is_done());
    assert_eq!(history.final_result(), None);
}

/// Start failures from the collaborator propagate out of the session
#[tokio::test]
async fn test_failing_start_propagates() {
    let runner = MockAgentRunner::new().with_config(MockConfig::default().failing());
    let result = Session::new(SessionConfig::new("doomed")).run(&runner).await;
    assert!(matches!(result, Err(AgentError::ProcessSpawnFailed)));
}

/// The session passes its configuration through to the collaborator
#[tokio::test]
async fn test_session_config_reaches_runner() {
    let runner = MockAgentRunner::new()
        .with_steps(vec![MockStep::new(common::done_outcome("ok"))]);

    let config = SessionConfig::new("configured task")
        .with_max_steps(4)
        .with_vision(false);
    Session::new(config).run(&runner).await.unwrap();

    let captured = runner.last_config().expect("start config captured");
    assert_eq!(captured.task, "configured task");
    assert_eq!(captured.max_steps, 4);
    assert!(!captured.use_vision);
}
