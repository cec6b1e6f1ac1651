mod common;

use serde_json::json;

use satellite_lib::core::events::forward_host_events;
use satellite_lib::{dispatch, spawn_event_pump, Command};

use common::{scripted, session};

#[tokio::test]
async fn host_events_reach_the_log_panel() {
    let transport = scripted();
    let session = session(&transport);
    let (sender, pump) = spawn_event_pump(session.events.clone());

    let mut raw = Vec::new();
    for i in 0..75 {
        raw.push(("log".to_string(), json!(format!("[launch] step {i}"))));
    }
    raw.push(("progress".to_string(), json!(0.75)));
    raw.push(("progress".to_string(), json!("not a number")));
    forward_host_events(futures_util::stream::iter(raw), sender).await;
    pump.await.unwrap();

    let tail = session.log_view();
    assert_eq!(tail.lines().count(), 50);
    assert_eq!(tail.lines().next(), Some("[launch] step 25"));
    assert_eq!(session.snapshot().progress, 0.75);

    dispatch(&session, Command::ToggleShowAllLogs).await.unwrap();
    assert_eq!(session.log_view().lines().count(), 75);
    assert_eq!(session.events.len(), 75);
}
