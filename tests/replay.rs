use serde::Deserialize;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tokio::fs;

#[derive(Debug, Deserialize)]
struct ReplaySummary {
    applied: u64,
    rejected: u64,
    ignored: u64,
    failed: u64,
    unresolved: u64,
}

fn unique_dir(name: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("like_ui_replay_{}_{}_{name}", std::process::id(), nanos));
    path
}

fn like_button(id: &str, count: u64) -> Value {
    json!({
        "tag": "button",
        "id": id,
        "classes": ["like-button", "text-gray-500"],
        "children": [
            { "tag": "svg", "attributes": { "fill": "none" } },
            { "tag": "span", "classes": ["likes-count"], "text": count.to_string() }
        ]
    })
}

fn list_page() -> Value {
    json!({
        "tag": "body",
        "children": [
            {
                "tag": "article",
                "id": "post-1",
                "children": [
                    { "tag": "span", "classes": ["post-likes-count"], "text": "좋아요 4" },
                    like_button("like-1", 4)
                ]
            },
            {
                "tag": "article",
                "id": "post-2",
                "children": [
                    { "tag": "span", "classes": ["post-likes-count"], "text": "좋아요 7" },
                    like_button("like-2", 7)
                ]
            }
        ]
    })
}

async fn write_json(path: &Path, value: &Value) {
    fs::write(path, serde_json::to_vec(value).unwrap()).await.unwrap();
}

fn run_replay(dir: &Path, output: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_like_ui"))
        .env("LIKE_PAGE_PATH", dir.join("page.json"))
        .env("LIKE_EVENTS_PATH", dir.join("events.json"))
        .env("LIKE_OUTPUT_PATH", output)
        .env_remove("LIKE_MARKUP_PATH")
        .env("RUST_LOG", "info")
        .output()
        .expect("failed to run replay binary")
}

fn find<'a>(node: &'a Value, id: &str) -> Option<&'a Value> {
    if node["id"] == id {
        return Some(node);
    }
    node["children"]
        .as_array()?
        .iter()
        .find_map(|child| find(child, id))
}

#[tokio::test]
async fn replay_updates_page_snapshot() {
    let dir = unique_dir("json");
    fs::create_dir_all(&dir).await.unwrap();
    write_json(&dir.join("page.json"), &list_page()).await;
    write_json(
        &dir.join("events.json"),
        &json!([
            { "target": "like-1", "status": 200, "body": "{\"liked\":true,\"likes_count\":5}" },
            { "target": "like-2", "status": 400, "body": "{\"error\":\"cannot like own post\"}" },
            { "target": "post-2", "status": 200, "body": "{}" },
            { "target": "like-9", "status": 200, "body": "{\"liked\":true,\"likes_count\":1}" }
        ]),
    )
    .await;
    let output = dir.join("out").join("page.json");

    let result = run_replay(&dir, &output);
    assert!(
        result.status.success(),
        "replay failed: {}",
        String::from_utf8_lossy(&result.stderr)
    );

    let summary: ReplaySummary = serde_json::from_slice(&result.stdout).unwrap();
    assert_eq!(summary.applied, 1);
    assert_eq!(summary.rejected, 1);
    assert_eq!(summary.ignored, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.unresolved, 1);

    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("cannot like own post"));

    let page: Value = serde_json::from_slice(&fs::read(&output).await.unwrap()).unwrap();
    let liked = find(&page, "like-1").unwrap();
    assert_eq!(liked["classes"], json!(["like-button", "text-gray-900"]));
    assert_eq!(liked["children"][0]["attributes"]["fill"], "currentColor");
    assert_eq!(liked["children"][1]["text"], "5");
    assert_eq!(find(&page, "post-1").unwrap()["children"][0]["text"], "좋아요 5");

    let untouched = find(&page, "like-2").unwrap();
    assert_eq!(untouched["classes"], json!(["like-button", "text-gray-500"]));
    assert_eq!(find(&page, "post-2").unwrap()["children"][0]["text"], "좋아요 7");

    let _ = fs::remove_dir_all(&dir).await;
}

#[tokio::test]
async fn replay_renders_html_output() {
    let dir = unique_dir("html");
    fs::create_dir_all(&dir).await.unwrap();
    write_json(&dir.join("page.json"), &list_page()).await;
    write_json(
        &dir.join("events.json"),
        &json!([
            { "target": "like-2", "status": 200, "body": "not json" }
        ]),
    )
    .await;
    let output = dir.join("page.html");

    let result = run_replay(&dir, &output);
    assert!(result.status.success());

    let summary: ReplaySummary = serde_json::from_slice(&result.stdout).unwrap();
    assert_eq!(summary.failed, 1);
    assert!(String::from_utf8_lossy(&result.stderr).contains("error processing response"));

    let html = fs::read_to_string(&output).await.unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(r#"<button id="like-2" class="like-button text-gray-500">"#));
    assert!(html.contains("좋아요 7"));

    let _ = fs::remove_dir_all(&dir).await;
}

#[tokio::test]
async fn missing_page_fails_the_run() {
    let dir = unique_dir("missing");
    fs::create_dir_all(&dir).await.unwrap();

    let result = run_replay(&dir, &dir.join("page.json"));

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("failed to read"));

    let _ = fs::remove_dir_all(&dir).await;
}
