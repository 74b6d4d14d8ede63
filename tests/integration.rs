use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn archive_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_archive"))
}

const EXPORT: &str = r#"{
  "transcripts": [
    {
      "id": "saigon",
      "title": "Oral History of Saigon",
      "interviewer": "Masuda Hajimu",
      "interviewee": "Nguyen Van A",
      "tags": ["vietnam", "city life"],
      "teaserHtml": "<p>Growing up in <em>Saigon</em>.</p>",
      "teaserPlainText": "Growing up in Saigon.",
      "englishTranscriptHtml": "<p>I was born in 1950.</p>",
      "vernacularTranscriptHtml": "<p>Tôi sinh năm 1950.</p>",
      "originalLanguage": "Vietnamese",
      "createdAt": "2024-03-01T00:00:00Z"
    },
    {
      "id": "bangkok",
      "title": "Bangkok Testimony",
      "interviewer": "Masuda Hajimu",
      "tags": ["thailand"],
      "teaserHtml": "<p>A merchant remembers.</p>",
      "teaserPlainText": "A merchant remembers.",
      "englishTranscriptHtml": "<p>The market was quiet.</p>",
      "createdAt": "2024-05-01T00:00:00Z"
    },
    {
      "id": "coldwar",
      "title": "The Cold War (1950-1991).",
      "tags": ["cold war"],
      "teaserHtml": "<p>Four decades.</p>",
      "teaserPlainText": "Four decades.",
      "endnotesHtml": "<ol><li>Box 4</li></ol>"
    }
  ],
  "collections": [
    {
      "title": "Southeast Asia",
      "blurbHtml": "<p>Voices from the region.</p>",
      "transcriptIds": ["saigon", "bangkok"]
    }
  ]
}"#;

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();
    let content_dir = root.join("content");
    fs::create_dir_all(&content_dir).unwrap();
    fs::write(content_dir.join("export.json"), EXPORT).unwrap();

    let config_content = format!(
        r#"[corpus]
path = "{}/content/export.json"

[site]
base_path = "/browsearchives/archives"

[server]
bind = "127.0.0.1:7340"
"#,
        root.display()
    );

    let config_path = config_dir.join("archive.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_archive(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = archive_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run archive binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

#[test]
fn test_browse_everything() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_archive(&config_path, &["search"]);
    assert!(success, "search failed: stdout={}, stderr={}", stdout, stderr);
    assert!(!stdout.contains("returned"), "no summary expected: {}", stdout);
    assert!(stdout.contains("Oral History of Saigon"));
    assert!(stdout.contains("Bangkok Testimony"));
    assert!(stdout.contains("The Cold War (1950-1991)."));
}

#[test]
fn test_search_summary() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_archive(&config_path, &["search", "Saigon"]);
    assert!(success);
    assert!(stdout.contains("'Saigon' returned 1 search results."));
    assert!(stdout.contains("/browsearchives/archives/oral-history-of-saigon"));
    assert!(!stdout.contains("Bangkok Testimony"));
}

#[test]
fn test_search_no_results() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_archive(&config_path, &["search", "xyznonexistent"]);
    assert!(success);
    assert!(stdout.contains("'xyznonexistent' returned 0 search results."));
    assert!(stdout.contains("No results"));
}

#[test]
fn test_search_deterministic() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout1, _, _) = run_archive(&config_path, &["search", "the"]);
    let (stdout2, _, _) = run_archive(&config_path, &["search", "the"]);
    assert_eq!(stdout1, stdout2, "Search output should be deterministic");
}

#[test]
fn test_search_json_columns() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_archive(&config_path, &["search", "--width", "1920", "--json"]);
    assert!(success);
    let v: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(v["count"], 3);
    assert_eq!(v["columns"].as_array().unwrap().len(), 3);
    assert!(v["summary"].is_null());

    let (stdout, _, _) = run_archive(&config_path, &["search", "--width", "600", "--json"]);
    let v: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(v["columns"].as_array().unwrap().len(), 1);
}

#[test]
fn test_tag_click() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_archive(&config_path, &["tag", "thailand", "--json"]);
    assert!(success);
    let v: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(v["view"]["count"], 1);
    assert_eq!(v["effects"][0], "scroll_to_results");
    assert_eq!(
        v["view"]["summary"],
        "'thailand' returned 1 search results."
    );
}

#[test]
fn test_get_transcript() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_archive(&config_path, &["get", "the-cold-war-1950-1991"]);
    assert!(success, "get should succeed");
    assert!(stdout.contains("coldwar"));
    assert!(stdout.contains("<ol><li>Box 4</li></ol>"));
    assert!(stdout.contains("interviewer:   None"));

    let (stdout, _, _) = run_archive(&config_path, &["get", "oral-history-of-saigon"]);
    assert!(stdout.contains("Vernacular Transcript"));
    assert!(stdout.contains("language:      Vietnamese"));
}

#[test]
fn test_get_nonexistent() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) = run_archive(&config_path, &["get", "no-such-transcript"]);
    assert!(!success, "get with unknown slug should fail");
    assert!(stderr.contains("not found"));
}

#[test]
fn test_collection_page() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_archive(&config_path, &["collection", "southeast-asia"]);
    assert!(success);
    assert!(stdout.contains("These transcripts were interviewed by Masuda Hajimu"));
    assert!(stdout.contains("Transcripts (2)"));
}

#[test]
fn test_recent_order() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_archive(&config_path, &["recent"]);
    assert!(success);
    let bangkok = stdout.find("Bangkok Testimony").unwrap();
    let saigon = stdout.find("Oral History of Saigon").unwrap();
    let cold = stdout.find("The Cold War").unwrap();
    assert!(bangkok < saigon && saigon < cold, "got: {}", stdout);
    assert!(stdout.contains("undated"));
}

#[test]
fn test_slug_without_config() {
    let (stdout, _, success) = run_archive(
        Path::new("/nonexistent/archive.toml"),
        &["slug", "The Cold War (1950-1991)."],
    );
    assert!(success);
    assert_eq!(stdout.trim(), "the-cold-war-1950-1991");
}

#[test]
fn test_export_then_load_prebuilt_index() {
    let (tmp, config_path) = setup_test_env();
    let out = tmp.path().join("public");

    let (stdout, stderr, success) =
        run_archive(&config_path, &["export", "--output", out.to_str().unwrap()]);
    assert!(success, "export failed: {}", stderr);
    assert!(stdout.contains("Exported 3 records"));
    assert!(out.join("index.json").exists());
    assert!(out.join("store.json").exists());

    let mut config = fs::read_to_string(&config_path).unwrap();
    config = config.replace(
        "[site]",
        &format!("index_path = \"{}\"\n\n[site]", out.join("index.json").display()),
    );
    fs::write(&config_path, config).unwrap();

    let (stdout, _, success) = run_archive(&config_path, &["search", "Saigon"]);
    assert!(success);
    assert!(stdout.contains("'Saigon' returned 1 search results."));
}

#[test]
fn test_stale_index_is_fatal() {
    let (tmp, config_path) = setup_test_env();
    let out = tmp.path().join("public");
    run_archive(&config_path, &["export", "--output", out.to_str().unwrap()]);

    // Drop a transcript so the export no longer matches the index digest.
    let export_path = tmp.path().join("content").join("export.json");
    let mut export: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&export_path).unwrap()).unwrap();
    export["transcripts"].as_array_mut().unwrap().pop();
    fs::write(&export_path, export.to_string()).unwrap();

    let mut config = fs::read_to_string(&config_path).unwrap();
    config = config.replace(
        "[site]",
        &format!("index_path = \"{}\"\n\n[site]", out.join("index.json").display()),
    );
    fs::write(&config_path, config).unwrap();

    let (_, stderr, success) = run_archive(&config_path, &["search"]);
    assert!(!success, "stale index must fail the load");
    assert!(stderr.contains("different corpus"), "stderr: {}", stderr);
}

#[test]
fn test_index_built_before_title_edit_is_fatal() {
    let (tmp, config_path) = setup_test_env();
    let out = tmp.path().join("public");
    run_archive(&config_path, &["export", "--output", out.to_str().unwrap()]);

    let export_path = tmp.path().join("content").join("export.json");
    let edited = EXPORT.replace("\"Oral History of Saigon\"", "\"Hanoi Winters\"");
    fs::write(&export_path, edited).unwrap();

    let mut config = fs::read_to_string(&config_path).unwrap();
    config = config.replace(
        "[site]",
        &format!("index_path = \"{}\"\n\n[site]", out.join("index.json").display()),
    );
    fs::write(&config_path, config).unwrap();

    let (_, stderr, success) = run_archive(&config_path, &["search", "Hanoi"]);
    assert!(!success, "index built before the edit must fail the load");
    assert!(stderr.contains("different corpus"), "stderr: {}", stderr);
}

#[test]
fn test_slug_transliterates() {
    let (stdout, _, success) = run_archive(
        Path::new("/nonexistent/archive.toml"),
        &["slug", "Đà Nẵng & Huế"],
    );
    assert!(success);
    assert_eq!(stdout.trim(), "da-nang-and-hue");
}

#[test]
fn test_malformed_export_is_fatal() {
    let (tmp, config_path) = setup_test_env();
    fs::write(tmp.path().join("content").join("export.json"), "{ not json").unwrap();

    let (_, stderr, success) = run_archive(&config_path, &["search"]);
    assert!(!success);
    assert!(stderr.contains("Malformed content export"));
}

#[test]
fn test_missing_config_fails() {
    let (_, _, success) = run_archive(Path::new("/nonexistent/archive.toml"), &["search"]);
    assert!(!success);
}
