//! Integration tests for headless mode itself.

use super::common::{run_headless, run_json};

#[test]
fn test_headless_basic_execution() {
    let (code, stdout, _) = run_headless(&["--events", "key:esc"]);

    assert_eq!(code, 0, "Expected exit code 0");
    assert!(stdout.contains("Events: 1 executed"), "Got: {stdout}");
    assert!(stdout.contains("bbviz v"));
}

#[test]
fn test_initial_query_runs_on_start() {
    let (code, json) = run_json("assert:state:record_count=13");

    assert_eq!(code, 0);
    assert_eq!(json["state"]["record_count"], 13);
    assert_eq!(json["state"]["focus"], "hitter");
    assert_eq!(json["state"]["tab"], "all_batted_balls");
    assert_eq!(json["assertions"]["passed"], 1);
}

#[test]
fn test_headless_assertion_fail() {
    let (code, json) = run_json("assert:contains:Kershaw");

    assert_eq!(code, 1, "Should exit with code 1 on assertion failure");
    assert_eq!(json["assertions"]["passed"], 0);
    assert_eq!(json["assertions"]["failed"], 1);
    assert_eq!(json["assertions"]["failures"][0], "assert:contains:Kershaw");
}

#[test]
fn test_headless_custom_size() {
    let (code, stdout, _) = run_headless(&[
        "--events",
        "key:esc",
        "--size",
        "120x40",
        "--output",
        "json",
    ]);

    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let lines = json["screen_lines"].as_array().unwrap();
    assert!(lines.len() <= 40);
    assert!(lines.iter().any(|l| l.as_str().unwrap_or_default().contains("Batter")));
}

#[test]
fn test_headless_frames_output() {
    let (code, stdout, _) = run_headless(&["--events", "type:a,type:b", "--output", "frames"]);

    assert_eq!(code, 0);
    assert!(stdout.contains("--- frame 0: initial ---"));
    assert!(stdout.contains("--- frame 1: type:a ---"));
    assert!(stdout.contains("--- frame 2: type:b ---"));
    assert!(stdout.contains("hitter=open("), "Got: {stdout}");
    assert!(stdout.contains("Total: 3 frames"));
}

#[test]
fn test_headless_requires_events_or_script() {
    let (code, stdout, stderr) = run_headless(&[]);

    assert_eq!(code, 1, "Should fail without events or script");
    let combined = format!("{stdout}{stderr}");
    assert!(
        combined.contains("requires --events or --script"),
        "Should show error message. Got: {combined}"
    );
}

#[test]
fn test_headless_script_file() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("flow.txt");
    std::fs::write(
        &script,
        "# Move to the pitcher field\nkey:tab\nassert:state:focus=pitcher\n",
    )
    .unwrap();

    let (code, stdout, _) = run_headless(&["--script", script.to_str().unwrap()]);
    assert_eq!(code, 0, "Got: {stdout}");
    assert!(stdout.contains("Assertions: 1 passed, 0 failed"));
}

#[test]
fn test_headless_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("result.json");

    let (code, stdout, _) = run_headless(&[
        "--events",
        "key:f3",
        "--output",
        "json",
        "--output-file",
        out.to_str().unwrap(),
    ]);

    assert_eq!(code, 0);
    assert!(stdout.is_empty());
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["state"]["tab"], "readme");
}

#[test]
fn test_fail_fast_stops_at_first_failure() {
    let (code, stdout, _) = run_headless(&[
        "--events",
        "assert:state:focus=records,key:tab,assert:state:focus=pitcher",
        "--fail-fast",
    ]);

    assert_eq!(code, 1);
    assert!(stdout.contains("Events: 1 executed"), "Got: {stdout}");
}

#[test]
fn test_tabs_switch_with_function_keys() {
    let (code, json) = run_json(
        "key:f2,assert:contains:Spray Chart (13 plotted),key:f3,assert:contains:bbviz explores,key:f1",
    );

    assert_eq!(code, 0, "Got: {json}");
    assert_eq!(json["state"]["tab"], "all_batted_balls");
}

#[test]
fn test_quit_key_stops_the_script() {
    let (code, json) = run_json("key:ctrl+q,key:tab");

    assert_eq!(code, 0);
    assert_eq!(json["state"]["running"], false);
    assert_eq!(json["events_executed"], 1);
}

#[test]
fn test_chart_tabs() {
    let (code, json) = run_json(
        "key:f4,assert:contains:Launch Angle vs Exit Velocity (13),assert:contains:Exit Speed vs Hit Distance (13),key:f5,assert:contains:(13 binned)",
    );

    assert_eq!(code, 0, "Got: {json}");
    assert_eq!(json["state"]["tab"], "heatmaps");
}

#[test]
fn test_clicking_a_tab_label() {
    let (code, json) = run_json("click:70x0,assert:state:tab=scatter_plots");

    assert_eq!(code, 0, "Got: {json}");
}

#[test]
fn test_ballpark_keys_on_spray_chart() {
    let (code, json) = run_json(
        "key:ctrl+n,assert:state:ballpark=Truist Park (Braves),key:f2,key:ctrl+n,assert:contains:Oriole Park (Orioles),key:ctrl+p,key:ctrl+p",
    );

    assert_eq!(code, 0, "Got: {json}");
    assert_eq!(json["state"]["ballpark"], "Nationals Park (Nationals)");
    assert_eq!(json["state"]["hitter_text"], "");
}
