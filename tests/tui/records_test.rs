//! Records table, details panel and filter tests, driven through the
//! headless binary.

use super::common::run_json;

#[test]
fn test_hover_settles_into_details() {
    let (code, json) = run_json(
        "hover:40x3,assert:state:hovered=none,wait:250ms,assert:state:hovered=0,assert:contains:Batter: Judge",
    );

    assert_eq!(code, 0, "Got: {json}");
}

#[test]
fn test_leaving_the_table_clears_details() {
    let (code, json) = run_json(
        "hover:40x4,wait:250ms,assert:state:hovered=1,hover:90x25,assert:state:hovered=none",
    );

    assert_eq!(code, 0, "Got: {json}");
    assert!(json["screen"]
        .as_str()
        .unwrap_or_default()
        .contains("Hover over a record"));
}

#[test]
fn test_click_opens_record_link() {
    let (code, json) = run_json("click:40x4");

    assert_eq!(code, 0, "Got: {json}");
    assert_eq!(json["state"]["last_link"], "https://video.example.com/plays/1002");
}

#[test]
fn test_keyboard_navigation_in_records() {
    let (code, json) = run_json(
        "key:backtab,assert:state:focus=records,key:down,assert:state:hovered=0,key:end,assert:state:hovered=12,key:home,key:down,key:enter",
    );

    assert_eq!(code, 0, "Got: {json}");
    assert_eq!(json["state"]["last_link"], "https://video.example.com/plays/1002");
}

#[test]
fn test_outcome_filter() {
    let (code, json) = run_json(
        "key:tab,key:tab,key:tab,key:tab,key:tab,key:tab,assert:state:focus=play_outcome,key:right,key:enter",
    );

    assert_eq!(code, 0, "Got: {json}");
    assert_eq!(json["state"]["record_count"], 3);
    assert!(json["screen"].as_str().unwrap_or_default().contains("HomeRun"));
}

#[test]
fn test_min_exit_speed_filter() {
    let (code, json) = run_json("key:tab,key:tab,key:end,key:backspace,type:100,key:enter");

    assert_eq!(code, 0, "Got: {json}");
    assert_eq!(json["state"]["focus"], "min_exit_speed");
    assert_eq!(json["state"]["record_count"], 6);
}

#[test]
fn test_unparseable_bound_matches_nothing() {
    let (code, json) = run_json(
        "key:tab,key:tab,type:x,key:enter,assert:contains:No batted balls match these filters.",
    );

    assert_eq!(code, 0, "Got: {json}");
    assert_eq!(json["state"]["record_count"], 0);
}

#[test]
fn test_apply_button_click() {
    let (code, json) = run_json("type:soto,key:esc,click:5x23");

    assert_eq!(code, 0, "Got: {json}");
    assert_eq!(json["state"]["record_count"], 1);
    assert_eq!(json["state"]["focus"], "apply");
}
