//! Name suggestion behavior, driven through the headless binary.

use super::common::run_json;

#[test]
fn test_typing_shows_first_five_names() {
    let (code, json) = run_json(
        "type:a,assert:contains:abreu\\, jose,assert:contains:altuve\\, jose,assert:not-contains:arenado",
    );

    assert_eq!(code, 0, "Got: {json}");
    assert_eq!(json["state"]["hitter_dropdown"], "open");
    assert_eq!(json["state"]["hitter_suggestions"], 5);
}

#[test]
fn test_prefix_match_ignores_case() {
    let (code, json) = run_json("type:JU,assert:state:hitter_suggestions=1,assert:contains:judge\\, aaron");

    assert_eq!(code, 0, "Got: {json}");
    assert_eq!(json["state"]["hitter_text"], "JU");
}

#[test]
fn test_no_match_shows_nothing() {
    let (code, json) = run_json("type:z,assert:state:hitter_suggestions=0");

    assert_eq!(code, 0, "Got: {json}");
}

#[test]
fn test_click_inside_keeps_list_open() {
    let (code, json) = run_json(
        "type:a,click:5x2,assert:state:hitter_dropdown=open,click:90x25,assert:state:hitter_dropdown=closed",
    );

    assert_eq!(code, 0, "Got: {json}");
    assert_eq!(json["state"]["hitter_text"], "a");
}

#[test]
fn test_keyboard_selection_then_apply() {
    let (code, json) = run_json(
        "type:judge,key:down,key:enter,assert:state:hitter_text=judge\\, aaron,assert:state:hitter_dropdown=closed,key:enter",
    );

    assert_eq!(code, 0, "Got: {json}");
    assert_eq!(json["state"]["record_count"], 2);
}

#[test]
fn test_click_selects_suggestion() {
    // The list starts one row below the input's bottom border
    let (code, json) = run_json("type:a,click:5x6,key:enter");

    assert_eq!(code, 0, "Got: {json}");
    assert_eq!(json["state"]["hitter_text"], "acuna jr., ronald");
    assert_eq!(json["state"]["hitter_dropdown"], "closed");
    assert_eq!(json["state"]["record_count"], 1);
}

#[test]
fn test_focus_change_closes_the_other_list() {
    let (code, json) = run_json(
        "type:a,key:tab,assert:state:hitter_dropdown=closed,type:c,assert:state:pitcher_suggestions=3",
    );

    assert_eq!(code, 0, "Got: {json}");
    assert_eq!(json["state"]["focus"], "pitcher");
    assert_eq!(json["state"]["pitcher_dropdown"], "open");
}

#[test]
fn test_escape_closes_and_editing_reopens() {
    let (code, json) = run_json(
        "type:ab,key:esc,assert:state:hitter_dropdown=closed,key:backspace,assert:state:hitter_dropdown=open",
    );

    assert_eq!(code, 0, "Got: {json}");
    assert_eq!(json["state"]["hitter_suggestions"], 5);
}

#[test]
fn test_both_fields_stay_subscribed() {
    let (code, json) = run_json("type:a,key:tab,type:c,key:tab,assert:state:listeners=2");

    assert_eq!(code, 0, "Got: {json}");
}
