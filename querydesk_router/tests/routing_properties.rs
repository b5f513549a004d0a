//! Routing behaviour over the default table, as seen by callers.

use querydesk_core::ArgValue;
use querydesk_router::{PatternRouter, RouterError};

fn router() -> PatternRouter {
    PatternRouter::with_defaults().unwrap()
}

#[test]
fn ticket_status_variants() {
    let r = router();
    for q in [
        "What is the status of ticket 83742",
        "What is the status of ticket 83742?",
        "  WHAT IS THE STATUS OF TICKET 83742  ",
        "hey, what is status of ticket 83742 please",
    ] {
        let call = r.parse_query(q).unwrap();
        assert_eq!(call.name, "get_ticket_status", "{q}");
        assert_eq!(call.arguments.to_json_string().unwrap(), r#"{"ticket_id": 83742}"#);
    }
}

#[test]
fn department_is_always_uppercase() {
    let r = router();
    for q in [
        "15801 reported in IT department",
        "15801 reported in it department",
        "15801 reported for the Finance department",
        "Report office issue 45321 for the Facilities department",
        "report office issue 45321 in hr",
    ] {
        let call = r.parse_query(q).unwrap();
        assert_eq!(call.name, "report_office_issue", "{q}");
        let dept = call
            .arguments
            .get("department")
            .and_then(ArgValue::as_text)
            .unwrap();
        assert_eq!(dept, dept.to_uppercase(), "{q}");
    }
}

#[test]
fn argument_string_matches_wire_format() {
    let call = router()
        .parse_query("Calculate performance bonus for employee 10056 for 2025")
        .unwrap();
    assert_eq!(
        call.arguments.to_json_string().unwrap(),
        r#"{"employee_id": 10056,"current_year": 2025}"#
    );

    let call = router()
        .parse_query("Schedule a meeting on 2025-02-15 at 14:00 in Room A")
        .unwrap();
    assert_eq!(
        call.arguments.to_json_string().unwrap(),
        r#"{"date": "2025-02-15","time": "14:00","meeting_room": "room a"}"#
    );
}

#[test]
fn overflow_is_reported_not_swallowed() {
    let err = router()
        .parse_query("Show my expense balance for employee 99999999999999999999")
        .unwrap_err();
    assert!(err.is_query_error());
    assert!(matches!(err, RouterError::InvalidInteger { .. }));
}

#[test]
fn empty_query_is_unknown() {
    let call = router().parse_query("").unwrap();
    assert!(call.is_unknown());
}
