//! Routing rule definitions.
//!
//! Rules are plain data so a table can be supplied by the caller; the
//! default table covers the office helpdesk functions.

use serde::{Deserialize, Serialize};

/// Declared type of a captured parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    Integer,
    Text,
}

/// One routing rule: a regex whose capture groups map positionally onto
/// `params`, each converted according to the matching entry in `types`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternRule {
    /// Regex searched (case-insensitively) against the normalized query.
    pub pattern: String,

    /// Function name reported on match.
    pub name: String,

    /// Parameter names, one per capture group.
    pub params: Vec<String>,

    /// Parameter types, parallel to `params`.
    pub types: Vec<ParamType>,
}

impl PatternRule {
    #[must_use]
    pub fn new(pattern: &str, name: &str, params: &[(&str, ParamType)]) -> Self {
        Self {
            pattern: pattern.to_string(),
            name: name.to_string(),
            params: params.iter().map(|(p, _)| (*p).to_string()).collect(),
            types: params.iter().map(|(_, t)| *t).collect(),
        }
    }
}

/// The default rule table. Order matters: the first matching rule wins.
#[must_use]
pub fn default_rules() -> Vec<PatternRule> {
    use ParamType::{Integer, Text};

    vec![
        // "15801 reported in IT department"
        PatternRule::new(
            r"^([0-9]+)\s+reported\s+(?:in|for|to)\s+(?:the\s+)?(.+?)(?:\s+department)?$",
            "report_office_issue",
            &[("issue_code", Integer), ("department", Text)],
        ),
        // "Report office issue 45321 for the Facilities department"
        PatternRule::new(
            r"report\s+office\s+issue\s+([0-9]+)\s+(?:for|in|to)\s+(?:the\s+)?(.+?)(?:\s+department)?$",
            "report_office_issue",
            &[("issue_code", Integer), ("department", Text)],
        ),
        PatternRule::new(
            r"what\s+is\s+(?:the\s+)?status\s+of\s+ticket\s+([0-9]+)",
            "get_ticket_status",
            &[("ticket_id", Integer)],
        ),
        PatternRule::new(
            r"schedule\s+(?:a\s+)?meeting\s+on\s+([0-9-]+)\s+at\s+([0-9:]+)\s+in\s+(.+?)$",
            "schedule_meeting",
            &[("date", Text), ("time", Text), ("meeting_room", Text)],
        ),
        PatternRule::new(
            r"show\s+(?:my\s+)?expense\s+balance\s+for\s+employee\s+([0-9]+)",
            "get_expense_balance",
            &[("employee_id", Integer)],
        ),
        PatternRule::new(
            r"calculate\s+performance\s+bonus\s+for\s+employee\s+([0-9]+)\s+for\s+([0-9]{4})",
            "calculate_performance_bonus",
            &[("employee_id", Integer), ("current_year", Integer)],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_have_parallel_params_and_types() {
        for rule in default_rules() {
            assert_eq!(rule.params.len(), rule.types.len(), "{}", rule.name);
        }
    }

    #[test]
    fn office_issue_rules_come_first() {
        let rules = default_rules();
        assert_eq!(rules[0].name, "report_office_issue");
        assert_eq!(rules[1].name, "report_office_issue");
        assert_eq!(rules.len(), 6);
    }

    #[test]
    fn param_type_deserializes_snake_case() {
        let rule: PatternRule = serde_json::from_str(
            r#"{"pattern":"x(\\d+)","name":"f","params":["n"],"types":["integer"]}"#,
        )
        .unwrap();
        assert_eq!(rule.types, vec![ParamType::Integer]);
    }
}
