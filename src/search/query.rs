//! Field projection and keyword matching.
//!
//! Every record is reduced to one case-folded search string according to
//! the selected `QueryField`, and the keyword is matched against that
//! string as a plain substring. Missing or malformed fields project to
//! an empty string, which only the empty keyword matches.

use crate::models::{QueryField, Record};

/// Compute the case-folded search string for `record` under `field`.
pub fn project_field(record: &Record, field: QueryField) -> String {
    match field {
        QueryField::All => record.to_compact_json().to_lowercase(),
        QueryField::Licensor => fold(record.licensor()),
        QueryField::Licensee => fold(record.licensee()),
        QueryField::ScopeOfUse => fold_joined(record.scope_of_use()),
        QueryField::Termination => fold_joined(record.termination_grounds()),
        QueryField::GoverningLaw => fold(record.governing_law()),
        QueryField::Unknown => String::new(),
    }
}

/// Whether `keyword` occurs in the projected string, ignoring case.
///
/// The keyword is matched as typed: surrounding whitespace is
/// significant.
pub fn matches_keyword(projected: &str, keyword: &str) -> bool {
    if keyword.is_empty() {
        return true;
    }
    projected.contains(&keyword.to_lowercase())
}

/// Convenience wrapper combining projection and matching.
pub fn record_matches(record: &Record, field: QueryField, keyword: &str) -> bool {
    if keyword.is_empty() {
        return true;
    }
    matches_keyword(&project_field(record, field), keyword)
}

fn fold(value: Option<&str>) -> String {
    value.map(str::to_lowercase).unwrap_or_default()
}

fn fold_joined(values: Option<Vec<&str>>) -> String {
    values
        .map(|items| items.join(" ").to_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        serde_json::from_value(value).expect("record")
    }

    #[test]
    fn licensor_projection_is_case_folded() {
        let r = record(json!({"parties": {"licensor": "Acme Corp"}}));
        assert_eq!(project_field(&r, QueryField::Licensor), "acme corp");
        assert_eq!(project_field(&r, QueryField::Licensee), "");
    }

    #[test]
    fn list_fields_are_space_joined() {
        let r = record(json!({
            "licensing_terms": {"scope_of_use": ["Internal Use", "Resale"]},
            "contract_termination": {"termination_grounds": ["Breach", "Insolvency"]}
        }));
        assert_eq!(
            project_field(&r, QueryField::ScopeOfUse),
            "internal use resale"
        );
        assert_eq!(
            project_field(&r, QueryField::Termination),
            "breach insolvency"
        );
    }

    #[test]
    fn governing_law_reads_nested_dispute_resolution() {
        let r = record(json!({
            "contract_termination": {"dispute_resolution": {"governing_law": "State of New York"}}
        }));
        assert_eq!(
            project_field(&r, QueryField::GoverningLaw),
            "state of new york"
        );
    }

    #[test]
    fn all_projection_covers_unknown_keys() {
        let r = record(json!({"parties": {"licensor": "Acme"}, "Notes": "Renewal PENDING"}));
        let projected = project_field(&r, QueryField::All);
        assert!(projected.contains("acme"));
        assert!(projected.contains("renewal pending"));
        assert!(projected.contains("\"licensor\""));
    }

    #[test]
    fn mixed_lists_match_on_their_string_elements() {
        let r = record(json!({
            "licensing_terms": {"scope_of_use": ["internal use", null]},
            "parties": {"licensor": 42}
        }));
        assert_eq!(project_field(&r, QueryField::ScopeOfUse), "internal use");
        assert!(record_matches(&r, QueryField::ScopeOfUse, "internal"));
    }

    #[test]
    fn all_projection_sees_wrong_typed_values() {
        let r = record(json!({
            "licensing_terms": {"scope_of_use": ["internal use", null]},
            "parties": {"licensor": 42}
        }));
        assert!(record_matches(&r, QueryField::All, "42"));
        assert!(record_matches(&r, QueryField::All, "null"));
        assert!(!record_matches(&r, QueryField::Licensor, "42"));
        assert_eq!(project_field(&r, QueryField::Licensor), "");
    }

    #[test]
    fn unknown_field_projects_to_empty() {
        let r = record(json!({"parties": {"licensor": "Acme"}}));
        assert_eq!(project_field(&r, QueryField::Unknown), "");
        assert!(record_matches(&r, QueryField::Unknown, ""));
        assert!(!record_matches(&r, QueryField::Unknown, "acme"));
    }

    #[test]
    fn keyword_match_ignores_case_but_not_whitespace() {
        assert!(matches_keyword("acme corp", "ACME"));
        assert!(matches_keyword("acme corp", "me co"));
        assert!(!matches_keyword("acme corp", " acme"));
        assert!(matches_keyword("", ""));
        assert!(!matches_keyword("", "a"));
    }
}
