//! Catalog resolution tests.

use pretty_assertions::assert_eq;
use pulse_insights::catalog::{self, TemplateVerifier};
use pulse_insights::db::Value;
use pulse_insights::error::DashboardError;
use pulse_insights::selection::{
    CaseStudyTopic, HomeView, Quarter, QueryOrdinal, Selection, SelectionState,
};

#[test]
fn test_every_catalogued_query_verifies() {
    assert_eq!(catalog::verify_catalog().unwrap(), 28);
}

#[test]
fn test_every_selection_resolves_to_a_verified_query() {
    let verifier = TemplateVerifier::new();
    let selections = Selection::all();
    assert_eq!(selections.len(), 31);

    for selection in selections {
        let query = catalog::resolve(selection);
        let report = verifier.verify(query.definition).unwrap();
        assert_eq!(report.placeholders, query.params.len(), "{selection}");
        assert!(report.output_columns >= 2, "{selection}");
    }
}

#[test]
fn test_quarter_is_bound_not_spliced() {
    let quarter = Quarter::try_from(3).unwrap();
    let query = catalog::resolve(Selection::Home {
        view: HomeView::StateWiseTrends(quarter),
    });

    assert_eq!(query.params, vec![Value::Int(3)]);
    assert!(query.sql().contains("quarter = ?"));
    assert!(!query.sql().contains('3'));
    assert_eq!(query.heading, "State-Wise Transaction Amount for Quarter 3");
}

#[test]
fn test_resolution_is_deterministic() {
    for selection in Selection::all() {
        let first = catalog::resolve(selection);
        let second = catalog::resolve(selection);
        assert_eq!(first.sql(), second.sql());
        assert_eq!(first.params, second.params);
    }
}

#[test]
fn test_case_study_ordinal_out_of_range() {
    let state = SelectionState::new("case-study", "Decoding Transactions", Some("6".into()));
    let err = catalog::resolve_state(&state).unwrap_err();

    assert_eq!(
        err,
        DashboardError::InvalidSelection {
            field: "query",
            value: "6".to_string()
        }
    );
}

#[test]
fn test_unknown_topic_is_rejected() {
    let state = SelectionState::new("case-study", "Crypto Analysis", Some("1".into()));
    assert!(matches!(
        catalog::resolve_state(&state),
        Err(DashboardError::InvalidSelection { field: "topic", .. })
    ));
}

#[test]
fn test_quarter_outside_range_is_rejected() {
    for raw in ["0", "5", "3; DROP TABLE map_user", ""] {
        let state = SelectionState::new("home", "state-wise-trends", Some(raw.to_string()));
        assert!(
            matches!(
                catalog::resolve_state(&state),
                Err(DashboardError::InvalidSelection { field: "quarter", .. })
            ),
            "{raw:?}"
        );
    }
}

#[test]
fn test_templates_keep_the_dashboard_sql() {
    let overview = catalog::resolve(Selection::default());
    assert!(overview.sql().ends_with("GROUP BY year, quarter"));

    let yearly_policies = catalog::resolve(Selection::CaseStudy {
        topic: CaseStudyTopic::InsuranceGrowthAnalysis,
        query: QueryOrdinal::try_from(4).unwrap(),
    });
    assert!(yearly_policies
        .sql()
        .starts_with("SELECT Year, state, SUM(Insurance_Count) AS YearlyPoliciesSold"));
}
