//! End-to-end pipeline tests.

use super::Fixture;
use pretty_assertions::assert_eq;
use pulse_insights::dashboard::NoticeLevel;
use pulse_insights::render::CellKind;
use pulse_insights::selection::{CaseStudyTopic, HomeView, QueryOrdinal, Selection};

const TWO_TYPES: &str = "
INSERT INTO aggregated_transaction VALUES (2022, 1, 'goa', 'A', 60, 1);
INSERT INTO aggregated_transaction VALUES (2022, 2, 'goa', 'A', 40, 1);
INSERT INTO aggregated_transaction VALUES (2022, 1, 'goa', 'B', 50, 1);
";

#[tokio::test]
async fn test_category_insights_table_and_chart_agree() {
    let fixture = Fixture::new(TWO_TYPES);
    let presentation = fixture
        .dashboard()
        .show(Selection::Home {
            view: HomeView::CategoryInsights,
        })
        .await;

    assert!(presentation.notices.is_empty());
    assert_eq!(presentation.heading, "Transaction Amount by Type");

    let table = presentation.table.unwrap();
    assert_eq!(table.row_count, 2);
    assert_eq!(table.columns, vec!["transaction_type", "total_amount"]);
    assert_eq!(table.rows[0][0].text, "A");
    assert_eq!(table.rows[0][1].kind, CellKind::Number);

    let chart = presentation.chart.unwrap();
    let bars: Vec<(&str, f64)> = chart
        .bars
        .iter()
        .map(|b| (b.label.as_str(), b.value))
        .collect();
    assert_eq!(bars, vec![("A", 100.0), ("B", 50.0)]);
    assert_eq!(chart.category_axis, "transaction_type");
    assert_eq!(chart.value_axis, "total_amount");
}

#[tokio::test]
async fn test_transaction_overview_labels_year_and_quarter() {
    let fixture = Fixture::new(TWO_TYPES);
    let presentation = fixture.dashboard().show(Selection::default()).await;

    let chart = presentation.chart.unwrap();
    let labels: Vec<&str> = chart.bars.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["2022/1", "2022/2"]);
    assert_eq!(chart.bars[0].value, 110.0);
}

#[tokio::test]
async fn test_empty_result_shows_empty_table() {
    let fixture = Fixture::new("");
    let presentation = fixture
        .dashboard()
        .show(Selection::CaseStudy {
            topic: CaseStudyTopic::UserGrowthStrategies,
            query: QueryOrdinal::FIRST,
        })
        .await;

    assert!(presentation.notices.is_empty());
    assert!(presentation.table.unwrap().is_empty());
    assert!(presentation.chart.unwrap().is_empty());
}

#[tokio::test]
async fn test_query_failure_becomes_error_notice() {
    let fixture = Fixture::new("DROP TABLE map_user;");
    let presentation = fixture
        .dashboard()
        .show(Selection::CaseStudy {
            topic: CaseStudyTopic::UserGrowthStrategies,
            query: QueryOrdinal::try_from(2).unwrap(),
        })
        .await;

    assert!(presentation.table.is_none());
    assert_eq!(presentation.notices.len(), 1);
    assert_eq!(presentation.notices[0].level, NoticeLevel::Error);
    assert_eq!(presentation.notices[0].category, "Query Error");
    assert_eq!(presentation.heading, "User & Growth Strategies - Query 2");
}
