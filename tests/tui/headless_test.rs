//! Headless rendering tests.

use crate::integration::Fixture;
use pulse_insights::dashboard::Notice;
use pulse_insights::error::DashboardError;
use pulse_insights::selection::{CaseStudyTopic, HomeView, QueryOrdinal, Selection};
use pulse_insights::tui::headless::{self, HeadlessConfig, HeadlessOutput, OutputFormat};

fn config(output_format: OutputFormat) -> HeadlessConfig {
    HeadlessConfig {
        width: 140,
        height: 40,
        output_format,
    }
}

#[tokio::test]
async fn test_screen_shows_heading_table_and_chart() {
    let fixture = Fixture::sample();
    let result = headless::run(
        &fixture.dashboard(),
        Selection::Home {
            view: HomeView::CategoryInsights,
        },
        Vec::new(),
        &config(OutputFormat::Text),
    )
    .await
    .unwrap();

    let screen = HeadlessOutput::new(OutputFormat::Text).format(&result);
    assert!(screen.contains("Transaction Amount by Type"));
    assert!(screen.contains("transaction_type"));
    assert!(screen.contains("Recharge & bill payments"));
    assert!(screen.contains("Peer-to-peer payments"));
    assert!(screen.contains("300"));
}

#[tokio::test]
async fn test_missing_asset_warning_is_shown() {
    let fixture = Fixture::sample();
    let warning = DashboardError::missing_asset("GeoJSON file not found at india_state.geojson");

    let result = headless::run(
        &fixture.dashboard(),
        Selection::default(),
        vec![Notice::from(&warning)],
        &config(OutputFormat::Text),
    )
    .await
    .unwrap();

    assert!(result.screen.contains("GeoJSON file not found"));
    assert!(result.presentation.table.is_some());
}

#[tokio::test]
async fn test_json_output_carries_presentation() {
    let fixture = Fixture::sample();
    let result = headless::run(
        &fixture.dashboard(),
        Selection::Home {
            view: HomeView::CategoryInsights,
        },
        Vec::new(),
        &config(OutputFormat::Json),
    )
    .await
    .unwrap();

    let json = HeadlessOutput::new(OutputFormat::Json).format(&result);
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed["presentation"]["selection"]["page"], "home");
    assert_eq!(parsed["presentation"]["table"]["row_count"], 2);
    assert_eq!(
        parsed["presentation"]["chart"]["bars"].as_array().unwrap().len(),
        2
    );
    assert!(parsed["screen_lines"].as_array().unwrap().len() > 1);
}

#[tokio::test]
async fn test_long_chart_reports_visible_range() {
    let rows: String = (0..40)
        .map(|i| format!("INSERT INTO map_transaction VALUES ('state-{i:02}', 2022, 1, 10, {i});\n"))
        .collect();
    let fixture = Fixture::new(&rows);

    let result = headless::run(
        &fixture.dashboard(),
        Selection::CaseStudy {
            topic: CaseStudyTopic::MarketTransactionAnalysis,
            query: QueryOrdinal::FIRST,
        },
        Vec::new(),
        &config(OutputFormat::Text),
    )
    .await
    .unwrap();

    assert_eq!(result.presentation.chart.as_ref().unwrap().len(), 40);
    assert!(result.screen.contains("of 40]"));
}
