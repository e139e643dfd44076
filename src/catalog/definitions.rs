//! Static query definitions.
//!
//! Templates use `?` placeholders, which both MySQL and SQLite accept.

use super::QueryDefinition;
use crate::selection::{CaseStudyTopic, QUERIES_PER_TOPIC};

pub static TRANSACTION_OVERVIEW: QueryDefinition = QueryDefinition {
    label: "Yearly Transaction Amount (Quarterly Breakdown)",
    sql_template: "SELECT year, quarter, SUM(transaction_amount) AS total_amount \
                   FROM aggregated_transaction GROUP BY year, quarter",
    parameters: &[],
    series_column: Some(1),
};

pub static CATEGORY_INSIGHTS: QueryDefinition = QueryDefinition {
    label: "Transaction Amount by Type",
    sql_template: "SELECT transaction_type, SUM(transaction_amount) AS total_amount \
                   FROM aggregated_transaction GROUP BY transaction_type",
    parameters: &[],
    series_column: None,
};

pub static STATE_WISE_TRENDS: QueryDefinition = QueryDefinition {
    label: "State-Wise Transaction Amount",
    sql_template: "SELECT state, SUM(transaction_amount) AS total_amount \
                   FROM aggregated_transaction WHERE quarter = ? GROUP BY state",
    parameters: &["quarter"],
    series_column: None,
};

const fn case(label: &'static str, sql_template: &'static str) -> QueryDefinition {
    QueryDefinition {
        label,
        sql_template,
        parameters: &[],
        series_column: None,
    }
}

static DECODING_TRANSACTIONS: [QueryDefinition; QUERIES_PER_TOPIC] = [
    case(
        "Total transaction value by state",
        "SELECT state, SUM(Transaction_amount) AS Total_transaction_value \
         FROM aggregated_transaction GROUP BY state ORDER BY Total_transaction_value DESC",
    ),
    case(
        "Total transaction count by state",
        "SELECT state, SUM(Transaction_count) AS Total_transactions \
         FROM aggregated_transaction GROUP BY state ORDER BY Total_transactions DESC",
    ),
    case(
        "Yearly transaction value by state",
        "SELECT year, state, SUM(Transaction_amount) AS Yearly_transaction_value \
         FROM aggregated_transaction GROUP BY year, state \
         ORDER BY year, Yearly_transaction_value DESC",
    ),
    case(
        "Quarterly transaction value by state",
        "SELECT quarter, state, SUM(Transaction_amount) AS Quarterly_transaction_value \
         FROM aggregated_transaction GROUP BY quarter, state \
         ORDER BY quarter, Quarterly_transaction_value DESC",
    ),
    case(
        "Top 5 states by transaction value",
        "SELECT state, SUM(Transaction_amount) AS Total_transaction_value \
         FROM aggregated_transaction GROUP BY state \
         ORDER BY Total_transaction_value DESC LIMIT 5",
    ),
];

static DEVICE_USER_ANALYSIS: [QueryDefinition; QUERIES_PER_TOPIC] = [
    case(
        "User share by device brand",
        "SELECT User_Brand, SUM(User_percentage) AS TotalUsers \
         FROM aggregated_user GROUP BY User_Brand ORDER BY TotalUsers DESC",
    ),
    case(
        "Registered users by device brand",
        "SELECT User_Brand, SUM(User_Count) AS TotalAppOpens \
         FROM aggregated_user GROUP BY User_Brand ORDER BY TotalAppOpens DESC",
    ),
    case(
        "Average app opens per user by brand",
        "SELECT User_Brand, SUM(User_Count) / SUM(User_percentage) AS AvgAppOpensPerUser \
         FROM aggregated_user GROUP BY User_Brand ORDER BY AvgAppOpensPerUser DESC",
    ),
    case(
        "Users by state",
        "SELECT State, SUM(User_Count) AS TotalAppOpens \
         FROM aggregated_user GROUP BY State ORDER BY TotalAppOpens DESC",
    ),
    case(
        "Top 5 brands by engagement",
        "SELECT User_Brand, SUM(User_Count) / SUM(User_percentage) AS EngagementRate \
         FROM aggregated_user GROUP BY User_Brand ORDER BY EngagementRate DESC LIMIT 5",
    ),
];

static INSURANCE_GROWTH_ANALYSIS: [QueryDefinition; QUERIES_PER_TOPIC] = [
    case(
        "Policies sold by state",
        "SELECT State, SUM(Insurance_Count) AS TotalPolicies \
         FROM aggregated_insurance GROUP BY State ORDER BY TotalPolicies DESC",
    ),
    case(
        "Insurance value by state",
        "SELECT State, SUM(Insurance_Amount) AS TotalInsuranceValue \
         FROM aggregated_insurance GROUP BY State ORDER BY TotalInsuranceValue DESC",
    ),
    case(
        "Average policy value by state",
        "SELECT State, SUM(Insurance_Amount) / SUM(Insurance_Count) AS AvgPolicyValue \
         FROM aggregated_insurance GROUP BY State ORDER BY AvgPolicyValue DESC",
    ),
    case(
        "Yearly policies sold by state",
        "SELECT Year, state, SUM(Insurance_Count) AS YearlyPoliciesSold \
         FROM aggregated_insurance GROUP BY Year, State ORDER BY Year, YearlyPoliciesSold DESC",
    ),
    case(
        "Top 5 states by policies sold",
        "SELECT State, SUM(Insurance_Count) AS TotalPolicies \
         FROM aggregated_insurance GROUP BY State ORDER BY TotalPolicies DESC LIMIT 5",
    ),
];

static MARKET_TRANSACTION_ANALYSIS: [QueryDefinition; QUERIES_PER_TOPIC] = [
    case(
        "Transactions by state",
        "SELECT State, SUM(Transaction_count) AS TotalTransactions \
         FROM map_transaction GROUP BY State ORDER BY TotalTransactions DESC",
    ),
    case(
        "Transaction value by state",
        "SELECT State, SUM(Transaction_amount) AS TotalTransactionValue \
         FROM map_transaction GROUP BY State ORDER BY TotalTransactionValue DESC",
    ),
    case(
        "Quarterly transaction value by state",
        "SELECT Quarter, State, SUM(Transaction_amount) AS QuarterlyTransactionValue \
         FROM map_transaction GROUP BY Quarter, State \
         ORDER BY Quarter, QuarterlyTransactionValue DESC",
    ),
    case(
        "Yearly transaction value by state",
        "SELECT Year, State, SUM(Transaction_amount) AS YearlyTransactionValue \
         FROM map_transaction GROUP BY Year, State ORDER BY Year, YearlyTransactionValue DESC",
    ),
    case(
        "Top 5 states by transaction value",
        "SELECT State, SUM(Transaction_amount) AS TotalTransactionValue \
         FROM map_transaction GROUP BY State ORDER BY TotalTransactionValue DESC LIMIT 5",
    ),
];

static USER_GROWTH_STRATEGIES: [QueryDefinition; QUERIES_PER_TOPIC] = [
    case(
        "Registered users by state",
        "SELECT State, SUM(Users_registeredUsers) AS TotalUsers \
         FROM map_user GROUP BY State ORDER BY TotalUsers DESC",
    ),
    case(
        "App opens by state",
        "SELECT State, SUM(Users_appOpens) AS TotalAppOpens \
         FROM map_user GROUP BY State ORDER BY TotalAppOpens DESC",
    ),
    case(
        "Average app-open frequency by state",
        "SELECT State, SUM(Users_appOpens) / SUM(Users_registeredUsers) AS AvgAppOpenFrequency \
         FROM map_user GROUP BY State ORDER BY AvgAppOpenFrequency DESC",
    ),
    case(
        "App opens by state (all time)",
        "SELECT State, SUM(Users_appOpens) AS TotalAppOpens \
         FROM map_user GROUP BY State ORDER BY TotalAppOpens DESC",
    ),
    case(
        "Top 5 states by engagement",
        "SELECT State, SUM(Users_appOpens) / SUM(Users_registeredUsers) AS EngagementRate \
         FROM map_user GROUP BY State ORDER BY EngagementRate DESC LIMIT 5",
    ),
];

/// Returns the five queries of a case-study topic, in menu order.
pub fn case_study(topic: CaseStudyTopic) -> &'static [QueryDefinition; QUERIES_PER_TOPIC] {
    match topic {
        CaseStudyTopic::DecodingTransactions => &DECODING_TRANSACTIONS,
        CaseStudyTopic::DeviceUserAnalysis => &DEVICE_USER_ANALYSIS,
        CaseStudyTopic::InsuranceGrowthAnalysis => &INSURANCE_GROWTH_ANALYSIS,
        CaseStudyTopic::MarketTransactionAnalysis => &MARKET_TRANSACTION_ANALYSIS,
        CaseStudyTopic::UserGrowthStrategies => &USER_GROWTH_STRATEGIES,
    }
}
