//! User selections for the dashboard.
//!
//! A [`Selection`] is a closed enumeration: every value of the type names
//! exactly one catalogued query. Raw input (CLI flags, config) arrives as a
//! [`SelectionState`] and is validated into a `Selection` before anything
//! else happens.

use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of predefined queries per case-study topic.
pub const QUERIES_PER_TOPIC: usize = 5;

/// Dashboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    #[default]
    Home,
    CaseStudy,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::Home, Page::CaseStudy];

    /// Returns the page title shown in navigation.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::CaseStudy => "Business Case Study",
        }
    }
}

impl FromStr for Page {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "home" => Ok(Self::Home),
            "case-study" | "business-case-study" | "casestudy" => Ok(Self::CaseStudy),
            _ => Err(DashboardError::invalid_selection("page", s)),
        }
    }
}

/// A quarter of the year, always in `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Quarter(u8);

impl Quarter {
    pub const FIRST: Quarter = Quarter(1);

    /// Creates a quarter, rejecting values outside `1..=4`.
    pub fn new(value: u8) -> Result<Self> {
        if (1..=4).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DashboardError::invalid_selection("quarter", value.to_string()))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Returns all four quarters in order.
    pub fn all() -> impl Iterator<Item = Quarter> {
        (1..=4).map(Quarter)
    }

    /// Returns the next quarter, wrapping from Q4 to Q1.
    pub fn next(self) -> Self {
        Self(self.0 % 4 + 1)
    }

    /// Returns the previous quarter, wrapping from Q1 to Q4.
    pub fn prev(self) -> Self {
        Self((self.0 + 2) % 4 + 1)
    }
}

impl TryFrom<u8> for Quarter {
    type Error = DashboardError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Quarter> for u8 {
    fn from(q: Quarter) -> Self {
        q.0
    }
}

impl FromStr for Quarter {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let trimmed = trimmed
            .strip_prefix('Q')
            .or_else(|| trimmed.strip_prefix('q'))
            .unwrap_or(trimmed);
        trimmed
            .parse::<u8>()
            .ok()
            .and_then(|v| Self::new(v).ok())
            .ok_or_else(|| DashboardError::invalid_selection("quarter", s))
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One-based position of a query within a case-study topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct QueryOrdinal(u8);

impl QueryOrdinal {
    pub const FIRST: QueryOrdinal = QueryOrdinal(1);

    /// Creates an ordinal, rejecting values outside `1..=5`.
    pub fn new(value: u8) -> Result<Self> {
        if (1..=QUERIES_PER_TOPIC as u8).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DashboardError::invalid_selection("query", value.to_string()))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index into a topic's query list.
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    pub fn all() -> impl Iterator<Item = QueryOrdinal> {
        (1..=QUERIES_PER_TOPIC as u8).map(QueryOrdinal)
    }

    pub fn next(self) -> Self {
        Self(self.0 % QUERIES_PER_TOPIC as u8 + 1)
    }

    pub fn prev(self) -> Self {
        let n = QUERIES_PER_TOPIC as u8;
        Self((self.0 + n - 2) % n + 1)
    }
}

impl TryFrom<u8> for QueryOrdinal {
    type Error = DashboardError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<QueryOrdinal> for u8 {
    fn from(o: QueryOrdinal) -> Self {
        o.0
    }
}

impl FromStr for QueryOrdinal {
    type Err = DashboardError;

    /// Accepts `3` as well as the UI form `Query 3`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("Query")
            .or_else(|| trimmed.strip_prefix("query"))
            .map(str::trim)
            .unwrap_or(trimmed);
        digits
            .parse::<u8>()
            .ok()
            .and_then(|v| Self::new(v).ok())
            .ok_or_else(|| DashboardError::invalid_selection("query", s))
    }
}

impl fmt::Display for QueryOrdinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Query {}", self.0)
    }
}

/// Visualizations available on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HomeView {
    TransactionOverview,
    CategoryInsights,
    StateWiseTrends(Quarter),
}

impl HomeView {
    /// Navigation labels, in display order.
    pub const LABELS: [&'static str; 3] =
        ["Transaction Overview", "Category Insights", "State-Wise Trends"];

    pub fn label(&self) -> &'static str {
        Self::LABELS[self.position()]
    }

    /// Position of this view in [`HomeView::LABELS`].
    pub fn position(&self) -> usize {
        match self {
            Self::TransactionOverview => 0,
            Self::CategoryInsights => 1,
            Self::StateWiseTrends(_) => 2,
        }
    }

    /// Builds the view at `position`, using `quarter` when the view needs one.
    pub fn at(position: usize, quarter: Quarter) -> Option<Self> {
        match position {
            0 => Some(Self::TransactionOverview),
            1 => Some(Self::CategoryInsights),
            2 => Some(Self::StateWiseTrends(quarter)),
            _ => None,
        }
    }
}

/// The five fixed analytical topics of the case-study page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseStudyTopic {
    DecodingTransactions,
    DeviceUserAnalysis,
    InsuranceGrowthAnalysis,
    MarketTransactionAnalysis,
    UserGrowthStrategies,
}

impl CaseStudyTopic {
    pub const ALL: [CaseStudyTopic; 5] = [
        Self::DecodingTransactions,
        Self::DeviceUserAnalysis,
        Self::InsuranceGrowthAnalysis,
        Self::MarketTransactionAnalysis,
        Self::UserGrowthStrategies,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::DecodingTransactions => "Decoding Transactions",
            Self::DeviceUserAnalysis => "Device & User Analysis",
            Self::InsuranceGrowthAnalysis => "Insurance & Growth Analysis",
            Self::MarketTransactionAnalysis => "Market Transaction Analysis",
            Self::UserGrowthStrategies => "User & Growth Strategies",
        }
    }

    pub fn position(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }
}

impl FromStr for CaseStudyTopic {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|topic| normalize(topic.label()) == wanted)
            .ok_or_else(|| DashboardError::invalid_selection("topic", s))
    }
}

/// A complete, valid dashboard selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "kebab-case")]
pub enum Selection {
    Home { view: HomeView },
    CaseStudy {
        topic: CaseStudyTopic,
        query: QueryOrdinal,
    },
}

impl Selection {
    pub fn page(&self) -> Page {
        match self {
            Self::Home { .. } => Page::Home,
            Self::CaseStudy { .. } => Page::CaseStudy,
        }
    }

    /// Enumerates every valid selection, home views first.
    pub fn all() -> Vec<Selection> {
        let mut selections = vec![
            Self::Home {
                view: HomeView::TransactionOverview,
            },
            Self::Home {
                view: HomeView::CategoryInsights,
            },
        ];
        selections.extend(Quarter::all().map(|q| Self::Home {
            view: HomeView::StateWiseTrends(q),
        }));
        for topic in CaseStudyTopic::ALL {
            selections.extend(QueryOrdinal::all().map(|query| Self::CaseStudy { topic, query }));
        }
        selections
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::Home {
            view: HomeView::TransactionOverview,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home {
                view: HomeView::StateWiseTrends(q),
            } => write!(f, "Home / State-Wise Trends / Q{q}"),
            Self::Home { view } => write!(f, "Home / {}", view.label()),
            Self::CaseStudy { topic, query } => write!(f, "{} / {query}", topic.label()),
        }
    }
}

/// Raw, unvalidated selection as entered by a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub page: String,
    pub view_or_topic: String,
    pub ordinal_or_quarter: Option<String>,
}

impl SelectionState {
    pub fn new(
        page: impl Into<String>,
        view_or_topic: impl Into<String>,
        ordinal_or_quarter: Option<String>,
    ) -> Self {
        Self {
            page: page.into(),
            view_or_topic: view_or_topic.into(),
            ordinal_or_quarter,
        }
    }
}

impl TryFrom<&SelectionState> for Selection {
    type Error = DashboardError;

    fn try_from(state: &SelectionState) -> Result<Self> {
        match state.page.parse::<Page>()? {
            Page::Home => {
                let view = match normalize(&state.view_or_topic).as_str() {
                    "transaction-overview" => HomeView::TransactionOverview,
                    "category-insights" => HomeView::CategoryInsights,
                    "state-wise-trends" => {
                        let raw = state
                            .ordinal_or_quarter
                            .as_deref()
                            .ok_or_else(|| DashboardError::invalid_selection("quarter", ""))?;
                        HomeView::StateWiseTrends(raw.parse()?)
                    }
                    _ => {
                        return Err(DashboardError::invalid_selection(
                            "view",
                            &state.view_or_topic,
                        ))
                    }
                };
                Ok(Self::Home { view })
            }
            Page::CaseStudy => {
                let topic = state.view_or_topic.parse()?;
                let raw = state
                    .ordinal_or_quarter
                    .as_deref()
                    .ok_or_else(|| DashboardError::invalid_selection("query", ""))?;
                Ok(Self::CaseStudy {
                    topic,
                    query: raw.parse()?,
                })
            }
        }
    }
}

/// Lowercases and collapses punctuation so `"Device & User Analysis"`,
/// `"device-user-analysis"` and `"device_user_analysis"` compare equal.
fn normalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        if !out.is_empty() {
            out.push('-');
        }
        out.push_str(&word.to_ascii_lowercase());
    }
    out
}
