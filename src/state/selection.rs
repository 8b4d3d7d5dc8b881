use serde::{Deserialize, Serialize};

pub const ITEMS_PER_PAGE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Stars,
    Forks,
    Updated,
    Created,
}

impl SortKey {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "forks" => SortKey::Forks,
            "updated" => SortKey::Updated,
            "created" => SortKey::Created,
            _ => SortKey::Stars,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Stars => "stars",
            SortKey::Forks => "forks",
            SortKey::Updated => "updated",
            SortKey::Created => "created",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityFilter {
    #[default]
    All,
    Push,
    Pr,
    Issues,
}

impl ActivityFilter {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "all" => Some(ActivityFilter::All),
            "push" => Some(ActivityFilter::Push),
            "pr" => Some(ActivityFilter::Pr),
            "issues" => Some(ActivityFilter::Issues),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Pie,
    Bar,
}

impl ChartKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "pie" => Some(ChartKind::Pie),
            "bar" => Some(ChartKind::Bar),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeWindow {
    #[serde(rename = "7d")]
    Week,
    #[default]
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
}

impl TimeWindow {
    pub fn days(&self) -> u32 {
        match self {
            TimeWindow::Week => 7,
            TimeWindow::Month => 30,
            TimeWindow::Quarter => 90,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "7d" => Some(TimeWindow::Week),
            "30d" => Some(TimeWindow::Month),
            "90d" => Some(TimeWindow::Quarter),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    pub sort: SortKey,
    pub activity_filter: ActivityFilter,
    pub chart_kind: ChartKind,
    pub time_window: TimeWindow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_sort_defaults_to_stars() {
        assert_eq!(SortKey::parse("size"), SortKey::Stars);
        assert_eq!(SortKey::parse("UPDATED"), SortKey::Updated);
    }

    #[test]
    fn test_time_window_days() {
        assert_eq!(TimeWindow::parse("7d").map(|w| w.days()), Some(7));
        assert_eq!(TimeWindow::parse("90d").map(|w| w.days()), Some(90));
        assert_eq!(TimeWindow::parse("1y"), None);
        assert_eq!(TimeWindow::default().days(), 30);
    }

    #[test]
    fn test_window_serializes_like_the_ui_values() {
        let json = serde_json::to_string(&TimeWindow::Week).unwrap();
        assert_eq!(json, "\"7d\"");
    }
}
