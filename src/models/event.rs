use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    Push,
    Create,
    Watch,
    Fork,
    Issues,
    PullRequest,
    Release,
    Public,
    Delete,
    Other(String),
}

impl From<String> for EventType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "PushEvent" => EventType::Push,
            "CreateEvent" => EventType::Create,
            "WatchEvent" => EventType::Watch,
            "ForkEvent" => EventType::Fork,
            "IssuesEvent" => EventType::Issues,
            "PullRequestEvent" => EventType::PullRequest,
            "ReleaseEvent" => EventType::Release,
            "PublicEvent" => EventType::Public,
            "DeleteEvent" => EventType::Delete,
            _ => EventType::Other(raw),
        }
    }
}

impl From<EventType> for String {
    fn from(kind: EventType) -> Self {
        kind.as_api_str().to_string()
    }
}

impl EventType {
    pub fn as_api_str(&self) -> &str {
        match self {
            EventType::Push => "PushEvent",
            EventType::Create => "CreateEvent",
            EventType::Watch => "WatchEvent",
            EventType::Fork => "ForkEvent",
            EventType::Issues => "IssuesEvent",
            EventType::PullRequest => "PullRequestEvent",
            EventType::Release => "ReleaseEvent",
            EventType::Public => "PublicEvent",
            EventType::Delete => "DeleteEvent",
            EventType::Other(raw) => raw,
        }
    }

    pub fn description(&self) -> String {
        match self {
            EventType::Push => "Pushed code to".to_string(),
            EventType::Create => "Created".to_string(),
            EventType::Watch => "Starred".to_string(),
            EventType::Fork => "Forked".to_string(),
            EventType::Issues => "Opened issue in".to_string(),
            EventType::PullRequest => "Created pull request in".to_string(),
            EventType::Release => "Published release in".to_string(),
            EventType::Public => "Made public".to_string(),
            EventType::Delete => "Deleted branch in".to_string(),
            EventType::Other(raw) => raw.replace("Event", ""),
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_api_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRepo {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: EventType,
    pub repo: EventRepo,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn repo_name(&self) -> &str {
        &self.repo.name
    }
}
