use chrono::{DateTime, Utc};

use crate::models::{Event, EventRepo, EventType, Profile, Repository};

pub fn ts(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .expect("fixture timestamp must be RFC 3339")
}

pub fn repo(name: &str) -> Repository {
    Repository {
        name: name.to_string(),
        description: None,
        language: None,
        size: 0,
        stargazers_count: 0,
        forks_count: 0,
        watchers_count: 0,
        fork: false,
        created_at: ts("2023-01-01T00:00:00Z"),
        updated_at: ts("2023-01-01T00:00:00Z"),
        html_url: format!("https://github.com/octocat/{}", name),
    }
}

pub fn lang_repo(name: &str, language: &str, size: u64) -> Repository {
    Repository {
        language: Some(language.to_string()),
        size,
        ..repo(name)
    }
}

pub fn profile(login: &str) -> Profile {
    Profile {
        login: login.to_string(),
        name: None,
        avatar_url: format!("https://avatars.example/{}", login),
        html_url: format!("https://github.com/{}", login),
        bio: None,
        company: None,
        location: None,
        public_repos: 0,
        followers: 0,
        following: 0,
        created_at: ts("2011-01-25T18:44:36Z"),
    }
}

pub fn event(kind: EventType, at: &str) -> Event {
    Event {
        kind,
        repo: EventRepo {
            name: "octocat/hello-world".to_string(),
        },
        created_at: ts(at),
    }
}
