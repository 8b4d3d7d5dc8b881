#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSearchFilters {
    pub location: Option<String>,
    pub language: Option<String>,
    pub min_followers: Option<u32>,
    pub min_repos: Option<u32>,
    pub company: Option<String>,
}

impl UserSearchFilters {
    pub fn is_empty(&self) -> bool {
        self.to_query().is_empty()
    }

    // Zero thresholds and blank text add nothing.
    pub fn to_query(&self) -> String {
        let mut parts = Vec::new();

        if let Some(location) = non_blank(&self.location) {
            parts.push(format!("location:{}", location));
        }
        if let Some(language) = non_blank(&self.language) {
            parts.push(format!("language:{}", language));
        }
        if let Some(followers) = self.min_followers.filter(|n| *n > 0) {
            parts.push(format!("followers:>{}", followers));
        }
        if let Some(repos) = self.min_repos.filter(|n| *n > 0) {
            parts.push(format!("repos:>{}", repos));
        }
        if let Some(company) = non_blank(&self.company) {
            parts.push(format!("company:{}", company));
        }

        parts.join(" ")
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
