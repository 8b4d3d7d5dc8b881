use std::cmp::Ordering;

use serde::Serialize;

use crate::models::Repository;
use crate::state::selection::{SortKey, ITEMS_PER_PAGE};

const PAGE_WINDOW: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoQuery {
    pub query: String,
    pub sort: SortKey,
    pub page: usize,
}

pub fn filter_repositories<'a>(repos: &'a [Repository], query: &str) -> Vec<&'a Repository> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return repos.iter().collect();
    }

    repos
        .iter()
        .filter(|repo| {
            repo.name.to_lowercase().contains(&needle)
                || repo
                    .description
                    .as_deref()
                    .map(|d| d.to_lowercase().contains(&needle))
                    .unwrap_or(false)
        })
        .collect()
}

fn compare(a: &Repository, b: &Repository, key: SortKey) -> Ordering {
    match key {
        SortKey::Stars => b.stargazers_count.cmp(&a.stargazers_count),
        SortKey::Forks => b.forks_count.cmp(&a.forks_count),
        SortKey::Updated => b.updated_at.cmp(&a.updated_at),
        SortKey::Created => b.created_at.cmp(&a.created_at),
    }
}

/// Descending, stable: ties keep their filtered order.
pub fn sort_repositories(repos: &mut [&Repository], key: SortKey) {
    repos.sort_by(|a, b| compare(a, b, key));
}

pub fn total_pages(items: usize) -> usize {
    items.div_ceil(ITEMS_PER_PAGE).max(1)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn start(&self) -> usize {
        if self.total_items == 0 {
            0
        } else {
            (self.page - 1) * ITEMS_PER_PAGE + 1
        }
    }

    pub fn end(&self) -> usize {
        (self.page * ITEMS_PER_PAGE).min(self.total_items)
    }

    pub fn info(&self) -> String {
        format!("{}-{} of {}", self.start(), self.end(), self.total_items)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn page_numbers(&self) -> Vec<usize> {
        let first = self.page.saturating_sub(1).max(1);
        let last = self.total_pages.min(first + PAGE_WINDOW - 1);
        (first..=last).collect()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            total_pages: self.total_pages,
            total_items: self.total_items,
        }
    }
}

pub fn paginate<T: Clone>(items: &[T], page: usize) -> Page<T> {
    let total_pages = total_pages(items.len());
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * ITEMS_PER_PAGE;

    Page {
        items: items.iter().skip(start).take(ITEMS_PER_PAGE).cloned().collect(),
        page,
        total_pages,
        total_items: items.len(),
    }
}

pub fn apply<'a>(repos: &'a [Repository], query: &RepoQuery) -> Page<&'a Repository> {
    let mut rows = filter_repositories(repos, &query.query);
    sort_repositories(&mut rows, query.sort);
    paginate(&rows, query.page)
}

#[derive(Debug, Clone, Default)]
pub struct RepoTable {
    source: Vec<Repository>,
    query: RepoQuery,
}

impl RepoTable {
    pub fn new(source: Vec<Repository>) -> Self {
        Self {
            source,
            query: RepoQuery {
                page: 1,
                ..RepoQuery::default()
            },
        }
    }

    pub fn replace(&mut self, source: Vec<Repository>) {
        self.source = source;
        self.query.page = 1;
    }

    pub fn query(&self) -> &RepoQuery {
        &self.query
    }

    pub fn source(&self) -> &[Repository] {
        &self.source
    }

    pub fn page(&self) -> usize {
        self.query.page.max(1)
    }

    fn matching(&self) -> usize {
        filter_repositories(&self.source, &self.query.query).len()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.matching())
    }

    pub fn set_filter(&mut self, query: impl Into<String>) {
        self.query.query = query.into();
        self.query.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.query.sort = sort;
    }

    /// Moves to `page` if it lies in `[1, total_pages]`; otherwise nothing
    /// changes. Returns whether the page moved.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() || page == self.page() {
            return false;
        }
        self.query.page = page;
        true
    }

    pub fn change_page(&mut self, delta: i64) -> bool {
        let target = self.page() as i64 + delta;
        if target < 1 {
            return false;
        }
        self.go_to_page(target as usize)
    }

    pub fn current(&self) -> Page<&Repository> {
        apply(&self.source, &self.query)
    }
}
