//! Query composer: translates filter/search/sort request parameters into a
//! single store query.
//!
//! The three parameters are independent and order-insensitive. Keyword
//! matching is ASCII case-insensitive and unknown keywords never error:
//! unknown filters behave as `all`, unknown sorts as `date_desc`. Search is
//! applied as an explicit lowercase substring match in Rust rather than
//! relying on the storage engine's collation.

use crate::models::Task;

/// Predicate on completion state selected by the `filter` keyword
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompletionFilter {
    /// No predicate; matches every task
    #[default]
    All,
    /// `completed = false`
    Active,
    /// `completed = true`
    Completed,
}

impl CompletionFilter {
    /// Resolve a filter keyword. Unknown or absent keywords select `All`.
    #[must_use]
    pub fn from_keyword(keyword: Option<&str>) -> Self {
        match keyword.map(str::to_ascii_lowercase).as_deref() {
            Some("active") => Self::Active,
            Some("completed") => Self::Completed,
            _ => Self::All,
        }
    }

    /// SQL predicate fragment for this filter, if any
    #[must_use]
    pub const fn where_sql(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Active => Some("completed = 0"),
            Self::Completed => Some("completed = 1"),
        }
    }

    /// Whether a task with the given completion state matches this filter
    #[must_use]
    pub const fn matches(self, completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Active => !completed,
            Self::Completed => completed,
        }
    }
}

/// Ordering rule selected by the `sort` keyword
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// `created_at` ascending
    DateAsc,
    /// `created_at` descending (default)
    #[default]
    DateDesc,
    /// Priority rank ascending (High first), ties by `created_at` descending
    Priority,
    /// Incomplete first, ties by `created_at` descending
    Status,
}

impl SortKey {
    /// Resolve a sort keyword. Unknown or absent keywords select `DateDesc`.
    #[must_use]
    pub fn from_keyword(keyword: Option<&str>) -> Self {
        match keyword.map(str::to_ascii_lowercase).as_deref() {
            Some("date_asc") => Self::DateAsc,
            Some("priority") => Self::Priority,
            Some("status") => Self::Status,
            _ => Self::DateDesc,
        }
    }

    /// SQL ORDER BY clause body for this sort key.
    ///
    /// Priority ranks are spelled out as a CASE expression so the ordering
    /// is deterministic regardless of the column's text collation; labels
    /// outside the known set rank last.
    #[must_use]
    pub const fn order_sql(self) -> &'static str {
        match self {
            Self::DateAsc => "created_at ASC",
            Self::DateDesc => "created_at DESC",
            Self::Priority => {
                "CASE priority WHEN 'High' THEN 1 WHEN 'Medium' THEN 2 WHEN 'Low' THEN 3 ELSE 4 END ASC, created_at DESC"
            }
            Self::Status => "completed ASC, created_at DESC",
        }
    }
}

/// A composed task query: completion filter, optional search term, and
/// ordering. Pure data; the store executes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub filter: CompletionFilter,
    /// Trimmed search term; `None` imposes no constraint
    pub search: Option<String>,
    pub sort: SortKey,
}

impl TaskQuery {
    /// Compose a query from raw request parameters
    #[must_use]
    pub fn from_params(filter: Option<&str>, search: Option<&str>, sort: Option<&str>) -> Self {
        let search = search
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_string);

        Self {
            filter: CompletionFilter::from_keyword(filter),
            search,
            sort: SortKey::from_keyword(sort),
        }
    }

    /// Whether the task matches the search term as a case-insensitive
    /// substring of its title or description. Lowercasing is done with
    /// `str::to_lowercase`, which is locale-independent.
    #[must_use]
    pub fn matches_search(&self, task: &Task) -> bool {
        match &self.search {
            None => true,
            Some(term) => {
                let needle = term.to_lowercase();
                task.title.to_lowercase().contains(&needle)
                    || task.description.to_lowercase().contains(&needle)
            }
        }
    }

    /// Whether the task matches the full predicate (filter AND search)
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.filter.matches(task.completed) && self.matches_search(task)
    }
}
