//! Local refinement of an already fetched result set.
//!
//! Both functions are pure: they borrow the input and return a new `Vec`,
//! so the held server result can be re-refined on every widget change
//! without re-fetching.

use std::cmp::Ordering;

use crate::types::{SortKey, SortOrder, Todo, TodoFilter};

/// Narrow `todos` by `filter`.
///
/// Filters run in a fixed order and compose as AND: body and category
/// (case-insensitive substring), then status (exact, `false` included),
/// then truncation to the first `limit` records. `owner` is ignored here;
/// it is a server-side filter only.
pub fn filter_todos(todos: &[Todo], filter: &TodoFilter) -> Vec<Todo> {
    let body = lowered(&filter.body);
    let category = lowered(&filter.category);

    let matching = todos
        .iter()
        .filter(|todo| body.as_deref().is_none_or(|b| todo.body.to_lowercase().contains(b)))
        .filter(|todo| {
            category
                .as_deref()
                .is_none_or(|c| todo.category.to_lowercase().contains(c))
        })
        .filter(|todo| filter.status.is_none_or(|s| todo.status == s));

    match filter.limit {
        Some(limit) if limit > 0 => matching.take(limit).cloned().collect(),
        _ => matching.cloned().collect(),
    }
}

/// Stable sort of `todos` by `key`. Strings compare by raw value, `false`
/// sorts before `true`. `Desc` reverses the comparison, so equal keys keep
/// their input order either way.
pub fn sort_todos(todos: &[Todo], key: SortKey, order: SortOrder) -> Vec<Todo> {
    let mut sorted = todos.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = compare(a, b, key);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    sorted
}

fn compare(a: &Todo, b: &Todo, key: SortKey) -> Ordering {
    match key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::Owner => a.owner.cmp(&b.owner),
        SortKey::Category => a.category.cmp(&b.category),
        SortKey::Status => a.status.cmp(&b.status),
        SortKey::Body => a.body.cmp(&b.body),
    }
}

// Empty strings count as absent, like an untouched text box.
fn lowered(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}
