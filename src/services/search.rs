//! Student search over the visible set.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::models::{SearchQuery, StudentView};

/// Filter and rank students.
///
/// - name: case-insensitive substring of the trimmed query; blank matches all
/// - class: number and, when given, section must match
/// - tags: the student's tag union must contain every requested tag
///
/// Results are ordered by average rating descending, then name ascending.
pub fn search_students(students: &[StudentView], query: &SearchQuery) -> Vec<StudentView> {
    let needle = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);
    let section = query
        .section
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let wanted_tags = query.tag_list();

    let mut matches: Vec<StudentView> = students
        .iter()
        .filter(|s| match &needle {
            Some(n) => s.name.to_lowercase().contains(n.as_str()),
            None => true,
        })
        .filter(|s| query.class_number.is_none_or(|n| s.class.number == n))
        .filter(|s| section.is_none_or(|sec| s.class.section == sec))
        .filter(|s| {
            if wanted_tags.is_empty() {
                return true;
            }
            let tags = s.tag_set();
            wanted_tags.iter().all(|t| tags.contains(t.as_str()))
        })
        .cloned()
        .collect();

    matches.sort_by(|a, b| {
        b.average_rating
            .partial_cmp(&a.average_rating)
            .unwrap_or(Ordering::Equal)
            .then_with(|| compare_names(&a.name, &b.name))
    });
    matches
}

/// Case-insensitive name order, falling back to byte order for stability.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sorted union of all tags used on the given students' remarks.
pub fn tag_facet(students: &[StudentView]) -> Vec<String> {
    students
        .iter()
        .flat_map(|s| s.remarks.iter().flat_map(|r| r.tags.iter().cloned()))
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}
