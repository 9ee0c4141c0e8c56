//! changelog::aggregate
//!
//! Merging and rendering of entries from both passes.

use super::entry::ChangelogEntry;

/// Merge both passes into one list ordered by date.
///
/// The sort is stable: entries with equal dates keep pull-request entries
/// first, each in the order its pass produced them.
pub fn aggregate(
    pull_requests: Vec<ChangelogEntry>,
    commits: Vec<ChangelogEntry>,
) -> Vec<ChangelogEntry> {
    let mut entries = pull_requests;
    entries.extend(commits);
    entries.sort_by_key(|entry| entry.date);
    entries
}

/// Concatenate entry texts in order.
pub fn render(entries: &[ChangelogEntry]) -> String {
    entries.iter().map(|entry| entry.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn entry(day: u32, text: &str) -> ChangelogEntry {
        ChangelogEntry {
            date: Utc.with_ymd_and_hms(2024, 5, day, 0, 0, 0).unwrap(),
            text: text.to_string(),
        }
    }

    #[test]
    fn interleaves_by_date() {
        let merged = aggregate(
            vec![entry(3, "pr3\n"), entry(1, "pr1\n")],
            vec![entry(2, "c2\n"), entry(4, "c4\n")],
        );
        assert_eq!(render(&merged), "pr1\nc2\npr3\nc4\n");
    }

    #[test]
    fn ties_keep_insertion_order() {
        let merged = aggregate(
            vec![entry(1, "a"), entry(1, "b")],
            vec![entry(1, "c")],
        );
        assert_eq!(render(&merged), "abc");
    }

    #[test]
    fn empty_renders_empty() {
        assert_eq!(render(&aggregate(vec![], vec![])), "");
    }
}
