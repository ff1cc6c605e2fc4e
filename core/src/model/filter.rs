use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::task::{Task, TaskCollection};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    All,
    Completed,
    Pending,
}

impl FilterMode {
    /// Display order of the filter tabs.
    pub const ALL: [FilterMode; 3] = [FilterMode::All, FilterMode::Completed, FilterMode::Pending];

    pub fn matches(self, task: &Task) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Completed => task.is_completed,
            FilterMode::Pending => !task.is_completed,
        }
    }

    pub fn next(self) -> Self {
        match self {
            FilterMode::All => FilterMode::Completed,
            FilterMode::Completed => FilterMode::Pending,
            FilterMode::Pending => FilterMode::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterMode::All => "All",
            FilterMode::Completed => "Completed",
            FilterMode::Pending => "Pending",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().to_lowercase())
    }
}

impl FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(FilterMode::All),
            "completed" | "done" => Ok(FilterMode::Completed),
            "pending" => Ok(FilterMode::Pending),
            _ => Err(format!("unknown filter `{}` (expected all, completed or pending)", s)),
        }
    }
}

/// Pure, order-preserving projection of `collection` onto `mode`.
/// Never touches storage.
pub fn apply_filter(collection: &TaskCollection, mode: FilterMode) -> TaskCollection {
    collection
        .iter()
        .filter(|t| mode.matches(t))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TaskCollection {
        [("a", false), ("b", true), ("c", false), ("d", true)]
            .into_iter()
            .map(|(id, done)| Task {
                id: id.to_string(),
                title: id.to_uppercase(),
                description: String::new(),
                is_completed: done,
            })
            .collect()
    }

    #[test]
    fn test_all_is_identity() {
        let c = sample();
        assert_eq!(apply_filter(&c, FilterMode::All), c);
        assert_eq!(apply_filter(&TaskCollection::new(), FilterMode::All), TaskCollection::new());
    }

    #[test]
    fn test_every_result_satisfies_predicate() {
        let c = sample();
        for mode in FilterMode::ALL {
            assert!(apply_filter(&c, mode).iter().all(|t| mode.matches(t)));
        }
        assert_eq!(apply_filter(&c, FilterMode::Completed).ids(), vec!["b", "d"]);
        assert_eq!(apply_filter(&c, FilterMode::Pending).ids(), vec!["a", "c"]);
    }

    #[test]
    fn test_completed_and_pending_partition_all() {
        let c = sample();
        let completed = apply_filter(&c, FilterMode::Completed);
        let pending = apply_filter(&c, FilterMode::Pending);
        assert_eq!(completed.len() + pending.len(), c.len());

        let mut union: Vec<&str> = completed.ids().into_iter().chain(pending.ids()).collect();
        union.sort();
        let mut all = c.ids();
        all.sort();
        assert_eq!(union, all);
    }

    #[test]
    fn test_parse_and_cycle() {
        assert_eq!("Completed".parse::<FilterMode>(), Ok(FilterMode::Completed));
        assert_eq!("pending".parse::<FilterMode>(), Ok(FilterMode::Pending));
        assert!("someday".parse::<FilterMode>().is_err());
        assert_eq!(FilterMode::Pending.to_string(), "pending");

        let mut mode = FilterMode::default();
        for expected in [FilterMode::Completed, FilterMode::Pending, FilterMode::All] {
            mode = mode.next();
            assert_eq!(mode, expected);
        }
    }
}
