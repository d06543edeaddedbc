use std::collections::BTreeMap;
use crate::models::BugRecord;
use super::formatter::format_group_line;

/// Summary lines keyed by resolution label. Built once per report and never
/// mutated afterwards; iteration order is the lexicographic order of labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionGroups {
    total: usize,
    groups: BTreeMap<String, Vec<String>>,
}

impl ResolutionGroups {
    /// Number of bugs across all groups.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, resolution: &str) -> Option<&[String]> {
        self.groups.get(resolution).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Group bugs by exact resolution (case-sensitive, empty included) and render
/// one summary line per group. Bugs keep their input order within a group.
pub fn aggregate(bugs: &[BugRecord]) -> ResolutionGroups {
    let mut by_resolution: BTreeMap<&str, Vec<u64>> = BTreeMap::new();
    for bug in bugs {
        by_resolution.entry(bug.resolution.as_str()).or_default().push(bug.id);
    }

    let groups = by_resolution
        .into_iter()
        .map(|(resolution, ids)| (resolution.to_string(), vec![format_group_line(resolution, &ids)]))
        .collect();

    ResolutionGroups {
        total: bugs.len(),
        groups,
    }
}
