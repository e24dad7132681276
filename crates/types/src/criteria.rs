use std::collections::HashSet;

use chrono::NaiveDate;

/// Immutable filter state passed into every pipeline stage.
///
/// Replaces the implicit global filter state of a dashboard session:
/// every recomputation receives one of these by reference, nothing is
/// mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FilterCriteria {
    /// Selected location names.
    pub branches: HashSet<String>,
    /// Selected departments (harmonized across both tables).
    pub departments: HashSet<String>,
    /// Selected sub-departments (harmonized across both tables).
    pub sub_departments: HashSet<String>,
    /// Inclusive window start (date component).
    pub start: NaiveDate,
    /// Inclusive window end (date component).
    pub end: NaiveDate,
}

impl FilterCriteria {
    /// Criteria selecting the given branches over a date window, with
    /// every department and sub-department included.
    #[must_use]
    pub fn for_branches<I>(branches: I, start: NaiveDate, end: NaiveDate) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            branches: branches.into_iter().map(Into::into).collect(),
            departments: HashSet::new(),
            sub_departments: HashSet::new(),
            start,
            end,
        }
    }

    /// Returns `true` when the branch is selected.
    #[must_use]
    pub fn includes_branch(&self, branch: &str) -> bool {
        self.branches.contains(branch)
    }

    /// Returns `true` when the grouping values pass the department and
    /// sub-department selections. An empty selection set means
    /// "everything selected", matching the dashboard default.
    #[must_use]
    pub fn includes_grouping(&self, department: &str, sub_department: &str) -> bool {
        (self.departments.is_empty() || self.departments.contains(department))
            && (self.sub_departments.is_empty() || self.sub_departments.contains(sub_department))
    }

    /// Returns `true` when the date falls inside `[start, end]`.
    #[must_use]
    pub fn includes_date(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_date_window_is_inclusive() {
        let c = FilterCriteria::for_branches(["A"], d(2024, 1, 1), d(2024, 1, 31));
        assert!(c.includes_date(d(2024, 1, 1)));
        assert!(c.includes_date(d(2024, 1, 31)));
        assert!(!c.includes_date(d(2023, 12, 31)));
        assert!(!c.includes_date(d(2024, 2, 1)));
    }

    #[test]
    fn test_empty_grouping_selects_everything() {
        let c = FilterCriteria::for_branches(["A"], d(2024, 1, 1), d(2024, 1, 31));
        assert!(c.includes_grouping("Lubricants", "Engine Oils"));
    }

    #[test]
    fn test_grouping_selection_narrows_both_levels() {
        let mut c = FilterCriteria::for_branches(["A"], d(2024, 1, 1), d(2024, 1, 31));
        c.departments.insert("Lubricants".to_string());
        c.sub_departments.insert("Engine Oils".to_string());

        assert!(c.includes_grouping("Lubricants", "Engine Oils"));
        assert!(!c.includes_grouping("Lubricants", "Greases"));
        assert!(!c.includes_grouping("Food", "Engine Oils"));
    }
}
