//! Calendar days on which a repeating reservation does not take place.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An ordered set of excluded dates.
///
/// Only dates are stored, never date-times, so an exclusion always suppresses
/// a whole day. The set is ignored for non-repeating reservations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExclusionSet(BTreeSet<NaiveDate>);

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains(&date)
    }

    /// Add `date`. Returns `false` if it was already excluded.
    pub fn exclude(&mut self, date: NaiveDate) -> bool {
        self.0.insert(date)
    }

    /// Remove `date`, making the day bookable again.
    pub fn include(&mut self, date: NaiveDate) -> bool {
        self.0.remove(&date)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Excluded dates in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<NaiveDate> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[NaiveDate; N]> for ExclusionSet {
    fn from(dates: [NaiveDate; N]) -> Self {
        dates.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn exclude_and_include_toggle_membership() {
        let mut set = ExclusionSet::new();
        assert!(set.exclude(date(2024, 3, 18)));
        assert!(!set.exclude(date(2024, 3, 18)));
        assert!(set.contains(date(2024, 3, 18)));
        assert_eq!(set.len(), 1);

        assert!(set.include(date(2024, 3, 18)));
        assert!(!set.contains(date(2024, 3, 18)));
        assert!(set.is_empty());
    }

    #[test]
    fn iterates_in_date_order() {
        let set = ExclusionSet::from([date(2024, 5, 1), date(2024, 3, 18), date(2024, 4, 1)]);
        let dates: Vec<_> = set.iter().collect();
        assert_eq!(dates, vec![date(2024, 3, 18), date(2024, 4, 1), date(2024, 5, 1)]);
    }

    #[test]
    fn serializes_as_plain_date_list() {
        let set = ExclusionSet::from([date(2024, 3, 18)]);
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["2024-03-18"]"#);
        let back: ExclusionSet = serde_json::from_str(r#"["2024-03-18"]"#).unwrap();
        assert_eq!(back, set);
    }
}
