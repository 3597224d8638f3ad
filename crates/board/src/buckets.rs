//! Dashboard buckets.

use ipo_core::{IpoRecord, Result, Status};
use serde::{Deserialize, Serialize};

/// Records grouped into the three dashboard sections.
///
/// Each record lands in at most one bucket; `Closed` and `Unknown` records
/// are left out. Order within a bucket follows input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub upcoming: Vec<IpoRecord>,
    pub open: Vec<IpoRecord>,
    pub closing_today: Vec<IpoRecord>,
}

impl Board {
    /// Stable partition by exact status.
    pub fn partition<I>(records: I) -> Self
    where
        I: IntoIterator<Item = IpoRecord>,
    {
        let mut board = Board::default();
        for record in records {
            match record.status {
                Status::Upcoming => board.upcoming.push(record),
                Status::Open => board.open.push(record),
                Status::ClosingToday => board.closing_today.push(record),
                Status::Closed | Status::Unknown => {}
            }
        }
        board
    }

    /// Records in the bucket for `status`; empty for unbucketed states.
    pub fn bucket(&self, status: Status) -> &[IpoRecord] {
        match status {
            Status::Upcoming => &self.upcoming,
            Status::Open => &self.open,
            Status::ClosingToday => &self.closing_today,
            Status::Closed | Status::Unknown => &[],
        }
    }

    /// Buckets in display order.
    pub fn sections(&self) -> impl Iterator<Item = (Status, &[IpoRecord])> {
        Status::BUCKETED.into_iter().map(move |s| (s, self.bucket(s)))
    }

    /// Total records across all buckets.
    pub fn len(&self) -> usize {
        self.upcoming.len() + self.open.len() + self.closing_today.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// JSON document for the renderer.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipo_core::{
        Category, GmpPercentage, GmpValue, PriceValue, SubscriptionBreakdown,
        SubscriptionMultiple,
    };

    fn record(name: &str, status: Status) -> IpoRecord {
        IpoRecord {
            name: name.to_string(),
            category: Category::Mainboard,
            status,
            raw_status: status.as_str().to_string(),
            price: PriceValue::Text(String::new()),
            issue_size: String::new(),
            estimated_listing_date: String::new(),
            close_date: String::new(),
            pe_ratio: "N/A".to_string(),
            subscription_multiple: SubscriptionMultiple::NotAvailable,
            gmp_value: GmpValue::NotAvailable,
            gmp_percentage: GmpPercentage::NotAvailable,
            subscription_by_category: SubscriptionBreakdown::default(),
        }
    }

    fn names(records: &[IpoRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_partition_is_stable() {
        let board = Board::partition(vec![
            record("a", Status::Open),
            record("b", Status::Upcoming),
            record("c", Status::Open),
            record("d", Status::ClosingToday),
            record("e", Status::Upcoming),
        ]);
        assert_eq!(names(&board.upcoming), vec!["b", "e"]);
        assert_eq!(names(&board.open), vec!["a", "c"]);
        assert_eq!(names(&board.closing_today), vec!["d"]);
    }

    #[test]
    fn test_unbucketed_states_dropped() {
        let input = vec![
            record("a", Status::Closed),
            record("b", Status::Unknown),
            record("c", Status::Open),
        ];
        let total = input.len();
        let board = Board::partition(input);
        assert_eq!(board.len(), 1);
        assert!(board.len() <= total);
        assert!(board.bucket(Status::Closed).is_empty());
        assert!(board.bucket(Status::Unknown).is_empty());
    }

    #[test]
    fn test_buckets_are_disjoint() {
        let input: Vec<IpoRecord> = [
            Status::Open,
            Status::Upcoming,
            Status::ClosingToday,
            Status::Closed,
            Status::Unknown,
            Status::Open,
        ]
        .iter()
        .enumerate()
        .map(|(i, s)| record(&format!("r{i}"), *s))
        .collect();
        let board = Board::partition(input.clone());

        for r in &input {
            let hits = board
                .sections()
                .filter(|(_, bucket)| bucket.iter().any(|b| b.name == r.name))
                .count();
            assert!(hits <= 1, "{} appears in {hits} buckets", r.name);
            assert_eq!(hits == 1, r.status.is_bucketed());
        }
    }

    #[test]
    fn test_empty_input() {
        let board = Board::partition(Vec::<IpoRecord>::new());
        assert!(board.is_empty());
        assert_eq!(board, Board::default());
        let sections: Vec<_> = board.sections().map(|(s, b)| (s, b.len())).collect();
        assert_eq!(
            sections,
            vec![(Status::Upcoming, 0), (Status::Open, 0), (Status::ClosingToday, 0)]
        );
    }

    #[test]
    fn test_to_json() {
        let board = Board::partition(vec![record("a", Status::Open)]);
        let json: serde_json::Value = serde_json::from_str(&board.to_json().unwrap()).unwrap();
        assert_eq!(json["open"][0]["name"], "a");
        assert_eq!(json["upcoming"].as_array().unwrap().len(), 0);
    }
}
