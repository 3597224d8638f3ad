//! Subscription view: one card per live issue with per-category multiples.

use ipo_core::{Category, IpoRecord, Status};
use serde::{Deserialize, Serialize};

use crate::format::{format_gmp, format_price};

/// One labelled subscription multiple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

/// Display-ready summary of an issue in the subscription view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionCard {
    /// `"Acme Ltd (SME)"`.
    pub title: String,
    pub name: String,
    pub category: Category,
    pub status: Status,
    pub price: String,
    pub size: String,
    pub gmp: String,
    pub pe_ratio: String,
    pub close_date: String,
    /// QIB, SHNI, BHNI, NII, RII, Total, in that order.
    pub metrics: Vec<Metric>,
}

impl From<&IpoRecord> for SubscriptionCard {
    fn from(record: &IpoRecord) -> Self {
        Self {
            title: format!("{} ({})", record.name, record.category),
            name: record.name.clone(),
            category: record.category,
            status: record.status,
            price: format_price(&record.price),
            size: record.issue_size.clone(),
            gmp: format_gmp(&record.gmp_value, &record.gmp_percentage),
            pe_ratio: record.pe_ratio.clone(),
            close_date: record.close_date.clone(),
            metrics: record
                .subscription_by_category
                .iter()
                .map(|(category, value)| Metric {
                    label: category.code().to_string(),
                    value: value.to_string(),
                })
                .collect(),
        }
    }
}

/// Cards for the issues still taking bids, in input order.
pub fn subscription_cards(records: &[IpoRecord]) -> Vec<SubscriptionCard> {
    records
        .iter()
        .filter(|r| matches!(r.status, Status::Open | Status::ClosingToday))
        .map(SubscriptionCard::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipo_core::{
        GmpPercentage, GmpValue, InvestorCategory, PriceValue, SubscriptionBreakdown,
        SubscriptionMultiple,
    };
    use ordered_float::OrderedFloat;

    fn record(name: &str, status: Status) -> IpoRecord {
        let mut breakdown = SubscriptionBreakdown::default();
        breakdown.set(InvestorCategory::Qib, "45.10x");
        breakdown.set(InvestorCategory::Total, "60.02x");
        IpoRecord {
            name: name.to_string(),
            category: Category::Sme,
            status,
            raw_status: status.as_str().to_string(),
            price: PriceValue::Number(OrderedFloat(485.0)),
            issue_size: "₹52.10 Cr".to_string(),
            estimated_listing_date: String::new(),
            close_date: "16th Dec 2024".to_string(),
            pe_ratio: "21.4".to_string(),
            subscription_multiple: SubscriptionMultiple::NotAvailable,
            gmp_value: GmpValue::parse("35").unwrap(),
            gmp_percentage: GmpPercentage::Percent("7.2%".to_string()),
            subscription_by_category: breakdown,
        }
    }

    #[test]
    fn test_card_fields() {
        let card = SubscriptionCard::from(&record("Acme Ltd", Status::Open));
        assert_eq!(card.title, "Acme Ltd (SME)");
        assert_eq!(card.price, "₹485.00");
        assert_eq!(card.gmp, "₹35 (7.2%)");
        assert_eq!(card.pe_ratio, "21.4");
        assert_eq!(card.close_date, "16th Dec 2024");

        let metrics: Vec<_> = card
            .metrics
            .iter()
            .map(|m| (m.label.as_str(), m.value.as_str()))
            .collect();
        assert_eq!(
            metrics,
            vec![
                ("QIB", "45.10x"),
                ("SHNI", "0.00x"),
                ("BHNI", "0.00x"),
                ("NII", "0.00x"),
                ("RII", "0.00x"),
                ("Total", "60.02x"),
            ]
        );
    }

    #[test]
    fn test_only_live_issues_get_cards() {
        let records = vec![
            record("a", Status::Open),
            record("b", Status::Upcoming),
            record("c", Status::ClosingToday),
            record("d", Status::Unknown),
        ];
        let cards = subscription_cards(&records);
        let names: Vec<_> = cards.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
        assert!(subscription_cards(&[]).is_empty());
    }
}
