//! Ticket price tables.
//!
//! Prices are scoped to (cinema, date) on the backend. When the price
//! endpoint fails or returns nothing usable, the booking flow substitutes a
//! fixed default table so a transient pricing outage does not block bookings.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::seating::SeatClass;

/// Default unit prices in VND, by seat class.
static DEFAULT_PRICES: Lazy<HashMap<SeatClass, i64>> = Lazy::new(|| {
    HashMap::from([
        (SeatClass::Standard, 50_000),
        (SeatClass::Vip, 80_000),
        (SeatClass::Couple, 150_000),
    ])
});

/// One row of the backend price listing, already reduced to the effective
/// price for the queried date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRecord {
    /// Backend seat-type name.
    pub seat_type: String,
    /// Effective unit price in VND.
    pub effective_price: i64,
}

/// Mapping from seat class to unit price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTable {
    entries: HashMap<SeatClass, i64>,
}

impl PriceTable {
    /// Builds a table from backend price rows, keeping only rows with a
    /// strictly positive effective price.
    ///
    /// Returns `None` when no usable row survives, so the caller can fall
    /// back to [`PriceTable::default_table`].
    pub fn from_records(records: &[PriceRecord]) -> Option<Self> {
        let mut entries = HashMap::new();
        for record in records {
            if record.effective_price > 0 {
                entries.insert(SeatClass::from_name(&record.seat_type), record.effective_price);
            }
        }
        if entries.is_empty() {
            None
        } else {
            Some(Self { entries })
        }
    }

    /// The fixed fallback table: {standard: 50000, vip: 80000, couple: 150000}.
    pub fn default_table() -> Self {
        Self {
            entries: DEFAULT_PRICES.clone(),
        }
    }

    /// Unit price for a seat class, defaulting to the standard-class price
    /// when the class is unlisted.
    pub fn price_for(&self, class: SeatClass) -> Option<i64> {
        self.entries
            .get(&class)
            .or_else(|| self.entries.get(&SeatClass::Standard))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_fixed_prices() {
        let table = PriceTable::default_table();
        assert_eq!(table.price_for(SeatClass::Standard), Some(50_000));
        assert_eq!(table.price_for(SeatClass::Vip), Some(80_000));
        assert_eq!(table.price_for(SeatClass::Couple), Some(150_000));
    }

    #[test]
    fn unlisted_class_falls_back_to_standard() {
        let table = PriceTable::default_table();
        assert_eq!(table.price_for(SeatClass::Sweetbox), Some(50_000));
    }

    #[test]
    fn from_records_keeps_positive_prices_only() {
        let records = vec![
            PriceRecord {
                seat_type: "Standard".to_string(),
                effective_price: 45_000,
            },
            PriceRecord {
                seat_type: "VIP".to_string(),
                effective_price: 0,
            },
        ];
        let table = PriceTable::from_records(&records).unwrap();
        assert_eq!(table.price_for(SeatClass::Standard), Some(45_000));
        // VIP row was unusable, so VIP resolves through the standard price.
        assert_eq!(table.price_for(SeatClass::Vip), Some(45_000));
    }

    #[test]
    fn from_records_rejects_empty_or_zero_tables() {
        assert!(PriceTable::from_records(&[]).is_none());
        let records = vec![PriceRecord {
            seat_type: "Standard".to_string(),
            effective_price: 0,
        }];
        assert!(PriceTable::from_records(&records).is_none());
    }
}
