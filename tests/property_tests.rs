//! Property tests for resolution, pricing and rendering invariants.

use proptest::prelude::*;
use tokio::runtime::Runtime;

use cinebot::adapters::backend::MockBookingApi;
use cinebot::application::handlers::resolver;
use cinebot::application::render;
use cinebot::domain::{
    BookingRequest, CinemaRecord, MovieRecord, PriceRecord, PriceTable, SeatClass, Ticket,
};

proptest! {
    /// An exact-titled entry wins over a competitor that merely contains the
    /// query, regardless of catalog order.
    #[test]
    fn exact_match_beats_substring_competitor(
        base in "[a-z]{3,10}",
        suffix in "[a-z]{1,5}",
    ) {
        let competitor = format!("{base} {suffix}");
        let catalog = vec![
            MovieRecord::new("1", competitor),
            MovieRecord::new("2", base.clone()),
        ];

        let rt = Runtime::new().unwrap();
        let api = MockBookingApi::new().with_movies(catalog);
        let resolved = rt.block_on(resolver::resolve_movie(&api, &base)).unwrap();
        prop_assert_eq!(resolved.id, "2");
    }

    /// The draft's ticket total is exactly the sum of per-seat prices.
    #[test]
    fn ticket_total_is_the_sum_of_prices(prices in prop::collection::vec(1i64..500_000, 1..8)) {
        let tickets: Vec<Ticket> = prices
            .iter()
            .enumerate()
            .map(|(i, price)| Ticket {
                seat_id: format!("{i}"),
                seat_code: format!("A{i}"),
                ticket_price: *price,
            })
            .collect();
        let request = BookingRequest::pending("1", "guest_user", "5", tickets);

        prop_assert!(request.validate().is_ok());
        prop_assert_eq!(request.ticket_total(), prices.iter().sum::<i64>());
    }

    /// A price table built from positive rows resolves every class to a
    /// positive price (via the standard fallback when needed).
    #[test]
    fn price_table_always_resolves_positive(price in 1i64..500_000) {
        let table = PriceTable::from_records(&[PriceRecord {
            seat_type: "standard".to_string(),
            effective_price: price,
        }])
        .unwrap();

        for class in [
            SeatClass::Standard,
            SeatClass::Vip,
            SeatClass::Couple,
            SeatClass::Sweetbox,
        ] {
            prop_assert!(table.price_for(class).unwrap() > 0);
        }
    }

    /// Rendering the same records twice yields identical text.
    #[test]
    fn cinema_info_rendering_is_idempotent(
        names in prop::collection::vec("[a-zA-Z ]{1,20}", 1..6),
    ) {
        let cinemas: Vec<CinemaRecord> = names
            .iter()
            .enumerate()
            .map(|(i, name)| CinemaRecord::new(i.to_string(), name.clone()))
            .collect();

        prop_assert_eq!(render::cinema_info(&cinemas), render::cinema_info(&cinemas));
    }
}
