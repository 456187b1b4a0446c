//! Payment redirect turn.
//!
//! Requires an order id and grand total captured by a prior successful
//! booking; emits the checkout link plus a structured payload for client
//! surfaces that render a payment widget instead of plain text.

use serde_json::json;

use crate::application::render;
use crate::application::turn::{TurnContext, TurnOutcome};
use crate::domain::names;

/// Entry point for the payment intent.
pub fn redirect_to_payment(payment_base_url: &str, ctx: &TurnContext) -> TurnOutcome {
    let order_id = ctx.slots.text(names::ORDER_ID);
    let grand_total = ctx.slots.integer(names::GRAND_TOTAL);

    match (order_id, grand_total) {
        (Some(order_id), Some(grand_total)) => {
            let payment_url = format!(
                "{payment_base_url}/qr-payment?order_id={order_id}&grand_total={grand_total}"
            );
            TurnOutcome::reply_with_payload(
                render::payment_instructions(&payment_url, grand_total),
                json!({
                    "type": "payment_redirect",
                    "order_id": order_id,
                    "grand_total": grand_total,
                    "payment_url": payment_url,
                }),
            )
        }
        _ => TurnOutcome::reply(
            "❌ Không tìm thấy mã đơn hàng.\n\
             Bạn có thể đặt vé mới bằng cách nói: 'Đặt vé phim [tên phim]'",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SlotValues;
    use chrono::NaiveDate;

    fn ctx(order_id: Option<&str>, grand_total: Option<i64>) -> TurnContext {
        let mut slots = SlotValues::default();
        if let Some(order_id) = order_id {
            slots.set(names::ORDER_ID, json!(order_id));
        }
        if let Some(total) = grand_total {
            slots.set(names::GRAND_TOTAL, json!(total));
        }
        TurnContext::new(slots, "", NaiveDate::from_ymd_opt(2025, 10, 10).unwrap())
    }

    #[test]
    fn emits_link_and_structured_payload() {
        let outcome = redirect_to_payment("http://localhost:5173", &ctx(Some("99"), Some(130_000)));

        let message = &outcome.messages[0];
        assert!(message
            .text
            .contains("http://localhost:5173/qr-payment?order_id=99&grand_total=130000"));

        let payload = message.payload.as_ref().unwrap();
        assert_eq!(payload["order_id"], "99");
        assert_eq!(payload["grand_total"], 130_000);
        assert_eq!(
            payload["payment_url"],
            "http://localhost:5173/qr-payment?order_id=99&grand_total=130000"
        );
    }

    #[test]
    fn missing_order_id_suggests_a_new_booking() {
        let outcome = redirect_to_payment("http://localhost:5173", &ctx(None, Some(130_000)));
        assert!(outcome.messages[0].text.contains("Không tìm thấy mã đơn hàng"));
        assert!(outcome.messages[0].payload.is_none());
    }

    #[test]
    fn missing_total_also_suggests_a_new_booking() {
        let outcome = redirect_to_payment("http://localhost:5173", &ctx(Some("99"), None));
        assert!(outcome.messages[0].text.contains("Không tìm thấy mã đơn hàng"));
    }
}
