//! # Cart Record Codec
//!
//! The durable record is a UTF-8 JSON array of line item objects:
//!
//! ```json
//! [
//!   { "id": "p1", "title": "Shirt", "image_url": "u", "price": 10, "quantity": 1 }
//! ]
//! ```
//!
//! The same format was written by the mobile app, so existing records on a
//! device keep loading.

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};

/// Serializes the full cart into its record form.
///
/// ## Errors
/// [`CoreError::InvalidPrice`] when an item's price is NaN or infinite.
/// Nothing is written in that case, so the stored record stays decodable.
pub fn encode(cart: &Cart) -> CoreResult<String> {
    if let Some(item) = cart.items().iter().find(|item| !item.price.is_finite()) {
        return Err(CoreError::InvalidPrice {
            id: item.id.clone(),
            price: item.price,
        });
    }
    serde_json::to_string(cart).map_err(CoreError::Serialization)
}

/// Parses a record back into a cart.
///
/// ## Errors
/// [`CoreError::MalformedRecord`] when the text is not a JSON array of line
/// items, including negative or fractional quantities.
pub fn decode(record: &str) -> CoreResult<Cart> {
    serde_json::from_str(record).map_err(CoreError::MalformedRecord)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NewLineItem;

    #[test]
    fn test_round_trip_preserves_order_and_fields() {
        let cart = Cart::new()
            .with_added(&NewLineItem::new("b", "Boots", "img/b", 59.9))
            .with_added(&NewLineItem::new("a", "Apron", "img/a", 12.5))
            .with_incremented("b");

        let decoded = decode(&encode(&cart).unwrap()).unwrap();

        assert_eq!(decoded, cart);
        assert_eq!(decoded.items()[0].id, "b");
        assert_eq!(decoded.items()[0].quantity, 2);
    }

    #[test]
    fn test_decode_record_written_by_mobile_app() {
        let record = r#"[{"id":"p1","title":"Shirt","image_url":"u","price":10,"quantity":1}]"#;

        let cart = decode(record).unwrap();

        let item = cart.get("p1").unwrap();
        assert_eq!(item.price, 10.0);
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_empty_cart_encodes_as_empty_array() {
        assert_eq!(encode(&Cart::new()).unwrap(), "[]");
    }

    #[test]
    fn test_decode_rejects_non_array() {
        let err = decode(r#"{"id":"p1"}"#).unwrap_err();
        assert!(matches!(err, CoreError::MalformedRecord(_)));
    }

    #[test]
    fn test_decode_rejects_negative_quantity() {
        let record = r#"[{"id":"p1","title":"Shirt","image_url":"u","price":10,"quantity":-1}]"#;
        assert!(decode(record).is_err());
    }

    #[test]
    fn test_encode_refuses_non_finite_price() {
        let cart = Cart::new()
            .with_added(&NewLineItem::new("p1", "Shirt", "u", 10.0))
            .with_added(&NewLineItem::new("p2", "Hat", "h", f64::NAN));

        let err = encode(&cart).unwrap_err();

        assert!(matches!(err, CoreError::InvalidPrice { ref id, .. } if id == "p2"));
    }
}
