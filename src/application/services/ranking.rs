//! # Quote Ranking
//!
//! De-duplication and price ordering of normalized carrier quotes.
//!
//! ```
//! use rust_decimal::Decimal;
//! use shipping_quote::application::services::ranking::rank_quotes;
//! use shipping_quote::domain::entities::CarrierQuote;
//! use shipping_quote::domain::value_objects::{CarrierId, DeliveryType};
//!
//! let quote = |price| CarrierQuote::new(
//!     CarrierId::new("coordinadora"), "ground", "Terrestre",
//!     DeliveryType::Domicile, Decimal::new(price, 0), "COP",
//! );
//!
//! let ranked = rank_quotes(vec![quote(12_000), quote(9_500)]);
//! assert_eq!(ranked.len(), 1);
//! assert_eq!(ranked[0].price(), Decimal::new(9_500, 0));
//! ```

use crate::domain::entities::{CarrierQuote, QuoteKey};
use std::collections::HashMap;

/// Keeps the cheapest quote per (carrier, service, delivery type).
///
/// Output order is first-seen order of each key. On equal prices the
/// earlier quote is kept.
#[must_use]
pub fn dedupe_cheapest(quotes: Vec<CarrierQuote>) -> Vec<CarrierQuote> {
    let mut slots: HashMap<QuoteKey, usize> = HashMap::with_capacity(quotes.len());
    let mut kept: Vec<CarrierQuote> = Vec::with_capacity(quotes.len());

    for quote in quotes {
        match slots.get(&quote.key()).and_then(|&i| kept.get_mut(i)) {
            Some(existing) => {
                if quote.price() < existing.price() {
                    *existing = quote;
                }
            }
            None => {
                slots.insert(quote.key(), kept.len());
                kept.push(quote);
            }
        }
    }
    kept
}

/// Sorts ascending by price. Stable, so equal prices keep arrival order.
pub fn sort_by_price(quotes: &mut [CarrierQuote]) {
    quotes.sort_by_key(CarrierQuote::price);
}

/// De-duplicates, then sorts by price.
#[must_use]
pub fn rank_quotes(quotes: Vec<CarrierQuote>) -> Vec<CarrierQuote> {
    let mut ranked = dedupe_cheapest(quotes);
    sort_by_price(&mut ranked);
    ranked
}
