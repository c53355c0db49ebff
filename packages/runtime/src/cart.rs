//! Storefront cart total.
//!
//! The shipping widget needs one number: `original_total_price` from
//! `GET /cart.json`, in cents. The fetch itself belongs to the host; the
//! engine only sees a [`CartSource`].

use crate::error::CartError;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CartTotal {
    /// Integer cents
    pub original_total_price: i64,
}

impl CartTotal {
    pub fn from_cents(cents: i64) -> Self {
        Self {
            original_total_price: cents,
        }
    }

    /// Total in currency units, as the shipping threshold is configured
    pub fn value(&self) -> f64 {
        self.original_total_price as f64 / 100.0
    }
}

pub trait CartSource {
    fn fetch_total(&mut self) -> Result<CartTotal, CartError>;
}

/// Parse a `/cart.json` body; extra fields are ignored
pub fn parse_cart_json(body: &str) -> Result<CartTotal, CartError> {
    Ok(serde_json::from_str(body)?)
}

/// A cart that always reports the same total
#[derive(Debug, Clone)]
pub struct StaticCart {
    total: CartTotal,
}

impl StaticCart {
    pub fn new(cents: i64) -> Self {
        Self {
            total: CartTotal::from_cents(cents),
        }
    }

    pub fn from_json(body: &str) -> Result<Self, CartError> {
        Ok(Self {
            total: parse_cart_json(body)?,
        })
    }
}

impl CartSource for StaticCart {
    fn fetch_total(&mut self) -> Result<CartTotal, CartError> {
        Ok(self.total)
    }
}

/// No cart endpoint, e.g. inside the admin editor
#[derive(Debug, Clone, Default)]
pub struct UnavailableCart;

impl CartSource for UnavailableCart {
    fn fetch_total(&mut self) -> Result<CartTotal, CartError> {
        Err(CartError::Unavailable("no cart endpoint".to_string()))
    }
}
