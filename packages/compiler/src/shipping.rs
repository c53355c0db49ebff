//! Free-shipping goal text.
//!
//! The compiler bakes the configured messages into data attributes; the live
//! widget reads them back whenever the cart total changes. Both sides go
//! through [`ShippingAttributes`] so the attribute contract lives in one place.

use slidebar_model::{CurrencyPosition, ShippingSetting};

pub const ATTR_START: &str = "progress-start-msg";
pub const ATTR_PRICE: &str = "price-data";
pub const ATTR_CURRENCY: &str = "currency";
pub const ATTR_POSITION: &str = "position";
pub const ATTR_END: &str = "progress-end-msg";
pub const ATTR_GOAL: &str = "gole-msg";

#[derive(Debug, Clone, PartialEq)]
pub struct ShippingAttributes {
    pub start: String,
    pub end: String,
    pub goal: String,
    pub price: f64,
    pub currency: String,
    pub position: CurrencyPosition,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShippingState {
    Progress { remaining: f64 },
    Goal,
}

impl ShippingAttributes {
    pub fn from_setting(setting: &ShippingSetting) -> Self {
        Self {
            start: setting.progress_start_msg.clone(),
            end: setting.progress_end_msg.clone(),
            goal: setting.goal_msg.clone(),
            price: setting.shipping_price,
            currency: setting.currency.clone(),
            position: setting.currency_position.clone(),
        }
    }

    /// Attributes carried by the progress span
    pub fn progress_attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            (ATTR_START, self.start.clone()),
            (ATTR_PRICE, format_amount(self.price)),
            (ATTR_CURRENCY, self.currency.clone()),
            (ATTR_POSITION, self.position.to_string()),
            (ATTR_END, self.end.clone()),
        ]
    }

    /// Rebuild from attributes read off the DOM; `None` if the price is unusable
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let price = get(ATTR_PRICE)?.trim().parse::<f64>().ok()?;
        Some(Self {
            start: get(ATTR_START).unwrap_or_default(),
            end: get(ATTR_END).unwrap_or_default(),
            goal: get(ATTR_GOAL).unwrap_or_default(),
            price,
            currency: get(ATTR_CURRENCY).unwrap_or_default(),
            position: get(ATTR_POSITION).map(CurrencyPosition::from).unwrap_or_default(),
        })
    }

    pub fn state(&self, cart_value: f64) -> ShippingState {
        shipping_state(cart_value, self.price)
    }

    pub fn remaining_text(&self, remaining: f64) -> String {
        format_money(remaining, &self.currency, &self.position)
    }
}

/// Goal is reached inclusively: `cart_value >= price`
pub fn shipping_state(cart_value: f64, price: f64) -> ShippingState {
    if cart_value >= price {
        ShippingState::Goal
    } else {
        ShippingState::Progress {
            remaining: price - cart_value,
        }
    }
}

pub fn format_money(amount: f64, currency: &str, position: &CurrencyPosition) -> String {
    let amount = format_amount(amount);
    match position {
        CurrencyPosition::After => format!("{}{}", amount, currency),
        _ => format!("{}{}", currency, amount),
    }
}

/// Whole amounts print without decimals, others with two
pub fn format_amount(amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{:.2}", rounded)
    }
}
