//! Typed views over block setting bags.
//!
//! Every struct is `#[serde(default)]`: the admin panel only stores the keys
//! a merchant touched, and a missing key must never fail a render.

use crate::lenient;
use crate::names::string_enum;
use serde::{Deserialize, Serialize};

string_enum! {
    /// `callToActionOption.buttonType`
    pub enum ButtonType {
        Button => "button",
        /// Whole bar is one link; the button itself is not rendered
        Entire => "entire",
        BtnLink => "btnLink",
        BtnCoupon => "btnCoupon",
    }
    default = Button;
}

string_enum! {
    pub enum TimerType {
        Normal => "normal",
        Repeated => "repeated",
    }
    default = Normal;
}

string_enum! {
    pub enum CurrencyPosition {
        Before => "before",
        After => "after",
    }
    default = Before;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextSetting {
    pub text: String,
    #[serde(deserialize_with = "lenient::flag")]
    pub rich_text: bool,
    pub font_family: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub font_size: f64,
    pub font_weight: Option<String>,
    pub text_color: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub italic: bool,
    #[serde(deserialize_with = "lenient::flag")]
    pub underline: bool,
    pub text_align: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub letter_spacing: f64,
}

impl Default for TextSetting {
    fn default() -> Self {
        Self {
            text: String::new(),
            rich_text: false,
            font_family: None,
            font_size: 16.0,
            font_weight: None,
            text_color: None,
            italic: false,
            underline: false,
            text_align: None,
            letter_spacing: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CallToActionOption {
    pub button_type: ButtonType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonSetting {
    pub btn_name: String,
    pub btn_link: Option<String>,
    pub btn_color: Option<String>,
    pub btn_text_color: Option<String>,
    pub btn_hover_color: Option<String>,
    pub btn_hover_text_color: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub btn_radius: f64,
    pub btn_border_color: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub btn_border_width: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub btn_font_size: f64,
    pub btn_font_family: Option<String>,
    pub btn_padding: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub open_new_tab: bool,
    pub coupon_code: Option<String>,
    pub call_to_action_option: CallToActionOption,
}

impl ButtonSetting {
    pub fn button_type(&self) -> &ButtonType {
        &self.call_to_action_option.button_type
    }
}

impl Default for ButtonSetting {
    fn default() -> Self {
        Self {
            btn_name: String::new(),
            btn_link: None,
            btn_color: None,
            btn_text_color: None,
            btn_hover_color: None,
            btn_hover_text_color: None,
            btn_radius: 4.0,
            btn_border_color: None,
            btn_border_width: 1.0,
            btn_font_size: 14.0,
            btn_font_family: None,
            btn_padding: None,
            open_new_tab: false,
            coupon_code: None,
            call_to_action_option: CallToActionOption::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepeatedTimer {
    #[serde(deserialize_with = "lenient::number")]
    pub repeated_hours: f64,
    pub repeat_timer_create_date: Option<String>,
    pub repeated_time_end: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimerTextOption {
    pub day_text: String,
    pub hour_text: String,
    pub minute_text: String,
    pub second_text: String,
    pub expired_text: String,
}

impl Default for TimerTextOption {
    fn default() -> Self {
        Self {
            day_text: "Days".to_string(),
            hour_text: "Hrs".to_string(),
            minute_text: "Mins".to_string(),
            second_text: "Secs".to_string(),
            expired_text: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClockSetting {
    pub timer_type: TimerType,
    pub timer: Option<String>,
    pub repeated_timer: RepeatedTimer,
    pub timer_text_color: Option<String>,
    pub timer_background_color: Option<String>,
    /// Show unit labels under the digits
    #[serde(deserialize_with = "lenient::flag")]
    pub timer_custom_opt: bool,
    pub timer_text_option: TimerTextOption,
    #[serde(deserialize_with = "lenient::flag")]
    pub remove_timer: bool,
    #[serde(deserialize_with = "lenient::number")]
    pub timer_font_size: f64,
    pub timer_font_family: Option<String>,
}

impl Default for ClockSetting {
    fn default() -> Self {
        Self {
            timer_type: TimerType::Normal,
            timer: None,
            repeated_timer: RepeatedTimer::default(),
            timer_text_color: None,
            timer_background_color: None,
            timer_custom_opt: true,
            timer_text_option: TimerTextOption::default(),
            remove_timer: false,
            timer_font_size: 18.0,
            timer_font_family: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingSetting {
    pub progress_start_msg: String,
    pub progress_end_msg: String,
    pub goal_msg: String,
    #[serde(deserialize_with = "lenient::number")]
    pub shipping_price: f64,
    pub currency: String,
    pub currency_position: CurrencyPosition,
    pub font_family: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub font_size: f64,
    pub text_color: Option<String>,
    pub price_color: Option<String>,
}

impl Default for ShippingSetting {
    fn default() -> Self {
        Self {
            progress_start_msg: "Only".to_string(),
            progress_end_msg: "away from free shipping".to_string(),
            goal_msg: "Congratulations! You've got free shipping".to_string(),
            shipping_price: 100.0,
            currency: "$".to_string(),
            currency_position: CurrencyPosition::Before,
            font_family: None,
            font_size: 16.0,
            text_color: None,
            price_color: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductSetting {
    #[serde(deserialize_with = "lenient::flag")]
    pub show_image: bool,
    #[serde(deserialize_with = "lenient::flag")]
    pub show_title: bool,
    #[serde(deserialize_with = "lenient::flag")]
    pub show_price: bool,
    pub product_title: String,
    pub product_price: Option<String>,
    pub product_image: Option<String>,
    pub text_color: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub font_size: f64,
}

impl Default for ProductSetting {
    fn default() -> Self {
        Self {
            show_image: true,
            show_title: true,
            show_price: true,
            product_title: String::new(),
            product_price: None,
            product_image: None,
            text_color: None,
            font_size: 15.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VariantOption {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VariantSetting {
    #[serde(deserialize_with = "lenient::flag")]
    pub show_variant: bool,
    pub variants: Vec<VariantOption>,
    pub selected_variant: Option<String>,
}

impl Default for VariantSetting {
    fn default() -> Self {
        Self {
            show_variant: true,
            variants: Vec::new(),
            selected_variant: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuantitySetting {
    #[serde(deserialize_with = "lenient::flag")]
    pub show_quantity: bool,
    #[serde(deserialize_with = "lenient::number")]
    pub default_quantity: f64,
}

impl Default for QuantitySetting {
    fn default() -> Self {
        Self {
            show_quantity: true,
            default_quantity: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailSetting {
    pub placeholder: String,
    pub input_background: Option<String>,
    pub input_text_color: Option<String>,
    pub input_border_color: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub required: bool,
}

impl Default for EmailSetting {
    fn default() -> Self {
        Self {
            placeholder: "Enter your email".to_string(),
            input_background: None,
            input_text_color: None,
            input_border_color: None,
            required: true,
        }
    }
}
