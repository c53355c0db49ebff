//! Google Fonts stylesheet URL for the families used by a campaign.

use slidebar_model::{BlockKind, CampaignConfig, Device, ShippingSetting, TextSetting};

pub const GOOGLE_FONTS_BASE: &str = "https://fonts.googleapis.com/css";

const GENERIC_FAMILIES: &[&str] = &[
    "inherit",
    "initial",
    "serif",
    "sans-serif",
    "monospace",
    "cursive",
    "system-ui",
];

/// Distinct font families referenced by Text and freeShippingBar blocks,
/// in first-use order, across both devices.
pub fn collect_font_families(config: &CampaignConfig) -> Vec<String> {
    let mut families: Vec<String> = Vec::new();
    for block in config.all_blocks() {
        for device in [Device::Desktop, Device::Mobile] {
            let family = match block.kind() {
                BlockKind::Text => block.setting_or_default::<TextSetting>(device).font_family,
                BlockKind::FreeShippingBar => block.setting_or_default::<ShippingSetting>(device).font_family,
                _ => None,
            };
            if let Some(family) = family {
                let family = family.trim().trim_matches(|c| c == '"' || c == '\'').to_string();
                if family.is_empty() || GENERIC_FAMILIES.contains(&family.to_lowercase().as_str()) {
                    continue;
                }
                if !families.contains(&family) {
                    families.push(family);
                }
            }
        }
    }
    families
}

/// `https://fonts.googleapis.com/css?family=Open+Sans|Roboto&display=swap`
pub fn google_fonts_url(base: &str, families: &[String]) -> Option<String> {
    if families.is_empty() {
        return None;
    }
    let joined = families
        .iter()
        .map(|family| family.split_whitespace().collect::<Vec<_>>().join("+"))
        .collect::<Vec<_>>()
        .join("|");
    Some(format!("{}?family={}&display=swap", base, joined))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use slidebar_model::BlockDescriptor;

    #[test]
    fn test_collects_distinct_families() {
        let config = CampaignConfig {
            html_design: vec![
                BlockDescriptor::new("t1", BlockKind::Text, json!({ "fontFamily": "Open Sans" }))
                    .with_mobile(json!({ "fontFamily": "Roboto" })),
                BlockDescriptor::new("t2", BlockKind::Text, json!({ "fontFamily": "Open Sans" })),
                BlockDescriptor::new("s1", BlockKind::FreeShippingBar, json!({ "fontFamily": "sans-serif" })),
                BlockDescriptor::new("b1", BlockKind::Button, json!({ "btnFontFamily": "Lato" })),
            ],
            ..Default::default()
        };

        assert_eq!(collect_font_families(&config), vec!["Open Sans", "Roboto"]);
    }

    #[test]
    fn test_url_format() {
        let url = google_fonts_url(GOOGLE_FONTS_BASE, &["Open Sans".to_string(), "Roboto".to_string()]);
        assert_eq!(
            url.as_deref(),
            Some("https://fonts.googleapis.com/css?family=Open+Sans|Roboto&display=swap")
        );
        assert_eq!(google_fonts_url(GOOGLE_FONTS_BASE, &[]), None);
    }
}
