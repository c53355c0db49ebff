//! Slide background normalization.
//!
//! Older campaigns store a bare image filename from the background gallery
//! instead of a CSS value. Detection order is fixed: gradients, then hex
//! colors, then values already wrapped in `url(...)`; anything else is a
//! gallery filename.

pub fn normalize_background(value: &str, asset_base_url: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }
    if value.starts_with("radial-gradient(") || value.starts_with("linear-gradient(") {
        return value.to_string();
    }
    if value.starts_with('#') {
        return value.to_string();
    }
    if value.starts_with("url(") {
        return value.to_string();
    }
    format!("url({}/background/{})", asset_base_url.trim_end_matches('/'), value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://cdn.example.com/assets/";

    #[test]
    fn test_css_values_pass_through() {
        assert_eq!(normalize_background("#ff0000", BASE), "#ff0000");
        assert_eq!(
            normalize_background("linear-gradient(90deg, #000, #fff)", BASE),
            "linear-gradient(90deg, #000, #fff)"
        );
        assert_eq!(
            normalize_background("radial-gradient(circle, #000, #fff)", BASE),
            "radial-gradient(circle, #000, #fff)"
        );
        assert_eq!(normalize_background("url(a.png)", BASE), "url(a.png)");
    }

    #[test]
    fn test_bare_filename_is_wrapped() {
        assert_eq!(
            normalize_background("stars.png", BASE),
            "url(https://cdn.example.com/assets/background/stars.png)"
        );
    }

    #[test]
    fn test_empty_stays_empty() {
        assert_eq!(normalize_background("  ", BASE), "");
    }
}
