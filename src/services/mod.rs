pub mod admin_service;
pub mod auth_service;
pub mod content_service;
pub mod ebook_service;
pub mod email;
pub mod page_service;
pub mod paper_service;
pub mod quiz_attempt_service;
pub mod quiz_service;

use chrono::NaiveDate;

/// "2025-02" -> "February 2025"; anything unparsable -> "Unknown".
pub(crate) fn month_label(key: &str) -> String {
    NaiveDate::parse_from_str(&format!("{}-01", key), "%Y-%m-%d")
        .map(|date| date.format("%B %Y").to_string())
        .unwrap_or_else(|_| "Unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_label_formats_known_months() {
        assert_eq!(month_label("2025-02"), "February 2025");
        assert_eq!(month_label("2024-12"), "December 2024");
    }

    #[test]
    fn test_month_label_falls_back_to_unknown() {
        assert_eq!(month_label("unknown"), "Unknown");
        assert_eq!(month_label(""), "Unknown");
        assert_eq!(month_label("2025-13"), "Unknown");
    }
}
