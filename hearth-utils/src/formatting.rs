use chrono::{DateTime, Utc};

/// Format a join timestamp as `DD.MM.YYYY` (UTC).
pub fn format_join_date(joined_at: &DateTime<Utc>) -> String {
    joined_at.format("%d.%m.%Y").to_string()
}

/// Pick the friendliest name for a user: first name, then `@username`, then `Player <id>`.
pub fn display_name(first_name: Option<&str>, username: Option<&str>, user_id: u64) -> String {
    if let Some(first) = first_name.map(str::trim).filter(|name| !name.is_empty()) {
        return first.replace('\n', " ");
    }

    if let Some(username) = username.map(str::trim).filter(|name| !name.is_empty()) {
        return format!("@{}", username.trim_start_matches('@'));
    }

    format!("Player {}", user_id)
}

/// Escape text for Telegram's HTML parse mode.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{display_name, escape_html, format_join_date};

    #[test]
    fn join_dates_use_day_month_year() {
        let joined = Utc.with_ymd_and_hms(2024, 3, 7, 23, 59, 0).unwrap();
        assert_eq!(format_join_date(&joined), "07.03.2024");

        let new_year = Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap();
        assert_eq!(format_join_date(&new_year), "31.12.2025");
    }

    #[test]
    fn display_name_falls_back_in_order() {
        assert_eq!(display_name(Some("Ann"), Some("ann_k"), 42), "Ann");
        assert_eq!(display_name(Some("  "), Some("ann_k"), 42), "@ann_k");
        assert_eq!(display_name(None, Some("@ann_k"), 42), "@ann_k");
        assert_eq!(display_name(None, None, 42), "Player 42");
    }

    #[test]
    fn escapes_html_special_characters() {
        assert_eq!(escape_html("<b>Tom & \"Jerry\"</b>"), "&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;");
        assert_eq!(escape_html("Ann"), "Ann");
    }
}
