use chrono::NaiveDate;

const API_DATE: &str = "%Y-%m-%d";

/// `125` renders as `2h 5m`, `120` as `2h`.
pub fn runtime(minutes: u32) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    if rest > 0 {
        format!("{hours}h {rest}m")
    } else {
        format!("{hours}h")
    }
}

/// `2023-07-19` renders as `Jul 19, 2023`. Unparseable input yields `None`.
pub fn long_date(date: &str) -> Option<String> {
    NaiveDate::parse_from_str(date.trim(), API_DATE)
        .ok()
        .map(|d| d.format("%b %-d, %Y").to_string())
}

pub fn year(date: &str) -> Option<String> {
    NaiveDate::parse_from_str(date.trim(), API_DATE)
        .ok()
        .map(|d| d.format("%Y").to_string())
}

pub fn rating(value: f32) -> String {
    format!("{value:.1}")
}

pub fn title_with_year(title: &str, date: Option<&str>) -> String {
    match date.and_then(year) {
        Some(year) => format!("{title} ({year})"),
        None => title.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_drops_zero_minutes() {
        assert_eq!(runtime(125), "2h 5m");
        assert_eq!(runtime(120), "2h");
        assert_eq!(runtime(45), "0h 45m");
    }

    #[test]
    fn long_date_uses_short_month() {
        assert_eq!(long_date("2023-07-09").as_deref(), Some("Jul 9, 2023"));
        assert_eq!(long_date("1995-12-15").as_deref(), Some("Dec 15, 1995"));
        assert_eq!(long_date(""), None);
        assert_eq!(long_date("soon"), None);
    }

    #[test]
    fn title_gets_year_suffix_when_known() {
        assert_eq!(title_with_year("Heat", Some("1995-12-15")), "Heat (1995)");
        assert_eq!(title_with_year("Heat", None), "Heat");
    }

    #[test]
    fn rating_has_one_decimal() {
        assert_eq!(rating(7.26), "7.3");
        assert_eq!(rating(8.0), "8.0");
    }
}
