use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One day's placements: planet full name to a `"Sign degree"` display
/// string, inserted in canonical planet order (Sun through Pluto).
pub type DayRecord = Map<String, Value>;

/// Day of month to placements. The integer keys keep days numerically
/// ordered; serialization renders them as decimal strings, no zero padding.
pub type MonthRecord = BTreeMap<u32, DayRecord>;

/// Full English month name to month record, inserted in calendar order.
pub type YearSnapshot = Map<String, Value>;

/// Column order of the upstream ephemeris table: two-letter abbreviation as
/// printed in the table legend, and the full name we key the output by.
pub const PLANETS: [(&str, &str); 10] = [
    ("SU", "Sun"),
    ("MO", "Moon"),
    ("ME", "Mercury"),
    ("VE", "Venus"),
    ("MA", "Mars"),
    ("JU", "Jupiter"),
    ("SA", "Saturn"),
    ("UR", "Uranus"),
    ("NE", "Neptune"),
    ("PL", "Pluto"),
];

/// Resolves a three-letter zodiac code (the `alt` text of a sign glyph).
pub fn zodiac_name(abbr: &str) -> Option<&'static str> {
    Some(match abbr {
        "ARI" => "Aries",
        "TAU" => "Taurus",
        "GEM" => "Gemini",
        "CAN" => "Cancer",
        "LEO" => "Leo",
        "VIR" => "Virgo",
        "LIB" => "Libra",
        "SCO" => "Scorpio",
        "SAG" => "Sagittarius",
        "CAP" => "Capricorn",
        "AQU" => "Aquarius",
        "PIS" => "Pisces",
        _ => return None,
    })
}

pub fn month_name(month: u32) -> Option<&'static str> {
    let month = u8::try_from(month).ok()?;
    chrono::Month::try_from(month).ok().map(|m| m.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zodiac_codes_resolve_to_full_names() {
        assert_eq!(zodiac_name("LEO"), Some("Leo"));
        assert_eq!(zodiac_name("CAP"), Some("Capricorn"));
        assert_eq!(zodiac_name("XXX"), None);
        assert_eq!(zodiac_name(""), None);
        assert_eq!(zodiac_name("leo"), None);
    }

    #[test]
    fn planet_table_is_in_upstream_column_order() {
        assert_eq!(PLANETS.len(), 10);
        assert_eq!(PLANETS[0], ("SU", "Sun"));
        assert_eq!(PLANETS[9], ("PL", "Pluto"));
    }

    #[test]
    fn month_names_cover_the_calendar() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }
}
