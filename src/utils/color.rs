use egui::Color32;

/// Parses a `#rrggbb` hex string into a Color32.
pub fn from_hex(hex: &str) -> Option<Color32> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color32::from_rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_hex() {
        assert_eq!(from_hex("#a159e1"), Some(Color32::from_rgb(161, 89, 225)));
        assert_eq!(from_hex("ffffff"), Some(Color32::WHITE));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(from_hex("#fff"), None);
        assert_eq!(from_hex("#zzzzzz"), None);
    }
}
