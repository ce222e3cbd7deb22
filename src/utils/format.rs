//! Display formatting helpers

/// Compact XP display: values above 999 in magnitude become `1.2k`
pub fn format_xp(xp: i64) -> String {
    if xp.abs() <= 999 {
        return xp.to_string();
    }

    let thousands = (xp.abs() as f64 / 1000.0 * 10.0).round() / 10.0;
    let sign = if xp < 0 { "-" } else { "" };
    if thousands.fract() == 0.0 {
        format!("{}{}k", sign, thousands as i64)
    } else {
        format!("{}{:.1}k", sign, thousands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_xp() {
        assert_eq!(format_xp(0), "0");
        assert_eq!(format_xp(999), "999");
        assert_eq!(format_xp(-999), "-999");
        assert_eq!(format_xp(1000), "1k");
        assert_eq!(format_xp(1250), "1.3k");
        assert_eq!(format_xp(15_040), "15k");
        assert_eq!(format_xp(-2500), "-2.5k");
    }
}
