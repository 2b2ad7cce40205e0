//! Number formatting shared by insight messages

/// Dollar amount with two decimals: `$1234.50`
pub fn money(amount: f64) -> String {
    format!("${:.2}", round_half_up(amount, 2))
}

/// Percentage with one decimal, without the sign: `40.0`
pub fn pct(value: f64) -> String {
    format!("{:.1}", round_half_up(value, 1))
}

/// Round exact ties away from zero
///
/// `{:.N}` already rounds the exact binary value correctly but sends true ties
/// to even. A tie only exists when scaling is exact, which the fused
/// multiply-add residue confirms.
fn round_half_up(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    let scaled = value * scale;
    let exact = value.mul_add(scale, -scaled) == 0.0;
    if exact && scaled.fract().abs() == 0.5 {
        scaled.round() / scale
    } else {
        value
    }
}

/// Band bound as written in the recommendation table: `30`, `2.5`
pub fn bound(value: f64) -> String {
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats() {
        assert_eq!(money(2000.0), "$2000.00");
        assert_eq!(money(0.125), "$0.13");
        assert_eq!(pct(40.0), "40.0");
        assert_eq!(pct(7.46), "7.5");
        assert_eq!(bound(30.0), "30");
        assert_eq!(bound(2.5), "2.5");
    }

    #[test]
    fn test_ties_round_up() {
        assert_eq!(money(0.125), "$0.13");
        assert_eq!(money(2.675), "$2.67");
        assert_eq!(money(-0.125), "$-0.13");
        assert_eq!(pct(12.25), "12.3");
        assert_eq!(pct(0.05), "0.1");
        assert_eq!(pct(1.25), "1.3");
    }
}
