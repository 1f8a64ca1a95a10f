// File: crates/statgraph-core/src/format.rs
// Summary: Compact SI-prefixed number formatting for value-axis tick labels.

/// SI prefixes from yocto (10^-24) to yotta (10^24), one per power of 1000.
const PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

/// Digits of the exponential form; enough to detect exact rounding ties.
const EXPANSION_DIGITS: usize = 24;

/// Format `value` with an SI prefix and two significant digits.
///
/// Matches the `.2s` convention of web charting libraries, trailing zeros kept:
/// `0` -> `0.0`, `10` -> `10`, `500` -> `500`, `1234` -> `1.2k`, `0.5` -> `500m`.
/// Negative values use the unicode minus sign.
pub fn format_si(value: f64) -> String {
    format_si_with_precision(value, 2)
}

/// Format `value` with an SI prefix and `precision` significant digits (clamped to 1..=21).
pub fn format_si_with_precision(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let p = precision.clamp(1, 21);
    let (digits, exponent) = exponential_digits(value.abs(), p);

    let k = exponent.div_euclid(3).clamp(-8, 8);
    let i = exponent - k * 3 + 1;
    let n = p as i32;
    let coefficient: String = digits.iter().map(|d| char::from(b'0' + d)).collect();

    let body = if i == n {
        coefficient
    } else if i > n {
        let mut s = coefficient;
        s.extend(std::iter::repeat('0').take((i - n) as usize));
        s
    } else if i > 0 {
        let (head, tail) = coefficient.split_at(i as usize);
        format!("{head}.{tail}")
    } else {
        // Below the smallest prefix: pad with leading zeros.
        let (rest, _) = exponential_digits(value.abs(), (p as i32 + i - 1).max(1) as usize);
        let rest: String = rest.iter().map(|d| char::from(b'0' + d)).collect();
        format!("0.{}{rest}", "0".repeat((-i) as usize))
    };

    let negative = value.is_sign_negative() && digits.iter().any(|&d| d != 0);
    let sign = if negative { "\u{2212}" } else { "" };
    format!("{sign}{body}{}", PREFIXES[(8 + k) as usize])
}

/// Significant digits and decimal exponent of `x` (non-negative, finite), rounded
/// to `p` digits with ties away from zero.
fn exponential_digits(x: f64, p: usize) -> (Vec<u8>, i32) {
    if x == 0.0 {
        return (vec![0; p], 0);
    }
    let expanded = format!("{:.*e}", EXPANSION_DIGITS, x);
    let (mantissa, exp) = match expanded.split_once('e') {
        Some(parts) => parts,
        None => return (vec![0; p], 0),
    };
    let mut exponent: i32 = exp.parse().unwrap_or(0);
    let all: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).map(|b| b - b'0').collect();

    let mut kept: Vec<u8> = all.iter().copied().take(p).collect();
    kept.resize(p, 0);
    if all.get(p).copied().unwrap_or(0) >= 5 {
        let mut carry = true;
        for d in kept.iter_mut().rev() {
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, 1);
            kept.truncate(p);
            exponent += 1;
        }
    }
    (kept, exponent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_integers_keep_two_significant_digits() {
        assert_eq!(format_si(0.0), "0.0");
        assert_eq!(format_si(5.0), "5.0");
        assert_eq!(format_si(10.0), "10");
        assert_eq!(format_si(50.0), "50");
        assert_eq!(format_si(500.0), "500");
    }

    #[test]
    fn thousands_and_millions_get_prefixes() {
        assert_eq!(format_si(1200.0), "1.2k");
        assert_eq!(format_si(1234.0), "1.2k");
        assert_eq!(format_si(20_000.0), "20k");
        assert_eq!(format_si(1_500_000.0), "1.5M");
        assert_eq!(format_si(3_000_000_000.0), "3.0G");
    }

    #[test]
    fn ties_round_up_and_carry_into_the_next_prefix() {
        assert_eq!(format_si(1250.0), "1.3k");
        assert_eq!(format_si(999_999.0), "1.0M");
        assert_eq!(format_si(99.5), "100");
    }

    #[test]
    fn fractions_use_sub_unit_prefixes() {
        assert_eq!(format_si(0.5), "500m");
        assert_eq!(format_si(0.025), "25m");
    }

    #[test]
    fn negative_values_use_minus_sign() {
        assert_eq!(format_si(-20_000.0), "\u{2212}20k");
        assert_eq!(format_si(-0.0), "0.0");
    }

    #[test]
    fn precision_is_configurable() {
        assert_eq!(format_si_with_precision(1234.0, 3), "1.23k");
        assert_eq!(format_si_with_precision(1234.0, 1), "1k");
    }
}
