//! Numeric conversion shims.
//!
//! The parser and serializer treat float/string conversion as a service
//! with a fixed contract: a junk-tolerant prefix parse on the way in and
//! shortest-round-trippable formatting on the way out. [`ryu`] supplies
//! the shortest form; the JSON policy layered on top is a unique zero,
//! an explicit `+` on positive exponents, the literal `1e5000` for
//! infinities, and `null` for NaN (NaN has no JSON representation).

/// Convert the longest numeric prefix of `input` to a double.
///
/// Skips leading whitespace, tolerates trailing junk, and recognizes
/// `Infinity` and `NaN` case-insensitively. Returns the value and the
/// number of bytes consumed; `(0.0, 0)` when no prefix converts.
pub(crate) fn double_from_prefix(input: &[u8]) -> (f64, usize) {
    let mut i = 0;
    while i < input.len() && matches!(input[i], b' ' | b'\t' | b'\n' | b'\r') {
        i += 1;
    }
    let start = i;
    let mut negative = false;
    if let Some(&sign) = input.get(i) {
        if sign == b'-' || sign == b'+' {
            negative = sign == b'-';
            i += 1;
        }
    }
    if let Some(n) = match_symbol(&input[i..], "infinity") {
        let value = if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        return (value, i + n);
    }
    if let Some(n) = match_symbol(&input[i..], "nan") {
        return (f64::NAN, i + n);
    }

    let int_len = leading_digits(&input[i..]);
    i += int_len;
    let mut frac_len = 0;
    if input.get(i) == Some(&b'.') {
        frac_len = leading_digits(&input[i + 1..]);
        if frac_len > 0 {
            i += 1 + frac_len;
        }
    }
    if int_len == 0 && frac_len == 0 {
        return (0.0, 0);
    }
    if let Some(&(b'e' | b'E')) = input.get(i) {
        let mut j = i + 1;
        if matches!(input.get(j), Some(&(b'+' | b'-'))) {
            j += 1;
        }
        let exp_len = leading_digits(&input[j..]);
        if exp_len > 0 {
            i = j + exp_len;
        }
    }

    match core::str::from_utf8(&input[start..i])
        .ok()
        .and_then(|text| text.parse::<f64>().ok())
    {
        Some(value) => (value, i),
        None => (0.0, 0),
    }
}

fn match_symbol(input: &[u8], symbol: &str) -> Option<usize> {
    let n = symbol.len();
    let head = input.get(..n)?;
    head.eq_ignore_ascii_case(symbol.as_bytes()).then_some(n)
}

fn leading_digits(input: &[u8]) -> usize {
    input.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Append a base-10 integer.
pub(crate) fn write_long(out: &mut String, value: i64) {
    out.push_str(itoa::Buffer::new().format(value));
}

/// Append the shortest round-trippable form of a double.
pub(crate) fn write_double(out: &mut String, value: f64) {
    if value.is_nan() {
        out.push_str("null");
    } else if value.is_infinite() {
        out.push_str(if value.is_sign_negative() {
            "-1e5000"
        } else {
            "1e5000"
        });
    } else if value == 0.0 {
        out.push('0');
    } else {
        push_shortest(out, ryu::Buffer::new().format_finite(value));
    }
}

/// Append the shortest round-trippable form of a single-precision float.
pub(crate) fn write_float(out: &mut String, value: f32) {
    if value.is_nan() {
        out.push_str("null");
    } else if value.is_infinite() {
        out.push_str(if value.is_sign_negative() {
            "-1e5000"
        } else {
            "1e5000"
        });
    } else if value == 0.0 {
        out.push('0');
    } else {
        push_shortest(out, ryu::Buffer::new().format_finite(value));
    }
}

// Positive exponents carry an explicit sign: 1e30 prints as 1e+30.
fn push_shortest(out: &mut String, digits: &str) {
    match digits.find('e') {
        Some(i) if digits.as_bytes().get(i + 1).is_some_and(u8::is_ascii_digit) => {
            out.push_str(&digits[..=i]);
            out.push('+');
            out.push_str(&digits[i + 1..]);
        }
        _ => out.push_str(digits),
    }
}
