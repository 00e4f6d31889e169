//! Oracle NUMBER codec.
//!
//! Oracle NUMBER is a variable-length format where:
//! - First byte is exponent (base 100, with sign in the high bit)
//! - Remaining bytes are base-100 digits of the mantissa
//! - Negative numbers store complemented bytes and end with 102 when the
//!   mantissa is shorter than 20 bytes

use crate::error::{DriverError, DriverResult};
use bytes::{BufMut, Bytes, BytesMut};

const MAX_MANTISSA_BYTES: usize = 20;
const MIN_EXPONENT: i16 = -65;
const MAX_EXPONENT: i16 = 62;
const NEGATIVE_TERMINATOR: u8 = 102;

/// Encode an integer as Oracle NUMBER bytes.
pub fn encode_int(value: i32) -> DriverResult<Bytes> {
    encode_decimal(&value.to_string())
}

/// Encode a finite double as Oracle NUMBER bytes.
///
/// Uses the shortest decimal representation that round-trips the double.
pub fn encode_double(value: f64) -> DriverResult<Bytes> {
    if !value.is_finite() {
        return Err(DriverError::NumberOutOfRange {
            value: value.to_string(),
        });
    }
    // f64 Display never uses exponent notation
    encode_decimal(&value.to_string())
}

/// Encode plain decimal text (`-123.45`) as Oracle NUMBER bytes.
pub fn encode_decimal(text: &str) -> DriverResult<Bytes> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
    let valid = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty()) || !valid(int_part) || !valid(frac_part) {
        return Err(DriverError::InvalidNumber {
            message: format!("not a decimal: {:?}", text),
        });
    }
    let out_of_range = || DriverError::NumberOutOfRange {
        value: text.to_string(),
    };

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes())
        .map(|b| b - b'0')
        .collect();
    // Digits before the decimal point
    let mut point = i64::try_from(int_part.len()).map_err(|_| out_of_range())?;

    let leading = digits.iter().take_while(|&&d| d == 0).count();
    digits.drain(..leading);
    point -= i64::try_from(leading).map_err(|_| out_of_range())?;
    while digits.last() == Some(&0) {
        digits.pop();
    }
    if digits.is_empty() {
        return Ok(Bytes::from_static(&[0x80]));
    }

    // Align digits to base-100 pairs
    if point.rem_euclid(2) != 0 {
        digits.insert(0, 0);
        point += 1;
    }
    if digits.len() % 2 != 0 {
        digits.push(0);
    }

    let mantissa_len = digits.len() / 2;
    let exponent = i16::try_from(point / 2 - 1).map_err(|_| out_of_range())?;
    if !(MIN_EXPONENT..=MAX_EXPONENT).contains(&exponent) || mantissa_len > MAX_MANTISSA_BYTES {
        return Err(out_of_range());
    }

    let mut buf = BytesMut::with_capacity(mantissa_len + 2);
    let exp_byte = (exponent + 193) as u8;
    buf.put_u8(if negative { !exp_byte } else { exp_byte });
    for pair in digits.chunks_exact(2) {
        let value = pair[0] * 10 + pair[1];
        buf.put_u8(if negative { 101 - value } else { value + 1 });
    }
    if negative && mantissa_len < MAX_MANTISSA_BYTES {
        buf.put_u8(NEGATIVE_TERMINATOR);
    }
    Ok(buf.freeze())
}

/// Decode Oracle NUMBER bytes to decimal text.
///
/// Preserves full precision by returning the number as a string.
/// Use `.parse::<i64>()` or `.parse::<f64>()` to convert.
pub fn decode_oracle_number(bytes: &[u8]) -> DriverResult<String> {
    let Some((&exp_byte, mantissa)) = bytes.split_first() else {
        return Ok("0".to_string());
    };
    let positive = exp_byte & 0x80 != 0;
    if mantissa.is_empty() {
        return Ok(if positive { "0" } else { "-1e126" }.to_string());
    }
    let mantissa = match mantissa.split_last() {
        Some((&NEGATIVE_TERMINATOR, rest)) if !positive => rest,
        _ => mantissa,
    };
    if mantissa.len() > MAX_MANTISSA_BYTES {
        return Err(DriverError::InvalidNumber {
            message: format!("mantissa of {} bytes", mantissa.len()),
        });
    }

    let exponent = if positive {
        exp_byte as i16 - 193
    } else {
        (!exp_byte) as i16 - 193
    };

    let mut digits = Vec::with_capacity(mantissa.len() * 2);
    for &byte in mantissa {
        let pair = if positive {
            byte.wrapping_sub(1)
        } else {
            101u8.wrapping_sub(byte)
        };
        if pair > 99 {
            return Err(DriverError::InvalidNumber {
                message: format!("invalid mantissa byte {:#04x}", byte),
            });
        }
        digits.push(pair / 10);
        digits.push(pair % 10);
    }

    let mut point = (exponent + 1) * 2;
    let leading = digits.iter().take_while(|&&d| d == 0).count();
    digits.drain(..leading);
    point -= leading as i16;
    while digits.last() == Some(&0) {
        digits.pop();
    }
    if digits.is_empty() {
        return Ok("0".to_string());
    }

    let mut result = String::with_capacity(digits.len() + 4);
    if !positive {
        result.push('-');
    }
    let num_digits = digits.len() as i16;
    let digit_char = |d: u8| (b'0' + d) as char;
    if point <= 0 {
        result.push_str("0.");
        result.extend((point..0).map(|_| '0'));
        result.extend(digits.iter().map(|&d| digit_char(d)));
    } else if point >= num_digits {
        result.extend(digits.iter().map(|&d| digit_char(d)));
        result.extend((num_digits..point).map(|_| '0'));
    } else {
        for (i, &d) in digits.iter().enumerate() {
            if i as i16 == point {
                result.push('.');
            }
            result.push(digit_char(d));
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_zero() {
        assert_eq!(&encode_int(0).unwrap()[..], &[0x80]);
        assert_eq!(&encode_double(0.0).unwrap()[..], &[0x80]);
        assert_eq!(&encode_double(-0.0).unwrap()[..], &[0x80]);
    }

    #[test]
    fn test_encode_positive_integer() {
        assert_eq!(&encode_int(1).unwrap()[..], &[0xC1, 0x02]);
        assert_eq!(&encode_int(10).unwrap()[..], &[0xC1, 0x0B]);
        assert_eq!(&encode_int(100).unwrap()[..], &[0xC2, 0x02]);
        // 2001 = 20|01
        assert_eq!(&encode_int(2001).unwrap()[..], &[0xC2, 0x15, 0x02]);
    }

    #[test]
    fn test_encode_negative_integer() {
        assert_eq!(&encode_int(-1).unwrap()[..], &[0x3E, 0x64, 0x66]);
    }

    #[test]
    fn test_encode_decimal_fraction() {
        assert_eq!(&encode_double(0.5).unwrap()[..], &[0xC0, 0x33]);
        assert_eq!(&encode_double(0.05).unwrap()[..], &[0xC0, 0x06]);
    }

    #[test]
    fn test_integral_double_matches_integer_bytes() {
        assert_eq!(encode_double(3.0).unwrap(), encode_int(3).unwrap());
    }

    #[test]
    fn test_decode_matches_encode() {
        for text in ["1", "-1", "100", "0.5", "0.05", "123.45", "-98765.4321", "4326"] {
            let bytes = encode_decimal(text).unwrap();
            assert_eq!(decode_oracle_number(&bytes).unwrap(), text);
        }
    }

    #[test]
    fn test_decode_known_vectors() {
        assert_eq!(decode_oracle_number(&[0x80]).unwrap(), "0");
        assert_eq!(decode_oracle_number(&[0xC1, 0x0B]).unwrap(), "10");
        assert_eq!(decode_oracle_number(&[0x3E, 0x64, 0x66]).unwrap(), "-1");
    }

    #[test]
    fn test_decode_rejects_oversized_mantissa() {
        let mut bytes = vec![0xC1];
        bytes.extend(std::iter::repeat(0x02).take(MAX_MANTISSA_BYTES + 1));
        assert!(matches!(
            decode_oracle_number(&bytes),
            Err(DriverError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_encode_rejects_non_finite() {
        assert!(matches!(
            encode_double(f64::NAN),
            Err(DriverError::NumberOutOfRange { .. })
        ));
        assert!(matches!(
            encode_double(f64::INFINITY),
            Err(DriverError::NumberOutOfRange { .. })
        ));
    }

    #[test]
    fn test_encode_rejects_out_of_range() {
        assert!(matches!(
            encode_double(1e200),
            Err(DriverError::NumberOutOfRange { .. })
        ));
        assert!(matches!(
            encode_double(1e-200),
            Err(DriverError::NumberOutOfRange { .. })
        ));
    }

    #[test]
    fn test_encode_rejects_garbage() {
        assert!(matches!(
            encode_decimal("12a"),
            Err(DriverError::InvalidNumber { .. })
        ));
        for text in ["-", ".", "-.", ""] {
            assert!(
                matches!(encode_decimal(text), Err(DriverError::InvalidNumber { .. })),
                "{:?} has no digits",
                text
            );
        }
    }

    #[test]
    fn test_encode_rejects_long_decimal_text() {
        // Digit counts past i16 must not wrap into a small exponent
        let huge = format!("1{}", "0".repeat(65536));
        assert!(matches!(
            encode_decimal(&huge),
            Err(DriverError::NumberOutOfRange { .. })
        ));
        let tiny = format!("0.{}1", "0".repeat(65536));
        assert!(matches!(
            encode_decimal(&tiny),
            Err(DriverError::NumberOutOfRange { .. })
        ));
        // Trailing zeros in the fraction are not significant
        let padded = format!("1.{}", "0".repeat(70000));
        assert_eq!(encode_decimal(&padded).unwrap(), encode_int(1).unwrap());
    }
}
