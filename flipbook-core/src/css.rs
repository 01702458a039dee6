/// Text codec for `matrix3d(...)` and `matrix(...)` transform declarations
use std::fmt;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, multispace0},
    combinator::{all_consuming, value},
    multi::separated_list1,
    number::complete::double,
    sequence::{delimited, pair},
    IResult,
};

use crate::error::{Error, Result};
use crate::transform::{self, Matrix3D};

/// Write one matrix entry the way the platform serializes numbers.
pub(crate) fn write_number(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v == 0.0 {
        // covers -0
        f.write_str("0")
    } else if v.is_nan() {
        f.write_str("NaN")
    } else if v.is_infinite() {
        f.write_str(if v > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        f.write_str(&js_number(v))
    }
}

/// Number-to-String in the platform's form: shortest round-trip digits,
/// plain decimals for exponents in `-7..21`, exponent notation outside it.
fn js_number(v: f64) -> String {
    // `{:e}` yields the shortest digits as `d.ddde<exp>`
    let sci = format!("{:e}", v.abs());
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    // value = 0.digits × 10^n
    let n = exp.parse::<i32>().unwrap_or(0) + 1;

    let mut out = String::new();
    if v < 0.0 {
        out.push('-');
    }
    if k <= n && n <= 21 {
        out.push_str(&digits);
        out.extend(std::iter::repeat('0').take((n - k) as usize));
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        out.push_str(int);
        out.push('.');
        out.push_str(frac);
    } else if -6 < n && n <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take((-n) as usize));
        out.push_str(&digits);
    } else {
        let (first, rest) = digits.split_at(1);
        out.push_str(first);
        if !rest.is_empty() {
            out.push('.');
            out.push_str(rest);
        }
        out.push('e');
        out.push(if n - 1 < 0 { '-' } else { '+' });
        out.push_str(&(n - 1).abs().to_string());
    }
    out
}

/// Parse a single transform declaration into column-major values.
///
/// `matrix(a, b, c, d, e, f)` is expanded to its 3D equivalent.
pub fn parse_transform(input: &str) -> Result<Matrix3D> {
    let (_, (name, args)) = all_consuming(delimited(multispace0, declaration, multispace0))(input)
        .map_err(|_| Error::parse(input))?;

    match (name, args.len()) {
        ("matrix3d", 16) => {
            let mut m = [0.0; 16];
            m.copy_from_slice(&args);
            Ok(m)
        }
        ("matrix", 6) => {
            let mut affine = [0.0; 6];
            affine.copy_from_slice(&args);
            Ok(transform::from_affine(affine))
        }
        _ => Err(Error::parse(input)),
    }
}

fn declaration(input: &str) -> IResult<&str, (&str, Vec<f64>)> {
    pair(alt((tag("matrix3d"), tag("matrix"))), arguments)(input)
}

fn arguments(input: &str) -> IResult<&str, Vec<f64>> {
    delimited(char('('), separated_list1(char(','), number), char(')'))(input)
}

fn number(input: &str) -> IResult<&str, f64> {
    delimited(
        multispace0,
        alt((
            value(f64::NAN, tag("NaN")),
            value(f64::INFINITY, tag("Infinity")),
            value(f64::NEG_INFINITY, tag("-Infinity")),
            double,
        )),
        multispace0,
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_matrix3d() {
        let m = parse_transform(
            "matrix3d(1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, -0.00125, -100, 0, -173.5, 1)",
        )
        .unwrap();
        assert_eq!(m[11], -0.00125);
        assert_eq!(m[12], -100.0);
        assert_eq!(m[14], -173.5);
    }

    #[test]
    fn test_parse_affine_expands() {
        let m = parse_transform("matrix(2, 0, 0, 3, 10, 20)").unwrap();
        assert_eq!(m, transform::from_affine([2.0, 0.0, 0.0, 3.0, 10.0, 20.0]));
    }

    #[test]
    fn test_whitespace_tolerated() {
        let m = parse_transform("  matrix( 1 ,0,0 , 1,  4,5 )\n").unwrap();
        assert_eq!((m[12], m[13]), (4.0, 5.0));
    }

    #[test]
    fn test_exponents_and_specials() {
        let m = parse_transform(
            "matrix3d(1e-7, NaN, Infinity, -Infinity, 0, 1, 0, 0, 0, 0, 1, 0, 2.5E3, 0, 0, 1)",
        )
        .unwrap();
        assert_eq!(m[0], 1e-7);
        assert!(m[1].is_nan());
        assert_eq!(m[2], f64::INFINITY);
        assert_eq!(m[3], f64::NEG_INFINITY);
        assert_eq!(m[12], 2500.0);
    }

    #[test]
    fn test_number_text_matches_platform() {
        let cases = [
            (1.0, "1"),
            (-0.5, "-0.5"),
            (0.000001, "0.000001"),
            (1e-7, "1e-7"),
            (-1.5e-10, "-1.5e-10"),
            (123456789012345680000.0, "123456789012345680000"),
            (1e21, "1e+21"),
            (2.5e22, "2.5e+22"),
            (173.20508075688775, "173.20508075688775"),
            (6.123233995736766e-17, "6.123233995736766e-17"),
        ];
        for (v, text) in cases {
            assert_eq!(js_number(v), text);
            assert_eq!(parse_transform(&format!("matrix(1, 0, 0, 1, {text}, 0)")).unwrap()[12], v);
        }
    }

    #[test]
    fn test_rejects_bad_input() {
        for bad in [
            "",
            "matrix3d(1, 0, 0, 1)",
            "matrix(1, 0, 0, 1, 0)",
            "rotateY(30deg)",
            "matrix (1, 0, 0, 1, 0, 0)",
            "matrix(1, 0, 0, 1, 0, 0) translate(1px)",
            "matrix(1, 0, 0, 1, 0, x)",
        ] {
            assert_eq!(parse_transform(bad), Err(Error::parse(bad)), "{bad:?}");
        }
    }
}
