//! CSS value parsing
//!
//! Just enough of CSS to read the values the motion crates consume: custom
//! property colours (`--color-alerta: #f93243`), computed background colours
//! (`rgb(16, 16, 33)`) and numbers embedded in text the way `parseFloat`
//! reads them.

use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while1},
    character::complete::{char, digit0, digit1, multispace0, one_of},
    combinator::{opt, recognize},
    error::ParseError as NomParseError,
    number::complete::float,
    sequence::{pair, tuple},
    IResult,
};

use crate::geometry::Color;

/// Parse a CSS colour value
///
/// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`/`rgba()` with
/// comma or space separated channels, and a handful of named colours.
/// Returns `None` for anything else, including the empty string.
pub fn parse_color(input: &str) -> Option<Color> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok((rest, color)) = parse_hex_color::<nom::error::Error<&str>>(input) {
        if rest.trim().is_empty() {
            return Some(color);
        }
        return None;
    }

    if let Ok((rest, color)) = parse_rgb_function::<nom::error::Error<&str>>(input) {
        if rest.trim().is_empty() {
            return Some(color);
        }
        return None;
    }

    parse_named_color(input)
}

/// Read the longest numeric prefix of `input`, skipping leading whitespace
///
/// Mirrors the browser's `parseFloat`: `"160.4479 Bs"` gives `160.4479`,
/// `"1e"` gives `1.0` and `"Bs. 5"` gives `None`.
pub fn parse_float_prefix(input: &str) -> Option<(f64, &str)> {
    let trimmed = input.trim_start();
    let (rest, number) = recognize_number::<nom::error::Error<&str>>(trimmed).ok()?;
    number.parse::<f64>().ok().map(|v| (v, rest))
}

fn recognize_number<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, &'a str, E> {
    recognize(tuple((
        opt(one_of("+-")),
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            recognize(pair(char('.'), digit1)),
        )),
        opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
    )))(input)
}

/// Parse hex color: #RGB, #RGBA, #RRGGBB or #RRGGBBAA
fn parse_hex_color<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Color, E> {
    let (rest, _) = char('#')(input)?;
    let (rest, hex) = take_while1(|c: char| c.is_ascii_hexdigit())(rest)?;

    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
    let bad = |_| nom::Err::Error(E::from_error_kind(input, nom::error::ErrorKind::HexDigit));

    let channels: [u8; 4] = match hex.len() {
        3 => [nibble(0).map_err(bad)?, nibble(1).map_err(bad)?, nibble(2).map_err(bad)?, 255],
        4 => [
            nibble(0).map_err(bad)?,
            nibble(1).map_err(bad)?,
            nibble(2).map_err(bad)?,
            nibble(3).map_err(bad)?,
        ],
        6 => [byte(0).map_err(bad)?, byte(2).map_err(bad)?, byte(4).map_err(bad)?, 255],
        8 => [
            byte(0).map_err(bad)?,
            byte(2).map_err(bad)?,
            byte(4).map_err(bad)?,
            byte(6).map_err(bad)?,
        ],
        _ => {
            return Err(nom::Err::Error(E::from_error_kind(
                input,
                nom::error::ErrorKind::LengthValue,
            )));
        }
    };

    let [r, g, b, a] = channels;
    Ok((rest, Color::from_rgb8(r, g, b).with_alpha(a as f32 / 255.0)))
}

/// Separator between function arguments: a comma or plain whitespace
fn arg_sep<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, (), E> {
    let (input, _) = multispace0(input)?;
    let (input, _) = opt(char(','))(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, ()))
}

/// Parse rgb(r, g, b) / rgba(r, g, b, a) with channels in 0..=255
fn parse_rgb_function<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Color, E> {
    let (input, _) = alt((tag_no_case("rgba"), tag_no_case("rgb")))(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char('(')(input)?;
    let (input, _) = multispace0(input)?;
    let (input, r) = float(input)?;
    let (input, _) = arg_sep(input)?;
    let (input, g) = float(input)?;
    let (input, _) = arg_sep(input)?;
    let (input, b) = float(input)?;
    let (input, alpha) = opt(alpha_arg)(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char(')')(input)?;

    let channel = |v: f32| v.clamp(0.0, 255.0) / 255.0;
    Ok((
        input,
        Color::rgba(
            channel(r),
            channel(g),
            channel(b),
            alpha.unwrap_or(1.0).clamp(0.0, 1.0),
        ),
    ))
}

/// Trailing alpha argument, `, a` or `/ a`
fn alpha_arg<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, f32, E> {
    let (input, _) = multispace0(input)?;
    let (input, _) = alt((char(','), char('/')))(input)?;
    let (input, _) = multispace0(input)?;
    float(input)
}

fn parse_named_color(input: &str) -> Option<Color> {
    let color = match input.to_ascii_lowercase().as_str() {
        "transparent" => Color::TRANSPARENT,
        "white" => Color::WHITE,
        "black" => Color::BLACK,
        "red" => Color::from_hex(0xFF0000),
        "green" => Color::from_hex(0x008000),
        "blue" => Color::from_hex(0x0000FF),
        "gray" | "grey" => Color::from_hex(0x808080),
        _ => {
            tracing::trace!(value = input, "unrecognised colour value");
            return None;
        }
    };
    Some(color)
}
