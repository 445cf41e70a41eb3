//! Numeric counter text
//!
//! `data-counter` elements count up from zero to the number their text shows.
//! The text is read like `parseFloat` reads it, a leading number followed by
//! anything, except that the separators are interpreted the way a person
//! reads them: `160,4479` is a decimal comma, `1,234.56` and `1.234,5` use
//! the other character for grouping. Intermediate frames are formatted with
//! the same separators and precision; the final frame restores the original
//! string verbatim.

use insular_animation::{AnimationScheduler, Easing, Tween, TweenId};
use nom::{
    character::complete::{digit0, digit1, one_of},
    combinator::opt,
    multi::many0,
    sequence::pair,
    IResult,
};

use crate::dom::{Document, ElementId};
use crate::trigger::{OneShotTrigger, TriggerPoint};

pub const ATTR_COUNTER: &str = "data-counter";

/// A number parsed out of display text, with what is needed to print
/// intermediate values in the same shape
#[derive(Clone, Debug, PartialEq)]
pub struct NumericText {
    value: f64,
    precision: usize,
    decimal_sep: char,
    group_sep: Option<char>,
    prefix: String,
    suffix: String,
    original: String,
}

struct Parts<'a> {
    negative: bool,
    integer: &'a str,
    pieces: Vec<(char, &'a str)>,
}

fn numeric_parts(input: &str) -> IResult<&str, Parts<'_>> {
    let (input, sign) = opt(one_of("+-"))(input)?;
    let (input, integer) = digit0(input)?;
    let (input, pieces) = many0(pair(one_of(".,"), digit1))(input)?;
    Ok((
        input,
        Parts {
            negative: sign == Some('-'),
            integer,
            pieces,
        },
    ))
}

impl NumericText {
    /// Parse display text, `None` when it does not start with a number
    pub fn parse(text: &str) -> Option<Self> {
        let rest = text.trim_start();
        let prefix = &text[..text.len() - rest.len()];
        let (suffix, parts) = numeric_parts(rest).ok()?;
        if parts.integer.is_empty() && parts.pieces.is_empty() {
            return None;
        }

        // Every separator but the last groups; the last one is decimal unless
        // it repeats the grouping character
        let (group_sep, decimal) = match parts.pieces.split_last() {
            None => (None, None),
            Some((last, [])) => (None, Some(*last)),
            Some((last, init)) => {
                let group = init[0].0;
                if init.iter().any(|(sep, _)| *sep != group) {
                    // mixed grouping characters cannot be reproduced
                    return None;
                }
                if last.0 == group {
                    (Some(group), None)
                } else {
                    (Some(group), Some(*last))
                }
            }
        };
        if parts.integer.is_empty() && (group_sep.is_some() || decimal.is_none()) {
            return None;
        }

        let mut digits = if parts.integer.is_empty() {
            String::from("0")
        } else {
            String::from(parts.integer)
        };
        if group_sep.is_some() {
            let grouped = match decimal {
                Some(_) => &parts.pieces[..parts.pieces.len() - 1],
                None => &parts.pieces[..],
            };
            for (_, chunk) in grouped {
                digits.push_str(chunk);
            }
        }
        let (precision, decimal_sep) = match decimal {
            Some((sep, fraction)) => {
                digits.push('.');
                digits.push_str(fraction);
                (fraction.len(), sep)
            }
            None => (0, if group_sep == Some('.') { ',' } else { '.' }),
        };
        let magnitude: f64 = digits.parse().ok()?;
        let value = if parts.negative { -magnitude } else { magnitude };

        Some(Self {
            value,
            precision,
            decimal_sep,
            group_sep,
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            original: text.to_string(),
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    /// Print `value` in the shape of the original text
    pub fn format(&self, value: f64) -> String {
        let fixed = format!("{:.*}", self.precision, value.abs());
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (fixed.as_str(), None),
        };

        let mut out = String::with_capacity(self.original.len() + 4);
        out.push_str(&self.prefix);
        let is_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
        if value < 0.0 && !is_zero {
            out.push('-');
        }
        match self.group_sep {
            Some(sep) => {
                let len = int_part.len();
                for (i, c) in int_part.chars().enumerate() {
                    if i > 0 && (len - i) % 3 == 0 {
                        out.push(sep);
                    }
                    out.push(c);
                }
            }
            None => out.push_str(int_part),
        }
        if let Some(frac) = frac_part {
            out.push(self.decimal_sep);
            out.push_str(frac);
        }
        out.push_str(&self.suffix);
        out
    }

    /// Text for eased progress `t`: the original string once complete
    pub fn text_at(&self, t: f32) -> String {
        if t >= 1.0 {
            self.original.clone()
        } else {
            self.format(self.value * t.max(0.0) as f64)
        }
    }
}

/// A counter waiting for its element to scroll into view
#[derive(Clone, Debug)]
pub struct ArmedCounter {
    pub element: ElementId,
    pub text: NumericText,
    trigger: OneShotTrigger,
}

impl ArmedCounter {
    pub fn new(element: ElementId, text: NumericText, start: TriggerPoint) -> Self {
        Self {
            element,
            text,
            trigger: OneShotTrigger::new(start),
        }
    }

    pub fn check(&mut self, doc: &Document) -> bool {
        match doc.client_rect(self.element) {
            Some(rect) => self.trigger.check(rect, doc.viewport().height),
            None => false,
        }
    }
}

/// A counter in flight
#[derive(Clone, Debug)]
pub struct RunningCounter {
    pub element: ElementId,
    pub text: NumericText,
    pub tween: TweenId,
}

impl RunningCounter {
    /// Show zero and register the count-up tween
    pub fn start(
        doc: &mut Document,
        scheduler: &AnimationScheduler,
        element: ElementId,
        text: NumericText,
        duration_s: f32,
        easing: Easing,
    ) -> Self {
        doc.set_text(element, text.format(0.0));
        let tween = Tween::new(duration_s * 1000.0).with_easing(easing);
        let tween = scheduler.add(element.target_key(), tween);
        Self {
            element,
            text,
            tween,
        }
    }

    pub fn render(&self, doc: &mut Document, progress: f32) {
        doc.set_text(self.element, self.text.text_at(progress));
    }

    /// Put the original text back
    pub fn restore(&self, doc: &mut Document) {
        doc.set_text(self.element, self.text.original());
    }
}
