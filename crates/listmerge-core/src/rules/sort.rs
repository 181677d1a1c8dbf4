use crate::domain::Record;
use std::cmp::Ordering;

/// Natural ordering: digit runs compare by value, text runs case-insensitively.
///
/// Strings that only differ in case or leading zeros fall back to byte order,
/// so the result is a total order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Runs::new(a);
    let mut right = Runs::new(b);

    loop {
        let ordering = match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(Run::Digits(x)), Some(Run::Digits(y))) => cmp_digits(x, y),
            (Some(x), Some(y)) => cmp_text(x.as_str(), y.as_str()),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}

/// Stable in-place sort on the postcode field; missing postcodes sort as `""`.
pub fn sort_by_postcode(records: &mut [Record], postcode_field: &str) {
    records.sort_by(|a, b| natural_cmp(a.text(postcode_field), b.text(postcode_field)));
}

pub fn sorted_by_postcode(mut records: Vec<Record>, postcode_field: &str) -> Vec<Record> {
    sort_by_postcode(&mut records, postcode_field);
    records
}

fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run<'a> {
    Digits(&'a str),
    Text(&'a str),
}

impl<'a> Run<'a> {
    fn as_str(self) -> &'a str {
        match self {
            Run::Digits(value) | Run::Text(value) => value,
        }
    }
}

struct Runs<'a> {
    rest: &'a str,
}

impl<'a> Runs<'a> {
    fn new(value: &'a str) -> Self {
        Self { rest: value }
    }
}

impl<'a> Iterator for Runs<'a> {
    type Item = Run<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .char_indices()
            .find(|(_, ch)| ch.is_ascii_digit() != digits)
            .map(|(idx, _)| idx)
            .unwrap_or(self.rest.len());

        let (run, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(if digits {
            Run::Digits(run)
        } else {
            Run::Text(run)
        })
    }
}
