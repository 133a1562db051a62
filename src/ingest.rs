//! Draw history ingestion from the semicolon-separated results feed.
//!
//! Columns used (looked up by header name, any order):
//!
//! | Column | Format |
//! |--------|--------|
//! | `date_de_tirage` | `DD/MM/YYYY` |
//! | `combinaison_gagnante_en_ordre_croissant` | `N1-N2-N3-N4-N5+C` |
//! | `rapport_du_rang1` .. `rapport_du_rang9` | decimal comma, `NA` or empty for none |
//!
//! Malformed rows are logged and skipped; payout fields never fail.

use std::path::Path;
use std::time::Instant;

use chrono::NaiveDate;
use log::{info, warn};

use crate::constants::*;
use crate::error::{LotoError, Result};
use crate::types::{HistoricalDraw, PayoutTable, DRAW_DATE_FORMAT};

const DATE_COLUMN: &str = "date_de_tirage";
const COMBINATION_COLUMN: &str = "combinaison_gagnante_en_ordre_croissant";
const FIELD_SEPARATOR: char = ';';

/// Parse a payout amount. Empty, `NA` and anything unparseable pay 0.
pub fn parse_gain(value: &str) -> f64 {
    let trimmed = value.trim().trim_matches('"').trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("NA") {
        return 0.0;
    }
    match trimmed.replacen(',', ".", 1).parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v,
        _ => 0.0,
    }
}

/// Parse a `DD/MM/YYYY` draw date.
pub fn parse_draw_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim().trim_matches('"'), DRAW_DATE_FORMAT).ok()
}

/// Parse `N1-N2-N3-N4-N5+C` into validated numbers and lucky number.
pub fn parse_combination(value: &str) -> std::result::Result<([u8; SELECTION_COUNT], u8), String> {
    let value = value.trim().trim_matches('"');
    let (combination, chance) = value
        .split_once('+')
        .ok_or_else(|| format!("combination `{value}` has no lucky number"))?;

    let parsed: Vec<u8> = combination
        .split('-')
        .map(|n| n.trim().parse::<u8>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| format!("combination `{value}`: {e}"))?;
    if parsed.len() != SELECTION_COUNT {
        return Err(format!(
            "combination `{value}` has {} numbers, expected {SELECTION_COUNT}",
            parsed.len()
        ));
    }

    let mut numbers = [0u8; SELECTION_COUNT];
    for (i, &n) in parsed.iter().enumerate() {
        if !is_valid_number(n) {
            return Err(format!("number {n} out of range in `{value}`"));
        }
        if numbers[..i].contains(&n) {
            return Err(format!("number {n} repeated in `{value}`"));
        }
        numbers[i] = n;
    }

    let chance = chance
        .trim()
        .parse::<u8>()
        .map_err(|e| format!("lucky number in `{value}`: {e}"))?;
    if !is_valid_lucky_number(chance) {
        return Err(format!("lucky number {chance} out of range in `{value}`"));
    }
    Ok((numbers, chance))
}

/// Column positions resolved from the header row.
struct Columns {
    date: usize,
    combination: usize,
    ranks: [Option<usize>; RANK_COUNT],
}

impl Columns {
    fn from_header(header: &str) -> Result<Self> {
        let names: Vec<&str> = header
            .split(FIELD_SEPARATOR)
            .map(|h| h.trim().trim_matches('"').trim_start_matches('\u{feff}'))
            .collect();
        let find = |name: &str| names.iter().position(|&h| h == name);

        let date = find(DATE_COLUMN).ok_or(LotoError::MissingColumn(DATE_COLUMN))?;
        let combination =
            find(COMBINATION_COLUMN).ok_or(LotoError::MissingColumn(COMBINATION_COLUMN))?;
        let mut ranks = [None; RANK_COUNT];
        for (i, slot) in ranks.iter_mut().enumerate() {
            *slot = find(format!("rapport_du_rang{}", i + 1).as_str());
        }
        Ok(Self {
            date,
            combination,
            ranks,
        })
    }

    fn parse_row(&self, line: usize, row: &str) -> Result<HistoricalDraw> {
        let fields: Vec<&str> = row.split(FIELD_SEPARATOR).collect();
        let field = |idx: usize| fields.get(idx).copied().unwrap_or("");
        let invalid = |reason: String| LotoError::InvalidRow { line, reason };

        let date_field = field(self.date);
        let date = parse_draw_date(date_field)
            .ok_or_else(|| invalid(format!("invalid date `{date_field}`")))?;
        let (numbers, chance) = parse_combination(field(self.combination)).map_err(invalid)?;

        let mut payouts = PayoutTable::default();
        for (i, col) in self.ranks.iter().enumerate() {
            if let Some(idx) = col {
                payouts.0[i] = parse_gain(field(*idx));
            }
        }
        Ok(HistoricalDraw::new(date, numbers, chance, payouts))
    }
}

/// Parse the whole feed. With `min_date`, draws before it are dropped.
pub fn parse_draws(text: &str, min_date: Option<NaiveDate>) -> Result<Vec<HistoricalDraw>> {
    let mut lines = text.lines().enumerate();
    let header = loop {
        match lines.next() {
            Some((_, l)) if l.trim().is_empty() => continue,
            Some((_, l)) => break l,
            None => return Err(LotoError::EmptyInput),
        }
    };
    let columns = Columns::from_header(header)?;

    let mut draws = Vec::new();
    let mut skipped = 0usize;
    for (idx, row) in lines {
        if row.trim().is_empty() {
            continue;
        }
        match columns.parse_row(idx + 1, row) {
            Ok(draw) => {
                if min_date.map_or(true, |min| draw.date >= min) {
                    draws.push(draw);
                }
            }
            Err(e) => {
                skipped += 1;
                warn!("skipping draw: {e}");
            }
        }
    }
    if skipped > 0 {
        warn!("{skipped} malformed draw rows skipped");
    }
    Ok(draws)
}

/// Load draws on or after [`MIN_DRAW_DATE`] from a feed file.
pub fn load_draws(path: impl AsRef<Path>) -> Result<Vec<HistoricalDraw>> {
    read_draws(path.as_ref(), Some(MIN_DRAW_DATE))
}

/// Load every well-formed row of a feed file, whatever its date.
pub fn load_all_draws(path: impl AsRef<Path>) -> Result<Vec<HistoricalDraw>> {
    read_draws(path.as_ref(), None)
}

/// Keep the draws on or after [`MIN_DRAW_DATE`] from an unfiltered history.
pub fn current_rules(draws: &[HistoricalDraw]) -> Vec<HistoricalDraw> {
    draws
        .iter()
        .filter(|d| d.date >= MIN_DRAW_DATE)
        .cloned()
        .collect()
}

fn read_draws(path: &Path, min_date: Option<NaiveDate>) -> Result<Vec<HistoricalDraw>> {
    let start_time = Instant::now();
    let text = std::fs::read_to_string(path)?;
    let draws = parse_draws(&text, min_date)?;
    info!(
        "Loaded {} draws from {} in {:.2} ms",
        draws.len(),
        path.display(),
        start_time.elapsed().as_secs_f64() * 1000.0
    );
    Ok(draws)
}
