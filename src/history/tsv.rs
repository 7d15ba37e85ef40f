//! Tab-separated rating history exports
//!
//! The history endpoint serves one header line followed by one line per game,
//! newest first. Column order is taken from the header.

use crate::error::{RatingError, Result};
use crate::history::entry::RatingHistoryRow;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::str::FromStr;

/// Columns every export must carry
pub const HISTORY_COLUMNS: [&str; 12] = [
    "ended",
    "game_id",
    "played_black",
    "handicap",
    "rating",
    "deviation",
    "volatility",
    "opponent_id",
    "opponent_rating",
    "opponent_deviation",
    "outcome",
    "extra",
];

struct RowReader<'a> {
    line: usize,
    fields: Vec<&'a str>,
    columns: &'a HashMap<&'static str, usize>,
}

impl<'a> RowReader<'a> {
    fn raw(&self, column: &'static str) -> &'a str {
        self.columns
            .get(column)
            .and_then(|&i| self.fields.get(i))
            .map(|&field| field.trim())
            .unwrap_or("")
    }

    fn malformed(&self, column: &str, value: &str) -> anyhow::Error {
        RatingError::MalformedRow {
            line: self.line,
            reason: format!("invalid {} value {:?}", column, value),
        }
        .into()
    }

    fn parse<T: FromStr>(&self, column: &'static str) -> Result<T> {
        let value = self.raw(column);
        value.parse().map_err(|_| self.malformed(column, value))
    }

    fn flag(&self, column: &'static str) -> Result<bool> {
        match self.raw(column) {
            "1" | "true" | "True" => Ok(true),
            "0" | "false" | "False" => Ok(false),
            other => Err(self.malformed(column, other)),
        }
    }

    fn timestamp(&self, column: &'static str) -> Result<DateTime<Utc>> {
        let value = self.raw(column);
        if let Ok(seconds) = value.parse::<i64>() {
            return DateTime::from_timestamp(seconds, 0)
                .ok_or_else(|| self.malformed(column, value));
        }
        if let Ok(seconds) = value.parse::<f64>() {
            if !seconds.is_finite() {
                return Err(self.malformed(column, value));
            }
            return DateTime::from_timestamp_millis((seconds * 1000.0) as i64)
                .ok_or_else(|| self.malformed(column, value));
        }
        DateTime::parse_from_rfc3339(value)
            .map(|ended| ended.with_timezone(&Utc))
            .map_err(|_| self.malformed(column, value))
    }

    fn json(&self, column: &'static str) -> Result<serde_json::Value> {
        let value = self.raw(column);
        if value.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(value).map_err(|_| self.malformed(column, value))
    }

    fn row(&self) -> Result<RatingHistoryRow> {
        Ok(RatingHistoryRow {
            ended: self.timestamp("ended")?,
            game_id: self.parse("game_id")?,
            played_black: self.flag("played_black")?,
            handicap: self.parse("handicap")?,
            rating: self.parse("rating")?,
            deviation: self.parse("deviation")?,
            volatility: self.parse("volatility")?,
            opponent_id: self.parse("opponent_id")?,
            opponent_rating: self.parse("opponent_rating")?,
            opponent_deviation: self.parse("opponent_deviation")?,
            outcome: self.parse("outcome")?,
            extra: self.json("extra")?,
        })
    }
}

/// Parse an export into rows, keeping the source order (newest first)
pub fn parse_history_tsv(text: &str) -> Result<Vec<RatingHistoryRow>> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header) = lines.next().ok_or(RatingError::EmptyHistory)?;
    let names: Vec<&str> = header.split('\t').map(str::trim).collect();

    let mut columns = HashMap::new();
    for column in HISTORY_COLUMNS {
        let position = names
            .iter()
            .position(|name| *name == column)
            .ok_or_else(|| RatingError::MissingColumn {
                column: column.to_string(),
            })?;
        columns.insert(column, position);
    }

    lines
        .map(|(i, line)| {
            RowReader {
                line: i + 1,
                fields: line.split('\t').collect(),
                columns: &columns,
            }
            .row()
        })
        .collect()
}
