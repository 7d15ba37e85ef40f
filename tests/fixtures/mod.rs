//! Shared fixtures for integration testing

#![allow(dead_code)]

use go_ratings::history::tsv::HISTORY_COLUMNS;
use go_ratings::rating::Glicko2Entry;
use go_ratings::types::PlayerId;
use std::collections::HashMap;

/// A player's history export, newest first, ending with the seed row.
///
/// Games: Jan 19 (win vs weaker), Jan 20 x3 (loss vs stronger, win vs
/// stronger with 9 stones taken, loss vs weaker), Feb 3 (win vs stronger).
pub fn history_tsv() -> String {
    let rows = [
        concat!(
            "2024-02-03T09:00:00Z\t506\t0\t0\t1562.0\t74.0\t0.0600\t15\t1710.0\t60.0\t1\t",
            "{\"ranked\":true}"
        ),
        "2024-01-20T18:00:00Z\t505\t1\t0\t1541.0\t78.0\t0.0600\t14\t1380.0\t65.0\t0\t",
        "2024-01-20T12:00:00Z\t504\t1\t9\t1553.0\t80.0\t0.0600\t13\t2400.0\t50.0\t1\t",
        "2024-01-20T10:00:00Z\t503\t0\t0\t1540.0\t82.0\t0.0600\t12\t1650.0\t70.0\t0\t",
        "1705654800\t502\t1\t0\t1555.0\t90.0\t0.0600\t11\t1420.0\t90.0\t1\t",
        "1704067200\t0\t0\t0\t1500.0\t350.0\t0.0600\t0\t1500.0\t350.0\t0\t",
    ];
    format!("{}\n{}\n", HISTORY_COLUMNS.join("\t"), rows.join("\n"))
}

/// The five-player pool from Glickman's worked example, plus an idle player
pub fn glickman_snapshot() -> HashMap<PlayerId, Glicko2Entry> {
    HashMap::from([
        (1, Glicko2Entry::new(1500.0, 200.0, 0.06)),
        (2, Glicko2Entry::new(1400.0, 30.0, 0.06)),
        (3, Glicko2Entry::new(1550.0, 100.0, 0.06)),
        (4, Glicko2Entry::new(1700.0, 300.0, 0.06)),
        (5, Glicko2Entry::new(1820.0, 60.0, 0.06)),
    ])
}
