//! Statistical analysis: league outlier detection and per-match
//! supplemental summaries.

pub mod outlier;
pub mod summary;

pub use outlier::{
    evaluate_column, find_outliers, ColumnVerdict, OutlierReport, OutlierStat,
};
pub use summary::{
    in_22_ruck_speed, key_players, kick_tallies, line_break_tallies, line_breaks_by_phase,
    main_kickers, maul_summary, points_per_entry, MaulSummary, PlayerTally,
};
