/*
Pretty printing of a computed trajectory: one row per step, x and y rounded to 4 decimals.
*/
use crate::numerical::trajectory::Trajectory;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Debug, PartialEq, Tabled)]
pub struct TrajectoryRow {
    #[tabled(rename = "Step")]
    pub step: usize,
    pub x: String,
    pub y: String,
}

pub fn trajectory_rows(trajectory: &Trajectory) -> Vec<TrajectoryRow> {
    trajectory
        .iter()
        .map(|point| TrajectoryRow {
            step: point.step,
            x: format!("{:.4}", point.x),
            y: format!("{:.4}", point.y),
        })
        .collect()
}

pub fn trajectory_table(trajectory: &Trajectory) -> String {
    let mut table = Table::new(trajectory_rows(trajectory));
    table.with(Style::modern_rounded());
    table.to_string()
}
