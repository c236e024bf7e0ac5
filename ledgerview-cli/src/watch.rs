//! Periodic refresh of a dataset file.
//!
//! Each tick re-reads the data file and hands it to the controller with a
//! fresh generation number. A failed read keeps the previous data and
//! filters in place.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use ledgerview_lib::controller::TableController;
use tokio::time::{MissedTickBehavior, interval};

use crate::load::load_records;
use crate::print::render_page;

pub struct Watcher {
    data: PathBuf,
    period: Duration,
    ticks: Option<u64>,
    generation: u64,
}

impl Watcher {
    pub fn new(data: PathBuf, period_secs: u64, ticks: Option<u64>) -> Self {
        Self {
            data,
            period: Duration::from_secs(period_secs.max(1)),
            ticks,
            generation: 0,
        }
    }

    /// Refreshes once. Returns `true` if the controller took the new data.
    pub fn refresh(&mut self, table: &mut TableController) -> bool {
        self.generation += 1;
        match load_records(&self.data) {
            Ok(records) => table.replace_if_newer(self.generation, records),
            Err(e) => {
                log::warn!("Refresh failed, keeping previous data: {:#}", e);
                false
            }
        }
    }

    /// Runs until the tick limit is reached or ctrl-c is pressed.
    pub async fn run(mut self, table: &mut TableController) -> Result<()> {
        let mut timer = interval(self.period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut done = 0u64;

        loop {
            tokio::select! {
                _ = timer.tick() => {
                    if self.refresh(table) {
                        print!("{}", render_page(table));
                    }
                    done += 1;
                    if self.ticks.is_some_and(|limit| done >= limit) {
                        log::info!("Stopping after {} refreshes", done);
                        return Ok(());
                    }
                }
                signal = tokio::signal::ctrl_c() => {
                    signal?;
                    log::info!("Interrupted, stopping refresh loop");
                    return Ok(());
                }
            }
        }
    }
}
