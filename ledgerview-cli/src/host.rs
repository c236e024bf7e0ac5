//! Action host that reports dispatched row actions on stdout.

use ledgerview_lib::actions::{ActionHost, ActionRequest};

/// Prints each action request as a JSON line.
#[derive(Debug, Default)]
pub struct PrintingHost {
    pub dispatched: usize,
}

impl ActionHost for PrintingHost {
    fn dispatch(&mut self, request: ActionRequest<'_>) {
        self.dispatched += 1;
        match serde_json::to_string(request.row) {
            Ok(row) => println!("{} {}", request.mode, row),
            Err(e) => log::warn!("Failed to serialize row for action {}: {}", request.mode, e),
        }
    }
}
