//! rSleepTracker main entrypoint.

use rsleeptracker::run;
use rsleeptracker::ui::messages::error;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
