use clap::Subcommand;
use reveille_core::storage::Database;
use reveille_core::stopwatch::{self, display_ms};
use reveille_core::Event;

#[derive(Subcommand)]
pub enum StopwatchAction {
    /// Start or resume the stopwatch
    Start,
    /// Pause the stopwatch
    Stop,
    /// Record a lap
    Lap,
    /// Reset to zero
    Reset,
    /// Show elapsed time and laps
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: StopwatchAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut sw = stopwatch::load(&db)?;

    match action {
        StopwatchAction::Start => {
            sw.start();
            println!("{}", sw.display());
        }
        StopwatchAction::Stop => {
            sw.stop();
            println!("{}", sw.display());
        }
        StopwatchAction::Lap => {
            sw.lap();
            if let Some(elapsed) = sw.laps().last() {
                let event = Event::StopwatchLap {
                    elapsed_ms: *elapsed,
                    at: chrono::Utc::now(),
                };
                println!("{}", serde_json::to_string(&event)?);
            } else {
                println!("stopwatch is not running");
            }
        }
        StopwatchAction::Reset => {
            sw.reset();
            println!("{}", sw.display());
        }
        StopwatchAction::Status { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&sw)?);
            } else {
                println!("{}", sw.display());
                for (i, lap) in sw.laps().iter().enumerate() {
                    println!("lap {}: {}", i + 1, display_ms(*lap));
                }
            }
        }
    }

    stopwatch::save(&db, &sw)?;
    Ok(())
}
