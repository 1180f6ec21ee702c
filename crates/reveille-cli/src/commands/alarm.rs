use clap::Subcommand;
use reveille_core::storage::Database;
use reveille_core::{
    clock, scheduler, Alarm, AlarmStore, Config, Event, WakeMethod, RING_TONES, WAKE_METHODS,
};

use super::{format_interval, parse_time, LogNotifier};

#[derive(Subcommand)]
pub enum AlarmAction {
    /// Add an alarm
    Add {
        /// Fire time, 24-hour HH:MM
        time: String,
        /// Alarm label
        #[arg(long, default_value = "Alarm")]
        label: String,
        /// Wake method index (see `alarm methods`)
        #[arg(long)]
        method: Option<usize>,
        /// Ring tone id (see `alarm tones`)
        #[arg(long)]
        tone: Option<u32>,
        /// Repeat days, comma-separated (e.g. "mon,wed,fri")
        #[arg(long)]
        days: Option<String>,
        /// Repeat Monday through Friday
        #[arg(long)]
        weekdays: bool,
        /// Repeat Saturday and Sunday
        #[arg(long)]
        weekends: bool,
    },
    /// List alarms
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit an alarm by list index
    Edit {
        index: usize,
        /// New fire time, 24-hour HH:MM
        #[arg(long)]
        time: Option<String>,
        /// New label
        #[arg(long)]
        label: Option<String>,
        /// New wake method index
        #[arg(long)]
        method: Option<usize>,
        /// New ring tone id
        #[arg(long)]
        tone: Option<u32>,
        /// New repeat days, comma-separated ("none" to clear)
        #[arg(long)]
        days: Option<String>,
    },
    /// Remove an alarm by list index
    Remove { index: usize },
    /// Enable an alarm by list index
    Enable { index: usize },
    /// Disable an alarm by list index
    Disable { index: usize },
    /// Show the next alarm due to fire
    Next,
    /// List the wake method catalog
    Methods,
    /// List the ring tone catalog
    Tones,
}

const DAY_NAMES: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

fn parse_days(spec: &str) -> Result<[bool; 7], String> {
    let mut repeats = [false; 7];
    if spec.eq_ignore_ascii_case("none") {
        return Ok(repeats);
    }
    for part in spec.split(',') {
        let name = part.trim().to_ascii_lowercase();
        let index = DAY_NAMES
            .iter()
            .position(|d| *d == name)
            .ok_or_else(|| format!("unknown day '{part}'"))?;
        repeats[index] = true;
    }
    Ok(repeats)
}

fn repeats_text(repeats: &[bool; 7]) -> String {
    if repeats.iter().all(|r| !r) {
        return "once".to_string();
    }
    DAY_NAMES
        .iter()
        .zip(repeats)
        .filter(|(_, on)| **on)
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(",")
}

fn resolve_method(index: usize) -> Result<WakeMethod, String> {
    WakeMethod::from_index(index)
        .ok_or_else(|| format!("unknown wake method {index}, see `alarm methods`"))
}

fn print_list(store: &AlarmStore) {
    if store.is_empty() {
        println!("no alarms");
        return;
    }
    for (i, alarm) in store.list().iter().enumerate() {
        let state = if alarm.enabled { "on " } else { "off" };
        println!(
            "{i}: [{state}] {} {} ({}, {})",
            alarm.time_text(),
            alarm.label,
            alarm.wake_method.name(),
            repeats_text(&alarm.repeats),
        );
    }
}

pub fn run(action: AlarmAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut store = AlarmStore::load_or_empty(&db);
    let mut notifier = LogNotifier;

    match action {
        AlarmAction::Add { time, label, method, tone, days, weekdays, weekends } => {
            let config = Config::load_or_default();
            let (hour, minute) = parse_time(&time)?;
            let method = match method {
                Some(index) => resolve_method(index)?,
                None => resolve_method(config.default_wake_method)?,
            };
            let tone = tone.unwrap_or(config.default_tone_id);

            let mut repeats = match days {
                Some(spec) => parse_days(&spec)?,
                None => [false; 7],
            };
            if weekdays {
                repeats[1..6].fill(true);
            }
            if weekends {
                repeats[0] = true;
                repeats[6] = true;
            }

            let alarm = Alarm::new(hour, minute, label, method, tone, repeats);
            let next = alarm.next_activate();
            match store.add(alarm.clone()) {
                Ok(()) => {
                    store.save(&db)?;
                    let _ = scheduler::on_add(&mut notifier, &alarm);
                    log_event(&Event::AlarmAdded {
                        id: alarm.notification_id.clone(),
                        summary: alarm.summary(),
                        at: chrono::Utc::now(),
                    });
                    println!("Added {}", alarm.summary());
                    if let Some(next) = next {
                        println!("Going off in {}", format_interval(next - clock::now()));
                    }
                }
                Err(reveille_core::StoreError::DuplicateAlarm) => {
                    println!("Sorry, an identical or similar alarm already exists, please try again");
                }
                Err(e) => return Err(e.into()),
            }
        }
        AlarmAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(store.list())?);
            } else {
                print_list(&store);
            }
        }
        AlarmAction::Edit { index, time, label, method, tone, days } => {
            let Some(old) = store.list().get(index).cloned() else {
                eprintln!("no alarm at index {index}");
                std::process::exit(1);
            };
            let mut updated = old.clone();
            if let Some(time) = time {
                let (hour, minute) = parse_time(&time)?;
                updated.hour = hour;
                updated.minute = minute;
            }
            if let Some(label) = label {
                updated.label = label;
            }
            if let Some(method) = method {
                updated.wake_method = resolve_method(method)?;
            }
            if let Some(tone) = tone {
                updated.tone_id = tone;
            }
            if let Some(spec) = days {
                updated.repeats = parse_days(&spec)?;
            }

            match store.replace(&old.notification_id, updated.clone()) {
                Ok(_) => {
                    store.save(&db)?;
                    scheduler::on_edit(&mut notifier, &old.notification_id, &updated);
                    println!("Updated {}", updated.summary());
                }
                Err(reveille_core::StoreError::DuplicateAlarm) => {
                    println!("Sorry, an identical or similar alarm already exists, please try again");
                }
                Err(e) => return Err(e.into()),
            }
        }
        AlarmAction::Remove { index } => {
            let Some(id) = store.list().get(index).map(|a| a.notification_id.clone()) else {
                eprintln!("no alarm at index {index}");
                std::process::exit(1);
            };
            let removed = store.remove(&id);
            store.save(&db)?;
            scheduler::on_remove(&mut notifier, &id);
            log_event(&Event::AlarmRemoved {
                id: id.clone(),
                at: chrono::Utc::now(),
            });
            if let Some(alarm) = removed {
                println!("Removed {}", alarm.summary());
            }
        }
        AlarmAction::Enable { index } => {
            let alarm = toggle(&mut store, &db, index, true)?;
            let _ = scheduler::on_add(&mut notifier, &alarm);
            println!("Enabled {}", alarm.summary());
        }
        AlarmAction::Disable { index } => {
            let alarm = toggle(&mut store, &db, index, false)?;
            scheduler::on_remove(&mut notifier, &alarm.notification_id);
            println!("Disabled {}", alarm.summary());
        }
        AlarmAction::Next => {
            let now = clock::now();
            let next = store
                .list_enabled()
                .into_iter()
                .filter_map(|a| a.next_activate().map(|next| (next, a)))
                .min_by_key(|(next, _)| *next);
            match next {
                Some((next, alarm)) => {
                    println!("{}", alarm.summary());
                    println!("Going off in {}", format_interval(next - now));
                }
                None => println!("no alarms scheduled"),
            }
        }
        AlarmAction::Methods => {
            for method in WAKE_METHODS {
                println!("{}: {} -- {}", method.index(), method.name(), method.description());
            }
        }
        AlarmAction::Tones => {
            for tone in RING_TONES {
                println!("{}: {}", tone.tone_id, tone.name);
            }
        }
    }

    Ok(())
}

fn log_event(event: &Event) {
    match serde_json::to_string(event) {
        Ok(json) => log::info!("{json}"),
        Err(e) => log::warn!("unloggable event: {e}"),
    }
}

fn toggle(
    store: &mut AlarmStore,
    db: &Database,
    index: usize,
    enabled: bool,
) -> Result<Alarm, Box<dyn std::error::Error>> {
    let Some(alarm) = store.alarm_mut(index) else {
        eprintln!("no alarm at index {index}");
        std::process::exit(1);
    };
    alarm.enabled = enabled;
    let alarm = alarm.clone();
    store.save(db)?;
    Ok(alarm)
}
