use std::io::{BufRead, Write};

use clap::Args;
use reveille_core::challenge::{self, Challenge, RpsChoice, RpsOutcome};
use reveille_core::storage::Database;
use reveille_core::{clock, scheduler, ActivationSession, AlarmStore, Event};

use super::LogNotifier;

#[derive(Args)]
pub struct RingArgs {
    /// An accelerometer is available; shake challenges read "x y z"
    /// samples from stdin instead of falling back to Factor
    #[arg(long)]
    motion: bool,
}

pub fn run(args: RingArgs) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut store = AlarmStore::load_or_empty(&db);
    let mut notifier = LogNotifier;
    let session = ActivationSession::new();

    let now = clock::now();
    let due: Vec<String> = store
        .list_activating(now)
        .into_iter()
        .map(|a| a.notification_id.clone())
        .collect();
    if due.is_empty() {
        println!("no alarms due");
        return Ok(());
    }

    let stdin = std::io::stdin();
    let mut input = stdin.lock();

    // One alarm rings at a time; the rest stay due and ring on the next
    // invocation once this one is dismissed.
    let id = &due[0];
    let alarm = store
        .list()
        .iter()
        .find(|a| &a.notification_id == id)
        .cloned()
        .ok_or("alarm disappeared while ringing")?;

    if !session.start() {
        return Err("an alarm is already ringing".into());
    }
    println!("ALARM: {}", alarm.summary());
    log::info!("ringing {}", alarm.notification_id);

    let mut rng = rand::thread_rng();
    let selection = challenge::select(alarm.wake_method, args.motion, &mut rng);
    if let Some(notice) = &selection.fallback_notice {
        println!("{notice}");
    }
    run_challenge(selection.challenge, &mut input, &mut rng)?;

    session.dismiss();
    let fired_at = clock::now();
    store.mark_fired(id, fired_at);
    store.save(&db)?;

    let updated = store.list().iter().find(|a| &a.notification_id == id);
    let mut events = match updated {
        Some(alarm) => scheduler::on_fired(&mut notifier, alarm),
        None => Vec::new(),
    };
    events.push(Event::AlarmDismissed {
        id: id.clone(),
        at: chrono::Utc::now(),
    });
    for event in &events {
        println!("{}", serde_json::to_string(event)?);
    }

    Ok(())
}

fn run_challenge(
    challenge: Challenge,
    input: &mut impl BufRead,
    rng: &mut impl rand::Rng,
) -> Result<(), Box<dyn std::error::Error>> {
    match challenge {
        Challenge::Math(problem) => loop {
            prompt(&format!("{} = ", problem.display()))?;
            match read_line(input)?.trim().parse::<i64>() {
                Ok(answer) if problem.verify(answer) => break,
                Ok(_) => println!("Wrong, try again"),
                Err(_) => println!("Enter a number"),
            }
        },
        Challenge::Factor(problem) => loop {
            prompt(&format!("{} root: ", problem.display()))?;
            match read_line(input)?.trim().parse::<i64>() {
                Ok(root) if problem.verify(root) => break,
                Ok(_) => println!("Wrong, try again"),
                Err(_) => println!("Enter a number"),
            }
        },
        Challenge::RockPaperScissors(round) => loop {
            prompt("rock, paper or scissors? ")?;
            let choice = match read_line(input)?.trim().to_ascii_lowercase().as_str() {
                "rock" | "r" => RpsChoice::Rock,
                "paper" | "p" => RpsChoice::Paper,
                "scissors" | "s" => RpsChoice::Scissors,
                _ => {
                    println!("Enter rock, paper or scissors");
                    continue;
                }
            };
            let (computer, outcome) = round.play(choice, &mut *rng);
            println!("Computer played {}", computer.name());
            match outcome {
                RpsOutcome::Win => break,
                RpsOutcome::Draw => println!("Draw, try again"),
                RpsOutcome::Lose => println!("You lost, try again"),
            }
        },
        Challenge::Shake(mut detector) => {
            println!("shake! (feed \"x y z\" samples)");
            while !detector.is_triggered() {
                let line = read_line(input)?;
                let sample = parse_sample(&line);
                match sample {
                    Some(sample) => {
                        detector.feed(sample);
                    }
                    None => println!("Enter three numbers"),
                }
            }
        }
    }
    println!("dismissed");
    Ok(())
}

fn parse_sample(line: &str) -> Option<[f64; 3]> {
    let mut parts = line.split_whitespace();
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    let z = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some([x, y, z])
}

fn prompt(text: &str) -> std::io::Result<()> {
    print!("{text}");
    std::io::stdout().flush()
}

fn read_line(input: &mut impl BufRead) -> Result<String, Box<dyn std::error::Error>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err("input closed while an alarm was ringing".into());
    }
    Ok(line)
}
