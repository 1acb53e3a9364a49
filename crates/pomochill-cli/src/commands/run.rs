//! The interactive session: a foreground shell over the timer service.
//!
//! Commands arrive as stdin lines, events arrive on the service's broadcast
//! channel, and a `select!` loop weaves the two together until the user
//! quits. Dropping the service on the way out tears the ticker down.

use std::io::Write;

use clap::Args;
use notify_rust::Notification;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

use pomochill_core::config::Config;
use pomochill_core::error::Result;
use pomochill_core::events::Event;
use pomochill_core::player::AmbientPlayer;
use pomochill_core::quotes;
use pomochill_core::timer::{SessionTimer, TimerService};

use crate::common::format_clock;

#[derive(Args)]
pub struct RunArgs {
    /// Focus duration in seconds (overrides config)
    #[arg(long)]
    focus: Option<u64>,
    /// Short break duration in seconds (overrides config)
    #[arg(long)]
    short_break: Option<u64>,
    /// Long break duration in seconds (overrides config)
    #[arg(long)]
    long_break: Option<u64>,
    /// Start the countdown immediately
    #[arg(long)]
    autostart: bool,
    /// Disable desktop notifications
    #[arg(long)]
    no_notify: bool,
}

pub fn run(args: RunArgs) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(session(args))
}

async fn session(args: RunArgs) -> Result<()> {
    let cfg = Config::load_or_default();
    let mut durations = cfg.durations();
    if let Some(secs) = args.focus {
        durations.focus_secs = secs;
    }
    if let Some(secs) = args.short_break {
        durations.short_break_secs = secs;
    }
    if let Some(secs) = args.long_break {
        durations.long_break_secs = secs;
    }

    let timer = SessionTimer::new(durations).with_adjust_floor(cfg.timer.adjust_step_secs);
    let mut service = TimerService::new(timer);
    let mut events = service.subscribe();
    let mut player = AmbientPlayer::new(cfg.ambient.streams.clone(), cfg.ambient.volume);
    let notify = Notifier {
        enabled: cfg.notifications.enabled && !args.no_notify,
        sound: cfg.notifications.custom_sound.clone(),
    };
    let adjust_step = cfg.timer.adjust_step_secs as i64;

    println!(
        "pomochill -- focus {}, breaks {}/{} (h for help)",
        format_clock(durations.focus_secs),
        format_clock(durations.short_break_secs),
        format_clock(durations.long_break_secs)
    );
    if args.autostart {
        service.start();
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut mid_line = false;
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => print_event(&event, &notify, &mut mid_line),
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            },
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                end_line(&mut mid_line);
                if !dispatch(line.trim(), &mut service, &mut player, adjust_step)? {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                end_line(&mut mid_line);
                break;
            }
        }
    }
    Ok(())
}

/// Returns `false` when the user quits.
fn dispatch(
    line: &str,
    service: &mut TimerService,
    player: &mut AmbientPlayer,
    adjust_step: i64,
) -> Result<bool> {
    let mut parts = line.split_whitespace();
    match parts.next().unwrap_or("") {
        "" => {}
        "s" | "start" => {
            service.start();
        }
        "p" | "pause" => {
            service.pause();
        }
        "t" | "toggle" => {
            service.toggle();
        }
        "+" => {
            service.adjust_by(adjust_step);
        }
        "-" => {
            if service.adjust_by(-adjust_step).is_none() {
                println!("cannot go below {}", format_clock(adjust_step as u64));
            }
        }
        "r" | "reset" => {
            service.reset();
        }
        "rc" | "reset-cycle" => {
            service.reset_cycle();
        }
        "m" | "music" => {
            player.toggle();
            print_player(player);
        }
        "n" | "next" => {
            player.select_next();
            print_player(player);
        }
        "v" | "volume" => match parts.next().and_then(|v| v.parse::<u8>().ok()) {
            Some(volume) => {
                player.set_volume(volume);
                print_player(player);
            }
            None => println!("usage: v <0-100>"),
        },
        "st" | "status" => {
            println!("{}", serde_json::to_string_pretty(&service.snapshot())?);
        }
        "h" | "help" | "?" => print_help(),
        "q" | "quit" => return Ok(false),
        other => println!("unknown command '{other}' (h for help)"),
    }
    Ok(true)
}

fn print_event(event: &Event, notify: &Notifier, mid_line: &mut bool) {
    match event {
        Event::Tick { remaining_secs, .. } => {
            print!("\r  {:<8}", format_clock(*remaining_secs));
            let _ = std::io::stdout().flush();
            *mid_line = true;
        }
        Event::NearCompletion { .. } => {
            // One bell per warning second.
            print!("\x07");
            let _ = std::io::stdout().flush();
        }
        Event::TimerStarted {
            phase,
            remaining_secs,
            ..
        } => {
            end_line(mid_line);
            println!("{} -- {}", phase.label(), format_clock(*remaining_secs));
            if phase.is_break() {
                println!("  \"{}\"", quotes::random_quote());
            }
        }
        Event::TimerPaused { remaining_secs, .. } => {
            end_line(mid_line);
            println!("paused at {}", format_clock(*remaining_secs));
        }
        Event::TimerAdjusted { remaining_secs, .. } => {
            end_line(mid_line);
            println!("{}", format_clock(*remaining_secs));
        }
        Event::TimerReset {
            phase,
            remaining_secs,
            ..
        } => {
            end_line(mid_line);
            println!("reset -- {} {}", phase.label(), format_clock(*remaining_secs));
        }
        Event::PhaseCompleted {
            now_is_break,
            phase,
            completed_focus_sessions,
            next_duration_secs,
            ..
        } => {
            end_line(mid_line);
            if *now_is_break {
                println!(
                    "Time for a break! {} ({}) queued -- s to start. [{} focus sessions done]",
                    phase.label(),
                    format_clock(*next_duration_secs),
                    completed_focus_sessions
                );
                notify.send(
                    "Focus session complete",
                    &format!(
                        "{} time ({})",
                        phase.label(),
                        format_clock(*next_duration_secs)
                    ),
                );
            } else {
                println!(
                    "Break over -- back to work ({}) -- s when ready.",
                    format_clock(*next_duration_secs)
                );
                notify.send("Break complete", "Back to work");
            }
        }
        Event::StateSnapshot { .. } => {}
    }
}

fn print_player(player: &AmbientPlayer) {
    println!(
        "{} {} (vol {})",
        if player.is_playing() { "playing" } else { "paused" },
        player.current().name,
        player.volume()
    );
}

fn end_line(mid_line: &mut bool) {
    if *mid_line {
        println!();
        *mid_line = false;
    }
}

/// Desktop notifications per the user's preferences.
struct Notifier {
    enabled: bool,
    sound: Option<String>,
}

impl Notifier {
    fn send(&self, summary: &str, body: &str) {
        if !self.enabled {
            return;
        }
        let mut notification = Notification::new();
        notification.summary(summary).body(body);
        if let Some(sound) = &self.sound {
            notification.sound_name(sound);
        }
        if let Err(e) = notification.show() {
            tracing::debug!("desktop notification failed: {e}");
        }
    }
}

fn print_help() {
    println!("  s start    p pause    t toggle    + / - adjust    r reset    rc reset cycle");
    println!("  m music    n next stream    v <0-100> volume    st status    q quit");
}
