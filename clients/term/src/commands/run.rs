//! The countdown session itself.
//!
//! The start is gated server-side; everything after approval runs locally.
//! The loop multiplexes the one-second tick stream with single-letter
//! commands on stdin and redraws one progress line per tick.

use std::io::Write;

use anyhow::{Context, Result};
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use unveil_client::{
    ApiClient, AudioSink, ClientConfig, PicsumImageSource, StartOutcome, Tick, TickOutcome,
    TimerSession,
};
use unveil_types::UsageSnapshot;

/// Width of the reveal bar in characters.
const BAR_WIDTH: usize = 24;

/// Rings the terminal bell once per alarm trigger.
struct TerminalBell;

impl AudioSink for TerminalBell {
    fn play(&mut self, _looped: bool) {
        print!("\x07");
        let _ = std::io::stdout().flush();
    }

    fn stop(&mut self) {}
}

pub async fn run(
    api: &ApiClient,
    config: &ClientConfig,
    duration: u32,
    no_sound: bool,
) -> Result<()> {
    match api.start_session(i64::from(duration)).await? {
        StartOutcome::Denied { reason } => {
            println!("Denied: {reason}");
            return Ok(());
        }
        StartOutcome::Authorized { usage } => {
            if let Some(usage) = usage {
                announce_start(&usage);
            }
        }
    }

    let source = PicsumImageSource::new(config.image_base_url.clone());
    let mut session = TimerSession::new(source, TerminalBell, !no_sound).await;
    match session.image_url() {
        Some(url) => println!("Obscuring image: {url}"),
        None => println!("No obscuring image this session (image service unreachable)."),
    }

    let mut ticks = Some(session.start(duration).context("countdown refused to start")?);
    println!("Commands: p pause, r resume, s stop alarm, q quit");
    draw(&session);

    let mut input = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            tick = recv(&mut ticks) => {
                if tick.is_none() {
                    // The ticker went away; park this branch until resume.
                    ticks = None;
                    continue;
                }
                match session.apply_tick() {
                    TickOutcome::Ticked { .. } => draw(&session),
                    TickOutcome::Expired => {
                        ticks = None;
                        draw(&session);
                        println!();
                        if session.alarm_ringing() {
                            println!("Time's up. Alarm ringing; press s to stop.");
                        } else {
                            println!("Time's up.");
                        }
                    }
                    TickOutcome::Ignored => {}
                }
            }
            line = input.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                match line.trim() {
                    "p" => {
                        if session.pause() {
                            ticks = None;
                            println!();
                            println!("Paused at {}s remaining.", session.remaining());
                        }
                    }
                    "r" => {
                        if let Some(rx) = session.resume() {
                            ticks = Some(rx);
                            println!("Resumed.");
                        }
                    }
                    "s" => {
                        session.stop_alarm();
                        println!("Alarm stopped.");
                    }
                    "q" => break,
                    "" => {}
                    other => println!("Unknown command {other:?} (p, r, s, q)"),
                }
            }
        }
    }

    session.reset().await;
    println!();
    Ok(())
}

fn announce_start(usage: &UsageSnapshot) {
    println!(
        "Session authorized (timer starts recorded: {}).",
        usage.timers_started
    );
    if usage.restricted() {
        println!("Trial ended: future sessions are capped until payment.");
    }
}

/// Receive the next tick, or wait forever when no ticker is live.
async fn recv(ticks: &mut Option<mpsc::Receiver<Tick>>) -> Option<Tick> {
    match ticks {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

fn draw(session: &TimerSession<PicsumImageSource, TerminalBell>) {
    print!(
        "\r[{}] {:>4}s remaining",
        reveal_bar(session.revealed_fraction(), BAR_WIDTH),
        session.remaining()
    );
    let _ = std::io::stdout().flush();
}

/// Render the revealed fraction as a fixed-width bar.
fn reveal_bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    let mut bar = String::with_capacity(width);
    for cell in 0..width {
        bar.push(if cell < filled { '#' } else { '.' });
    }
    bar
}
