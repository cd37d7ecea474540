//! Plain autoplay mode
//!
//! Plays the whole choreography on stdout without the TUI, driving the
//! real sequencer in real time. Each hold streams its progress over a
//! channel to an indicatif bar; the reveal and the finale print on the
//! configured cadences. Doubles as a smoke run of the core API.

use std::time::Instant;

use crossterm::style::Stylize;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc;
use tokio::time::sleep;

use crate::card::{LoadingStatus, Screen, Sequencer};
use crate::config::CardConfig;
use crate::util::{brief_duration, parse_hex_color};
use crate::Result;

/// Width of the printed confetti splash
const SPLASH_COLS: usize = 48;
/// Rows of the printed confetti splash
const SPLASH_ROWS: usize = 4;

/// Play the card start to finish on stdout
pub async fn run(config: CardConfig) -> Result<()> {
    config.validate()?;
    let mut seq = Sequencer::new(&config);

    println!("{}", "PULSA".magenta().bold());
    println!("{}", config.hold_instruction.as_str().yellow());
    println!();

    while seq.screen() != Screen::Space {
        play_stage(&mut seq, &config).await;
    }

    println!();
    println!(
        "{}",
        format!(
            "(un mensaje cada {})",
            brief_duration(config.timings.reveal_interval)
        )
        .dark_grey()
    );
    for message in &config.space_messages {
        sleep(config.timings.reveal_interval).await;
        seq.advance(Instant::now());
        println!("  {}", message);
    }

    // One more beat arms the tap, then fire it
    sleep(config.timings.reveal_interval).await;
    seq.advance(Instant::now());
    println!();
    println!("{}", config.tap_instruction.as_str().magenta().bold());
    seq.tap();
    debug_assert_eq!(seq.screen(), Screen::Finale);

    println!();
    print_splash(&config);
    for line in &config.final_lines {
        println!("  {}", line.as_str().magenta().bold());
    }
    print_splash(&config);

    Ok(())
}

/// Hold through one attempt: stream progress to a bar, show the stage
/// message, and wait out the advance delay
async fn play_stage(seq: &mut Sequencer, config: &CardConfig) {
    let attempt = seq.attempt() + 1;
    let (tx, mut rx) = mpsc::channel::<f64>(100);
    let pb = indicatif::ProgressBar::new(100);
    pb.set_style(
        indicatif::ProgressStyle::with_template("{spinner} [{bar:40}] {percent}% {msg}").unwrap(),
    );
    pb.set_message(format!("intento {}", attempt));

    let handle = tokio::spawn(async move {
        while let Some(progress) = rx.recv().await {
            pb.set_position(progress.round() as u64);
        }
        pb.finish_and_clear();
    });

    seq.press_start(Instant::now());
    loop {
        sleep(config.timings.tick).await;
        seq.advance(Instant::now());
        tx.send(seq.progress()).await.ok();
        if seq.status() == LoadingStatus::Complete {
            break;
        }
    }
    drop(tx);
    handle.await.ok();

    println!("{}", seq.stage().message.as_str().green());
    seq.press_end(Instant::now());

    sleep(config.timings.advance_delay).await;
    seq.advance(Instant::now());
}

/// A few rows of colored dots standing in for the falling confetti
fn print_splash(config: &CardConfig) {
    let mut rng = SmallRng::from_entropy();
    let colors: Vec<crossterm::style::Color> = config
        .confetti
        .palette
        .iter()
        .filter_map(|entry| parse_hex_color(entry))
        .map(Into::into)
        .collect();
    if colors.is_empty() {
        return;
    }

    for _ in 0..SPLASH_ROWS {
        for _ in 0..SPLASH_COLS {
            if rng.gen_bool(0.25) {
                let glyph = &config.confetti.glyphs[rng.gen_range(0..config.confetti.glyphs.len())];
                let color = colors[rng.gen_range(0..colors.len())];
                print!("{}", glyph.as_str().with(color));
            } else {
                print!(" ");
            }
        }
        println!();
    }
}
