//! Confetti burst for the finale
//!
//! A fixed-count particle drop. Each particle gets a randomized column,
//! glyph, palette color, spawn delay, and fall duration; `advance`
//! retires particles whose fall has completed, so a finished burst
//! drains to empty and the owner can drop it.

use std::f64::consts::TAU;
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::Rng;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

use crate::config::ConfettiOptions;
use crate::util::{ease_out, parse_hex_color};

/// Horizontal sway amplitude, in cells
const SWAY_CELLS: f64 = 2.0;
/// Sway oscillations over one full fall
const SWAY_TURNS: f64 = 1.5;

#[derive(Debug)]
struct Particle {
    /// Horizontal position as a fraction of the width
    column: f64,
    /// Sway phase offset, radians
    phase: f64,
    glyph: String,
    color: Color,
    delay: Duration,
    fall: Duration,
    /// Eased fall fraction: 0 above the top edge, 1 past the bottom
    frac: f64,
    visible: bool,
}

/// One celebration burst of independent falling particles
#[derive(Debug)]
pub struct ConfettiBurst {
    started: Instant,
    particles: Vec<Particle>,
}

impl ConfettiBurst {
    /// Spawn a burst of exactly `options.count` particles
    pub fn spawn(rng: &mut SmallRng, options: &ConfettiOptions, now: Instant) -> Self {
        let colors: Vec<Color> = options
            .palette
            .iter()
            .filter_map(|entry| parse_hex_color(entry))
            .collect();
        let fall_spread = options.fall_max.saturating_sub(options.fall_min);

        let particles = (0..options.count)
            .map(|_| {
                let color = if colors.is_empty() {
                    Color::White
                } else {
                    colors[rng.gen_range(0..colors.len())]
                };
                let glyph = if options.glyphs.is_empty() {
                    "•".to_string()
                } else {
                    options.glyphs[rng.gen_range(0..options.glyphs.len())].clone()
                };
                Particle {
                    column: rng.gen::<f64>(),
                    phase: rng.gen::<f64>() * TAU,
                    glyph,
                    color,
                    delay: options.max_delay.mul_f64(rng.gen::<f64>()),
                    fall: options.fall_min + fall_spread.mul_f64(rng.gen::<f64>()),
                    frac: 0.0,
                    visible: false,
                }
            })
            .collect();

        Self {
            started: now,
            particles,
        }
    }

    /// Apply elapsed time; particles whose fall has completed are removed
    pub fn advance(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.started);
        self.particles.retain_mut(|p| {
            if elapsed < p.delay {
                p.visible = false;
                return true;
            }
            let falling = elapsed - p.delay;
            if falling >= p.fall {
                return false;
            }
            p.visible = true;
            p.frac = ease_out(falling.as_secs_f64() / p.fall.as_secs_f64());
            true
        });
    }

    /// Particles still owned by the burst (waiting or falling)
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// True once every particle has finished its fall
    pub fn is_done(&self) -> bool {
        self.particles.is_empty()
    }
}

/// Draws a burst over an area; cells under falling particles are
/// overwritten, everything else is left untouched
pub struct ConfettiOverlay<'a> {
    burst: &'a ConfettiBurst,
}

impl<'a> ConfettiOverlay<'a> {
    pub fn new(burst: &'a ConfettiBurst) -> Self {
        Self { burst }
    }
}

impl Widget for ConfettiOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        for p in &self.burst.particles {
            if !p.visible {
                continue;
            }
            // Fall runs from one row above the top edge to one below the bottom
            let span = area.height as f64 + 2.0;
            let row = (p.frac * span).floor() - 1.0;
            if row < 0.0 || row >= area.height as f64 {
                continue;
            }
            let sway = (p.phase + p.frac * SWAY_TURNS * TAU).sin() * SWAY_CELLS;
            let col = (p.column * area.width.saturating_sub(1) as f64 + sway).round();
            if col < 0.0 || col >= area.width as f64 {
                continue;
            }
            let x = area.x + col as u16;
            let y = area.y + row as u16;
            buf.get_mut(x, y)
                .set_symbol(&p.glyph)
                .set_style(Style::default().fg(p.color));
        }
    }
}
