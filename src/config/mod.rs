//! Configuration management module
//!
//! Holds the card content (attempt table, message lists, palette) and the
//! timing constants, with TOML load/save and validation.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::util::parse_hex_color;
use crate::{PulsaError, Result, APP_NAME, CONFIG_FILE};

/// One entry of the attempt table: a hold target plus the texts shown when
/// the target is reached or the press is released early.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptStage {
    /// Progress target for this attempt, in percent (0 < target <= 100)
    pub target: f64,
    /// Message shown when the target is reached
    pub message: String,
    /// Message shown when the press ends before the target
    pub retry_message: String,
}

/// Delays and cadences driving the choreography
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timings {
    /// Period of the progress tick while a press is held
    #[serde(with = "duration_millis")]
    pub tick: Duration,
    /// Delay before an early release returns to the start screen
    #[serde(with = "duration_millis")]
    pub retry_delay: Duration,
    /// Delay after a completed attempt before the next screen
    #[serde(with = "duration_millis")]
    pub advance_delay: Duration,
    /// Cadence of the space message reveal
    #[serde(with = "duration_millis")]
    pub reveal_interval: Duration,
}

/// Confetti burst parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfettiOptions {
    /// Number of particles in one burst
    pub count: usize,
    /// Hex colors sampled per particle
    pub palette: Vec<String>,
    /// Glyphs sampled per particle, standing in for particle size
    pub glyphs: Vec<String>,
    /// Shortest fall duration
    #[serde(with = "duration_millis")]
    pub fall_min: Duration,
    /// Longest fall duration
    #[serde(with = "duration_millis")]
    pub fall_max: Duration,
    /// Upper bound of the random per-particle spawn delay
    #[serde(with = "duration_millis")]
    pub max_delay: Duration,
}

/// Complete card configuration: content tables plus tuning knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardConfig {
    /// Escalating hold attempts, in play order
    pub stages: Vec<AttemptStage>,
    /// Messages revealed one by one on the space screen
    pub space_messages: Vec<String>,
    /// Final greeting, rendered as a block
    pub final_lines: Vec<String>,
    /// Instruction shown on the start screen and while holding
    pub hold_instruction: String,
    /// Instruction shown once the reveal is finished and the tap is armed
    pub tap_instruction: String,
    /// Progress gained per tick at attempt 0
    pub base_speed: f64,
    /// Per-attempt growth factor of the tick increment
    pub speed_growth: f64,
    /// Timing table
    pub timings: Timings,
    /// Confetti burst parameters
    pub confetti: ConfettiOptions,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(20),
            retry_delay: Duration::from_millis(1500),
            advance_delay: Duration::from_millis(2000),
            reveal_interval: Duration::from_millis(2000),
        }
    }
}

impl Default for ConfettiOptions {
    fn default() -> Self {
        Self {
            count: 100,
            palette: vec![
                "#ff9aa2".to_string(),
                "#ffb7b2".to_string(),
                "#ffdac1".to_string(),
                "#e2f0cb".to_string(),
                "#b5ead7".to_string(),
                "#c7ceea".to_string(),
            ],
            glyphs: vec!["·".to_string(), "•".to_string(), "●".to_string()],
            fall_min: Duration::from_millis(2000),
            fall_max: Duration::from_millis(5000),
            max_delay: Duration::from_millis(3000),
        }
    }
}

impl Default for CardConfig {
    fn default() -> Self {
        let retry = "Intentémoslo otra vez...".to_string();
        Self {
            stages: vec![
                AttemptStage {
                    target: 80.0,
                    message: "¡Presiona un poco más fuerte!".to_string(),
                    retry_message: retry.clone(),
                },
                AttemptStage {
                    target: 70.0,
                    message: "¡Más fuerte por favor!".to_string(),
                    retry_message: retry.clone(),
                },
                AttemptStage {
                    target: 100.0,
                    message: "¡Así de insistente hay que ser con los metas! ¡Llegar al 100%!"
                        .to_string(),
                    retry_message: retry,
                },
            ],
            space_messages: vec![
                "Si tienes 2 ojos... sonríe 😊".to_string(),
                "Si tienes una nariz... acuérdate de mí 👃".to_string(),
                "Y si tienes unos labios...".to_string(),
                "¡Cómo quisiera que fueran míos!".to_string(),
                "😄 Bromita, pero ahora sí...".to_string(),
                "Pon otra vez los dedos".to_string(),
                "Y vuelve a presionar 👇".to_string(),
            ],
            final_lines: vec![
                "BUENOS DÍAS ALEGRÍA".to_string(),
                "TEN UN BUEN INICIO DE SEMANA".to_string(),
                "Y RECUERDA QUE TE QUIERO".to_string(),
                "Y TÚ PUEDES CON TODO".to_string(),
                "BUENA SEMANA BONITA :D".to_string(),
            ],
            hold_instruction: "Presiona aquí con los 2 pulgares".to_string(),
            tap_instruction: "Pon los dedos en la pantalla y presiona...".to_string(),
            base_speed: 1.0,
            speed_growth: 0.2,
            timings: Timings::default(),
            confetti: ConfettiOptions::default(),
        }
    }
}

impl CardConfig {
    /// Create a new configuration with the built-in card content
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.stages.is_empty() {
            return Err(PulsaError::Config(
                "At least one attempt stage is required".to_string(),
            ));
        }

        for (i, stage) in self.stages.iter().enumerate() {
            if stage.target <= 0.0 || stage.target > 100.0 {
                return Err(PulsaError::Config(format!(
                    "Stage {} target must be in (0, 100], got {}",
                    i, stage.target
                )));
            }
        }

        if self.space_messages.is_empty() {
            return Err(PulsaError::Config(
                "At least one space message is required".to_string(),
            ));
        }

        if self.final_lines.is_empty() {
            return Err(PulsaError::Config(
                "At least one final line is required".to_string(),
            ));
        }

        if self.base_speed <= 0.0 {
            return Err(PulsaError::Config(format!(
                "Base speed must be positive, got {}",
                self.base_speed
            )));
        }

        // Zero growth would flatten the difficulty escalation
        if self.speed_growth <= 0.0 {
            return Err(PulsaError::Config(format!(
                "Speed growth must be positive, got {}",
                self.speed_growth
            )));
        }

        if self.timings.tick.is_zero() {
            return Err(PulsaError::Config(
                "Tick period must be greater than 0".to_string(),
            ));
        }

        if self.timings.reveal_interval.is_zero() {
            return Err(PulsaError::Config(
                "Reveal interval must be greater than 0".to_string(),
            ));
        }

        if self.confetti.count == 0 {
            return Err(PulsaError::Config(
                "Confetti count must be greater than 0".to_string(),
            ));
        }

        if self.confetti.palette.is_empty() {
            return Err(PulsaError::Config(
                "Confetti palette must not be empty".to_string(),
            ));
        }

        for entry in &self.confetti.palette {
            if parse_hex_color(entry).is_none() {
                return Err(PulsaError::Config(format!(
                    "Invalid palette color: {}",
                    entry
                )));
            }
        }

        if self.confetti.glyphs.is_empty() {
            return Err(PulsaError::Config(
                "Confetti glyphs must not be empty".to_string(),
            ));
        }

        if self.confetti.fall_min.is_zero() || self.confetti.fall_min > self.confetti.fall_max {
            return Err(PulsaError::Config(format!(
                "Confetti fall range is invalid: {:?}..{:?}",
                self.confetti.fall_min, self.confetti.fall_max
            )));
        }

        Ok(())
    }

    /// Load configuration from the standard config file location
    /// Returns the built-in card if the file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PulsaError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            PulsaError::Config(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to the standard config file location
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_file_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                PulsaError::Config(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| PulsaError::Config(format!("Failed to serialize configuration: {}", e)))?;

        fs::write(path, content).map_err(|e| {
            PulsaError::Config(format!(
                "Failed to write config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/pulsa/pulsa.toml or falls back to $HOME/.config/pulsa/pulsa.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PulsaError::Config("Unable to determine config directory".to_string()))?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
