use crate::config::{CardCell, GridConfig};
use crate::grid::{AnimationPattern, CardStyle};
use crate::reveal::Stage;
use crate::reveal_errors::{validate_coordinates, RevealError, RevealResult};
use serde::{Deserialize, Serialize};

/// Target card size in pixels, used to derive the grid from the viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardSize {
    pub width: f64,
    pub height: f64,
}

impl CardSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Every option the reveal component accepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RevealConfig {
    pub background_image: String,
    /// Explicit grid, ignored when `card_size` is set
    pub grid_size: GridConfig,
    pub card_size: Option<CardSize>,
    pub card_border_radius: f64,
    pub card_border_color: String,
    pub card_border_width: f64,
    /// Seconds each card takes to fade
    pub animation_duration: f64,
    pub animation_pattern: AnimationPattern,
    /// Anchor for the random pattern
    pub start_cell: Option<CardCell>,
    /// Delay unit in seconds
    pub delay_between_cards: f64,
    pub stage: Stage,
    /// Override for the number of trailing cards that end the sequence
    pub remain_cards: Option<usize>,
    pub overlay_text: Option<String>,
    pub overlay_text_size: f64,
    /// Seed for the random pattern; entropy when absent
    pub seed: Option<u64>,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            background_image: String::new(),
            grid_size: GridConfig::default(),
            card_size: None,
            card_border_radius: 8.0,
            card_border_color: "#ffffff".to_string(),
            card_border_width: 2.0,
            animation_duration: 0.5,
            animation_pattern: AnimationPattern::Center,
            start_cell: None,
            delay_between_cards: 0.15,
            stage: Stage::Initial,
            remain_cards: None,
            overlay_text: None,
            overlay_text_size: 50.0,
            seed: None,
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|value| value.trim().parse::<T>().ok())
}

impl RevealConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: &str) -> RevealResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: RevealConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file(&self, path: &str) -> RevealResult<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(rows) = env_parse::<usize>("REVEAL_ROWS") {
            config.grid_size.rows = rows;
        }
        if let Some(cols) = env_parse::<usize>("REVEAL_COLS") {
            config.grid_size.cols = cols;
        }
        if let Some(pattern) = env_parse::<AnimationPattern>("REVEAL_PATTERN") {
            config.animation_pattern = pattern;
        }
        if let Some(delay) = env_parse::<f64>("REVEAL_DELAY") {
            config.delay_between_cards = delay;
        }
        if let Some(duration) = env_parse::<f64>("REVEAL_DURATION") {
            config.animation_duration = duration;
        }
        if let Some(remain) = env_parse::<usize>("REVEAL_REMAIN_CARDS") {
            config.remain_cards = Some(remain);
        }
        if let Some(seed) = env_parse::<u64>("REVEAL_SEED") {
            config.seed = Some(seed);
        }
        if let Ok(image) = std::env::var("REVEAL_IMAGE") {
            config.background_image = image;
        }

        config
    }

    /// Styling passthrough for the cards
    pub fn card_style(&self) -> CardStyle {
        CardStyle {
            border_radius: self.card_border_radius,
            border_color: self.card_border_color.clone(),
            border_width: self.card_border_width,
            overlay_text: self.overlay_text.clone(),
            overlay_text_size: self.overlay_text_size,
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> RevealResult<()> {
        if self.grid_size.rows == 0 || self.grid_size.cols == 0 {
            return Err(RevealError::ConfigurationError(
                "Grid dimensions must be positive".into(),
            ));
        }

        if let Some(card) = self.card_size {
            if !(card.width > 0.0 && card.height > 0.0) {
                return Err(RevealError::ConfigurationError(
                    "Card size must be positive".into(),
                ));
            }
        }

        if !(self.delay_between_cards.is_finite() && self.delay_between_cards >= 0.0) {
            return Err(RevealError::ConfigurationError(
                "delayBetweenCards must be a non-negative number".into(),
            ));
        }

        if !(self.animation_duration.is_finite() && self.animation_duration >= 0.0) {
            return Err(RevealError::ConfigurationError(
                "animationDuration must be a non-negative number".into(),
            ));
        }

        // Only checkable against an explicit grid
        if let (Some(cell), None) = (self.start_cell, self.card_size) {
            validate_coordinates(cell.row, cell.col, self.grid_size.rows, self.grid_size.cols)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RevealConfig::default();
        assert_eq!(config.grid_size, GridConfig::new(4, 4));
        assert_eq!(config.animation_pattern, AnimationPattern::Center);
        assert_eq!(config.delay_between_cards, 0.15);
        assert_eq!(config.animation_duration, 0.5);
        assert_eq!(config.stage, Stage::Initial);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_camel_case_options() {
        let json = r#"{
            "backgroundImage": "mountains.jpg",
            "gridSize": {"rows": 3, "columns": 9},
            "animationPattern": "topLeft",
            "delayBetweenCards": 0.25,
            "animationDuration": 1.0,
            "stage": "reveal",
            "remainCards": 3,
            "startCell": {"row": 1, "col": 4},
            "overlayText": "?"
        }"#;
        let config: RevealConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.background_image, "mountains.jpg");
        assert_eq!(config.grid_size, GridConfig::new(3, 9));
        assert_eq!(config.animation_pattern, AnimationPattern::TopLeft);
        assert_eq!(config.stage, Stage::Reveal);
        assert_eq!(config.remain_cards, Some(3));
        assert_eq!(config.start_cell, Some(CardCell::new(1, 4)));
        assert_eq!(config.card_style().overlay_text.as_deref(), Some("?"));
        // Untouched options keep their defaults
        assert_eq!(config.card_border_radius, 8.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_grid = RevealConfig {
            grid_size: GridConfig { rows: 0, cols: 4 },
            ..RevealConfig::default()
        };
        assert!(zero_grid.validate().is_err());

        let negative_delay = RevealConfig {
            delay_between_cards: -0.1,
            ..RevealConfig::default()
        };
        assert!(negative_delay.validate().is_err());

        let bad_card = RevealConfig {
            card_size: Some(CardSize::new(0.0, 100.0)),
            ..RevealConfig::default()
        };
        assert!(bad_card.validate().is_err());

        let outside = RevealConfig {
            start_cell: Some(CardCell::new(4, 0)),
            ..RevealConfig::default()
        };
        assert!(matches!(
            outside.validate(),
            Err(RevealError::InvalidCoordinates { row: 4, .. })
        ));
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("e_reveal_config_{}.json", std::process::id()));
        let path = path.to_str().unwrap();

        let config = RevealConfig {
            animation_pattern: AnimationPattern::Random,
            seed: Some(9),
            ..RevealConfig::default()
        };
        config.save_to_file(path).unwrap();
        let loaded = RevealConfig::load_from_file(path).unwrap();
        std::fs::remove_file(path).ok();
        assert_eq!(loaded, config);

        assert!(matches!(
            RevealConfig::load_from_file("/definitely/not/here.json"),
            Err(RevealError::Io(_))
        ));
    }
}
