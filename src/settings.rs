use serde::{Deserialize, Serialize};

use crate::types::FieldSize;

/// Hard cap on snake growth. Food eaten at the cap still scores but no
/// longer grows the snake.
pub const MAX_SNAKE_LENGTH: usize = 100;
pub const INITIAL_SNAKE_LENGTH: usize = 3;
pub const FOOD_VALUE: u32 = 10;

pub const MIN_FIELD_DIMENSION: usize = 10;
pub const MAX_FIELD_DIMENSION: usize = 100;

/// Grid bounds, fixed for the lifetime of a `GameState`. `validate` is an
/// opt-in check for host-supplied values; the engine itself accepts any
/// dimensions and leaves degenerate grids to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub field_width: usize,
    pub field_height: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            field_width: 20,
            field_height: 20,
        }
    }
}

impl GameSettings {
    pub fn new(field_width: usize, field_height: usize) -> Self {
        Self {
            field_width,
            field_height,
        }
    }

    pub fn field_size(&self) -> FieldSize {
        FieldSize {
            width: self.field_width,
            height: self.field_height,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.field_width < MIN_FIELD_DIMENSION || self.field_width > MAX_FIELD_DIMENSION {
            return Err(format!(
                "Field width must be between {} and {}",
                MIN_FIELD_DIMENSION, MAX_FIELD_DIMENSION
            ));
        }
        if self.field_height < MIN_FIELD_DIMENSION || self.field_height > MAX_FIELD_DIMENSION {
            return Err(format!(
                "Field height must be between {} and {}",
                MIN_FIELD_DIMENSION, MAX_FIELD_DIMENSION
            ));
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String, String> {
        serde_yaml_ng::to_string(self).map_err(|e| format!("Failed to serialize settings: {}", e))
    }

    pub fn from_yaml(content: &str) -> Result<Self, String> {
        serde_yaml_ng::from_str(content).map_err(|e| format!("Failed to deserialize settings: {}", e))
    }
}
