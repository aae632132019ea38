pub mod game_state;
pub mod logger;
pub mod replay;
pub mod session_rng;
pub mod settings;
pub mod snake;
pub mod types;

pub use game_state::GameState;
pub use session_rng::SessionRng;
pub use settings::GameSettings;
pub use types::{Direction, FieldSize, Food, Point};
