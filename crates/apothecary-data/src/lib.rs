pub mod loader;
pub mod schema;

pub use loader::{DataLoadError, GameData, load_game_data};
pub use schema::Settings;
