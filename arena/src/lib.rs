mod game;
mod interactive;
mod player;
mod recording;
pub use game::*;
pub use interactive::*;
pub use player::*;
pub use recording::*;
