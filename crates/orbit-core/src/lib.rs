pub mod color;
pub mod config;
pub mod constants;
pub mod content;
pub mod orb;
pub mod scene;
pub mod score;
pub mod spotlight;
pub mod trajectory;

pub use color::*;
pub use config::*;
pub use constants::*;
pub use content::*;
pub use orb::*;
pub use scene::*;
pub use score::*;
pub use spotlight::*;
pub use trajectory::*;
