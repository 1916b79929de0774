pub mod activity;
pub mod score;
pub mod rank;
pub mod gacha;
pub mod leaderboard;
pub mod error;

pub use activity::*;
pub use score::*;
pub use rank::*;
pub use gacha::*;
pub use leaderboard::*;
pub use error::*;
