pub mod machine;

pub use machine::{GachaHistory, GachaMachine};
