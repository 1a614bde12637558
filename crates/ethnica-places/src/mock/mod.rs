//! Deterministic synthetic businesses, used when every live provider misses.

mod generator;
mod id;
pub mod vocabulary;

pub use generator::{
    MockGenerator, MAX_COUNT, MIN_COUNT, SEARCH_RADIUS_KM, SYNTHESIS_RADIUS_KM,
};
pub use id::MockId;
