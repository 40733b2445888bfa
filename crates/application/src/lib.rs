pub mod ports;
pub mod use_cases;

pub use use_cases::{HandleQueryUseCase, QueryAction};
