mod mocks;

pub use mocks::{MockAnswerCache, MockBlocklist};
