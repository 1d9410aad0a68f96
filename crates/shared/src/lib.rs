//! Wire and domain types shared between the MoodMate backend contract and its clients.

pub mod domain;
pub mod error;
pub mod protocol;
