//! External representation of accounts data.

pub mod dto;
