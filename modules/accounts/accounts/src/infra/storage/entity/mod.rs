pub mod group;
pub mod ownership;
pub mod user;
pub mod view;
