pub mod articles;
pub mod auth;
pub mod categories;
pub mod departments;
pub mod favorites;
pub mod priorities;
pub mod recently_viewed;
pub mod tags;
pub mod uploads;
pub mod users;
