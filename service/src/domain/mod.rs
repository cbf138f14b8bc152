//! Domain definitions.

pub mod favorite;
pub mod follower;
pub mod post;
pub mod user;

pub use self::{
    favorite::Favorite, follower::Follower, post::Post, user::User,
};
