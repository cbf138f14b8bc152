//! [`Post`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{Display, From, Into};
use serde::Deserialize;

use crate::domain::user;

/// Photo published by a user.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct Post {
    /// ID of this [`Post`].
    pub id: Id,

    /// [`Author`] of this [`Post`], if the remote API exposes it.
    #[serde(default, rename = "utilisateur")]
    pub author: Option<Author>,

    /// Free-form description of this [`Post`].
    #[serde(default)]
    pub description: String,

    /// URL of the photo of this [`Post`].
    pub photo: String,

    /// [`DateTime`] when this [`Post`] was created.
    #[serde(with = "common::datetime::serde::unix_timestamp_millis")]
    pub date: CreationDateTime,

    /// Number of likes of this [`Post`].
    #[serde(default, rename = "countLike")]
    pub likes: u64,

    /// Indicator whether the current session likes this [`Post`].
    #[serde(default)]
    pub liked: bool,
}

/// Publisher of a [`Post`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct Author {
    /// [`user::Username`] of this [`Author`].
    pub username: user::Username,
}

/// ID of a [`Post`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
pub struct Id(u64);

/// [`DateTime`] when a [`Post`] was created.
pub type CreationDateTime = DateTimeOf<(Post, unit::Creation)>;

#[cfg(test)]
mod spec {
    use crate::domain::user::Username;

    use super::{Id, Post};

    #[test]
    fn deserializes_remote_post() {
        let post: Post = serde_json::from_str(
            r#"{
                "id": 17,
                "description": "sunset",
                "photo": "http://localhost:8081/api/post/view/abc.jpg",
                "date": 1650000000123,
                "countLike": 4,
                "liked": false,
                "utilisateur": {"username": "alice"}
            }"#,
        )
        .unwrap();

        assert_eq!(post.id, Id::from(17));
        assert_eq!(
            post.author.map(|a| a.username),
            Some(Username::new("alice").unwrap()),
        );
        assert_eq!(post.description, "sunset");
        assert_eq!(post.likes, 4);
        assert!(!post.liked);
        assert_eq!(post.date.unix_timestamp_millis(), 1_650_000_000_123);
    }

    #[test]
    fn description_is_optional() {
        let post: Post = serde_json::from_str(
            r#"{"id": 1, "photo": "p.jpg", "date": 0}"#,
        )
        .unwrap();

        assert!(post.description.is_empty());
        assert!(post.author.is_none());
        assert_eq!(post.likes, 0);
    }
}
