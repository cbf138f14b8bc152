//! Abstractions for page-indexed pagination.

use std::{num::NonZeroU32, slice};

use derive_more::{Display, From, Into, IntoIterator};

/// Index of a [`Page`] in a paginated collection.
///
/// The first [`Page`] has index `0`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
pub struct Index(u32);

impl Index {
    /// [`Index`] of the first [`Page`].
    pub const FIRST: Self = Self(0);

    /// Returns the [`Index`] of the [`Page`] following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Maximum number of items in a [`Page`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Into, PartialEq)]
pub struct Size(NonZeroU32);

impl Size {
    /// [`Size`] requesting exactly one item.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Creates a new [`Size`] if the given `size` is positive.
    #[must_use]
    pub const fn new(size: u32) -> Option<Self> {
        match NonZeroU32::new(size) {
            Some(size) => Some(Self(size)),
            None => None,
        }
    }

    /// Returns this [`Size`] as a number of items.
    #[must_use]
    pub fn get(self) -> usize {
        usize::try_from(self.0.get()).unwrap_or(usize::MAX)
    }
}

/// Key by which items of a [`Page`] are sorted.
#[derive(Clone, Debug, Display, Eq, From, Hash, Into, PartialEq)]
#[from(&str, String)]
pub struct SortKey(String);

impl SortKey {
    /// Returns the [`SortKey`] ordering items by their date.
    #[must_use]
    pub fn date() -> Self {
        Self("date".to_owned())
    }

    /// Returns this [`SortKey`] as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Request of a single [`Page`] of items belonging to an `O`wner.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Request<O> {
    /// Owner of the requested items.
    pub owner: O,

    /// [`Index`] of the requested [`Page`].
    pub index: Index,

    /// [`Size`] of the requested [`Page`].
    pub size: Size,

    /// [`SortKey`] to order the items by.
    pub sort: SortKey,
}

/// Bounded batch of items returned by a single fetch.
#[derive(Clone, Debug, Eq, From, Into, IntoIterator, PartialEq)]
pub struct Page<T>(#[into_iterator(owned, ref)] Vec<T>);

impl<T> Page<T> {
    /// Creates a new [`Page`] out of the provided items.
    #[must_use]
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self(items.into_iter().collect())
    }

    /// Creates a new empty [`Page`].
    #[must_use]
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Returns the number of items in this [`Page`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether this [`Page`] has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Indicates whether this [`Page`] holds as many items as the requested
    /// [`Size`], so more items may follow it.
    #[must_use]
    pub fn is_full(&self, size: Size) -> bool {
        self.len() >= size.get()
    }

    /// Returns an iterator over the items of this [`Page`].
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.0.iter()
    }

    /// Consumes this [`Page`] returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.0
    }
}

/// Defines pagination types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($owner:ty, $node:ty) => {
        #[doc = concat!("A [`Page`] of `", stringify!($node), "`s.")]
        pub type Page = $crate::pagination::Page<$node>;

        #[doc = "[`Request`] of a [`Page`]."]
        pub type Request = $crate::pagination::Request<$owner>;
    };
}
