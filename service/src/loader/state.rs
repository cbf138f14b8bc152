//! [`State`] of a [`Loader`].
//!
//! [`Loader`]: super::Loader

use common::pagination::{Index, Page, Size};

use super::Outcome;

/// Way a fetched [`Page`] is merged into the accumulated items.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Merge {
    /// Items of the [`Page`] are appended after the accumulated ones.
    Append,

    /// Items of the [`Page`] replace the accumulated ones.
    Replace,
}

/// Accumulated state of a [`Loader`].
///
/// [`Loader`]: super::Loader
#[derive(Clone, Debug)]
pub struct State<T> {
    /// Accumulated items in display order.
    items: Vec<T>,

    /// [`Index`] of the next [`Page`] to fetch.
    page: Index,

    /// Indicator whether more items may exist remotely.
    can_load_more: bool,

    /// Indicator whether a fetch is in flight.
    is_loading: bool,

    /// Indicator whether loading has been started already.
    initialized: bool,
}

impl<T> Default for State<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: Index::FIRST,
            can_load_more: false,
            is_loading: false,
            initialized: false,
        }
    }
}

impl<T> State<T> {
    /// Returns the accumulated items.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns the [`Index`] of the next [`Page`] to fetch.
    #[must_use]
    pub fn page(&self) -> Index {
        self.page
    }

    /// Indicates whether more items may be loaded.
    #[must_use]
    pub fn can_load_more(&self) -> bool {
        self.can_load_more
    }

    /// Indicates whether a fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Allows loading the first [`Page`].
    ///
    /// Returns `false` if this [`State`] has been initialized already, so a
    /// list exhausted once never becomes loadable again.
    pub(crate) fn initialize(&mut self) -> bool {
        if self.initialized {
            return false;
        }
        self.initialized = true;
        self.can_load_more = true;
        true
    }

    /// Starts fetching the next [`Page`], returning its [`Index`].
    ///
    /// [`None`] is returned if there is nothing more to load or a fetch is in
    /// flight already.
    pub(crate) fn begin(&mut self) -> Option<Index> {
        if !self.can_load_more || self.is_loading {
            return None;
        }
        self.is_loading = true;
        Some(self.page)
    }

    /// Starts fetching outside of the [`Page`] sequence.
    ///
    /// Returns `false` if a fetch is in flight already.
    pub(crate) fn begin_detached(&mut self) -> bool {
        if self.is_loading {
            return false;
        }
        self.is_loading = true;
        true
    }

    /// Completes the in-flight fetch with the provided [`Page`] requested
    /// with the provided [`Size`].
    pub(crate) fn complete(
        &mut self,
        page: Page<T>,
        size: Size,
        merge: Merge,
    ) -> Outcome {
        self.is_loading = false;

        if page.is_empty() {
            self.can_load_more = false;
            if merge == Merge::Replace {
                self.items.clear();
            }
            return Outcome::Exhausted;
        }

        let count = page.len();
        self.can_load_more = page.is_full(size);
        match merge {
            Merge::Append => self.items.extend(page),
            Merge::Replace => self.items = page.into_items(),
        }
        self.page = self.page.next();

        Outcome::Loaded { count }
    }

    /// Completes the in-flight detached fetch by inserting the first item of
    /// the provided [`Page`] (if any) at the head of the accumulated items.
    pub(crate) fn prepend(&mut self, page: Page<T>) -> Outcome {
        self.is_loading = false;

        match page.into_iter().next() {
            Some(item) => {
                self.items.insert(0, item);
                Outcome::Loaded { count: 1 }
            }
            None => Outcome::Loaded { count: 0 },
        }
    }

    /// Fails the in-flight fetch leaving everything but the loading
    /// indicator untouched.
    pub(crate) fn fail(&mut self) {
        self.is_loading = false;
    }
}
