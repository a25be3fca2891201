//! Page windows over ordered collections
//!
//! `PagedList` slices a collection into a fixed-size window and reports the
//! page metadata a caller needs to navigate (total pages, next/previous).

use serde::ser::{Serialize, SerializeStruct, Serializer};
use thiserror::Error;

/// Errors for page arguments that cannot describe a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageError {
    /// A page must hold at least one item
    #[error("page size must be greater than zero")]
    ZeroPageSize,

    /// Pages are numbered from 1
    #[error("page number must be 1 or greater")]
    ZeroPageNumber,
}

/// A single page of items taken from a larger ordered collection
///
/// Only constructed through [`PagedList::create`], so `page`, `page_size` and
/// `total_count` always agree with the items held.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedList<T> {
    items: Vec<T>,
    page: usize,
    page_size: usize,
    total_count: usize,
}

impl<T: Clone> PagedList<T> {
    /// Slices `collection` into the window for `page_number`
    ///
    /// # Arguments
    /// * `collection` - The full ordered collection
    /// * `page_size` - Maximum number of items per page
    /// * `page_number` - 1-based page to return
    ///
    /// # Returns
    /// * `Ok(PagedList<T>)` - The window, empty if the page lies past the end
    /// * `Err(PageError)` - If `page_size` or `page_number` is zero
    pub fn create(collection: &[T], page_size: usize, page_number: usize) -> Result<Self, PageError> {
        validate(page_size, page_number)?;

        let total_count = collection.len();
        let skip = (page_number - 1).saturating_mul(page_size);
        let items = collection.iter().skip(skip).take(page_size).cloned().collect();

        Ok(Self {
            items,
            page: page_number,
            page_size,
            total_count,
        })
    }
}

impl<T> PagedList<T> {
    /// Items in this page, in collection order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the page and returns its items
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// 1-based page number
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of items in the whole collection
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn total_pages(&self) -> usize {
        self.total_count.div_ceil(self.page_size)
    }

    pub fn has_next_page(&self) -> bool {
        self.page.saturating_mul(self.page_size) < self.total_count
    }

    pub fn has_previous_page(&self) -> bool {
        self.page > 1
    }
}

/// Checks page arguments without slicing anything
pub fn validate(page_size: usize, page_number: usize) -> Result<(), PageError> {
    if page_size == 0 {
        return Err(PageError::ZeroPageSize);
    }
    if page_number == 0 {
        return Err(PageError::ZeroPageNumber);
    }
    Ok(())
}

impl<T: Serialize> Serialize for PagedList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PagedList", 7)?;
        state.serialize_field("items", &self.items)?;
        state.serialize_field("page", &self.page)?;
        state.serialize_field("pageSize", &self.page_size)?;
        state.serialize_field("totalCount", &self.total_count)?;
        state.serialize_field("totalPages", &self.total_pages())?;
        state.serialize_field("hasNextPage", &self.has_next_page())?;
        state.serialize_field("hasPreviousPage", &self.has_previous_page())?;
        state.end()
    }
}
