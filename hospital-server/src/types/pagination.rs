//! Page/size parameters for list endpoints

use crate::error::{PaginationInfo, ResponseMetadata};
use serde::Deserialize;
use utoipa::IntoParams;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Deserialize, IntoParams, Clone, Default)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    #[param(example = 1, minimum = 1)]
    pub page: Option<u32>,

    #[param(example = 20, minimum = 1, maximum = 100)]
    pub page_size: Option<u32>,
}

impl PaginationParams {
    /// Page number, defaulting to 1
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Page size, clamped to 1..=100
    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page() - 1) * i64::from(self.page_size())
    }

    /// One row more than the page holds, so the caller can tell whether a
    /// next page exists
    pub fn fetch_limit(&self) -> i64 {
        i64::from(self.page_size()) + 1
    }

    /// Trim an over-fetched result to the page and describe it
    pub fn paginate<T>(&self, mut rows: Vec<T>) -> (Vec<T>, ResponseMetadata) {
        let page_size = self.page_size() as usize;
        let has_next = rows.len() > page_size;
        rows.truncate(page_size);
        let metadata = ResponseMetadata {
            pagination: Some(PaginationInfo {
                page: self.page(),
                page_size: self.page_size(),
                has_next,
                has_previous: self.page() > 1,
            }),
        };
        (rows, metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let params = PaginationParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.page_size(), 20);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_pagination_offset_and_clamp() {
        let params = PaginationParams {
            page: Some(3),
            page_size: Some(10),
        };
        assert_eq!(params.offset(), 20);

        let huge = PaginationParams {
            page: Some(0),
            page_size: Some(500),
        };
        assert_eq!(huge.page(), 1);
        assert_eq!(huge.page_size(), 100);
    }

    #[test]
    fn test_paginate_detects_next_page() {
        let params = PaginationParams {
            page: Some(2),
            page_size: Some(2),
        };
        let (rows, meta) = params.paginate(vec![1, 2, 3]);
        assert_eq!(rows, vec![1, 2]);
        let info = meta.pagination.unwrap();
        assert!(info.has_next);
        assert!(info.has_previous);

        let (rows, meta) = params.paginate(vec![1]);
        assert_eq!(rows, vec![1]);
        assert!(!meta.pagination.unwrap().has_next);
    }
}
