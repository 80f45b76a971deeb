use serde::{Deserialize, Serialize};

use crate::document::validate::ValidationError;

/// Largest page a client may request.
pub const MAX_PAGE_LIMIT: u64 = 100;

/// Page size used when only `page` is given.
pub const DEFAULT_PAGE_LIMIT: u64 = 10;

/// 1-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    pub fn new(page: u64, limit: u64) -> Result<Self, ValidationError> {
        if page == 0 {
            return Err(ValidationError::Pagination("page starts at 1"));
        }
        if limit == 0 || limit > MAX_PAGE_LIMIT {
            return Err(ValidationError::Pagination("limit must be between 1 and 100"));
        }
        Ok(Self { page, limit })
    }

    /// Build from optional query parameters. No window is applied unless a
    /// parameter is given or the resource always paginates.
    pub fn from_params(
        page: Option<u64>,
        limit: Option<u64>,
        default_limit: Option<u64>,
    ) -> Result<Option<Self>, ValidationError> {
        let limit = match (page, limit.or(default_limit)) {
            (None, None) => return Ok(None),
            (_, Some(limit)) => limit,
            (Some(_), None) => DEFAULT_PAGE_LIMIT,
        };
        Self::new(page.unwrap_or(1), limit).map(Some)
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }
}

/// One listing response. Window fields are present only when paginated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u64>,
}

impl<T> Page<T> {
    pub fn unpaged(items: Vec<T>) -> Self {
        let total = items.len() as u64;
        Self {
            items,
            total,
            page: None,
            limit: None,
            total_pages: None,
        }
    }

    pub fn windowed(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: Some(request.page),
            limit: Some(request.limit),
            total_pages: Some(request.total_pages(total)),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_is_ceiling() {
        let request = PageRequest::new(1, 10).unwrap();
        assert_eq!(request.total_pages(0), 0);
        assert_eq!(request.total_pages(10), 1);
        assert_eq!(request.total_pages(11), 2);
        assert_eq!(request.total_pages(25), 3);
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(PageRequest::new(1, 10).unwrap().offset(), 0);
        assert_eq!(PageRequest::new(3, 7).unwrap().offset(), 14);
    }

    #[test]
    fn params_without_window_are_unpaged() {
        assert_eq!(PageRequest::from_params(None, None, None).unwrap(), None);
        assert_eq!(
            PageRequest::from_params(None, None, Some(10)).unwrap(),
            Some(PageRequest { page: 1, limit: 10 })
        );
        assert_eq!(
            PageRequest::from_params(Some(2), None, None).unwrap(),
            Some(PageRequest { page: 2, limit: 10 })
        );
    }

    #[test]
    fn zero_page_and_oversized_limit_are_rejected() {
        assert!(PageRequest::new(0, 10).is_err());
        assert!(PageRequest::new(1, 0).is_err());
        assert!(PageRequest::new(1, MAX_PAGE_LIMIT + 1).is_err());
    }

    #[test]
    fn unpaged_listing_omits_window_fields() {
        let page = Page::unpaged(vec![1, 2]);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json, serde_json::json!({ "items": [1, 2], "total": 2 }));
    }
}
