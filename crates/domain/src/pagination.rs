//! Paginated list responses.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A page of items as returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Total number of items across all pages.
    pub total: u64,
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub size: u32,
    /// Total number of pages.
    pub pages: u32,
}

impl<T> PaginatedResponse<T> {
    /// Returns true if a later page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.pages
    }

    /// Returns the request for the following page, if any.
    #[must_use]
    pub const fn next_page(&self) -> Option<PageRequest> {
        if self.has_next() {
            Some(PageRequest {
                page: self.page + 1,
                size: self.size,
            })
        } else {
            None
        }
    }
}

/// Page selection for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub size: u32,
}

impl PageRequest {
    /// Creates a page request.
    ///
    /// # Errors
    ///
    /// Returns an error if `page` or `size` is zero.
    pub fn new(page: u32, size: u32) -> DomainResult<Self> {
        if page == 0 {
            return Err(DomainError::InvalidPage("page starts at 1".to_string()));
        }
        if size == 0 {
            return Err(DomainError::InvalidPage("size must be positive".to_string()));
        }
        Ok(Self { page, size })
    }

    /// Returns the `page` / `size` query pairs.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
        ]
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, size: 10 }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_page_request_validation() {
        assert!(PageRequest::new(0, 10).is_err());
        assert!(PageRequest::new(1, 0).is_err());
        assert_eq!(PageRequest::new(2, 25).unwrap().page, 2);
    }

    #[test]
    fn test_query_pairs() {
        let pairs = PageRequest::default().query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "1".to_string()),
                ("size".to_string(), "10".to_string())
            ]
        );
    }

    #[test]
    fn test_next_page() {
        let page: PaginatedResponse<String> = serde_json::from_value(json!({
            "items": ["a", "b"],
            "total": 3,
            "page": 1,
            "size": 2,
            "pages": 2
        }))
        .unwrap();

        assert_eq!(page.next_page(), Some(PageRequest { page: 2, size: 2 }));

        let last = PaginatedResponse::<String> {
            page: 2,
            ..page
        };
        assert_eq!(last.next_page(), None);
    }
}
