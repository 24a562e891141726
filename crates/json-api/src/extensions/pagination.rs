//! Page query parameters.

use marketplace_app::domain::pagination::{Page, PageRequest};
use salvo::{
    oapi::{ToParameters, ToSchema},
    prelude::StatusError,
};
use serde::{Deserialize, Serialize};

use crate::extensions::*;

/// `page` and `limit` query parameters.
#[derive(Debug, Clone, Copy, Default, Deserialize, ToParameters)]
#[salvo(parameters(default_parameter_in = Query))]
pub(crate) struct PageParams {
    /// Page number, starting at 1
    pub page: Option<u32>,

    /// Page size, 1 to 100
    pub limit: Option<u32>,
}

impl PageParams {
    /// Validate into a page request, using `default_limit` when no limit was sent.
    pub(crate) fn into_request(self, default_limit: u32) -> Result<PageRequest, StatusError> {
        PageRequest::new(self.page.unwrap_or(1), self.limit.unwrap_or(default_limit))
            .or_400()
    }
}

/// Pagination block of list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u64,
}

impl<T> From<&Page<T>> for Pagination {
    fn from(page: &Page<T>) -> Self {
        Self {
            page: page.page,
            limit: page.limit,
            total: page.total,
            pages: page.pages(),
        }
    }
}
