//! Response envelope shared by every JSON route.

use marketplace_app::domain::pagination::Page;
use salvo::{oapi::ToSchema, prelude::Json};
use serde::{Deserialize, Serialize};

use crate::extensions::Pagination;

/// `{ success, message?, data?, pagination? }`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ApiResponse<T: ToSchema + 'static> {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Body of responses that only carry a message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ApiMessage {
    pub success: bool,
    pub message: String,
}

pub(crate) fn data<T: ToSchema + 'static>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        message: None,
        data: Some(data),
        pagination: None,
    })
}

pub(crate) fn data_with_message<T: ToSchema + 'static>(
    message: impl Into<String>,
    data: T,
) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        message: Some(message.into()),
        data: Some(data),
        pagination: None,
    })
}

/// A page of records converted into their response shape.
pub(crate) fn page<R, T>(page: Page<R>) -> Json<ApiResponse<Vec<T>>>
where
    T: ToSchema + From<R> + 'static,
{
    let pagination = Pagination::from(&page);

    Json(ApiResponse {
        success: true,
        message: None,
        data: Some(page.items.into_iter().map(T::from).collect()),
        pagination: Some(pagination),
    })
}

pub(crate) fn message(message: impl Into<String>) -> Json<ApiMessage> {
    Json(ApiMessage {
        success: true,
        message: message.into(),
    })
}
