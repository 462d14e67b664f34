use serde::Serialize;

/// Uniform success envelope. Absent fields are omitted from the JSON
/// rather than serialized as null; `error` responses are shaped by
/// `ApiError` and never mix with `success: true`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl<T> ApiResponse<T> {
    fn ok() -> Self {
        Self { success: true, status: None, data: None, count: None, message: None }
    }

    /// Single-record payload.
    pub fn record(data: T) -> Self {
        Self { data: Some(data), ..Self::ok() }
    }

    pub fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Array payload plus its length as `count`.
    pub fn collection(items: Vec<T>) -> Self {
        Self { count: Some(items.len()), data: Some(items), ..Self::ok() }
    }
}

impl ApiResponse<()> {
    /// Confirmation-only payload, e.g. after a delete.
    pub fn message(message: &'static str) -> Self {
        Self::ok().with_message(message)
    }

    pub fn healthy() -> Self {
        Self { status: Some("healthy"), ..Self::ok() }.with_message("API is running")
    }
}
