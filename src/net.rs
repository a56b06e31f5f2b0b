//! Network layer: header normalization, request execution and the uniform
//! result type every call returns.

pub mod fetch;
pub mod headers;
pub mod response;

pub use headers::{header_set, merge_headers, HeaderInput};
pub use response::{ErrorInfo, FetchResult, HeaderSet};
