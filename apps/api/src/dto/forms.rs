mod conversions;
mod types;

pub use types::{FormListResponse, FormViewResponse, SubmissionResponse};
