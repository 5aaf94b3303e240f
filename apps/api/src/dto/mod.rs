mod common;
mod forms;

pub use common::HealthResponse;
pub use forms::{FormListResponse, FormViewResponse, SubmissionResponse};
