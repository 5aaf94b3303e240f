//! Form schema model: entries, groups, auto-fill rules and results.

#![forbid(unsafe_code)]

mod auto_fill;
mod entry;
mod group;
mod problem;
mod result;
mod schema;
mod serde_support;
mod submission;

pub use auto_fill::{AutoFillRule, AutoFillTarget};
pub use entry::{EntryDefinition, EntryDefinitionInput, EntryType, EntryValue};
pub use group::GroupDefinition;
pub use problem::{ProblemCode, ProblemMessages, ProblemSet};
pub use result::SubmissionResult;
pub use schema::{FormSchema, FormSchemaInput};
pub use submission::{ExternalContext, RawSubmission, SubmittedValues, is_filled};
