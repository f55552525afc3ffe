pub mod engine;
pub mod matching;
pub mod outcome;
pub mod status;

pub use engine::{evaluate, evaluate_with};
pub use matching::{CoOccurrenceMatcher, DocumentMatcher};
pub use outcome::{Evaluation, EvaluationResult, FieldIssue, FieldIssueHistogram, Status};
pub use status::{StatusPolicy, UnknownTypePolicy};
