pub mod course;
pub mod query;
pub mod state;

pub use course::{CourseCatalog, CourseOption, PLACEHOLDER_LABEL};
pub use query::{OutboundRequest, QueryInput};
pub use state::{Phase, UiState};
