//! Types and rules shared by the task backend and the browser client.

mod board;
mod due_input;
mod error;
mod remaining;
mod task;

pub use board::{EditState, TaskBoard};
pub use due_input::{parse_due_input, DUE_INPUT_FORMAT};
pub use error::{ErrorBody, ValidationError};
pub use remaining::{remaining_time, Remaining};
pub use task::{CreateTaskRequest, NewTask, Task, UpdateTaskRequest};
