//! Client-side task state.
//!
//! The board is the client's owned copy of the task list. It is filled once
//! from `GET /api/tasks` and afterwards merged with whatever record the
//! server returns for each mutation, never re-fetched.

use uuid::Uuid;

use crate::{Task, UpdateTaskRequest};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskBoard {
    tasks: Vec<Task>,
}

impl TaskBoard {
    pub fn new(tasks: Vec<Task>) -> Self {
        let mut board = Self::default();
        board.load(tasks);
        board
    }

    /// Replaces the whole list with the initial fetch.
    pub fn load(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks.into_iter().filter(|task| !task.deleted).collect();
    }

    pub fn insert_created(&mut self, task: Task) {
        if task.deleted {
            return;
        }
        match self.tasks.iter_mut().find(|existing| existing.id == task.id) {
            Some(existing) => *existing = task,
            None => self.tasks.push(task),
        }
    }

    /// Swaps in the server's copy of an updated record.
    ///
    /// Returns false when the id is not on the board.
    pub fn replace(&mut self, task: Task) -> bool {
        if task.deleted {
            return self.remove(task.id);
        }
        match self.tasks.iter_mut().find(|existing| existing.id == task.id) {
            Some(existing) => {
                *existing = task;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn active(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|task| task.is_active()).collect()
    }

    pub fn completed(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|task| task.completed).collect()
    }

    /// Patch that flips the completion flag of `id`, if it is on the board.
    pub fn toggle_request(&self, id: Uuid) -> Option<UpdateTaskRequest> {
        self.get(id).map(UpdateTaskRequest::toggle)
    }
}

/// Which task, if any, is being edited inline.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditState {
    #[default]
    Idle,
    Editing { id: Uuid, draft: String },
}

impl EditState {
    pub fn start(&mut self, task: &Task) {
        *self = Self::Editing {
            id: task.id,
            draft: task.text.clone(),
        };
    }

    pub fn set_draft(&mut self, text: String) {
        if let Self::Editing { draft, .. } = self {
            *draft = text;
        }
    }

    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    pub fn is_editing(&self, task_id: Uuid) -> bool {
        matches!(self, Self::Editing { id, .. } if *id == task_id)
    }

    pub fn draft(&self) -> &str {
        match self {
            Self::Editing { draft, .. } => draft,
            Self::Idle => "",
        }
    }

    /// Text patch for saving `task_id`.
    ///
    /// None unless that task is being edited with a non-blank draft.
    pub fn save_request(&self, task_id: Uuid) -> Option<UpdateTaskRequest> {
        match self {
            Self::Editing { id, draft } if *id == task_id && !draft.trim().is_empty() => {
                Some(UpdateTaskRequest::text(draft.clone()))
            }
            _ => None,
        }
    }
}
