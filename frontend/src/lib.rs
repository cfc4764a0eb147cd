use chrono::{DateTime, Local, Utc};
use sauron::{
    html::{attributes::*, *},
    prelude::*,
};
use todo_shared::{parse_due_input, remaining_time, CreateTaskRequest, EditState, Task, TaskBoard};
use uuid::Uuid;
use web_sys::console;

mod api;

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone)]
pub enum Msg {
    LoadTasks,
    TasksLoaded(Vec<Task>),
    SetNewText(String),
    SetNewDue(String),
    AddTask,
    TaskCreated(Task),
    ToggleTask(Uuid),
    TaskUpdated(Task),
    StartEdit(Uuid),
    SetEditText(String),
    SaveEdit(Uuid),
    EditSaved(Task),
    CancelEdit,
    DeleteTask(Uuid),
    TaskDeleted(Uuid),
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub struct Model {
    board: TaskBoard,
    edit: EditState,
    new_text: String,
    new_due: String,
    loading: bool,
    error: Option<String>,
}

fn display_time(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local).format(DISPLAY_FORMAT).to_string()
}

impl Application for Model {
    type MSG = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        Cmd::new(async { Msg::LoadTasks })
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::LoadTasks => {
                self.loading = true;
                Cmd::new(async {
                    match api::fetch_tasks().await {
                        Ok(tasks) => Msg::TasksLoaded(tasks),
                        Err(e) => Msg::Error(e),
                    }
                })
            }
            Msg::TasksLoaded(tasks) => {
                self.board.load(tasks);
                self.loading = false;
                Cmd::none()
            }
            Msg::SetNewText(text) => {
                self.new_text = text;
                Cmd::none()
            }
            Msg::SetNewDue(due) => {
                self.new_due = due;
                Cmd::none()
            }
            Msg::AddTask => {
                if self.new_text.trim().is_empty() || self.new_due.trim().is_empty() {
                    self.error = Some("Please enter both task and due date!".to_owned());
                    return Cmd::none();
                }
                let due_date = parse_due_input(&self.new_due, &Local);
                if due_date.is_none() {
                    self.error = Some(format!("Could not read the due date {:?}", self.new_due));
                    return Cmd::none();
                }
                let request = CreateTaskRequest {
                    text: Some(self.new_text.clone()),
                    due_date,
                };
                Cmd::new(async move {
                    match api::create_task(&request).await {
                        Ok(task) => Msg::TaskCreated(task),
                        Err(e) => Msg::Error(e),
                    }
                })
            }
            Msg::TaskCreated(task) => {
                self.board.insert_created(task);
                self.new_text.clear();
                self.new_due.clear();
                self.error = None;
                Cmd::none()
            }
            Msg::ToggleTask(id) => match self.board.toggle_request(id) {
                Some(patch) => Cmd::new(async move {
                    match api::update_task(id, &patch).await {
                        Ok(task) => Msg::TaskUpdated(task),
                        Err(e) => Msg::Error(e),
                    }
                }),
                None => {
                    console::log_1(&format!("Task {id} is not on the board").into());
                    Cmd::none()
                }
            },
            Msg::TaskUpdated(task) => {
                self.board.replace(task);
                self.error = None;
                Cmd::none()
            }
            Msg::StartEdit(id) => {
                if let Some(task) = self.board.get(id) {
                    self.edit.start(task);
                }
                Cmd::none()
            }
            Msg::SetEditText(text) => {
                self.edit.set_draft(text);
                Cmd::none()
            }
            Msg::SaveEdit(id) => match self.edit.save_request(id) {
                Some(patch) => Cmd::new(async move {
                    match api::update_task(id, &patch).await {
                        Ok(task) => Msg::EditSaved(task),
                        Err(e) => Msg::Error(e),
                    }
                }),
                None => Cmd::none(),
            },
            Msg::EditSaved(task) => {
                self.board.replace(task);
                self.edit.cancel();
                self.error = None;
                Cmd::none()
            }
            Msg::CancelEdit => {
                self.edit.cancel();
                Cmd::none()
            }
            Msg::DeleteTask(id) => Cmd::new(async move {
                match api::delete_task(id).await {
                    Ok(_) => Msg::TaskDeleted(id),
                    Err(e) => Msg::Error(e),
                }
            }),
            Msg::TaskDeleted(id) => {
                self.board.remove(id);
                if self.edit.is_editing(id) {
                    self.edit.cancel();
                }
                self.error = None;
                Cmd::none()
            }
            Msg::Error(error) => {
                console::log_1(&format!("Error: {}", error).into());
                self.loading = false;
                self.error = Some(error);
                Cmd::none()
            }
        }
    }

    fn view(&self) -> Node<Msg> {
        div(
            [class("min-h-screen bg-ctp-base text-ctp-text")],
            [
                header([class("bg-ctp-mantle shadow-lg border-b border-ctp-surface0")], [
                    div([class("max-w-6xl mx-auto px-6 py-4")], [
                        h1([class("text-2xl font-bold text-ctp-text text-center")], [text("📝 My To-Do Dashboard")]),
                    ]),
                ]),
                div(
                    [class("max-w-6xl mx-auto px-6 py-8 space-y-8")],
                    [
                        self.view_error(),
                        self.view_create_form(),
                        if self.loading {
                            div([class("text-center py-10 text-ctp-subtext0 italic")], [text("Loading...")])
                        } else {
                            self.view_lists()
                        },
                    ],
                ),
            ],
        )
    }
}

impl Model {
    fn view_error(&self) -> Node<Msg> {
        match &self.error {
            Some(error) => div(
                [class("bg-ctp-red/20 text-ctp-red border border-ctp-red rounded-lg px-4 py-3")],
                [text(error)],
            ),
            None => span([], []),
        }
    }

    fn view_create_form(&self) -> Node<Msg> {
        div([class("p-6 bg-ctp-surface0 rounded-lg border border-ctp-surface1 flex flex-wrap gap-3")], [
            input([
                r#type("text"),
                placeholder("Add a new task..."),
                value(&self.new_text),
                on_input(|event| Msg::SetNewText(event.value())),
                class("flex-1 px-3 py-2 bg-ctp-surface1 border border-ctp-surface2 rounded-md text-ctp-text placeholder-ctp-subtext0 focus:outline-none focus:ring-2 focus:ring-ctp-blue"),
            ], []),
            input([
                r#type("datetime-local"),
                value(&self.new_due),
                on_input(|event| Msg::SetNewDue(event.value())),
                class("px-3 py-2 bg-ctp-surface1 border border-ctp-surface2 rounded-md text-ctp-text focus:outline-none focus:ring-2 focus:ring-ctp-blue"),
            ], []),
            button([
                on_click(|_| Msg::AddTask),
                class("bg-ctp-blue hover:bg-ctp-sapphire text-ctp-base font-medium px-6 py-2 rounded-md transition-colors duration-200"),
            ], [text("Add")]),
        ])
    }

    fn view_lists(&self) -> Node<Msg> {
        let active = self.board.active();
        let completed = self.board.completed();
        let now = Utc::now();

        div([class("grid grid-cols-1 md:grid-cols-2 gap-6")], [
            div([class("bg-ctp-surface0 rounded-lg p-6 border border-ctp-surface1")], [
                h2([class("text-xl font-semibold text-ctp-blue pb-2 mb-4 border-b border-ctp-blue/40")], [text("Active Tasks")]),
                if active.is_empty() {
                    p([class("text-ctp-subtext0")], [text("No active tasks 🎉")])
                } else {
                    ul(
                        [class("space-y-3")],
                        active.iter().map(|task| self.view_active_task(task, now)).collect::<Vec<_>>(),
                    )
                },
            ]),
            div([class("bg-ctp-surface0 rounded-lg p-6 border border-ctp-surface1")], [
                h2([class("text-xl font-semibold text-ctp-green pb-2 mb-4 border-b border-ctp-green/40")], [text("Completed")]),
                if completed.is_empty() {
                    p([class("text-ctp-subtext0")], [text("No completed tasks yet 📋")])
                } else {
                    ul(
                        [class("space-y-3")],
                        completed.iter().map(|task| self.view_completed_task(task)).collect::<Vec<_>>(),
                    )
                },
            ]),
        ])
    }

    fn toggle_box(task: &Task) -> Node<Msg> {
        let task_id = task.id;
        input([
            r#type("checkbox"),
            checked(task.completed),
            id(&format!("checkbox-{}", task.id)),
            on_click(move |_| Msg::ToggleTask(task_id)),
            class("mr-3 cursor-pointer"),
        ], [])
    }

    fn delete_button(task: &Task) -> Node<Msg> {
        let task_id = task.id;
        button([
            on_click(move |_| Msg::DeleteTask(task_id)),
            class("bg-ctp-red text-ctp-base rounded-md px-3 py-1 text-sm"),
            r#type("button"),
        ], [text("Delete")])
    }

    fn view_active_task(&self, task: &Task, now: DateTime<Utc>) -> Node<Msg> {
        let task_id = task.id;
        let is_editing = self.edit.is_editing(task.id);
        let remaining = remaining_time(task.due_date, now);

        li([
            key(task.id.to_string()),
            class("bg-ctp-blue/10 rounded-lg p-3 flex items-center justify-between"),
        ], [
            div([class("flex items-center flex-1")], [
                Self::toggle_box(task),
                div([class("flex-1")], [
                    if is_editing {
                        input([
                            r#type("text"),
                            value(self.edit.draft().to_string()),
                            on_input(|event| Msg::SetEditText(event.value())),
                            class("w-full px-2 py-1 bg-ctp-surface1 border border-ctp-surface2 rounded-md text-ctp-text"),
                        ], [])
                    } else {
                        span([class("text-ctp-text")], [text(&task.text)])
                    },
                    div([class(if remaining.is_overdue() { "text-xs text-ctp-red" } else { "text-xs text-ctp-subtext1" })], [
                        text(&format!("Due: {} | {}", display_time(task.due_date), remaining)),
                    ]),
                ]),
            ]),
            div([class("flex gap-2 ml-3")], [
                if is_editing {
                    button([
                        on_click(move |_| Msg::SaveEdit(task_id)),
                        class("bg-ctp-green text-ctp-base rounded-md px-3 py-1 text-sm"),
                        r#type("button"),
                    ], [text("Save")])
                } else {
                    button([
                        on_click(move |_| Msg::StartEdit(task_id)),
                        class("bg-ctp-overlay0 text-ctp-text rounded-md px-3 py-1 text-sm"),
                        r#type("button"),
                    ], [text("Edit")])
                },
                if is_editing {
                    button([
                        on_click(|_| Msg::CancelEdit),
                        class("bg-ctp-surface2 text-ctp-text rounded-md px-3 py-1 text-sm"),
                        r#type("button"),
                    ], [text("Cancel")])
                } else {
                    span([], [])
                },
                Self::delete_button(task),
            ]),
        ])
    }

    fn view_completed_task(&self, task: &Task) -> Node<Msg> {
        li([
            key(task.id.to_string()),
            class("bg-ctp-green/10 rounded-lg p-3 flex items-center justify-between"),
        ], [
            div([class("flex items-center flex-1")], [
                Self::toggle_box(task),
                div([class("flex-1")], [
                    span([class("text-ctp-text line-through")], [text(&task.text)]),
                    match task.completed_at {
                        Some(completed_at) => div([class("text-xs text-ctp-subtext1")], [
                            text(&format!("✅ Completed on: {}", display_time(completed_at))),
                        ]),
                        None => span([], []),
                    },
                ]),
            ]),
            Self::delete_button(task),
        ])
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    Program::mount_to_body(Model::default());
}
