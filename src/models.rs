use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub text: String,
    pub done: bool,
}

impl Task {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TaskStats {
    pub completed: u64,
    pub total: u64,
    pub completion_rate: u64,
    pub xp: u64,
    pub level: u64,
}

#[derive(Debug, Deserialize)]
pub struct AddTaskRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BoardResponse {
    pub date: String,
    pub display_date: String,
    pub player_number: String,
    pub tasks: Vec<Task>,
    pub stats: TaskStats,
    pub dark_mode: bool,
}
