use crate::day::{self, day_key};
use crate::errors::StoreError;
use crate::models::{Task, TaskStats};
use crate::storage::KeyValueStore;
use chrono::NaiveDate;
use tracing::{info, warn};

pub const TASKS_KEY: &str = "tasks";
pub const LAST_OPENED_KEY: &str = "lastOpenedDate";
pub const DARK_MODE_KEY: &str = "darkMode";
pub const HAS_VISITED_KEY: &str = "hasVisited";

/// The day's task list plus the preferences that live next to it.
///
/// Every mutation writes the whole list back to the underlying storage. Call
/// [`DailyTaskStore::initialize`] whenever the board is opened so completed
/// tasks from earlier days are dropped.
#[derive(Debug)]
pub struct DailyTaskStore<S> {
    storage: S,
    tasks: Vec<Task>,
}

impl<S: KeyValueStore> DailyTaskStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            tasks: Vec::new(),
        }
    }

    pub async fn initialize(&mut self) -> Result<&[Task], StoreError> {
        self.initialize_at(day::today()).await
    }

    /// Loads the stored list, rolling it over when `today` differs from the
    /// stored marker. No writes happen when the marker already matches.
    pub async fn initialize_at(&mut self, today: NaiveDate) -> Result<&[Task], StoreError> {
        let today = day_key(today);
        let stored = self.load_tasks();

        if self.storage.get(LAST_OPENED_KEY).as_deref() == Some(today.as_str()) {
            self.tasks = stored;
            return Ok(&self.tasks);
        }

        let before = stored.len();
        let carried: Vec<Task> = stored.into_iter().filter(|task| !task.done).collect();
        info!(
            "rolled over to {today}: carried {} tasks, dropped {}",
            carried.len(),
            before - carried.len()
        );

        self.save_tasks(carried).await?;
        self.storage.set(LAST_OPENED_KEY, today).await?;
        Ok(&self.tasks)
    }

    /// Appends a new task. Blank text is ignored rather than rejected.
    pub async fn add_task(&mut self, text: &str) -> Result<&[Task], StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(&self.tasks);
        }

        let mut tasks = self.tasks.clone();
        tasks.push(Task::new(text));
        self.save_tasks(tasks).await?;
        Ok(&self.tasks)
    }

    pub async fn toggle_task(&mut self, index: usize) -> Result<&[Task], StoreError> {
        let mut tasks = self.tasks.clone();
        let len = tasks.len();
        let task = tasks
            .get_mut(index)
            .ok_or(StoreError::InvalidIndex { index, len })?;
        task.done = !task.done;

        self.save_tasks(tasks).await?;
        Ok(&self.tasks)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.tasks)
    }

    pub fn dark_mode(&self) -> bool {
        self.storage.get(DARK_MODE_KEY).as_deref() == Some("true")
    }

    pub async fn toggle_dark_mode(&mut self) -> Result<bool, StoreError> {
        let enabled = !self.dark_mode();
        self.storage.set(DARK_MODE_KEY, enabled.to_string()).await?;
        Ok(enabled)
    }

    /// Returns true only the first time it is called against a given storage.
    pub async fn take_first_visit(&mut self) -> Result<bool, StoreError> {
        if self.storage.get(HAS_VISITED_KEY).is_some() {
            return Ok(false);
        }
        self.storage.set(HAS_VISITED_KEY, "true".to_string()).await?;
        Ok(true)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn load_tasks(&self) -> Vec<Task> {
        let Some(raw) = self.storage.get(TASKS_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!("ignoring malformed stored tasks: {err}");
                Vec::new()
            }
        }
    }

    /// Writes `tasks` and adopts it as the current list once the write lands.
    async fn save_tasks(&mut self, tasks: Vec<Task>) -> Result<(), StoreError> {
        let payload = serde_json::to_string(&tasks)?;
        self.storage.set(TASKS_KEY, payload).await?;
        self.tasks = tasks;
        Ok(())
    }
}
