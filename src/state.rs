use crate::errors::{AppError, RegistryError};
use crate::ledger::{day_key, Ledger};
use crate::models::{StatsResponse, ToggleResponse};
use crate::registry::TaskRegistry;
use crate::session::{welcome_notice, Identity};
use crate::stats::{build_stats_at, day_percentage};
use crate::storage::{Store, LEDGER_KEY, SESSION_KEY, TASKS_KEY, USER_KEY};
use chrono::NaiveDate;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug)]
pub struct Tracker {
    store: Store,
    tasks: TaskRegistry,
    ledger: Ledger,
    identity: Identity,
    notice: Option<Notice>,
}

impl Tracker {
    pub async fn open(path: PathBuf) -> Self {
        Self::from_store(Store::open(path).await)
    }

    pub fn from_store(store: Store) -> Self {
        Self {
            tasks: store.load(TASKS_KEY),
            ledger: store.load(LEDGER_KEY),
            identity: Identity::from_store(&store),
            notice: None,
            store,
        }
    }

    pub fn tasks(&self) -> &TaskRegistry {
        &self.tasks
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn require_session(&self) -> Result<(), AppError> {
        if self.identity.is_logged_in {
            Ok(())
        } else {
            Err(AppError::unauthorized("Not signed in"))
        }
    }

    pub fn set_notice(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.notice = Some(Notice {
            kind,
            message: message.into(),
        });
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    // Mutations below work on a copy and only swap it in once the store
    // write succeeds.

    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), AppError> {
        let mut identity = self.identity.clone();
        if let Err(err) = identity.login(email, password) {
            warn!("login rejected");
            return Err(err.into());
        }
        self.store.set(SESSION_KEY, "true").await?;
        self.identity = identity;
        info!("signed in as {}", self.identity.display_name());
        Ok(())
    }

    pub async fn signup(&mut self, name: &str) -> Result<(), AppError> {
        let mut identity = self.identity.clone();
        identity.signup(name);
        let stored = identity.name.clone().unwrap_or_default();
        self.store
            .set_many([(USER_KEY, stored), (SESSION_KEY, "true".to_string())])
            .await?;
        self.identity = identity;
        info!("identity established for {}", self.identity.display_name());
        let welcome = welcome_notice(self.identity.display_name());
        self.set_notice(NoticeKind::Info, welcome);
        Ok(())
    }

    pub async fn logout(&mut self) -> Result<(), AppError> {
        self.store.remove(SESSION_KEY).await?;
        let path = self.store.path().to_path_buf();
        *self = Self::open(path).await;
        info!("signed out");
        Ok(())
    }

    pub async fn add_task(&mut self, label: &str) -> Result<(), AppError> {
        let mut tasks = self.tasks.clone();
        if let Err(err) = tasks.add(label) {
            if err != RegistryError::Empty {
                warn!("task not added: {err}");
            }
            return Err(err.into());
        }
        self.store.save(TASKS_KEY, &tasks).await?;
        self.tasks = tasks;
        debug!("task added: {}", label.trim());
        Ok(())
    }

    /// Ledger cells of a removed task are left in place.
    pub async fn remove_task(&mut self, label: &str, confirmed: bool) -> Result<bool, AppError> {
        let mut tasks = self.tasks.clone();
        if !confirmed || !tasks.remove(label) {
            return Ok(false);
        }
        self.store.save(TASKS_KEY, &tasks).await?;
        self.tasks = tasks;
        debug!("task removed: {label}");
        Ok(true)
    }

    pub async fn toggle(&mut self, day: NaiveDate, task: &str) -> Result<ToggleResponse, AppError> {
        if !self.tasks.contains(task) {
            return Err(AppError::bad_request(format!("Unknown task \"{task}\"")));
        }
        let mut ledger = self.ledger.clone();
        let checked = ledger.toggle(day, task);
        self.store.save(LEDGER_KEY, &ledger).await?;
        self.ledger = ledger;
        debug!("toggled {task} on {day} -> {checked}");
        Ok(ToggleResponse {
            day: day_key(day),
            task: task.to_string(),
            checked,
            percentage: day_percentage(&self.ledger, &self.tasks, day),
        })
    }

    pub fn stats_at(&self, today: NaiveDate) -> StatsResponse {
        build_stats_at(today, &self.tasks, &self.ledger)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<Mutex<Tracker>>,
}

impl AppState {
    pub fn new(tracker: Tracker) -> Self {
        Self {
            tracker: Arc::new(Mutex::new(tracker)),
        }
    }
}
