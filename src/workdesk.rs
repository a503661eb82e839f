use crate::{
    config::WorkdeskConfig,
    domain::{
        board::{Board, BoardCatalog, BoardType},
        card::{Card, CardId},
        filter::{FilterContext, FilterSelection},
        lanes::Lanes,
        task::Task,
        transition::{MoveEvent, MoveOutcome},
    },
    error::{Result, WorkdeskError},
    session::{Role, Session, UserProfile},
    storage::ProfileStore,
    telemetry,
};
use chrono::{DateTime, Utc};
use std::io;
use tracing::{info, warn};

/// One user's workdesk: the board catalog, the session and the in-memory
/// boards it works on.
///
/// Created by [`Workdesk::start`] and closed by [`Workdesk::shutdown`]; cards
/// edited in between live only in memory.
pub struct Workdesk<S: ProfileStore> {
    catalog: BoardCatalog,
    store: S,
    session: Option<Session>,
    active: BoardType,
    /// One board per pipeline type, in `BoardType::all()` order
    pipelines: Vec<Board<Card>>,
    tasks: Board<Task>,
}

impl<S: ProfileStore> Workdesk<S> {
    /// Installs logging, loads the catalog and any stored session, and seeds
    /// every board
    pub async fn start(config: &WorkdeskConfig, store: S) -> Result<Self> {
        telemetry::init(&config.log_filter);

        let catalog = match &config.catalog_path {
            Some(path) => match BoardCatalog::load(path).await {
                Err(WorkdeskError::IoError(e)) if e.kind() == io::ErrorKind::NotFound => {
                    warn!(path = %path.display(), "catalog file not found, using built-in boards");
                    BoardCatalog::builtin()
                }
                loaded => loaded?,
            },
            None => BoardCatalog::builtin(),
        };

        store.initialize().await?;
        let session = store.load_session().await?;

        let pipelines = BoardType::all()
            .iter()
            .map(|board_type| {
                catalog
                    .pipeline(*board_type)
                    .ok_or_else(|| WorkdeskError::UnknownBoardType(board_type.to_string()))
                    .and_then(Board::from_config)
            })
            .collect::<Result<Vec<_>>>()?;
        let tasks = Board::from_config(catalog.task_board())?;

        let active = session
            .as_ref()
            .map(|s| s.role.default_board())
            .unwrap_or(BoardType::Lo);

        info!(
            user = session.as_ref().map(|s| s.user_name()),
            board = %active,
            "workdesk started"
        );

        Ok(Self {
            catalog,
            store,
            session,
            active,
            pipelines,
            tasks,
        })
    }

    /// Persists the session and closes the workdesk
    pub async fn shutdown(self) -> Result<()> {
        if let Some(session) = &self.session {
            self.store.save_session(session).await?;
        }
        info!("workdesk closed");
        Ok(())
    }

    pub fn catalog(&self) -> &BoardCatalog {
        &self.catalog
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn require_session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(WorkdeskError::SessionNotStarted)
    }

    fn filter_context(&self) -> FilterContext<'_> {
        self.session
            .as_ref()
            .map(Session::filter_context)
            .unwrap_or_default()
    }

    /// Stores the profile and role, and opens the role's default pipeline
    pub async fn login(&mut self, profile: UserProfile, role: Role) -> Result<()> {
        let session = Session::new(profile, role);
        self.store.save_session(&session).await?;

        info!(user = session.user_name(), role = %role, "logged in");
        self.active = role.default_board();
        self.session = Some(session);
        Ok(())
    }

    /// Forgets the stored profile and role
    pub async fn logout(&mut self) -> Result<()> {
        self.store.clear().await?;
        if let Some(session) = self.session.take() {
            info!(user = session.user_name(), "logged out");
        }
        Ok(())
    }

    /// Changes the active role of the current session
    pub async fn switch_role(&mut self, role: Role) -> Result<()> {
        self.require_session()?;
        self.store.save_role(role).await?;

        if let Some(session) = self.session.as_mut() {
            session.role = role;
        }
        self.active = role.default_board();
        Ok(())
    }

    pub fn active_board_type(&self) -> BoardType {
        self.active
    }

    /// Shows another pipeline; edits to the previous one are kept
    pub fn switch_board(&mut self, board_type: BoardType) -> &Board<Card> {
        self.active = board_type;
        self.pipeline(board_type)
    }

    pub fn pipeline(&self, board_type: BoardType) -> &Board<Card> {
        &self.pipelines[board_type.index()]
    }

    pub fn pipeline_mut(&mut self, board_type: BoardType) -> &mut Board<Card> {
        &mut self.pipelines[board_type.index()]
    }

    pub fn active_pipeline(&self) -> &Board<Card> {
        self.pipeline(self.active)
    }

    /// Active pipeline lanes after applying `filter`
    pub fn pipeline_lanes(&self, filter: &FilterSelection) -> Lanes<'_, Card> {
        self.active_pipeline().filtered_lanes(filter, &self.filter_context())
    }

    /// Drag-release on the active pipeline
    pub fn move_card(&mut self, event: &MoveEvent) -> MoveOutcome {
        let board_type = self.active;
        self.pipeline_mut(board_type).apply_move(event)
    }

    pub fn tasks(&self) -> &Board<Task> {
        &self.tasks
    }

    /// Task lanes after applying `filter`, hiding tasks snoozed at `now`
    pub fn task_lanes(&self, filter: &FilterSelection, now: DateTime<Utc>) -> Lanes<'_, Task> {
        let ctx = self.filter_context();
        self.tasks
            .lanes()
            .filter(|task| !task.is_snoozed_at(now) && filter.matches(task, &ctx))
    }

    /// Drag-release on the task board
    pub fn move_task(&mut self, event: &MoveEvent) -> MoveOutcome {
        self.tasks.apply_move(event)
    }

    pub fn add_task(&mut self, task: Task) -> Result<()> {
        self.require_session()?;
        self.tasks.insert(task)
    }

    pub fn complete_task(&mut self, id: &CardId) -> Result<()> {
        self.require_session()?;
        self.tasks.update(id, Task::mark_done)?;
        info!(task_id = %id, "task completed");
        Ok(())
    }

    pub fn reopen_task(&mut self, id: &CardId) -> Result<()> {
        self.require_session()?;
        self.tasks.update(id, Task::reopen)
    }

    pub fn reassign_task(&mut self, id: &CardId, assignee: &str) -> Result<()> {
        self.require_session()?
            .require_task_management("reassign tasks")?;
        self.tasks.update(id, |task| task.reassign(assignee))?;
        info!(task_id = %id, assignee, "task reassigned");
        Ok(())
    }

    pub fn snooze_task(&mut self, id: &CardId, until: DateTime<Utc>) -> Result<()> {
        self.require_session()?
            .require_task_management("snooze tasks")?;
        self.tasks.update(id, |task| task.snooze(until))
    }
}
