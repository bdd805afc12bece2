#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Validating the stored token at startup.
    SessionRestore,
    /// Login or registration.
    Auth,
    SavedLoad,
    Bookmark,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Task lifecycle state (stored in AppState, mutated only by reducer).
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn begin(&mut self, id: TaskId) {
        self.active = Some(id);
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
        }
        ok
    }

    /// Forgets the active task so its result is dropped on arrival.
    pub fn abandon(&mut self) {
        self.active = None;
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub session_restore: TaskState,
    pub auth: TaskState,
    pub saved_load: TaskState,
    pub bookmark: TaskState,
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::SessionRestore => &self.session_restore,
            TaskKind::Auth => &self.auth,
            TaskKind::SavedLoad => &self.saved_load,
            TaskKind::Bookmark => &self.bookmark,
        }
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::SessionRestore => &mut self.session_restore,
            TaskKind::Auth => &mut self.auth,
            TaskKind::SavedLoad => &mut self.saved_load,
            TaskKind::Bookmark => &mut self.bookmark,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.session_restore.is_running()
            || self.auth.is_running()
            || self.saved_load.is_running()
            || self.bookmark.is_running()
    }
}
