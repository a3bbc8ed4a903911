use crate::modal::ModalController;
use crate::notify::NotificationCenter;

/// Follow-up work recorded by bus handlers and modal callbacks. Handlers run
/// synchronously and cannot start tasks themselves; the update loop drains
/// this queue after every publish.
pub enum ShellCommand {
    ModalSettle { cycle: u64 },
    Refetch,
}

#[derive(Debug, Clone, Default)]
pub struct QueryPanelState {
    pub visible: bool,
    pub col: Option<String>,
    pub query: String,
}

/// The shared UI surface every bus handler sees: the one dialog, the banner
/// stack, the query panel, and the pending-command queue.
pub struct Shell {
    pub modal: ModalController,
    pub notifications: NotificationCenter,
    pub query_panel: QueryPanelState,
    pub pending: Vec<ShellCommand>,
}

impl Shell {
    pub fn new() -> Self {
        Self {
            modal: ModalController::new(),
            notifications: NotificationCenter::new(),
            query_panel: QueryPanelState::default(),
            pending: Vec::new(),
        }
    }
}
