use std::time::Duration;

use crate::shell::Shell;

/// How long the hide transition is given to finish before the close
/// callbacks run.
pub const MODAL_SETTLE_DELAY: Duration = Duration::from_millis(500);

pub type ShellCallback = Box<dyn FnOnce(&mut Shell)>;

/// What the single dialog surface is currently showing. Each variant carries
/// the input buffers its confirm action reads back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalContent {
    NewCollection { name: String },
    RenameCollection { old: String, name: String },
    DropCollection { name: String },
    ScrubCollection { name: String },
    DeleteDocument { col: String, id: String },
    NewIndex { col: String, path: String },
    DeleteIndex { col: String, path: String },
    About,
}

impl ModalContent {
    /// The dialog's primary text input, when it has one.
    pub fn input_mut(&mut self) -> Option<&mut String> {
        match self {
            ModalContent::NewCollection { name } => Some(name),
            ModalContent::RenameCollection { name, .. } => Some(name),
            ModalContent::NewIndex { path, .. } => Some(path),
            _ => None,
        }
    }
}

pub struct ModalRequest {
    pub content: ModalContent,
    pub on_show: Option<ShellCallback>,
    pub on_close: Option<ShellCallback>,
}

impl ModalRequest {
    pub fn new(content: ModalContent) -> Self {
        Self { content, on_show: None, on_close: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open,
}

struct PendingSettle {
    cycle: u64,
    on_hidden: Option<ShellCallback>,
    on_close: Option<ShellCallback>,
}

/// Lifecycle of the one shared dialog surface. Opening while already open
/// replaces content and callbacks; closing clears the content immediately and
/// runs the callbacks only once the settle delay for that cycle elapses. The
/// cycle counter makes a settle from a superseded cycle a no-op.
pub struct ModalController {
    state: ModalState,
    content: Option<ModalContent>,
    on_close: Option<ShellCallback>,
    cycle: u64,
    settle_pending: Option<PendingSettle>,
}

impl ModalController {
    pub fn new() -> Self {
        Self {
            state: ModalState::Closed,
            content: None,
            on_close: None,
            cycle: 0,
            settle_pending: None,
        }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ModalState::Open
    }

    pub fn content(&self) -> Option<&ModalContent> {
        self.content.as_ref()
    }

    pub fn content_mut(&mut self) -> Option<&mut ModalContent> {
        self.content.as_mut()
    }

    /// The current open/close cycle; a close hands this to its settle timer.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Transition to `Open`. Returns the show callback for the caller to
    /// invoke once the surface is visible. Passing no close callback clears
    /// any previously stored one.
    pub fn open(&mut self, request: ModalRequest) -> Option<ShellCallback> {
        self.cycle += 1;
        self.state = ModalState::Open;
        self.content = Some(request.content);
        self.on_close = request.on_close;
        request.on_show
    }

    /// Transition to `Closed`. The content is cleared before the hide
    /// completes; callbacks are parked until `settle` is called with the
    /// returned cycle. A close while already closed does nothing.
    pub fn close(&mut self, on_hidden: Option<ShellCallback>) -> Option<u64> {
        if self.state == ModalState::Closed {
            return None;
        }

        self.state = ModalState::Closed;
        self.content = None;
        self.cycle += 1;
        let cycle = self.cycle;
        self.settle_pending =
            Some(PendingSettle { cycle, on_hidden, on_close: self.on_close.take() });
        Some(cycle)
    }

    /// Finish a close cycle: returns the callbacks to run, in order (the
    /// close call's own hidden callback first, then the stored close callback
    /// from the matching open). A stale cycle yields nothing and leaves a
    /// newer pending settle untouched.
    pub fn settle(&mut self, cycle: u64) -> Vec<ShellCallback> {
        match self.settle_pending.take() {
            Some(pending) if pending.cycle == cycle => {
                pending.on_hidden.into_iter().chain(pending.on_close).collect()
            }
            Some(pending) => {
                self.settle_pending = Some(pending);
                Vec::new()
            }
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::{ModalContent, ModalController, ModalRequest, ModalState, ShellCallback};
    use crate::shell::Shell;

    fn counting(counter: &Rc<Cell<u32>>) -> ShellCallback {
        let counter = Rc::clone(counter);
        Box::new(move |_| counter.set(counter.get() + 1))
    }

    fn about() -> ModalRequest {
        ModalRequest::new(ModalContent::About)
    }

    #[test]
    fn open_then_close_runs_callbacks_once_in_order() {
        let mut modal = ModalController::new();
        let mut shell = Shell::new();
        let order = Rc::new(std::cell::RefCell::new(Vec::new()));

        let on_close = {
            let order = Rc::clone(&order);
            Box::new(move |_: &mut Shell| order.borrow_mut().push("close"))
        };
        let request = ModalRequest { content: ModalContent::About, on_show: None, on_close: Some(on_close) };
        modal.open(request);
        assert_eq!(modal.state(), ModalState::Open);

        let on_hidden = {
            let order = Rc::clone(&order);
            Box::new(move |_: &mut Shell| order.borrow_mut().push("hidden"))
        };
        let cycle = modal.close(Some(on_hidden)).expect("close should start a settle cycle");
        assert_eq!(modal.state(), ModalState::Closed);
        assert!(modal.content().is_none());

        for callback in modal.settle(cycle) {
            callback(&mut shell);
        }
        assert_eq!(*order.borrow(), vec!["hidden", "close"]);

        // A repeated settle for the same cycle must not fire anything again.
        assert!(modal.settle(cycle).is_empty());
    }

    #[test]
    fn reopen_replaces_content_and_clears_stored_callback() {
        let mut modal = ModalController::new();
        let mut shell = Shell::new();
        let fired = Rc::new(Cell::new(0));

        let request = ModalRequest {
            content: ModalContent::DropCollection { name: "a".to_owned() },
            on_show: None,
            on_close: Some(counting(&fired)),
        };
        modal.open(request);

        // Re-entrant open without a close callback clears the stored one.
        modal.open(ModalRequest::new(ModalContent::DropCollection { name: "b".to_owned() }));
        assert!(matches!(
            modal.content(),
            Some(ModalContent::DropCollection { name }) if name == "b"
        ));

        let cycle = modal.close(None).expect("close should settle");
        for callback in modal.settle(cycle) {
            callback(&mut shell);
        }
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn stale_settle_is_ignored() {
        let mut modal = ModalController::new();
        let mut shell = Shell::new();
        let fired = Rc::new(Cell::new(0));

        modal.open(about());
        let first = modal.close(Some(counting(&fired))).expect("first close");

        // The surface is reopened and closed again before the first settle
        // delay elapses; only the latest cycle may fire.
        modal.open(about());
        let second = modal.close(Some(counting(&fired))).expect("second close");
        assert_ne!(first, second);

        assert!(modal.settle(first).is_empty());
        for callback in modal.settle(second) {
            callback(&mut shell);
        }
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn show_callback_returned_exactly_once() {
        let mut modal = ModalController::new();
        let mut shell = Shell::new();
        let shown = Rc::new(Cell::new(0));

        let request = ModalRequest {
            content: ModalContent::About,
            on_show: Some(counting(&shown)),
            on_close: None,
        };
        if let Some(callback) = modal.open(request) {
            callback(&mut shell);
        }
        assert_eq!(shown.get(), 1);
        assert!(modal.open(about()).is_none());
    }

    #[test]
    fn close_while_closed_is_a_no_op() {
        let mut modal = ModalController::new();
        assert!(modal.close(None).is_none());
    }
}
