use std::cell::RefCell;

use crate::modal::{ModalRequest, ShellCallback};
use crate::shell::Shell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    ModalOpen,
    ModalClose,
    QueryBoxOpen,
    QueryBoxClose,
    DataInvalidate,
}

/// Who registered a subscription. View subscriptions are tagged with the
/// router generation they were mounted under and dropped wholesale when the
/// router moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    App,
    View(u64),
}

pub struct CloseRequest {
    pub on_hidden: Option<ShellCallback>,
}

/// Event argument passed to every handler of a publish. Callback-carrying
/// payloads hand their contents to exactly one subscriber via interior
/// mutability; later subscribers of the same publish see an emptied payload.
pub enum Payload {
    ModalOpen(RefCell<Option<ModalRequest>>),
    ModalClose(RefCell<Option<CloseRequest>>),
    Empty,
}

impl Payload {
    pub fn modal_open(request: ModalRequest) -> Self {
        Payload::ModalOpen(RefCell::new(Some(request)))
    }

    pub fn modal_close(on_hidden: Option<ShellCallback>) -> Self {
        Payload::ModalClose(RefCell::new(Some(CloseRequest { on_hidden })))
    }

    pub fn take_modal_open(&self) -> Option<ModalRequest> {
        match self {
            Payload::ModalOpen(slot) => slot.borrow_mut().take(),
            _ => None,
        }
    }

    pub fn take_modal_close(&self) -> Option<CloseRequest> {
        match self {
            Payload::ModalClose(slot) => slot.borrow_mut().take(),
            _ => None,
        }
    }
}

pub type Handler = Box<dyn FnMut(&mut Shell, &Payload)>;

struct Subscription {
    topic: Topic,
    owner: Owner,
    handler: Handler,
}

/// In-process publish/subscribe channel. Handlers run synchronously, in
/// subscription order; registering the same handler twice means it runs
/// twice. There is no removal API beyond dropping a whole owner.
pub struct EventBus {
    subscriptions: Vec<Subscription>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { subscriptions: Vec::new() }
    }

    pub fn subscribe(&mut self, topic: Topic, owner: Owner, handler: Handler) {
        self.subscriptions.push(Subscription { topic, owner, handler });
    }

    pub fn drop_owner(&mut self, owner: Owner) {
        self.subscriptions.retain(|subscription| subscription.owner != owner);
    }

    pub fn publish(&mut self, shell: &mut Shell, topic: Topic, payload: &Payload) {
        for subscription in self.subscriptions.iter_mut() {
            if subscription.topic == topic {
                (subscription.handler)(shell, payload);
            }
        }
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.subscriptions.iter().filter(|subscription| subscription.topic == topic).count()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{EventBus, Owner, Payload, Topic};
    use crate::shell::Shell;

    fn recording_handler(
        log: &Rc<RefCell<Vec<&'static str>>>,
        tag: &'static str,
    ) -> super::Handler {
        let log = Rc::clone(log);
        Box::new(move |_, _| log.borrow_mut().push(tag))
    }

    #[test]
    fn handlers_run_in_subscription_order() {
        let mut bus = EventBus::new();
        let mut shell = Shell::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        bus.subscribe(Topic::DataInvalidate, Owner::App, recording_handler(&log, "first"));
        bus.subscribe(Topic::DataInvalidate, Owner::App, recording_handler(&log, "second"));
        bus.subscribe(Topic::QueryBoxOpen, Owner::App, recording_handler(&log, "other-topic"));

        bus.publish(&mut shell, Topic::DataInvalidate, &Payload::Empty);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn duplicate_registration_invokes_twice() {
        let mut bus = EventBus::new();
        let mut shell = Shell::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        bus.subscribe(Topic::QueryBoxClose, Owner::App, recording_handler(&log, "dup"));
        bus.subscribe(Topic::QueryBoxClose, Owner::App, recording_handler(&log, "dup"));

        bus.publish(&mut shell, Topic::QueryBoxClose, &Payload::Empty);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn dropped_owner_no_longer_invoked() {
        let mut bus = EventBus::new();
        let mut shell = Shell::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        bus.subscribe(Topic::DataInvalidate, Owner::View(1), recording_handler(&log, "view-1"));
        bus.subscribe(Topic::DataInvalidate, Owner::App, recording_handler(&log, "app"));

        bus.publish(&mut shell, Topic::DataInvalidate, &Payload::Empty);
        bus.drop_owner(Owner::View(1));
        bus.publish(&mut shell, Topic::DataInvalidate, &Payload::Empty);

        assert_eq!(*log.borrow(), vec!["view-1", "app", "app"]);
    }

    #[test]
    fn callback_payload_is_taken_once() {
        let payload = Payload::modal_close(None);
        assert!(payload.take_modal_close().is_some());
        assert!(payload.take_modal_close().is_none());
    }
}
