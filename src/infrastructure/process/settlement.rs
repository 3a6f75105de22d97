use std::sync::Mutex;
use tokio::sync::oneshot;

/// Single-assignment outcome slot. Several producers may race to settle it;
/// only the first call to [`SettleOnce::settle`] is delivered to the receiver.
pub struct SettleOnce<T> {
    sender: Mutex<Option<oneshot::Sender<T>>>,
}

impl<T> SettleOnce<T> {
    /// Creates the slot and the receiver that resolves with the settled value.
    pub fn new() -> (Self, oneshot::Receiver<T>) {
        let (sender, receiver) = oneshot::channel();
        (
            Self {
                sender: Mutex::new(Some(sender)),
            },
            receiver,
        )
    }

    /// Settles with `value`. Returns `false`, dropping `value`, if the slot
    /// was already settled.
    pub fn settle(&self, value: T) -> bool {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();

        match sender {
            Some(sender) => {
                // A dropped receiver still counts as settled.
                let _ = sender.send(value);
                true
            }
            None => false,
        }
    }
}
