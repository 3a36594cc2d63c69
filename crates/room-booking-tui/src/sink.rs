// hand-off of confirmed bookings
use crate::form::Booking;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Receives each confirmed booking exactly once. Submission cannot fail from
/// the form's point of view; implementations log their own trouble.
pub trait BookingSink {
    fn submit(&mut self, booking: Booking);
}

/// Writes the booking as a structured log event and nothing else.
#[derive(Debug, Default)]
pub struct LogSink;

impl BookingSink for LogSink {
    fn submit(&mut self, booking: Booking) {
        match serde_json::to_string(&booking) {
            Ok(json) => info!(booking = %json, "booking submitted"),
            Err(e) => warn!(error = %e, room = booking.room.name, "booking not serializable"),
        }
    }
}

impl BookingSink for Vec<Booking> {
    fn submit(&mut self, booking: Booking) {
        self.push(booking);
    }
}

/// Forwards bookings to a background task, see [`spawn_receiver`].
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Booking>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<Booking>) -> Self {
        Self { tx }
    }
}

impl BookingSink for ChannelSink {
    fn submit(&mut self, booking: Booking) {
        if let Err(e) = self.tx.send(booking) {
            warn!(room = e.0.room.name, "booking receiver gone, dropping booking");
        }
    }
}

/// Drain the channel, logging every booking through `inner`. Resolves to the
/// number of bookings seen once every sender is dropped.
pub fn spawn_receiver<S>(mut rx: mpsc::UnboundedReceiver<Booking>, mut inner: S) -> JoinHandle<u64>
where
    S: BookingSink + Send + 'static,
{
    tokio::spawn(async move {
        let mut committed = 0u64;
        while let Some(booking) = rx.recv().await {
            committed += 1;
            info!(committed, room = booking.room.name, "booking committed");
            inner.submit(booking);
        }
        committed
    })
}
