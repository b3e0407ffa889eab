//! Notification sinks.
//!
//! Long-running operations (a pipeline run, a transcript analysis) finish by
//! surfacing a short notification to whatever front-end is attached.

mod sink;

pub use sink::{
    CollectingNotificationSink, LoggingNotificationSink, Notification, NotificationSink,
    NotificationVariant, NoOpNotificationSink,
};
