//! Announcement delivery.
//!
//! An [`Announcement`] is published through every enabled
//! [`NotificationChannel`]. Delivery is single-shot: a failed channel is
//! reported in the [`PublishReport`] and never retried for the same event.

pub mod channels;
pub mod events;
pub mod service;

pub use channels::{
    ConsoleChannel, NotificationChannel, TwitterChannel, TwitterConfig, WebhookChannel,
    WebhookConfig,
};
pub use events::Announcement;
pub use service::{NotificationService, PublishReport};
