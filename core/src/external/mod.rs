//! External collaborators: the upstream weather API and the seams to the
//! host application (storage, connectivity, notifications, alert history)

pub mod bmkg;
pub mod connectivity;
pub mod notify;
pub mod storage;

pub use bmkg::{BmkgClient, WeatherApi};
pub use connectivity::{AlwaysOnline, Connectivity};
pub use notify::{
    AlertStore, LogDispatcher, MemoryAlertStore, NotificationDispatcher, NotificationMessage,
    NotificationPriority,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
