#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use fitme_domain as domain;

pub mod local_storage;
pub mod memory;
pub mod record;
mod repository;
mod user_data;

pub use repository::Repository;
pub use user_data::UserData;

/// Place where the data of each user is kept as a whole.
pub trait Backend {
    /// Return `None` if nothing was stored for the user yet.
    fn load(&self, user_id: domain::UserID) -> Result<Option<UserData>, domain::StorageError>;
    fn save(&self, data: &UserData) -> Result<(), domain::StorageError>;
}
