pub mod controller;
pub mod response_store;
pub mod timer;

pub use controller::{Navigation, SessionController, SessionEffect};
pub use response_store::ResponseStore;
pub use timer::SessionTimer;
