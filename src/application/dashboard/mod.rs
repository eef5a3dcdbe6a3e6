//! The signed-in user's dashboard and what it shows.

mod session;
mod view;

pub use session::DashboardSession;
pub use view::{DashboardView, SAVE_SUCCESS_MESSAGE, STORAGE_DISABLED_NOTICE};
