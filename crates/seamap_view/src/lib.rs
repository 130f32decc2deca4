mod event;
mod fetchers;
mod poller;
mod view;

pub use event::{Command, ViewEvent};
pub use poller::ShipPoller;
pub use view::{MapView, ViewError};
