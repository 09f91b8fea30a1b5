mod dry_run;
mod macos;
mod r#trait;

pub use self::dry_run::{AppCall, RecordingAppController};
pub use self::r#trait::{create_app_controller, AppController};
