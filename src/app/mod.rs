mod init;
mod state;
mod step;

pub use state::{App, RunStats};
