pub mod cli;
pub mod confidence;
pub mod server;
pub mod session;
pub mod state;

pub use cli::*;
pub use confidence::*;
pub use server::*;
pub use session::*;
pub use state::*;
