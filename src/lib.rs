pub mod config;
pub mod error;
pub mod gate;
pub mod models;
pub mod remote;
pub mod services;
pub mod session;
pub mod state;

pub use config::AppConfig;
pub use error::AppError;
pub use gate::AccessGate;
pub use remote::{DataGateway, HttpGateway, MutationOutcome, NoopGateway};
pub use state::{AppState, Snapshot};
