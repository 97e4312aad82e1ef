pub mod chunking;
pub mod text;

mod role;

pub use role::Role;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{message}")]
	InvalidChunking { message: String },
	#[error("Unknown message role {role:?}.")]
	UnknownRole { role: String },
}
