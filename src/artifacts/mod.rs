pub mod codec;
pub mod remote;
pub mod source;
pub mod store;

mod macros;

pub use remote::RemoteSource;
pub use source::{ArtifactSource, LocalFileSource};
pub use store::{ArtifactStore, Artifacts};
