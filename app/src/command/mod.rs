//! One strategy type per CLI subcommand, dispatched statically from `main`.

mod init;
mod run;
mod version;

pub use init::InitStrategy;
pub use run::{RunInput, RunStrategy};
pub use version::VersionStrategy;

/// Contract shared by all command strategies.
///
/// Each strategy names its own input type, so arguments are passed without
/// boxing or runtime casting.
pub trait CommandStrategy: Send + Sync + 'static {
    type Input;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}
