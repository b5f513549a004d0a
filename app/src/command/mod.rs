//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy type with its own input, dispatched
//! statically from `main`.

mod execute;
mod info;
mod init;
mod search;
mod serve;
mod version;

pub use execute::ExecuteStrategy;
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use search::{SearchInput, SearchStrategy};
pub use serve::{ServeInput, ServeStrategy};
pub use version::VersionStrategy;

/// Contract shared by all command strategies.
///
/// Each strategy defines its own input type, so parameters are passed
/// without boxing or runtime casting.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}
