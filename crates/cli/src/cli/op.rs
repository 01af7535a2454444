use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use url::Url;

use common::format::{FormatKind, FormatRegistry};
use common::prefs::PreferenceProvider;
use common::session::{SessionController, UserInteraction};
use common::store::ZNodeStore;

use zoonav_cli::api::client::{ApiClient, ApiError};
use zoonav_cli::prefs::FilePreferenceProvider;
use zoonav_cli::state::{AppState, StateError};
use zoonav_cli::store::HttpZNodeStore;
use zoonav_cli::ui::TerminalInteraction;

/// Resolve the remote URL for the API client.
///
/// Priority: explicit `--remote` flag > config file `remote` > hardcoded 9000.
pub fn resolve_remote(explicit: Option<Url>, config_path: Option<PathBuf>) -> Url {
    if let Some(url) = explicit {
        return url;
    }
    if let Ok(state) = AppState::load(config_path) {
        return state.config.remote;
    }
    Url::parse("http://localhost:9000").expect("hardcoded URL must parse")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_remote_explicit_wins() {
        let explicit = Url::parse("http://example.com:9999").unwrap();
        let result = resolve_remote(Some(explicit.clone()), None);
        assert_eq!(result, explicit);
    }

    #[test]
    fn test_resolve_remote_falls_back_to_default() {
        // No explicit URL, no valid config path → hardcoded 9000
        let result = resolve_remote(None, Some(PathBuf::from("/nonexistent")));
        assert_eq!(result.as_str(), "http://localhost:9000/");
    }

    #[test]
    fn test_resolve_remote_reads_config() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join("state");
        let config = zoonav_cli::state::AppConfig {
            remote: Url::parse("http://gateway.internal:8181").unwrap(),
            ..Default::default()
        };
        AppState::init(Some(dir.clone()), Some(config)).unwrap();

        let result = resolve_remote(None, Some(dir));
        assert_eq!(result.as_str(), "http://gateway.internal:8181/");
    }
}

#[derive(Clone)]
pub struct OpContext {
    /// Tree store reached over the gateway's HTTP API
    pub store: Arc<dyn ZNodeStore>,
    /// Per-path format memory, persisted under the config directory
    pub prefs: Arc<dyn PreferenceProvider>,
    /// Formatters for the supported format kinds
    pub registry: Arc<FormatRegistry>,
    /// Format selected when nothing is remembered for a path
    pub default_format: FormatKind,
    /// Prompts and confirmations
    pub ui: Arc<dyn UserInteraction>,
}

impl OpContext {
    /// Create context with custom remote URL and optional config path.
    /// Initializes the config directory on first run.
    pub fn new(remote: Url, config_path: Option<PathBuf>) -> Result<Self, OpContextError> {
        let state = AppState::load_or_init(config_path)?;
        let client = ApiClient::new(&remote)?;

        Ok(Self {
            store: Arc::new(HttpZNodeStore::new(client)),
            prefs: Arc::new(FilePreferenceProvider::new(state.prefs_path.clone())),
            registry: Arc::new(FormatRegistry::standard()),
            default_format: state.config.default_format,
            ui: Arc::new(TerminalInteraction::new()),
        })
    }

    /// A fresh editing session wired to this context's store, format
    /// memory, and registry.
    pub fn controller(&self) -> SessionController {
        SessionController::new(
            Arc::clone(&self.store),
            Arc::clone(&self.prefs),
            Arc::clone(&self.registry),
        )
        .with_default_format(self.default_format)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OpContextError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    State(#[from] StateError),
}

#[async_trait::async_trait]
pub trait Op: Send + Sync {
    type Error: Error + Send + Sync + 'static;
    type Output;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}

#[macro_export]
macro_rules! command_enum {
    ($(($variant:ident, $type:ty)),* $(,)?) => {
        #[derive(Subcommand, Debug, Clone)]
        pub enum Command {
            $($variant($type),)*
        }

        #[derive(Debug)]
        pub enum OpOutput {
            $($variant(<$type as $crate::cli::op::Op>::Output),)*
        }

        #[derive(Debug, thiserror::Error)]
        pub enum OpError {
            $(
                #[error(transparent)]
                $variant(<$type as $crate::cli::op::Op>::Error),
            )*
        }

        #[async_trait::async_trait]
        impl $crate::cli::op::Op for Command {
            type Output = OpOutput;
            type Error = OpError;

            async fn execute(&self, ctx: &$crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
                match self {
                    $(
                        Command::$variant(op) => {
                            op.execute(ctx).await
                                .map(OpOutput::$variant)
                                .map_err(OpError::$variant)
                        },
                    )*
                }
            }
        }

        impl std::fmt::Display for OpOutput {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        OpOutput::$variant(output) => write!(f, "{}", output),
                    )*
                }
            }
        }
    };
}
