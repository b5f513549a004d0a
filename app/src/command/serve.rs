use querydesk_config::Config;
use querydesk_server::AppState;
use tracing::info;

/// Input parameters for the Serve command strategy.
#[derive(Debug, Clone, Default)]
pub struct ServeInput {
    /// Bind host override
    pub host: Option<String>,
    /// Bind port override
    pub port: Option<u16>,
}

/// Strategy for running the HTTP server.
///
/// Command-line overrides win over environment variables, which win over
/// the config file.
#[derive(Debug, Clone, Copy)]
pub struct ServeStrategy;

impl super::CommandStrategy for ServeStrategy {
    type Input = ServeInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        if let Some(host) = input.host {
            config.server.host = host;
        }
        if let Some(port) = input.port {
            config.server.port = port;
        }

        let state = AppState::from_config(&config)?;
        let addr = config.server.bind_addr();
        info!("Starting server on {addr}");

        querydesk_server::serve(state, &addr).await?;
        Ok(())
    }
}
