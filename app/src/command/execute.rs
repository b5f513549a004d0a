use querydesk_router::PatternRouter;

/// Strategy for routing a single query from the command line.
///
/// Prints the same JSON body `/execute` would return.
#[derive(Debug, Clone, Copy)]
pub struct ExecuteStrategy;

impl super::CommandStrategy for ExecuteStrategy {
    type Input = String;

    async fn execute(&self, query: Self::Input) -> anyhow::Result<()> {
        let router = PatternRouter::with_defaults()?;
        let call = router.parse_query(&query)?;
        println!("{}", serde_json::to_string_pretty(&call)?);
        Ok(())
    }
}
