use convoy::config::Stack;
use convoy::dependency::Graph;
use convoy::error::Result;
use convoy::output::UserOutput;

/// Validate the finalized model: structural checks plus a full graph build,
/// which rejects unknown dependencies and cycles. No remote calls.
pub fn run_validate(stack: &Stack, out: &dyn UserOutput) -> Result<()> {
    stack.validate()?;
    let graph = Graph::build(&stack.services)?;

    out.success(&format!(
        "Manifest is valid: {} service(s), {} network(s), target remote '{}'",
        graph.nodes().count(),
        stack.networks.len(),
        stack.remote
    ));
    Ok(())
}
