use convoy::error::Result;
use convoy::orchestrator::Orchestrator;
use convoy::output::UserOutput;

/// Tear the topology down, or print the plan with `--dry-run`.
pub async fn run_down(
    orchestrator: &Orchestrator,
    dry_run: bool,
    out: &dyn UserOutput,
) -> Result<()> {
    if dry_run {
        out.status("Planned operations (dry run):");
        for op in orchestrator.destroy_plan()? {
            out.status(&format!("  {}", op));
        }
        return Ok(());
    }

    orchestrator.apply_destroy().await?;
    out.success(&format!("Stack '{}' is down", orchestrator.stack().name));
    Ok(())
}
