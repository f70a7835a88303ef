use convoy::error::Result;
use convoy::orchestrator::Orchestrator;
use convoy::output::UserOutput;

/// Bring the declared topology up, or print the plan with `--dry-run`.
pub async fn run_up(orchestrator: &Orchestrator, dry_run: bool, out: &dyn UserOutput) -> Result<()> {
    if dry_run {
        out.status("Planned operations (dry run):");
        for op in orchestrator.create_plan()? {
            out.status(&format!("  {}", op));
        }
        return Ok(());
    }

    orchestrator.apply_create().await?;
    out.success(&format!("Stack '{}' is up", orchestrator.stack().name));
    Ok(())
}
