use convoy::error::Result;
use convoy::orchestrator::Orchestrator;
use convoy::output::UserOutput;

/// Print the create and destroy plans without touching the remote.
pub fn run_plan(orchestrator: &Orchestrator, out: &dyn UserOutput) -> Result<()> {
    out.status("Create plan:");
    for op in orchestrator.create_plan()? {
        out.status(&format!("  {}", op));
    }

    out.blank();
    out.status("Destroy plan:");
    for op in orchestrator.destroy_plan()? {
        out.status(&format!("  {}", op));
    }

    Ok(())
}
