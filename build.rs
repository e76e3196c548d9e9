use anyhow::Result;
use vergen::EmitBuilder;

// Exposes VERGEN_GIT_SHA / VERGEN_GIT_DIRTY to the CLI version string.
fn main() -> Result<()> {
    EmitBuilder::builder()
        .git_sha(true)
        .git_dirty(false)
        .emit()?;
    Ok(())
}
