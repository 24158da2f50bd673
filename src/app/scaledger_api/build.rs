use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Preparing the build information. Sources without git metadata are built
    // as well, so the git instructions are not requested.
    vergen::EmitBuilder::builder()
        .all_build()
        .all_rustc()
        .all_cargo()
        .emit()?;

    Ok(())
}
