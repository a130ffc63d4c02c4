use parser::runtime::{boot, run};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    boot::init_logging();
    let (dispatcher, config) = boot::boot()?;
    run::run(&dispatcher, &config)?;
    Ok(())
}
