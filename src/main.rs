use anyhow::Result;
use php2ts::cli;

fn main() -> Result<()> {
    cli::run()
}
