use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = replmv::cli::parse();
    app::run(args)
}
