use anyhow::Result;
use tmplgate::cli::App;

#[tokio::main]
async fn main() -> Result<()> {
    let args = tmplgate::cli::Args::parse_args();
    let mut app = App::from_args(&args)?;

    app.run(args).await?;

    Ok(())
}
