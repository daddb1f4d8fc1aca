use chrono::Utc;
use nimbus::{write_csv, Credentials, LatLon, Nimbus, NimbusError, VariableSpec};

#[tokio::main]
async fn main() -> Result<(), NimbusError> {
    // Set RUST_LOG=info (or debug) to follow the per-year requests.
    env_logger::init();

    let (Ok(username), Ok(password)) = (
        std::env::var("METEOMATICS_USERNAME"),
        std::env::var("METEOMATICS_PASSWORD"),
    ) else {
        eprintln!("Set METEOMATICS_USERNAME and METEOMATICS_PASSWORD to run this example.");
        return Ok(());
    };

    let client = Nimbus::meteomatics(Credentials::new(username, password))?;
    let variables = [
        VariableSpec::temperature().with_threshold(30.0),
        VariableSpec::precipitation(),
    ];

    println!("Fetching data for each year, this may take a few seconds per year...");
    let analysis = client
        .analyze()
        .location(LatLon(19.076, 72.8777)) // Mumbai
        .date(Utc::now().date_naive())
        .years_back(10)
        .variables(&variables)
        .call()
        .await?;

    for variable in &analysis.variables {
        println!("\n{}", analysis.title_for(&variable.variable));
        println!("  {}", variable.summary());
        for error in &variable.outcome.errors {
            println!("    {error}");
        }
        match variable.report() {
            Some(report) => {
                println!("  {} [{}]", report, report.band);
                println!("  {}", report.band.advice());
            }
            None => println!("  No data to display."),
        }
    }

    if let Some(mut frame) = analysis.to_dataframe()? {
        println!();
        write_csv(&mut frame, std::io::stdout().lock())?;
    }
    Ok(())
}
