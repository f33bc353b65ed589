use anyhow::Context;
use labcheckout::{
    checkout::CheckoutService,
    cli::config_path_from_args,
    config::Config,
    driver::{submit, summarize},
    logging::RunLog,
};

fn main() -> anyhow::Result<()> {
    let config_path = config_path_from_args()?;
    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;
    let run_log = RunLog::start(&config.logging).context("failed to initialize logging")?;

    let mut service = CheckoutService::new(
        config.requester_directory(),
        config.asset_directory(),
        config.policy.clone(),
        config.audit_sink(),
    );

    let mut outcomes = Vec::with_capacity(config.requests.len());
    for raw in &config.requests {
        let outcome = submit(&mut service, raw);
        match &outcome.result {
            Ok(receipt) => {
                for notice in &receipt.notices {
                    println!("NOTE: {}", notice.describe());
                }
                println!(
                    "SUCCESS: {} ({} h)",
                    receipt.token, receipt.effective_hours
                );
            }
            Err(err) => println!("FAILED [{}]: {}", err.kind.as_str(), err),
        }
        println!("--------------------------------");
        outcomes.push(outcome);
    }

    let summary = summarize(&outcomes);
    run_log.finish(&summary);
    println!(
        "{} succeeded, {} failed",
        summary.succeeded,
        summary.failed_total()
    );

    Ok(())
}
