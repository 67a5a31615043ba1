use std::time::Duration;

use clap::Parser;
use nlc_website::observability::logging::{self, LogFormat};
use nlc_website::registry::{RegistryChecker, DEFAULT_PACKAGE, DEFAULT_REGISTRY, REMEDIATION_STEPS};

#[derive(Parser)]
#[command(name = "check-registry")]
#[command(about = "Diagnose package registry connectivity", long_about = None)]
struct Cli {
    /// Registry base URL
    #[arg(long, env = "NPM_CONFIG_REGISTRY", default_value = DEFAULT_REGISTRY)]
    registry: String,

    /// Package whose metadata is fetched
    #[arg(long, default_value = DEFAULT_PACKAGE)]
    package: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(LogFormat::Pretty, "nlc_website=warn");

    println!("Checking npm registry connectivity...");
    let checker = match RegistryChecker::new(&cli.registry, Duration::from_secs(cli.timeout_secs)) {
        Ok(checker) => checker,
        Err(e) => {
            eprintln!("{}", e);
            fail_check(e.likely_cause());
        }
    };
    let report = checker.check(&cli.package).await;

    match &report.ping {
        Ok(()) => println!("ping {}: ok", checker.registry()),
        Err(e) => eprintln!("ping failed: {}", e),
    }
    match &report.latest {
        Ok(version) => println!("{}@{}", report.package, version),
        Err(e) => eprintln!("view {} failed: {}", report.package, e),
    }

    if !report.is_ok() {
        fail_check(report.likely_cause());
    }

    println!("Registry connectivity looks good.");
    Ok(())
}

fn fail_check(cause: &str) -> ! {
    eprintln!("\nRegistry check failed.");
    eprintln!("Likely cause: {}", cause);
    eprintln!("Fix options:");
    for (i, step) in REMEDIATION_STEPS.iter().enumerate() {
        eprintln!("  {}) {}", i + 1, step);
    }
    std::process::exit(1)
}
