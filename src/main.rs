mod export;
mod filter;
mod import;
mod models;
mod report;
mod run;
mod ui;

use anyhow::Result;

use run::Invocation;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let invocation = Invocation::parse(&args)?;

    let Some(options) = invocation.options() else {
        if invocation == Invocation::Version {
            run::print_version();
        } else {
            run::print_usage();
        }
        return Ok(());
    };

    let (ledger, source) = run::open_ledger(options.workbook.as_deref())?;
    if ledger.is_empty() {
        log::warn!("{source} has no usable rows");
    }

    match &invocation {
        Invocation::Tui(options) => {
            let filter = options.filter(&ledger)?;
            run::as_tui(&ledger, source, filter)
        }
        _ => run::as_cli(&invocation, &ledger, &source),
    }
}
