pub mod doctor;
pub mod list;
pub mod run;

use crate::checks::Severity;
use crate::cli::Commands;
use crate::errors::WautoResult;
use crate::utils::Config;

pub fn handle_command(command: Commands, config: &mut Config) -> WautoResult<()> {
    match command {
        Commands::Run {
            check,
            path,
            function,
            high_only,
        } => {
            if high_only {
                config.scanner.min_severity = Severity::High
            };

            run::handle(check, &path, function.as_deref(), config)
        }
        Commands::List { verbose } => list::handle(verbose),
        Commands::Doctor => doctor::handle(config),
    }
}
