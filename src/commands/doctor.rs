use crate::errors::WautoResult;
use crate::runner;
use crate::utils::Config;
use console::style;

pub fn handle(config: &Config) -> WautoResult<()> {
    match runner::locate_tool(config) {
        Some(bin) => {
            println!(
                "[{}] weggli found at {}",
                style("\u{2713}").green().bold(),
                style(bin.display()).underlined()
            );

            match runner::probe_version(&bin) {
                Ok(version) if !version.is_empty() => println!("    {version}"),
                Ok(_) => {}
                Err(e) => println!(
                    "[{}] `weggli --version` failed: {}",
                    style("\u{2717}").red().bold(),
                    e
                ),
            }
            Ok(())
        }
        None => {
            println!("[{}] weggli not found", style("\u{2717}").red().bold());
            println!(
                "    install it with: {}",
                style("cargo install weggli").bold()
            );
            std::process::exit(1);
        }
    }
}
