use crate::checks;
use crate::errors::WautoResult;
use console::style;

pub fn handle(verbose: bool) -> WautoResult<()> {
    println!("{}", style("Available checks").blue().bold().underlined());

    for check in checks::all() {
        println!(
            "  {:18} [{}]  {}",
            style(check.id).white().bold(),
            check.severity,
            check.description
        );

        if verbose {
            println!("    {:8} {}", style("query").dim(), check.query);
            if !check.extra_args.is_empty() {
                println!("    {:8} {}", style("args").dim(), check.extra_args.join(" "));
            }
            if check.needs_function() {
                println!("    {:8} requires --function <NAME>", style("note").dim());
            }
        }
    }

    Ok(())
}
