//! Operations command - list the cleaning catalog.

use colored::Colorize;
use sieve::transform::{CleaningOperation, OperationId};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "Cleaning operations:".yellow().bold());
    for id in OperationId::ALL {
        let status = match CleaningOperation::from(id) {
            CleaningOperation::Structural(_) => "".normal(),
            CleaningOperation::Unimplemented(_) => "(not implemented)".dimmed(),
        };
        println!(
            "  {:20} {:18} {} {}",
            id.as_str().cyan(),
            format!("{:?}", id.category()),
            id.description(),
            status
        );
    }
    Ok(())
}
