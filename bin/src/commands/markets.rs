//! Markets command implementation.

use anyhow::Result;
use labelbar_lib::prelude::*;

/// List the markets the fetch command knows about.
pub(crate) fn list_markets() -> Result<()> {
    println!("{:<6} {:<22} {:<12} {:<40}", "ID", "EPIC", "FILE", "DESCRIPTION");
    println!("{}", "-".repeat(82));

    for market in Market::all() {
        println!(
            "{:<6} {:<22} {:<12} {:<40}",
            market.as_str(),
            market.epic(),
            market.table(),
            market.description()
        );
    }

    println!("\nTotal: {} markets", Market::all().len());
    Ok(())
}
