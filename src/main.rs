use anyhow::Result;

fn main() -> Result<()> {
    run_dashboard()
}

#[cfg(feature = "tui")]
fn run_dashboard() -> Result<()> {
    use budget_dashboard::ui;
    use budget_dashboard::BudgetStore;

    println!("💰 Monthly Budget Calculator\n");
    println!("Starting dashboard... (Press 'q' to quit)\n");

    // One store per session; everything lives in memory until quit
    let store = BudgetStore::new();
    let mut app = ui::App::new(store);
    ui::run_ui(&mut app)?;

    println!("\n✅ Dashboard closed");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_dashboard() -> Result<()> {
    eprintln!("❌ Dashboard mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    std::process::exit(1);
}
