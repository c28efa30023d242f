use super::open_app;

pub fn run_theme_show(data_dir: &str) -> anyhow::Result<()> {
    let app = open_app(data_dir)?;
    let theme = app.theme();

    println!("Theme: {}", theme.mode());
    for (name, hex) in theme.colors().entries() {
        println!("  {name:<16} {hex}");
    }
    Ok(())
}

pub fn run_theme_toggle(data_dir: &str) -> anyhow::Result<()> {
    let app = open_app(data_dir)?;
    let mode = app.theme().toggle_theme();
    println!("Theme set to {mode}");
    Ok(())
}
