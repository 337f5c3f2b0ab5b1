//! Horizon Multiselect People Example
//!
//! Loads five people from TOML with "Zhao Qi" pre-checked, then scripts a
//! few popup toggles and a strip removal, printing the selection after each
//! step.
//!
//! Run with: cargo run -p horizon-multiselect --example people
//! Set `RUST_LOG=horizon_multiselect=trace` to watch every hop.

use std::path::Path;

use horizon_multiselect::prelude::*;
use horizon_multiselect::{DebugFormatOptions, DebugStyle, SelectionDebug};

fn main() -> Result<(), MultiSelectError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("examples/data/people.toml");
    let source = ItemsSource::load(&data)?;

    let config = MultiSelectConfig::new()
        .with_placeholder("Select people...")
        .with_max_strip_items(Some(3));
    let mut combo = MultiSelectComboBox::new()
        .with_config(config)
        .with_items_source(source);

    combo.checked_items_changed.connect(|items| {
        let labels: Vec<&str> = items.iter().map(|item| item.label()).collect();
        tracing::info!(?labels, "checked items changed");
    });

    let debug = SelectionDebug::new();
    let compact = SelectionDebug::with_options(DebugFormatOptions {
        style: DebugStyle::Compact,
        ..Default::default()
    });

    println!("== Startup ==");
    print!("{}", debug.format(&combo));
    println!("Strip text: {}\n", combo.display_text());

    combo.show_popup();
    for id in [2, 0, 3] {
        combo.toggle_item(id);
        println!("toggle {id}: {}", compact.format(&combo));
    }
    combo.hide_popup();
    println!("Strip text: {}\n", combo.display_text());

    println!("== Remove Tom from the strip ==");
    combo.remove_from_strip(0);
    print!("{}", debug.format(&combo));
    println!("Strip text: {}\n", combo.display_text());

    println!("== Bind [1, 4] ==");
    combo.set_checked_items([1, 4]);
    print!("{}", debug.format(&combo));

    if let Some(source) = combo.items_source() {
        println!("\nPersisted flags:\n{}", source.to_toml_string()?);
    }
    Ok(())
}
