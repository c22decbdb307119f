//! Safe Store entry point
//!
//! Native builds walk through the store's behaviour against an in-memory
//! backend. On the web the library's start hook does all initialization.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Safe Store (native) starting...");
    log::info!("Browser storage requires the wasm build - run with `trunk serve` for web version");

    if let Err(e) = demo() {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is the library start hook, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn demo() -> safe_store::error::Result<()> {
    use safe_store::consts::BROWSER_QUOTA_UNITS;
    use safe_store::{MemoryStore, SafeStore};
    use serde_json::{Value, json};

    let store = SafeStore::new(MemoryStore::with_quota(BROWSER_QUOTA_UNITS));

    store.set("theme", "dark")?;
    log::info!("theme = {}", store.get_or("theme", "light"));
    store.remove("theme")?;
    log::info!("theme after remove = {}", store.get_or("theme", "light"));

    store.set_json("prefs", &json!({"volume": 7}))?;
    log::info!("prefs = {}", store.get_json("prefs", json!({})));

    store.set("prefs", "{not-json")?;
    log::info!("corrupt prefs = {}", store.get_json("prefs", json!({})));

    // Fill past the quota to show a medium failure
    let big = "x".repeat(BROWSER_QUOTA_UNITS);
    match store.set("blob", &big) {
        Ok(()) => log::info!("blob stored"),
        Err(e) => log::warn!("blob rejected: {}", e),
    }

    let missing: Value = store.get_json_or_default("never_written");
    log::info!("never_written = {}", missing);
    Ok(())
}
