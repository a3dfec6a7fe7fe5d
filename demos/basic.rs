//! # Example: basic
//!
//! Minimal synchronous usage: typed listeners, a catch-all listener, `once`
//! and removal by handle.
//!
//! ## Flow
//! ```text
//! emit("greet", name)
//!     ├─► any-listener  ("greet", name)
//!     ├─► hello         (name)
//!     └─► first-visit   (name)   removed after the first emission
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example basic
//! ```

use relay_emitter::{AnyListener, Emitter, Listener};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Create an emitter carrying string payloads
    let emitter: Emitter<String> = Emitter::builder().name("greeter").build();

    // 2. Register listeners
    let hello = Listener::new(|name: &String| println!("[hello] hi {name}"));
    emitter.on("greet", hello.clone());
    emitter.once(
        "greet",
        Listener::new(|name: &String| println!("[first-visit] welcome, {name}")),
    );
    emitter.on_any(AnyListener::new(|event: &str, name: &String| {
        println!("[any] {event} -> {name}");
    }));

    // 3. Emit twice; the once-listener only sees the first one
    emitter.emit("greet", &"ada".to_string())?;
    emitter.emit("greet", &"grace".to_string())?;

    // 4. Remove by handle and emit again
    emitter.off("greet", &hello);
    emitter.emit("greet", &"linus".to_string())?;

    println!("registered event types: {:?}", emitter.event_names());
    Ok(())
}
