//! # Example: pipe
//!
//! Forwards everything emitted on two service emitters into one audit emitter
//! under per-service namespaces.
//!
//! ## Flow
//! ```text
//! users.emit("signup")  ──pipe "users"──►  audit  "users:signup"
//! orders.emit("paid")   ──pipe "orders"─►  audit  "orders:paid"
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example pipe
//! ```

use relay_emitter::{AnyListener, Emitter, Listener};

#[derive(Debug)]
struct Record {
    id: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let users: Emitter<Record> = Emitter::builder().name("users").build();
    let orders: Emitter<Record> = Emitter::builder().name("orders").build();
    let audit: Emitter<Record> = Emitter::builder().name("audit").build();

    audit.on_any(AnyListener::new(|event: &str, rec: &Record| {
        println!("[audit] {event} id={}", rec.id);
    }));
    audit.on(
        "orders:paid",
        Listener::new(|rec: &Record| println!("[billing] invoice for order {}", rec.id)),
    );

    users.pipe(&audit, "users")?;
    orders.pipe(&audit, "orders")?;

    users.emit("signup", &Record { id: 1 })?;
    orders.emit("paid", &Record { id: 42 })?;

    // A second pipe to the same target is refused.
    if let Err(err) = users.pipe(&audit, "again") {
        println!("[pipe] refused: {err} ({})", err.as_label());
    }

    users.unpipe(&audit)?;
    users.emit("signup", &Record { id: 2 })?; // not forwarded any more
    Ok(())
}
