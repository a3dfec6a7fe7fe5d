//! # Example: async_modes
//!
//! Shows the two `emit_async` modes with listeners of different latency.
//!
//! ## Flow
//! ```text
//! Parallel:  slow ──────────┐
//!            fast ───┐      │
//!                    done   done ─► resolved (fast finishes first)
//!
//! Series:    slow ──────────► fast ───► resolved (strict order)
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example async_modes
//! ```

use std::time::{Duration, Instant};

use relay_emitter::{EmitMode, Emitter, Listener, ListenerError, Outcome};

fn sleeper(tag: &'static str, ms: u64) -> Listener<Instant> {
    Listener::new(move |started: &Instant| {
        let started = *started;
        Outcome::pending(async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            println!("  {tag:<5} done after {:?}", started.elapsed());
            Ok(())
        })
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let emitter: Emitter<Instant> = Emitter::new();
    emitter.on("job", sleeper("slow", 60));
    emitter.on("job", sleeper("fast", 10));

    println!("parallel:");
    emitter
        .emit_async("job", Instant::now(), EmitMode::Parallel)
        .await?;

    println!("series:");
    emitter.emit_async("job", Instant::now(), EmitMode::Series).await?;

    // A rejecting listener fails the whole emission.
    emitter.on(
        "job",
        Listener::new(|_: &Instant| Outcome::err(ListenerError::fail("quota exceeded"))),
    );
    match emitter.emit_parallel("job", Instant::now()).await {
        Ok(()) => println!("unexpected success"),
        Err(err) => println!("parallel rejected: {}", err.as_message()),
    }
    Ok(())
}
