//! recache demo and stress driver

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use recache::LruCache;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of entries)
    #[arg(short, long, default_value_t = 1024)]
    capacity: usize,

    /// Worker threads for the stress run
    #[arg(short, long, default_value_t = 4)]
    threads: u64,

    /// Operations per worker thread
    #[arg(short, long, default_value_t = 100_000)]
    ops: u64,

    /// Distinct keys touched by the stress run
    #[arg(short, long, default_value_t = 4096)]
    keyspace: u64,

    /// Walk through eviction behavior on a tiny cache instead of
    /// running the stress workload
    #[arg(long)]
    demo: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("recache v{}", env!("CARGO_PKG_VERSION"));

    if args.demo {
        run_demo();
        return Ok(());
    }

    run_stress(&args)
}

/// Scripted walkthrough of LRU eviction on a capacity-5 cache.
fn run_demo() {
    let cache = LruCache::new(5);

    for (key, value) in [("a", 1), ("b", 2), ("c", 3), ("d", 4), ("e", 5)] {
        cache.put(key, value);
    }
    println!("filled to capacity: {:?}", ordered_keys(&cache));
    println!("eviction candidate: {:?}", cache.eviction_candidate());

    cache.put("f", 6);
    println!(
        "put f -> a evicted: contains(a) = {}, {:?}",
        cache.contains_key(&"a"),
        ordered_keys(&cache)
    );

    // get refreshes recency; contains_key must not
    cache.get(&"b");
    for _ in 0..3 {
        cache.contains_key(&"c");
    }
    cache.put("g", 7);
    println!(
        "get b, put g -> c evicted: contains(b) = {}, contains(c) = {}, {:?}",
        cache.contains_key(&"b"),
        cache.contains_key(&"c"),
        ordered_keys(&cache)
    );

    let snap = cache.stats().snapshot();
    println!(
        "stats: {} insertions, {} evictions, {} hits, {} misses",
        snap.insertions, snap.evictions, snap.hits, snap.misses
    );
}

/// Hammer one shared cache from several threads and report throughput.
fn run_stress(args: &Args) -> Result<()> {
    info!(
        "stress: capacity={} threads={} ops/thread={} keyspace={}",
        args.capacity, args.threads, args.ops, args.keyspace
    );

    let cache = Arc::new(LruCache::new(args.capacity));
    let started = Instant::now();

    let handles: Vec<_> = (0..args.threads)
        .map(|t| {
            let cache = Arc::clone(&cache);
            let (ops, keyspace) = (args.ops, args.keyspace);
            thread::spawn(move || {
                let mut state = t.wrapping_mul(0x9e37_79b9_7f4a_7c15) | 1;
                for _ in 0..ops {
                    state ^= state << 13;
                    state ^= state >> 7;
                    state ^= state << 17;
                    let key = state % keyspace;

                    // Read-mostly mix: three gets per put
                    if state % 4 == 0 {
                        cache.put(key, state);
                    } else {
                        let _ = cache.get(&key);
                    }
                }
                debug!("worker {t} done");
            })
        })
        .collect();

    for handle in handles {
        handle
            .join()
            .map_err(|_| anyhow::anyhow!("worker thread panicked"))?;
    }

    let elapsed = started.elapsed();
    let total_ops = args.threads * args.ops;
    let snap = cache.stats().snapshot();

    info!(
        "done: {} ops in {:.2?} ({:.0} ops/sec)",
        total_ops,
        elapsed,
        total_ops as f64 / elapsed.as_secs_f64()
    );

    println!("entries:    {} / {}", cache.len(), cache.capacity());
    println!("hits:       {}", snap.hits);
    println!("misses:     {}", snap.misses);
    println!("hit ratio:  {:.1}%", cache.stats().hit_ratio() * 100.0);
    println!("insertions: {}", snap.insertions);
    println!("updates:    {}", snap.updates);
    println!("evictions:  {}", snap.evictions);

    Ok(())
}

/// Keys in recency order, most recently used first.
fn ordered_keys(cache: &LruCache<&'static str, i32>) -> Vec<&'static str> {
    cache.snapshot().into_iter().map(|(k, _)| k).collect()
}
