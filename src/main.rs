//! Symposium CLI.
//!
//! Seats the philosophers, starts the cook and prints the status screen
//! until Ctrl-C or SIGTERM (or `--run-for`). Every report is also logged through
//! `tracing`; `-v` adds queue and actor lifecycle details.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use symposium::{Config, Dinner, LogWriter, Subscribe, WaitMode, wait_for_shutdown_signal};

#[derive(Parser)]
#[command(name = "symposium")]
#[command(version)]
#[command(about = "Dining philosophers with a spaghetti cook")]
struct Cli {
    /// Number of philosophers (and forks)
    #[arg(long, default_value_t = 5)]
    philosophers: usize,

    /// Let every philosopher sit down at once (seat gate of N instead of N-2).
    /// Together with --deadlock-delay-ms this deadlocks the table.
    #[arg(long)]
    unlimited_table: bool,

    /// Pause while holding the left fork (0 = off)
    #[arg(long, default_value_t = 0)]
    deadlock_delay_ms: u64,

    /// Capacity of the spaghetti queue
    #[arg(long, default_value_t = 10)]
    queue_capacity: usize,

    /// Base thinking time
    #[arg(long, default_value_t = 5000)]
    think_ms: u64,

    /// Extra thinking time per philosopher id
    #[arg(long, default_value_t = 100)]
    think_stagger_ms: u64,

    /// Start-up delay per philosopher id
    #[arg(long, default_value_t = 10)]
    start_stagger_ms: u64,

    /// Eating time
    #[arg(long, default_value_t = 5000)]
    eat_ms: u64,

    /// Time to cook one portion
    #[arg(long, default_value_t = 1000)]
    cook_ms: u64,

    /// Cook's nap while the queue is short
    #[arg(long, default_value_t = 1000)]
    nap_ms: u64,

    /// Cook's holiday once the queue is long
    #[arg(long, default_value_t = 15000)]
    holiday_ms: u64,

    /// Queue length up to which the cook only naps
    #[arg(long, default_value_t = 4)]
    nap_threshold: usize,

    /// Give up any wait after this long and start over (default: wait forever)
    #[arg(long)]
    wait_limit_ms: Option<u64>,

    /// Grace period for actors to stop on shutdown
    #[arg(long, default_value_t = 5000)]
    grace_ms: u64,

    /// Print the status screen this often (0 = never)
    #[arg(long, default_value_t = 1000)]
    screen_ms: u64,

    /// Stop after this many seconds instead of waiting for a signal
    #[arg(long)]
    run_for: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            philosophers: self.philosophers,
            limit_table_access: !self.unlimited_table,
            queue_capacity: self.queue_capacity,
            think_base: Duration::from_millis(self.think_ms),
            think_stagger: Duration::from_millis(self.think_stagger_ms),
            start_stagger: Duration::from_millis(self.start_stagger_ms),
            eat: Duration::from_millis(self.eat_ms),
            deadlock_delay: Duration::from_millis(self.deadlock_delay_ms),
            cook_time: Duration::from_millis(self.cook_ms),
            nap_time: Duration::from_millis(self.nap_ms),
            holiday_time: Duration::from_millis(self.holiday_ms),
            nap_threshold: self.nap_threshold,
            wait: match self.wait_limit_ms {
                Some(ms) => WaitMode::Bounded(Duration::from_millis(ms)),
                None => WaitMode::Forever,
            },
            grace: Duration::from_millis(self.grace_ms),
            ..Config::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let dinner = Dinner::builder(cli.config())
        .with_subscribers(subs)
        .build()?;
    info!(
        philosophers = dinner.config().philosophers,
        seats = dinner.table().seats().capacity(),
        "dinner is served"
    );

    if cli.screen_ms == 0 && cli.run_for.is_none() {
        dinner.run().await?;
        return Ok(());
    }

    let running = dinner.start();
    let stop = async {
        match cli.run_for {
            Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
            None => {
                if let Err(err) = wait_for_shutdown_signal().await {
                    tracing::warn!(error = %err, "cannot listen for signals; stopping");
                }
            }
        }
    };
    tokio::pin!(stop);

    let show_screen = cli.screen_ms > 0;
    let mut ticker = tokio::time::interval(Duration::from_millis(cli.screen_ms.max(1)));
    loop {
        tokio::select! {
            _ = &mut stop => break,
            _ = ticker.tick(), if show_screen => {
                println!("{}\n", running.snapshot().await);
            }
        }
    }

    let view = Arc::clone(running.view());
    running.shutdown().await?;
    println!("{}", view.snapshot().await);
    Ok(())
}
