use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use symposium::{
    Config, Cook, CookState, Dinner, Event, EventKind, Philosopher, PhilosopherState, Spaghetti,
    StateSink, Subscribe, Table, TableError, WaitMode,
};

/// Sink that checks the table invariants on every report.
struct Watch {
    table: Arc<Table>,
    states: Mutex<Vec<Option<PhilosopherState>>>,
    portions: Mutex<Vec<u64>>,
    violations: Mutex<Vec<String>>,
    timeouts: AtomicUsize,
}

impl Watch {
    fn new(table: Arc<Table>) -> Self {
        let n = table.places();
        Self {
            table,
            states: Mutex::new(vec![None; n]),
            portions: Mutex::new(vec![0; n]),
            violations: Mutex::new(Vec::new()),
            timeouts: AtomicUsize::new(0),
        }
    }

    fn check(&self) {
        let states = self.states.lock().unwrap();
        let mut bad = Vec::new();

        let seated = states.iter().flatten().filter(|s| s.is_seated()).count();
        if seated > self.table.seats().capacity() {
            bad.push(format!("{seated} philosophers past the gate"));
        }
        if self.table.seats().in_use() > self.table.seats().capacity() {
            bad.push("seat permit above capacity".to_string());
        }

        let n = self.table.places();
        for (fork, owner) in self.table.fork_owners().into_iter().enumerate() {
            let Some(p) = owner else { continue };
            if fork != p && fork != (p + 1) % n {
                bad.push(format!("fork {fork} held by non-neighbour {p}"));
            }
            let holding = matches!(
                states[p],
                Some(
                    PhilosopherState::WaitLeftFork
                        | PhilosopherState::WaitRightFork
                        | PhilosopherState::WaitSpaghetti
                        | PhilosopherState::Eating(_)
                )
            );
            if !holding {
                bad.push(format!("fork {fork} held by philosopher {p} in {:?}", states[p]));
            }
        }

        let spaghetti = self.table.spaghetti();
        if spaghetti.occupancy() > spaghetti.capacity() {
            bad.push("queue above capacity".to_string());
        }

        if !bad.is_empty() {
            self.violations.lock().unwrap().extend(bad);
        }
    }

    fn last_states(&self) -> Vec<Option<PhilosopherState>> {
        self.states.lock().unwrap().clone()
    }

    fn portions(&self) -> Vec<u64> {
        self.portions.lock().unwrap().clone()
    }

    fn violations(&self) -> Vec<String> {
        self.violations.lock().unwrap().clone()
    }
}

impl StateSink for Watch {
    fn philosopher_state(&self, id: usize, state: PhilosopherState) {
        self.states.lock().unwrap()[id] = Some(state);
        self.check();
    }

    fn portions(&self, id: usize, count: u64) {
        let mut portions = self.portions.lock().unwrap();
        if count != portions[id] + 1 {
            self.violations
                .lock()
                .unwrap()
                .push(format!("philosopher {id} jumped from {} to {count}", portions[id]));
        }
        portions[id] = count;
    }

    fn cook_state(&self, _state: CookState, _spaghetti: Spaghetti) {
        self.check();
    }

    fn queue_occupancy(&self, count: usize) {
        if count > self.table.spaghetti().capacity() {
            self.violations
                .lock()
                .unwrap()
                .push(format!("occupancy {count} reported"));
        }
    }

    fn wait_timed_out(&self, _actor: &str, _err: &TableError) {
        self.timeouts.fetch_add(1, Ordering::Relaxed);
    }
}

/// Philosophers and cook running against one [`Watch`].
struct Harness {
    table: Arc<Table>,
    watch: Arc<Watch>,
    token: CancellationToken,
    actors: JoinSet<u64>,
}

impl Harness {
    fn start(cfg: &Config) -> Self {
        let table = Arc::new(Table::new(cfg));
        let watch = Arc::new(Watch::new(Arc::clone(&table)));
        let token = CancellationToken::new();
        let mut actors = JoinSet::new();

        for id in 0..cfg.philosophers {
            let p = Philosopher::new(id, Arc::clone(&table), watch.clone(), cfg);
            actors.spawn(p.run(token.child_token()));
        }
        let cook = Cook::new(Arc::clone(&table), watch.clone(), cfg);
        actors.spawn(cook.run(token.child_token()));

        Self {
            table,
            watch,
            token,
            actors,
        }
    }

    async fn stop(mut self) -> Arc<Watch> {
        self.token.cancel();
        while let Some(res) = self.actors.join_next().await {
            res.unwrap();
        }
        assert_eq!(self.table.fork_owners(), vec![None; self.table.places()]);
        assert_eq!(self.table.seats().in_use(), 0);
        self.watch
    }
}

fn quick() -> Config {
    Config {
        think_base: Duration::from_millis(100),
        think_stagger: Duration::from_millis(10),
        eat: Duration::from_millis(100),
        cook_time: Duration::from_millis(20),
        nap_time: Duration::from_millis(20),
        holiday_time: Duration::from_millis(300),
        ..Config::default()
    }
}

/// All philosophers start together, hold the left fork for a while, and
/// reach for the right one at the same moment.
fn deadlock_prone(limit_table_access: bool) -> Config {
    Config {
        limit_table_access,
        deadlock_delay: Duration::from_millis(50),
        start_stagger: Duration::ZERO,
        think_stagger: Duration::ZERO,
        think_base: Duration::from_millis(10),
        ..quick()
    }
}

#[tokio::test(start_paused = true)]
async fn every_philosopher_eats_with_default_timing() {
    let h = Harness::start(&Config::default());
    tokio::time::sleep(Duration::from_secs(600)).await;
    let watch = h.stop().await;

    assert_eq!(watch.violations(), Vec::<String>::new());
    let portions = watch.portions();
    assert!(portions.iter().all(|&p| p >= 1), "portions: {portions:?}");
}

#[tokio::test(start_paused = true)]
async fn invariants_hold_under_load() {
    let cfg = Config {
        philosophers: 7,
        queue_capacity: 3,
        ..quick()
    };
    let h = Harness::start(&cfg);
    tokio::time::sleep(Duration::from_secs(120)).await;
    let watch = h.stop().await;

    assert_eq!(watch.violations(), Vec::<String>::new());
    assert!(watch.portions().iter().all(|&p| p >= 1));
}

#[tokio::test(start_paused = true)]
async fn without_the_seat_gate_the_table_deadlocks() {
    let h = Harness::start(&deadlock_prone(false));
    tokio::time::sleep(Duration::from_secs(5)).await;

    assert_eq!(
        h.watch.last_states(),
        vec![Some(PhilosopherState::WaitRightFork); 5]
    );
    assert_eq!(
        h.table.fork_owners(),
        vec![Some(0), Some(1), Some(2), Some(3), Some(4)]
    );
    assert_eq!(h.table.seats().in_use(), 5);
    assert_eq!(h.watch.portions(), vec![0; 5]);

    // still stuck much later
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(h.watch.portions(), vec![0; 5]);

    // cancellation still frees everything
    h.stop().await;
}

#[tokio::test(start_paused = true)]
async fn the_seat_gate_prevents_the_deadlock() {
    let h = Harness::start(&deadlock_prone(true));
    tokio::time::sleep(Duration::from_secs(60)).await;
    let watch = h.stop().await;

    assert_eq!(watch.violations(), Vec::<String>::new());
    let portions = watch.portions();
    assert!(portions.iter().all(|&p| p >= 1), "portions: {portions:?}");
}

#[tokio::test(start_paused = true)]
async fn bounded_waits_break_the_deadlock() {
    let cfg = Config {
        think_stagger: Duration::from_millis(30),
        wait: WaitMode::Bounded(Duration::from_millis(200)),
        ..deadlock_prone(false)
    };
    let h = Harness::start(&cfg);
    tokio::time::sleep(Duration::from_secs(30)).await;
    let watch = h.stop().await;

    assert!(watch.timeouts.load(Ordering::Relaxed) > 0);
    assert!(watch.portions().iter().sum::<u64>() > 0);
    assert_eq!(watch.violations(), Vec::<String>::new());
}

#[derive(Default)]
struct Tally {
    portions: AtomicU64,
    starts: AtomicU64,
}

#[async_trait]
impl Subscribe for Tally {
    async fn on_event(&self, ev: &Event) {
        match ev.kind {
            EventKind::Portions => {
                self.portions.fetch_add(1, Ordering::Relaxed);
            }
            EventKind::ActorStarting => {
                self.starts.fetch_add(1, Ordering::Relaxed);
            }
            _ => {}
        }
    }

    fn name(&self) -> &'static str {
        "tally"
    }

    fn queue_capacity(&self) -> usize {
        1 << 16
    }
}

#[tokio::test(start_paused = true)]
async fn dinner_runs_and_shuts_down_cleanly() {
    let tally = Arc::new(Tally::default());
    let mut subs: Vec<Arc<dyn Subscribe>> = vec![tally.clone()];
    #[cfg(feature = "logging")]
    subs.push(Arc::new(symposium::LogWriter::new()));

    let cfg = Config {
        bus_capacity: 1 << 16,
        ..quick()
    };
    let running = Dinner::builder(cfg)
        .with_subscribers(subs)
        .build()
        .unwrap()
        .start();

    tokio::time::sleep(Duration::from_secs(30)).await;
    let snap = running.snapshot().await;
    assert!(snap.philosophers.iter().all(|r| r.state.is_some()));
    assert!(snap.philosophers.iter().all(|r| r.portions >= 1));
    assert!(snap.seated() <= 3);
    assert!(snap.cook.is_some());

    let view = Arc::clone(running.view());
    running.shutdown().await.unwrap();

    // let the listener and the subscriber workers drain
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(view.alive_actors().await.is_empty());
    assert_eq!(tally.starts.load(Ordering::Relaxed), 6);
    assert_eq!(
        tally.portions.load(Ordering::Relaxed),
        view.snapshot().await.total_portions()
    );
}

#[tokio::test]
async fn too_small_a_table_is_rejected() {
    let cfg = Config {
        philosophers: 2,
        ..Config::default()
    };
    assert!(Dinner::builder(cfg).build().is_err());
}
