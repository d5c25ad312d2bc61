use std::{
    sync::mpsc,
    thread::{self, JoinHandle},
    time::{Duration, SystemTime},
};

use crate::{LifeGrid, Pos};

/// a complete, read-only copy of the simulation state, published to the
/// view once per frame.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub cells: Vec<Pos>,
    pub generation: u64,
    pub population: usize,
}

pub enum SimCmd {
    Snapshot(mpsc::Sender<Snapshot>),
    Seed(Vec<Pos>),
    SetPaused(bool),
    Exit,
}

pub struct SimHandle {
    sender: mpsc::Sender<SimCmd>,
}

impl SimHandle {
    pub fn new(sender: mpsc::Sender<SimCmd>) -> Self {
        Self { sender }
    }

    pub fn snapshot(&self) -> Snapshot {
        let (sender, receiver) = mpsc::channel();
        self.sender.send(SimCmd::Snapshot(sender)).unwrap();
        receiver.recv().unwrap()
    }

    /// replaces the whole world with the passed cells.
    pub fn seed(&self, cells: Vec<Pos>) {
        self.sender.send(SimCmd::Seed(cells)).unwrap();
    }

    /// pauses or resumes ticking; snapshots keep being served either way.
    pub fn set_paused(&self, paused: bool) {
        self.sender.send(SimCmd::SetPaused(paused)).unwrap();
    }

    /// asks the simulation loop to terminate; the loop may already be
    /// gone when the view shuts down, so a closed channel is fine here.
    pub fn exit(&self) {
        let _ = self.sender.send(SimCmd::Exit);
    }
}

pub struct Sim {
    thread: JoinHandle<()>,
    sender: mpsc::Sender<SimCmd>,
}

impl Sim {
    pub fn spawn(seed: impl IntoIterator<Item = Pos>) -> Self {
        let grid = LifeGrid::from_seed(seed);
        let (sender, receiver) = mpsc::channel();
        let thread = thread::spawn(move || sim_loop(receiver, grid));

        Self { thread, sender }
    }

    pub fn handle(&self) -> SimHandle {
        SimHandle::new(self.sender.clone())
    }

    pub fn join(self) {
        self.thread.join().unwrap();
    }
}

const EVT_CHECK_TIMEOUT: Duration = Duration::from_millis(10);
pub const SIM_TICK_INTERVAL: Duration = Duration::from_millis(200);

fn sim_loop(receiver: mpsc::Receiver<SimCmd>, mut grid: LifeGrid) {
    let mut paused = false;
    let mut last_update = SystemTime::now();

    loop {
        while let Ok(cmd) = receiver.try_recv() {
            match cmd {
                SimCmd::Snapshot(sender) => {
                    let snapshot = Snapshot {
                        cells: grid.live_cells().collect(),
                        generation: grid.generation(),
                        population: grid.population(),
                    };
                    sender.send(snapshot).unwrap();
                }
                SimCmd::Seed(cells) => grid.seed(cells),
                SimCmd::SetPaused(value) => paused = value,
                SimCmd::Exit => return,
            }
        }

        let elapsed = SystemTime::now().duration_since(last_update).unwrap();
        if !paused && elapsed > SIM_TICK_INTERVAL {
            grid.advance();
            log::debug!(
                "generation {} has {} live cells",
                grid.generation(),
                grid.population()
            );
            last_update = SystemTime::now();
        }

        thread::sleep(EVT_CHECK_TIMEOUT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pos;

    #[test]
    fn snapshots_observe_a_ticking_still_life() {
        let block = vec![pos!(0, 0), pos!(1, 0), pos!(0, 1), pos!(1, 1)];
        let sim = Sim::spawn(block.clone());
        let handle = sim.handle();

        thread::sleep(SIM_TICK_INTERVAL * 3);
        let snapshot = handle.snapshot();
        assert_eq!(snapshot.population, 4);
        let mut cells = snapshot.cells;
        cells.sort_by_key(|p| (p.x, p.y));
        assert_eq!(cells, block);

        handle.exit();
        sim.join();
    }

    #[test]
    fn pausing_freezes_the_generation_counter() {
        let sim = Sim::spawn([pos!(0, 0), pos!(1, 0), pos!(2, 0)]);
        let handle = sim.handle();

        handle.set_paused(true);
        let before = handle.snapshot().generation;
        thread::sleep(SIM_TICK_INTERVAL * 3);
        assert_eq!(handle.snapshot().generation, before);

        handle.exit();
        sim.join();
    }

    #[test]
    fn reseeding_replaces_the_world() {
        let sim = Sim::spawn([pos!(40, 40)]);
        let handle = sim.handle();

        handle.set_paused(true);
        handle.seed(vec![pos!(0, 0), pos!(1, 1)]);
        let snapshot = handle.snapshot();
        assert_eq!(snapshot.population, 2);
        assert_eq!(snapshot.generation, 0);

        handle.exit();
        sim.join();
    }
}
