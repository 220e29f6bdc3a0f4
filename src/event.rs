use crate::{Vertex, Weight};
use serde::Serialize;
use std::io::Write;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

/// Progress events emitted by the algorithms
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SolverEvent {
    PhaseStarted {
        name: String,
    },
    PhaseFinished {
        name: String,
        elapsed_ms: u128,
    },
    VertexSettled {
        vertex: Vertex,
        distance: Weight,
    },
    RelaxationRound {
        round: usize,
        updated: usize,
    },
    NegativeCycleDetected,
    SourceFinished {
        source: Vertex,
        reachable: usize,
    },
    AugmentingPath {
        path: Vec<Vertex>,
        bottleneck: u64,
    },
    MatchGrown {
        left: Vertex,
        size: usize,
    },
}

/// Send an event if anyone is listening; a closed channel is ignored
pub fn emit(tx: Option<&Sender<SolverEvent>>, event: SolverEvent) {
    if let Some(sender) = tx {
        sender.send(event).ok();
    }
}

/// Write one event as a single JSON line
pub fn write_ndjson<W: Write>(writer: &mut W, event: &SolverEvent) -> std::io::Result<()> {
    let line = serde_json::to_string(event).map_err(std::io::Error::other)?;
    writeln!(writer, "{}", line)
}

/// Drain events on a background thread, printing NDJSON to stderr.
/// The thread exits once every sender has been dropped.
pub fn spawn_ndjson_printer(rx: Receiver<SolverEvent>) -> JoinHandle<()> {
    thread::spawn(move || {
        let stderr = std::io::stderr();
        let mut out = stderr.lock();
        for event in rx {
            if write_ndjson(&mut out, &event).is_err() {
                break;
            }
        }
    })
}
