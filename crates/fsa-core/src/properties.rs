// Structural predicates over FSAs.
//
// All checks take any `FsaView` and run in time linear in the number of arcs
// (plus hashing for `is_deterministic`). None of them allocate per arc except
// the reachability and cycle checks, which keep one flag per state.

use hashbrown::HashSet;

use crate::arc::{EPSILON, FINAL_SYMBOL};
use crate::FsaView;

/// Whether the FSA has no states.
pub fn is_empty<F: FsaView + ?Sized>(fsa: &F) -> bool {
    fsa.num_states() == 0
}

/// Whether the FSA is structurally well formed.
///
/// An FSA is valid if it is empty, or if all of the following hold:
/// - every arc is listed under its own source state;
/// - every destination state exists;
/// - the final state has no leaving arcs;
/// - an arc carries [`FINAL_SYMBOL`] exactly when it enters the final state.
pub fn is_valid<F: FsaView + ?Sized>(fsa: &F) -> bool {
    let num_states = fsa.num_states();
    if num_states == 0 {
        return fsa.num_arcs() == 0;
    }
    let final_state = fsa.final_state();
    if !fsa.arc_range(final_state).is_empty() {
        return false;
    }

    let mut listed = 0;
    for state in 0..num_states {
        let range = fsa.arc_range(state);
        listed += range.len();
        for arc_index in range {
            if fsa.src_state(arc_index) != state {
                return false;
            }
            let dest = fsa.dest_state(arc_index);
            if dest >= num_states {
                return false;
            }
            let enters_final = dest == final_state;
            let has_final_label = fsa.label(arc_index) == FINAL_SYMBOL;
            if enters_final != has_final_label {
                return false;
            }
        }
    }
    listed == fsa.num_arcs()
}

/// Whether no arc points to a lower-numbered state than its source.
///
/// Self-loops are allowed here; the weight passes reject them separately.
pub fn is_top_sorted<F: FsaView + ?Sized>(fsa: &F) -> bool {
    (0..fsa.num_states()).all(|state| {
        fsa.arc_range(state).all(|arc_index| fsa.dest_state(arc_index) >= state)
    })
}

/// Whether the arcs leaving each state are sorted by `(label, dest_state)`.
pub fn is_arc_sorted<F: FsaView + ?Sized>(fsa: &F) -> bool {
    (0..fsa.num_states()).all(|state| {
        let range = fsa.arc_range(state);
        range.clone().zip(range.skip(1)).all(|(prev, next)| {
            (fsa.label(prev), fsa.dest_state(prev)) <= (fsa.label(next), fsa.dest_state(next))
        })
    })
}

/// Whether any arc leads back to its own source state.
pub fn has_self_loops<F: FsaView + ?Sized>(fsa: &F) -> bool {
    (0..fsa.num_states()).any(|state| {
        fsa.arc_range(state).any(|arc_index| fsa.dest_state(arc_index) == state)
    })
}

/// Whether no state has two leaving arcs with the same label.
pub fn is_deterministic<F: FsaView + ?Sized>(fsa: &F) -> bool {
    let mut labels = HashSet::new();
    for state in 0..fsa.num_states() {
        labels.clear();
        for arc_index in fsa.arc_range(state) {
            if !labels.insert(fsa.label(arc_index)) {
                return false;
            }
        }
    }
    true
}

/// Whether no arc carries the epsilon label.
pub fn is_epsilon_free<F: FsaView + ?Sized>(fsa: &F) -> bool {
    (0..fsa.num_arcs()).all(|arc_index| fsa.label(arc_index) != EPSILON)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    OnStack,
    Done,
}

/// Whether the FSA contains no cycle (self-loops included).
///
/// Uses an explicit DFS stack of `(state, next_arc_index)` frames, so deep
/// lattices do not exhaust the call stack.
pub fn is_acyclic<F: FsaView + ?Sized>(fsa: &F) -> bool {
    let num_states = fsa.num_states();
    let mut visit = vec![Visit::New; num_states];
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..num_states {
        if visit[root] != Visit::New {
            continue;
        }
        visit[root] = Visit::OnStack;
        stack.push((root, fsa.arc_range(root).start));

        while let Some(frame) = stack.last_mut() {
            let (state, next_arc) = *frame;
            if next_arc == fsa.arc_range(state).end {
                visit[state] = Visit::Done;
                stack.pop();
                continue;
            }
            frame.1 += 1;

            let dest = fsa.dest_state(next_arc);
            match visit[dest] {
                Visit::OnStack => return false,
                Visit::Done => {}
                Visit::New => {
                    visit[dest] = Visit::OnStack;
                    stack.push((dest, fsa.arc_range(dest).start));
                }
            }
        }
    }
    true
}

/// Whether every state is reachable from the start state and can reach the
/// final state. The empty FSA is connected.
pub fn is_connected<F: FsaView + ?Sized>(fsa: &F) -> bool {
    let num_states = fsa.num_states();
    if num_states == 0 {
        return true;
    }

    // Forward reachability from the start state.
    let mut accessible = vec![false; num_states];
    let mut worklist = vec![fsa.start_state()];
    accessible[fsa.start_state()] = true;
    while let Some(state) = worklist.pop() {
        for arc_index in fsa.arc_range(state) {
            let dest = fsa.dest_state(arc_index);
            if !accessible[dest] {
                accessible[dest] = true;
                worklist.push(dest);
            }
        }
    }
    if accessible.iter().any(|&a| !a) {
        return false;
    }

    // Backward reachability from the final state over reversed arcs.
    let mut entering: Vec<Vec<usize>> = vec![Vec::new(); num_states];
    for state in 0..num_states {
        for arc_index in fsa.arc_range(state) {
            entering[fsa.dest_state(arc_index)].push(state);
        }
    }
    let mut coaccessible = vec![false; num_states];
    worklist.push(fsa.final_state());
    coaccessible[fsa.final_state()] = true;
    while let Some(state) = worklist.pop() {
        for &src in &entering[state] {
            if !coaccessible[src] {
                coaccessible[src] = true;
                worklist.push(src);
            }
        }
    }
    coaccessible.iter().all(|&c| c)
}
