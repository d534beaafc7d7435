// Print forward/backward weights and arc posteriors for a small hypothesis lattice.
//
// Usage:
//   cargo run -p fsa-weights --example posteriors [max|log-sum]
use fsa_core::{Arc, FINAL_SYMBOL, Fsa, FsaView};
use fsa_weights::{FbWeightType, WfsaWithFbWeights};

fn main() {
    let weight_type: FbWeightType = match std::env::args().nth(1) {
        Some(arg) => arg.parse().unwrap_or_else(|e| {
            eprintln!("error: {e}");
            std::process::exit(1);
        }),
        None => FbWeightType::LogSumWeight,
    };

    // Two competing segmentations of one utterance, sharing a prefix.
    //   0 -the-> 1 -cat-> 3 -sat-> 4 -> 5
    //   0 -the-> 1 -ca-> 2 -tsat-> 4
    //   1 -cats-> 4
    let words = ["", "the", "cat", "ca", "tsat", "sat", "cats"];
    let arcs = vec![
        Arc::new(0, 1, 1),
        Arc::new(1, 3, 2),
        Arc::new(1, 2, 3),
        Arc::new(1, 4, 6),
        Arc::new(2, 4, 4),
        Arc::new(3, 4, 5),
        Arc::new(4, 5, FINAL_SYMBOL),
    ];
    let arc_weights = [-0.1, -0.7, -1.9, -2.3, -0.4, -0.5, 0.0];
    let fsa = Fsa::from_arcs(6, arcs).expect("arcs name existing states");

    let wfsa = WfsaWithFbWeights::try_new(&fsa, &arc_weights, weight_type)
        .unwrap_or_else(|e| {
            eprintln!("error: {e}");
            std::process::exit(1);
        });

    println!("semiring: {weight_type}");
    println!("total weight: {:.4}", wfsa.total_weight());
    println!();
    println!("{:>5} {:>9} {:>9}", "state", "forward", "backward");
    for state in 0..fsa.num_states() {
        println!(
            "{:>5} {:>9.4} {:>9.4}",
            state,
            wfsa.forward_state_weights()[state],
            wfsa.backward_state_weights()[state]
        );
    }

    println!();
    println!("{:>3} {:>6} {:>8} {:>9}", "arc", "edge", "word", "posterior");
    for (arc_index, posterior) in wfsa.arc_posteriors().into_iter().enumerate() {
        let label = fsa.label(arc_index);
        let word = if label == FINAL_SYMBOL {
            "</s>"
        } else {
            words[label as usize]
        };
        println!(
            "{:>3} {:>6} {:>8} {:>9.4}",
            arc_index,
            format!("{}->{}", fsa.src_state(arc_index), fsa.dest_state(arc_index)),
            word,
            posterior
        );
    }
}
