use flowlens::graph::complexity::Complexity;
use flowlens::graph::fallback::fallback_graph;
use flowlens::graph::normalize::normalize_graph;
use flowlens::graph::validate::validate_graph;
use flowlens::graph::FlowGraph;
use flowlens::extract::JsonExtractor;
use std::env;
use std::fs;
use std::process;

/// Offline runner for the recovery pipeline: feed it a captured model-output
/// transcript and see exactly what diagram the service would return.
fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: flowlens-recover <path/to/model_output.txt> [source text]");
        process::exit(1);
    }

    let transcript_path = &args[1];
    let source_text = args.get(2).map(String::as_str).unwrap_or("");

    println!("Loading model output from: {}", transcript_path);
    let transcript = match fs::read_to_string(transcript_path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Failed to read transcript '{}': {}", transcript_path, e);
            process::exit(1);
        }
    };

    let extractor = JsonExtractor::default();

    println!("\nRunning extraction...");
    let diagram: FlowGraph = match extractor.extract_graph(&transcript) {
        None => {
            println!("  -> No JSON graph found; synthesizing fallback diagram");
            fallback_graph(source_text)
        }
        Some(candidate) => match validate_graph(&candidate) {
            Err(e) => {
                println!("  -> Candidate rejected: {}", e);
                println!("  -> Synthesizing fallback diagram");
                fallback_graph(source_text)
            }
            Ok(()) => {
                println!("  -> Candidate accepted; normalizing");
                match serde_json::from_value(normalize_graph(candidate)) {
                    Ok(graph) => graph,
                    Err(e) => {
                        println!("  -> Normalized graph failed to deserialize: {}", e);
                        println!("  -> Synthesizing fallback diagram");
                        fallback_graph(source_text)
                    }
                }
            }
        },
    };

    println!("\nRecovered diagram:");
    match serde_json::to_string_pretty(&diagram) {
        Ok(rendered) => println!("{}", rendered),
        Err(e) => {
            eprintln!("Failed to render diagram: {}", e);
            process::exit(1);
        }
    }

    println!(
        "\n  -> {} nodes, {} edges ({} conditional), complexity: {}",
        diagram.nodes.len(),
        diagram.edges.len(),
        diagram.conditional_edge_count(),
        Complexity::classify(diagram.nodes.len(), diagram.edges.len())
    );
}
