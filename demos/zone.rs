//! Classify the nodes of a bootstrap list against a crawl target's zone.
//!
//! Run: `cargo run --example zone -- bootstrap.txt --zone 4`

use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use mainline_crawler_common::{
    prompt::ask_yes_no_stdin,
    read_bootstrap_list,
    report::{ObservedNode, Output},
    report_to_file, CandidateFilter, NodeId,
};

use tracing::Level;
use tracing_subscriber;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File with one `host:port` bootstrap node per line
    bootstrap: PathBuf,
    /// Crawl target as a 40 characters hex string, random if omitted
    #[arg(short, long)]
    target: Option<String>,
    /// Number of leading bits a node must share with the target
    #[arg(short, long, default_value_t = 0)]
    zone: usize,
    /// Accept nodes on local networks
    #[arg(long)]
    allow_local: bool,
    /// Write a monitoring report to this path
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        // Switch to TRACE to see why candidates are rejected
        .with_max_level(Level::DEBUG)
        .init();

    let cli = Cli::parse();

    let target = match cli.target {
        Some(hex) => NodeId::from_str(&hex).expect("Expected a 40 characters hex target"),
        None => NodeId::random(),
    };

    let filter = CandidateFilter::new(target, cli.zone)
        .expect("Expected a zone of at most 160 bits")
        .with_allow_local(cli.allow_local);

    let nodes = read_bootstrap_list(&cli.bootstrap).expect("Failed to read bootstrap list");

    println!("Target: {} (zone {})\n", target, cli.zone);

    let mut output = Output::default();

    for node in &nodes {
        let accepted = filter.accepts(node).expect("Zone is validated");

        println!(
            "{:<48} {:<8} shared bits: {:>3}  {}",
            node.address.to_string(),
            node.ip_version().to_string(),
            target.shared_prefix_len(&node.id),
            if accepted { "accepted" } else { "rejected" }
        );

        output.nodes.insert(
            node.address.to_string(),
            ObservedNode::new(node.address, accepted),
        );
    }

    if let Some(path) = cli.output {
        println!("\nWrite report to {}? [y/N]", path.display());

        if ask_yes_no_stdin() {
            report_to_file(&output, &path).expect("Failed to write report");
        }
    }
}
