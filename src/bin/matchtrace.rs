//! CLI tool for exploring string-search algorithm traces.
//!
//! This binary runs the matchtrace generators from the command line
//! and prints the resulting step sequences, the matches they find, or
//! the Aho-Corasick automaton itself — as formatted lines or as JSON
//! for downstream renderers.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use matchtrace::prelude::*;

#[derive(Parser)]
#[command(name = "matchtrace")]
#[command(about = "Step-by-step traces of classical string-search algorithms", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full step trace of an algorithm run
    Trace {
        /// Algorithm to trace
        #[arg(short, long, value_enum, default_value = "naive")]
        algorithm: AlgorithmChoice,

        /// Text to search in
        #[arg(short, long, default_value = "ababcabcacbab")]
        text: String,

        /// Pattern to search for (comma-separated list for aho-corasick)
        #[arg(short, long, default_value = "abcac")]
        pattern: String,

        /// Emit the raw steps as JSON instead of formatted lines
        #[arg(long)]
        json: bool,

        /// Show only the first N steps
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Print only the matches an algorithm finds
    Matches {
        /// Algorithm to run
        #[arg(short, long, value_enum, default_value = "naive")]
        algorithm: AlgorithmChoice,

        /// Text to search in
        #[arg(short, long, default_value = "ababcabcacbab")]
        text: String,

        /// Pattern to search for (comma-separated list for aho-corasick)
        #[arg(short, long, default_value = "abcac")]
        pattern: String,
    },

    /// Show the Aho-Corasick automaton built from a pattern set
    Automaton {
        /// Comma-separated patterns
        #[arg(short, long, default_value = "arrows, row, sun, under")]
        patterns: String,

        /// Emit the automaton and its layout as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum AlgorithmChoice {
    /// Brute-force window scan
    Naive,
    /// Knuth-Morris-Pratt with next (LPS) table
    Kmp,
    /// Rabin-Karp rolling hash
    RabinKarp,
    /// Aho-Corasick multi-pattern automaton
    AhoCorasick,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Trace {
            algorithm,
            text,
            pattern,
            json,
            limit,
        } => run_trace(algorithm, &text, &pattern, json, limit),
        Commands::Matches {
            algorithm,
            text,
            pattern,
        } => run_matches(algorithm, &text, &pattern),
        Commands::Automaton { patterns, json } => run_automaton(&patterns, json),
    }
}

fn step_line(index: usize, label: &str, desc: &Desc) -> String {
    let tag = match label {
        "match" => label.green().bold(),
        "mismatch" | "fail" => label.red(),
        "jump" | "roll" | "goto" => label.yellow(),
        _ => label.cyan(),
    };
    format!("{index:>5}  {tag:<20} {}", desc.en)
}

fn truncated(total: usize, limit: Option<usize>) -> usize {
    limit.map_or(total, |l| l.min(total))
}

fn run_trace(
    algorithm: AlgorithmChoice,
    text: &str,
    pattern: &str,
    json: bool,
    limit: Option<usize>,
) -> Result<()> {
    match algorithm {
        AlgorithmChoice::Naive => {
            let steps = generate_naive_steps(text, pattern);
            if json {
                println!("{}", serde_json::to_string_pretty(&steps)?);
                return Ok(());
            }
            let shown = truncated(steps.len(), limit);
            for (index, step) in steps[..shown].iter().enumerate() {
                println!("{}", step_line(index, step.kind.label(), &step.desc));
            }
            print_footer(shown, steps.len());
        }
        AlgorithmChoice::Kmp => {
            let steps = generate_kmp_steps(text, pattern);
            if json {
                println!("{}", serde_json::to_string_pretty(&steps)?);
                return Ok(());
            }
            let shown = truncated(steps.len(), limit);
            for (index, step) in steps[..shown].iter().enumerate() {
                println!("{}", step_line(index, step.kind.label(), &step.desc));
            }
            print_footer(shown, steps.len());
        }
        AlgorithmChoice::RabinKarp => {
            let steps = generate_rk_steps(text, pattern);
            if json {
                println!("{}", serde_json::to_string_pretty(&steps)?);
                return Ok(());
            }
            let shown = truncated(steps.len(), limit);
            for (index, step) in steps[..shown].iter().enumerate() {
                println!("{}", step_line(index, step.kind.label(), &step.desc));
            }
            print_footer(shown, steps.len());
        }
        AlgorithmChoice::AhoCorasick => {
            let steps = generate_ac_steps(text, pattern);
            if json {
                println!("{}", serde_json::to_string_pretty(&steps)?);
                return Ok(());
            }
            let shown = truncated(steps.len(), limit);
            for (index, step) in steps[..shown].iter().enumerate() {
                let phase = match step.phase {
                    AcPhase::Build => "build".dimmed(),
                    AcPhase::Search => "search".dimmed(),
                };
                println!(
                    "{:>5}  {phase:<8} {:<20} {}",
                    index,
                    colored_ac_label(step.kind.label()),
                    step.desc.en
                );
            }
            print_footer(shown, steps.len());
        }
    }
    Ok(())
}

fn colored_ac_label(label: &str) -> colored::ColoredString {
    match label {
        "match" => label.green().bold(),
        "fail" => label.red(),
        "goto" | "build_fail_optimize" => label.yellow(),
        _ => label.cyan(),
    }
}

fn print_footer(shown: usize, total: usize) {
    if shown < total {
        println!("... {} of {} steps shown", shown, total);
    } else {
        println!("{} steps", total);
    }
}

fn run_matches(algorithm: AlgorithmChoice, text: &str, pattern: &str) -> Result<()> {
    match algorithm {
        AlgorithmChoice::AhoCorasick => {
            let steps = generate_ac_steps(text, pattern);
            let matches = steps.last().map(|s| s.matches.clone()).unwrap_or_default();
            if matches.is_empty() {
                println!("{}", "no matches".yellow());
                return Ok(());
            }
            for m in matches {
                println!(
                    "{}\t[{}, {}]\tstate {}",
                    m.pattern.green(),
                    m.start,
                    m.end,
                    m.state
                );
            }
        }
        _ => {
            let spans = match algorithm {
                AlgorithmChoice::Naive => generate_naive_steps(text, pattern)
                    .last()
                    .map(|s| s.matches.clone())
                    .unwrap_or_default(),
                AlgorithmChoice::Kmp => generate_kmp_steps(text, pattern)
                    .last()
                    .map(|s| s.matches.clone())
                    .unwrap_or_default(),
                AlgorithmChoice::RabinKarp => generate_rk_steps(text, pattern)
                    .last()
                    .map(|s| s.matches.clone())
                    .unwrap_or_default(),
                AlgorithmChoice::AhoCorasick => unreachable!(),
            };
            if spans.is_empty() {
                println!("{}", "no matches".yellow());
                return Ok(());
            }
            for span in spans {
                println!("{}\t[{}, {}]", pattern.green(), span.start, span.end);
            }
        }
    }
    Ok(())
}

fn run_automaton(patterns_input: &str, json: bool) -> Result<()> {
    let patterns = parse_patterns(patterns_input);
    if patterns.is_empty() {
        println!("{}", "no patterns".yellow());
        return Ok(());
    }

    let (trie, _) = build_automaton(&patterns);
    let layout = calculate_trie_layout(&trie);

    if json {
        #[derive(serde::Serialize)]
        struct AutomatonDump<'a> {
            trie: &'a Trie,
            layout: &'a TrieLayout,
        }
        let dump = AutomatonDump {
            trie: &trie,
            layout: &layout,
        };
        println!("{}", serde_json::to_string_pretty(&dump)?);
        return Ok(());
    }

    println!("{} nodes, alphabet {:?}", trie.node_count(), pattern_alphabet(&patterns));
    for (id, node) in trie.iter() {
        let transitions: Vec<String> = node
            .transitions
            .iter()
            .map(|(ch, target)| format!("'{ch}'->{target}"))
            .collect();
        let outputs = if node.outputs.is_empty() {
            String::new()
        } else {
            format!("  output [{}]", node.outputs.join(", ").green())
        };
        println!(
            "{:>4}  fail {:>3}  {}{}",
            id.to_string().cyan(),
            node.fail,
            transitions.join(" "),
            outputs
        );
    }
    println!(
        "layout: {} x {}, {} links",
        layout.width,
        layout.height,
        layout.links.len()
    );
    Ok(())
}
