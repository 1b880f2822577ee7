pub mod grammar;

use std::{fs, io::BufRead};

use grammar::pretty_print::{ParseResultOutput, TreeOutput};
use grammar::PredictiveParser;

fn print_help() {
    println!("Usage: ll1-parser-helper outputs [options] [grammar file]");
    println!("outputs:");
    println!("  prod: Numbered productions");
    println!("  nff: Nullable, first and follow");
    println!("  ll1: LL(1) parsing table");
    println!("  parse: Parse token lines read from stdin");
    println!("options:");
    println!("  -h: Print this help");
    println!("  -l: Print in LaTeX format");
    println!("  -j: Print in JSON format");
    println!("With no grammar file, the grammar is read from stdin until a");
    println!("lone 'q' or end of input (use e for epsilon; start symbol is S).");
}

fn main() {
    let mut outputs: Vec<&str> = Vec::new();
    let args = std::env::args().skip(1).collect::<Vec<String>>();
    let mut i: usize = 0;
    while i < args.len() && ["prod", "nff", "ll1", "parse"].contains(&args[i].as_str()) {
        outputs.push(args[i].as_str());
        i += 1;
    }

    enum OutputFormat {
        Plain,
        LaTeX,
        JSON,
    }
    let mut output_format = OutputFormat::Plain;

    while i < args.len() && ["-h", "--help", "-l", "-j"].contains(&args[i].as_str()) {
        if args[i] == "-h" || args[i] == "--help" {
            print_help();
            return;
        } else if args[i] == "-l" {
            output_format = OutputFormat::LaTeX;
        } else if args[i] == "-j" {
            output_format = OutputFormat::JSON;
        }
        i += 1;
    }

    if i + 1 < args.len() || outputs.is_empty() {
        print_help();
        return;
    }

    let stdin = std::io::stdin();
    let input: String = if i == args.len() {
        let mut lines: Vec<String> = Vec::new();
        for line in stdin.lock().lines() {
            let line = line.unwrap();
            if line == "q" {
                break;
            }
            lines.push(line);
        }
        lines.join("\n")
    } else {
        fs::read_to_string(args[i].as_str()).expect("Failed to read file")
    };

    let p = match PredictiveParser::new(&input) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    for warning in p.conflict_warnings() {
        eprintln!("warning: {}", warning);
    }

    for output in outputs {
        if output == "prod" {
            let t = p.to_rule_output_vec();
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::JSON => t.to_json(),
                }
            );
        }
        if output == "nff" {
            let t = p.to_non_terminal_output_vec();
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::JSON => t.to_json(),
                }
            );
        }
        if output == "ll1" {
            let t = p.to_table_output();
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::JSON => t.to_json(),
                }
            );
        }
        if output == "parse" {
            for line in stdin.lock().lines() {
                let line = line.unwrap();
                if line.split_whitespace().next().is_none() {
                    continue;
                }
                let rules = match p.parse(&line) {
                    Ok(rules) => rules,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                let tree = match p.build_tree(&rules) {
                    Ok(tree) => tree,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                match output_format {
                    OutputFormat::JSON => {
                        println!("{}", ParseResultOutput::new(&rules, &tree).to_json())
                    }
                    _ => {
                        println!(
                            "rules: {}",
                            rules
                                .iter()
                                .map(|id| id.to_string())
                                .collect::<Vec<_>>()
                                .join(" ")
                        );
                        print!("{}", TreeOutput::new(&tree).to_plaintext());
                    }
                }
            }
        }
    }
}
