extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

mod grammar;
pub use grammar::{
    Analysis, Conflict, Grammar, GrammarError, GrammarErrorKind, ParseError, ParseTable,
    PredictiveParser, Rule, Symbol, TreeError, TreeNode,
};

use grammar::pretty_print::ParseResultOutput;

#[wasm_bindgen]
pub fn nullable_first_follow_to_json(grammar: &str) -> String {
    match PredictiveParser::new(grammar) {
        Ok(p) => p.to_non_terminal_output_vec().to_json(),
        Err(e) => format!("{{\"error\":\"{}\"}}", e),
    }
}

#[wasm_bindgen]
pub fn ll1_table_to_json(grammar: &str) -> String {
    match PredictiveParser::new(grammar) {
        Ok(p) => p.to_table_output().to_json(),
        Err(e) => format!("{{\"error\":\"{}\"}}", e),
    }
}

#[wasm_bindgen]
pub fn parse_to_json(grammar: &str, tokens: &str) -> String {
    let p = match PredictiveParser::new(grammar) {
        Ok(p) => p,
        Err(e) => return format!("{{\"error\":\"{}\"}}", e),
    };
    let rules = match p.parse(tokens) {
        Ok(rules) => rules,
        Err(e) => return format!("{{\"error\":\"{}\"}}", e),
    };
    match p.build_tree(&rules) {
        Ok(tree) => ParseResultOutput::new(&rules, &tree).to_json(),
        Err(e) => format!("{{\"error\":\"{}\"}}", e),
    }
}
