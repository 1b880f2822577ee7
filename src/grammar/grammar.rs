use std::collections::HashMap;

use super::EPSILON;

/// Terminal column reserved for the epsilon marker; the parser also uses it
/// as the end-of-input column.
pub const EPSILON_ID: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Terminal(usize),
    NonTerminal(usize),
    Epsilon,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub left: usize,
    pub right: Vec<Symbol>,
}

#[derive(Debug, Clone)]
pub struct Grammar {
    non_terminals: Vec<String>,
    terminals: Vec<String>,
    non_terminal_table: HashMap<String, usize>,
    terminal_table: HashMap<String, usize>,
    rules: Vec<Rule>,
    start: usize,
}

pub(crate) fn is_non_terminal_name(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_uppercase())
}

impl Grammar {
    pub(crate) fn new() -> Self {
        let mut g = Self {
            non_terminals: Vec::new(),
            terminals: Vec::new(),
            non_terminal_table: HashMap::new(),
            terminal_table: HashMap::new(),
            rules: Vec::new(),
            start: 0,
        };

        g.add_terminal(EPSILON);
        g
    }

    pub(crate) fn add_non_terminal(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.non_terminal_table.get(name) {
            return idx;
        }
        let idx = self.non_terminals.len();
        self.non_terminals.push(name.to_string());
        self.non_terminal_table.insert(name.to_string(), idx);
        idx
    }

    pub(crate) fn add_terminal(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.terminal_table.get(name) {
            return idx;
        }
        let idx = self.terminals.len();
        self.terminals.push(name.to_string());
        self.terminal_table.insert(name.to_string(), idx);
        idx
    }

    pub(crate) fn add_symbol(&mut self, name: &str) -> Symbol {
        if name == EPSILON {
            Symbol::Epsilon
        } else if is_non_terminal_name(name) {
            Symbol::NonTerminal(self.add_non_terminal(name))
        } else {
            Symbol::Terminal(self.add_terminal(name))
        }
    }

    pub(crate) fn add_rule(&mut self, left: usize, right: Vec<Symbol>) {
        self.rules.push(Rule { left, right });
    }

    pub(crate) fn set_start(&mut self, idx: usize) {
        self.start = idx;
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn non_terminal_count(&self) -> usize {
        self.non_terminals.len()
    }

    pub fn terminal_count(&self) -> usize {
        self.terminals.len()
    }

    pub fn non_terminal_index(&self, name: &str) -> Option<usize> {
        self.non_terminal_table.get(name).copied()
    }

    pub fn terminal_index(&self, name: &str) -> Option<usize> {
        self.terminal_table.get(name).copied()
    }

    pub fn non_terminal_name(&self, idx: usize) -> &str {
        self.non_terminals[idx].as_str()
    }

    pub fn terminal_name(&self, idx: usize) -> &str {
        self.terminals[idx].as_str()
    }

    pub fn non_terminal_names(&self) -> &[String] {
        &self.non_terminals
    }

    pub fn terminal_names(&self) -> &[String] {
        &self.terminals
    }

    pub fn symbol_name(&self, symbol: &Symbol) -> &str {
        match symbol {
            Symbol::Terminal(idx) => self.terminal_name(*idx),
            Symbol::NonTerminal(idx) => self.non_terminal_name(*idx),
            Symbol::Epsilon => EPSILON,
        }
    }
}
