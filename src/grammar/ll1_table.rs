use std::collections::HashSet;

use super::grammar::EPSILON_ID;
use super::nullable_first_follow::Analysis;
use super::{Grammar, Symbol};

/// A cell overwrite between two rules competing for the same
/// (non-terminal, terminal) slot. The later rule stays in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub non_terminal: usize,
    pub terminal: usize,
    pub replaced: usize,
    pub kept: usize,
}

/// Dense non-terminal x terminal table. A cell holds 0 (error) or the
/// 1-based identity of the rule to apply. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTable {
    cells: Vec<Vec<usize>>,
    conflicts: Vec<Conflict>,
}

impl ParseTable {
    pub fn build(g: &Grammar, analysis: &Analysis) -> Self {
        let mut table = Self {
            cells: vec![vec![0; g.terminal_count()]; g.non_terminal_count()],
            conflicts: Vec::new(),
        };

        for (idx, rule) in g.rules().iter().enumerate() {
            let id = idx + 1;
            let mut add_follow = false;
            for symbol in &rule.right {
                add_follow = false;
                match symbol {
                    Symbol::Epsilon => {
                        add_follow = true;
                        break;
                    }
                    Symbol::Terminal(t) => {
                        table.set(rule.left, *t, id);
                        break;
                    }
                    Symbol::NonTerminal(n) => {
                        for t in sorted(&analysis.first[*n]) {
                            if t == EPSILON_ID {
                                add_follow = true;
                            } else {
                                table.set(rule.left, t, id);
                            }
                        }
                        if !add_follow {
                            break;
                        }
                    }
                }
            }

            if add_follow {
                for t in sorted(&analysis.follow[rule.left]) {
                    table.set(rule.left, t, id);
                }
            }
        }

        table
    }

    fn set(&mut self, non_terminal: usize, terminal: usize, id: usize) {
        let cell = &mut self.cells[non_terminal][terminal];
        if *cell != 0 && *cell != id {
            self.conflicts.push(Conflict {
                non_terminal,
                terminal,
                replaced: *cell,
                kept: id,
            });
        }
        *cell = id;
    }

    pub fn rule_for(&self, non_terminal: usize, terminal: usize) -> usize {
        self.cells[non_terminal][terminal]
    }

    pub fn row(&self, non_terminal: usize) -> &[usize] {
        &self.cells[non_terminal]
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }
}

// sorted column order keeps the conflict list reproducible
fn sorted(set: &HashSet<usize>) -> Vec<usize> {
    let mut columns: Vec<usize> = set.iter().copied().collect();
    columns.sort_unstable();
    columns
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn build(grammar: &str) -> (Grammar, ParseTable) {
        let g = Grammar::parse(grammar).unwrap();
        let analysis = Analysis::compute(&g);
        let table = ParseTable::build(&g, &analysis);
        (g, table)
    }

    fn cell(g: &Grammar, table: &ParseTable, non_terminal: &str, terminal: &str) -> usize {
        table.rule_for(
            g.non_terminal_index(non_terminal).unwrap(),
            g.terminal_index(terminal).unwrap(),
        )
    }

    #[test]
    fn scenario_cells() {
        let (g, table) = build("S -> A B\nA -> a\nA -> e\nB -> b");
        assert_eq!(cell(&g, &table, "S", "a"), 1);
        assert_eq!(cell(&g, &table, "S", "b"), 1);
        assert_eq!(cell(&g, &table, "A", "a"), 2);
        assert_eq!(cell(&g, &table, "A", "b"), 3);
        assert_eq!(cell(&g, &table, "B", "b"), 4);
        assert_eq!(cell(&g, &table, "S", "e"), 0);
        assert_eq!(cell(&g, &table, "B", "e"), 0);
        assert!(table.conflicts().is_empty());
    }

    #[test]
    fn nullable_rule_fills_end_column() {
        let (g, table) = build("S -> a S\nS -> e");
        assert_eq!(cell(&g, &table, "S", "a"), 1);
        // FOLLOW(S) = {e}, so the epsilon rule owns the end-of-input column
        assert_eq!(cell(&g, &table, "S", "e"), 2);
    }

    #[test]
    fn later_rule_wins_and_conflict_is_recorded() {
        let (g, table) = build("S -> a b\nS -> a c");
        assert_eq!(cell(&g, &table, "S", "a"), 2);
        assert_eq!(
            table.conflicts(),
            &[Conflict {
                non_terminal: g.non_terminal_index("S").unwrap(),
                terminal: g.terminal_index("a").unwrap(),
                replaced: 1,
                kept: 2,
            }]
        );
    }

    #[test]
    fn build_is_deterministic() {
        let grammar = "S -> T X\nX -> + T X\nX -> e\nT -> n\nT -> ( S )";
        let (_, first_build) = build(grammar);
        let (_, second_build) = build(grammar);
        assert_eq!(first_build, second_build);
    }
}
