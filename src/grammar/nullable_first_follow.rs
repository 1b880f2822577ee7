use std::collections::HashSet;

use super::grammar::EPSILON_ID;
use super::{Grammar, Symbol};

/// Nullable, FIRST and FOLLOW, computed eagerly once per grammar. Set
/// elements are terminal-registry indices; `EPSILON_ID` stands for epsilon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub nullable: Vec<bool>,
    pub first: Vec<HashSet<usize>>,
    pub follow: Vec<HashSet<usize>>,
}

impl Analysis {
    pub fn compute(g: &Grammar) -> Self {
        let nullable = compute_nullable(g);

        let first = fixed_point(vec![HashSet::new(); g.non_terminal_count()], |prev| {
            first_pass(g, prev)
        });

        let mut follow = vec![HashSet::new(); g.non_terminal_count()];
        follow[g.start()].insert(EPSILON_ID);
        let follow = fixed_point(follow, |prev| follow_pass(g, &first, prev));

        Self {
            nullable,
            first,
            follow,
        }
    }
}

pub(crate) fn compute_nullable(g: &Grammar) -> Vec<bool> {
    let mut nullable = vec![false; g.non_terminal_count()];
    loop {
        let mut changed = false;
        for rule in g.rules() {
            if nullable[rule.left] {
                continue;
            }
            let derives_empty = rule.right.iter().all(|symbol| match symbol {
                Symbol::Epsilon => true,
                Symbol::NonTerminal(idx) => nullable[*idx],
                Symbol::Terminal(_) => false,
            });
            if derives_empty {
                nullable[rule.left] = true;
                changed = true;
            }
        }
        if !changed || nullable.iter().all(|&n| n) {
            return nullable;
        }
    }
}

fn total_len(sets: &[HashSet<usize>]) -> usize {
    sets.iter().map(HashSet::len).sum()
}

/// Runs `pass` until a full generation adds nothing. Each generation is a
/// fresh vector; the sets only grow, so comparing total cardinality is
/// enough to detect the fixed point.
fn fixed_point<F>(mut sets: Vec<HashSet<usize>>, pass: F) -> Vec<HashSet<usize>>
where
    F: Fn(&[HashSet<usize>]) -> Vec<HashSet<usize>>,
{
    loop {
        let next = pass(&sets);
        if total_len(&next) == total_len(&sets) {
            return next;
        }
        sets = next;
    }
}

pub(crate) fn first_pass(g: &Grammar, prev: &[HashSet<usize>]) -> Vec<HashSet<usize>> {
    let mut next = prev.to_vec();
    for rule in g.rules() {
        let mut derives_epsilon = true;
        for symbol in &rule.right {
            match symbol {
                Symbol::Epsilon => {}
                Symbol::Terminal(idx) => {
                    next[rule.left].insert(*idx);
                    derives_epsilon = false;
                    break;
                }
                Symbol::NonTerminal(idx) => {
                    let first = &prev[*idx];
                    if first.is_empty() {
                        // not populated yet; a later generation catches up
                        derives_epsilon = false;
                        break;
                    }
                    next[rule.left].extend(first.iter().filter(|&&t| t != EPSILON_ID));
                    if !first.contains(&EPSILON_ID) {
                        derives_epsilon = false;
                        break;
                    }
                }
            }
        }
        if derives_epsilon {
            next[rule.left].insert(EPSILON_ID);
        }
    }
    next
}

pub(crate) fn follow_pass(
    g: &Grammar,
    first: &[HashSet<usize>],
    prev: &[HashSet<usize>],
) -> Vec<HashSet<usize>> {
    let mut next = prev.to_vec();
    for rule in g.rules() {
        for (pos, symbol) in rule.right.iter().enumerate() {
            let subject = match symbol {
                Symbol::NonTerminal(idx) => *idx,
                _ => continue,
            };

            let mut reaches_end = true;
            for later in &rule.right[pos + 1..] {
                match later {
                    Symbol::Epsilon => {}
                    Symbol::Terminal(idx) => {
                        next[subject].insert(*idx);
                        reaches_end = false;
                        break;
                    }
                    Symbol::NonTerminal(idx) => {
                        next[subject].extend(first[*idx].iter().filter(|&&t| t != EPSILON_ID));
                        if !first[*idx].contains(&EPSILON_ID) {
                            reaches_end = false;
                            break;
                        }
                    }
                }
            }

            // no self-inheritance within a pass
            if reaches_end && subject != rule.left {
                next[subject].extend(prev[rule.left].iter().copied());
            }
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn scenario() -> Grammar {
        Grammar::parse("S -> A B\nA -> a\nA -> e\nB -> b").unwrap()
    }

    fn names(g: &Grammar, set: &HashSet<usize>) -> Vec<String> {
        let mut names: Vec<String> = set.iter().map(|&t| g.terminal_name(t).to_string()).collect();
        names.sort();
        names
    }

    #[test]
    fn scenario_nullable() {
        let g = scenario();
        // non-terminals are S, A, B in first-seen order
        assert_eq!(compute_nullable(&g), vec![false, true, false]);
    }

    #[test]
    fn scenario_first() {
        let g = scenario();
        let analysis = Analysis::compute(&g);
        assert_eq!(names(&g, &analysis.first[0]), vec!["a", "b"]);
        assert_eq!(names(&g, &analysis.first[1]), vec!["a", "e"]);
        assert_eq!(names(&g, &analysis.first[2]), vec!["b"]);
    }

    #[test]
    fn scenario_follow() {
        let g = scenario();
        let analysis = Analysis::compute(&g);
        assert_eq!(names(&g, &analysis.follow[0]), vec!["e"]);
        assert_eq!(names(&g, &analysis.follow[1]), vec!["b"]);
        assert_eq!(names(&g, &analysis.follow[2]), vec!["e"]);
    }

    #[test]
    fn epsilon_in_first_iff_nullable() {
        let g = Grammar::parse("S -> X Y d\nX -> Y\nX -> a\nY -> c\nY -> e").unwrap();
        let analysis = Analysis::compute(&g);
        for idx in 0..g.non_terminal_count() {
            assert_eq!(
                analysis.first[idx].contains(&EPSILON_ID),
                analysis.nullable[idx],
                "mismatch for {}",
                g.non_terminal_name(idx)
            );
        }
    }

    #[test]
    fn chained_nullables() {
        let g = Grammar::parse("S -> d\nS -> X Y S\nY -> e\nY -> c\nX -> Y\nX -> a").unwrap();
        // S, X, Y in first-seen order
        assert_eq!(compute_nullable(&g), vec![false, true, true]);
    }

    #[test]
    fn fixed_point_is_idempotent() {
        let g = scenario();
        let analysis = Analysis::compute(&g);
        assert_eq!(first_pass(&g, &analysis.first), analysis.first);
        assert_eq!(
            follow_pass(&g, &analysis.first, &analysis.follow),
            analysis.follow
        );
        assert_eq!(compute_nullable(&g), analysis.nullable);
    }

    #[test]
    fn follow_sees_every_occurrence() {
        // T occurs twice in the first rule; the occurrence before 'x' must
        // contribute x, the trailing one must inherit FOLLOW(S)
        let g = Grammar::parse("S -> T x T\nT -> t").unwrap();
        let analysis = Analysis::compute(&g);
        let t = g.non_terminal_index("T").unwrap();
        assert_eq!(names(&g, &analysis.follow[t]), vec!["e", "x"]);
    }
}
