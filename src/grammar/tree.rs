use super::error::TreeError;
use super::{Grammar, Symbol};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub value: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            children: Vec::new(),
        }
    }
}

/// Rebuilds the derivation tree from a sequence of applied rule identities.
/// The sequence is a leftmost-derivation trace: the rule after the current
/// one always expands the next non-terminal child in pre-order, and this is
/// checked rather than assumed.
pub fn build(g: &Grammar, seq: &[usize]) -> Result<TreeNode, TreeError> {
    if seq.is_empty() {
        return Err(TreeError::EmptyDerivation);
    }
    if let Some(&id) = seq.iter().find(|&&id| id == 0 || id > g.rules().len()) {
        return Err(TreeError::RuleOutOfRange(id));
    }

    let root_rule = &g.rules()[seq[0] - 1];
    if root_rule.left != g.start() {
        return Err(TreeError::RootMismatch {
            expected: g.non_terminal_name(g.start()).to_string(),
            found: g.non_terminal_name(root_rule.left).to_string(),
        });
    }

    let mut pos = 0;
    let root = expand(g, seq, &mut pos)?;
    if pos + 1 != seq.len() {
        return Err(TreeError::TrailingRules {
            consumed: pos + 1,
            total: seq.len(),
        });
    }
    Ok(root)
}

// expands the rule at seq[*pos]; on return *pos holds the index of the last
// rule consumed by this subtree
fn expand(g: &Grammar, seq: &[usize], pos: &mut usize) -> Result<TreeNode, TreeError> {
    let rule = &g.rules()[seq[*pos] - 1];
    let mut node = TreeNode::new(g.non_terminal_name(rule.left));
    for symbol in &rule.right {
        match symbol {
            Symbol::Epsilon => {}
            Symbol::Terminal(idx) => {
                node.children.push(TreeNode::new(g.terminal_name(*idx)));
            }
            Symbol::NonTerminal(idx) => {
                let expands_child = seq
                    .get(*pos + 1)
                    .map(|&next| g.rules()[next - 1].left == *idx);
                if expands_child != Some(true) {
                    return Err(TreeError::MissingExpansion(
                        g.non_terminal_name(*idx).to_string(),
                    ));
                }
                *pos += 1;
                node.children.push(expand(g, seq, pos)?);
            }
        }
    }
    Ok(node)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn scenario() -> Grammar {
        Grammar::parse("S -> A B\nA -> a\nA -> e\nB -> b").unwrap()
    }

    fn node(value: &str, children: Vec<TreeNode>) -> TreeNode {
        TreeNode {
            value: value.to_string(),
            children,
        }
    }

    fn leaf(value: &str) -> TreeNode {
        node(value, Vec::new())
    }

    #[test]
    fn scenario_trees() {
        let g = scenario();
        assert_eq!(
            build(&g, &[1, 3, 4]).unwrap(),
            node("S", vec![leaf("A"), node("B", vec![leaf("b")])])
        );
        assert_eq!(
            build(&g, &[1, 2, 4]).unwrap(),
            node(
                "S",
                vec![node("A", vec![leaf("a")]), node("B", vec![leaf("b")])]
            )
        );
    }

    #[test]
    fn empty_sequence_is_rejected() {
        let g = scenario();
        assert_eq!(build(&g, &[]), Err(TreeError::EmptyDerivation));
    }

    #[test]
    fn out_of_range_identity_is_rejected() {
        let g = scenario();
        assert_eq!(build(&g, &[1, 5, 4]), Err(TreeError::RuleOutOfRange(5)));
        assert_eq!(build(&g, &[0]), Err(TreeError::RuleOutOfRange(0)));
    }

    #[test]
    fn root_must_expand_the_start_symbol() {
        let g = scenario();
        assert_eq!(
            build(&g, &[2]),
            Err(TreeError::RootMismatch {
                expected: "S".to_string(),
                found: "A".to_string(),
            })
        );
    }

    #[test]
    fn truncated_sequence_is_rejected() {
        let g = scenario();
        assert_eq!(
            build(&g, &[1, 2]),
            Err(TreeError::MissingExpansion("B".to_string()))
        );
        assert_eq!(
            build(&g, &[1]),
            Err(TreeError::MissingExpansion("A".to_string()))
        );
    }

    #[test]
    fn misordered_sequence_is_rejected() {
        let g = scenario();
        // rule 4 expands B, but A is the next unexpanded child
        assert_eq!(
            build(&g, &[1, 4, 2]),
            Err(TreeError::MissingExpansion("A".to_string()))
        );
    }

    #[test]
    fn leftover_rules_are_rejected() {
        let g = scenario();
        assert_eq!(
            build(&g, &[1, 3, 4, 4]),
            Err(TreeError::TrailingRules {
                consumed: 3,
                total: 4,
            })
        );
    }
}
