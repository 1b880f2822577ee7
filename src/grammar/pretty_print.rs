use crowbook_text_processing::escape;
use serde::Serialize;

use super::predict::PredictiveParser;
use super::tree::TreeNode;

#[derive(Debug, Clone, Serialize)]
pub struct RuleOutput<'a> {
    pub index: usize,
    pub left: &'a str,
    pub right: Vec<&'a str>,
}

impl RuleOutput<'_> {
    pub fn to_plaintext(&self, left_width: usize) -> String {
        format!(
            "{:>2}: {:>width$} -> {}",
            self.index,
            self.left,
            self.right.join(" "),
            width = left_width
        )
    }

    pub fn to_latex(&self) -> String {
        format!(
            "{} & {} & \\rightarrow & {}",
            self.index,
            escape::tex(self.left),
            self.right
                .iter()
                .map(|s| escape::tex(*s))
                .collect::<Vec<_>>()
                .join(" \\ ")
        )
    }
}

#[derive(Serialize)]
pub struct RuleOutputVec<'a> {
    rules: Vec<RuleOutput<'a>>,
}

impl RuleOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        let left_width = self.rules.iter().map(|r| r.left.len()).max().unwrap_or(0);
        self.rules
            .iter()
            .map(|r| r.to_plaintext(left_width))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        std::iter::once("\\[\\begin{array}{rcll}".to_string())
            .chain(self.rules.iter().map(|r| r.to_latex()))
            .chain(std::iter::once("\\end{array}\\]".to_string()))
            .collect::<Vec<_>>()
            .join("\\\\\n")
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}

#[derive(Serialize)]
struct NonTerminalOutput<'a> {
    name: &'a str,
    nullable: bool,
    first: Vec<&'a str>,
    follow: Vec<&'a str>,
}

impl NonTerminalOutput<'_> {
    fn to_plaintext(&self) -> String {
        format!(
            "{} | {} | {} | {}",
            self.name,
            self.nullable,
            self.first.join(", "),
            self.follow.join(", ")
        )
    }

    fn to_latex(&self) -> String {
        fn f(set: &[&str]) -> String {
            set.iter()
                .map(|s| escape::tex(*s))
                .collect::<Vec<_>>()
                .join(r"\ ")
        }

        format!(
            "{} & {} & {} & {}",
            escape::tex(self.name),
            self.nullable,
            f(&self.first),
            f(&self.follow)
        )
    }
}

#[derive(Serialize)]
pub struct NonTerminalOutputVec<'a> {
    data: Vec<NonTerminalOutput<'a>>,
}

impl NonTerminalOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        self.data
            .iter()
            .map(|t| t.to_plaintext())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        let content = self
            .data
            .iter()
            .map(|t| t.to_latex())
            .collect::<Vec<_>>()
            .join("\\\\\n ");

        "\\begin{tabular}{c|c|c|c}\n".to_string()
            + "Symbol & Nullable & First & Follow\\\\\\hline\n"
            + &content
            + "\\\\\n\\end{tabular}"
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}

#[derive(Serialize)]
pub struct ConflictOutput<'a> {
    pub non_terminal: &'a str,
    pub terminal: &'a str,
    pub replaced: usize,
    pub kept: usize,
}

impl ConflictOutput<'_> {
    pub fn to_plaintext(&self) -> String {
        format!(
            "rule {} overwrites rule {} in cell ({}, {})",
            self.kept, self.replaced, self.non_terminal, self.terminal
        )
    }
}

#[derive(Serialize)]
pub struct TableOutput<'a> {
    terminals: Vec<&'a str>,
    rows: Vec<(&'a str, Vec<usize>)>,
    conflicts: Vec<ConflictOutput<'a>>,
}

impl TableOutput<'_> {
    pub fn to_plaintext(&self) -> String {
        let mut header: Vec<String> = vec![String::new()];
        header.extend(self.terminals.iter().map(|&t| t.to_string()));
        let mut output: Vec<Vec<String>> = vec![header];
        for (left, row) in &self.rows {
            let mut line: Vec<String> = vec![left.to_string()];
            line.extend(row.iter().map(|&id| {
                if id == 0 {
                    String::new()
                } else {
                    id.to_string()
                }
            }));
            output.push(line);
        }

        let mut width = vec![0; self.terminals.len() + 1];
        for j in 0..output[0].len() {
            width[j] = output.iter().map(|line| line[j].len()).max().unwrap();
        }
        output
            .iter()
            .map(|line| {
                line.iter()
                    .enumerate()
                    .map(|(i, s)| format!("{:>width$}", s, width = width[i]))
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        let mut header: Vec<String> = vec![format!(
            "\\[\\begin{{array}}{{c{}}}\n",
            "|l".repeat(self.terminals.len()),
        )];
        header.extend(
            self.terminals
                .iter()
                .map(|&t| format!("\\text{{{}}}", escape::tex(t))),
        );
        let header = header.join(" & ");

        let mut output: Vec<String> = Vec::new();
        for (left, row) in &self.rows {
            let mut line: Vec<String> = vec![escape::tex(*left).to_string()];
            line.extend(row.iter().map(|&id| {
                if id == 0 {
                    String::new()
                } else {
                    id.to_string()
                }
            }));
            output.push(line.join(" & "));
        }
        let output = output.join("\\\\\n");

        header + "\\\\\\hline\n" + &output + "\n\\end{array}\\]"
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }

    pub fn conflicts(&self) -> &[ConflictOutput] {
        &self.conflicts
    }
}

#[derive(Serialize)]
pub struct TreeOutput<'a> {
    value: &'a str,
    children: Vec<TreeOutput<'a>>,
}

impl<'a> TreeOutput<'a> {
    pub fn new(node: &'a TreeNode) -> Self {
        Self {
            value: node.value.as_str(),
            children: node.children.iter().map(TreeOutput::new).collect(),
        }
    }

    pub fn to_plaintext(&self) -> String {
        let mut output = String::new();
        self.render("", true, &mut output);
        output
    }

    fn render(&self, prefix: &str, is_last: bool, output: &mut String) {
        output.push_str(prefix);
        output.push_str(if is_last { "\\-- " } else { "|-- " });
        output.push_str(self.value);
        output.push('\n');

        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "|   " });
        for (i, child) in self.children.iter().enumerate() {
            child.render(&child_prefix, i + 1 == self.children.len(), output);
        }
    }
}

#[derive(Serialize)]
pub struct ParseResultOutput<'a> {
    rules: &'a [usize],
    ast: TreeOutput<'a>,
}

impl<'a> ParseResultOutput<'a> {
    pub fn new(rules: &'a [usize], tree: &'a TreeNode) -> Self {
        Self {
            rules,
            ast: TreeOutput::new(tree),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}

impl PredictiveParser {
    pub fn to_rule_output_vec(&self) -> RuleOutputVec {
        let g = self.grammar();
        let rules = g
            .rules()
            .iter()
            .enumerate()
            .map(|(i, rule)| RuleOutput {
                index: i + 1,
                left: g.non_terminal_name(rule.left),
                right: rule.right.iter().map(|s| g.symbol_name(s)).collect(),
            })
            .collect();
        RuleOutputVec { rules }
    }

    pub fn to_non_terminal_output_vec(&self) -> NonTerminalOutputVec {
        let g = self.grammar();
        let analysis = self.analysis();
        let mut data = Vec::new();
        for (idx, name) in g.non_terminal_names().iter().enumerate() {
            let mut row = NonTerminalOutput {
                name: name.as_str(),
                nullable: analysis.nullable[idx],
                first: analysis.first[idx]
                    .iter()
                    .map(|&t| g.terminal_name(t))
                    .collect(),
                follow: analysis.follow[idx]
                    .iter()
                    .map(|&t| g.terminal_name(t))
                    .collect(),
            };
            row.first.sort_unstable();
            row.follow.sort_unstable();
            data.push(row);
        }
        NonTerminalOutputVec { data }
    }

    pub fn to_table_output(&self) -> TableOutput {
        let g = self.grammar();
        let terminals: Vec<&str> = g.terminal_names().iter().map(|t| t.as_str()).collect();
        let rows = g
            .non_terminal_names()
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.as_str(), self.table().row(idx).to_vec()))
            .collect();
        let conflicts = self
            .table()
            .conflicts()
            .iter()
            .map(|c| ConflictOutput {
                non_terminal: g.non_terminal_name(c.non_terminal),
                terminal: g.terminal_name(c.terminal),
                replaced: c.replaced,
                kept: c.kept,
            })
            .collect();
        TableOutput {
            terminals,
            rows,
            conflicts,
        }
    }

    pub fn conflict_warnings(&self) -> Vec<String> {
        self.to_table_output()
            .conflicts()
            .iter()
            .map(|c| c.to_plaintext())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn scenario() -> PredictiveParser {
        PredictiveParser::new("S -> A B\nA -> a\nA -> e\nB -> b").unwrap()
    }

    #[test]
    fn rule_listing() {
        let p = scenario();
        assert_eq!(
            p.to_rule_output_vec().to_plaintext(),
            " 1: S -> A B\n 2: A -> a\n 3: A -> e\n 4: B -> b"
        );
    }

    #[test]
    fn set_listing() {
        let p = scenario();
        assert_eq!(
            p.to_non_terminal_output_vec().to_plaintext(),
            "S | false | a, b | e\nA | true | a, e | b\nB | false | b | e"
        );
    }

    #[test]
    fn table_grid_shows_rule_numbers() {
        let p = scenario();
        let text = p.to_table_output().to_plaintext();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "  | e | a | b");
        assert_eq!(lines[1], "S |   | 1 | 1");
        assert_eq!(lines[2], "A |   | 2 | 3");
        assert_eq!(lines[3], "B |   |   | 4");
    }

    #[test]
    fn tree_rendering() {
        let p = scenario();
        let rules = p.parse("a b").unwrap();
        let tree = p.build_tree(&rules).unwrap();
        assert_eq!(
            TreeOutput::new(&tree).to_plaintext(),
            "\\-- S\n    |-- A\n    |   \\-- a\n    \\-- B\n        \\-- b\n"
        );
    }
}
