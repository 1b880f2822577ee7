use super::error::{GrammarError, GrammarErrorKind};
use super::grammar::is_non_terminal_name;
use super::{Grammar, ARROW, START};

impl Grammar {
    pub fn parse(grammar: &str) -> Result<Self, GrammarError> {
        let mut g = Self::new();

        for (i, line) in grammar.lines().enumerate() {
            let line_number = i + 1;
            let mut words = line.split_whitespace();

            let left = match words.next() {
                Some(word) => word,
                None => continue,
            };
            if left == ARROW {
                return Err(GrammarError::new(
                    line_number,
                    GrammarErrorKind::MissingLeftSide,
                ));
            }
            if !is_non_terminal_name(left) {
                return Err(GrammarError::new(
                    line_number,
                    GrammarErrorKind::LeftSideNotNonTerminal,
                ));
            }
            let left = g.add_non_terminal(left);

            if words.next() != Some(ARROW) {
                return Err(GrammarError::new(
                    line_number,
                    GrammarErrorKind::MissingArrow,
                ));
            }

            let mut right = Vec::new();
            for word in words {
                if word == ARROW {
                    return Err(GrammarError::new(
                        line_number,
                        GrammarErrorKind::ReservedArrow,
                    ));
                }
                right.push(g.add_symbol(word));
            }
            if right.is_empty() {
                return Err(GrammarError::new(
                    line_number,
                    GrammarErrorKind::EmptyRightSide,
                ));
            }

            g.add_rule(left, right);
        }

        match g.non_terminal_index(START) {
            Some(idx) => g.set_start(idx),
            None => {
                return Err(GrammarError::new(0, GrammarErrorKind::UndefinedStartSymbol));
            }
        }

        Ok(g)
    }
}
