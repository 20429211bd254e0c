//! Recursive-descent parser for chemical formulas.
//!
//! ```text
//! formula    := group (Dot integer? group)?
//! group      := term+
//! term       := atom | parenGroup
//! atom       := Symbol integer?
//! parenGroup := LParen group RParen integer?
//! ```
//! The parser knows nothing about chemistry: any well-shaped symbol is accepted here and
//! checked against the periodic table by the evaluator.
use super::formula_error::FormulaError;
use super::tokenizer::{SpannedToken, Token, tokenize};

/// limit of parenthesis nesting, keeps recursion bounded on hostile input
pub const MAX_GROUP_DEPTH: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormulaNode {
    Atom { element: String, count: u32 },
    Group { children: Vec<FormulaNode>, multiplier: u32 },
}

impl FormulaNode {
    pub fn atom(element: &str, count: u32) -> Self {
        FormulaNode::Atom {
            element: element.to_string(),
            count,
        }
    }

    pub fn group(children: Vec<FormulaNode>, multiplier: u32) -> Self {
        FormulaNode::Group {
            children,
            multiplier,
        }
    }
}

/// parsed formula: the main compound and the optional hydrate/adduct after the dot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    /// group with multiplier 1 holding the top-level terms
    pub main: FormulaNode,
    /// group whose multiplier is the number right after the dot
    pub hydration: Option<FormulaNode>,
}

pub struct Parser {
    tokens: Vec<SpannedToken>,
    position: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<SpannedToken>) -> Self {
        Parser {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    fn current(&self) -> Option<&SpannedToken> {
        self.tokens.get(self.position)
    }

    // a stream without End is treated as if it had one
    fn current_token(&self) -> &Token {
        self.current().map(|t| &t.token).unwrap_or(&Token::End)
    }

    fn current_position(&self) -> usize {
        match self.current() {
            Some(t) => t.position,
            None => self.tokens.last().map(|t| t.position + 1).unwrap_or(0),
        }
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    /// formula := group (Dot integer? group)?
    ///
    /// `TrailingInput` cannot come from `tokenize`, which merges adjacent digits; it guards
    /// token streams built by hand
    pub fn parse(mut self) -> Result<Formula, FormulaError> {
        if *self.current_token() == Token::End {
            return Err(FormulaError::EmptyFormula);
        }
        let main = FormulaNode::group(self.parse_terms()?, 1);

        let mut hydration = None;
        if *self.current_token() == Token::Dot {
            self.advance(); // Consume DOT
            let multiplier = self.parse_optional_integer();
            hydration = Some(FormulaNode::group(self.parse_terms()?, multiplier));
        }

        match self.current_token() {
            Token::End => Ok(Formula { main, hydration }),
            Token::RParen => Err(FormulaError::UnexpectedCloseParen {
                position: self.current_position(),
            }),
            Token::Dot => Err(FormulaError::MultipleHydrationClauses),
            _ => Err(FormulaError::TrailingInput {
                position: self.current_position(),
            }),
        }
    }

    /// group := term+
    fn parse_terms(&mut self) -> Result<Vec<FormulaNode>, FormulaError> {
        let mut terms = Vec::new();
        loop {
            match self.current_token() {
                Token::Symbol(_) => terms.push(self.parse_atom()?),
                Token::LParen => terms.push(self.parse_paren_group()?),
                _ => break,
            }
        }
        if terms.is_empty() {
            return Err(self.missing_term());
        }
        Ok(terms)
    }

    // error for a place where an element symbol or '(' must follow
    fn missing_term(&self) -> FormulaError {
        let position = self.current_position();
        match self.current_token() {
            Token::End => FormulaError::UnexpectedEndOfInput,
            Token::RParen => FormulaError::UnexpectedCloseParen { position },
            Token::Dot => FormulaError::UnexpectedToken {
                position,
                found: ".".to_string(),
            },
            Token::Integer(n) => FormulaError::UnexpectedToken {
                position,
                found: n.to_string(),
            },
            Token::Symbol(s) => FormulaError::UnexpectedToken {
                position,
                found: s.clone(),
            },
            Token::LParen => FormulaError::UnexpectedToken {
                position,
                found: "(".to_string(),
            },
        }
    }

    /// atom := Symbol integer?
    fn parse_atom(&mut self) -> Result<FormulaNode, FormulaError> {
        let element = match self.current_token() {
            Token::Symbol(s) => s.clone(),
            _ => return Err(self.missing_term()),
        };
        self.advance(); // Consume SYMBOL
        let count = self.parse_optional_integer();
        Ok(FormulaNode::Atom { element, count })
    }

    /// parenGroup := LParen group RParen integer?
    fn parse_paren_group(&mut self) -> Result<FormulaNode, FormulaError> {
        let open_position = self.current_position();
        if self.depth >= MAX_GROUP_DEPTH {
            return Err(FormulaError::NestingTooDeep {
                position: open_position,
            });
        }
        self.advance(); // Consume LPAREN
        if *self.current_token() == Token::RParen {
            return Err(FormulaError::EmptyGroup {
                position: open_position,
            });
        }

        self.depth += 1;
        let children = match self.parse_terms() {
            Ok(children) => children,
            Err(FormulaError::UnexpectedEndOfInput) => {
                return Err(FormulaError::UnclosedGroup {
                    position: open_position,
                });
            }
            Err(e) => return Err(e),
        };
        self.depth -= 1;

        match self.current_token() {
            Token::RParen => self.advance(), // Consume RPAREN
            Token::End => {
                return Err(FormulaError::UnclosedGroup {
                    position: open_position,
                });
            }
            _ => return Err(self.missing_term()),
        }

        let multiplier = self.parse_optional_integer();
        Ok(FormulaNode::Group {
            children,
            multiplier,
        })
    }

    // implicit count of 1 when no number follows
    fn parse_optional_integer(&mut self) -> u32 {
        if let Token::Integer(n) = *self.current_token() {
            self.advance(); // Consume INTEGER
            n
        } else {
            1
        }
    }
}

/// tokenizes and parses a formula string
pub fn get_ast(formula: &str) -> Result<Formula, FormulaError> {
    let tokens = tokenize(formula)?;
    Parser::new(tokens).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flat_formula() {
        let ast = get_ast("H2O").unwrap();
        assert_eq!(
            ast.main,
            FormulaNode::group(vec![FormulaNode::atom("H", 2), FormulaNode::atom("O", 1)], 1)
        );
        assert_eq!(ast.hydration, None);
    }

    #[test]
    fn test_parse_bare_element() {
        let ast = get_ast("Fe").unwrap();
        assert_eq!(ast.main, FormulaNode::group(vec![FormulaNode::atom("Fe", 1)], 1));
    }

    #[test]
    fn test_parse_nested_groups() {
        let ast = get_ast("K4(Fe(CN)6)").unwrap();
        let cn = FormulaNode::group(vec![FormulaNode::atom("C", 1), FormulaNode::atom("N", 1)], 6);
        let fe_cn = FormulaNode::group(vec![FormulaNode::atom("Fe", 1), cn], 1);
        assert_eq!(
            ast.main,
            FormulaNode::group(vec![FormulaNode::atom("K", 4), fe_cn], 1)
        );
    }

    #[test]
    fn test_parse_hydration() {
        let ast = get_ast("CuSO4.5H2O").unwrap();
        assert_eq!(
            ast.hydration,
            Some(FormulaNode::group(
                vec![FormulaNode::atom("H", 2), FormulaNode::atom("O", 1)],
                5
            ))
        );
        // implicit multiplier of one
        let ast = get_ast("Na2CO3.H2O").unwrap();
        match ast.hydration {
            Some(FormulaNode::Group { multiplier, .. }) => assert_eq!(multiplier, 1),
            other => panic!("unexpected hydration term {:?}", other),
        }
    }

    #[test]
    fn test_structural_errors() {
        assert_eq!(
            get_ast("Fe2(SO4"),
            Err(FormulaError::UnclosedGroup { position: 3 })
        );
        assert_eq!(
            get_ast("((H)"),
            Err(FormulaError::UnclosedGroup { position: 0 })
        );
        assert_eq!(
            get_ast("Ca("),
            Err(FormulaError::UnclosedGroup { position: 2 })
        );
        assert_eq!(
            get_ast("H2O)"),
            Err(FormulaError::UnexpectedCloseParen { position: 3 })
        );
        assert_eq!(
            get_ast(")H"),
            Err(FormulaError::UnexpectedCloseParen { position: 0 })
        );
        assert_eq!(get_ast("()H2O"), Err(FormulaError::EmptyGroup { position: 0 }));
        assert_eq!(get_ast("H(())"), Err(FormulaError::EmptyGroup { position: 2 }));
    }

    #[test]
    fn test_grammar_errors() {
        assert_eq!(get_ast(""), Err(FormulaError::EmptyFormula));
        assert_eq!(get_ast("H2O."), Err(FormulaError::UnexpectedEndOfInput));
        assert_eq!(get_ast("CuSO4.5"), Err(FormulaError::UnexpectedEndOfInput));
        assert_eq!(
            get_ast("2H2O"),
            Err(FormulaError::UnexpectedToken {
                position: 0,
                found: "2".to_string()
            })
        );
        assert_eq!(
            get_ast(".H2O"),
            Err(FormulaError::UnexpectedToken {
                position: 0,
                found: ".".to_string()
            })
        );
        assert_eq!(
            get_ast("(H2O.NH3)"),
            Err(FormulaError::UnexpectedToken {
                position: 4,
                found: ".".to_string()
            })
        );
        assert_eq!(get_ast("H2..O"), Err(FormulaError::MultipleHydrationClauses));
    }

    #[test]
    fn test_trailing_input() {
        let tokens = vec![
            SpannedToken {
                token: Token::Symbol("H".to_string()),
                position: 0,
            },
            SpannedToken {
                token: Token::Integer(2),
                position: 1,
            },
            SpannedToken {
                token: Token::Integer(3),
                position: 2,
            },
            SpannedToken {
                token: Token::End,
                position: 3,
            },
        ];
        assert_eq!(
            Parser::new(tokens).parse(),
            Err(FormulaError::TrailingInput { position: 2 })
        );
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{}H{}", "(".repeat(MAX_GROUP_DEPTH), ")".repeat(MAX_GROUP_DEPTH));
        assert!(get_ast(&deep).is_ok());
        let too_deep = format!(
            "{}H{}",
            "(".repeat(MAX_GROUP_DEPTH + 1),
            ")".repeat(MAX_GROUP_DEPTH + 1)
        );
        assert_eq!(
            get_ast(&too_deep),
            Err(FormulaError::NestingTooDeep {
                position: MAX_GROUP_DEPTH
            })
        );
    }
}
