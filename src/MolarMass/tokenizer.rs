//! Splits a formula string into element symbols, integers, brackets and the hydration dot.
//!
//! Positions are 0-based character offsets into the input. Only ASCII is ever accepted, so
//! every character before a valid token is one byte long and byte and character offsets agree.
use super::formula_error::FormulaError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Symbol(String),
    Integer(u32),
    LParen,
    RParen,
    Dot,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedToken {
    pub token: Token,
    pub position: usize,
}

impl SpannedToken {
    fn new(token: Token, position: usize) -> Self {
        SpannedToken { token, position }
    }
}

/// tokenizes the whole formula. The returned stream always ends with `Token::End`
pub fn tokenize(formula: &str) -> Result<Vec<SpannedToken>, FormulaError> {
    let chars: Vec<char> = formula.chars().collect();
    let mut tokens = Vec::new();
    let mut seen_dot = false;
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            'A'..='Z' => {
                let mut symbol = c.to_string();
                if let Some(&next) = chars.get(i + 1) {
                    if next.is_ascii_lowercase() {
                        symbol.push(next);
                    }
                }
                let len = symbol.len();
                tokens.push(SpannedToken::new(Token::Symbol(symbol), i));
                i += len;
            }
            '0'..='9' => {
                let start = i;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
                let digits: String = chars[start..i].iter().collect();
                let value = parse_count(&digits, start)?;
                tokens.push(SpannedToken::new(Token::Integer(value), start));
            }
            '(' => {
                tokens.push(SpannedToken::new(Token::LParen, i));
                i += 1;
            }
            ')' => {
                tokens.push(SpannedToken::new(Token::RParen, i));
                i += 1;
            }
            '.' => {
                if seen_dot {
                    return Err(FormulaError::MultipleHydrationClauses);
                }
                seen_dot = true;
                tokens.push(SpannedToken::new(Token::Dot, i));
                i += 1;
            }
            _ => {
                return Err(FormulaError::InvalidCharacter {
                    position: i,
                    character: c,
                });
            }
        }
    }
    tokens.push(SpannedToken::new(Token::End, chars.len()));
    Ok(tokens)
}

// counts and multipliers are >= 1 and written without leading zeros
fn parse_count(digits: &str, position: usize) -> Result<u32, FormulaError> {
    if digits.starts_with('0') {
        return Err(FormulaError::InvalidMultiplier { position });
    }
    digits
        .parse::<u32>()
        .map_err(|_| FormulaError::InvalidMultiplier { position })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(formula: &str) -> Vec<Token> {
        tokenize(formula)
            .unwrap()
            .into_iter()
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn test_tokenize_simple() {
        assert_eq!(
            kinds("H2O"),
            vec![
                Token::Symbol("H".to_string()),
                Token::Integer(2),
                Token::Symbol("O".to_string()),
                Token::End,
            ]
        );
        assert_eq!(
            kinds("NaCl"),
            vec![
                Token::Symbol("Na".to_string()),
                Token::Symbol("Cl".to_string()),
                Token::End,
            ]
        );
    }

    #[test]
    fn test_tokenize_groups_and_hydrate() {
        assert_eq!(
            kinds("Fe2(SO4)3.12H2O"),
            vec![
                Token::Symbol("Fe".to_string()),
                Token::Integer(2),
                Token::LParen,
                Token::Symbol("S".to_string()),
                Token::Symbol("O".to_string()),
                Token::Integer(4),
                Token::RParen,
                Token::Integer(3),
                Token::Dot,
                Token::Integer(12),
                Token::Symbol("H".to_string()),
                Token::Integer(2),
                Token::Symbol("O".to_string()),
                Token::End,
            ]
        );
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize("Ca3(PO4)2").unwrap();
        let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(kinds(""), vec![Token::End]);
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(
            tokenize("H2 O"),
            Err(FormulaError::InvalidCharacter {
                position: 2,
                character: ' '
            })
        );
        assert_eq!(
            tokenize("h2o"),
            Err(FormulaError::InvalidCharacter {
                position: 0,
                character: 'h'
            })
        );
        assert_eq!(
            tokenize("NaCl+"),
            Err(FormulaError::InvalidCharacter {
                position: 4,
                character: '+'
            })
        );
        // a symbol takes at most one lowercase letter
        assert_eq!(
            tokenize("Uuo"),
            Err(FormulaError::InvalidCharacter {
                position: 2,
                character: 'o'
            })
        );
        assert_eq!(
            tokenize("CuSO4·5H2O"),
            Err(FormulaError::InvalidCharacter {
                position: 5,
                character: '·'
            })
        );
    }

    #[test]
    fn test_invalid_counts() {
        assert_eq!(
            tokenize("H0"),
            Err(FormulaError::InvalidMultiplier { position: 1 })
        );
        assert_eq!(
            tokenize("H02"),
            Err(FormulaError::InvalidMultiplier { position: 1 })
        );
        assert_eq!(
            tokenize("C99999999999"),
            Err(FormulaError::InvalidMultiplier { position: 1 })
        );
        assert_eq!(kinds("C4294967295")[1], Token::Integer(u32::MAX));
    }

    #[test]
    fn test_second_dot_rejected() {
        assert_eq!(
            tokenize("H2..O"),
            Err(FormulaError::MultipleHydrationClauses)
        );
        assert_eq!(
            tokenize("CuSO4.5H2O.NH3"),
            Err(FormulaError::MultipleHydrationClauses)
        );
    }
}
