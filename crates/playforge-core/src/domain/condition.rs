//! Three-token `if` conditions: `<left> <operator> <right>`.
//!
//! `==` and `!=` compare the answer stored under `left` with the literal
//! `right`. `&&` and `||` treat both sides as variable names and only test
//! whether they have been answered, not what the answer was.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::ConditionError;
use crate::domain::value_objects::AnswerMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    NotEq,
    And,
    Or,
}

impl Operator {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

impl FromStr for Operator {
    type Err = ConditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "==" => Ok(Self::Eq),
            "!=" => Ok(Self::NotEq),
            "&&" => Ok(Self::And),
            "||" => Ok(Self::Or),
            other => Err(ConditionError::UnsupportedOperator {
                operator: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    left: String,
    operator: Operator,
    right: String,
}

impl Condition {
    pub fn parse(expression: &str) -> Result<Self, ConditionError> {
        let tokens: Vec<&str> = expression.split_whitespace().collect();
        let [left, operator, right] = tokens.as_slice() else {
            return Err(ConditionError::Malformed {
                expression: expression.to_string(),
                tokens: tokens.len(),
            });
        };

        Ok(Self {
            left: (*left).to_string(),
            operator: operator.parse()?,
            right: (*right).to_string(),
        })
    }

    pub fn left(&self) -> &str {
        &self.left
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn right(&self) -> &str {
        &self.right
    }

    pub fn evaluate(&self, answers: &AnswerMap) -> bool {
        match self.operator {
            Operator::Eq => self.left_matches(answers),
            Operator::NotEq => !self.left_matches(answers),
            Operator::And => answers.contains_key(&self.left) && answers.contains_key(&self.right),
            Operator::Or => answers.contains_key(&self.left) || answers.contains_key(&self.right),
        }
    }

    fn left_matches(&self, answers: &AnswerMap) -> bool {
        answers
            .get(&self.left)
            .is_some_and(|value| value.to_string() == self.right)
    }
}

impl FromStr for Condition {
    type Err = ConditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator, self.right)
    }
}

/// Parse and evaluate `expression` in one step.
pub fn evaluate(expression: &str, answers: &AnswerMap) -> Result<bool, ConditionError> {
    Ok(Condition::parse(expression)?.evaluate(answers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_compares_answer_with_literal() {
        let us = AnswerMap::new().with("cluster_region", "us");
        let europe = AnswerMap::new().with("cluster_region", "europe");

        assert_eq!(evaluate("cluster_region == us", &us), Ok(true));
        assert_eq!(evaluate("cluster_region == us", &europe), Ok(false));
        assert_eq!(evaluate("cluster_region == us", &AnswerMap::new()), Ok(false));
    }

    #[test]
    fn inequality_is_true_for_missing_answer() {
        let answers = AnswerMap::new().with("record_type", "A");
        assert_eq!(evaluate("record_type != CNAME", &answers), Ok(true));
        assert_eq!(evaluate("record_type != A", &answers), Ok(false));
        assert_eq!(evaluate("record_type != A", &AnswerMap::new()), Ok(true));
    }

    #[test]
    fn integer_answers_compare_by_text() {
        let answers = AnswerMap::new().with("ttl", 3600_i64);
        assert_eq!(evaluate("ttl == 3600", &answers), Ok(true));
    }

    #[test]
    fn and_or_test_key_presence_not_value() {
        let answers = AnswerMap::new()
            .with("enable_tls", "false")
            .with("hostname", "");

        assert_eq!(evaluate("enable_tls && hostname", &answers), Ok(true));
        assert_eq!(evaluate("enable_tls && port", &answers), Ok(false));
        assert_eq!(evaluate("port || hostname", &answers), Ok(true));
        assert_eq!(evaluate("port || proxy", &answers), Ok(false));
    }

    #[test]
    fn wrong_token_count_is_malformed() {
        for expr in ["", "a", "a ==", "a == b c", "a==b"] {
            let err = Condition::parse(expr).unwrap_err();
            assert!(
                matches!(err, ConditionError::Malformed { .. }),
                "expected malformed for {expr:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn unknown_operator_is_rejected() {
        assert_eq!(
            Condition::parse("a >= b"),
            Err(ConditionError::UnsupportedOperator {
                operator: ">=".into()
            })
        );
    }

    #[test]
    fn display_round_trips_tokens() {
        let cond: Condition = "  record_type   ==  CNAME ".parse().unwrap();
        assert_eq!(cond.to_string(), "record_type == CNAME");
        assert_eq!(cond.operator(), Operator::Eq);
    }
}
