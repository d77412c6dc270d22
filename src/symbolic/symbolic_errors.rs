use thiserror::Error;

/// Failure of turning a normalized expression into a number.
///
/// Parse and name-resolution failures are reported when the expression is
/// compiled, domain failures when it is called at a concrete (x, y).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    /// the text is not a valid expression of the strict grammar
    #[error("malformed expression: {detail}")]
    MalformedExpression { detail: String },
    /// identifier outside the allow-list of the evaluation context
    #[error("name '{name}' is not defined")]
    UnknownSymbol { name: String },
    /// argument outside the real-valued domain of an operation
    #[error("math domain error: {detail}")]
    Domain { detail: String },
}

impl EvaluationError {
    pub fn malformed(detail: impl Into<String>) -> Self {
        EvaluationError::MalformedExpression {
            detail: detail.into(),
        }
    }

    pub fn unknown(name: impl Into<String>) -> Self {
        EvaluationError::UnknownSymbol { name: name.into() }
    }

    pub fn domain(detail: impl Into<String>) -> Self {
        EvaluationError::Domain {
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_detail() {
        let e = EvaluationError::unknown("z");
        assert_eq!(e.to_string(), "name 'z' is not defined");
        let e = EvaluationError::domain("sqrt(-1) is undefined for negative arguments");
        assert_eq!(
            e.to_string(),
            "math domain error: sqrt(-1) is undefined for negative arguments"
        );
        let e = EvaluationError::malformed("unexpected end of expression");
        assert!(e.to_string().starts_with("malformed expression"));
    }
}
